use crate::error::FeedError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Issue a GET request and decode the JSON body.
///
/// Non-success statuses surface as [`FeedError::Api`] carrying the response body.
pub(crate) async fn get_json<T>(client: &Client, url: Url) -> Result<T, FeedError>
where
    T: DeserializeOwned,
{
    debug!(%url, "Fetching venue feed");

    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FeedError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|error| FeedError::Parse(format!("Failed to decode {url}: {error}")))
}
