//! Fuzzy text similarity used to pair events and outcomes across venues.

/// A symmetric, case-insensitive similarity score in the range 0-100.
///
/// Implementations must be deterministic and satisfy
/// `score(a, b) == score(b, a)`. Plain closures `Fn(&str, &str) -> f64` are
/// accepted, which keeps matcher tests independent of the real metric.
pub trait Similarity {
    fn score(&self, left: &str, right: &str) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64,
{
    fn score(&self, left: &str, right: &str) -> f64 {
        self(left, right)
    }
}

/// Normalized insertion/deletion distance ratio.
///
/// `100 * (1 - indel_distance / (len_a + len_b))`, which equals
/// `200 * lcs / (len_a + len_b)` where `lcs` is the longest common
/// subsequence. Both inputs are lower-cased and compared per `char`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndelRatio;

impl Similarity for IndelRatio {
    fn score(&self, left: &str, right: &str) -> f64 {
        indel_ratio(left, right)
    }
}

/// See [`IndelRatio`]. Two empty strings score 100.
pub fn indel_ratio(left: &str, right: &str) -> f64 {
    let left: Vec<char> = left.to_lowercase().chars().collect();
    let right: Vec<char> = right.to_lowercase().chars().collect();

    let total = left.len() + right.len();
    if total == 0 {
        return 100.0;
    }

    let lcs = longest_common_subsequence(&left, &right);
    200.0 * lcs as f64 / total as f64
}

/// Two-row dynamic programme, `O(n * m)` time and `O(min(n, m))` space.
fn longest_common_subsequence(left: &[char], right: &[char]) -> usize {
    let (outer, inner) = if left.len() >= right.len() {
        (left, right)
    } else {
        (right, left)
    };

    let mut previous = vec![0usize; inner.len() + 1];
    let mut current = vec![0usize; inner.len() + 1];

    for &a in outer {
        for (j, &b) in inner.iter().enumerate() {
            current[j + 1] = if a == b {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[inner.len()]
}
