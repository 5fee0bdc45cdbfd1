//! Per-resource lower and upper task limits.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::ModelError;

/// Lower and upper bounds on how many tasks each resource may receive.
///
/// Every constructor keeps `lower[i] <= upper[i]`. Whether the bounds
/// admit a solution for a given task count (`Σlower <= tasks <= Σupper`)
/// is the caller's concern; see [`crate::validation::check_preconditions`].
/// Deserialization goes through [`Limits::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLimits")]
pub struct Limits {
    /// Minimum tasks per resource.
    pub lower: Vec<usize>,
    /// Maximum tasks per resource.
    pub upper: Vec<usize>,
}

#[derive(Deserialize)]
struct RawLimits {
    lower: Vec<usize>,
    upper: Vec<usize>,
}

impl TryFrom<RawLimits> for Limits {
    type Error = ModelError;

    fn try_from(raw: RawLimits) -> Result<Self, Self::Error> {
        Self::new(raw.lower, raw.upper)
    }
}

impl Limits {
    /// Creates limits from explicit vectors.
    pub fn new(lower: Vec<usize>, upper: Vec<usize>) -> Result<Self, ModelError> {
        if lower.len() != upper.len() {
            return Err(ModelError::LengthMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        if let Some(resource) = (0..lower.len()).find(|&i| lower[i] > upper[i]) {
            return Err(ModelError::InvertedLimits {
                resource,
                lower: lower[resource],
                upper: upper[resource],
            });
        }
        Ok(Self { lower, upper })
    }

    /// Same bounds for every resource.
    ///
    /// `lower` is clamped to `upper`.
    pub fn uniform(resources: usize, lower: usize, upper: usize) -> Self {
        Self {
            lower: vec![lower.min(upper); resources],
            upper: vec![upper; resources],
        }
    }

    /// Caps the resources in `range` at `upper` (lower limits are clamped).
    ///
    /// # Example
    /// ```
    /// use u_allocate::models::Limits;
    ///
    /// // Second half of the resources limited to 2 * tasks / resources.
    /// let limits = Limits::uniform(4, 1, 100).with_upper_range(2..4, 50);
    /// assert_eq!(limits.upper, vec![100, 100, 50, 50]);
    /// ```
    pub fn with_upper_range(mut self, range: Range<usize>, upper: usize) -> Self {
        for i in range {
            self.upper[i] = upper;
            self.lower[i] = self.lower[i].min(upper);
        }
        self
    }

    /// Number of resources.
    #[inline]
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Whether there are no resources.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Extra tasks resource `i` can take above its lower limit.
    #[inline]
    pub fn capacity(&self, i: usize) -> usize {
        self.upper[i] - self.lower[i]
    }

    /// Tasks placed before any cost is considered.
    pub fn lower_sum(&self) -> usize {
        self.lower.iter().sum()
    }

    /// Most tasks the resources can take together.
    pub fn upper_sum(&self) -> usize {
        self.upper.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let l = Limits::new(vec![1, 1, 0], vec![4, 3, 2]).unwrap();
        assert_eq!(l.len(), 3);
        assert_eq!(l.capacity(1), 2);
        assert_eq!(l.lower_sum(), 2);
        assert_eq!(l.upper_sum(), 9);
    }

    #[test]
    fn test_length_mismatch() {
        let err = Limits::new(vec![1, 1], vec![4]).unwrap_err();
        assert_eq!(err, ModelError::LengthMismatch { lower: 2, upper: 1 });
    }

    #[test]
    fn test_inverted_limits() {
        let err = Limits::new(vec![1, 5], vec![4, 4]).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvertedLimits {
                resource: 1,
                lower: 5,
                upper: 4
            }
        );
    }

    #[test]
    fn test_uniform_and_capped_range() {
        let l = Limits::uniform(4, 5, 20).with_upper_range(2..4, 3);
        assert_eq!(l.upper, vec![20, 20, 3, 3]);
        assert_eq!(l.lower, vec![5, 5, 3, 3]);
        assert!(!l.is_empty());
        assert!(Limits::uniform(0, 0, 0).is_empty());
    }

    #[test]
    fn test_deserialize_checks_limits() {
        let l: Limits = serde_json::from_str(r#"{"lower":[1,0],"upper":[4,2]}"#).unwrap();
        assert_eq!(l, Limits::new(vec![1, 0], vec![4, 2]).unwrap());

        let inverted = serde_json::from_str::<Limits>(r#"{"lower":[1,5],"upper":[4,4]}"#);
        assert!(inverted
            .unwrap_err()
            .to_string()
            .contains("lower limit 5 exceeds upper limit 4"));
        assert!(serde_json::from_str::<Limits>(r#"{"lower":[1],"upper":[4,4]}"#).is_err());
    }
}
