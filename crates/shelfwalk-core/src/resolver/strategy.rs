use similar::{Algorithm, TextDiff};

/// Similarity score between two already lower-cased strings, within `0.0..=1.0`.
pub trait MatchStrategy {
    fn ratio(&self, query: &str, candidate: &str) -> f32;
}

impl<F> MatchStrategy for F
where
    F: Fn(&str, &str) -> f32,
{
    fn ratio(&self, query: &str, candidate: &str) -> f32 {
        self(query, candidate)
    }
}

/// Character-level diff ratio: `2 * matched / (len(a) + len(b))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharDiffRatio {
    algorithm: Algorithm,
}

impl CharDiffRatio {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            algorithm: Algorithm::Myers,
        }
    }

    #[must_use]
    pub const fn with_algorithm(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }
}

impl Default for CharDiffRatio {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStrategy for CharDiffRatio {
    fn ratio(&self, query: &str, candidate: &str) -> f32 {
        if query.is_empty() && candidate.is_empty() {
            return 1.0;
        }
        TextDiff::configure()
            .algorithm(self.algorithm)
            .diff_chars(query, candidate)
            .ratio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        let strategy = CharDiffRatio::new();
        assert!((strategy.ratio("fiction", "fiction") - 1.0).abs() < f32::EPSILON);
        assert!((strategy.ratio("", "") - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert!(CharDiffRatio::new().ratio("abc", "xyz") < f32::EPSILON);
    }

    #[test]
    fn single_typo_stays_above_half() {
        let strategy = CharDiffRatio::with_algorithm(Algorithm::Patience);
        assert!(strategy.ratio("pyhton", "python") > 0.5);
    }
}
