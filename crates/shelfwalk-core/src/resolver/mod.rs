use std::cmp::Ordering;

mod strategy;

pub use strategy::{CharDiffRatio, MatchStrategy};

pub const DEFAULT_FUZZY_CUTOFF: f32 = 0.5;
pub const DEFAULT_FUZZY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Empty,
    One(String),
    /// Needs a numeric pick; entries keep candidate-list order.
    Many(Vec<String>),
}

impl MatchResult {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Free-text lookup against a candidate list: fuzzy ratio hits unioned with
/// case-insensitive substring hits.
#[derive(Debug, Clone)]
pub struct NameResolver<S = CharDiffRatio> {
    strategy: S,
    cutoff: f32,
    limit: usize,
}

impl Default for NameResolver<CharDiffRatio> {
    fn default() -> Self {
        Self::new(CharDiffRatio::new())
    }
}

impl<S: MatchStrategy> NameResolver<S> {
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            cutoff: DEFAULT_FUZZY_CUTOFF,
            limit: DEFAULT_FUZZY_LIMIT,
        }
    }

    #[must_use]
    pub fn with_cutoff(mut self, cutoff: f32) -> Self {
        self.cutoff = cutoff;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn resolve(&self, query: &str, candidates: &[String]) -> MatchResult {
        let mut picked: Vec<String> = self
            .match_indices(query, candidates)
            .into_iter()
            .map(|index| candidates[index].clone())
            .collect();
        match picked.len() {
            0 => MatchResult::Empty,
            1 => MatchResult::One(picked.remove(0)),
            _ => MatchResult::Many(picked),
        }
    }

    /// Indices of matching candidates, ascending and unique.
    pub fn match_indices(&self, query: &str, candidates: &[String]) -> Vec<usize> {
        let query = query.to_lowercase();
        let lowered: Vec<String> = candidates.iter().map(|c| c.to_lowercase()).collect();

        let mut hits = self.fuzzy_indices(&query, &lowered);
        hits.extend(
            lowered
                .iter()
                .enumerate()
                .filter(|(_, candidate)| candidate.contains(query.as_str()))
                .map(|(index, _)| index),
        );
        hits.sort_unstable();
        hits.dedup();
        hits
    }

    fn fuzzy_indices(&self, query: &str, lowered: &[String]) -> Vec<usize> {
        let mut scored: Vec<(f32, usize)> = lowered
            .iter()
            .enumerate()
            .map(|(index, candidate)| (self.strategy.ratio(query, candidate), index))
            .filter(|(score, _)| *score >= self.cutoff)
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        scored.truncate(self.limit);
        scored.into_iter().map(|(_, index)| index).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn exact_query_in_any_case_is_always_found() {
        let resolver = NameResolver::default();
        let candidates = names(&["__Penguin", "__Orbit", "$_Tor", "#_Vintage"]);
        for candidate in &candidates {
            for query in [
                candidate.clone(),
                candidate.to_uppercase(),
                candidate.to_lowercase(),
            ] {
                let hits = resolver.match_indices(&query, &candidates);
                assert!(
                    hits.iter().any(|i| &candidates[*i] == candidate),
                    "{query} must resolve to {candidate}"
                );
            }
        }
    }

    #[test]
    fn short_substring_matches_below_fuzzy_cutoff() {
        let resolver = NameResolver::default();
        let candidates = names(&["Distributed Systems Design", "Cooking"]);
        assert_eq!(
            resolver.resolve("sys", &candidates),
            MatchResult::One("Distributed Systems Design".to_string())
        );
    }

    #[test]
    fn typo_resolves_through_fuzzy_ratio() {
        let resolver = NameResolver::default();
        let candidates = names(&["Python", "Haskell"]);
        assert_eq!(
            resolver.resolve("pyhton", &candidates),
            MatchResult::One("Python".to_string())
        );
    }

    #[test]
    fn several_hits_need_disambiguation_in_candidate_order() {
        let resolver = NameResolver::default();
        let candidates = names(&["Rust Basics", "Go", "Advanced Rust"]);
        assert_eq!(
            resolver.resolve("RUST", &candidates),
            MatchResult::Many(names(&["Rust Basics", "Advanced Rust"]))
        );
    }

    #[test]
    fn empty_candidate_list_is_not_an_error() {
        let resolver = NameResolver::default();
        assert_eq!(resolver.resolve("anything", &[]), MatchResult::Empty);
        assert!(resolver.resolve("zzz", &names(&["abc"])).is_empty());
    }

    #[test]
    fn fuzzy_hits_are_capped_but_substring_hits_are_not() {
        let always = |_: &str, _: &str| 1.0_f32;
        let resolver = NameResolver::new(always).with_limit(2);
        let candidates = names(&["aa", "bb", "cc", "dd"]);
        assert_eq!(resolver.match_indices("q", &candidates), vec![0, 1]);

        let never = |_: &str, _: &str| 0.0_f32;
        let resolver = NameResolver::new(never).with_limit(1);
        let candidates = names(&["ch-1", "ch-2", "ch-3"]);
        assert_eq!(resolver.match_indices("ch", &candidates), vec![0, 1, 2]);
    }

    #[test]
    fn candidates_differing_only_by_case_stay_distinct() {
        let resolver = NameResolver::default();
        let candidates = names(&["notes", "Notes"]);
        assert_eq!(
            resolver.resolve("notes", &candidates),
            MatchResult::Many(names(&["notes", "Notes"]))
        );
    }
}
