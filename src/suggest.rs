//! Fuzzy "did you mean" suggestions for unknown section paths and interface
//! names.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher};

/// Best fuzzy matches for `query` among `candidates`, highest score first.
pub fn suggest<'a>(
    query: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    limit: usize,
) -> Vec<&'a str> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    pattern
        .match_list(candidates, &mut matcher)
        .into_iter()
        .take(limit)
        .map(|(candidate, _score)| candidate)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_typo() {
        let paths = ["system interface", "system dns", "firewall policy"];
        let suggestions = suggest("sytem dns", paths, 3);
        assert_eq!(suggestions.first(), Some(&"system dns"));
    }

    #[test]
    fn test_suggest_limit_and_no_match() {
        let paths = ["port1", "port2", "port3"];
        assert_eq!(suggest("port", paths, 2).len(), 2);
        assert!(suggest("xyz", paths, 3).is_empty());
    }
}
