//! Wildcard search over the section index.
//!
//! A query is literal text where `*` stands for any run of characters
//! (within a line). Matching is case-insensitive. A section matches when its
//! path matches the pattern from the start, or when its body contains the
//! pattern anywhere. An empty query matches everything.

use regex::{Regex, RegexBuilder};

use crate::parser::{Interface, InterfaceIndex, Section, SectionIndex};

/// A compiled wildcard query.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    query: String,
    anchored: Regex,
    floating: Regex,
}

impl SearchPattern {
    /// Compile a wildcard query.
    ///
    /// # Errors
    ///
    /// Fails only if the regex engine rejects the pattern, which happens for
    /// queries large enough to exceed its size limit.
    pub fn new(query: &str) -> Result<Self, regex::Error> {
        let body = wildcard_to_regex(query);
        let anchored = RegexBuilder::new(&format!("^(?:{body})"))
            .case_insensitive(true)
            .build()?;
        let floating = RegexBuilder::new(&body).case_insensitive(true).build()?;

        Ok(Self {
            query: query.to_string(),
            anchored,
            floating,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Path matches from its first character.
    pub fn matches_path(&self, path: &str) -> bool {
        self.anchored.is_match(path)
    }

    /// Body contains a match anywhere.
    pub fn matches_body(&self, body: &str) -> bool {
        self.floating.is_match(body)
    }

    pub fn matches(&self, section: &Section) -> bool {
        self.matches_path(&section.path) || self.matches_body(&section.body)
    }

    pub fn matches_interface(&self, interface: &Interface) -> bool {
        self.matches_path(&interface.name) || self.matches_body(&interface.body)
    }
}

/// Escape everything except `*`, which becomes `.*`.
fn wildcard_to_regex(query: &str) -> String {
    query
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*")
}

/// Sections whose path or body matches `query`, in index order.
///
/// Never fails: a query that cannot be compiled yields an empty result.
pub fn search(index: &SectionIndex, query: &str) -> SectionIndex {
    let pattern = match SearchPattern::new(query) {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::warn!(error = %e, "search pattern rejected, returning no results");
            return SectionIndex::new();
        }
    };

    let results: SectionIndex = index
        .sections()
        .filter(|section| pattern.matches(section))
        .cloned()
        .collect();

    tracing::debug!(query, matched = results.len(), total = index.len(), "search");
    results
}

/// Interfaces whose name or body matches `query`.
pub fn search_interfaces(index: &InterfaceIndex, query: &str) -> InterfaceIndex {
    match SearchPattern::new(query) {
        Ok(pattern) => index
            .interfaces()
            .filter(|interface| pattern.matches_interface(interface))
            .cloned()
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "search pattern rejected, returning no results");
            InterfaceIndex::new()
        }
    }
}
