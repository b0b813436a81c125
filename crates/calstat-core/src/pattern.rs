//! Named, case-insensitive event patterns.
//!
//! A [`PatternSet`] is an ordered list of `(name, regex)` pairs. Order is
//! preserved so an event matching several patterns is reported in a stable
//! order, and so report sections follow the order the user configured.

use regex::{Regex, RegexBuilder};
use tracing::trace;

use crate::error::{AnalyzerError, AnalyzerResult};

/// Pattern name used for a single ad hoc expression.
pub const AD_HOC_PATTERN_NAME: &str = "matched_events";

/// The built-in pattern set used when none is configured.
pub const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    ("meetings", r"meeting|sync|standup"),
    ("classes", r"CSE \d+"),
    ("workout", r"workout"),
    ("social", r"lunch|coffee"),
];

/// A single compiled pattern.
#[derive(Debug, Clone)]
pub struct NamedPattern {
    name: String,
    regex: Regex,
}

impl NamedPattern {
    /// Returns the pattern name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the source expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns true if the regex matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// An ordered collection of named case-insensitive regexes.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<NamedPattern>,
    search_description: bool,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            search_description: true,
        }
    }
}

impl PatternSet {
    /// Compiles `(name, expression)` pairs in order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidPattern`] for an expression that does
    /// not compile and [`AnalyzerError::DuplicatePattern`] when a name repeats.
    pub fn new<I, N, P>(patterns: I) -> AnalyzerResult<Self>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: AsRef<str>,
    {
        let mut set = Self::default();
        for (name, expr) in patterns {
            set.push(name, expr.as_ref())?;
        }
        Ok(set)
    }

    /// The built-in meetings / classes / workout / social set.
    pub fn default_set() -> Self {
        // The built-in expressions are known to compile.
        Self::new(DEFAULT_PATTERNS.iter().copied()).unwrap_or_default()
    }

    /// A set holding one expression under [`AD_HOC_PATTERN_NAME`].
    pub fn single(expr: &str) -> AnalyzerResult<Self> {
        Self::new([(AD_HOC_PATTERN_NAME, expr)])
    }

    /// Appends a pattern at the end of the set.
    pub fn push(&mut self, name: impl Into<String>, expr: &str) -> AnalyzerResult<()> {
        let name = name.into();
        if self.patterns.iter().any(|p| p.name == name) {
            return Err(AnalyzerError::duplicate_pattern(name));
        }
        let regex = RegexBuilder::new(expr)
            .case_insensitive(true)
            .build()
            .map_err(|e| AnalyzerError::invalid_pattern(name.clone(), e))?;
        self.patterns.push(NamedPattern { name, regex });
        Ok(())
    }

    /// Builder: whether descriptions are searched as well as summaries.
    #[must_use]
    pub fn with_description_search(mut self, enabled: bool) -> Self {
        self.search_description = enabled;
        self
    }

    /// Returns true if descriptions are searched.
    pub fn searches_description(&self) -> bool {
        self.search_description
    }

    /// Returns the number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the set holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterates patterns in order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedPattern> {
        self.patterns.iter()
    }

    /// Iterates pattern names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }

    /// Returns the names of every pattern matching the summary or description.
    pub fn matches<'a>(&'a self, summary: &str, description: Option<&str>) -> Vec<&'a str> {
        let description = description.filter(|_| self.search_description);
        let matched: Vec<&str> = self
            .patterns
            .iter()
            .filter(|p| p.is_match(summary) || description.is_some_and(|d| p.is_match(d)))
            .map(|p| p.name.as_str())
            .collect();
        trace!(summary, ?matched, "Matched event text");
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_order_and_names() {
        let set = PatternSet::default_set();
        assert_eq!(
            set.names().collect::<Vec<_>>(),
            vec!["meetings", "classes", "workout", "social"]
        );
        assert!(set.searches_description());
    }

    #[test]
    fn class_pattern_requires_exact_prefix() {
        let set = PatternSet::default_set();
        assert_eq!(set.matches("CSE 6040 - Lecture", None), vec!["classes"]);
        assert!(set.matches("CSC 6040", None).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let set = PatternSet::default_set();
        assert_eq!(set.matches("TEAM STANDUP", None), vec!["meetings"]);
        assert_eq!(set.matches("cse 101 review", None), vec!["classes"]);
    }

    #[test]
    fn one_event_can_match_many_patterns() {
        let set = PatternSet::default_set();
        assert_eq!(
            set.matches("Lunch meeting after workout", None),
            vec!["meetings", "workout", "social"]
        );
    }

    #[test]
    fn description_is_an_equal_search_target() {
        let set = PatternSet::default_set();
        assert_eq!(
            set.matches("Catch-up", Some("Grab coffee downstairs")),
            vec!["social"]
        );
    }

    #[test]
    fn description_search_can_be_disabled() {
        let set = PatternSet::default_set().with_description_search(false);
        assert!(set.matches("Catch-up", Some("Grab coffee downstairs")).is_empty());
    }

    #[test]
    fn single_uses_ad_hoc_name() {
        let set = PatternSet::single("dentist").unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec![AD_HOC_PATTERN_NAME]);
        assert_eq!(set.matches("Dentist appointment", None), vec!["matched_events"]);
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = PatternSet::new([("broken", "(unclosed")]).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidPattern { ref name, .. } if name == "broken"));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = PatternSet::new([("a", "x"), ("a", "y")]).unwrap_err();
        assert!(matches!(err, AnalyzerError::DuplicatePattern { ref name } if name == "a"));
    }

    #[test]
    fn empty_set() {
        let set = PatternSet::new(Vec::<(String, String)>::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.matches("anything", None).is_empty());
    }
}
