//! Per-URL bookkeeping for batch runs.

/// Outcome of a batch download, one entry per distinct URL in first-seen order.
///
/// Recording a URL twice keeps its original position and overwrites the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    outcomes: Vec<(String, bool)>,
}

impl BatchReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the result for `url`.
    pub fn record(&mut self, url: &str, succeeded: bool) {
        match self.outcomes.iter_mut().find(|(seen, _)| seen == url) {
            Some(entry) => entry.1 = succeeded,
            None => self.outcomes.push((url.to_string(), succeeded)),
        }
    }

    /// Number of distinct URLs recorded.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn successful(&self) -> usize {
        self.outcomes.iter().filter(|(_, ok)| *ok).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.successful()
    }

    /// True if any URL succeeded; an empty report counts as failure.
    #[must_use]
    pub fn any_succeeded(&self) -> bool {
        self.outcomes.iter().any(|(_, ok)| *ok)
    }

    /// Result for `url`, if it was recorded.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<bool> {
        self.outcomes
            .iter()
            .find(|(seen, _)| seen == url)
            .map(|(_, ok)| *ok)
    }

    /// Per-URL results in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.outcomes.iter().map(|(url, ok)| (url.as_str(), *ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_has_no_success() {
        let report = BatchReport::new();
        assert_eq!(report.total(), 0);
        assert_eq!(report.failed(), 0);
        assert!(!report.any_succeeded());
    }

    #[test]
    fn test_counts_successes_and_failures() {
        let mut report = BatchReport::new();
        report.record("a", true);
        report.record("b", false);
        report.record("c", true);

        assert_eq!(report.total(), 3);
        assert_eq!(report.successful(), 2);
        assert_eq!(report.failed(), 1);
        assert!(report.any_succeeded());
        assert_eq!(report.get("b"), Some(false));
        assert_eq!(report.get("missing"), None);
    }

    #[test]
    fn test_repeated_url_overwrites_in_place() {
        let mut report = BatchReport::new();
        report.record("a", true);
        report.record("b", true);
        report.record("a", false);

        assert_eq!(report.total(), 2);
        assert_eq!(report.get("a"), Some(false));
        let order: Vec<&str> = report.iter().map(|(url, _)| url).collect();
        assert_eq!(order, vec!["a", "b"]);
    }
}
