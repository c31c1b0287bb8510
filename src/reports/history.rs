//! Capped report history, newest first

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub const WEEKLY_HISTORY_LIMIT: usize = 20;
pub const COACHING_HISTORY_LIMIT: usize = 10;
pub const DETAILED_HISTORY_LIMIT: usize = 15;

/// Most recent reports first; the oldest are evicted past the cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHistory<T> {
    limit: usize,
    reports: VecDeque<T>,
}

impl<T> ReportHistory<T> {
    /// A limit of zero is raised to one
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            reports: VecDeque::with_capacity(limit),
        }
    }

    pub fn push(&mut self, report: T) {
        self.reports.push_front(report);
        self.reports.truncate(self.limit);
    }

    /// Most recent report
    pub fn latest(&self) -> Option<&T> {
        self.reports.front()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.reports.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.reports.iter()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut history = ReportHistory::new(3);
        history.push(1);
        history.push(2);
        assert_eq!(history.latest(), Some(&2));
        assert_eq!(history.get(1), Some(&1));
    }

    #[test]
    fn test_cap_evicts_oldest() {
        for limit in [WEEKLY_HISTORY_LIMIT, COACHING_HISTORY_LIMIT, DETAILED_HISTORY_LIMIT] {
            let mut history = ReportHistory::new(limit);
            for i in 0..(limit + 7) {
                history.push(i);
                assert!(history.len() <= limit);
            }
            assert_eq!(history.len(), limit);
            assert_eq!(history.latest(), Some(&(limit + 6)));
            // the first seven were evicted
            assert_eq!(history.iter().last(), Some(&7));
        }
    }

    #[test]
    fn test_zero_limit() {
        let mut history = ReportHistory::new(0);
        history.push("a");
        history.push("b");
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some(&"b"));
    }
}
