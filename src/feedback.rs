use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Maximum stored comment length, in characters
const MAX_COMMENT_CHARS: usize = 2000;

/// Entries kept in memory before the oldest are dropped
pub const MAX_ENTRIES: usize = 10_000;

#[derive(Debug, Clone, Deserialize)]
pub struct NewFeedback {
    pub path: String,
    pub helpful: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub id: u64,
    pub path: String,
    pub helpful: bool,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Helpful / not helpful counts for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageStats {
    pub helpful: usize,
    pub unhelpful: usize,
}

/// In-memory page feedback. Entries are lost on restart.
///
/// Only the most recent entries are kept; once the log is full every new
/// entry evicts the oldest one. Ids keep counting up across evictions.
#[derive(Debug)]
pub struct FeedbackLog {
    inner: Mutex<Inner>,
    limit: usize,
}

#[derive(Debug, Default)]
struct Inner {
    entries: VecDeque<Feedback>,
    next_id: u64,
}

impl Default for FeedbackLog {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::with_limit(MAX_ENTRIES)
    }

    /// A log holding at most `limit` entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            limit: limit.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Record feedback. Returns `None` when the path is not an absolute path.
    pub fn submit(&self, feedback: NewFeedback) -> Option<Feedback> {
        if !feedback.path.starts_with('/') {
            return None;
        }

        let comment = feedback
            .comment
            .map(|c| c.trim().chars().take(MAX_COMMENT_CHARS).collect::<String>())
            .filter(|c| !c.is_empty());

        let mut inner = self.lock();
        inner.next_id += 1;
        let entry = Feedback {
            id: inner.next_id,
            path: feedback.path,
            helpful: feedback.helpful,
            comment,
            created_at: Utc::now(),
        };

        if inner.entries.len() >= self.limit {
            if let Some(evicted) = inner.entries.pop_front() {
                debug!("Feedback log full, dropping #{}", evicted.id);
            }
        }
        inner.entries.push_back(entry.clone());
        Some(entry)
    }

    /// All retained entries, newest first.
    pub fn list(&self) -> Vec<Feedback> {
        self.lock().entries.iter().rev().cloned().collect()
    }

    /// Counts per page path over the retained entries, sorted by path.
    pub fn stats(&self) -> BTreeMap<String, PageStats> {
        let mut stats: BTreeMap<String, PageStats> = BTreeMap::new();
        for entry in self.list() {
            let page = stats.entry(entry.path).or_default();
            if entry.helpful {
                page.helpful += 1;
            } else {
                page.unhelpful += 1;
            }
        }
        stats
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_feedback(path: &str, helpful: bool, comment: Option<&str>) -> NewFeedback {
        NewFeedback {
            path: path.to_string(),
            helpful,
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn test_submit_and_list_newest_first() {
        let log = FeedbackLog::new();
        log.submit(new_feedback("/a", true, None)).unwrap();
        log.submit(new_feedback("/b", false, Some("Missing PHP example")))
            .unwrap();

        let entries = log.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "/b");
        assert_eq!(entries[0].id, 2);
        assert_eq!(entries[0].comment.as_deref(), Some("Missing PHP example"));
        assert_eq!(entries[1].path, "/a");
    }

    #[test]
    fn test_relative_path_rejected() {
        let log = FeedbackLog::new();
        assert!(log.submit(new_feedback("voice", true, None)).is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn test_blank_comment_dropped_and_long_comment_truncated() {
        let log = FeedbackLog::new();
        let blank = log.submit(new_feedback("/a", true, Some("   "))).unwrap();
        assert!(blank.comment.is_none());

        let long = "x".repeat(MAX_COMMENT_CHARS + 50);
        let truncated = log.submit(new_feedback("/a", true, Some(&long))).unwrap();
        assert_eq!(truncated.comment.unwrap().chars().count(), MAX_COMMENT_CHARS);
    }

    #[test]
    fn test_stats_per_path() {
        let log = FeedbackLog::new();
        log.submit(new_feedback("/a", true, None));
        log.submit(new_feedback("/a", false, None));
        log.submit(new_feedback("/a", true, None));
        log.submit(new_feedback("/b", false, None));

        let stats = log.stats();
        assert_eq!(stats["/a"], PageStats { helpful: 2, unhelpful: 1 });
        assert_eq!(stats["/b"], PageStats { helpful: 0, unhelpful: 1 });
        assert_eq!(stats.keys().collect::<Vec<_>>(), vec!["/a", "/b"]);
    }

    #[test]
    fn test_log_is_capped_and_keeps_newest() {
        let log = FeedbackLog::with_limit(3);
        for i in 0..5 {
            log.submit(new_feedback(if i % 2 == 0 { "/a" } else { "/b" }, i < 3, None))
                .unwrap();
        }

        assert_eq!(log.len(), 3);
        let ids: Vec<_> = log.list().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);

        let stats = log.stats();
        let total: usize = stats.values().map(|s| s.helpful + s.unhelpful).sum();
        assert_eq!(total, log.len());
        assert_eq!(stats["/a"], PageStats { helpful: 1, unhelpful: 1 });
        assert_eq!(stats["/b"], PageStats { helpful: 0, unhelpful: 1 });
    }

    #[test]
    fn test_ids_keep_counting_after_eviction() {
        let log = FeedbackLog::with_limit(1);
        log.submit(new_feedback("/a", true, None)).unwrap();
        let second = log.submit(new_feedback("/a", true, None)).unwrap();

        assert_eq!(second.id, 2);
        assert_eq!(log.list(), vec![second]);
    }
}
