use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::activity::{CommitRecord, IssueRecord, PullRequestRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DailyBucket {
    pub commits: u32,
    pub prs_opened: u32,
    pub prs_merged: u32,
    pub issues_opened: u32,
    pub issues_closed: u32,
}

/// Per-day counters keyed by UTC calendar date. Serializes newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySummary {
    buckets: BTreeMap<NaiveDate, DailyBucket>,
}

impl DailySummary {
    pub fn aggregate(
        commits: &[CommitRecord],
        pulls: &[PullRequestRecord],
        issues: &[IssueRecord],
    ) -> Self {
        let mut summary = Self::default();

        for commit in commits {
            summary.touch(commit.date).commits += 1;
        }

        for pull in pulls {
            summary.touch(pull.created_at).prs_opened += 1;
            if let Some(merged_at) = pull.merged_at {
                summary.touch(merged_at).prs_merged += 1;
            }
        }

        for issue in issues {
            summary.touch(issue.created_at).issues_opened += 1;
            if let Some(closed_at) = issue.closed_at {
                summary.touch(closed_at).issues_closed += 1;
            }
        }

        summary
    }

    fn touch(&mut self, at: DateTime<Utc>) -> &mut DailyBucket {
        self.buckets.entry(at.date_naive()).or_default()
    }

    #[cfg(test)]
    pub fn get(&self, date: NaiveDate) -> Option<&DailyBucket> {
        self.buckets.get(&date)
    }

    pub fn active_days(&self) -> usize {
        self.buckets.len()
    }

    /// Buckets in descending date order.
    pub fn iter_recent_first(&self) -> impl Iterator<Item = (&NaiveDate, &DailyBucket)> {
        self.buckets.iter().rev()
    }
}

impl Serialize for DailySummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (date, bucket) in self.iter_recent_first() {
            map.serialize_entry(&date.format("%Y-%m-%d").to_string(), bucket)?;
        }
        map.end()
    }
}
