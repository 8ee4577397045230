//! Report engine.
//!
//! Classifies a chat snapshot into recency buckets and renders the plain
//! text summary. Styling is left to the output layer.

use serde::Serialize;

use crate::presence::{sort_canonical, PresenceRecord};

/// Entries listed per bucket unless the caller asks otherwise.
pub const DEFAULT_LIST_LIMIT: usize = 30;

/// Classification outcome for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Online,
    Offline,
    Bots,
    Deleted,
}

impl Bucket {
    /// Buckets in report order.
    pub const ALL: [Self; 4] = [Self::Online, Self::Offline, Self::Bots, Self::Deleted];

    /// Section title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Online => "Online-ish",
            Self::Offline => "Offline-ish",
            Self::Bots => "Bots",
            Self::Deleted => "Deleted",
        }
    }
}

/// Pick the bucket for one record.
///
/// Bots win over deleted, deleted wins over recency. Records never seen land
/// in no bucket. The threshold is inclusive.
#[must_use]
pub fn bucket_for(record: &PresenceRecord, threshold_minutes: i64, now: i64) -> Option<Bucket> {
    if record.is_bot {
        return Some(Bucket::Bots);
    }
    if record.is_deleted {
        return Some(Bucket::Deleted);
    }
    let last_seen = record.last_seen?;
    let elapsed = now.saturating_sub(last_seen);

    if elapsed <= threshold_minutes.saturating_mul(60) {
        Some(Bucket::Online)
    } else {
        Some(Bucket::Offline)
    }
}

/// A snapshot partitioned into buckets, each in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buckets {
    /// Every record classified, including never-seen ones.
    pub total: usize,
    pub online: Vec<PresenceRecord>,
    pub offline: Vec<PresenceRecord>,
    pub bots: Vec<PresenceRecord>,
    pub deleted: Vec<PresenceRecord>,
}

impl Buckets {
    #[must_use]
    pub fn get(&self, bucket: Bucket) -> &[PresenceRecord] {
        match bucket {
            Bucket::Online => &self.online,
            Bucket::Offline => &self.offline,
            Bucket::Bots => &self.bots,
            Bucket::Deleted => &self.deleted,
        }
    }

    fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<PresenceRecord> {
        match bucket {
            Bucket::Online => &mut self.online,
            Bucket::Offline => &mut self.offline,
            Bucket::Bots => &mut self.bots,
            Bucket::Deleted => &mut self.deleted,
        }
    }

    /// Records that fell into no bucket.
    #[must_use]
    pub fn unclassified(&self) -> usize {
        self.total - Bucket::ALL.iter().map(|b| self.get(*b).len()).sum::<usize>()
    }
}

/// Partition `records` into buckets as of `now` (epoch seconds).
#[must_use]
pub fn classify(records: &[PresenceRecord], threshold_minutes: i64, now: i64) -> Buckets {
    let mut buckets = Buckets {
        total: records.len(),
        ..Buckets::default()
    };

    for record in records {
        if let Some(bucket) = bucket_for(record, threshold_minutes, now) {
            buckets.get_mut(bucket).push(record.clone());
        }
    }

    for bucket in Bucket::ALL {
        sort_canonical(buckets.get_mut(bucket));
    }

    buckets
}

/// Threshold in the largest whole unit it reaches, remainder dropped.
///
/// `90` renders as `1 Hour(s)`.
#[must_use]
pub fn format_threshold(threshold_minutes: i64) -> String {
    if threshold_minutes >= 1440 {
        format!("{} Day(s)", threshold_minutes / 1440)
    } else if threshold_minutes >= 60 {
        format!("{} Hour(s)", threshold_minutes / 60)
    } else {
        format!("{threshold_minutes} Minutes")
    }
}

/// `display_name (user_id)`.
#[must_use]
pub fn format_entry(record: &PresenceRecord) -> String {
    format!("{} ({})", record.display_name(), record.user_id)
}

/// Bucket sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub bots: usize,
    pub deleted: usize,
}

/// One listed bucket in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub bucket: Bucket,
    pub title: String,
    /// Formatted entries, at most the list limit.
    pub entries: Vec<String>,
}

/// Rendered report: structured parts plus the assembled plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub threshold_minutes: i64,
    /// e.g. `1 Hour(s)`
    pub threshold_label: String,
    pub counts: Counts,
    /// Non-empty buckets only, in report order.
    pub sections: Vec<Section>,
    pub buckets: Buckets,
}

impl Report {
    /// Header line.
    #[must_use]
    pub fn header(&self) -> String {
        format!("Threshold: {}", self.threshold_label)
    }

    /// Plain text rendering, no markup.
    #[must_use]
    pub fn text(&self) -> String {
        let c = &self.counts;
        let mut text = String::from("Check Report\n");
        text.push_str(&self.header());
        text.push_str("\n\n");
        text.push_str(&format!("Total tracked: {}\n", c.total));
        text.push_str(&format!("Online-ish: {}\n", c.online));
        text.push_str(&format!("Offline-ish: {}\n", c.offline));
        text.push_str(&format!("Bots: {}\n", c.bots));
        text.push_str(&format!("Deleted: {}\n", c.deleted));

        for section in &self.sections {
            text.push('\n');
            text.push_str(&section.title);
            text.push_str(":\n");
            for entry in &section.entries {
                text.push_str(entry);
                text.push('\n');
            }
        }

        text
    }
}

/// Render a report listing up to [`DEFAULT_LIST_LIMIT`] entries per bucket.
#[must_use]
pub fn render(threshold_minutes: i64, buckets: Buckets) -> Report {
    render_with_limit(threshold_minutes, buckets, DEFAULT_LIST_LIMIT)
}

/// Render a report listing up to `list_limit` entries per bucket.
#[must_use]
pub fn render_with_limit(threshold_minutes: i64, buckets: Buckets, list_limit: usize) -> Report {
    let counts = Counts {
        total: buckets.total,
        online: buckets.online.len(),
        offline: buckets.offline.len(),
        bots: buckets.bots.len(),
        deleted: buckets.deleted.len(),
    };

    let sections = Bucket::ALL
        .into_iter()
        .filter(|b| !buckets.get(*b).is_empty())
        .map(|bucket| Section {
            bucket,
            title: bucket.title().to_string(),
            entries: buckets
                .get(bucket)
                .iter()
                .take(list_limit)
                .map(format_entry)
                .collect(),
        })
        .collect();

    Report {
        threshold_minutes,
        threshold_label: format_threshold(threshold_minutes),
        counts,
        sections,
        buckets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::sample_record;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_bot_wins_over_deleted_and_recency() {
        let mut r = sample_record(1, Some(NOW));
        r.is_bot = true;
        r.is_deleted = true;
        assert_eq!(bucket_for(&r, 30, NOW), Some(Bucket::Bots));
    }

    #[test]
    fn test_deleted_wins_over_recency() {
        let mut r = sample_record(1, Some(NOW));
        r.is_deleted = true;
        assert_eq!(bucket_for(&r, 30, NOW), Some(Bucket::Deleted));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(bucket_for(&sample_record(1, Some(NOW - 3600)), 60, NOW), Some(Bucket::Online));
        assert_eq!(bucket_for(&sample_record(1, Some(NOW - 3601)), 60, NOW), Some(Bucket::Offline));
    }

    #[test]
    fn test_never_seen_is_unbucketed() {
        assert_eq!(bucket_for(&sample_record(1, None), 60, NOW), None);

        let buckets = classify(&[sample_record(1, None), sample_record(2, Some(NOW))], 60, NOW);
        assert_eq!(buckets.total, 2);
        assert_eq!(buckets.online.len(), 1);
        assert_eq!(buckets.unclassified(), 1);
    }

    #[test]
    fn test_format_threshold() {
        assert_eq!(format_threshold(1439), "23 Hour(s)");
        assert_eq!(format_threshold(1440), "1 Day(s)");
        assert_eq!(format_threshold(59), "59 Minutes");
        assert_eq!(format_threshold(90), "1 Hour(s)");
        assert_eq!(format_threshold(2880), "2 Day(s)");
    }

    #[test]
    fn test_end_to_end_five_records() {
        let mut bot_a = sample_record(1, Some(NOW));
        bot_a.is_bot = true;
        let mut bot_b = sample_record(2, None);
        bot_b.is_bot = true;
        bot_b.is_deleted = true;
        let mut gone = sample_record(3, Some(NOW - 50));
        gone.is_deleted = true;
        let recent = sample_record(4, Some(NOW - 600));
        let stale = sample_record(5, Some(NOW - 10_000));

        let records = vec![stale, bot_b, recent, gone, bot_a];
        let buckets = classify(&records, 30, NOW);

        assert_eq!(buckets.total, 5);
        assert_eq!(buckets.bots.len(), 2);
        assert_eq!(buckets.deleted.len(), 1);
        assert_eq!(buckets.online.len(), 1);
        assert_eq!(buckets.offline.len(), 1);
        assert_eq!(buckets.unclassified(), 0);

        let mut seen: Vec<i64> = Bucket::ALL
            .iter()
            .flat_map(|b| buckets.get(*b).iter().map(|r| r.user_id))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);

        // Canonical order inside a bucket: seen first, never-seen last
        let bot_ids: Vec<i64> = buckets.bots.iter().map(|r| r.user_id).collect();
        assert_eq!(bot_ids, vec![1, 2]);
    }

    #[test]
    fn test_render_sections_and_text() {
        let mut named = sample_record(10, Some(NOW - 60));
        named.username = "ada".to_string();
        let mut first = sample_record(11, Some(NOW - 120));
        first.first_name = "Grace".to_string();
        let mut bot = sample_record(12, Some(NOW));
        bot.is_bot = true;

        let report = render(60, classify(&[named, first, bot], 60, NOW));

        assert_eq!(report.threshold_label, "1 Hour(s)");
        assert_eq!(report.counts.total, 3);
        assert_eq!(report.counts.online, 2);
        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.sections[0].bucket, Bucket::Online);
        assert_eq!(report.sections[0].entries, vec!["ada (10)", "Grace (11)"]);
        assert_eq!(report.sections[1].bucket, Bucket::Bots);
        assert_eq!(report.sections[1].entries, vec!["12 (12)"]);

        let text = report.text();
        assert!(text.starts_with("Check Report\nThreshold: 1 Hour(s)\n\n"));
        assert!(text.contains("Total tracked: 3\n"));
        assert!(text.contains("Offline-ish: 0\n"));
        assert!(text.contains("Online-ish:\nada (10)\nGrace (11)\n"));
        assert!(!text.contains("Deleted:\n"));
    }

    #[test]
    fn test_render_caps_entries_per_bucket() {
        let records: Vec<PresenceRecord> = (0..45).map(|i| sample_record(i, Some(NOW))).collect();
        let buckets = classify(&records, 30, NOW);

        let report = render(30, buckets.clone());
        assert_eq!(report.counts.online, 45);
        assert_eq!(report.sections[0].entries.len(), 30);
        assert_eq!(report.sections[0].entries[0], "0 (0)");

        let short = render_with_limit(30, buckets, 5);
        assert_eq!(short.sections[0].entries.len(), 5);
    }
}
