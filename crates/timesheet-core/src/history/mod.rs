//! Completed activity records.

mod labels;

pub use labels::{DayLabels, Locale};

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of a stopped timer.
///
/// `id` is the originating timer's id. Two separate timers never share an id,
/// but nothing here prevents duplicates in a hand-edited store, so lookups
/// act on the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub description: String,
    pub total_duration: u64,
    pub completed_at: u64,
}

/// Items sharing a display day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGroup {
    pub label: String,
    pub items: Vec<HistoryItem>,
}

/// Completed activities, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryStore {
    items: Vec<HistoryItem>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<HistoryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_duration(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |total, i| total.saturating_add(i.total_duration))
    }

    pub fn append(&mut self, item: HistoryItem) {
        self.items.insert(0, item);
    }

    /// Remove the first item with this id. Returns `false` if none matched.
    pub fn delete(&mut self, id: &str) -> bool {
        match self.items.iter().position(|i| i.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empty the store, returning how many items were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    /// A copy of the items ordered by `completed_at`, newest first.
    pub fn sorted_by_completion(&self) -> HistoryStore {
        let mut items = self.items.clone();
        items.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        HistoryStore { items }
    }

    /// Group items by calendar day in `now`'s timezone.
    ///
    /// Order is preserved and adjacent items with the same label are merged.
    /// Nothing is sorted here: call [`sorted_by_completion`](Self::sorted_by_completion)
    /// first if the store may be out of order.
    pub fn group_by_day<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        labels: &DayLabels,
    ) -> Vec<DayGroup> {
        let tz = now.timezone();
        let today = now.date_naive();
        let yesterday = today.checked_sub_days(Days::new(1));

        let mut groups: Vec<DayGroup> = Vec::new();
        for item in &self.items {
            let label = match local_date(item.completed_at, &tz) {
                Some(day) if day == today => labels.today.clone(),
                Some(day) if Some(day) == yesterday => labels.yesterday.clone(),
                Some(day) => labels.long_date(day),
                None => labels.unknown_date.clone(),
            };

            match groups.last_mut() {
                Some(last) if last.label == label => last.items.push(item.clone()),
                _ => groups.push(DayGroup {
                    label,
                    items: vec![item.clone()],
                }),
            }
        }
        groups
    }
}

fn local_date<Tz: TimeZone>(epoch_ms: u64, tz: &Tz) -> Option<NaiveDate> {
    let utc = DateTime::<Utc>::from_timestamp_millis(i64::try_from(epoch_ms).ok()?)?;
    Some(utc.with_timezone(tz).date_naive())
}
