use std::fs;
use std::io;
use std::path::PathBuf;

use jiff::Span;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dates::NUM_DAYS;
use crate::status::Code;

/// Which slot layout a configuration uses. The two layouts carry different
/// integer meanings and never coexist in one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotVariant {
    Single,
    Pair,
}

/// One weekday's status: a single code, or a (mother, father) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Single(Code),
    Pair([Code; 2]),
}

impl Entry {
    pub fn default_for(variant: SlotVariant, code: Code) -> Self {
        match variant {
            SlotVariant::Single => Entry::Single(code),
            SlotVariant::Pair => Entry::Pair([code, code]),
        }
    }

    fn matches(self, variant: SlotVariant) -> bool {
        matches!(
            (self, variant),
            (Entry::Single(_), SlotVariant::Single) | (Entry::Pair(_), SlotVariant::Pair)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    PickUp1,
    PickUp2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRecord {
    pub week_start: Date,
    pub pick_up_1: Vec<Entry>,
    pub pick_up_2: Vec<Entry>,
}

impl WeekRecord {
    pub fn blank(week_start: Date, variant: SlotVariant, default_code: Code) -> Self {
        Self {
            week_start,
            pick_up_1: vec![Entry::default_for(variant, default_code); NUM_DAYS],
            pick_up_2: vec![Entry::default_for(variant, default_code); NUM_DAYS],
        }
    }

    pub fn slot(&self, slot: Slot) -> &[Entry] {
        match slot {
            Slot::PickUp1 => &self.pick_up_1,
            Slot::PickUp2 => &self.pick_up_2,
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Vec<Entry> {
        match slot {
            Slot::PickUp1 => &mut self.pick_up_1,
            Slot::PickUp2 => &mut self.pick_up_2,
        }
    }

    fn check(&self, variant: SlotVariant) -> bool {
        [&self.pick_up_1, &self.pick_up_2]
            .into_iter()
            .all(|slot| slot.len() == NUM_DAYS && slot.iter().all(|entry| entry.matches(variant)))
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("week {index} does not match the configured slot layout")]
    BadWeek { index: usize },
    #[error("failed to encode schedule: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// The whole schedule, in chronological insertion order, tied to the JSON
/// file it round-trips through. Mutations do not persist themselves; callers
/// follow each batch of edits with one `save`.
#[derive(Debug)]
pub struct ScheduleStore {
    path: PathBuf,
    weeks: Vec<WeekRecord>,
}

impl ScheduleStore {
    /// An absent file is an empty schedule; anything else that goes wrong
    /// while reading or decoding is surfaced.
    pub fn load(path: impl Into<PathBuf>, variant: SlotVariant) -> Result<Self, StoreError> {
        let path = path.into();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self {
                    path,
                    weeks: Vec::new(),
                });
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        let weeks: Vec<WeekRecord> =
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;

        for (index, week) in weeks.iter().enumerate() {
            if !week.check(variant) {
                return Err(StoreError::BadWeek { index });
            }
        }

        Ok(Self { path, weeks })
    }

    pub fn from_weeks(path: impl Into<PathBuf>, weeks: Vec<WeekRecord>) -> Self {
        Self {
            path: path.into(),
            weeks,
        }
    }

    pub fn weeks(&self) -> &[WeekRecord] {
        &self.weeks
    }

    pub fn week_mut(&mut self, index: usize) -> Option<&mut WeekRecord> {
        self.weeks.get_mut(index)
    }

    /// Whole-file overwrite. A crash mid-write can truncate the file; there
    /// is no backup or rollback.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.weeks).map_err(StoreError::Encode)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Appends a blank week starting seven days after the last one, or at
    /// `anchor` when the schedule is empty. Returns the new week's start.
    pub fn add_week(&mut self, variant: SlotVariant, default_code: Code, anchor: Date) -> Date {
        let start = match self.weeks.last() {
            Some(last) => last.week_start.saturating_add(Span::new().days(7)),
            None => anchor,
        };
        self.weeks
            .push(WeekRecord::blank(start, variant, default_code));
        start
    }

    /// Removes the week at `index`; out-of-range is a no-op.
    pub fn remove_week(&mut self, index: usize) -> bool {
        if index < self.weeks.len() {
            self.weeks.remove(index);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pickup-schedule-{}-{name}.json", std::process::id()))
    }

    fn sample_week(start: Date) -> WeekRecord {
        WeekRecord {
            week_start: start,
            pick_up_1: vec![
                Entry::Single(1),
                Entry::Single(1),
                Entry::Single(1),
                Entry::Single(1),
                Entry::Single(0),
            ],
            pick_up_2: vec![
                Entry::Single(0),
                Entry::Single(1),
                Entry::Single(1),
                Entry::Single(1),
                Entry::Single(1),
            ],
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = ScheduleStore::load(temp_path("does-not-exist"), SlotVariant::Pair).unwrap();
        assert!(store.weeks().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_path("round-trip");
        let weeks = vec![
            sample_week(date(2025, 5, 12)),
            sample_week(date(2025, 5, 19)),
        ];
        let store = ScheduleStore::from_weeks(&path, weeks.clone());
        store.save().unwrap();

        let loaded = ScheduleStore::load(&path, SlotVariant::Single).unwrap();
        assert_eq!(loaded.weeks(), weeks.as_slice());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_pair_entries_round_trip_as_arrays() {
        let path = temp_path("pair-entries");
        let week = WeekRecord::blank(date(2025, 5, 12), SlotVariant::Pair, 5);
        let store = ScheduleStore::from_weeks(&path, vec![week.clone()]);
        store.save().unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"2025-05-12\""));

        let loaded = ScheduleStore::load(&path, SlotVariant::Pair).unwrap();
        assert_eq!(loaded.weeks(), &[week]);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_rejects_wrong_variant() {
        let path = temp_path("wrong-variant");
        let store = ScheduleStore::from_weeks(&path, vec![sample_week(date(2025, 5, 12))]);
        store.save().unwrap();

        let err = ScheduleStore::load(&path, SlotVariant::Pair).unwrap_err();
        assert!(matches!(err, StoreError::BadWeek { index: 0 }));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_rejects_short_week() {
        let path = temp_path("short-week");
        let mut week = sample_week(date(2025, 5, 12));
        week.pick_up_2.pop();
        let store = ScheduleStore::from_weeks(&path, vec![sample_week(date(2025, 5, 5)), week]);
        store.save().unwrap();

        let err = ScheduleStore::load(&path, SlotVariant::Single).unwrap_err();
        assert!(matches!(err, StoreError::BadWeek { index: 1 }));

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_add_week_extends_from_last_start() {
        let mut store = ScheduleStore::from_weeks("unused", vec![sample_week(date(2025, 5, 12))]);
        let start = store.add_week(SlotVariant::Single, 0, date(2000, 1, 3));
        assert_eq!(start, date(2025, 5, 19));
        assert_eq!(store.weeks().len(), 2);
        assert_eq!(store.weeks()[1].pick_up_1, vec![Entry::Single(0); NUM_DAYS]);
    }

    #[test]
    fn test_add_week_uses_anchor_when_empty() {
        let mut store = ScheduleStore::from_weeks("unused", Vec::new());
        let start = store.add_week(SlotVariant::Pair, 5, date(2025, 5, 12));
        assert_eq!(start, date(2025, 5, 12));
        assert_eq!(store.weeks()[0].pick_up_2, vec![Entry::Pair([5, 5]); NUM_DAYS]);
    }

    #[test]
    fn test_append_then_remove_restores_store() {
        let weeks = vec![sample_week(date(2025, 5, 12))];
        let mut store = ScheduleStore::from_weeks("unused", weeks.clone());
        store.add_week(SlotVariant::Single, 0, date(2025, 5, 12));
        assert!(store.remove_week(1));
        assert_eq!(store.weeks(), weeks.as_slice());
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let weeks = vec![sample_week(date(2025, 5, 12))];
        let mut store = ScheduleStore::from_weeks("unused", weeks.clone());
        assert!(!store.remove_week(1));
        assert!(!store.remove_week(99));
        assert_eq!(store.weeks(), weeks.as_slice());
    }
}
