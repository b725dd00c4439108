use crate::utils::{
    storage::{FileStorage, Storage},
    units::{Measurement, Unit, UnitKind, UnitSystem},
};
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, rc::Rc};
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LogEntry {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub measure: Option<Measurement>,
    pub note: String,
}

impl LogEntry {
    #[must_use]
    pub fn new(date: NaiveDate, time: NaiveTime, measure: Option<Measurement>, note: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            time,
            measure,
            note,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &Uuid {
        &self.id
    }
}

/// Shared handle to the full set of stored entries. Mutations write through
/// to storage so the file on disk is never behind what's on screen.
#[derive(Debug, Clone)]
pub struct EntryStore {
    entries: Rc<RefCell<Vec<LogEntry>>>,
    storage: Rc<dyn Storage>,
}

impl Default for EntryStore {
    fn default() -> Self {
        Self {
            entries: Rc::default(),
            storage: Rc::new(FileStorage::default()),
        }
    }
}

impl EntryStore {
    pub fn new(entries: Vec<LogEntry>, storage: Rc<dyn Storage>) -> Self {
        Self {
            entries: Rc::new(RefCell::new(entries)),
            storage,
        }
    }

    /// The entries logged on the given day, ordered by time.
    #[must_use]
    pub fn for_day(&self, date: NaiveDate) -> Vec<LogEntry> {
        let mut entries: Vec<LogEntry> = self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.time);
        entries
    }

    #[must_use]
    pub fn count_for_day(&self, date: NaiveDate) -> usize {
        self.entries.borrow().iter().filter(|e| e.date == date).count()
    }

    /// Sums the day's volume measurements, expressed in the given system.
    /// Weight and temperature readings don't sum meaningfully, so they are
    /// left out. `None` when the day has no volume entries at all.
    #[must_use]
    pub fn volume_for_day(&self, date: NaiveDate, system: UnitSystem) -> Option<Measurement> {
        let total: f64 = self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.date == date)
            .filter_map(|e| e.measure)
            .filter(|m| m.unit.kind() == UnitKind::Volume)
            .map(|m| m.converted_to(system).value)
            .sum();

        let any = self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.date == date)
            .filter_map(|e| e.measure)
            .any(|m| m.unit.kind() == UnitKind::Volume);

        any.then(|| Measurement::new(total, Unit::for_kind(UnitKind::Volume, system)))
    }

    /// # Errors
    /// If something goes wrong while writing to the filesystem.
    pub fn add(&self, entry: LogEntry) -> Result<()> {
        let mut entries = self.entries.borrow_mut();
        entries.push(entry);
        entries.sort_by_key(|e| (e.date, e.time));

        self.storage.write_entries(&entries)
    }

    /// # Errors
    /// If something goes wrong while writing to the filesystem.
    pub fn delete(&self, id: &Uuid) -> Result<()> {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|e| e.id() != id);

        self.storage.write_entries(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_storage::MockStorage;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test dates should be valid")
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").expect("test times should be valid")
    }

    fn store_with(entries: Vec<LogEntry>) -> EntryStore {
        EntryStore::new(entries, Rc::new(MockStorage::default()))
    }

    #[test]
    fn for_day_filters_and_sorts() {
        let store = store_with(vec![
            LogEntry::new(day("2024-06-01"), time("12:00"), None, "lunch".to_string()),
            LogEntry::new(day("2024-06-02"), time("08:00"), None, "other day".to_string()),
            LogEntry::new(day("2024-06-01"), time("07:30"), None, "breakfast".to_string()),
        ]);

        let entries = store.for_day(day("2024-06-01"));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].note, "breakfast");
        assert_eq!(entries[1].note, "lunch");
    }

    #[test]
    fn volume_total_converts_and_skips_other_kinds() {
        let store = store_with(vec![
            LogEntry::new(
                day("2024-06-01"),
                time("08:00"),
                Some(Measurement::new(100.0, Unit::Milliliters)),
                String::new(),
            ),
            LogEntry::new(
                day("2024-06-01"),
                time("12:00"),
                Some(Measurement::new(1.0, Unit::FluidOunces)),
                String::new(),
            ),
            LogEntry::new(
                day("2024-06-01"),
                time("18:00"),
                Some(Measurement::new(37.0, Unit::Celsius)),
                String::new(),
            ),
        ]);

        let total = store
            .volume_for_day(day("2024-06-01"), UnitSystem::Metric)
            .expect("day has volume entries");
        assert_eq!(total.unit, Unit::Milliliters);
        assert!((total.value - 129.5735).abs() < 0.001);

        assert_eq!(store.volume_for_day(day("2024-06-02"), UnitSystem::Metric), None);
    }

    #[test]
    fn delete_removes_by_id() {
        let keep = LogEntry::new(day("2024-06-01"), time("08:00"), None, "keep".to_string());
        let gone = LogEntry::new(day("2024-06-01"), time("09:00"), None, "gone".to_string());
        let store = store_with(vec![keep.clone(), gone.clone()]);

        store.delete(gone.id()).expect("mock storage writes should succeed");

        let entries = store.for_day(day("2024-06-01"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id(), keep.id());
    }
}
