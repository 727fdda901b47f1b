use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::dose::DoseRecord;

type Slot = (NaiveDate, String);

/// The full set of dose records handed to the core by the persistence layer
///
/// At most one record exists per `(date, medication)` slot: adding a record to an
/// occupied slot replaces the earlier one. Serializes as a plain list of records.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "Vec<DoseRecord>", into = "Vec<DoseRecord>")]
pub struct DoseHistory {
    records: Vec<DoseRecord>,
    /// Position of each occupied slot in `records`
    index: HashMap<Slot, usize>,
}

impl DoseHistory {
    /// Build a history from loaded records, collapsing duplicate slots (last one wins)
    pub fn new(records: Vec<DoseRecord>) -> Self {
        let mut history = DoseHistory {
            records: Vec::with_capacity(records.len()),
            index: HashMap::with_capacity(records.len()),
        };
        for record in records {
            history.add(record);
        }
        history
    }

    fn position(&self, date: NaiveDate, medication: &str) -> Option<usize> {
        self.index.get(&(date, medication.to_string())).copied()
    }

    fn reindex(&mut self) {
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| ((r.date(), r.medication().to_string()), i))
            .collect();
    }

    /// Insert a record, replacing any record already in its `(date, medication)` slot
    pub fn add(&mut self, record: DoseRecord) {
        let slot = (record.date(), record.medication().to_string());
        match self.index.get(&slot) {
            Some(&i) => self.records[i] = record,
            None => {
                self.index.insert(slot, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = DoseRecord>) {
        for record in records {
            self.add(record);
        }
    }

    /// Remove the record in a slot, returning it if present
    pub fn remove(&mut self, date: NaiveDate, medication: &str) -> Option<DoseRecord> {
        let i = self.position(date, medication)?;
        let removed = self.records.remove(i);
        self.reindex();
        Some(removed)
    }

    pub fn contains(&self, date: NaiveDate, medication: &str) -> bool {
        self.position(date, medication).is_some()
    }

    /// The record in a slot
    pub fn get(&self, date: NaiveDate, medication: &str) -> Option<&DoseRecord> {
        self.position(date, medication).map(|i| &self.records[i])
    }

    /// Records in insertion order
    pub fn records(&self) -> &[DoseRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DoseRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records sorted ascending by date; ties keep insertion order
    pub fn sorted(&self) -> Vec<&DoseRecord> {
        let mut sorted: Vec<&DoseRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| r.date());
        sorted
    }

    /// Records of one medication, sorted ascending by date
    pub fn for_medication(&self, medication: &str) -> Vec<&DoseRecord> {
        let mut doses: Vec<&DoseRecord> = self
            .records
            .iter()
            .filter(|r| r.medication() == medication)
            .collect();
        doses.sort_by_key(|r| r.date());
        doses
    }

    /// Distinct medication names in first-seen order
    pub fn medications(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.medication())
            .filter(|m| seen.insert(*m))
            .collect()
    }

    pub fn manual(&self) -> impl Iterator<Item = &DoseRecord> {
        self.records.iter().filter(|r| !r.is_generated())
    }

    pub fn generated(&self) -> impl Iterator<Item = &DoseRecord> {
        self.records.iter().filter(|r| r.is_generated())
    }

    /// Drop every protocol-generated record for the given medications
    ///
    /// Manual entries are kept. Returns how many records were removed.
    pub fn clear_generated<S: AsRef<str>>(&mut self, medications: &[S]) -> usize {
        let before = self.records.len();
        self.records.retain(|r| {
            !(r.is_generated() && medications.iter().any(|m| m.as_ref() == r.medication()))
        });
        let removed = before - self.records.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }
}

impl From<Vec<DoseRecord>> for DoseHistory {
    fn from(records: Vec<DoseRecord>) -> Self {
        DoseHistory::new(records)
    }
}

impl From<DoseHistory> for Vec<DoseRecord> {
    fn from(history: DoseHistory) -> Self {
        history.records
    }
}

impl fmt::Display for DoseHistory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Dose history ({} records)", self.records.len())?;
        for record in self.sorted() {
            writeln!(f, "  {}", record)?;
        }
        Ok(())
    }
}
