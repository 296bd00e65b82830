//! Sample sets returned by samplers

use qdemo_core::{QdemoError, QdemoResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// One returned assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Variable values in sample-set variable order
    pub values: Vec<u8>,

    /// Energy of the assignment
    pub energy: f64,

    /// How many reads produced it
    pub num_occurrences: u64,
}

/// Samples over a shared variable order, sorted by ascending energy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    variables: Vec<String>,
    records: Vec<SampleRecord>,
}

impl SampleSet {
    /// Build a sample set; records are sorted by energy (stable)
    pub fn from_records(variables: Vec<String>, mut records: Vec<SampleRecord>) -> Self {
        records.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        Self { variables, records }
    }

    /// Variable labels
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// All records, lowest energy first
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total reads represented
    pub fn total_occurrences(&self) -> u64 {
        self.records.iter().map(|r| r.num_occurrences).sum()
    }

    /// Lowest-energy sample
    pub fn first(&self) -> Option<Sample<'_>> {
        self.records.first().map(|record| Sample {
            variables: &self.variables,
            record,
        })
    }

    /// Iterate samples, lowest energy first
    pub fn iter(&self) -> impl Iterator<Item = Sample<'_>> {
        self.records.iter().map(move |record| Sample {
            variables: &self.variables,
            record,
        })
    }

    /// Merge identical assignments, summing their occurrences
    pub fn aggregate(&self) -> SampleSet {
        let mut merged: Vec<SampleRecord> = Vec::new();
        let mut seen: HashMap<&[u8], usize> = HashMap::new();

        for record in &self.records {
            match seen.get(record.values.as_slice()) {
                Some(&idx) => merged[idx].num_occurrences += record.num_occurrences,
                None => {
                    seen.insert(record.values.as_slice(), merged.len());
                    merged.push(record.clone());
                }
            }
        }

        SampleSet::from_records(self.variables.clone(), merged)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QdemoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for SampleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SampleSet({} variables, {} records",
            self.variables.len(),
            self.records.len()
        )?;
        if let Some(first) = self.records.first() {
            write!(f, ", lowest energy={}", first.energy)?;
        }
        write!(f, ")")
    }
}

/// Borrowed view of one record with label lookup
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    variables: &'a [String],
    record: &'a SampleRecord,
}

impl<'a> Sample<'a> {
    /// Value of a variable
    pub fn get(&self, label: &str) -> QdemoResult<u8> {
        self.variables
            .iter()
            .position(|v| v == label)
            .map(|idx| self.record.values[idx])
            .ok_or_else(|| QdemoError::UnknownVariable(label.to_string()))
    }

    /// Energy of this sample
    pub fn energy(&self) -> f64 {
        self.record.energy
    }

    /// Occurrences of this sample
    pub fn num_occurrences(&self) -> u64 {
        self.record.num_occurrences
    }

    /// Values in variable order
    pub fn values(&self) -> &'a [u8] {
        let record = self.record;
        &record.values
    }

    /// Iterate `(label, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, u8)> + 'a {
        let (variables, record) = (self.variables, self.record);
        variables
            .iter()
            .zip(record.values.iter())
            .map(|(v, &x)| (v.as_str(), x))
    }

    /// Copy into an ordered label map
    pub fn to_map(&self) -> BTreeMap<String, u8> {
        self.iter().map(|(v, x)| (v.to_string(), x)).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
