use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Record – one row of the health dataset
// ---------------------------------------------------------------------------

/// A single observation (one row of the source table).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "whole_number")]
    pub age: i64,
    pub gender: String,
    /// Centimetres.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    #[serde(deserialize_with = "whole_number")]
    pub steps: i64,
    pub calories: f64,
    pub activity: String,
    pub distance: f64,
    /// Older exports of the dataset spell this column `hear_rate`.
    #[serde(alias = "hear_rate")]
    pub heart_rate: f64,
    pub resting_heart: f64,
    pub norm_heart: f64,
}

impl Record {
    /// Whether every numeric field is finite. Rows failing this are dropped
    /// at load time since NaN never compares equal and cannot be charted.
    pub fn is_finite(&self) -> bool {
        [
            self.height,
            self.weight,
            self.calories,
            self.distance,
            self.heart_rate,
            self.resting_heart,
            self.norm_heart,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Accept integer columns that a writer serialized as floats (`30.0`), but
/// reject anything with a fractional part.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    as_whole(value).ok_or_else(|| {
        serde::de::Error::custom(format!("expected a whole number, got {value}"))
    })
}

/// `value` as an integer if it is finite with no fractional part.
pub fn as_whole(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full record set plus the distinct categorical values the UI offers.
///
/// Built once at startup and only ever borrowed afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    genders: BTreeSet<String>,
    activities: BTreeSet<String>,
}

impl Dataset {
    /// Build the categorical indices from the loaded records. Category
    /// labels are trimmed so that typed filters can match them.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        for r in &mut records {
            trim_in_place(&mut r.gender);
            trim_in_place(&mut r.activity);
        }
        let genders = records.iter().map(|r| r.gender.clone()).collect();
        let activities = records.iter().map(|r| r.activity.clone()).collect();
        Dataset {
            records,
            genders,
            activities,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct genders, sorted. Feeds the gender drop-down.
    pub fn genders(&self) -> &BTreeSet<String> {
        &self.genders
    }

    /// Distinct activity categories, sorted.
    pub fn activities(&self) -> &BTreeSet<String> {
        &self.activities
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}
