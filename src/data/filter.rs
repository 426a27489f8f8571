use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::{as_whole, Dataset, Record};

// ---------------------------------------------------------------------------
// Raw input state: exactly what the four widgets hold
// ---------------------------------------------------------------------------

/// The text the user typed into the four filter fields.
///
/// Kept separate from [`Criteria`] so that half-typed or garbage input never
/// has to be representable as a constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterInputs {
    pub age: String,
    pub gender: String,
    pub height: String,
    pub weight: String,
}

impl FilterInputs {
    pub fn clear(&mut self) {
        *self = FilterInputs::default();
    }
}

// ---------------------------------------------------------------------------
// Criteria: equality constraints, each either unset or a concrete value
// ---------------------------------------------------------------------------

/// Zero to four equality constraints over the record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl Criteria {
    /// Parse the raw widget text. Blank or unparsable fields become unset.
    pub fn from_inputs(inputs: &FilterInputs) -> Self {
        let gender = inputs.gender.trim();
        Criteria {
            age: parse_field::<f64>("age", &inputs.age).and_then(whole_age),
            gender: (!gender.is_empty()).then(|| gender.to_string()),
            height: parse_field::<f64>("height", &inputs.height).filter(|v| v.is_finite()),
            weight: parse_field::<f64>("weight", &inputs.weight).filter(|v| v.is_finite()),
        }
    }

    /// Number of active constraints.
    pub fn active(&self) -> usize {
        usize::from(self.age.is_some())
            + usize::from(self.gender.is_some())
            + usize::from(self.height.is_some())
            + usize::from(self.weight.is_some())
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active() == 0
    }

    /// Whether `record` satisfies every active constraint.
    pub fn matches(&self, record: &Record) -> bool {
        self.age.is_none_or(|age| record.age == age)
            && self.gender.as_deref().is_none_or(|g| record.gender == g)
            && self.height.is_none_or(|h| record.height == h)
            && self.weight.is_none_or(|w| record.weight == w)
    }
}

fn parse_field<T: FromStr>(name: &str, raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::debug!("ignoring unparsable {name} filter {raw:?}");
            None
        }
    }
}

/// Ages are whole years; `30.0` is age 30 but `30.5` is no constraint.
fn whole_age(value: f64) -> Option<i64> {
    let age = as_whole(value);
    if age.is_none() {
        log::debug!("ignoring non-integral age filter {value}");
    }
    age
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the records that pass all active constraints, in dataset order.
pub fn filter<'a>(records: &'a [Record], criteria: &Criteria) -> Vec<&'a Record> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

/// Return indices of records that pass all active constraints.
pub fn filtered_indices(dataset: &Dataset, criteria: &Criteria) -> Vec<usize> {
    if criteria.is_unconstrained() {
        return (0..dataset.len()).collect();
    }
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures;

    fn inputs(age: &str, gender: &str, height: &str, weight: &str) -> FilterInputs {
        FilterInputs {
            age: age.into(),
            gender: gender.into(),
            height: height.into(),
            weight: weight.into(),
        }
    }

    #[test]
    fn unset_criteria_is_identity() {
        let records = fixtures::sample();
        let subset = filter(&records, &Criteria::default());
        assert_eq!(subset.len(), records.len());
        assert!(subset.iter().zip(&records).all(|(a, b)| *a == b));

        let ds = Dataset::from_records(records);
        assert_eq!(filtered_indices(&ds, &Criteria::default()), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn single_constraint_is_exact_equality() {
        let records = fixtures::sample();
        let cases = [
            Criteria { age: Some(30), ..Default::default() },
            Criteria { gender: Some("F".into()), ..Default::default() },
            Criteria { height: Some(180.0), ..Default::default() },
            Criteria { weight: Some(68.5), ..Default::default() },
        ];
        for c in &cases {
            let subset = filter(&records, c);
            for r in &records {
                let expected = c.age.is_none_or(|v| r.age == v)
                    && c.gender.as_ref().is_none_or(|v| &r.gender == v)
                    && c.height.is_none_or(|v| r.height == v)
                    && c.weight.is_none_or(|v| r.weight == v);
                assert_eq!(subset.contains(&r), expected, "{c:?} vs {r:?}");
            }
        }
    }

    #[test]
    fn constraints_compose_conjunctively() {
        let records = fixtures::sample();
        let c = Criteria {
            age: Some(30),
            gender: Some("M".into()),
            weight: Some(80.0),
            ..Default::default()
        };
        let subset = filter(&records, &c);
        assert_eq!(subset.len(), 2);
        assert!(subset.iter().all(|r| r.age == 30 && r.gender == "M" && r.weight == 80.0));
    }

    #[test]
    fn application_order_does_not_matter() {
        let records = fixtures::sample();
        let full = Criteria {
            age: Some(30),
            gender: Some("M".into()),
            height: Some(180.0),
            weight: Some(80.0),
        };
        let all_at_once = filter(&records, &full);

        let age_first = {
            let step = filter(&records, &Criteria { age: full.age, ..Default::default() });
            let owned: Vec<Record> = step.into_iter().cloned().collect();
            let step = filter(&owned, &Criteria { weight: full.weight, height: full.height, ..Default::default() });
            let owned: Vec<Record> = step.into_iter().cloned().collect();
            filter(&owned, &Criteria { gender: full.gender.clone(), ..Default::default() })
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        };
        let gender_first = {
            let step = filter(&records, &Criteria { gender: full.gender.clone(), ..Default::default() });
            let owned: Vec<Record> = step.into_iter().cloned().collect();
            filter(&owned, &Criteria { age: full.age, height: full.height, weight: full.weight, gender: None })
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        };

        let expected: Vec<Record> = all_at_once.into_iter().cloned().collect();
        assert_eq!(age_first, expected);
        assert_eq!(gender_first, expected);
    }

    #[test]
    fn no_match_yields_empty_subset() {
        let records = fixtures::sample();
        let c = Criteria { age: Some(999), ..Default::default() };
        assert!(filter(&records, &c).is_empty());
    }

    #[test]
    fn inputs_parse_permissively() {
        let c = Criteria::from_inputs(&inputs(" 30 ", "F", "165", "60.0"));
        assert_eq!(c.age, Some(30));
        assert_eq!(c.gender.as_deref(), Some("F"));
        assert_eq!(c.height, Some(165.0));
        assert_eq!(c.weight, Some(60.0));
        assert_eq!(c.active(), 4);

        let c = Criteria::from_inputs(&inputs("thirty", "  ", "NaN", "inf"));
        assert!(c.is_unconstrained());

        // Whole-valued decimals are the same age; fractional ages are unset.
        assert_eq!(Criteria::from_inputs(&inputs("30.0", "", "", "")).age, Some(30));
        assert_eq!(Criteria::from_inputs(&inputs("30.5", "", "", "")).age, None);
    }

    #[test]
    fn decimal_age_input_filters_like_an_integer() {
        let ds = Dataset::from_records(fixtures::sample());
        let c = Criteria::from_inputs(&inputs("30.0", "", "", ""));
        assert_eq!(filtered_indices(&ds, &c), vec![0, 1, 5]);
    }

    #[test]
    fn padded_gender_in_the_data_still_matches() {
        let mut records = fixtures::sample();
        records[0].gender = " M ".into();
        let ds = Dataset::from_records(records);
        let c = Criteria::from_inputs(&inputs("", " M", "", ""));
        assert_eq!(filtered_indices(&ds, &c), vec![0, 2, 5]);
    }

    #[test]
    fn zero_is_a_concrete_value() {
        let c = Criteria::from_inputs(&inputs("0", "", "", ""));
        assert_eq!(c.age, Some(0));
        assert!(filter(&fixtures::sample(), &c).is_empty());
    }

    #[test]
    fn clearing_inputs_resets_everything() {
        let mut i = inputs("30", "M", "180", "80");
        i.clear();
        assert_eq!(i, FilterInputs::default());
    }
}
