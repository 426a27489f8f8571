use crate::charts::{self, Dashboard};
use crate::data::filter::{filtered_indices, Criteria};
use crate::data::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// View: one filter + render pass
// ---------------------------------------------------------------------------

/// The result of querying the dataset with one set of criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// The criteria this view was computed with.
    pub criteria: Criteria,
    /// Indices into the dataset of the matching records, in dataset order.
    pub indices: Vec<usize>,
    pub charts: Dashboard,
}

impl View {
    /// Filter `dataset` by `criteria` and render the five charts.
    ///
    /// Both the interactive surface and the exporter go through here, so a
    /// given criteria value always produces the same charts.
    pub fn compute(dataset: &Dataset, criteria: &Criteria) -> Self {
        let indices = filtered_indices(dataset, criteria);
        let subset = Self::select(dataset, &indices);
        let charts = charts::render(&subset);
        log::debug!(
            "{} of {} records match {:?}",
            indices.len(),
            dataset.len(),
            criteria
        );
        View {
            criteria: criteria.clone(),
            indices,
            charts,
        }
    }

    /// The matching records.
    pub fn records<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        Self::select(dataset, &self.indices)
    }

    fn select<'a>(dataset: &'a Dataset, indices: &[usize]) -> Vec<&'a Record> {
        indices.iter().map(|&i| &dataset.records()[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures;

    #[test]
    fn unconstrained_view_covers_the_dataset() {
        let ds = Dataset::from_records(fixtures::sample());
        let view = View::compute(&ds, &Criteria::default());
        assert_eq!(view.indices.len(), ds.len());
        assert_eq!(view.charts.steps_calories.point_count(), ds.len());
    }

    #[test]
    fn single_matching_record() {
        let ds = Dataset::from_records(vec![fixtures::record(30, "M", "walk")]);
        let criteria = Criteria { age: Some(30), ..Default::default() };
        let view = View::compute(&ds, &criteria);
        assert_eq!(view.indices, vec![0]);
        assert_eq!(view.records(&ds)[0].activity, "walk");
        assert_eq!(view.charts.heart_rate.point_count(), 1);
    }

    #[test]
    fn no_match_is_an_empty_view() {
        let ds = Dataset::from_records(fixtures::sample());
        let view = View::compute(&ds, &Criteria { age: Some(999), ..Default::default() });
        assert!(view.indices.is_empty());
        assert!(view.charts.figures().all(|(_, f)| f.point_count() == 0));
    }
}
