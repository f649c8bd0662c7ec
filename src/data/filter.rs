use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dimension, DimensionValue, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Filter predicate: which values are allowed per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state: dimension → set of allowed values.
///
/// A dimension absent from the map is unconstrained.  An empty set means
/// nothing is allowed for that dimension, so no row can pass.
pub type FilterState = BTreeMap<Dimension, BTreeSet<DimensionValue>>;

/// Initialise a [`FilterState`] with every observed value selected, i.e. the
/// default "no effective filtering" state.
pub fn init_filter_state(dataset: &SalaryDataset) -> FilterState {
    dataset
        .unique_values
        .iter()
        .map(|(&dim, vals)| (dim, vals.clone()))
        .collect()
}

/// The conjunctive row predicate: a record passes iff its value in every
/// constrained dimension is a member of that dimension's allowed set.
///
/// The conjunction is commutative, so the map's iteration order never affects
/// the outcome; values in an allowed set that no record carries are no-ops.
pub fn record_passes(record: &SalaryRecord, filters: &FilterState) -> bool {
    for (dim, allowed) in filters {
        if !allowed.contains(&dim.value_of(record)) {
            return false;
        }
    }
    true
}

/// Return indices of records that pass all active filters, in row order.
pub fn filtered_indices(dataset: &SalaryDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| record_passes(rec, filters))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawRecord;
    use crate::data::transform::enrich_all;

    fn raw(year: u16, exp: &str, title: &str, location: &str, ratio: i32) -> RawRecord {
        RawRecord {
            work_year: year,
            experience_level: exp.into(),
            employment_type: "FT".into(),
            job_title: title.into(),
            salary: 90_000,
            salary_currency: "USD".into(),
            salary_in_usd: 90_000,
            employee_residence: location.into(),
            remote_ratio: ratio,
            company_location: location.into(),
            company_size: "M".into(),
        }
    }

    fn sample_dataset() -> SalaryDataset {
        enrich_all(vec![
            raw(2022, "EN", "Data Analyst", "US", 0),
            raw(2022, "SE", "Data Scientist", "GB", 100),
            raw(2023, "SE", "Data Engineer", "IN", 50),
            raw(2023, "EX", "Head of Data", "AU", 100),
            raw(2024, "MI", "Research Scientist", "ZZ", 0),
        ])
    }

    #[test]
    fn full_domain_selection_returns_all_rows_in_order() {
        let ds = sample_dataset();
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_allowed_set_yields_zero_rows_regardless_of_others() {
        let ds = sample_dataset();
        let mut filters = init_filter_state(&ds);
        filters.insert(Dimension::Region, BTreeSet::new());
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn single_dimension_filter_keeps_matching_rows() {
        let ds = sample_dataset();
        let mut filters = init_filter_state(&ds);
        filters.insert(
            Dimension::WorkYear,
            BTreeSet::from([DimensionValue::Year(2023)]),
        );
        assert_eq!(filtered_indices(&ds, &filters), vec![2, 3]);
    }

    #[test]
    fn dimensions_combine_conjunctively() {
        let ds = sample_dataset();
        let mut filters = init_filter_state(&ds);
        filters.insert(
            Dimension::WorkYear,
            BTreeSet::from([DimensionValue::Year(2022), DimensionValue::Year(2023)]),
        );
        filters.insert(
            Dimension::RemoteWorkType,
            BTreeSet::from([DimensionValue::Label("Full-remote")]),
        );
        assert_eq!(filtered_indices(&ds, &filters), vec![1, 3]);
    }

    #[test]
    fn absent_dimension_is_unconstrained() {
        let ds = sample_dataset();
        let mut filters = FilterState::new();
        filters.insert(
            Dimension::Region,
            BTreeSet::from([
                DimensionValue::Label("Americas"),
                DimensionValue::Label("Other"),
            ]),
        );
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 4]);
    }

    #[test]
    fn unknown_values_in_allowed_sets_are_noops() {
        let ds = sample_dataset();
        let mut filters = init_filter_state(&ds);
        filters
            .get_mut(&Dimension::Region)
            .unwrap()
            .insert(DimensionValue::Label("Atlantis"));
        assert_eq!(filtered_indices(&ds, &filters).len(), ds.len());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample_dataset();
        let mut filters = init_filter_state(&ds);
        filters.insert(
            Dimension::ExperienceLevel,
            BTreeSet::from([DimensionValue::Label("Senior-level")]),
        );

        let once = filtered_indices(&ds, &filters);
        let twice: Vec<usize> = once
            .iter()
            .copied()
            .filter(|&i| record_passes(&ds.records[i], &filters))
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn filtering_is_order_independent() {
        let ds = sample_dataset();
        let year_filter = FilterState::from([(
            Dimension::WorkYear,
            BTreeSet::from([DimensionValue::Year(2022), DimensionValue::Year(2023)]),
        )]);
        let region_filter = FilterState::from([(
            Dimension::Region,
            BTreeSet::from([
                DimensionValue::Label("Europe"),
                DimensionValue::Label("Asia"),
            ]),
        )]);

        let year_then_region: Vec<usize> = filtered_indices(&ds, &year_filter)
            .into_iter()
            .filter(|&i| record_passes(&ds.records[i], &region_filter))
            .collect();
        let region_then_year: Vec<usize> = filtered_indices(&ds, &region_filter)
            .into_iter()
            .filter(|&i| record_passes(&ds.records[i], &year_filter))
            .collect();

        let mut combined = year_filter.clone();
        combined.extend(region_filter.clone());

        assert_eq!(year_then_region, region_then_year);
        assert_eq!(year_then_region, filtered_indices(&ds, &combined));
    }

    #[test]
    fn missing_values_filter_like_any_other_value() {
        let ds = enrich_all(vec![
            raw(2024, "SE", "Data Scientist", "US", 0),
            raw(2024, "??", "Data Scientist", "US", 0),
        ]);

        // Domain observed both a concrete level and the missing marker.
        let exp_domain = &ds.unique_values[&Dimension::ExperienceLevel];
        assert!(exp_domain.contains(&DimensionValue::Missing));

        let mut filters = init_filter_state(&ds);
        filters.insert(
            Dimension::ExperienceLevel,
            BTreeSet::from([DimensionValue::Missing]),
        );
        assert_eq!(filtered_indices(&ds, &filters), vec![1]);

        filters.insert(
            Dimension::ExperienceLevel,
            BTreeSet::from([DimensionValue::Label("Senior-level")]),
        );
        assert_eq!(filtered_indices(&ds, &filters), vec![0]);
    }
}
