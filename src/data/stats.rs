use std::collections::BTreeMap;

use super::model::{ExperienceLevel, JobCategory, Region, RemoteWorkType, SalaryDataset};

// ---------------------------------------------------------------------------
// Aggregations over the filtered subset
// ---------------------------------------------------------------------------
//
// Every function here takes the enriched dataset plus the index list the
// filter engine produced and returns plain data for the UI to draw.  An empty
// subset is a valid input everywhere: summaries report `None`, groupings come
// back empty, nothing panics.

/// Headline metrics of the filtered subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalarySummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub max: Option<u64>,
}

/// Which aggregate the region × category chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryStat {
    Mean,
    Median,
}

impl SalaryStat {
    pub fn label(self) -> &'static str {
        match self {
            SalaryStat::Mean => "Average",
            SalaryStat::Median => "Median",
        }
    }
}

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub center: f64,
    pub width: f64,
    pub count: usize,
}

/// Five-number summary backing one box in the box plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Mean and median salary of one work year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlySalary {
    pub year: u16,
    pub mean: f64,
    pub median: f64,
}

// -- Scalar helpers --

fn mean_of(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Linear-interpolation percentile of an ascending slice, `p` in 0..=1.
fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
    if sorted.is_empty() {
        None
    } else {
        Some(percentile_of_sorted(sorted, 0.5))
    }
}

fn sorted_salaries(dataset: &SalaryDataset, indices: &[usize]) -> Vec<f64> {
    let mut values: Vec<f64> = indices
        .iter()
        .map(|&i| dataset.records[i].salary_in_usd as f64)
        .collect();
    values.sort_by(f64::total_cmp);
    values
}

// -- Headline metrics --

/// Count, mean, median and maximum of `salary_in_usd` over the subset.
pub fn summarize(dataset: &SalaryDataset, indices: &[usize]) -> SalarySummary {
    let sorted = sorted_salaries(dataset, indices);
    SalarySummary {
        count: indices.len(),
        mean: mean_of(&sorted),
        median: median_of_sorted(&sorted),
        max: indices
            .iter()
            .map(|&i| dataset.records[i].salary_in_usd)
            .max(),
    }
}

// -- Salary distribution --

/// Equal-width histogram of `salary_in_usd` over the subset.
///
/// Bins span the observed min..max; a constant-valued subset collapses to a
/// single bin.
pub fn salary_histogram(
    dataset: &SalaryDataset,
    indices: &[usize],
    bin_count: usize,
) -> Vec<HistogramBin> {
    if indices.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let values: Vec<f64> = indices
        .iter()
        .map(|&i| dataset.records[i].salary_in_usd as f64)
        .collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            center: min,
            width: 1.0,
            count: values.len(),
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for v in &values {
        // The maximum lands exactly on the right edge; clamp it into the last bin.
        let idx = (((v - min) / width) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            center: min + (i as f64 + 0.5) * width,
            width,
            count,
        })
        .collect()
}

// -- Salary by experience level --

/// Five-number summary of an unsorted value list.
pub fn box_stats(mut values: Vec<f64>) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    Some(BoxStats {
        min: values[0],
        q1: percentile_of_sorted(&values, 0.25),
        median: percentile_of_sorted(&values, 0.5),
        q3: percentile_of_sorted(&values, 0.75),
        max: values[values.len() - 1],
    })
}

/// Box stats per experience level, in Entry → Executive order.  Rows without
/// a mapped level drop out, as a keyed group-by drops missing keys.
pub fn salary_by_experience(
    dataset: &SalaryDataset,
    indices: &[usize],
) -> Vec<(ExperienceLevel, BoxStats)> {
    let mut groups: BTreeMap<ExperienceLevel, Vec<f64>> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        if let Some(level) = rec.experience_level {
            groups.entry(level).or_default().push(rec.salary_in_usd as f64);
        }
    }

    ExperienceLevel::ALL
        .into_iter()
        .filter_map(|level| {
            let values = groups.remove(&level)?;
            Some((level, box_stats(values)?))
        })
        .collect()
}

// -- Salary by region and job category --

/// Mean or median salary per (region, job category) group present in the
/// subset.
pub fn region_category_salary(
    dataset: &SalaryDataset,
    indices: &[usize],
    stat: SalaryStat,
) -> BTreeMap<Region, BTreeMap<JobCategory, f64>> {
    let mut groups: BTreeMap<Region, BTreeMap<JobCategory, Vec<f64>>> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        groups
            .entry(rec.region)
            .or_default()
            .entry(rec.job_category)
            .or_default()
            .push(rec.salary_in_usd as f64);
    }

    groups
        .into_iter()
        .map(|(region, categories)| {
            let aggregated = categories
                .into_iter()
                .map(|(category, mut values)| {
                    let value = match stat {
                        SalaryStat::Mean => mean_of(&values).unwrap_or_default(),
                        SalaryStat::Median => {
                            values.sort_by(f64::total_cmp);
                            median_of_sorted(&values).unwrap_or_default()
                        }
                    };
                    (category, value)
                })
                .collect();
            (region, aggregated)
        })
        .collect()
}

// -- Salary trend over years --

/// Mean and median salary per work year, ascending.
pub fn yearly_trend(dataset: &SalaryDataset, indices: &[usize]) -> Vec<YearlySalary> {
    let mut groups: BTreeMap<u16, Vec<f64>> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        groups
            .entry(rec.work_year)
            .or_default()
            .push(rec.salary_in_usd as f64);
    }

    groups
        .into_iter()
        .map(|(year, mut values)| {
            values.sort_by(f64::total_cmp);
            YearlySalary {
                year,
                // Non-empty by construction.
                mean: mean_of(&values).unwrap_or_default(),
                median: median_of_sorted(&values).unwrap_or_default(),
            }
        })
        .collect()
}

// -- Remote work distribution --

/// Percentage share of each remote work type per year, ascending by year.
///
/// Shares are in `RemoteWorkType::ALL` order and sum to 100 for every year;
/// rows whose ratio fell outside the bins are not part of the denominator.
pub fn remote_share_by_year(dataset: &SalaryDataset, indices: &[usize]) -> Vec<(u16, [f64; 3])> {
    let mut counts: BTreeMap<u16, [usize; 3]> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        let Some(remote) = rec.remote_work_type else {
            continue;
        };
        let slot = RemoteWorkType::ALL
            .iter()
            .position(|&t| t == remote)
            .unwrap_or_default();
        counts.entry(rec.work_year).or_default()[slot] += 1;
    }

    counts
        .into_iter()
        .map(|(year, per_type)| {
            let total = per_type.iter().sum::<usize>() as f64;
            let shares = per_type.map(|n| n as f64 / total * 100.0);
            (year, shares)
        })
        .collect()
}

// -- Top paying jobs --

/// The `limit` job titles with the highest median salary, descending.
/// Ties break alphabetically so the ordering is stable across runs.
pub fn top_paying_titles(
    dataset: &SalaryDataset,
    indices: &[usize],
    limit: usize,
) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        groups
            .entry(rec.job_title.as_str())
            .or_default()
            .push(rec.salary_in_usd as f64);
    }

    let mut medians: Vec<(String, f64)> = groups
        .into_iter()
        .map(|(title, mut values)| {
            values.sort_by(f64::total_cmp);
            (title.to_string(), median_of_sorted(&values).unwrap_or_default())
        })
        .collect();

    medians.sort_by(|(title_a, a), (title_b, b)| {
        b.total_cmp(a).then_with(|| title_a.cmp(title_b))
    });
    medians.truncate(limit);
    medians
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawRecord;
    use crate::data::transform::enrich_all;

    fn raw(year: u16, exp: &str, title: &str, usd: u64, ratio: i32) -> RawRecord {
        RawRecord {
            work_year: year,
            experience_level: exp.into(),
            employment_type: "FT".into(),
            job_title: title.into(),
            salary: usd,
            salary_currency: "USD".into(),
            salary_in_usd: usd,
            employee_residence: "US".into(),
            remote_ratio: ratio,
            company_location: "US".into(),
            company_size: "M".into(),
        }
    }

    fn all_indices(ds: &SalaryDataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn summary_of_empty_subset_is_all_sentinels() {
        let ds = enrich_all(vec![raw(2023, "SE", "Data Scientist", 100_000, 0)]);
        let summary = summarize(&ds, &[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.median, None);
        assert_eq!(summary.max, None);
    }

    #[test]
    fn summary_reports_mean_median_max() {
        let ds = enrich_all(vec![
            raw(2023, "SE", "Data Scientist", 100_000, 0),
            raw(2023, "SE", "Data Scientist", 200_000, 0),
            raw(2023, "SE", "Data Scientist", 600_000, 0),
        ]);
        let summary = summarize(&ds, &all_indices(&ds));
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, Some(300_000.0));
        assert_eq!(summary.median, Some(200_000.0));
        assert_eq!(summary.max, Some(600_000));
    }

    #[test]
    fn median_interpolates_between_middle_values() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(median_of_sorted(&sorted), Some(2.5));
    }

    #[test]
    fn box_stats_five_number_summary() {
        let stats = box_stats(vec![5.0, 1.0, 3.0, 2.0, 4.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(box_stats(Vec::new()), None);
    }

    #[test]
    fn experience_boxes_are_ordered_and_skip_unmapped_levels() {
        let ds = enrich_all(vec![
            raw(2023, "EX", "Data Scientist", 400_000, 0),
            raw(2023, "EN", "Data Scientist", 80_000, 0),
            raw(2023, "??", "Data Scientist", 1_000, 0),
        ]);
        let boxes = salary_by_experience(&ds, &all_indices(&ds));

        let levels: Vec<ExperienceLevel> = boxes.iter().map(|(l, _)| *l).collect();
        assert_eq!(levels, [ExperienceLevel::Entry, ExperienceLevel::Executive]);
        assert_eq!(boxes[0].1.median, 80_000.0);
    }

    #[test]
    fn region_category_grouping_aggregates_means() {
        let ds = enrich_all(vec![
            raw(2023, "SE", "Data Scientist", 100_000, 0),
            raw(2023, "SE", "Data Scientist", 200_000, 0),
            raw(2023, "SE", "Data Engineer", 120_000, 0),
        ]);
        let grouped = region_category_salary(&ds, &all_indices(&ds), SalaryStat::Mean);

        let americas = &grouped[&Region::Americas];
        assert_eq!(americas[&JobCategory::DataScientist], 150_000.0);
        assert_eq!(americas[&JobCategory::DataEngineer], 120_000.0);
        assert_eq!(grouped.len(), 1);
    }

    #[test]
    fn yearly_trend_is_ascending_with_means_and_medians() {
        let ds = enrich_all(vec![
            raw(2024, "SE", "Data Scientist", 300_000, 0),
            raw(2022, "SE", "Data Scientist", 100_000, 0),
            raw(2024, "SE", "Data Scientist", 100_000, 0),
        ]);
        let trend = yearly_trend(&ds, &all_indices(&ds));

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].year, 2022);
        assert_eq!(trend[0].mean, 100_000.0);
        assert_eq!(trend[1].year, 2024);
        assert_eq!(trend[1].mean, 200_000.0);
        assert_eq!(trend[1].median, 200_000.0);
    }

    #[test]
    fn remote_shares_sum_to_one_hundred_per_year() {
        let ds = enrich_all(vec![
            raw(2023, "SE", "Data Scientist", 100_000, 0),
            raw(2023, "SE", "Data Scientist", 100_000, 0),
            raw(2023, "SE", "Data Scientist", 100_000, 100),
            raw(2023, "SE", "Data Scientist", 100_000, 50),
        ]);
        let shares = remote_share_by_year(&ds, &all_indices(&ds));

        assert_eq!(shares.len(), 1);
        let (year, per_type) = shares[0];
        assert_eq!(year, 2023);
        assert_eq!(per_type[0], 50.0); // On-site
        assert_eq!(per_type[1], 25.0); // Hybrid
        assert_eq!(per_type[2], 25.0); // Full-remote
        assert_eq!(per_type.iter().sum::<f64>(), 100.0);
    }

    #[test]
    fn out_of_range_ratios_leave_the_denominator() {
        let ds = enrich_all(vec![
            raw(2023, "SE", "Data Scientist", 100_000, 0),
            raw(2023, "SE", "Data Scientist", 100_000, 999),
        ]);
        let shares = remote_share_by_year(&ds, &all_indices(&ds));
        assert_eq!(shares, vec![(2023, [100.0, 0.0, 0.0])]);
    }

    #[test]
    fn top_titles_rank_by_median_and_truncate() {
        let ds = enrich_all(vec![
            raw(2023, "SE", "Data Scientist", 100_000, 0),
            raw(2023, "SE", "Data Scientist", 300_000, 0),
            raw(2023, "SE", "ML Engineer", 250_000, 0),
            raw(2023, "SE", "Data Analyst", 90_000, 0),
        ]);

        let top = top_paying_titles(&ds, &all_indices(&ds), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], ("ML Engineer".to_string(), 250_000.0));
        assert_eq!(top[1], ("Data Scientist".to_string(), 200_000.0));
    }

    #[test]
    fn histogram_conserves_counts_and_spans_the_range() {
        let ds = enrich_all(vec![
            raw(2023, "SE", "Data Scientist", 0, 0),
            raw(2023, "SE", "Data Scientist", 25_000, 0),
            raw(2023, "SE", "Data Scientist", 99_999, 0),
            raw(2023, "SE", "Data Scientist", 100_000, 0),
        ]);
        let bins = salary_histogram(&ds, &all_indices(&ds), 4);

        assert_eq!(bins.len(), 4);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
        // The maximum belongs to the last bin, not a phantom fifth one.
        assert_eq!(bins[3].count, 2);
    }

    #[test]
    fn histogram_of_constant_values_collapses_to_one_bin() {
        let ds = enrich_all(vec![
            raw(2023, "SE", "Data Scientist", 150_000, 0),
            raw(2023, "SE", "Data Scientist", 150_000, 0),
        ]);
        let bins = salary_histogram(&ds, &all_indices(&ds), 50);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[0].center, 150_000.0);
    }

    #[test]
    fn empty_subset_produces_empty_groupings() {
        let ds = enrich_all(vec![raw(2023, "SE", "Data Scientist", 100_000, 0)]);
        assert!(salary_histogram(&ds, &[], 50).is_empty());
        assert!(salary_by_experience(&ds, &[]).is_empty());
        assert!(region_category_salary(&ds, &[], SalaryStat::Mean).is_empty());
        assert!(yearly_trend(&ds, &[]).is_empty());
        assert!(remote_share_by_year(&ds, &[]).is_empty());
        assert!(top_paying_titles(&ds, &[], 10).is_empty());
    }
}
