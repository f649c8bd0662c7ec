use super::model::{
    CompanySize, EmploymentType, ExperienceLevel, JobCategory, RawRecord, Region, RemoteWorkType,
    SalaryDataset, SalaryRecord,
};

// ---------------------------------------------------------------------------
// Categorical recodes: fixed finite code → label lookups
// ---------------------------------------------------------------------------

// Codes outside the lookups yield `None` and the row keeps a missing value;
// no catch-all label is invented for them.

fn decode_experience(code: &str) -> Option<ExperienceLevel> {
    match code {
        "EN" => Some(ExperienceLevel::Entry),
        "MI" => Some(ExperienceLevel::Mid),
        "SE" => Some(ExperienceLevel::Senior),
        "EX" => Some(ExperienceLevel::Executive),
        _ => None,
    }
}

fn decode_employment(code: &str) -> Option<EmploymentType> {
    match code {
        "FT" => Some(EmploymentType::FullTime),
        "PT" => Some(EmploymentType::PartTime),
        "CT" => Some(EmploymentType::Contract),
        "FL" => Some(EmploymentType::Freelance),
        _ => None,
    }
}

fn decode_company_size(code: &str) -> Option<CompanySize> {
    match code {
        "S" => Some(CompanySize::Small),
        "M" => Some(CompanySize::Medium),
        "L" => Some(CompanySize::Large),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Remote-ratio bucketing
// ---------------------------------------------------------------------------

/// Bucket a raw remote percentage into the three work types.
///
/// Bins are open on the left and closed on the right: ratio ≤ 0 is On-site,
/// (0, 50] is Hybrid, (50, 100] is Full-remote.  Ratios above 100 fall
/// outside every bin and stay missing.
pub fn remote_work_type(ratio: i32) -> Option<RemoteWorkType> {
    match ratio {
        r if r <= 0 => Some(RemoteWorkType::OnSite),
        r if r <= 50 => Some(RemoteWorkType::Hybrid),
        r if r <= 100 => Some(RemoteWorkType::FullRemote),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Region partition
// ---------------------------------------------------------------------------

// The five named buckets are closed and non-overlapping; every code outside
// them is Other.

const AMERICAS: [&str; 5] = ["US", "CA", "MX", "BR", "CO"];
const EUROPE: [&str; 11] = ["GB", "DE", "ES", "FR", "NL", "PT", "CH", "IE", "AT", "SI", "HR"];
const ASIA: [&str; 8] = ["IN", "SG", "JP", "HK", "IL", "AE", "PK", "TH"];
const OCEANIA: [&str; 2] = ["AU", "NZ"];
const AFRICA: [&str; 3] = ["NG", "KE", "GH"];

/// Map an ISO country code onto its region bucket.
pub fn region_of(country_code: &str) -> Region {
    if AMERICAS.contains(&country_code) {
        Region::Americas
    } else if EUROPE.contains(&country_code) {
        Region::Europe
    } else if ASIA.contains(&country_code) {
        Region::Asia
    } else if OCEANIA.contains(&country_code) {
        Region::Oceania
    } else if AFRICA.contains(&country_code) {
        Region::Africa
    } else {
        Region::Other
    }
}

// ---------------------------------------------------------------------------
// Job-title classification
// ---------------------------------------------------------------------------

/// Ordered substring rules over the lower-cased title; the first matching
/// rule wins.  Order is load-bearing: "Machine Learning Research Scientist"
/// must classify as Machine Learning Engineer, not Research Scientist.
const TITLE_RULES: &[(&[&str], JobCategory)] = &[
    (&["data scientist"], JobCategory::DataScientist),
    (&["data engineer"], JobCategory::DataEngineer),
    (&["data analyst"], JobCategory::DataAnalyst),
    (&["machine learning", "ml"], JobCategory::MachineLearningEngineer),
    (&["research", "scientist"], JobCategory::ResearchScientist),
    (&["analytics"], JobCategory::AnalyticsEngineer),
    (&["architect"], JobCategory::DataArchitect),
    (&["manager", "lead", "director", "head"], JobCategory::Management),
];

/// Classify a free-text job title into its category bucket.
pub fn categorize_title(title: &str) -> JobCategory {
    let title = title.to_lowercase();
    for (needles, category) in TITLE_RULES {
        if needles.iter().any(|needle| title.contains(needle)) {
            return *category;
        }
    }
    JobCategory::Other
}

// ---------------------------------------------------------------------------
// Enrichment entry points
// ---------------------------------------------------------------------------

/// Enrich one raw row: every original column is preserved, the derived
/// categorical fields are appended.  Pure and total, no error path.
pub fn enrich(raw: RawRecord) -> SalaryRecord {
    let experience_level = decode_experience(&raw.experience_level);
    let employment_type = decode_employment(&raw.employment_type);
    let company_size = decode_company_size(&raw.company_size);
    let remote = remote_work_type(raw.remote_ratio);
    let region = region_of(&raw.company_location);
    let job_category = categorize_title(&raw.job_title);

    SalaryRecord {
        work_year: raw.work_year,
        experience_level,
        employment_type,
        job_title: raw.job_title,
        job_category,
        salary: raw.salary,
        salary_currency: raw.salary_currency,
        salary_in_usd: raw.salary_in_usd,
        employee_residence: raw.employee_residence,
        remote_ratio: raw.remote_ratio,
        remote_work_type: remote,
        company_location: raw.company_location,
        region,
        company_size,
    }
}

/// Enrich a whole raw table and index it.  Row order is preserved; running
/// this twice on the same input yields identical output.
pub fn enrich_all(raws: Vec<RawRecord>) -> SalaryDataset {
    SalaryDataset::from_records(raws.into_iter().map(enrich).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_record() -> RawRecord {
        RawRecord {
            work_year: 2024,
            experience_level: "MI".into(),
            employment_type: "CT".into(),
            job_title: "Lead Data Scientist".into(),
            salary: 180_000,
            salary_currency: "EUR".into(),
            salary_in_usd: 195_000,
            employee_residence: "DE".into(),
            remote_ratio: 50,
            company_location: "DE".into(),
            company_size: "L".into(),
        }
    }

    #[test]
    fn recodes_known_codes() {
        assert_eq!(decode_experience("EN"), Some(ExperienceLevel::Entry));
        assert_eq!(decode_experience("EX"), Some(ExperienceLevel::Executive));
        assert_eq!(decode_employment("FL"), Some(EmploymentType::Freelance));
        assert_eq!(decode_company_size("S"), Some(CompanySize::Small));
    }

    #[test]
    fn unknown_codes_stay_missing() {
        assert_eq!(decode_experience("XX"), None);
        assert_eq!(decode_employment("ZZ"), None);
        assert_eq!(decode_company_size("XL"), None);

        let mut raw = raw_record();
        raw.experience_level = "??".into();
        raw.company_size = "XL".into();
        let rec = enrich(raw);
        assert_eq!(rec.experience_level, None);
        assert_eq!(rec.company_size, None);
        assert_eq!(rec.employment_type, Some(EmploymentType::Contract));
    }

    #[test]
    fn remote_ratio_bins_are_left_open_right_closed() {
        assert_eq!(remote_work_type(0), Some(RemoteWorkType::OnSite));
        assert_eq!(remote_work_type(-10), Some(RemoteWorkType::OnSite));
        assert_eq!(remote_work_type(1), Some(RemoteWorkType::Hybrid));
        assert_eq!(remote_work_type(50), Some(RemoteWorkType::Hybrid));
        assert_eq!(remote_work_type(51), Some(RemoteWorkType::FullRemote));
        assert_eq!(remote_work_type(100), Some(RemoteWorkType::FullRemote));
        assert_eq!(remote_work_type(101), None);
    }

    #[test]
    fn region_buckets_cover_each_continent_and_default_to_other() {
        assert_eq!(region_of("US"), Region::Americas);
        assert_eq!(region_of("BR"), Region::Americas);
        assert_eq!(region_of("GB"), Region::Europe);
        assert_eq!(region_of("IN"), Region::Asia);
        assert_eq!(region_of("AU"), Region::Oceania);
        assert_eq!(region_of("NG"), Region::Africa);
        assert_eq!(region_of("ZZ"), Region::Other);
        assert_eq!(region_of(""), Region::Other);
    }

    #[test]
    fn ml_rule_wins_over_research_rule() {
        assert_eq!(
            categorize_title("Machine Learning Research Scientist"),
            JobCategory::MachineLearningEngineer,
        );
    }

    #[test]
    fn data_analyst_rule_wins_over_management_keywords() {
        assert_eq!(categorize_title("Senior Data Analyst"), JobCategory::DataAnalyst);
        // "Lead" alone would be Management, but "data analyst" is checked first.
        assert_eq!(categorize_title("Lead Data Analyst"), JobCategory::DataAnalyst);
    }

    #[test]
    fn title_matching_ignores_case() {
        assert_eq!(categorize_title("DATA ENGINEER"), JobCategory::DataEngineer);
        assert_eq!(categorize_title("data scientist"), JobCategory::DataScientist);
    }

    #[test]
    fn bare_ml_matches_as_a_substring() {
        assert_eq!(categorize_title("MLOps Specialist"), JobCategory::MachineLearningEngineer);
    }

    #[test]
    fn remaining_rules_fire_in_order() {
        assert_eq!(categorize_title("Applied Scientist"), JobCategory::ResearchScientist);
        assert_eq!(
            categorize_title("Business Analytics Consultant"),
            JobCategory::AnalyticsEngineer,
        );
        assert_eq!(categorize_title("Cloud Architect"), JobCategory::DataArchitect);
        assert_eq!(categorize_title("Head of Data"), JobCategory::Management);
        assert_eq!(categorize_title("BI Developer"), JobCategory::Other);
    }

    #[test]
    fn enrich_preserves_every_original_column() {
        let raw = raw_record();
        let rec = enrich(raw.clone());

        assert_eq!(rec.work_year, raw.work_year);
        assert_eq!(rec.job_title, raw.job_title);
        assert_eq!(rec.salary, raw.salary);
        assert_eq!(rec.salary_currency, raw.salary_currency);
        assert_eq!(rec.salary_in_usd, raw.salary_in_usd);
        assert_eq!(rec.employee_residence, raw.employee_residence);
        assert_eq!(rec.remote_ratio, raw.remote_ratio);
        assert_eq!(rec.company_location, raw.company_location);

        assert_eq!(rec.experience_level, Some(ExperienceLevel::Mid));
        assert_eq!(rec.employment_type, Some(EmploymentType::Contract));
        assert_eq!(rec.company_size, Some(CompanySize::Large));
        assert_eq!(rec.remote_work_type, Some(RemoteWorkType::Hybrid));
        assert_eq!(rec.region, Region::Europe);
        assert_eq!(rec.job_category, JobCategory::DataScientist);
    }

    #[test]
    fn enrich_all_keeps_row_count_and_order() {
        let mut second = raw_record();
        second.job_title = "Data Engineer".into();
        let ds = enrich_all(vec![raw_record(), second]);

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].job_category, JobCategory::DataScientist);
        assert_eq!(ds.records[1].job_category, JobCategory::DataEngineer);
    }
}
