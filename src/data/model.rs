use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// RawRecord – one input row, categorical values still coded
// ---------------------------------------------------------------------------

/// One row of the source file, exactly as stored on disk.
///
/// The coded columns (`experience_level`, `employment_type`, `company_size`)
/// carry the two-letter / one-letter abbreviations of the source dataset;
/// decoding them is the enrichment transform's job, not the loader's.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    pub work_year: u16,
    pub experience_level: String,
    pub employment_type: String,
    pub job_title: String,
    pub salary: u64,
    pub salary_currency: String,
    pub salary_in_usd: u64,
    pub employee_residence: String,
    pub remote_ratio: i32,
    pub company_location: String,
    pub company_size: String,
}

/// Input column names in file order.  Loaders check these; the exporter
/// writes them back out ahead of the derived columns.
pub const RAW_COLUMNS: [&str; 11] = [
    "work_year",
    "experience_level",
    "employment_type",
    "job_title",
    "salary",
    "salary_currency",
    "salary_in_usd",
    "employee_residence",
    "remote_ratio",
    "company_location",
    "company_size",
];

// ---------------------------------------------------------------------------
// Category enums – human-readable labels for coded and derived fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Executive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry-level",
            ExperienceLevel::Mid => "Mid-level",
            ExperienceLevel::Senior => "Senior-level",
            ExperienceLevel::Executive => "Executive-level",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Freelance,
}

impl EmploymentType {
    pub fn label(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Freelance => "Freelance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompanySize {
    Small,
    Medium,
    Large,
}

impl CompanySize {
    pub fn label(self) -> &'static str {
        match self {
            CompanySize::Small => "Small",
            CompanySize::Medium => "Medium",
            CompanySize::Large => "Large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RemoteWorkType {
    OnSite,
    Hybrid,
    FullRemote,
}

impl RemoteWorkType {
    pub const ALL: [RemoteWorkType; 3] = [
        RemoteWorkType::OnSite,
        RemoteWorkType::Hybrid,
        RemoteWorkType::FullRemote,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RemoteWorkType::OnSite => "On-site",
            RemoteWorkType::Hybrid => "Hybrid",
            RemoteWorkType::FullRemote => "Full-remote",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Americas,
    Europe,
    Asia,
    Oceania,
    Africa,
    Other,
}

impl Region {
    pub fn label(self) -> &'static str {
        match self {
            Region::Americas => "Americas",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::Oceania => "Oceania",
            Region::Africa => "Africa",
            Region::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobCategory {
    DataScientist,
    DataEngineer,
    DataAnalyst,
    MachineLearningEngineer,
    ResearchScientist,
    AnalyticsEngineer,
    DataArchitect,
    Management,
    Other,
}

impl JobCategory {
    pub const ALL: [JobCategory; 9] = [
        JobCategory::DataScientist,
        JobCategory::DataEngineer,
        JobCategory::DataAnalyst,
        JobCategory::MachineLearningEngineer,
        JobCategory::ResearchScientist,
        JobCategory::AnalyticsEngineer,
        JobCategory::DataArchitect,
        JobCategory::Management,
        JobCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobCategory::DataScientist => "Data Scientist",
            JobCategory::DataEngineer => "Data Engineer",
            JobCategory::DataAnalyst => "Data Analyst",
            JobCategory::MachineLearningEngineer => "Machine Learning Engineer",
            JobCategory::ResearchScientist => "Research Scientist",
            JobCategory::AnalyticsEngineer => "Analytics Engineer",
            JobCategory::DataArchitect => "Data Architect",
            JobCategory::Management => "Management",
            JobCategory::Other => "Other",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),* $(,)?) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(
    ExperienceLevel,
    EmploymentType,
    CompanySize,
    RemoteWorkType,
    Region,
    JobCategory,
);

// ---------------------------------------------------------------------------
// SalaryRecord – one enriched row
// ---------------------------------------------------------------------------

/// A raw record plus the derived categorical fields.
///
/// The recoded fields are `Option`s: an unmapped input code has no label and
/// stays missing all the way through filtering, charting and export.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRecord {
    pub work_year: u16,
    pub experience_level: Option<ExperienceLevel>,
    pub employment_type: Option<EmploymentType>,
    pub job_title: String,
    pub job_category: JobCategory,
    pub salary: u64,
    pub salary_currency: String,
    pub salary_in_usd: u64,
    pub employee_residence: String,
    pub remote_ratio: i32,
    pub remote_work_type: Option<RemoteWorkType>,
    pub company_location: String,
    pub region: Region,
    pub company_size: Option<CompanySize>,
}

// ---------------------------------------------------------------------------
// Dimension / DimensionValue – the filterable view of a record
// ---------------------------------------------------------------------------

/// The six filterable dimensions of the enriched table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    WorkYear,
    ExperienceLevel,
    JobCategory,
    Region,
    CompanySize,
    RemoteWorkType,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::WorkYear,
        Dimension::ExperienceLevel,
        Dimension::JobCategory,
        Dimension::Region,
        Dimension::CompanySize,
        Dimension::RemoteWorkType,
    ];

    /// Heading shown above the dimension's checkbox list.
    pub fn title(self) -> &'static str {
        match self {
            Dimension::WorkYear => "Work year",
            Dimension::ExperienceLevel => "Experience level",
            Dimension::JobCategory => "Job category",
            Dimension::Region => "Region",
            Dimension::CompanySize => "Company size",
            Dimension::RemoteWorkType => "Remote work type",
        }
    }

    /// Project a record onto this dimension.
    pub fn value_of(self, record: &SalaryRecord) -> DimensionValue {
        match self {
            Dimension::WorkYear => DimensionValue::Year(record.work_year),
            Dimension::ExperienceLevel => {
                DimensionValue::from_label(record.experience_level.map(ExperienceLevel::label))
            }
            Dimension::JobCategory => DimensionValue::Label(record.job_category.label()),
            Dimension::Region => DimensionValue::Label(record.region.label()),
            Dimension::CompanySize => {
                DimensionValue::from_label(record.company_size.map(CompanySize::label))
            }
            Dimension::RemoteWorkType => {
                DimensionValue::from_label(record.remote_work_type.map(RemoteWorkType::label))
            }
        }
    }
}

/// Value of one filter dimension for one record.
///
/// `Missing` stands in for unmapped categorical codes and out-of-range remote
/// ratios; it sorts after every concrete value and stays selectable in the
/// filter panel so such rows can still be shown or hidden deliberately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DimensionValue {
    Year(u16),
    Label(&'static str),
    Missing,
}

impl DimensionValue {
    fn from_label(label: Option<&'static str>) -> Self {
        match label {
            Some(s) => DimensionValue::Label(s),
            None => DimensionValue::Missing,
        }
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionValue::Year(y) => write!(f, "{y}"),
            DimensionValue::Label(s) => f.write_str(s),
            DimensionValue::Missing => f.write_str("(unmapped)"),
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete enriched table
// ---------------------------------------------------------------------------

/// The enriched table plus, per dimension, the sorted set of observed values.
///
/// Built once per loaded file and never mutated afterwards; filtering hands
/// out index lists into `records` instead of copying rows.
#[derive(Debug, Clone)]
pub struct SalaryDataset {
    /// All enriched rows, in input order.
    pub records: Vec<SalaryRecord>,
    /// For each dimension the sorted set of values observed in `records`.
    pub unique_values: BTreeMap<Dimension, BTreeSet<DimensionValue>>,
}

impl SalaryDataset {
    /// Build the per-dimension value index from enriched rows.
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut unique_values: BTreeMap<Dimension, BTreeSet<DimensionValue>> =
            Dimension::ALL.iter().map(|&d| (d, BTreeSet::new())).collect();

        for rec in &records {
            for dim in Dimension::ALL {
                unique_values.entry(dim).or_default().insert(dim.value_of(rec));
            }
        }

        SalaryDataset {
            records,
            unique_values,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
