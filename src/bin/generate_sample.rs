use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const CSV_PATH: &str = "ds_salaries.csv";
const PARQUET_PATH: &str = "ds_salaries.parquet";
const ROWS: usize = 600;

const COLUMNS: [&str; 11] = [
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

const YEARS: &[u16] = &[2020, 2021, 2022, 2023, 2024];

// (code, salary factor relative to the US baseline)
const EXPERIENCE: &[(&str, f64)] = &[("EN", 0.55), ("MI", 0.8), ("SE", 1.1), ("EX", 1.6)];

// Mostly full-time, like the real survey data.
const EMPLOYMENT: &[&str] = &["FT", "FT", "FT", "FT", "FT", "FT", "PT", "CT", "FL"];

const SIZES: &[&str] = &["S", "M", "M", "L", "L"];
const RATIOS: &[i32] = &[0, 50, 100];

// (title, base salary in USD at mid level)
const TITLES: &[(&str, f64)] = &[
    ("Data Scientist", 120_000.0),
    ("Senior Data Scientist", 150_000.0),
    ("Data Engineer", 115_000.0),
    ("Analytics Engineer", 110_000.0),
    ("Data Analyst", 75_000.0),
    ("Business Intelligence Analyst", 72_000.0),
    ("Machine Learning Engineer", 140_000.0),
    ("ML Engineer", 135_000.0),
    ("MLOps Engineer", 125_000.0),
    ("Research Scientist", 130_000.0),
    ("Data Architect", 150_000.0),
    ("Head of Data", 180_000.0),
    ("Data Science Manager", 160_000.0),
    ("BI Consultant", 85_000.0),
    ("Applied Scientist", 145_000.0),
];

// (country code, cost-of-labour factor); ZA and AR sit outside the region
// groups so the dashboard also sees unmapped regions.
const LOCATIONS: &[(&str, f64)] = &[
    ("US", 1.35),
    ("CA", 1.0),
    ("MX", 0.45),
    ("BR", 0.4),
    ("GB", 1.0),
    ("DE", 0.95),
    ("ES", 0.6),
    ("FR", 0.8),
    ("NL", 0.9),
    ("IN", 0.3),
    ("SG", 0.95),
    ("JP", 0.85),
    ("IL", 1.05),
    ("AU", 1.0),
    ("NZ", 0.85),
    ("NG", 0.25),
    ("KE", 0.25),
    ("ZA", 0.45),
    ("AR", 0.4),
];

struct Row {
    work_year: u16,
    experience_level: &'static str,
    employment_type: &'static str,
    job_title: &'static str,
    salary: u64,
    salary_currency: &'static str,
    salary_in_usd: u64,
    employee_residence: &'static str,
    remote_ratio: i32,
    company_location: &'static str,
    company_size: &'static str,
}

impl Row {
    fn as_strings(&self) -> [String; 11] {
        [
            self.work_year.to_string(),
            self.experience_level.to_string(),
            self.employment_type.to_string(),
            self.job_title.to_string(),
            self.salary.to_string(),
            self.salary_currency.to_string(),
            self.salary_in_usd.to_string(),
            self.employee_residence.to_string(),
            self.remote_ratio.to_string(),
            self.company_location.to_string(),
            self.company_size.to_string(),
        ]
    }
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn choose<'a, T>(rng: &mut SimpleRng, items: &'a [T]) -> &'a T {
    &items[(rng.next_u64() % items.len() as u64) as usize]
}

fn local_currency(code: &str) -> (&'static str, f64) {
    match code {
        "GB" => ("GBP", 0.79),
        "DE" | "ES" | "FR" | "NL" => ("EUR", 0.92),
        "IN" => ("INR", 83.0),
        "JP" => ("JPY", 150.0),
        "BR" => ("BRL", 5.0),
        _ => ("USD", 1.0),
    }
}

fn random_row(rng: &mut SimpleRng) -> Row {
    let year = *choose(rng, YEARS);
    let &(experience, exp_factor) = choose(rng, EXPERIENCE);
    let &(title, base) = choose(rng, TITLES);
    let &(location, location_factor) = choose(rng, LOCATIONS);
    let employment = *choose(rng, EMPLOYMENT);
    let size = *choose(rng, SIZES);
    let ratio = *choose(rng, RATIOS);

    // Most people work where the company is.
    let residence = if rng.next_f64() < 0.9 {
        location
    } else {
        choose(rng, LOCATIONS).0
    };

    let growth = 1.0 + 0.05 * f64::from(year - 2020);
    let noise = rng.gauss(1.0, 0.12).max(0.5);
    let usd = (base * exp_factor * location_factor * growth * noise / 1000.0).round() * 1000.0;
    let salary_in_usd = usd.max(15_000.0) as u64;

    let (currency, rate) = local_currency(location);
    let salary = if currency == "USD" {
        salary_in_usd
    } else {
        ((salary_in_usd as f64 * rate) / 100.0).round() as u64 * 100
    };

    Row {
        work_year: year,
        experience_level: experience,
        employment_type: employment,
        job_title: title,
        salary,
        salary_currency: currency,
        salary_in_usd,
        employee_residence: residence,
        remote_ratio: ratio,
        company_location: location,
        company_size: size,
    }
}

fn write_csv(rows: &[Row]) {
    let mut w = csv::Writer::from_path(CSV_PATH).expect("Failed to create CSV file");
    w.write_record(COLUMNS).expect("Failed to write CSV header");
    for row in rows {
        w.write_record(row.as_strings())
            .expect("Failed to write CSV row");
    }
    w.flush().expect("Failed to flush CSV file");
}

fn write_parquet(rows: &[Row]) {
    let strings = |f: fn(&Row) -> &str| {
        StringArray::from(rows.iter().map(f).collect::<Vec<_>>())
    };
    let ints = |f: fn(&Row) -> i64| Int64Array::from(rows.iter().map(f).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("work_year", DataType::Int64, false),
        Field::new("experience_level", DataType::Utf8, false),
        Field::new("employment_type", DataType::Utf8, false),
        Field::new("job_title", DataType::Utf8, false),
        Field::new("salary", DataType::Int64, false),
        Field::new("salary_currency", DataType::Utf8, false),
        Field::new("salary_in_usd", DataType::Int64, false),
        Field::new("employee_residence", DataType::Utf8, false),
        Field::new("remote_ratio", DataType::Int64, false),
        Field::new("company_location", DataType::Utf8, false),
        Field::new("company_size", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(ints(|r| i64::from(r.work_year))),
            Arc::new(strings(|r| r.experience_level)),
            Arc::new(strings(|r| r.employment_type)),
            Arc::new(strings(|r| r.job_title)),
            Arc::new(ints(|r| r.salary as i64)),
            Arc::new(strings(|r| r.salary_currency)),
            Arc::new(ints(|r| r.salary_in_usd as i64)),
            Arc::new(strings(|r| r.employee_residence)),
            Arc::new(ints(|r| i64::from(r.remote_ratio))),
            Arc::new(strings(|r| r.company_location)),
            Arc::new(strings(|r| r.company_size)),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(PARQUET_PATH).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<Row> = (0..ROWS).map(|_| random_row(&mut rng)).collect();

    write_csv(&rows);
    write_parquet(&rows);

    println!(
        "Wrote {} salary records to {CSV_PATH} and {PARQUET_PATH}",
        rows.len()
    );
}
