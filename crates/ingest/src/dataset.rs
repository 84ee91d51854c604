use model::{FacilityRecord, FuelKind, RecordStore};

use crate::csv::split_line;

const REQUIRED_COLUMNS: [&str; 6] = [
    "latitude",
    "longitude",
    "name",
    "capacity_mw",
    "country",
    "primary_fuel",
];

/// Fatal dataset problems. Row-level problems are recovered and counted in
/// [`IngestReport`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    Empty,
    MissingColumns(Vec<String>),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Empty => write!(f, "dataset is empty"),
            DatasetError::MissingColumns(cols) => {
                write!(f, "required columns missing: {}", cols.join(", "))
            }
        }
    }
}

impl std::error::Error for DatasetError {}

/// Per-class recovery counts from one load. Surfaced for diagnosis; none of
/// these halt loading.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub rows_total: usize,
    pub rows_kept: usize,
    /// Rows dropped for non-numeric or out-of-range coordinates.
    pub dropped_bad_coordinates: usize,
    /// Rows dropped for having fewer fields than the required columns span.
    pub dropped_short_rows: usize,
    /// Rows whose capacity failed to parse and was defaulted to 0 (unknown).
    pub defaulted_capacity: usize,
}

struct Columns {
    latitude: usize,
    longitude: usize,
    name: usize,
    capacity_mw: usize,
    country: usize,
    primary_fuel: usize,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self, DatasetError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|&c| find(c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns(missing));
        }
        Ok(Self {
            latitude: find("latitude").unwrap(),
            longitude: find("longitude").unwrap(),
            name: find("name").unwrap(),
            capacity_mw: find("capacity_mw").unwrap(),
            country: find("country").unwrap(),
            primary_fuel: find("primary_fuel").unwrap(),
        })
    }

    fn span(&self) -> usize {
        [
            self.latitude,
            self.longitude,
            self.name,
            self.capacity_mw,
            self.country,
            self.primary_fuel,
        ]
        .into_iter()
        .max()
        .unwrap()
            + 1
    }
}

/// Parse the facility dataset from CSV text into a fresh store.
///
/// The header row is resolved by exact column name. Rows with unparseable
/// coordinates are dropped; an unparseable capacity defaults to 0 (unknown).
pub fn load_records(csv: &str) -> Result<(RecordStore, IngestReport), DatasetError> {
    let mut lines = csv.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().ok_or(DatasetError::Empty)?;
    let columns = Columns::resolve(&split_line(header))?;
    let span = columns.span();

    let mut store = RecordStore::new();
    let mut report = IngestReport::default();

    for line in lines {
        report.rows_total += 1;
        let fields = split_line(line);
        if fields.len() < span {
            report.dropped_short_rows += 1;
            continue;
        }

        let (Ok(latitude), Ok(longitude)) = (
            fields[columns.latitude].parse::<f64>(),
            fields[columns.longitude].parse::<f64>(),
        ) else {
            report.dropped_bad_coordinates += 1;
            continue;
        };

        let capacity_mw = match fields[columns.capacity_mw].parse::<f64>() {
            Ok(c) if c.is_finite() => c,
            _ => {
                report.defaulted_capacity += 1;
                0.0
            }
        };

        let record = FacilityRecord::new(
            fields[columns.name].as_str(),
            latitude,
            longitude,
            capacity_mw,
            fields[columns.country].as_str(),
            FuelKind::parse(&fields[columns.primary_fuel]),
        );

        match store.push(record) {
            Ok(_) => report.rows_kept += 1,
            Err(_) => report.dropped_bad_coordinates += 1,
        }
    }

    Ok((store, report))
}
