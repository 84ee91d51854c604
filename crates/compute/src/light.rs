use std::collections::BTreeMap;

use foundation::grid::CellIndex;
use foundation::rng::SplitMix64;

#[derive(Debug, Clone, PartialEq)]
pub enum LightDataError {
    Parse(String),
    BadKey(String),
}

impl std::fmt::Display for LightDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LightDataError::Parse(msg) => write!(f, "light data is not valid JSON: {msg}"),
            LightDataError::BadKey(key) => write!(f, "light data key is not \"lat,lon\": {key}"),
        }
    }
}

impl std::error::Error for LightDataError {}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightFieldConfig {
    pub cell_degrees: f64,
    pub seed: u64,
}

impl Default for LightFieldConfig {
    fn default() -> Self {
        Self {
            cell_degrees: 10.0,
            seed: 0x1147_F1E1D,
        }
    }
}

/// Night-light intensity on a coarse global grid, 0..=100 per cell.
///
/// Either simulated (seeded, latitude-banded) or loaded from a processed
/// JSON export keyed `"lat,lon"` by cell corner. Sampling outside covered
/// cells reads 0.
#[derive(Debug, Clone, PartialEq)]
pub struct LightField {
    cell_degrees: f64,
    cells: BTreeMap<CellIndex, f64>,
}

impl LightField {
    /// Placeholder field standing in for real sensor data: brighter across
    /// the developed latitude bands, dimmer elsewhere, with seeded jitter.
    pub fn simulated(config: LightFieldConfig) -> Self {
        let mut rng = SplitMix64::new(config.seed);
        let mut cells = BTreeMap::new();

        let mut lat = -90.0;
        while lat < 90.0 {
            let mut lon = -180.0;
            while lon < 180.0 {
                let base = if (20.0..=60.0).contains(&lat) {
                    70.0 + rng.next_f64() * 30.0
                } else if (-40.0..=0.0).contains(&lat) {
                    50.0 + rng.next_f64() * 30.0
                } else {
                    10.0 + rng.next_f64() * 40.0
                };
                let intensity = (base + rng.next_f64() * 20.0 - 10.0).clamp(0.0, 100.0);
                cells.insert(CellIndex::at(lat, lon, config.cell_degrees), intensity);
                lon += config.cell_degrees;
            }
            lat += config.cell_degrees;
        }

        Self {
            cell_degrees: config.cell_degrees,
            cells,
        }
    }

    /// Load a processed export: a JSON object mapping `"lat,lon"` cell
    /// corners to intensity values.
    pub fn from_json(json: &str, cell_degrees: f64) -> Result<Self, LightDataError> {
        let parsed: BTreeMap<String, f64> =
            serde_json::from_str(json).map_err(|e| LightDataError::Parse(e.to_string()))?;

        let mut cells = BTreeMap::new();
        for (key, intensity) in parsed {
            let Some((lat, lon)) = key.split_once(',') else {
                return Err(LightDataError::BadKey(key));
            };
            let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>())
            else {
                return Err(LightDataError::BadKey(key));
            };
            cells.insert(CellIndex::at(lat, lon, cell_degrees), intensity);
        }

        Ok(Self {
            cell_degrees,
            cells,
        })
    }

    pub fn cell_degrees(&self) -> f64 {
        self.cell_degrees
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn sample(&self, latitude: f64, longitude: f64) -> f64 {
        self.cells
            .get(&CellIndex::at(latitude, longitude, self.cell_degrees))
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{LightField, LightFieldConfig};

    #[test]
    fn simulated_field_covers_the_globe() {
        let field = LightField::simulated(LightFieldConfig::default());
        assert_eq!(field.len(), 18 * 36);
        for (lat, lon) in [(0.0, 0.0), (89.9, 179.9), (-90.0, -180.0), (45.0, -120.0)] {
            let v = field.sample(lat, lon);
            assert!((0.0..=100.0).contains(&v), "({lat},{lon}) -> {v}");
        }
    }

    #[test]
    fn developed_bands_are_brighter_on_average() {
        let field = LightField::simulated(LightFieldConfig::default());
        let band_mean = |lat: f64| {
            let mut sum = 0.0;
            let mut n = 0;
            let mut lon = -180.0;
            while lon < 180.0 {
                sum += field.sample(lat, lon);
                n += 1;
                lon += 10.0;
            }
            sum / n as f64
        };
        assert!(band_mean(40.0) > band_mean(80.0));
    }

    #[test]
    fn same_seed_reproduces_the_field() {
        let a = LightField::simulated(LightFieldConfig::default());
        let b = LightField::simulated(LightFieldConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn loads_from_json_export() {
        let field = LightField::from_json(r#"{"40,-120": 88.5, "-10,30": 12.0}"#, 10.0).unwrap();
        assert_eq!(field.sample(45.0, -115.0), 88.5);
        assert_eq!(field.sample(-5.0, 35.0), 12.0);
        assert_eq!(field.sample(0.0, 0.0), 0.0);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(LightField::from_json(r#"{"not-a-key": 1.0}"#, 10.0).is_err());
        assert!(LightField::from_json("[]", 10.0).is_err());
    }

    #[test]
    fn sampling_uncovered_cells_reads_zero() {
        let field = LightField::from_json("{}", 10.0).unwrap();
        assert_eq!(field.sample(10.0, 10.0), 0.0);
    }
}
