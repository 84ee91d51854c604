use std::collections::BTreeMap;

use model::{FilterState, FuelKind, RecordStore};
use serde::Serialize;

/// Fixed capacity histogram bands, MW. Lower-inclusive, upper-exclusive;
/// the last band is unbounded.
const CAPACITY_BANDS: [(&str, f64, f64); 6] = [
    ("0-100 MW", 0.0, 100.0),
    ("100-500 MW", 100.0, 500.0),
    ("500-1000 MW", 500.0, 1_000.0),
    ("1-2 GW", 1_000.0, 2_000.0),
    ("2-5 GW", 2_000.0, 5_000.0),
    ("5+ GW", 5_000.0, f64::INFINITY),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityBand {
    pub label: &'static str,
    pub count: u32,
}

/// Dashboard summary over the filtered dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub plant_count: usize,
    pub total_capacity_mw: f64,
    /// Mean over plants with known (positive) capacity; 0 if there are none.
    pub average_capacity_mw: f64,
    pub dominant_fuel: Option<FuelKind>,
    pub fuel_counts: BTreeMap<FuelKind, u32>,
    pub capacity_bands: Vec<CapacityBand>,
}

pub fn summarize(store: &RecordStore, filters: &FilterState) -> StatsReport {
    let mut plant_count = 0usize;
    let mut total_capacity_mw = 0.0;
    let mut known_capacity_sum = 0.0;
    let mut known_capacity_count = 0usize;
    let mut fuel_counts: BTreeMap<FuelKind, u32> = BTreeMap::new();
    let mut band_counts = [0u32; CAPACITY_BANDS.len()];

    for (_, record) in store.iter() {
        if !filters.matches(record) {
            continue;
        }
        plant_count += 1;
        total_capacity_mw += record.capacity_mw;
        if record.capacity_mw > 0.0 {
            known_capacity_sum += record.capacity_mw;
            known_capacity_count += 1;
        }
        *fuel_counts.entry(record.fuel).or_insert(0) += 1;
        for (i, (_, min, max)) in CAPACITY_BANDS.iter().enumerate() {
            if record.capacity_mw >= *min && record.capacity_mw < *max {
                band_counts[i] += 1;
                break;
            }
        }
    }

    let dominant_fuel = model::dominant_fuel(&fuel_counts);

    StatsReport {
        plant_count,
        total_capacity_mw,
        average_capacity_mw: if known_capacity_count > 0 {
            known_capacity_sum / known_capacity_count as f64
        } else {
            0.0
        },
        dominant_fuel,
        fuel_counts,
        capacity_bands: CAPACITY_BANDS
            .iter()
            .zip(band_counts)
            .map(|(&(label, _, _), count)| CapacityBand { label, count })
            .collect(),
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sum = 0.0;
    for &v in values {
        sum += v;
    }
    Some(sum / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let mut sum_sq = 0.0;
    for &v in values {
        sum_sq += (v - m) * (v - m);
    }
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use model::{FacilityRecord, FilterState, FuelKind, RecordStore};

    use super::{mean, median, sample_std_dev, summarize};

    fn store() -> RecordStore {
        let mut s = RecordStore::new();
        for (cap, fuel) in [
            (50.0, FuelKind::Wind),
            (250.0, FuelKind::Gas),
            (750.0, FuelKind::Gas),
            (1_500.0, FuelKind::Nuclear),
            (0.0, FuelKind::Other),
        ] {
            s.push(FacilityRecord::new("p", 10.0, 10.0, cap, "USA", fuel))
                .unwrap();
        }
        s
    }

    #[test]
    fn summarize_counts_and_bands() {
        let report = summarize(&store(), &FilterState::default());
        assert_eq!(report.plant_count, 5);
        assert_eq!(report.total_capacity_mw, 2_550.0);
        // Unknown-capacity plant is excluded from the average.
        assert_eq!(report.average_capacity_mw, 2_550.0 / 4.0);
        assert_eq!(report.dominant_fuel, Some(FuelKind::Gas));
        assert_eq!(report.fuel_counts[&FuelKind::Gas], 2);

        let counts: Vec<u32> = report.capacity_bands.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 1, 1, 1, 0, 0]);
    }

    #[test]
    fn band_edges_are_lower_inclusive() {
        let mut s = RecordStore::new();
        s.push(FacilityRecord::new("edge", 0.0, 0.0, 100.0, "USA", FuelKind::Gas))
            .unwrap();
        let report = summarize(&s, &FilterState::default());
        let counts: Vec<u32> = report.capacity_bands.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn summarize_respects_filters() {
        let filters = FilterState {
            min_capacity_mw: 500.0,
            ..FilterState::default()
        };
        let report = summarize(&store(), &filters);
        assert_eq!(report.plant_count, 2);
        assert_eq!(report.dominant_fuel, Some(FuelKind::Gas));
    }

    #[test]
    fn empty_store_has_empty_report() {
        let report = summarize(&RecordStore::new(), &FilterState::default());
        assert_eq!(report.plant_count, 0);
        assert_eq!(report.average_capacity_mw, 0.0);
        assert_eq!(report.dominant_fuel, None);
    }

    #[test]
    fn basic_descriptive_stats() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.138089935).abs() < 1e-6);
        assert_eq!(sample_std_dev(&[1.0]), None);
    }
}
