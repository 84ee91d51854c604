use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::fuel::FuelKind;
use crate::record::FacilityRecord;

/// User-selected display filters, replaced atomically by the host UI.
///
/// Render passes clone a snapshot at fire time, so a filter change arriving
/// mid-pass never produces a half-filtered visible set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Empty set means no fuel restriction.
    pub fuels: BTreeSet<FuelKind>,
    /// Inclusive lower bound, MW.
    pub min_capacity_mw: f64,
    /// Inclusive upper bound, MW; `None` means unbounded.
    pub max_capacity_mw: Option<f64>,
    /// `None` means all countries.
    pub country: Option<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            fuels: BTreeSet::new(),
            min_capacity_mw: 0.0,
            max_capacity_mw: None,
            country: None,
        }
    }
}

impl FilterState {
    /// All filter criteria compose with AND.
    pub fn matches(&self, record: &FacilityRecord) -> bool {
        if !self.fuels.is_empty() && !self.fuels.contains(&record.fuel) {
            return false;
        }
        if record.capacity_mw < self.min_capacity_mw {
            return false;
        }
        if let Some(max) = self.max_capacity_mw
            && record.capacity_mw > max
        {
            return false;
        }
        if let Some(country) = &self.country
            && record.country != *country
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::FilterState;
    use crate::fuel::FuelKind;
    use crate::record::FacilityRecord;

    fn plant(capacity: f64, country: &str, fuel: FuelKind) -> FacilityRecord {
        FacilityRecord::new("p", 0.0, 0.0, capacity, country, fuel)
    }

    #[test]
    fn default_matches_everything() {
        let f = FilterState::default();
        assert!(f.matches(&plant(0.0, "USA", FuelKind::Other)));
        assert!(f.matches(&plant(1e6, "", FuelKind::Coal)));
    }

    #[test]
    fn criteria_compose_with_and() {
        let f = FilterState {
            fuels: BTreeSet::from([FuelKind::Hydro, FuelKind::Wind]),
            min_capacity_mw: 100.0,
            max_capacity_mw: Some(1000.0),
            country: Some("BRA".to_string()),
        };
        assert!(f.matches(&plant(500.0, "BRA", FuelKind::Hydro)));
        assert!(!f.matches(&plant(500.0, "BRA", FuelKind::Coal)));
        assert!(!f.matches(&plant(50.0, "BRA", FuelKind::Hydro)));
        assert!(!f.matches(&plant(2000.0, "BRA", FuelKind::Hydro)));
        assert!(!f.matches(&plant(500.0, "USA", FuelKind::Hydro)));
    }

    #[test]
    fn capacity_range_is_inclusive() {
        let f = FilterState {
            min_capacity_mw: 100.0,
            max_capacity_mw: Some(1000.0),
            ..FilterState::default()
        };
        assert!(f.matches(&plant(100.0, "USA", FuelKind::Gas)));
        assert!(f.matches(&plant(1000.0, "USA", FuelKind::Gas)));
    }

    #[test]
    fn round_trips_through_json() {
        let f = FilterState {
            fuels: BTreeSet::from([FuelKind::Solar]),
            min_capacity_mw: 10.0,
            max_capacity_mw: None,
            country: Some("IND".to_string()),
        };
        let json = serde_json::to_string(&f).unwrap();
        let back: FilterState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
