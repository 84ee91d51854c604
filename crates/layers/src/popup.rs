use model::{FacilityRecord, FuelKind};
use serde::Serialize;

const MAX_CAPACITY_BARS: u8 = 5;

/// Popup content for a single facility marker.
///
/// This is a payload handed to the host map widget, which owns the actual
/// popup DOM; everything here is plain data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityPopup {
    pub name: String,
    pub fuel_label: &'static str,
    pub fuel_icon: &'static str,
    pub fuel_description: &'static str,
    pub capacity_mw: f64,
    pub country: String,
    pub color_hex: String,
    /// 1..=5, log-scaled capacity indicator.
    pub capacity_bars: u8,
}

impl FacilityPopup {
    pub fn for_record(record: &FacilityRecord) -> Self {
        Self {
            name: record.name.clone(),
            fuel_label: record.fuel.label(),
            fuel_icon: record.fuel.icon(),
            fuel_description: record.fuel.description(),
            capacity_mw: record.capacity_mw,
            country: record.country.clone(),
            color_hex: record.fuel.color_hex(),
            capacity_bars: capacity_bars(record.capacity_mw),
        }
    }
}

/// Popup content for a grid-cell representative marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterPopup {
    pub member_count: u32,
    pub total_capacity_gw: f64,
    pub dominant_fuel: &'static str,
}

/// What a marker shows when clicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopupPayload {
    Facility(FacilityPopup),
    Cluster(ClusterPopup),
}

impl PopupPayload {
    pub fn facility(record: &FacilityRecord) -> Self {
        PopupPayload::Facility(FacilityPopup::for_record(record))
    }

    pub fn cluster(member_count: u32, total_capacity_mw: f64, dominant_fuel: FuelKind) -> Self {
        PopupPayload::Cluster(ClusterPopup {
            member_count,
            total_capacity_gw: total_capacity_mw / 1000.0,
            dominant_fuel: dominant_fuel.label(),
        })
    }
}

/// Log-scaled 1..=5 bar count: one bar below 10 MW, five at 1 GW and above.
fn capacity_bars(capacity_mw: f64) -> u8 {
    if capacity_mw <= 0.0 {
        return 1;
    }
    let bars = (capacity_mw.log10() / 0.6).ceil();
    (bars.max(1.0) as u8).min(MAX_CAPACITY_BARS)
}
