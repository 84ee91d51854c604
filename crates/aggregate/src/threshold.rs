use layers::radius;
use model::{FilterState, RecordStore};

use crate::visible::{MarkerKey, VisibleEntry, VisibleSet};

/// Minimum capacity (MW) for direct display at a zoom level.
///
/// Monotone non-increasing in zoom: zooming in never raises the bar.
pub fn capacity_threshold(zoom: f64) -> f64 {
    if zoom <= 2.0 {
        1000.0
    } else if zoom <= 3.0 {
        500.0
    } else if zoom <= 4.0 {
        200.0
    } else if zoom <= 5.0 {
        100.0
    } else if zoom <= 6.0 {
        50.0
    } else {
        0.0
    }
}

/// Direct (non-aggregated) selection, used above the grid-mode zoom range.
///
/// Pure: output order is store order, keys are `direct:` coordinate keys, and
/// each record's radius comes from its own capacity.
pub fn select(store: &RecordStore, zoom: f64, filters: &FilterState) -> VisibleSet {
    let threshold = capacity_threshold(zoom);
    let mut out = VisibleSet::new();

    for (id, record) in store.iter() {
        if record.capacity_mw < threshold {
            continue;
        }
        if !filters.matches(record) {
            continue;
        }
        out.push(VisibleEntry {
            record: id,
            radius: radius::radius(record.capacity_mw, zoom),
            key: MarkerKey::direct(record.latitude, record.longitude),
            cluster: None,
        });
    }

    out
}
