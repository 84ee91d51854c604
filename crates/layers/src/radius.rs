/// Marker radius model: logarithmic in capacity, stepped by zoom.
///
/// Total over all inputs: unknown capacity (<= 0) gets the minimum radius,
/// and capacities above the 10 GW normalization point keep growing linearly
/// in log-space rather than clamping.
pub const MIN_RADIUS: f64 = 1.5;
pub const MAX_RADIUS: f64 = 8.0;

/// Capacity at which the normalized log scale reaches 1.0.
const SATURATION_MW: f64 = 10_000.0;

/// Zoom step table; buckets are inclusive on their upper end.
pub fn zoom_factor(zoom: f64) -> f64 {
    if zoom <= 2.0 {
        0.6
    } else if zoom <= 3.0 {
        0.8
    } else if zoom <= 5.0 {
        1.0
    } else if zoom <= 7.0 {
        1.2
    } else {
        1.5
    }
}

pub fn radius(capacity_mw: f64, zoom: f64) -> f64 {
    let base = if capacity_mw <= 0.0 {
        MIN_RADIUS
    } else {
        let log_capacity = capacity_mw.max(1.0).log10();
        let normalized = log_capacity / SATURATION_MW.log10();
        MIN_RADIUS + normalized * (MAX_RADIUS - MIN_RADIUS)
    };
    base * zoom_factor(zoom)
}
