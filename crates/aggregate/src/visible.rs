use model::{FuelKind, RecordId};

/// Identity of a reusable visual marker.
///
/// Derived from rounded coordinates plus the aggregation mode, NOT from record
/// identity: two records rounding to the same 3-decimal coordinate share one
/// visual object. That collision merges facilities within ~0.001 degrees and
/// is accepted behavior, not a defect.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerKey(String);

impl MarkerKey {
    pub fn direct(latitude: f64, longitude: f64) -> Self {
        Self(format!("direct:{latitude:.3}:{longitude:.3}"))
    }

    pub fn grid(latitude: f64, longitude: f64) -> Self {
        Self(format!("grid:{latitude:.3}:{longitude:.3}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aggregate facts about a grid cell, attached to its representative's entry
/// so the renderer can build a cluster popup without re-deriving them.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterInfo {
    pub member_count: u32,
    pub total_capacity_mw: f64,
    pub dominant_fuel: FuelKind,
}

/// One marker to render this pass.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleEntry {
    pub record: RecordId,
    pub radius: f64,
    pub key: MarkerKey,
    /// Present for grid-mode entries only.
    pub cluster: Option<ClusterInfo>,
}

/// Output of one aggregation/filter pass, consumed immediately by the
/// reconciler. Order is part of the contract: identical inputs must produce
/// identical sequences.
pub type VisibleSet = Vec<VisibleEntry>;

#[cfg(test)]
mod tests {
    use super::MarkerKey;

    #[test]
    fn keys_round_to_three_decimals() {
        assert_eq!(MarkerKey::direct(10.0, 20.0).as_str(), "direct:10.000:20.000");
        assert_eq!(
            MarkerKey::grid(-25.40849, -54.58891).as_str(),
            "grid:-25.408:-54.589"
        );
    }

    #[test]
    fn mode_tag_separates_otherwise_equal_keys() {
        assert_ne!(MarkerKey::direct(1.0, 1.0), MarkerKey::grid(1.0, 1.0));
    }

    #[test]
    fn nearby_coordinates_collide_by_design() {
        assert_eq!(
            MarkerKey::direct(10.00009, 20.0),
            MarkerKey::direct(10.00011, 20.0)
        );
    }
}
