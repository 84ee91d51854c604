use std::collections::{BTreeMap, HashMap};

use foundation::grid::CellIndex;
use layers::radius;
use model::{FilterState, FuelKind, RecordId, RecordStore};

use crate::visible::{ClusterInfo, MarkerKey, VisibleEntry, VisibleSet};

/// Grid resolution in degrees; coarser when zoomed further out.
pub fn cell_degrees(zoom: f64) -> f64 {
    if zoom <= 2.0 { 8.0 } else { 5.0 }
}

/// Capacity pre-filter applied before clustering, so tiny plants cannot
/// become cell representatives at global zoom.
fn prefilter_mw(zoom: f64) -> f64 {
    if zoom <= 2.0 { 500.0 } else { 200.0 }
}

/// One populated cell of the aggregation grid. Ephemeral: rebuilt from
/// scratch every pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub cell: CellIndex,
    /// Highest-capacity member; strictly-greater comparison, so the first
    /// record seen wins capacity ties.
    pub representative: RecordId,
    pub representative_capacity_mw: f64,
    pub member_count: u32,
    pub total_capacity_mw: f64,
    pub fuel_histogram: BTreeMap<FuelKind, u32>,
}

impl GridCell {
    fn new(cell: CellIndex, id: RecordId, capacity_mw: f64, fuel: FuelKind) -> Self {
        Self {
            cell,
            representative: id,
            representative_capacity_mw: capacity_mw,
            member_count: 1,
            total_capacity_mw: capacity_mw,
            fuel_histogram: BTreeMap::from([(fuel, 1)]),
        }
    }

    fn fold(&mut self, id: RecordId, capacity_mw: f64, fuel: FuelKind) {
        self.member_count += 1;
        self.total_capacity_mw += capacity_mw;
        *self.fuel_histogram.entry(fuel).or_insert(0) += 1;
        if capacity_mw > self.representative_capacity_mw {
            self.representative = id;
            self.representative_capacity_mw = capacity_mw;
        }
    }

    pub fn dominant_fuel(&self) -> FuelKind {
        model::dominant_fuel(&self.fuel_histogram).unwrap_or(FuelKind::Other)
    }
}

/// Partition eligible records into coarse cells.
///
/// Cells are returned in the order their first member was encountered, which
/// makes the result a pure function of store order, zoom and filters.
pub fn aggregate_cells(store: &RecordStore, zoom: f64, filters: &FilterState) -> Vec<GridCell> {
    let degrees = cell_degrees(zoom);
    let prefilter = prefilter_mw(zoom);

    let mut order: Vec<GridCell> = Vec::new();
    let mut index: HashMap<CellIndex, usize> = HashMap::new();

    for (id, record) in store.iter() {
        if record.capacity_mw < prefilter {
            continue;
        }
        if !filters.matches(record) {
            continue;
        }
        let cell = CellIndex::at(record.latitude, record.longitude, degrees);
        match index.get(&cell) {
            Some(&slot) => order[slot].fold(id, record.capacity_mw, record.fuel),
            None => {
                index.insert(cell, order.len());
                order.push(GridCell::new(cell, id, record.capacity_mw, record.fuel));
            }
        }
    }

    order
}

/// Grid-mode visible set: one entry per populated cell, positioned at the
/// representative and sized by the representative's capacity.
pub fn aggregate(store: &RecordStore, zoom: f64, filters: &FilterState) -> VisibleSet {
    aggregate_cells(store, zoom, filters)
        .into_iter()
        .filter_map(|cell| {
            let record = store.get(cell.representative)?;
            Some(VisibleEntry {
                record: cell.representative,
                radius: radius::radius(cell.representative_capacity_mw, zoom),
                key: MarkerKey::grid(record.latitude, record.longitude),
                cluster: Some(ClusterInfo {
                    member_count: cell.member_count,
                    total_capacity_mw: cell.total_capacity_mw,
                    dominant_fuel: cell.dominant_fuel(),
                }),
            })
        })
        .collect()
}
