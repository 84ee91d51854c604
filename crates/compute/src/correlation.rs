use std::collections::{BTreeMap, HashMap};

use foundation::grid::CellIndex;
use model::{FilterState, FuelKind, RecordStore};
use serde::Serialize;

use crate::light::LightField;

/// Per-cell variable available for correlation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellMetric {
    TotalCapacity,
    PlantCount,
    LightIntensity,
}

/// One grid cell's contribution to a correlation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPoint {
    pub x: f64,
    pub y: f64,
    /// Cell center.
    pub latitude: f64,
    pub longitude: f64,
    pub member_count: u32,
    pub total_capacity_mw: f64,
    pub light_intensity: f64,
    pub dominant_fuel: FuelKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationReport {
    /// Pearson sample correlation coefficient; 0 when either variable is
    /// degenerate.
    pub r: f64,
    pub sample_size: usize,
    pub points: Vec<CorrelationPoint>,
}

struct CellAccum {
    cell: CellIndex,
    member_count: u32,
    total_capacity_mw: f64,
    fuel_histogram: BTreeMap<FuelKind, u32>,
}

/// Correlate two per-cell metrics over the filtered dataset.
///
/// Facilities aggregate into `cell_degrees` cells; the light field is sampled
/// at each cell's center. Cell order follows first encounter in store order,
/// so reports are reproducible.
pub fn correlate(
    store: &RecordStore,
    filters: &FilterState,
    light: &LightField,
    cell_degrees: f64,
    x: CellMetric,
    y: CellMetric,
) -> CorrelationReport {
    let mut order: Vec<CellAccum> = Vec::new();
    let mut index: HashMap<CellIndex, usize> = HashMap::new();

    for (_, record) in store.iter() {
        if !filters.matches(record) {
            continue;
        }
        let cell = CellIndex::at(record.latitude, record.longitude, cell_degrees);
        let slot = match index.get(&cell) {
            Some(&slot) => slot,
            None => {
                index.insert(cell, order.len());
                order.push(CellAccum {
                    cell,
                    member_count: 0,
                    total_capacity_mw: 0.0,
                    fuel_histogram: BTreeMap::new(),
                });
                order.len() - 1
            }
        };
        let accum = &mut order[slot];
        accum.member_count += 1;
        accum.total_capacity_mw += record.capacity_mw;
        *accum.fuel_histogram.entry(record.fuel).or_insert(0) += 1;
    }

    let points: Vec<CorrelationPoint> = order
        .into_iter()
        .map(|accum| {
            let (latitude, longitude) = accum.cell.center(cell_degrees);
            let light_intensity = light.sample(latitude, longitude);
            let value = |metric: CellMetric| match metric {
                CellMetric::TotalCapacity => accum.total_capacity_mw,
                CellMetric::PlantCount => accum.member_count as f64,
                CellMetric::LightIntensity => light_intensity,
            };
            CorrelationPoint {
                x: value(x),
                y: value(y),
                latitude,
                longitude,
                member_count: accum.member_count,
                total_capacity_mw: accum.total_capacity_mw,
                light_intensity,
                dominant_fuel: model::dominant_fuel(&accum.fuel_histogram)
                    .unwrap_or(FuelKind::Other),
            }
        })
        .collect();

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

    CorrelationReport {
        r: pearson(&xs, &ys),
        sample_size: points.len(),
        points,
    }
}

/// Pearson sample correlation; 0 for mismatched, empty or zero-variance
/// inputs rather than an error, since callers plot whatever they get.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.is_empty() {
        return 0.0;
    }
    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut x_variance = 0.0;
    let mut y_variance = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        covariance += dx * dy;
        x_variance += dx * dx;
        y_variance += dy * dy;
    }

    if x_variance == 0.0 || y_variance == 0.0 {
        return 0.0;
    }
    covariance / (x_variance * y_variance).sqrt()
}
