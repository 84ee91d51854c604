use std::collections::BTreeMap;

use aggregate::{MarkerKey, VisibleSet};
use foundation::rng::SplitMix64;
use layers::{MarkerStyle, PopupPayload};
use model::{RecordStore, Theme};

use crate::sink::{MarkerId, MarkerSink};

/// Amortized cache cleanup policy.
///
/// Stale entries are only swept on a fraction of passes, so the cache may
/// grow between sweeps but shrinks in expectation. `probability = 1.0` turns
/// this into a deterministic always-sweep policy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SweepConfig {
    pub probability: f64,
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            probability: 0.1,
            seed: 0x77A7_7A41,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Markers committed to the layer this pass.
    pub committed: usize,
    /// Stale cache entries removed; zero on passes where the sweep did not run.
    pub swept: usize,
}

#[derive(Debug)]
struct CacheEntry {
    id: MarkerId,
    radius: f64,
    active: bool,
}

/// Diffs each visible set against the marker cache and narrates the result to
/// the sink as create/update/retire instructions plus one batch commit.
///
/// The cache is keyed by [`MarkerKey`] (rounded coordinates plus aggregation
/// mode), so distinct records that round together share one visual object.
/// Nothing else may mutate the cache.
#[derive(Debug)]
pub struct MarkerReconciler {
    cache: BTreeMap<MarkerKey, CacheEntry>,
    rng: SplitMix64,
    sweep_probability: f64,
}

impl MarkerReconciler {
    pub fn new(config: SweepConfig) -> Self {
        Self {
            cache: BTreeMap::new(),
            rng: SplitMix64::new(config.seed),
            sweep_probability: config.probability,
        }
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn reconcile<S: MarkerSink>(
        &mut self,
        visible: &VisibleSet,
        store: &RecordStore,
        theme: Theme,
        sink: &mut S,
    ) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        let mut active_ids: Vec<MarkerId> = Vec::with_capacity(visible.len());

        for entry in self.cache.values_mut() {
            entry.active = false;
        }

        for item in visible {
            if let Some(cached) = self.cache.get_mut(&item.key) {
                if cached.active {
                    // A key collision within this pass; the first occurrence
                    // already owns the visual object.
                    continue;
                }
                if cached.radius != item.radius {
                    sink.set_radius(cached.id, item.radius);
                    cached.radius = item.radius;
                    summary.updated += 1;
                } else {
                    summary.unchanged += 1;
                }
                cached.active = true;
                active_ids.push(cached.id);
                continue;
            }

            let Some(record) = store.get(item.record) else {
                continue;
            };
            let (fill, popup) = match &item.cluster {
                Some(cluster) => (
                    cluster.dominant_fuel.color(),
                    PopupPayload::cluster(
                        cluster.member_count,
                        cluster.total_capacity_mw,
                        cluster.dominant_fuel,
                    ),
                ),
                None => (record.color, PopupPayload::facility(record)),
            };
            let style = MarkerStyle::new(fill, item.radius, theme);
            let id = sink.create((record.latitude, record.longitude), style, popup);
            self.cache.insert(
                item.key.clone(),
                CacheEntry {
                    id,
                    radius: item.radius,
                    active: true,
                },
            );
            summary.created += 1;
            active_ids.push(id);
        }

        sink.commit(&active_ids);
        summary.committed = active_ids.len();

        if self.rng.next_f64() < self.sweep_probability {
            let stale: Vec<MarkerKey> = self
                .cache
                .iter()
                .filter(|(_, e)| !e.active)
                .map(|(k, _)| k.clone())
                .collect();
            for key in stale {
                if let Some(entry) = self.cache.remove(&key) {
                    sink.retire(entry.id);
                    summary.swept += 1;
                }
            }
        }

        summary
    }
}

impl Default for MarkerReconciler {
    fn default() -> Self {
        Self::new(SweepConfig::default())
    }
}
