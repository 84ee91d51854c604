use aggregate::VisibleSet;
use ingest::{DatasetError, IngestReport};
use model::{FilterState, RecordStore, Theme};
use render::{MarkerReconciler, MarkerSink, ReconcileSummary, SweepConfig};

use crate::event_bus::{Event, EventBus};
use crate::scheduler::{EventDisposition, RenderScheduler, SchedulerConfig, Viewport, ViewportEvent};

/// Cutover zoom: at or below this the grid aggregator runs, above it the
/// threshold filter.
const GRID_MODE_MAX_ZOOM: f64 = 3.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PassMode {
    Grid,
    Direct,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PassSummary {
    pub pass_index: u64,
    pub zoom: f64,
    pub mode: PassMode,
    pub visible: usize,
    pub reconcile: ReconcileSummary,
}

/// The pipeline context: every piece of state the render path touches, under
/// one owner.
///
/// Dataset, filters, theme, marker cache and scheduler all live here, not in
/// globals, so two pipelines can coexist and tests can drive one with
/// synthetic events. A pass reads a snapshot of the filters taken when it
/// fires; replacing filters mid-flight affects the next pass only.
#[derive(Debug)]
pub struct MapPipeline<S: MarkerSink> {
    store: RecordStore,
    filters: FilterState,
    theme: Theme,
    reconciler: MarkerReconciler,
    scheduler: RenderScheduler,
    sink: S,
    bus: EventBus,
    passes_completed: u64,
    loaded: bool,
}

impl<S: MarkerSink> MapPipeline<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, SchedulerConfig::default(), SweepConfig::default())
    }

    pub fn with_config(sink: S, scheduler: SchedulerConfig, sweep: SweepConfig) -> Self {
        Self {
            store: RecordStore::new(),
            filters: FilterState::default(),
            theme: Theme::default(),
            reconciler: MarkerReconciler::new(sweep),
            scheduler: RenderScheduler::new(scheduler),
            sink,
            bus: EventBus::new(),
            passes_completed: 0,
            loaded: false,
        }
    }

    /// Parse and install a dataset, replacing any previous one wholesale.
    ///
    /// On error nothing is installed and no pass will run until a load
    /// succeeds; the error message is suitable for surfacing to the user.
    pub fn load_dataset(&mut self, csv: &str) -> Result<IngestReport, DatasetError> {
        match ingest::load_records(csv) {
            Ok((store, report)) => {
                self.store = store;
                self.loaded = true;
                self.bus.emit(
                    self.passes_completed,
                    "load",
                    format!(
                        "loaded {} facilities ({} rows dropped for coordinates, {} short, {} capacities defaulted)",
                        report.rows_kept,
                        report.dropped_bad_coordinates,
                        report.dropped_short_rows,
                        report.defaulted_capacity
                    ),
                );
                Ok(report)
            }
            Err(err) => {
                self.bus
                    .emit(self.passes_completed, "load-error", err.to_string());
                Err(err)
            }
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Applies to markers created from now on; cached markers keep the style
    /// they were created with until they are evicted and recreated.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn events(&self) -> &[Event] {
        self.bus.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.bus.drain()
    }

    /// Atomically replace the filter state and schedule one render pass.
    pub fn apply_filters(&mut self, filters: FilterState, viewport: Viewport, now_ms: u64) {
        self.filters = filters;
        self.scheduler.schedule(viewport, now_ms);
    }

    pub fn on_viewport_event(
        &mut self,
        event: ViewportEvent,
        viewport: Viewport,
        now_ms: u64,
    ) -> EventDisposition {
        self.scheduler.on_event(event, viewport, now_ms)
    }

    /// Drive the scheduler: runs one full aggregation + reconciliation pass
    /// if a scheduled one is due, synchronously, and returns its summary.
    ///
    /// Inert until a dataset has loaded successfully.
    pub fn tick(&mut self, now_ms: u64) -> Option<PassSummary> {
        if !self.loaded {
            return None;
        }
        let viewport = self.scheduler.begin_pass(now_ms)?;
        let filters = self.filters.clone();

        let (mode, visible): (PassMode, VisibleSet) = if viewport.zoom <= GRID_MODE_MAX_ZOOM {
            (
                PassMode::Grid,
                aggregate::aggregate(&self.store, viewport.zoom, &filters),
            )
        } else {
            (
                PassMode::Direct,
                aggregate::select(&self.store, viewport.zoom, &filters),
            )
        };

        let reconcile =
            self.reconciler
                .reconcile(&visible, &self.store, self.theme, &mut self.sink);
        self.scheduler.complete_pass();

        let summary = PassSummary {
            pass_index: self.passes_completed,
            zoom: viewport.zoom,
            mode,
            visible: visible.len(),
            reconcile,
        };
        self.bus.emit(
            summary.pass_index,
            "render",
            format!(
                "showing {} markers at zoom {:.1} ({})",
                summary.visible,
                summary.zoom,
                match mode {
                    PassMode::Grid => "grid representatives",
                    PassMode::Direct => "direct",
                }
            ),
        );
        if reconcile.swept > 0 {
            self.bus.emit(
                summary.pass_index,
                "sweep",
                format!("evicted {} stale cached markers", reconcile.swept),
            );
        }
        self.passes_completed += 1;
        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use foundation::geo::GeoBounds;
    use layers::{MarkerStyle, PopupPayload};
    use model::{FilterState, FuelKind};
    use render::{MarkerId, MarkerSink, SweepConfig};

    use super::{MapPipeline, PassMode};
    use crate::scheduler::{SchedulerConfig, Viewport, ViewportEvent};

    #[derive(Debug, Default)]
    struct TestSink {
        next_id: u64,
        created: Vec<(MarkerId, (f64, f64))>,
        radius_updates: Vec<(MarkerId, f64)>,
        commits: Vec<Vec<MarkerId>>,
        retired: Vec<MarkerId>,
    }

    impl MarkerSink for TestSink {
        fn create(
            &mut self,
            position: (f64, f64),
            _style: MarkerStyle,
            _popup: PopupPayload,
        ) -> MarkerId {
            let id = MarkerId(self.next_id);
            self.next_id += 1;
            self.created.push((id, position));
            id
        }

        fn set_radius(&mut self, id: MarkerId, radius: f64) {
            self.radius_updates.push((id, radius));
        }

        fn commit(&mut self, active: &[MarkerId]) {
            self.commits.push(active.to_vec());
        }

        fn retire(&mut self, id: MarkerId) {
            self.retired.push(id);
        }
    }

    const CSV: &str = "\
country,name,capacity_mw,latitude,longitude,primary_fuel
BRA,Itaipu,14000,-25.4,-54.6,Hydro
USA,Palo Verde,3937,33.4,-112.9,Nuclear
USA,Small Wind,30,33.5,-112.8,Wind
FRA,Gravelines,5460,51.0,2.1,Nuclear
";

    fn view(zoom: f64) -> Viewport {
        Viewport::new(zoom, GeoBounds::world())
    }

    fn pipeline() -> MapPipeline<TestSink> {
        let mut p = MapPipeline::new(TestSink::default());
        p.load_dataset(CSV).unwrap();
        p
    }

    #[test]
    fn load_failure_keeps_pipeline_inert() {
        let mut p = MapPipeline::new(TestSink::default());
        assert!(p.load_dataset("name,latitude\nx,1\n").is_err());
        assert!(p.store().is_empty());
        p.on_viewport_event(ViewportEvent::ZoomEnd, view(5.0), 0);
        assert!(p.tick(1_000).is_none());
        assert!(p.sink().commits.is_empty());
        assert_eq!(p.events()[0].kind, "load-error");
    }

    #[test]
    fn tick_is_gated_by_the_debounce_deadline() {
        let mut p = pipeline();
        p.on_viewport_event(ViewportEvent::ZoomEnd, view(5.0), 0);
        assert!(p.tick(100).is_none());
        let summary = p.tick(150).expect("due");
        assert_eq!(summary.mode, PassMode::Direct);
        assert!(p.tick(151).is_none());
    }

    #[test]
    fn zoom_selects_grid_or_direct_mode() {
        let mut p = pipeline();
        p.on_viewport_event(ViewportEvent::ZoomEnd, view(2.0), 0);
        let low = p.tick(150).unwrap();
        assert_eq!(low.mode, PassMode::Grid);

        p.on_viewport_event(ViewportEvent::ZoomEnd, view(8.0), 200);
        let high = p.tick(350).unwrap();
        assert_eq!(high.mode, PassMode::Direct);
        // Zoom 8 has no capacity threshold: all four facilities display.
        assert_eq!(high.visible, 4);
    }

    #[test]
    fn grid_pass_declutters_shared_cells() {
        let mut p = pipeline();
        p.on_viewport_event(ViewportEvent::ZoomEnd, view(2.0), 0);
        let summary = p.tick(150).unwrap();
        // Palo Verde and Small Wind share a cell, but Small Wind is below the
        // 500 MW pre-filter anyway; three representatives remain.
        assert_eq!(summary.mode, PassMode::Grid);
        assert_eq!(summary.visible, 3);
        assert!(summary.visible < p.store().len());
    }

    #[test]
    fn apply_filters_triggers_one_scheduled_pass() {
        let mut p = pipeline();
        let filters = FilterState {
            fuels: std::collections::BTreeSet::from([FuelKind::Nuclear]),
            ..FilterState::default()
        };
        p.apply_filters(filters, view(8.0), 0);
        let summary = p.tick(150).unwrap();
        assert_eq!(summary.visible, 2);
    }

    #[test]
    fn committed_markers_reflect_the_latest_completed_pass() {
        let mut p = pipeline();
        p.on_viewport_event(ViewportEvent::ZoomEnd, view(8.0), 0);
        p.tick(150).unwrap();
        assert_eq!(p.sink().commits.last().unwrap().len(), 4);

        let filters = FilterState {
            country: Some("USA".to_string()),
            ..FilterState::default()
        };
        p.apply_filters(filters, view(8.0), 200);
        p.tick(350).unwrap();
        assert_eq!(p.sink().commits.last().unwrap().len(), 2);
    }

    #[test]
    fn markers_are_reused_across_consecutive_passes() {
        let mut p = MapPipeline::with_config(
            TestSink::default(),
            SchedulerConfig::default(),
            SweepConfig {
                probability: 0.0,
                seed: 1,
            },
        );
        p.load_dataset(CSV).unwrap();

        p.on_viewport_event(ViewportEvent::ZoomEnd, view(8.0), 0);
        p.tick(150).unwrap();
        let created_first = p.sink().created.len();

        // Same zoom bucket: same radii and keys, so nothing new is created
        // and no radius updates are emitted.
        p.on_viewport_event(ViewportEvent::PanEnd, view(8.0), 200);
        let summary = p.tick(350).unwrap();
        assert_eq!(summary.reconcile.created, 0);
        assert_eq!(summary.reconcile.unchanged, 4);
        assert_eq!(p.sink().created.len(), created_first);
        assert!(p.sink().radius_updates.is_empty());
    }

    #[test]
    fn pass_events_narrate_progress() {
        let mut p = pipeline();
        p.on_viewport_event(ViewportEvent::ZoomEnd, view(2.0), 0);
        p.tick(150).unwrap();
        let kinds: Vec<&str> = p.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec!["load", "render"]);
        assert!(p.events()[1].message.contains("grid representatives"));
    }
}
