use foundation::geo::GeoBounds;

/// Snapshot of the map view when an event fired.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub bounds: GeoBounds,
}

impl Viewport {
    pub fn new(zoom: f64, bounds: GeoBounds) -> Self {
        Self { zoom, bounds }
    }
}

/// Notifications forwarded from the map widget.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewportEvent {
    PanEnd,
    ZoomEnd,
    /// A zoom animation frame started; pending work is stale.
    ZoomAnimStart,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Scheduled,
    Rendering,
}

/// What the scheduler did with an incoming event, for tracing and tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventDisposition {
    Scheduled,
    /// Dropped: a pass for nearly this zoom level is already in flight.
    DroppedSmallZoomDelta,
    CancelledPending,
    NoOp,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Delay before a (re)scheduled pass fires; rapid events keep pushing it.
    pub debounce_ms: u64,
    /// While rendering, events within this zoom delta of the in-flight pass
    /// are dropped instead of rescheduled.
    pub min_zoom_delta: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            min_zoom_delta: 1.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Pending {
    deadline_ms: u64,
    viewport: Viewport,
}

/// Debounce-with-coalescing gate in front of the aggregation pipeline.
///
/// Any number of viewport events within the debounce window collapse into one
/// pending pass carrying the latest viewport. At most one pass is ever in
/// flight; cancellation only ever prevents a pending pass from starting, it
/// never interrupts one that is committing.
#[derive(Debug)]
pub struct RenderScheduler {
    config: SchedulerConfig,
    pending: Option<Pending>,
    rendering_zoom: Option<f64>,
}

impl RenderScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            pending: None,
            rendering_zoom: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        if self.rendering_zoom.is_some() {
            SchedulerState::Rendering
        } else if self.pending.is_some() {
            SchedulerState::Scheduled
        } else {
            SchedulerState::Idle
        }
    }

    pub fn on_event(
        &mut self,
        event: ViewportEvent,
        viewport: Viewport,
        now_ms: u64,
    ) -> EventDisposition {
        match event {
            ViewportEvent::ZoomAnimStart => {
                if self.pending.take().is_some() {
                    EventDisposition::CancelledPending
                } else {
                    EventDisposition::NoOp
                }
            }
            ViewportEvent::PanEnd | ViewportEvent::ZoomEnd => {
                if let Some(rendering_zoom) = self.rendering_zoom {
                    if (viewport.zoom - rendering_zoom).abs() < self.config.min_zoom_delta {
                        return EventDisposition::DroppedSmallZoomDelta;
                    }
                }
                self.schedule(viewport, now_ms);
                EventDisposition::Scheduled
            }
        }
    }

    /// Arm (or re-arm) the debounce deadline, replacing any pending viewport.
    /// Bypasses the small-zoom-delta guard; filter changes use this directly.
    pub fn schedule(&mut self, viewport: Viewport, now_ms: u64) {
        self.pending = Some(Pending {
            deadline_ms: now_ms + self.config.debounce_ms,
            viewport,
        });
    }

    /// Start the pending pass if its deadline has been reached.
    ///
    /// Returns the snapshot viewport to render for. The caller must call
    /// [`complete_pass`](Self::complete_pass) once side effects are applied.
    pub fn begin_pass(&mut self, now_ms: u64) -> Option<Viewport> {
        if self.rendering_zoom.is_some() {
            return None;
        }
        match self.pending {
            Some(pending) if now_ms >= pending.deadline_ms => {
                self.pending = None;
                self.rendering_zoom = Some(pending.viewport.zoom);
                Some(pending.viewport)
            }
            _ => None,
        }
    }

    pub fn complete_pass(&mut self) {
        self.rendering_zoom = None;
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}
