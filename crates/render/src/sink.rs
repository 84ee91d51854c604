use layers::{MarkerStyle, PopupPayload};

/// Opaque handle to a visual marker owned by the map widget.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

/// The map-widget boundary for marker mutation.
///
/// The reconciler drives this; implementations adapt it to the host widget's
/// layer API. `commit` is a batch replacement: the layer afterwards contains
/// exactly the handles passed, in that order. Intermediate per-marker states
/// never repaint.
pub trait MarkerSink {
    /// Position is `(latitude, longitude)`.
    fn create(&mut self, position: (f64, f64), style: MarkerStyle, popup: PopupPayload)
    -> MarkerId;

    fn set_radius(&mut self, id: MarkerId, radius: f64);

    fn commit(&mut self, active: &[MarkerId]);

    /// The marker was evicted from the cache and will not be reused.
    fn retire(&mut self, id: MarkerId);
}
