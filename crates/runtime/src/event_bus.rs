/// Minimal event type for traceability.
///
/// Pass-scoped structured text: load summaries, per-pass marker counts,
/// sweep results. The host drains these for its console/diagnostics surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub pass_index: u64,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, pass_index: u64, kind: &'static str, message: impl Into<String>) {
        self.events.push(Event {
            pass_index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;

    #[test]
    fn records_events_with_pass_index() {
        let mut bus = EventBus::new();
        bus.emit(2, "test", "hello");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].pass_index, 2);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(0, "k", "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }
}
