// Path: crates/telemetry/src/time.rs
use crate::sinks::ChangeoverMetricsSink;
use std::time::Instant;

/// Observes the lifetime of a retrieval scope into the changeover sink on drop.
pub struct Timer<'a> {
    sink: &'a dyn ChangeoverMetricsSink,
    start: Instant,
}

impl<'a> Timer<'a> {
    pub fn new(sink: &'a dyn ChangeoverMetricsSink) -> Self {
        Self {
            sink,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_retrieve_duration(self.start.elapsed().as_secs_f64());
    }
}
