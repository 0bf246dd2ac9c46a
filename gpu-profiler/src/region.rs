//! Generic recording regions on top of `tracing`

use tcgs_shared::Color;
use tracing::debug;

use crate::backend::{SpanBackend, SpanHandle};

/// Records each scope as an `INFO` span named `region`.
///
/// The color has no effect on the region and is only recorded as a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionBackend;

impl RegionBackend {
    /// Regions are only recorded once a global subscriber is installed
    pub fn is_available() -> bool {
        tracing::dispatcher::has_been_set()
    }
}

impl SpanBackend for RegionBackend {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn start(&self, name: &str, color: Color) -> Option<SpanHandle> {
        let span = tracing::info_span!("region", phase = name, color = color.name());
        Some(SpanHandle::Region(span.entered()))
    }

    fn end(&self, handle: SpanHandle) {
        match handle {
            // Dropping the guard exits and closes the span.
            SpanHandle::Region(entered) => drop(entered),
            SpanHandle::Range(id) => debug!("region backend got foreign range {}", id),
        }
    }
}
