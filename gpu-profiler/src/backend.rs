//! Instrumentation backends
//!
//! A backend opens a span on entry and closes it on exit. Spans are
//! identified by the [`SpanHandle`] returned from [`SpanBackend::start`];
//! a backend that opens nothing returns `None` and is never asked to close.

use tcgs_shared::Color;

/// Handle of an open span, owned by the scope that opened it
#[derive(Debug)]
pub enum SpanHandle {
    /// Range id returned by a range-style backend
    Range(u64),
    /// Entered `tracing` span
    Region(tracing::span::EnteredSpan),
}

/// Span backend interface
pub trait SpanBackend: Send + Sync {
    /// Backend name, for diagnostics
    fn name(&self) -> &'static str;

    /// Open a span
    fn start(&self, name: &str, color: Color) -> Option<SpanHandle>;

    /// Close a span previously opened by this backend
    fn end(&self, handle: SpanHandle);
}

/// Backend that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl SpanBackend for NullBackend {
    fn name(&self) -> &'static str {
        "none"
    }

    fn start(&self, _name: &str, _color: Color) -> Option<SpanHandle> {
        None
    }

    fn end(&self, _handle: SpanHandle) {}
}
