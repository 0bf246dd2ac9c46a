//! Scoped profiling spans

use once_cell::sync::OnceCell;
use std::sync::Arc;
use tcgs_shared::Color;
use tracing::info;

use crate::backend::{NullBackend, SpanBackend, SpanHandle};
use crate::region::RegionBackend;

/// Pick the first available backend, falling back to [`NullBackend`].
///
/// Candidates are listed in priority order.
pub fn first_available(
    candidates: impl IntoIterator<Item = Option<Arc<dyn SpanBackend>>>,
) -> Arc<dyn SpanBackend> {
    candidates
        .into_iter()
        .flatten()
        .next()
        .unwrap_or_else(|| Arc::new(NullBackend))
}

/// Entry point for profiling spans
///
/// The backend is resolved once; every scope opened through the same
/// profiler uses it.
#[derive(Clone)]
pub struct Profiler {
    backend: Arc<dyn SpanBackend>,
}

static GLOBAL: OnceCell<Profiler> = OnceCell::new();

impl Profiler {
    /// Probe the installed backends: NVTX first, then `tracing` regions.
    pub fn detect() -> Self {
        #[cfg(feature = "nvtx")]
        let nvtx = crate::nvtx::NvtxBackend::load().map(|b| Arc::new(b) as Arc<dyn SpanBackend>);
        #[cfg(not(feature = "nvtx"))]
        let nvtx: Option<Arc<dyn SpanBackend>> = None;

        let region = RegionBackend::is_available()
            .then(|| Arc::new(RegionBackend) as Arc<dyn SpanBackend>);

        let profiler = Self {
            backend: first_available([nvtx, region]),
        };
        info!("Profiling backend: {}", profiler.backend_name());
        profiler
    }

    /// Profiler over an explicit backend
    pub fn with_backend(backend: Arc<dyn SpanBackend>) -> Self {
        Self { backend }
    }

    /// Profiler that never records anything
    pub fn disabled() -> Self {
        Self::with_backend(Arc::new(NullBackend))
    }

    /// Process-wide profiler, detected on first use
    pub fn global() -> &'static Profiler {
        GLOBAL.get_or_init(Self::detect)
    }

    /// Install the process-wide profiler. Returns `false` if one was already set.
    pub fn set_global(profiler: Profiler) -> bool {
        GLOBAL.set(profiler).is_ok()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Open a span that closes when the returned guard is dropped
    pub fn scope(&self, name: &str, color: impl Into<Color>) -> ProfilingContext<'_> {
        let color = color.into();
        let handle = self.backend.start(name, color);
        ProfilingContext {
            backend: self.backend.as_ref(),
            handle,
        }
    }

    /// Run `f` inside a span and return its result unchanged
    pub fn run<T>(&self, name: &str, color: impl Into<Color>, f: impl FnOnce() -> T) -> T {
        let _scope = self.scope(name, color);
        f()
    }

    /// Wrap `f` so every call runs inside a span
    pub fn wrap<'p, A, R, F>(
        &'p self,
        name: impl Into<String>,
        color: impl Into<Color>,
        f: F,
    ) -> impl Fn(A) -> R + 'p
    where
        F: Fn(A) -> R + 'p,
    {
        let name = name.into();
        let color = color.into();
        move |args| self.run(&name, color, || f(args))
    }
}

impl std::fmt::Debug for Profiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profiler")
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Guard for an open span
///
/// Dropping the guard closes exactly the span opened when it was created,
/// including during early returns and unwinding.
#[must_use = "the span closes as soon as the guard is dropped"]
pub struct ProfilingContext<'a> {
    backend: &'a dyn SpanBackend,
    handle: Option<SpanHandle>,
}

impl ProfilingContext<'_> {
    /// Whether a span was actually opened
    pub fn is_recording(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for ProfilingContext<'_> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.backend.end(handle);
        }
    }
}

/// Run `f` inside a span of the process-wide profiler
pub fn mark_phase<T>(name: &str, color: impl Into<Color>, f: impl FnOnce() -> T) -> T {
    Profiler::global().run(name, color, f)
}

/// Open a span on the process-wide profiler for the rest of the block
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_scope = $crate::Profiler::global().scope($name, $crate::Color::default());
    };
    ($name:expr, $color:expr) => {
        let _profile_scope = $crate::Profiler::global().scope($name, $color);
    };
}
