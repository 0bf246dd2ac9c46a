//! GPU profiling spans
//!
//! Emits a named, colored span around a piece of work using whichever
//! instrumentation backend is installed: NVTX ranges (visible in Nsight
//! Systems) when the NVTX library can be loaded, otherwise `tracing`
//! regions when a subscriber is installed, otherwise nothing at all.
//!
//! ```no_run
//! use tcgs_profiler::{mark_phase, profile_scope, Color, Profiler};
//!
//! fn render_frame() {
//!     profile_scope!("render_frame", Color::Green);
//!     // ...
//! }
//!
//! let loss = mark_phase("loss", "red", || 0.25_f32);
//! let _guard = Profiler::global().scope("densify", "purple");
//! ```

pub mod backend;
pub mod context;
#[cfg(feature = "nvtx")]
pub mod nvtx;
pub mod region;

pub use backend::{NullBackend, SpanBackend, SpanHandle};
pub use context::{first_available, mark_phase, Profiler, ProfilingContext};
pub use region::RegionBackend;
pub use tcgs_shared::Color;

#[cfg(feature = "nvtx")]
pub use nvtx::NvtxBackend;
