use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tcgs_profiler::{Color, Profiler, RegionBackend, SpanBackend, SpanHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Start { id: u64, name: String, color: Color },
    End(u64),
}

/// Range-style backend that records every start and end
#[derive(Default)]
struct RecordingBackend {
    next_id: AtomicU64,
    events: Mutex<Vec<Event>>,
}

impl RecordingBackend {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl SpanBackend for RecordingBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn start(&self, name: &str, color: Color) -> Option<SpanHandle> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 100;
        self.events.lock().unwrap().push(Event::Start {
            id,
            name: name.to_string(),
            color,
        });
        Some(SpanHandle::Range(id))
    }

    fn end(&self, handle: SpanHandle) {
        if let SpanHandle::Range(id) = handle {
            self.events.lock().unwrap().push(Event::End(id));
        }
    }
}

fn recording_profiler() -> (Arc<RecordingBackend>, Profiler) {
    let backend = Arc::new(RecordingBackend::default());
    let profiler = Profiler::with_backend(backend.clone());
    (backend, profiler)
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("rasterization failed at tile {0}")]
struct TileError(u32);

#[test]
fn test_scope_closes_the_handle_it_opened() {
    let (backend, profiler) = recording_profiler();
    {
        let scope = profiler.scope("render_frame", "green");
        assert!(scope.is_recording());
    }

    assert_eq!(
        backend.events(),
        vec![
            Event::Start {
                id: 100,
                name: "render_frame".to_string(),
                color: Color::Green
            },
            Event::End(100),
        ]
    );
}

#[test]
fn test_unknown_color_tag_uses_default() {
    let (backend, profiler) = recording_profiler();
    drop(profiler.scope("sort", "chartreuse"));

    match &backend.events()[0] {
        Event::Start { color, .. } => assert_eq!(*color, Color::Blue),
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_error_propagation_closes_span() {
    let (backend, profiler) = recording_profiler();

    fn rasterize_tile(tile: u32) -> Result<u32, TileError> {
        Err(TileError(tile))
    }

    fn forward(profiler: &Profiler) -> Result<u32, TileError> {
        let _scope = profiler.scope("forward", Color::Red);
        let rendered = rasterize_tile(7)?;
        Ok(rendered + 1)
    }

    let err = forward(&profiler).unwrap_err();
    assert_eq!(err, TileError(7));
    assert_eq!(backend.events().last(), Some(&Event::End(100)));
}

#[test]
fn test_panic_closes_span() {
    let (backend, profiler) = recording_profiler();

    let result = catch_unwind(AssertUnwindSafe(|| {
        profiler.run("backward", "purple", || panic!("gradient overflow"))
    }));

    assert!(result.is_err());
    assert_eq!(backend.events().len(), 2);
    assert_eq!(backend.events()[1], Event::End(100));
}

#[test]
fn test_nested_scopes_close_in_reverse_order() {
    let (backend, profiler) = recording_profiler();
    {
        let _outer = profiler.scope("frame", "blue");
        let _inner = profiler.scope("binning", "cyan");
    }

    let ends: Vec<_> = backend
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::End(id) => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(ends, vec![101, 100]);
}

#[test]
fn test_run_preserves_result_and_error() {
    let (backend, profiler) = recording_profiler();

    let ok: Result<u32, TileError> = profiler.run("ok", "yellow", || Ok(42));
    assert_eq!(ok, Ok(42));

    let err: anyhow::Result<()> =
        profiler.run("err", "yellow", || Err(TileError(3).into()));
    let err = err.unwrap_err();
    assert_eq!(err.to_string(), "rasterization failed at tile 3");
    assert_eq!(err.downcast_ref::<TileError>(), Some(&TileError(3)));

    assert_eq!(backend.events().len(), 4);
}

#[test]
fn test_wrapped_function_keeps_signature_and_errors() {
    let (backend, profiler) = recording_profiler();
    let checked_div = profiler.wrap("div", "red", |(a, b): (u32, u32)| {
        if b == 0 {
            Err(TileError(a))
        } else {
            Ok(a / b)
        }
    });

    assert_eq!(checked_div((9, 3)), Ok(3));
    assert_eq!(checked_div((5, 0)), Err(TileError(5)));
    assert_eq!(
        checked_div((5, 0)).unwrap_err().to_string(),
        "rasterization failed at tile 5"
    );
    // Three calls, each opened and closed once
    assert_eq!(backend.events().len(), 6);
}

#[test]
fn test_disabled_profiler_does_not_change_results() {
    let profiler = Profiler::disabled();
    assert_eq!(profiler.run("noop", "cyan", || "value"), "value");
}

#[test]
fn test_region_backend_enters_tracing_span() {
    let subscriber = tracing_subscriber::registry();
    tracing::subscriber::with_default(subscriber, || {
        let profiler = Profiler::with_backend(Arc::new(RegionBackend));
        assert_eq!(profiler.backend_name(), "tracing");

        {
            let scope = profiler.scope("densify", "green");
            assert!(scope.is_recording());
            let current = tracing::Span::current();
            assert_eq!(current.metadata().map(|m| m.name()), Some("region"));
        }

        assert!(tracing::Span::current().is_none());
    });
}
