//! Benchmarks for the show/dispatch/close hot path.

use criterion::{Criterion, criterion_group, criterion_main};
use scrim::config::{FooterButton, ModalConfig};
use scrim::modal::Modal;
use scrim_core::event::{Event, KeyCode, KeyEvent, PointerEvent, PointerKind, TransitionEvent};
use scrim_core::host::RecordingDocument;
use std::hint::black_box;

fn bench_full_cycle(c: &mut Criterion) {
    c.bench_function("modal_full_cycle", |b| {
        b.iter(|| {
            let config = ModalConfig::new()
                .title("bench")
                .footer_button(FooterButton::new("OK"));
            let mut modal = Modal::new(config, RecordingDocument::new()).unwrap();
            let root = modal.with_host(|h| h.modal_root());

            modal.show();
            modal.handle_event(&Event::Key(KeyEvent::new(KeyCode::Escape)));
            modal.handle_event(&Event::TransitionEnd(TransitionEvent::new(root)));
            black_box(modal.phase())
        });
    });
}

fn bench_ignored_dispatch(c: &mut Criterion) {
    let mut modal = Modal::new(ModalConfig::new(), RecordingDocument::new()).unwrap();
    let inside = modal.with_host_mut(|h| h.inside_node());
    modal.show();
    let event = Event::Pointer(PointerEvent::new(PointerKind::Click, inside));

    c.bench_function("modal_inside_click_dispatch", |b| {
        b.iter(|| black_box(modal.handle_event(black_box(&event))));
    });
}

criterion_group!(benches, bench_full_cycle, bench_ignored_dispatch);
criterion_main!(benches);
