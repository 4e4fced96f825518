#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scrim::config::{ButtonKind, FooterButton, ModalConfig};
use scrim::lifecycle::ModalPhase;
use scrim::modal::Modal;
use scrim_core::event::{Event, KeyCode, KeyEvent, PointerEvent, PointerKind, TransitionEvent};
use scrim_core::host::RecordingDocument;

#[derive(Debug, Arbitrary)]
enum Step {
    Show,
    CloseApi,
    Escape,
    OutsideClick,
    InsideClick,
    RootTransitionEnd,
    StrayTransitionEnd,
    FooterButton(u8),
    ForceClose,
}

fuzz_target!(|steps: Vec<Step>| {
    let config = ModalConfig::new()
        .title("fuzz")
        .footer_button(FooterButton::new("OK"))
        .footer_button(FooterButton::new("Close").kind(ButtonKind::Close));
    let mut modal = Modal::new(config, RecordingDocument::new()).expect("valid config");

    let root = modal.with_host(|h| h.modal_root());
    let inside = modal.with_host_mut(|h| h.inside_node());
    let outside = modal.with_host_mut(|h| h.outside_node());

    for step in steps {
        match step {
            Step::Show => {
                modal.show();
            }
            Step::CloseApi => {
                modal.request_close(scrim::coordinator::CloseReason::Api);
            }
            Step::Escape => {
                modal.handle_event(&Event::Key(KeyEvent::new(KeyCode::Escape)));
            }
            Step::OutsideClick => {
                modal.handle_event(&Event::Pointer(PointerEvent::new(
                    PointerKind::Click,
                    outside,
                )));
            }
            Step::InsideClick => {
                modal.handle_event(&Event::Pointer(PointerEvent::new(
                    PointerKind::TouchEnd,
                    inside,
                )));
            }
            Step::RootTransitionEnd => {
                modal.handle_event(&Event::TransitionEnd(TransitionEvent::new(root)));
            }
            Step::StrayTransitionEnd => {
                modal.handle_event(&Event::TransitionEnd(TransitionEvent::new(outside)));
            }
            Step::FooterButton(index) => {
                modal.activate_footer_button(index as usize);
            }
            Step::ForceClose => {
                modal.force_close();
            }
        }

        // Post-conditions that must always hold:
        let phase = modal.phase();
        assert_ne!(phase, ModalPhase::Opening, "transient phase escaped");
        match phase {
            ModalPhase::Open => assert_eq!(modal.active_listeners(), 4),
            ModalPhase::Closing => assert_eq!(modal.active_listeners(), 1),
            ModalPhase::Closed => {
                assert_eq!(modal.active_listeners(), 0);
                assert!(!modal.with_host(|h| h.overlay_is_attached()));
            }
            ModalPhase::Opening => unreachable!(),
        }
        assert_eq!(
            modal.with_host(|h| h.overlay_is_attached()),
            phase.is_attached()
        );
    }
});
