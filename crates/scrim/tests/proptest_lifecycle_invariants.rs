//! Property tests for the lifecycle state machine and listener accounting.

use proptest::prelude::*;
use scrim::config::ModalConfig;
use scrim::lifecycle::{Lifecycle, ModalPhase};
use scrim::modal::Modal;
use scrim_core::event::{Event, KeyCode, KeyEvent, PointerEvent, PointerKind, TransitionEvent};
use scrim_core::host::{DocumentHost, RecordingDocument};

#[derive(Debug, Clone, Copy)]
enum Signal {
    Show,
    Hide,
    Settled,
    Force,
}

fn signal_strategy() -> impl Strategy<Value = Signal> {
    prop_oneof![
        Just(Signal::Show),
        Just(Signal::Hide),
        Just(Signal::Settled),
        Just(Signal::Force),
    ]
}

proptest! {
    /// Every interleaving of external signals leaves the machine in one of
    /// the four named phases, and the transient Opening phase never
    /// outlives the call that produced it.
    #[test]
    fn phase_is_always_a_named_state(signals in proptest::collection::vec(signal_strategy(), 0..64)) {
        let lifecycle = Lifecycle::new();
        for signal in signals {
            match signal {
                Signal::Show => lifecycle.request_show(),
                Signal::Hide => lifecycle.request_hide(),
                Signal::Settled => lifecycle.animation_settled(),
                Signal::Force => lifecycle.force_close(),
            }
            let phase = lifecycle.phase();
            prop_assert!(matches!(
                phase,
                ModalPhase::Closed | ModalPhase::Open | ModalPhase::Closing
            ), "observed transient phase {phase:?} between signals");

            // Boolean projections stay consistent with the named state.
            prop_assert_eq!(phase.is_attached(), phase != ModalPhase::Closed);
            prop_assert_eq!(phase.is_open_for_rendering(), phase == ModalPhase::Open);
        }
    }

    /// Whatever the event interleaving, the registry is populated exactly
    /// when the phase says the modal is attached, and empty when closed.
    #[test]
    fn listener_registry_tracks_phase(steps in proptest::collection::vec(0u8..6, 0..48)) {
        let mut modal = Modal::new(ModalConfig::new(), RecordingDocument::new()).unwrap();
        let root = modal.with_host(|h| h.modal_root());
        let outside = modal.with_host_mut(|h| h.outside_node());

        for step in steps {
            match step {
                0 => { modal.show(); }
                1 => { modal.handle_event(&Event::Key(KeyEvent::new(KeyCode::Escape))); }
                2 => {
                    modal.handle_event(&Event::Pointer(PointerEvent::new(
                        PointerKind::Click,
                        outside,
                    )));
                }
                3 => { modal.handle_event(&Event::TransitionEnd(TransitionEvent::new(root))); }
                4 => {
                    modal.handle_event(&Event::TransitionEnd(TransitionEvent::new(outside)));
                }
                _ => { modal.force_close(); }
            }

            match modal.phase() {
                ModalPhase::Open => prop_assert_eq!(modal.active_listeners(), 4),
                ModalPhase::Closing => prop_assert_eq!(modal.active_listeners(), 1),
                ModalPhase::Closed => {
                    prop_assert_eq!(modal.active_listeners(), 0);
                    prop_assert!(!modal.with_host(|h| h.overlay_is_attached()));
                }
                ModalPhase::Opening => prop_assert!(false, "transient phase escaped"),
            }
        }
    }
}
