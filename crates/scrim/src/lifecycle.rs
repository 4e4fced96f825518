#![forbid(unsafe_code)]

//! Transition state machine for modal visibility.
//!
//! State machine: Closed → Opening → Open → Closing → Closed.
//!
//! The machine knows nothing about the document or events. It is driven by
//! two external signals, [`Lifecycle::request_show`] and
//! [`Lifecycle::request_hide`], and one internal signal,
//! [`Lifecycle::animation_settled`], delivered when the host reports that
//! the fade-out transition finished.
//!
//! Opening has no externally observable window: the fade-in begins the
//! instant the overlay is attached and the show class applied, so
//! `request_show` resolves `Opening → Open` before it returns. Closing, in
//! contrast, persists until the real transition-completion signal (or a
//! fallback) arrives.
//!
//! # Invariants
//!
//! - The phase is always one of the four named states.
//! - Every transition is observable through the phase [`Observable`], in
//!   order, before the next external signal is accepted.
//! - All signals are idempotent; calling one in a phase it does not apply
//!   to is a silent no-op observed only through the unchanged phase.

use scrim_core::reactive::{Observable, Subscription};

/// Current phase of the modal lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    /// Not present in the document.
    #[default]
    Closed,
    /// Show requested; resolves to `Open` within the same signal.
    Opening,
    /// Fully interactable.
    Open,
    /// Fade-out running; waiting for the transition to settle.
    Closing,
}

impl ModalPhase {
    /// Whether the overlay is present in the document.
    #[inline]
    #[must_use]
    pub fn is_attached(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether the modal surface should render as open.
    ///
    /// False during `Closing`: the overlay is still attached for the
    /// fade-out, but clients of the rendering layer treat the modal as
    /// already dismissed.
    #[inline]
    #[must_use]
    pub fn is_open_for_rendering(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// The modal's transition state machine.
///
/// Wraps the phase in an [`Observable`] so the overlay coordinator and any
/// consumer observers see each transition, in order, as it happens.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: Observable<ModalPhase>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// Create a lifecycle in the `Closed` phase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Observable::new(ModalPhase::Closed),
        }
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> ModalPhase {
        self.phase.get()
    }

    /// Subscribe to phase transitions.
    ///
    /// The callback observes every transition with the new phase; drop the
    /// returned guard to unsubscribe.
    pub fn subscribe(&self, callback: impl Fn(&ModalPhase) + 'static) -> Subscription {
        self.phase.subscribe(callback)
    }

    /// Request that the modal be shown.
    ///
    /// Only meaningful from `Closed`; otherwise a no-op. Subscribers observe
    /// `Opening` and then `Open`, in that order, before this returns.
    pub fn request_show(&self) {
        if self.phase.get() != ModalPhase::Closed {
            return;
        }
        tracing::debug!("modal show requested");
        self.phase.set(ModalPhase::Opening);
        // Opening is transient: the fade-in plays on the host's clock, not
        // ours, so the machine moves straight on to Open.
        self.phase.set(ModalPhase::Open);
    }

    /// Request that the modal be hidden.
    ///
    /// Only meaningful from `Open`; otherwise a no-op. The machine stays in
    /// `Closing` until [`Self::animation_settled`] (or a fallback) arrives.
    pub fn request_hide(&self) {
        if self.phase.get() != ModalPhase::Open {
            return;
        }
        tracing::debug!("modal hide requested");
        self.phase.set(ModalPhase::Closing);
    }

    /// Signal that the fade-out transition finished.
    ///
    /// Only meaningful in `Closing`; a late signal after teardown is a
    /// silent no-op.
    pub fn animation_settled(&self) {
        if self.phase.get() != ModalPhase::Closing {
            return;
        }
        tracing::debug!("modal transition settled");
        self.phase.set(ModalPhase::Closed);
    }

    /// Jump straight to `Closed` from any phase, skipping the transition.
    ///
    /// Fallback against a transition-completion signal that never arrives;
    /// subscribers observe the `Closed` transition normally.
    pub fn force_close(&self) {
        if self.phase.get() == ModalPhase::Closed {
            return;
        }
        tracing::debug!("modal force-closed");
        self.phase.set(ModalPhase::Closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded_phases(run: impl FnOnce(&Lifecycle)) -> Vec<ModalPhase> {
        let lifecycle = Lifecycle::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = Rc::clone(&log);
        let _sub = lifecycle.subscribe(move |p| log_clone.borrow_mut().push(*p));
        run(&lifecycle);
        let phases = log.borrow().clone();
        phases
    }

    #[test]
    fn starts_closed() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.phase(), ModalPhase::Closed);
        assert!(!lifecycle.phase().is_attached());
    }

    #[test]
    fn show_resolves_opening_to_open() {
        let phases = recorded_phases(|l| l.request_show());
        assert_eq!(phases, vec![ModalPhase::Opening, ModalPhase::Open]);
    }

    #[test]
    fn show_is_idempotent() {
        let lifecycle = Lifecycle::new();
        lifecycle.request_show();
        lifecycle.request_show();
        assert_eq!(lifecycle.phase(), ModalPhase::Open);
    }

    #[test]
    fn hide_only_from_open() {
        let lifecycle = Lifecycle::new();
        lifecycle.request_hide();
        assert_eq!(lifecycle.phase(), ModalPhase::Closed);

        lifecycle.request_show();
        lifecycle.request_hide();
        assert_eq!(lifecycle.phase(), ModalPhase::Closing);

        // Already closing: a second hide changes nothing.
        lifecycle.request_hide();
        assert_eq!(lifecycle.phase(), ModalPhase::Closing);
    }

    #[test]
    fn closing_persists_until_settled() {
        let lifecycle = Lifecycle::new();
        lifecycle.request_show();
        lifecycle.request_hide();
        assert_eq!(lifecycle.phase(), ModalPhase::Closing);

        lifecycle.animation_settled();
        assert_eq!(lifecycle.phase(), ModalPhase::Closed);
    }

    #[test]
    fn settled_outside_closing_is_noop() {
        let lifecycle = Lifecycle::new();
        lifecycle.animation_settled();
        assert_eq!(lifecycle.phase(), ModalPhase::Closed);

        lifecycle.request_show();
        lifecycle.animation_settled();
        assert_eq!(lifecycle.phase(), ModalPhase::Open);
    }

    #[test]
    fn show_during_closing_is_dropped() {
        let lifecycle = Lifecycle::new();
        lifecycle.request_show();
        lifecycle.request_hide();

        lifecycle.request_show();
        assert_eq!(lifecycle.phase(), ModalPhase::Closing);

        lifecycle.animation_settled();
        lifecycle.request_show();
        assert_eq!(lifecycle.phase(), ModalPhase::Open);
    }

    #[test]
    fn force_close_from_any_phase() {
        let lifecycle = Lifecycle::new();
        lifecycle.request_show();
        lifecycle.force_close();
        assert_eq!(lifecycle.phase(), ModalPhase::Closed);

        lifecycle.request_show();
        lifecycle.request_hide();
        lifecycle.force_close();
        assert_eq!(lifecycle.phase(), ModalPhase::Closed);

        // Already closed: no extra notification.
        let phases = recorded_phases(|l| l.force_close());
        assert!(phases.is_empty());
    }

    #[test]
    fn rendering_projection() {
        assert!(!ModalPhase::Closed.is_open_for_rendering());
        assert!(!ModalPhase::Opening.is_open_for_rendering());
        assert!(ModalPhase::Open.is_open_for_rendering());
        assert!(!ModalPhase::Closing.is_open_for_rendering());

        assert!(!ModalPhase::Closed.is_attached());
        assert!(ModalPhase::Opening.is_attached());
        assert!(ModalPhase::Open.is_attached());
        assert!(ModalPhase::Closing.is_attached());
    }

    #[test]
    fn full_cycle_notification_order() {
        let phases = recorded_phases(|l| {
            l.request_show();
            l.request_hide();
            l.animation_settled();
        });
        assert_eq!(
            phases,
            vec![
                ModalPhase::Opening,
                ModalPhase::Open,
                ModalPhase::Closing,
                ModalPhase::Closed,
            ]
        );
    }
}
