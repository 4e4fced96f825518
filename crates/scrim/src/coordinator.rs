#![forbid(unsafe_code)]

//! Overlay coordinator: the side-effect half of the modal lifecycle.
//!
//! The coordinator subscribes to the transition state machine and performs
//! everything the machine itself must not know about: inserting and
//! removing the backdrop overlay, toggling the fade classes, maintaining
//! the `modal-open` marker on the document root, and keeping the listener
//! registry in step with the interactable window.
//!
//! Event handling is registry-gated and returns a [`ModalAction`] instead
//! of mutating the state machine directly; the façade applies the action,
//! so every close source funnels through one path and a notification can
//! never re-enter the coordinator while it is borrowed.
//!
//! # Ordering on open
//!
//! Attach, then a forced layout read, then the show class. The layout read
//! guarantees the class change is a new state for the rendering engine
//! rather than being coalesced with the insertion, which is what lets the
//! fade-in actually play.

use scrim_core::event::{Event, KeyCode, KeyEventKind};
use scrim_core::host::{DocumentHost, NodeId};
use web_time::{Duration, Instant};

use crate::config::ModalConfig;
use crate::lifecycle::ModalPhase;
use crate::registry::{EventKind, ListenerRegistry};

/// Class applied to the overlay while the modal is visible.
pub const OVERLAY_SHOW_CLASS: &str = "show";

/// Marker class on the document root while the modal is open.
pub const ROOT_MODAL_OPEN_CLASS: &str = "modal-open";

/// What initiated a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The header close affordance.
    CloseButton,
    /// A footer button of close kind, by index.
    FooterButton(usize),
    /// A click or touch outside the modal root.
    OutsidePointer,
    /// The Escape key.
    Escape,
    /// An explicit API call.
    Api,
}

/// Action produced by registry-gated event dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Something asked the modal to close.
    CloseRequested(CloseReason),
    /// The fade-out transition settled (real notification or deadline).
    TransitionSettled,
}

/// Applies lifecycle side effects against a [`DocumentHost`].
///
/// Exclusively owns the overlay node and the listener registry for one
/// widget instance. Dropping the coordinator releases both: the registry is
/// cleared and the overlay detached, whatever phase the widget was in.
#[derive(Debug)]
pub struct OverlayCoordinator<H: DocumentHost> {
    host: H,
    overlay: NodeId,
    registry: ListenerRegistry,
    phase: ModalPhase,
    close_on_outside_click: bool,
    close_on_escape: bool,
    settle_timeout: Duration,
    settle_deadline: Option<Instant>,
}

impl<H: DocumentHost> OverlayCoordinator<H> {
    /// Create a coordinator, creating the (detached) overlay node.
    pub fn new(mut host: H, config: &ModalConfig) -> Self {
        let overlay = host.create_overlay();
        Self {
            host,
            overlay,
            registry: ListenerRegistry::new(),
            phase: ModalPhase::Closed,
            close_on_outside_click: config.close_on_outside_click,
            close_on_escape: config.close_on_escape,
            settle_timeout: config.settle_timeout,
            settle_deadline: None,
        }
    }

    /// React to a phase transition from the state machine.
    pub fn on_phase(&mut self, phase: ModalPhase) {
        self.phase = phase;
        match phase {
            // Transient; the Open transition that follows does the work.
            ModalPhase::Opening => {}
            ModalPhase::Open => self.enter_open(),
            ModalPhase::Closing => self.enter_closing(),
            ModalPhase::Closed => self.enter_closed(),
        }
    }

    fn enter_open(&mut self) {
        tracing::debug!("overlay attach + interactable window open");
        self.host.attach_overlay(self.overlay);
        self.host.force_layout();
        self.host.add_class(self.overlay, OVERLAY_SHOW_CLASS);
        self.host.add_root_class(ROOT_MODAL_OPEN_CLASS);
        self.registry.install_interactive_set();
        self.settle_deadline = None;
    }

    fn enter_closing(&mut self) {
        tracing::debug!("fade-out started, listeners reduced to settle");
        self.host.remove_class(self.overlay, OVERLAY_SHOW_CLASS);
        self.host.remove_root_class(ROOT_MODAL_OPEN_CLASS);
        self.registry.retain_settle_listener();
        self.settle_deadline = Some(Instant::now() + self.settle_timeout);
    }

    fn enter_closed(&mut self) {
        tracing::debug!("overlay detached, listeners released");
        self.host.detach_overlay(self.overlay);
        self.registry.clear();
        self.settle_deadline = None;
    }

    /// Feed a document event through the registry-gated dispatcher.
    ///
    /// Events with no matching registration are ignored, which is what
    /// limits handling to the interactable window. Outside click/touch is a
    /// capture-phase registration: it observes the event before any inner
    /// handler, so overlapping UI cannot suppress the close.
    pub fn dispatch(&mut self, event: &Event) -> Option<ModalAction> {
        match event {
            Event::Pointer(pointer) => {
                let kind = match pointer.kind {
                    scrim_core::event::PointerKind::Click => EventKind::Click,
                    scrim_core::event::PointerKind::TouchEnd => EventKind::Touch,
                };
                if !self.registry.is_installed(kind) || !self.close_on_outside_click {
                    return None;
                }
                if self.host.contains(self.host.modal_root(), pointer.target) {
                    return None;
                }
                Some(ModalAction::CloseRequested(CloseReason::OutsidePointer))
            }
            Event::Key(key) => {
                if !self.registry.is_installed(EventKind::Key) || !self.close_on_escape {
                    return None;
                }
                if key.code == KeyCode::Escape && key.kind == KeyEventKind::Press {
                    return Some(ModalAction::CloseRequested(CloseReason::Escape));
                }
                None
            }
            Event::TransitionEnd(transition) => {
                if !self.registry.is_installed(EventKind::TransitionEnd) {
                    return None;
                }
                // Only the modal root's own transition settles the close;
                // a descendant's unrelated transition must not.
                if self.phase != ModalPhase::Closing
                    || transition.target != self.host.modal_root()
                {
                    return None;
                }
                Some(ModalAction::TransitionSettled)
            }
        }
    }

    /// Settle-deadline fallback.
    ///
    /// If the close has been waiting longer than the configured timeout for
    /// its transition-completion signal, report settlement anyway so a host
    /// that never delivers transition-end cannot leave the modal stuck.
    pub fn poll(&mut self, now: Instant) -> Option<ModalAction> {
        if self.phase != ModalPhase::Closing {
            return None;
        }
        let deadline = self.settle_deadline?;
        if now < deadline {
            return None;
        }
        tracing::warn!("transition-end never arrived; settling via deadline");
        Some(ModalAction::TransitionSettled)
    }

    /// The listener registry (read-only).
    #[must_use]
    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    /// The overlay node owned by this coordinator.
    #[must_use]
    pub fn overlay(&self) -> NodeId {
        self.overlay
    }

    /// The host document (read-only).
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host document (mutable; test setup only).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: DocumentHost> Drop for OverlayCoordinator<H> {
    // Scoped acquisition: abrupt destruction still releases the document.
    fn drop(&mut self) {
        self.registry.clear();
        self.host.remove_root_class(ROOT_MODAL_OPEN_CLASS);
        self.host.detach_overlay(self.overlay);
    }
}
