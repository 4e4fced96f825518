#![forbid(unsafe_code)]

//! The public modal widget façade.
//!
//! Wires consumer configuration to the transition state machine and the
//! overlay coordinator. Every close source (header close affordance,
//! close-kind footer buttons, outside click/touch, Escape, explicit API
//! calls) funnels through [`Modal::request_close`], so there is exactly one
//! code path that initiates teardown.

use std::cell::RefCell;
use std::rc::Rc;

use scrim_core::event::Event;
use scrim_core::host::DocumentHost;
use scrim_core::reactive::Subscription;
use web_time::Instant;

use crate::config::{ButtonKind, ConfigError, ModalConfig};
use crate::coordinator::{CloseReason, ModalAction, OverlayCoordinator};
use crate::lifecycle::{Lifecycle, ModalPhase};
use crate::registry::EventKind;
use crate::view::{self, ElementSpec};

/// Events the widget emits toward its consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    /// The modal became open and interactable.
    Opened,
    /// A close was requested (and not vetoed); the fade-out is running.
    CloseRequested(CloseReason),
    /// The close cycle completed; the overlay is detached.
    Closed,
    /// A footer button was activated.
    ButtonClicked { index: usize },
}

/// An interceptor's verdict on a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// Let the teardown proceed (the default behavior).
    Proceed,
    /// Keep the modal open.
    Veto,
}

type CloseInterceptor = Box<dyn Fn(&CloseReason) -> CloseDecision>;

/// A modal dialog widget bound to a host document.
///
/// Owns its lifecycle machine and overlay coordinator; the coordinator is
/// subscribed to the machine, so every phase transition performs its side
/// effects before the triggering call returns.
pub struct Modal<H: DocumentHost + 'static> {
    config: ModalConfig,
    lifecycle: Lifecycle,
    coordinator: Rc<RefCell<OverlayCoordinator<H>>>,
    interceptors: Vec<CloseInterceptor>,
    _phase_sub: Subscription,
}

impl<H: DocumentHost + 'static> Modal<H> {
    /// Validate `config` and build a widget over `host`.
    ///
    /// The overlay node is created (detached) here; nothing touches the
    /// document until [`Self::show`].
    pub fn new(config: ModalConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;

        let lifecycle = Lifecycle::new();
        let coordinator = Rc::new(RefCell::new(OverlayCoordinator::new(host, &config)));
        let observer = Rc::clone(&coordinator);
        let phase_sub = lifecycle.subscribe(move |phase| observer.borrow_mut().on_phase(*phase));

        Ok(Self {
            config,
            lifecycle,
            coordinator,
            interceptors: Vec::new(),
            _phase_sub: phase_sub,
        })
    }

    /// Show the modal. Idempotent while already visible.
    ///
    /// On the transition to open, the coordinator attaches the overlay,
    /// forces a layout read, applies the show class, marks the document
    /// root, and installs the document-level listeners.
    pub fn show(&mut self) -> Option<ModalEvent> {
        if self.lifecycle.phase() != ModalPhase::Closed {
            return None;
        }
        self.lifecycle.request_show();
        Some(ModalEvent::Opened)
    }

    /// The single close funnel.
    ///
    /// Runs interceptors in registration order; any veto keeps the modal
    /// open. Otherwise the fade-out starts and `CloseRequested` is emitted.
    /// A no-op unless the modal is open.
    pub fn request_close(&mut self, reason: CloseReason) -> Option<ModalEvent> {
        if self.lifecycle.phase() != ModalPhase::Open {
            return None;
        }
        for interceptor in &self.interceptors {
            if interceptor(&reason) == CloseDecision::Veto {
                tracing::debug!(?reason, "close request vetoed");
                return None;
            }
        }
        self.lifecycle.request_hide();
        Some(ModalEvent::CloseRequested(reason))
    }

    /// Feed a document event into the widget.
    ///
    /// Dispatch is gated by the listener registry, so events outside the
    /// interactable window are ignored without special-casing.
    pub fn handle_event(&mut self, event: &Event) -> Option<ModalEvent> {
        let action = self.coordinator.borrow_mut().dispatch(event);
        self.apply_action(action)
    }

    /// Drive the settle-deadline fallback.
    ///
    /// Call from the host's timer tick; if a close has outwaited its
    /// deadline this completes it exactly as a transition-end would.
    pub fn poll(&mut self, now: Instant) -> Option<ModalEvent> {
        let action = self.coordinator.borrow_mut().poll(now);
        self.apply_action(action)
    }

    /// Activate a footer button by index.
    ///
    /// Emits `ButtonClicked`; a close-kind button additionally funnels a
    /// close request. Out-of-range indices and non-open phases emit
    /// nothing.
    pub fn activate_footer_button(&mut self, index: usize) -> Vec<ModalEvent> {
        if self.lifecycle.phase() != ModalPhase::Open {
            return Vec::new();
        }
        let Some(kind) = self.config.footer_buttons.get(index).map(|b| b.kind) else {
            return Vec::new();
        };

        let mut events = vec![ModalEvent::ButtonClicked { index }];
        if kind == ButtonKind::Close
            && let Some(closed) = self.request_close(CloseReason::FooterButton(index))
        {
            events.push(closed);
        }
        events
    }

    /// Activate the header close affordance.
    pub fn activate_close_button(&mut self) -> Option<ModalEvent> {
        self.request_close(CloseReason::CloseButton)
    }

    /// Skip the transition and jump straight to closed.
    ///
    /// The explicit fallback for hosts whose transition notifications are
    /// unreliable; side effects (detach, listener release) run normally.
    pub fn force_close(&mut self) {
        self.lifecycle.force_close();
    }

    /// Register a close-request interceptor.
    ///
    /// Interceptors observe the [`CloseReason`] and may veto; with none
    /// registered the default teardown always proceeds.
    pub fn on_close_request(&mut self, interceptor: impl Fn(&CloseReason) -> CloseDecision + 'static) {
        self.interceptors.push(Box::new(interceptor));
    }

    /// Current lifecycle phase. Read-only; never externally settable.
    #[must_use]
    pub fn phase(&self) -> ModalPhase {
        self.lifecycle.phase()
    }

    /// Whether the modal is open and interactable.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase() == ModalPhase::Open
    }

    /// Whether the overlay is present in the document.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.phase().is_attached()
    }

    /// Subscribe to phase transitions.
    pub fn subscribe_phase(&self, callback: impl Fn(&ModalPhase) + 'static) -> Subscription {
        self.lifecycle.subscribe(callback)
    }

    /// The widget's configuration.
    #[must_use]
    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    /// Produce the markup description for the current phase.
    #[must_use]
    pub fn render(&self) -> ElementSpec {
        view::render(&self.config, self.phase())
    }

    /// Number of active document-level registrations for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.coordinator.borrow().registry().count(kind)
    }

    /// Total number of active document-level registrations.
    #[must_use]
    pub fn active_listeners(&self) -> usize {
        self.coordinator.borrow().registry().len()
    }

    /// Inspect the host document.
    pub fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(self.coordinator.borrow().host())
    }

    /// Mutate the host document (test setup).
    pub fn with_host_mut<R>(&mut self, f: impl FnOnce(&mut H) -> R) -> R {
        f(self.coordinator.borrow_mut().host_mut())
    }

    fn apply_action(&mut self, action: Option<ModalAction>) -> Option<ModalEvent> {
        match action? {
            ModalAction::CloseRequested(reason) => self.request_close(reason),
            ModalAction::TransitionSettled => {
                self.lifecycle.animation_settled();
                Some(ModalEvent::Closed)
            }
        }
    }
}

impl<H: DocumentHost + std::fmt::Debug + 'static> std::fmt::Debug for Modal<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modal")
            .field("phase", &self.phase())
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}
