#![forbid(unsafe_code)]

//! Modal overlay widget with a four-phase transition lifecycle.
//!
//! A modal is shown and hidden in coordination with a host-driven fade
//! transition. This crate owns the state-machine and lifecycle-ordering
//! hazards of that dance:
//!
//! - [`lifecycle`]: the transition state machine: `Closed`, `Opening`,
//!   `Open`, `Closing`, driven by show/hide requests and the host's
//!   transition-completion notification.
//! - [`registry`]: the set of document-scoped listener registrations that
//!   exist only while the modal is interactable.
//! - [`coordinator`]: applies each phase's side effects against the
//!   host document (overlay attach/detach, class toggles, listener set)
//!   and turns registry-gated events into actions.
//! - [`config`]: consumer configuration: header/body/footer content,
//!   footer buttons, size/status modifiers, close behavior.
//! - [`view`]: pure mapping from configuration and phase to a markup
//!   description for the host's rendering layer.
//! - [`modal`]: the public façade tying the above together behind one
//!   close-request funnel.
//!
//! # Example
//!
//! ```
//! use scrim::config::{FooterButton, ModalConfig};
//! use scrim::modal::Modal;
//! use scrim_core::host::RecordingDocument;
//!
//! let config = ModalConfig::new()
//!     .title("Delete file?")
//!     .body("This action cannot be undone.")
//!     .footer_button(FooterButton::new("Cancel"))
//!     .footer_button(FooterButton::new("Delete"));
//!
//! let mut modal = Modal::new(config, RecordingDocument::new()).unwrap();
//! modal.show();
//! assert!(modal.is_open());
//! ```

pub mod config;
pub mod coordinator;
pub mod lifecycle;
pub mod modal;
pub mod registry;
pub mod view;

pub use config::{
    ButtonAlignment, ButtonKind, ButtonStyle, ConfigError, FooterButton, ModalConfig, ModalSize,
    ModalStatus,
};
pub use coordinator::{CloseReason, ModalAction, OverlayCoordinator};
pub use lifecycle::{Lifecycle, ModalPhase};
pub use modal::{CloseDecision, Modal, ModalEvent};
pub use registry::{DispatchPhase, EventKind, ListenerRegistry, Registration};
pub use view::ElementSpec;
