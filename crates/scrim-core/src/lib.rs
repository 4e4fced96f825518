#![forbid(unsafe_code)]

//! Document-surface primitives for the scrim modal widget.
//!
//! This crate defines the vocabulary a modal overlay needs from its host
//! surface: canonical input events ([`event`]), the [`host::DocumentHost`]
//! seam for attach/detach/class/layout operations, and the [`reactive`]
//! change-notification cell the widget uses to fan out state transitions.
//!
//! No widget logic lives here; see the `scrim` crate for the lifecycle
//! machine and coordinator built on these types.

pub mod event;
pub mod host;
pub mod reactive;
