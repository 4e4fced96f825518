#![forbid(unsafe_code)]

//! Document-scoped listener registrations.
//!
//! The modal installs a small set of document-level listeners while it is
//! interactable: outside click and outside touch (capture phase, so inner
//! handlers cannot swallow the event first), the Escape key, and the
//! transition-completion notification. This registry tracks which of those
//! registrations currently exist.
//!
//! # Invariants
//!
//! - The registry is non-empty only between a show and the completion of
//!   the corresponding close cycle.
//! - Entries leave together: [`ListenerRegistry::clear`] removes all of
//!   them, [`ListenerRegistry::retain_settle_listener`] everything except
//!   transition-end. Individual entries are never leaked.
//! - Registrations are an ordered set: installing a (kind, phase) pair that
//!   is already present is a no-op.

/// The event kinds the modal listens for at the document level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Mouse click anywhere in the document.
    Click,
    /// Touch interaction ending anywhere in the document.
    Touch,
    /// Keyboard input.
    Key,
    /// Transition-completion notification.
    TransitionEnd,
}

/// When a listener observes the event relative to inner handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchPhase {
    /// Before any inner handler; cannot be suppressed by propagation
    /// stopping.
    Capture,
    /// After capture-phase handlers, at the target.
    Bubble,
}

/// One document-level registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub kind: EventKind,
    pub phase: DispatchPhase,
}

/// Ordered set of the modal's document-level registrations.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    entries: Vec<Registration>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a registration; a duplicate (kind, phase) pair is a no-op.
    pub fn install(&mut self, kind: EventKind, phase: DispatchPhase) {
        let entry = Registration { kind, phase };
        if self.entries.contains(&entry) {
            return;
        }
        self.entries.push(entry);
    }

    /// Install the full interactable-window set: outside click and touch in
    /// the capture phase, Escape handling, and transition-end.
    pub fn install_interactive_set(&mut self) {
        self.install(EventKind::Click, DispatchPhase::Capture);
        self.install(EventKind::Touch, DispatchPhase::Capture);
        self.install(EventKind::Key, DispatchPhase::Bubble);
        self.install(EventKind::TransitionEnd, DispatchPhase::Bubble);
    }

    /// Drop everything except the transition-end registration.
    ///
    /// Used on entering the closing phase: the modal is no longer
    /// interactable, but the fade-out still needs its completion signal.
    pub fn retain_settle_listener(&mut self) {
        self.entries
            .retain(|r| r.kind == EventKind::TransitionEnd);
    }

    /// Remove every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether a listener for `kind` is currently installed.
    #[must_use]
    pub fn is_installed(&self, kind: EventKind) -> bool {
        self.entries.iter().any(|r| r.kind == kind)
    }

    /// Number of registrations for `kind`.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|r| r.kind == kind).count()
    }

    /// Total number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no registrations exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registrations, in installation order.
    #[must_use]
    pub fn entries(&self) -> &[Registration] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let registry = ListenerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn interactive_set_contents() {
        let mut registry = ListenerRegistry::new();
        registry.install_interactive_set();

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.count(EventKind::Click), 1);
        assert_eq!(registry.count(EventKind::Touch), 1);
        assert_eq!(registry.count(EventKind::Key), 1);
        assert_eq!(registry.count(EventKind::TransitionEnd), 1);

        // Outside click/touch must observe the capture phase.
        assert!(registry.entries().contains(&Registration {
            kind: EventKind::Click,
            phase: DispatchPhase::Capture,
        }));
        assert!(registry.entries().contains(&Registration {
            kind: EventKind::Touch,
            phase: DispatchPhase::Capture,
        }));
    }

    #[test]
    fn install_is_idempotent() {
        let mut registry = ListenerRegistry::new();
        registry.install_interactive_set();
        registry.install_interactive_set();
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn retain_settle_listener_keeps_only_transition_end() {
        let mut registry = ListenerRegistry::new();
        registry.install_interactive_set();
        registry.retain_settle_listener();

        assert_eq!(registry.len(), 1);
        assert!(registry.is_installed(EventKind::TransitionEnd));
        assert!(!registry.is_installed(EventKind::Click));
        assert!(!registry.is_installed(EventKind::Touch));
        assert!(!registry.is_installed(EventKind::Key));
    }

    #[test]
    fn clear_removes_everything() {
        let mut registry = ListenerRegistry::new();
        registry.install_interactive_set();
        registry.clear();
        assert!(registry.is_empty());
    }
}
