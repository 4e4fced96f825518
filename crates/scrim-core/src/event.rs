#![forbid(unsafe_code)]

//! Canonical document-surface events.
//!
//! These are the events a host loop feeds into the modal widget: keyboard
//! input, pointer activation (click or touch), and the host's notification
//! that a visual transition has finished running. All types derive `Clone`,
//! `PartialEq`, and `Eq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Pointer events carry the *target node* rather than coordinates; the
//!   widget decides inside/outside via the host's containment query.
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

use crate::host::NodeId;

/// Canonical input event delivered by the host surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer activation (click or touch) somewhere in the document.
    Pointer(PointerEvent),

    /// A visual transition on some node has finished running.
    TransitionEnd(TransitionEvent),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer activation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// How the pointer activated.
    pub kind: PointerKind,

    /// The node the event was dispatched to.
    pub target: NodeId,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// The kind of pointer activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// A mouse click.
    Click,

    /// The end of a touch interaction.
    TouchEnd,
}

/// A transition-completion notification.
///
/// Delivered by the host when a CSS-driven (or equivalent) visual transition
/// on `target` finishes. The widget only acts on notifications whose target
/// is its own root element; descendant transitions are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    /// The node whose transition finished.
    pub target: NodeId,

    /// The transitioned property, when the host reports one.
    pub property: Option<String>,
}

impl TransitionEvent {
    /// Create a notification without a property name.
    #[must_use]
    pub const fn new(target: NodeId) -> Self {
        Self {
            target,
            property: None,
        }
    }

    /// Create a notification for a specific property.
    #[must_use]
    pub fn for_property(target: NodeId, property: impl Into<String>) -> Self {
        Self {
            target,
            property: Some(property.into()),
        }
    }
}
