#![forbid(unsafe_code)]

//! Consumer configuration for a modal.
//!
//! Configuration is supplied once at construction and immutable for the
//! widget's lifetime; the core never mutates it. Builder methods consume
//! and return `self` so configs read as a single expression.

use std::fmt;

use unicode_width::UnicodeWidthStr;
use web_time::Duration;

/// Where a footer button sits in the footer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonAlignment {
    /// Leading edge of the footer.
    Left,
    /// Trailing edge of the footer (the default).
    #[default]
    Right,
}

/// Visual style modifier for a footer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonStyle {
    Borderless,
    Link,
    Primary,
    Secondary,
    Unstyled,
}

impl ButtonStyle {
    /// The class modifier suffix for this style.
    #[must_use]
    pub fn class_suffix(self) -> &'static str {
        match self {
            Self::Borderless => "borderless",
            Self::Link => "link",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Unstyled => "unstyled",
        }
    }
}

/// Behavioral kind of a footer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonKind {
    /// Plain button (the default); activation only emits a click.
    #[default]
    Button,
    /// Activation emits a click and a close request.
    Close,
    /// Form reset semantics.
    Reset,
    /// Form submit semantics.
    Submit,
}

impl ButtonKind {
    /// The `type` attribute value for this kind.
    #[must_use]
    pub fn type_attr(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Close => "close",
            Self::Reset => "reset",
            Self::Submit => "submit",
        }
    }
}

/// One footer button.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FooterButton {
    /// Footer edge the button aligns to.
    pub alignment: ButtonAlignment,
    /// Display label. Required; validated non-empty.
    pub label: String,
    /// Optional style modifier.
    pub style: Option<ButtonStyle>,
    /// Behavioral kind.
    pub kind: ButtonKind,
}

impl FooterButton {
    /// Create a right-aligned plain button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            alignment: ButtonAlignment::default(),
            label: label.into(),
            style: None,
            kind: ButtonKind::default(),
        }
    }

    /// Set the footer edge.
    #[must_use]
    pub fn alignment(mut self, alignment: ButtonAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the style modifier.
    #[must_use]
    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the behavioral kind.
    #[must_use]
    pub fn kind(mut self, kind: ButtonKind) -> Self {
        self.kind = kind;
        self
    }

    /// Display width of the label in terminal-style cells, including the
    /// button's own padding. Layout hint for hosts that size the footer.
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.label.width() + 4
    }
}

/// Size modifier for the modal surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModalSize {
    FullScreen,
    Lg,
    Sm,
}

impl ModalSize {
    /// The class modifier for this size.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::FullScreen => "modal-full-screen",
            Self::Lg => "modal-lg",
            Self::Sm => "modal-sm",
        }
    }
}

/// Status accent for the modal header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModalStatus {
    Danger,
    Info,
    Success,
    Warning,
}

impl ModalStatus {
    /// The class modifier for this status.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Danger => "modal-danger",
            Self::Info => "modal-info",
            Self::Success => "modal-success",
            Self::Warning => "modal-warning",
        }
    }
}

/// Modal configuration.
///
/// Everything the rendering layer and the lifecycle need to know about one
/// modal: content (`title`, `body` or `url`, footer buttons), appearance
/// modifiers (`size`, `status`, `spritemap` for the close icon), and close
/// behavior.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModalConfig {
    /// Id attribute for the root element.
    pub id: Option<String>,
    /// Header title. No title and no spritemap means no header.
    pub title: Option<String>,
    /// Raw body markup.
    pub body: Option<String>,
    /// When set, the body embeds this url in an iframe instead of `body`.
    pub url: Option<String>,
    /// Size modifier.
    pub size: Option<ModalSize>,
    /// Status accent.
    pub status: Option<ModalStatus>,
    /// Path to the SVG spritemap providing the header close icon.
    pub spritemap: Option<String>,
    /// Footer buttons, in consumer order.
    pub footer_buttons: Vec<FooterButton>,
    /// Close when a click or touch lands outside the modal root.
    pub close_on_outside_click: bool,
    /// Close on Escape.
    pub close_on_escape: bool,
    /// How long a close may wait for its transition-completion signal
    /// before the deadline fallback settles it.
    pub settle_timeout: Duration,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            id: None,
            title: None,
            body: None,
            url: None,
            size: None,
            status: None,
            spritemap: None,
            footer_buttons: Vec::new(),
            close_on_outside_click: true,
            close_on_escape: true,
            settle_timeout: Duration::from_millis(500),
        }
    }
}

impl ModalConfig {
    /// Create a configuration with the documented defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root element id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the header title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the raw body markup.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Embed a url in the body instead of raw markup.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the size modifier.
    #[must_use]
    pub fn size(mut self, size: ModalSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the status accent.
    #[must_use]
    pub fn status(mut self, status: ModalStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the spritemap path for the header close icon.
    #[must_use]
    pub fn spritemap(mut self, spritemap: impl Into<String>) -> Self {
        self.spritemap = Some(spritemap.into());
        self
    }

    /// Append a footer button.
    #[must_use]
    pub fn footer_button(mut self, button: FooterButton) -> Self {
        self.footer_buttons.push(button);
        self
    }

    /// Replace the footer buttons.
    #[must_use]
    pub fn footer_buttons(mut self, buttons: Vec<FooterButton>) -> Self {
        self.footer_buttons = buttons;
        self
    }

    /// Set close-on-outside-click behavior.
    #[must_use]
    pub fn close_on_outside_click(mut self, close: bool) -> Self {
        self.close_on_outside_click = close;
        self
    }

    /// Set close-on-escape behavior.
    #[must_use]
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// Set the settle-deadline timeout.
    #[must_use]
    pub fn settle_timeout(mut self, timeout: Duration) -> Self {
        self.settle_timeout = timeout;
        self
    }

    /// Validate the configuration.
    ///
    /// Rejected configurations never reach the lifecycle; this is the only
    /// place configuration errors surface.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, button) in self.footer_buttons.iter().enumerate() {
            if button.label.trim().is_empty() {
                return Err(ConfigError::EmptyButtonLabel { index });
            }
        }
        Ok(())
    }
}

/// Errors surfaced by configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A footer button has an empty (or whitespace-only) label.
    EmptyButtonLabel { index: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyButtonLabel { index } => {
                write!(f, "footer button {index} has an empty label")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ModalConfig::new();
        assert!(config.close_on_outside_click);
        assert!(config.close_on_escape);
        assert_eq!(config.settle_timeout, Duration::from_millis(500));
        assert!(config.footer_buttons.is_empty());

        let button = FooterButton::new("OK");
        assert_eq!(button.alignment, ButtonAlignment::Right);
        assert_eq!(button.kind, ButtonKind::Button);
        assert_eq!(button.style, None);
    }

    #[test]
    fn builder_chain() {
        let config = ModalConfig::new()
            .id("confirm-delete")
            .title("Delete?")
            .body("Gone forever.")
            .size(ModalSize::Sm)
            .status(ModalStatus::Danger)
            .spritemap("/icons.svg")
            .footer_button(FooterButton::new("Cancel").alignment(ButtonAlignment::Left))
            .footer_button(
                FooterButton::new("Delete")
                    .style(ButtonStyle::Primary)
                    .kind(ButtonKind::Submit),
            )
            .close_on_outside_click(false);

        assert_eq!(config.id.as_deref(), Some("confirm-delete"));
        assert_eq!(config.footer_buttons.len(), 2);
        assert_eq!(config.footer_buttons[0].alignment, ButtonAlignment::Left);
        assert_eq!(config.footer_buttons[1].style, Some(ButtonStyle::Primary));
        assert!(!config.close_on_outside_click);
    }

    #[test]
    fn validation_rejects_empty_label() {
        let config = ModalConfig::new()
            .footer_button(FooterButton::new("OK"))
            .footer_button(FooterButton::new("   "));

        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyButtonLabel { index: 1 })
        );
    }

    #[test]
    fn validation_accepts_buttonless_config() {
        assert_eq!(ModalConfig::new().validate(), Ok(()));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::EmptyButtonLabel { index: 3 };
        assert_eq!(err.to_string(), "footer button 3 has an empty label");
    }

    #[test]
    fn display_width_counts_cells_not_bytes() {
        // "日本" is 4 cells wide but 6 bytes long.
        let wide = FooterButton::new("日本");
        assert_eq!(wide.display_width(), 8);

        let ascii = FooterButton::new("OK");
        assert_eq!(ascii.display_width(), 6);
    }

    #[test]
    fn class_names() {
        assert_eq!(ModalSize::FullScreen.class_name(), "modal-full-screen");
        assert_eq!(ModalSize::Lg.class_name(), "modal-lg");
        assert_eq!(ModalSize::Sm.class_name(), "modal-sm");
        assert_eq!(ModalStatus::Danger.class_name(), "modal-danger");
        assert_eq!(ButtonStyle::Primary.class_suffix(), "primary");
        assert_eq!(ButtonKind::Submit.type_attr(), "submit");
    }
}
