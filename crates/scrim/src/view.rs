#![forbid(unsafe_code)]

//! Declarative markup production.
//!
//! `render` maps a [`ModalConfig`] plus the current [`ModalPhase`] to an
//! [`ElementSpec`] tree for the host's rendering layer. The mapping is a
//! pure function: same inputs, same tree. Nothing here touches the
//! document; the lifecycle side effects live in the coordinator.

use crate::config::{ButtonAlignment, FooterButton, ModalConfig};
use crate::lifecycle::ModalPhase;

/// A node in the markup description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementSpec {
    /// Element tag name.
    pub tag: &'static str,
    /// Id attribute, when set.
    pub id: Option<String>,
    /// Classes, in application order.
    pub classes: Vec<String>,
    /// Other attributes, in application order.
    pub attrs: Vec<(String, String)>,
    /// Text content (raw markup for the body element).
    pub text: Option<String>,
    /// Child elements, in document order.
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this node carries the given class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// First descendant (depth-first) carrying the given class.
    #[must_use]
    pub fn find_class(&self, class: &str) -> Option<&ElementSpec> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_class(class))
    }
}

/// Produce the markup description for a modal.
pub fn render(config: &ModalConfig, phase: ModalPhase) -> ElementSpec {
    let mut root = ElementSpec::new("div").class("modal").class("fade");
    if phase.is_open_for_rendering() {
        root = root.class("show");
    }
    if let Some(size) = config.size {
        root = root.class(size.class_name());
    }
    if let Some(status) = config.status {
        root = root.class(status.class_name());
    }
    root.id = config.id.clone();
    root = root.attr("tabindex", "-1");

    let mut content = ElementSpec::new("div").class("modal-content");
    if let Some(header) = render_header(config) {
        content = content.child(header);
    }
    content = content.child(render_body(config));
    if let Some(footer) = render_footer(config) {
        content = content.child(footer);
    }

    root.child(ElementSpec::new("div").class("modal-dialog").child(content))
}

fn render_header(config: &ModalConfig) -> Option<ElementSpec> {
    if config.title.is_none() && config.spritemap.is_none() {
        return None;
    }

    let mut header = ElementSpec::new("div").class("modal-header");
    if let Some(title) = &config.title {
        header = header.child(
            ElementSpec::new("h4")
                .class("modal-title")
                .text(title.clone()),
        );
    }
    if let Some(spritemap) = &config.spritemap {
        header = header.child(
            ElementSpec::new("button")
                .class("close")
                .attr("aria-label", "Close")
                .child(
                    ElementSpec::new("svg")
                        .class("icon")
                        .attr("href", format!("{spritemap}#times")),
                ),
        );
    }
    Some(header)
}

fn render_body(config: &ModalConfig) -> ElementSpec {
    let body = ElementSpec::new("div").class("modal-body");
    // A url wins over raw body markup: the body becomes an iframe shell.
    if let Some(url) = &config.url {
        return body
            .class("modal-body-iframe")
            .child(ElementSpec::new("iframe").attr("src", url.clone()));
    }
    match &config.body {
        Some(markup) => body.text(markup.clone()),
        None => body,
    }
}

fn render_footer(config: &ModalConfig) -> Option<ElementSpec> {
    if config.footer_buttons.is_empty() {
        return None;
    }

    let group = |alignment: ButtonAlignment, class: &'static str| {
        let buttons: Vec<ElementSpec> = config
            .footer_buttons
            .iter()
            .filter(|b| b.alignment == alignment)
            .map(render_button)
            .collect();
        (!buttons.is_empty()).then(|| {
            buttons
                .into_iter()
                .fold(ElementSpec::new("div").class(class), ElementSpec::child)
        })
    };

    let mut footer = ElementSpec::new("div").class("modal-footer");
    if let Some(left) = group(ButtonAlignment::Left, "modal-footer-left") {
        footer = footer.child(left);
    }
    if let Some(right) = group(ButtonAlignment::Right, "modal-footer-right") {
        footer = footer.child(right);
    }
    Some(footer)
}

fn render_button(button: &FooterButton) -> ElementSpec {
    let mut spec = ElementSpec::new("button").class("btn");
    if let Some(style) = button.style {
        spec = spec.class(format!("btn-{}", style.class_suffix()));
    }
    spec.attr("type", button.kind.type_attr())
        .text(button.label.clone())
}
