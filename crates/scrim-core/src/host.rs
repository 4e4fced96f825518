#![forbid(unsafe_code)]

//! The document-host seam.
//!
//! A modal widget does not own its rendering surface. Everything it needs
//! from the host document is expressed through [`DocumentHost`]: creating
//! and attaching the backdrop overlay, toggling classes, forcing a layout
//! read, and answering containment queries for outside-click detection.
//!
//! # Failure Modes
//!
//! Detach and class-removal operations on an absent node are silent no-ops.
//! Document presence is best-effort, not load-bearing: animation-timing
//! races with host-triggered removal are expected, not exceptional.

/// Identity of a node in the host document.
///
/// Opaque to the widget; the host assigns ids and answers queries about
/// them. Two ids are equal iff they name the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a node id from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Operations the modal widget performs against the host document.
///
/// Implementations are single-threaded; the widget holds the host for the
/// duration of its lifetime and is its only caller.
pub trait DocumentHost {
    /// Create the widget's backdrop overlay node, detached.
    ///
    /// Called exactly once per widget instance, at construction.
    fn create_overlay(&mut self) -> NodeId;

    /// The widget's rendered root element.
    ///
    /// Containment queries and transition-completion targets are checked
    /// against this node.
    fn modal_root(&self) -> NodeId;

    /// Insert the overlay into the document, before any other host content
    /// so natural stacking places it beneath the modal surface.
    ///
    /// Attaching an already-attached overlay is a no-op.
    fn attach_overlay(&mut self, overlay: NodeId);

    /// Remove the overlay from the document.
    ///
    /// Detaching an absent overlay is a silent no-op.
    fn detach_overlay(&mut self, overlay: NodeId);

    /// Add a class to a node. Adding a present class is a no-op.
    fn add_class(&mut self, node: NodeId, class: &str);

    /// Remove a class from a node. Removing an absent class is a no-op.
    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Add a class to the document root element.
    fn add_root_class(&mut self, class: &str);

    /// Remove a class from the document root element.
    fn remove_root_class(&mut self, class: &str);

    /// Force a synchronous layout read.
    ///
    /// Guarantees that a class change applied afterwards is treated as a new
    /// state by the rendering engine rather than coalesced with a preceding
    /// insertion. Required for the fade transition to play on attach.
    fn force_layout(&mut self);

    /// Whether `target` is `root` or one of its descendants.
    fn contains(&self, root: NodeId, target: NodeId) -> bool;
}

#[cfg(any(test, feature = "test-helpers"))]
pub use recording::{HostOp, RecordingDocument};

#[cfg(any(test, feature = "test-helpers"))]
mod recording {
    use super::{DocumentHost, NodeId};
    use ahash::{AHashMap, AHashSet};

    /// One recorded host operation, in call order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum HostOp {
        CreateOverlay(NodeId),
        AttachOverlay(NodeId),
        DetachOverlay(NodeId),
        AddClass(NodeId, String),
        RemoveClass(NodeId, String),
        AddRootClass(String),
        RemoveRootClass(String),
        ForceLayout,
    }

    /// In-memory document host that records every operation.
    ///
    /// Used by the lifecycle test suites to assert side-effect ordering
    /// (attach, forced layout, class application) without a real surface.
    /// The modal root is pre-assigned id 1; consumer nodes can be marked as
    /// descendants of the root to simulate inside clicks.
    #[derive(Debug)]
    pub struct RecordingDocument {
        next_id: u64,
        root: NodeId,
        overlay_attached: Option<NodeId>,
        classes: AHashMap<NodeId, Vec<String>>,
        root_classes: Vec<String>,
        descendants: AHashSet<NodeId>,
        ops: Vec<HostOp>,
        layout_reads: u32,
    }

    impl Default for RecordingDocument {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RecordingDocument {
        /// Create an empty document with the modal root at id 1.
        #[must_use]
        pub fn new() -> Self {
            Self {
                next_id: 2,
                root: NodeId::new(1),
                overlay_attached: None,
                classes: AHashMap::new(),
                root_classes: Vec::new(),
                descendants: AHashSet::new(),
                ops: Vec::new(),
                layout_reads: 0,
            }
        }

        /// Allocate a fresh node id outside the modal (an "outside" target).
        pub fn outside_node(&mut self) -> NodeId {
            let id = NodeId::new(self.next_id);
            self.next_id += 1;
            id
        }

        /// Allocate a fresh node id contained within the modal root.
        pub fn inside_node(&mut self) -> NodeId {
            let id = NodeId::new(self.next_id);
            self.next_id += 1;
            self.descendants.insert(id);
            id
        }

        /// Whether the overlay is currently attached.
        #[must_use]
        pub fn overlay_is_attached(&self) -> bool {
            self.overlay_attached.is_some()
        }

        /// Whether `node` currently carries `class`.
        #[must_use]
        pub fn has_class(&self, node: NodeId, class: &str) -> bool {
            self.classes
                .get(&node)
                .is_some_and(|list| list.iter().any(|c| c == class))
        }

        /// Whether the document root currently carries `class`.
        #[must_use]
        pub fn root_has_class(&self, class: &str) -> bool {
            self.root_classes.iter().any(|c| c == class)
        }

        /// Number of forced layout reads performed so far.
        #[must_use]
        pub fn layout_reads(&self) -> u32 {
            self.layout_reads
        }

        /// The recorded operation log, in call order.
        #[must_use]
        pub fn ops(&self) -> &[HostOp] {
            &self.ops
        }

        /// Drop the recorded log (the state snapshot is kept).
        pub fn clear_ops(&mut self) {
            self.ops.clear();
        }
    }

    impl DocumentHost for RecordingDocument {
        fn create_overlay(&mut self) -> NodeId {
            let id = NodeId::new(self.next_id);
            self.next_id += 1;
            self.ops.push(HostOp::CreateOverlay(id));
            id
        }

        fn modal_root(&self) -> NodeId {
            self.root
        }

        fn attach_overlay(&mut self, overlay: NodeId) {
            if self.overlay_attached == Some(overlay) {
                return;
            }
            self.overlay_attached = Some(overlay);
            self.ops.push(HostOp::AttachOverlay(overlay));
        }

        fn detach_overlay(&mut self, overlay: NodeId) {
            if self.overlay_attached != Some(overlay) {
                return;
            }
            self.overlay_attached = None;
            self.ops.push(HostOp::DetachOverlay(overlay));
        }

        fn add_class(&mut self, node: NodeId, class: &str) {
            let list = self.classes.entry(node).or_default();
            if list.iter().any(|c| c == class) {
                return;
            }
            list.push(class.to_owned());
            self.ops.push(HostOp::AddClass(node, class.to_owned()));
        }

        fn remove_class(&mut self, node: NodeId, class: &str) {
            let Some(list) = self.classes.get_mut(&node) else {
                return;
            };
            let before = list.len();
            list.retain(|c| c != class);
            if list.len() != before {
                self.ops.push(HostOp::RemoveClass(node, class.to_owned()));
            }
        }

        fn add_root_class(&mut self, class: &str) {
            if self.root_classes.iter().any(|c| c == class) {
                return;
            }
            self.root_classes.push(class.to_owned());
            self.ops.push(HostOp::AddRootClass(class.to_owned()));
        }

        fn remove_root_class(&mut self, class: &str) {
            let before = self.root_classes.len();
            self.root_classes.retain(|c| c != class);
            if self.root_classes.len() != before {
                self.ops.push(HostOp::RemoveRootClass(class.to_owned()));
            }
        }

        fn force_layout(&mut self) {
            self.layout_reads += 1;
            self.ops.push(HostOp::ForceLayout);
        }

        fn contains(&self, root: NodeId, target: NodeId) -> bool {
            root == target || (root == self.root && self.descendants.contains(&target))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_roundtrip() {
        let id = NodeId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id, NodeId::new(42));
        assert_ne!(id, NodeId::new(43));
    }

    #[test]
    fn recording_attach_detach() {
        let mut doc = RecordingDocument::new();
        let overlay = doc.create_overlay();
        assert!(!doc.overlay_is_attached());

        doc.attach_overlay(overlay);
        assert!(doc.overlay_is_attached());

        // Re-attach is a no-op, not a second log entry.
        doc.attach_overlay(overlay);
        doc.detach_overlay(overlay);
        assert!(!doc.overlay_is_attached());

        // Detach when absent is silent.
        doc.detach_overlay(overlay);
        assert_eq!(
            doc.ops(),
            &[
                HostOp::CreateOverlay(overlay),
                HostOp::AttachOverlay(overlay),
                HostOp::DetachOverlay(overlay),
            ]
        );
    }

    #[test]
    fn recording_class_ops_are_idempotent() {
        let mut doc = RecordingDocument::new();
        let overlay = doc.create_overlay();

        doc.add_class(overlay, "show");
        doc.add_class(overlay, "show");
        assert!(doc.has_class(overlay, "show"));

        doc.remove_class(overlay, "show");
        doc.remove_class(overlay, "show");
        assert!(!doc.has_class(overlay, "show"));

        let class_ops = doc
            .ops()
            .iter()
            .filter(|op| matches!(op, HostOp::AddClass(..) | HostOp::RemoveClass(..)))
            .count();
        assert_eq!(class_ops, 2);
    }

    #[test]
    fn recording_containment() {
        let mut doc = RecordingDocument::new();
        let root = doc.modal_root();
        let inside = doc.inside_node();
        let outside = doc.outside_node();

        assert!(doc.contains(root, root));
        assert!(doc.contains(root, inside));
        assert!(!doc.contains(root, outside));
    }

    #[test]
    fn recording_root_classes() {
        let mut doc = RecordingDocument::new();
        doc.add_root_class("modal-open");
        assert!(doc.root_has_class("modal-open"));
        doc.remove_root_class("modal-open");
        assert!(!doc.root_has_class("modal-open"));
    }
}
