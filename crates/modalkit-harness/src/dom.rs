#![forbid(unsafe_code)]

//! In-memory document implementing every host capability.
//!
//! Nodes form a tree rooted at `body`. Tab order is document order
//! (pre-order traversal) over nodes flagged tabbable. The document records
//! every side effect the manager causes so tests can assert on it: z-index
//! and visibility per node, focus history, live overlays and listeners.

use std::fmt;

use ahash::AHashSet;
use modalkit::{DialogHost, DialogSize};
use modalkit_core::{ElementTree, EventKind, HookId, InputChannel, OverlayHost, OverlayStyle};

/// Handle to a node in a [`MemoryDom`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Handle to an overlay created through [`OverlayHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(u32);

/// A live overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRecord {
    pub id: OverlayId,
    pub style: OverlayStyle,
}

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    children: Vec<NodeId>,
    tabbable: bool,
    autofocus: bool,
    z_index: Option<i32>,
    visible: bool,
    title: Option<String>,
    size: DialogSize,
    scroll_resets: usize,
}

/// Fake document for driving a `ModalManager` in tests.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    parents: Vec<Option<NodeId>>,
    focused: Option<NodeId>,
    focus_history: Vec<NodeId>,
    overlays: Vec<OverlayRecord>,
    next_overlay: u32,
    overlays_created: usize,
    max_live_overlays: usize,
    listeners: AHashSet<(EventKind, HookId)>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Create a document holding only `body`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                tag: "body".into(),
                visible: true,
                ..Node::default()
            }],
            parents: vec![None],
            focused: None,
            focus_history: Vec::new(),
            overlays: Vec::new(),
            next_overlay: 0,
            overlays_created: 0,
            max_live_overlays: 0,
            listeners: AHashSet::new(),
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    // --- Building ---

    fn append(&mut self, parent: NodeId, tag: &str, tabbable: bool, autofocus: bool) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            tag: tag.to_owned(),
            tabbable,
            autofocus,
            visible: true,
            ..Node::default()
        });
        self.parents.push(Some(parent));
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Append a plain, non-focusable element.
    pub fn element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.append(parent, tag, false, false)
    }

    /// Append a focus-capable element.
    pub fn input(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.append(parent, tag, true, false)
    }

    /// Append a focus-capable element marked for auto-focus.
    pub fn autofocus_input(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.append(parent, tag, true, true)
    }

    /// Append a hidden dialog container under `body`.
    pub fn dialog(&mut self, tag: &str) -> NodeId {
        let id = self.element(self.body(), tag);
        self.nodes[id.index()].visible = false;
        id
    }

    // --- Inspection ---

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.index()].tag
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Every focus change, in order.
    pub fn focus_history(&self) -> &[NodeId] {
        &self.focus_history
    }

    pub fn clear_focus_history(&mut self) {
        self.focus_history.clear();
    }

    /// Focus a node directly, as a user click or script would.
    pub fn set_focus(&mut self, node: Option<NodeId>) {
        self.focused = node;
        if let Some(node) = node {
            self.focus_history.push(node);
        }
    }

    pub fn z_index(&self, node: NodeId) -> Option<i32> {
        self.nodes[node.index()].z_index
    }

    pub fn is_visible(&self, node: NodeId) -> bool {
        self.nodes[node.index()].visible
    }

    pub fn title(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.index()].title.as_deref()
    }

    pub fn size(&self, node: NodeId) -> DialogSize {
        self.nodes[node.index()].size
    }

    pub fn scroll_resets(&self, node: NodeId) -> usize {
        self.nodes[node.index()].scroll_resets
    }

    /// Live overlays, first child of `body` first.
    pub fn overlays(&self) -> &[OverlayRecord] {
        &self.overlays
    }

    /// Overlays created over the document's lifetime.
    pub fn overlays_created(&self) -> usize {
        self.overlays_created
    }

    /// Highest number of overlays ever live at once.
    pub fn max_live_overlays(&self) -> usize {
        self.max_live_overlays
    }

    /// Whether any listener is bound for `kind`.
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.iter().any(|(k, _)| *k == kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether the node and all its ancestors are visible.
    pub fn is_rendered(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if !self.nodes[n.index()].visible {
                return false;
            }
            current = self.parents[n.index()];
        }
        true
    }

    /// Browser default Tab handling: move focus to the next (or previous)
    /// rendered tabbable node in document order, counting from the focused
    /// node whether or not it is tabbable itself. Running off either end
    /// leaves the document with nothing focused.
    pub fn default_tab(&mut self, backward: bool) {
        let order = self.descendants(self.body());
        let position = self
            .focused
            .and_then(|focused| order.iter().position(|&n| n == focused));
        let tabbable = |n: &&NodeId| self.nodes[n.index()].tabbable && self.is_rendered(**n);
        let next = match (position, backward) {
            (None, false) => order.iter().find(tabbable),
            (None, true) => order.iter().rev().find(tabbable),
            (Some(i), false) => order[i + 1..].iter().find(tabbable),
            (Some(i), true) => order[..i].iter().rev().find(tabbable),
        }
        .copied();
        self.set_focus(next);
    }

    /// Pre-order descendants of `root`, excluding `root`.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut pending: Vec<NodeId> =
            self.nodes[root.index()].children.iter().rev().copied().collect();
        while let Some(node) = pending.pop() {
            out.push(node);
            pending.extend(self.nodes[node.index()].children.iter().rev().copied());
        }
        out
    }
}

impl ElementTree for MemoryDom {
    type Element = NodeId;

    fn set_z_index(&mut self, element: &NodeId, z_index: i32) {
        self.nodes[element.index()].z_index = Some(z_index);
    }

    fn set_visible(&mut self, element: &NodeId, visible: bool) {
        self.nodes[element.index()].visible = visible;
    }

    fn focus(&mut self, element: &NodeId) {
        self.set_focus(Some(*element));
    }

    fn contains(&self, root: &NodeId, node: &NodeId) -> bool {
        let mut current = Some(*node);
        while let Some(n) = current {
            if n == *root {
                return true;
            }
            current = self.parents[n.index()];
        }
        false
    }

    fn tabbables(&self, root: &NodeId) -> Vec<NodeId> {
        self.descendants(*root)
            .into_iter()
            .filter(|n| self.nodes[n.index()].tabbable)
            .collect()
    }

    fn autofocus_target(&self, root: &NodeId) -> Option<NodeId> {
        self.descendants(*root).into_iter().find(|n| {
            let node = &self.nodes[n.index()];
            node.tabbable && node.autofocus
        })
    }
}

impl OverlayHost for MemoryDom {
    type Overlay = OverlayId;

    fn create_overlay(&mut self, style: OverlayStyle) -> OverlayId {
        let id = OverlayId(self.next_overlay);
        self.next_overlay += 1;
        self.overlays.insert(0, OverlayRecord { id, style });
        self.overlays_created += 1;
        self.max_live_overlays = self.max_live_overlays.max(self.overlays.len());
        id
    }

    fn destroy_overlay(&mut self, overlay: OverlayId) {
        self.overlays.retain(|o| o.id != overlay);
    }
}

impl InputChannel for MemoryDom {
    fn on(&mut self, kind: EventKind, hook: HookId) {
        self.listeners.insert((kind, hook));
    }

    fn off(&mut self, kind: EventKind, hook: HookId) {
        self.listeners.remove(&(kind, hook));
    }
}

impl DialogHost for MemoryDom {
    fn set_title(&mut self, element: &NodeId, title: Option<&str>) {
        self.nodes[element.index()].title = title.map(str::to_owned);
    }

    fn set_size(&mut self, element: &NodeId, size: &DialogSize) {
        self.nodes[element.index()].size = *size;
    }

    fn reset_scroll(&mut self, element: &NodeId) {
        self.nodes[element.index()].scroll_resets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_and_transitive() {
        let mut dom = MemoryDom::new();
        let dialog = dom.dialog("dialog");
        let form = dom.element(dialog, "form");
        let field = dom.input(form, "input");
        let other = dom.input(dom.body(), "button");

        assert!(dom.contains(&dialog, &dialog));
        assert!(dom.contains(&dialog, &field));
        assert!(!dom.contains(&dialog, &other));
        assert!(!dom.contains(&field, &dialog));
    }

    #[test]
    fn tabbables_in_document_order() {
        let mut dom = MemoryDom::new();
        let dialog = dom.dialog("dialog");
        let a = dom.input(dialog, "a");
        let group = dom.element(dialog, "div");
        let b = dom.input(group, "b");
        let c = dom.input(dialog, "c");
        assert_eq!(dom.tabbables(&dialog), vec![a, b, c]);
        assert_eq!(dom.tab_bounds(&dialog), Some((a, c)));
    }

    #[test]
    fn autofocus_skips_plain_inputs() {
        let mut dom = MemoryDom::new();
        let dialog = dom.dialog("dialog");
        let _first = dom.input(dialog, "first");
        let marked = dom.autofocus_input(dialog, "marked");
        assert_eq!(dom.autofocus_target(&dialog), Some(marked));
    }

    #[test]
    fn default_tab_walks_and_falls_off() {
        let mut dom = MemoryDom::new();
        let a = dom.input(dom.body(), "a");
        let b = dom.input(dom.body(), "b");
        dom.default_tab(false);
        assert_eq!(dom.focused(), Some(a));
        dom.default_tab(false);
        assert_eq!(dom.focused(), Some(b));
        dom.default_tab(false);
        assert_eq!(dom.focused(), None);
        dom.default_tab(true);
        assert_eq!(dom.focused(), Some(b));
    }

    #[test]
    fn default_tab_from_container_enters_it() {
        let mut dom = MemoryDom::new();
        let before = dom.input(dom.body(), "before");
        let dialog = dom.dialog("dialog");
        let inner = dom.input(dialog, "inner");
        let after = dom.input(dom.body(), "after");
        dom.set_focus(Some(before));
        dom.default_tab(false);
        assert_eq!(dom.focused(), Some(after), "hidden dialog is skipped");

        dom.set_visible(&dialog, true);
        dom.set_focus(Some(dialog));
        dom.default_tab(false);
        assert_eq!(dom.focused(), Some(inner));
        dom.set_focus(Some(dialog));
        dom.default_tab(true);
        assert_eq!(dom.focused(), Some(before));
    }

    #[test]
    fn overlays_prepend_and_track_peak() {
        let mut dom = MemoryDom::new();
        let first = dom.create_overlay(OverlayStyle::from_percent(1, 50));
        let second = dom.create_overlay(OverlayStyle::from_percent(2, 50));
        assert_eq!(dom.overlays()[0].id, second);
        assert_eq!(dom.max_live_overlays(), 2);
        dom.destroy_overlay(first);
        dom.destroy_overlay(second);
        assert!(dom.overlays().is_empty());
        assert_eq!(dom.overlays_created(), 2);
    }

    #[test]
    fn dialogs_start_hidden() {
        let mut dom = MemoryDom::new();
        let dialog = dom.dialog("dialog");
        assert!(!dom.is_visible(dialog));
        assert!(dom.is_visible(dom.body()));
    }
}
