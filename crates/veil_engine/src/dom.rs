//! Mutable document model.
//!
//! A thin element tree over `ego_tree` with a drainable mutation log, standing
//! in for the live document a tab agent filters. Mutation records carry only
//! node ids; an id is an arena index, never a reference that would keep a
//! removed subtree alive.

use ego_tree::{NodeId, Tree};

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    hidden: bool,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            text: String::new(),
            hidden: false,
        }
    }

    /// Builder-style attribute setter.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    /// Builder-style own-text setter.
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn own_text(&self) -> &str {
        &self.text
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
    }
}

/// One observed tree change, drained in batches by the mutation engine.
/// `Removed` is recorded for every node of a detached subtree so side tables
/// can prune their entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Added(NodeId),
    Removed(NodeId),
}

/// A mutable document: element tree, location URL and pending mutations.
pub struct Document {
    tree: Tree<Element>,
    location: String,
    pending: Vec<Mutation>,
}

impl Document {
    pub fn new(location: &str) -> Self {
        Self {
            tree: Tree::new(Element::new("body")),
            location: location.to_string(),
            pending: Vec::new(),
        }
    }

    /// Builds a document from an HTML fragment. Content present at load time
    /// produces no mutation records; the initial scan covers it.
    pub fn from_html(location: &str, html: &str) -> Self {
        let mut doc = Self::new(location);
        let root = doc.root();
        doc.import_fragment(root, html, false);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Single-page navigation: the location changes, the tree stays.
    pub fn navigate(&mut self, url: &str) {
        self.location = url.to_string();
    }

    /// Appends one element under `parent`, recording an addition.
    /// Returns `None` when `parent` is not a node of this document.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        let id = self.insert(parent, element)?;
        self.pending.push(Mutation::Added(id));
        Some(id)
    }

    /// Parses an HTML fragment and appends it under `parent`, recording one
    /// addition per top-level element (the shape mutation observers report).
    pub fn append_html(&mut self, parent: NodeId, html: &str) -> Vec<NodeId> {
        self.import_fragment(parent, html, true)
    }

    /// Detaches a subtree, recording removals for every node in it.
    pub fn remove(&mut self, id: NodeId) {
        let ids = self.subtree_ids(id);
        if ids.is_empty() {
            return;
        }
        if let Some(mut node) = self.tree.get_mut(id) {
            node.detach();
        }
        self.pending
            .extend(ids.into_iter().map(Mutation::Removed));
    }

    /// Drains the pending mutation records in occurrence order.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.pending)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.tree.get(id).map(|node| node.value())
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if let Some(mut node) = self.tree.get_mut(id) {
            node.value().hidden = hidden;
        }
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.element(id).map(|el| el.hidden).unwrap_or(false)
    }

    /// Whether `id` is still reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let root = self.root();
        match self.tree.get(id) {
            Some(_) if id == root => true,
            Some(node) => node.ancestors().any(|a| a.id() == root),
            None => false,
        }
    }

    /// Concatenated text of the subtree rooted at `id`, space-joined.
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.tree.get(id) else {
            return String::new();
        };
        let mut out = String::new();
        for descendant in node.descendants() {
            let text = descendant.value().own_text();
            if text.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(text);
        }
        out
    }

    /// All descendants of `within` (excluding it) whose element matches,
    /// in document order.
    pub fn select(&self, within: NodeId, matcher: &crate::Matcher) -> Vec<NodeId> {
        let Some(node) = self.tree.get(within) else {
            return Vec::new();
        };
        node.descendants()
            .skip(1)
            .filter(|n| matcher.matches(n.value()))
            .map(|n| n.id())
            .collect()
    }

    fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .get(id)
            .map(|node| node.descendants().map(|n| n.id()).collect())
            .unwrap_or_default()
    }

    fn insert(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        let mut parent = self.tree.get_mut(parent)?;
        Some(parent.append(element).id())
    }

    fn import_fragment(&mut self, parent: NodeId, html: &str, record: bool) -> Vec<NodeId> {
        let fragment = scraper::Html::parse_fragment(html);
        let context = fragment.root_element();
        let mut roots = Vec::new();
        for child in context.children() {
            if let Some(id) = self.import_node(parent, child) {
                if record {
                    self.pending.push(Mutation::Added(id));
                }
                roots.push(id);
            }
        }
        roots
    }

    fn import_node(
        &mut self,
        parent: NodeId,
        node: ego_tree::NodeRef<'_, scraper::Node>,
    ) -> Option<NodeId> {
        let source = node.value().as_element()?;
        let mut element = Element::new(source.name());
        for (name, value) in source.attrs() {
            element = element.attr(name, value);
        }
        let id = self.insert(parent, element)?;
        for child in node.children() {
            if let Some(text) = child.value().as_text() {
                if let Some(mut target) = self.tree.get_mut(id) {
                    target.value().push_text(text.trim());
                }
            } else {
                self.import_node(id, child);
            }
        }
        Some(id)
    }
}
