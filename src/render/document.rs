use std::fmt::Write as _;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Handle to one element of a [`Document`].
///
/// Slots of removed elements are reused; the generation keeps handles to a
/// removed element invalid after its slot is handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }
}

pub type ClassList = SmallVec<[String; 2]>;

#[derive(Debug, Clone, PartialEq)]
struct Element {
    tag: String,
    classes: ClassList,
    attributes: IndexMap<String, String>,
    styles: IndexMap<String, String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layout_width: f64,
    generation: u32,
    removed: bool,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            classes: ClassList::new(),
            attributes: IndexMap::new(),
            styles: IndexMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
            layout_width: 0.0,
            generation: 0,
            removed: false,
        }
    }
}

/// Retained element tree the chart renders into.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Layout is not
/// computed here: hosts report each mount point's measured width through
/// [`Document::set_layout_width`], mirroring a browser's bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Element>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates a detached element, reusing the slot of a removed one when
    /// available.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let mut element = Element::new(tag);
        if let Some(index) = self.free.pop() {
            element.generation = self.nodes[index].generation;
            self.nodes[index] = element;
            return NodeId {
                index,
                generation: self.nodes[index].generation,
            };
        }
        self.nodes.push(element);
        NodeId {
            index: self.nodes.len() - 1,
            generation: 0,
        }
    }

    /// Number of slots held by the arena, live or free.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> ChartResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` before `reference` under `parent`, or appends it when
    /// `reference` is `None`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> ChartResult<()> {
        self.element(parent)?;
        self.element(child)?;
        if child == parent || self.is_ancestor(child, parent) {
            return Err(ChartError::InvalidData(
                "cannot insert a node into its own subtree".to_owned(),
            ));
        }
        if let Some(reference) = reference {
            if reference == child {
                return Ok(());
            }
            if self.element(reference)?.parent != Some(parent) {
                return Err(ChartError::InvalidData(
                    "reference node is not a child of the parent".to_owned(),
                ));
            }
        }

        self.detach(child);
        let position = match reference {
            Some(reference) => self.nodes[parent.index]
                .children
                .iter()
                .position(|id| *id == reference)
                .unwrap_or(self.nodes[parent.index].children.len()),
            None => self.nodes[parent.index].children.len(),
        };
        self.nodes[parent.index].children.insert(position, child);
        self.nodes[child.index].parent = Some(parent);
        Ok(())
    }

    /// Removes `node` and its subtree. Handles to removed nodes become invalid
    /// and their slots are recycled by later [`Document::create_element`] calls.
    pub fn remove(&mut self, node: NodeId) -> ChartResult<()> {
        self.element(node)?;
        if node == self.root {
            return Err(ChartError::InvalidData(
                "the document root cannot be removed".to_owned(),
            ));
        }
        self.detach(node);
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let element = &mut self.nodes[id.index];
            element.removed = true;
            element.generation = element.generation.wrapping_add(1);
            stack.extend(element.children.drain(..));
            self.free.push(id.index);
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.element(node).is_ok()
    }

    pub fn tag(&self, node: NodeId) -> ChartResult<&str> {
        Ok(&self.element(node)?.tag)
    }

    pub fn parent(&self, node: NodeId) -> ChartResult<Option<NodeId>> {
        Ok(self.element(node)?.parent)
    }

    pub fn children(&self, node: NodeId) -> ChartResult<&[NodeId]> {
        Ok(&self.element(node)?.children)
    }

    pub fn classes(&self, node: NodeId) -> ChartResult<&[String]> {
        Ok(&self.element(node)?.classes)
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_ok_and(|element| element.classes.iter().any(|c| c == class))
    }

    /// Adds or removes each whitespace-separated class in `classes`.
    pub fn set_classed(&mut self, node: NodeId, classes: &str, enabled: bool) -> ChartResult<()> {
        let element = self.element_mut(node)?;
        for class in classes.split_whitespace() {
            let present = element.classes.iter().position(|c| c == class);
            match (present, enabled) {
                (None, true) => element.classes.push(class.to_owned()),
                (Some(index), false) => {
                    element.classes.remove(index);
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> ChartResult<Option<&str>> {
        Ok(self.element(node)?.attributes.get(name).map(String::as_str))
    }

    pub fn set_attr(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> ChartResult<()> {
        self.element_mut(node)?
            .attributes
            .insert(name.to_owned(), value.into());
        Ok(())
    }

    pub fn style(&self, node: NodeId, property: &str) -> ChartResult<Option<&str>> {
        Ok(self.element(node)?.styles.get(property).map(String::as_str))
    }

    pub fn set_style(
        &mut self,
        node: NodeId,
        property: &str,
        value: impl Into<String>,
    ) -> ChartResult<()> {
        self.element_mut(node)?
            .styles
            .insert(property.to_owned(), value.into());
        Ok(())
    }

    pub fn text(&self, node: NodeId) -> ChartResult<Option<&str>> {
        Ok(self.element(node)?.text.as_deref())
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) -> ChartResult<()> {
        self.element_mut(node)?.text = Some(text.into());
        Ok(())
    }

    /// Measured pixel width of `node`, as last reported by the host.
    pub fn layout_width(&self, node: NodeId) -> ChartResult<f64> {
        Ok(self.element(node)?.layout_width)
    }

    pub fn set_layout_width(&mut self, node: NodeId, width: f64) -> ChartResult<()> {
        if !width.is_finite() || width < 0.0 {
            return Err(ChartError::InvalidData(
                "layout width must be finite and >= 0".to_owned(),
            ));
        }
        self.element_mut(node)?.layout_width = width;
        Ok(())
    }

    /// First descendant of `scope` (pre-order, `scope` excluded) accepted by
    /// `predicate`.
    pub fn find_descendant(
        &self,
        scope: NodeId,
        mut predicate: impl FnMut(&Document, NodeId) -> bool,
    ) -> ChartResult<Option<NodeId>> {
        let mut stack: Vec<NodeId> = self.element(scope)?.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if predicate(self, id) {
                return Ok(Some(id));
            }
            stack.extend(self.nodes[id.index].children.iter().rev().copied());
        }
        Ok(None)
    }

    /// All descendants of `scope` in pre-order.
    pub fn descendants(&self, scope: NodeId) -> ChartResult<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.element(scope)?.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.index].children.iter().rev().copied());
        }
        Ok(out)
    }

    /// First descendant of `scope` matching a simple selector such as
    /// `#chart`, `svg`, `path.density` or `.legend`.
    pub fn select(&self, scope: NodeId, selector: &str) -> ChartResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        self.find_descendant(scope, |doc, id| selector.matches(&doc.nodes[id.index]))
    }

    /// Every descendant of `scope` matching `selector`, in document order.
    pub fn select_all(&self, scope: NodeId, selector: &str) -> ChartResult<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)?
            .into_iter()
            .filter(|id| selector.matches(&self.nodes[id.index]))
            .collect())
    }

    /// Serializes `node` and its subtree as HTML/SVG markup.
    ///
    /// Attributes are written in insertion order, followed by `class` and
    /// `style`, so equal trees always serialize identically.
    pub fn to_markup(&self, node: NodeId) -> ChartResult<String> {
        self.element(node)?;
        let mut out = String::new();
        self.write_markup(node, &mut out);
        Ok(out)
    }

    /// Serializes the children of `node` without the node itself.
    pub fn inner_markup(&self, node: NodeId) -> ChartResult<String> {
        let mut out = String::new();
        for child in &self.element(node)?.children {
            self.write_markup(*child, &mut out);
        }
        Ok(out)
    }

    fn write_markup(&self, node: NodeId, out: &mut String) {
        let element = &self.nodes[node.index];
        let _ = write!(out, "<{}", element.tag);
        for (name, value) in &element.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }
        if !element.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&element.classes.join(" ")));
        }
        if !element.styles.is_empty() {
            let style = element
                .styles
                .iter()
                .map(|(property, value)| format!("{property}: {value};"))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }
        out.push('>');
        if let Some(text) = &element.text {
            out.push_str(&escape(text));
        }
        for child in &element.children {
            self.write_markup(*child, out);
        }
        let _ = write!(out, "</{}>", element.tag);
    }

    fn element(&self, node: NodeId) -> ChartResult<&Element> {
        match self.nodes.get(node.index) {
            Some(element) if !element.removed && element.generation == node.generation => {
                Ok(element)
            }
            _ => Err(ChartError::UnknownNode(node.index)),
        }
    }

    fn element_mut(&mut self, node: NodeId) -> ChartResult<&mut Element> {
        match self.nodes.get_mut(node.index) {
            Some(element) if !element.removed && element.generation == node.generation => {
                Ok(element)
            }
            _ => Err(ChartError::UnknownNode(node.index)),
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.index].parent.take() {
            self.nodes[parent.index].children.retain(|id| *id != node);
        }
    }

    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes[node.index].parent;
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes[id.index].parent;
        }
        false
    }
}

/// Compound selector: optional tag, optional `#id`, any number of `.class`.
#[derive(Debug, Default, PartialEq, Eq)]
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: ClassList,
}

impl Selector {
    fn parse(input: &str) -> ChartResult<Self> {
        let input = input.trim();
        if input.is_empty() || input.contains(char::is_whitespace) {
            return Err(ChartError::InvalidData(format!(
                "unsupported selector `{input}`"
            )));
        }

        let mut selector = Selector::default();
        let mut kind = ' ';
        let mut current = String::new();
        for ch in input.chars().chain(std::iter::once('\0')) {
            if matches!(ch, '#' | '.' | '\0') {
                match kind {
                    ' ' if !current.is_empty() => selector.tag = Some(current.clone()),
                    '#' if !current.is_empty() => selector.id = Some(current.clone()),
                    '.' if !current.is_empty() => selector.classes.push(current.clone()),
                    ' ' => {}
                    _ => {
                        return Err(ChartError::InvalidData(format!(
                            "empty name in selector `{input}`"
                        )));
                    }
                }
                current.clear();
                kind = ch;
            } else {
                current.push(ch);
            }
        }
        Ok(selector)
    }

    fn matches(&self, element: &Element) -> bool {
        if element.removed {
            return false;
        }
        if self.tag.as_ref().is_some_and(|tag| *tag != element.tag) {
            return false;
        }
        if self
            .id
            .as_ref()
            .is_some_and(|id| element.attributes.get("id") != Some(id))
        {
            return false;
        }
        self.classes
            .iter()
            .all(|class| element.classes.iter().any(|c| c == class))
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
