//! Idempotent element upserts and sibling re-ordering.
//!
//! Every render pass goes through [`append_select`], so calling a render
//! twice updates the elements created by the first call instead of adding
//! new ones.

use tracing::trace;

use crate::error::ChartResult;
use crate::render::document::{Document, NodeId};

/// Returns the first descendant of `parent` with tag `tag` and exactly the
/// whitespace-separated `classes`, creating and appending it when absent.
///
/// An existing element is returned untouched: its attributes, styles, text
/// and children are kept as they are.
pub fn append_select(
    doc: &mut Document,
    parent: NodeId,
    tag: &str,
    classes: Option<&str>,
) -> ChartResult<NodeId> {
    let mut wanted: Vec<&str> = classes.map_or_else(Vec::new, |c| c.split_whitespace().collect());
    wanted.sort_unstable();
    wanted.dedup();

    let existing = doc.find_descendant(parent, |doc, id| {
        doc.tag(id).is_ok_and(|t| t == tag) && has_exact_classes(doc, id, &wanted)
    })?;
    if let Some(node) = existing {
        return Ok(node);
    }

    let node = doc.create_element(tag);
    if !wanted.is_empty() {
        doc.set_classed(node, &wanted.join(" "), true)?;
    }
    doc.append_child(parent, node)?;
    trace!(tag, classes = classes.unwrap_or(""), "attached element");
    Ok(node)
}

fn has_exact_classes(doc: &Document, node: NodeId, wanted: &[&str]) -> bool {
    let Ok(classes) = doc.classes(node) else {
        return false;
    };
    let mut present: Vec<&str> = classes.iter().map(String::as_str).collect();
    present.sort_unstable();
    present == wanted
}

/// Moves `node` to the end of its parent's children so it paints last.
pub fn move_to_front(doc: &mut Document, node: NodeId) -> ChartResult<()> {
    if let Some(parent) = doc.parent(node)? {
        doc.append_child(parent, node)?;
    }
    Ok(())
}

/// Moves `node` to the start of its parent's children so it paints first.
pub fn move_to_back(doc: &mut Document, node: NodeId) -> ChartResult<()> {
    if let Some(parent) = doc.parent(node)? {
        let first = doc.children(parent)?.first().copied();
        doc.insert_before(parent, node, first)?;
    }
    Ok(())
}
