//! Path resolution over a content tree.
//!
//! Paths are slash-delimited folder names; empty segments are discarded, so
//! `"docs//images/"` and `"docs/images"` resolve identically. Resolution
//! walks folder-typed nodes only — a file can never appear mid-path.
//!
//! Two modes exist:
//!
//! - strict: fail as soon as a segment has no matching folder
//! - auto-creating: append a missing folder and descend into it
//!
//! The auto-creating walk **mutates the tree as a side effect of
//! resolution**. Callers hold a `&mut` tree for it precisely so the
//! mutation is visible in the signature; do not wrap it in anything that
//! looks like a pure read.

use crate::node::{FolderNode, Node};
use forge_types::{EntryName, TextError};

/// Splits a path into folder-name segments, discarding empty segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Walks `segments` strictly, returning the children of the final folder.
///
/// Zero segments resolve to `nodes` itself. Returns `None` when any segment
/// has no matching folder; a same-named file does not satisfy a segment.
pub fn resolve_strict<'t>(nodes: &'t [Node], segments: &[&str]) -> Option<&'t [Node]> {
    let mut current = nodes;
    for segment in segments {
        let folder = current.iter().find_map(|node| match node {
            Node::Folder(folder) if folder.name == **segment => Some(folder),
            _ => None,
        })?;
        current = &folder.children;
    }
    Some(current)
}

/// Mutable variant of [`resolve_strict`], for operations that edit the
/// resolved sequence in place.
pub fn resolve_strict_mut<'t>(
    nodes: &'t mut Vec<Node>,
    segments: &[&str],
) -> Option<&'t mut Vec<Node>> {
    let mut current = nodes;
    for segment in segments {
        let folder = current.iter_mut().find_map(|node| match node {
            Node::Folder(folder) if folder.name == **segment => Some(folder),
            _ => None,
        })?;
        current = &mut folder.children;
    }
    Some(current)
}

/// Walks `segments`, appending a missing folder at each step before
/// descending into it, and returns the children of the final folder.
///
/// Idempotent: a second walk of the same path finds the folders the first
/// walk created, so no duplicate chain can appear. Created folders carry an
/// `Add {name}` provenance label and the supplied display timestamp.
///
/// # Errors
///
/// Returns `TextError` when a segment is not a valid entry name (e.g. a
/// whitespace-only segment). The tree is left with any folders created
/// before the offending segment.
pub fn resolve_or_create<'t>(
    nodes: &'t mut Vec<Node>,
    segments: &[&str],
    updated_at: &str,
) -> Result<&'t mut Vec<Node>, TextError> {
    let mut current = nodes;
    for segment in segments {
        let index = match current
            .iter()
            .position(|node| node.is_folder() && *node.name() == **segment)
        {
            Some(index) => index,
            None => {
                let name = EntryName::new(segment)?;
                let label = format!("Add {name}");
                current.push(Node::Folder(FolderNode::new(name, label, updated_at)));
                current.len() - 1
            }
        };
        current = match &mut current[index] {
            Node::Folder(folder) => &mut folder.children,
            // `index` comes from a folder-only match or a folder push above.
            Node::File(_) => unreachable!("resolved index always points at a folder"),
        };
    }
    Ok(current)
}
