//! Tree mutator primitives.
//!
//! Pure in-memory operations over a node sequence. Persistence and blob
//! storage live in the service layer; everything here takes `&mut
//! Vec<Node>` and returns an updated sequence or a precise error.
//!
//! ## Duplicate-name scopes
//!
//! The three insert operations deliberately check different scopes, and the
//! asymmetry is part of the caller contract — do not unify it:
//!
//! - [`add_file`]: root-level "new file" — collides with **file** siblings
//!   only; a folder with the same name does not block it
//! - [`add_folder`]: root-level "new folder" — collides with **any**
//!   sibling, file or folder
//! - [`attach_blob`]: upload into a resolved folder — collides with
//!   **file** siblings in that folder only, so an uploaded `docs` file can
//!   coexist with a manually created `docs` folder

use crate::error::{ContentError, ContentResult};
use crate::node::{BlobRef, FileBody, FileNode, FolderNode, Node};
use forge_types::EntryName;

/// True when the sequence already holds a **file** with this name.
///
/// Used by callers that must reject a duplicate before doing work with side
/// effects (an upload checks this before writing the blob).
pub fn contains_file(nodes: &[Node], name: &EntryName) -> bool {
    nodes
        .iter()
        .any(|node| matches!(node, Node::File(file) if file.name == *name))
}

/// True when the sequence holds any entry with this name, file or folder.
pub fn contains_entry(nodes: &[Node], name: &EntryName) -> bool {
    nodes.iter().any(|node| *node.name() == *name)
}

/// Appends a new inline-or-empty file to the sequence.
///
/// Collision scope: **file** siblings only.
///
/// # Errors
///
/// Returns `ContentError::DuplicateName` when a file with this name already
/// exists in `nodes`.
pub fn add_file(
    nodes: &mut Vec<Node>,
    name: EntryName,
    content: Option<String>,
    updated_at: &str,
) -> ContentResult<()> {
    if contains_file(nodes, &name) {
        return Err(ContentError::DuplicateName(name.to_string()));
    }
    let last_change = format!("Add {name}");
    nodes.push(Node::File(FileNode {
        body: content.map(|content| FileBody::Inline { content }),
        name,
        last_change,
        updated_at: updated_at.to_owned(),
    }));
    Ok(())
}

/// Appends a new empty folder to the sequence.
///
/// Collision scope: **all** siblings, file or folder.
///
/// # Errors
///
/// Returns `ContentError::DuplicateName` when any entry with this name
/// already exists in `nodes`.
pub fn add_folder(nodes: &mut Vec<Node>, name: EntryName, updated_at: &str) -> ContentResult<()> {
    if contains_entry(nodes, &name) {
        return Err(ContentError::DuplicateName(name.to_string()));
    }
    let last_change = format!("Add {name} folder");
    nodes.push(Node::Folder(FolderNode::new(name, last_change, updated_at)));
    Ok(())
}

/// Appends a blob-backed file to an already-resolved folder sequence.
///
/// Collision scope: **file** siblings in the target folder only.
///
/// # Errors
///
/// Returns `ContentError::DuplicateName` when a file with this name already
/// exists in the target folder.
pub fn attach_blob(
    nodes: &mut Vec<Node>,
    name: EntryName,
    blob: BlobRef,
    updated_at: &str,
) -> ContentResult<()> {
    if contains_file(nodes, &name) {
        return Err(ContentError::DuplicateName(name.to_string()));
    }
    let last_change = format!("Upload {name}");
    nodes.push(Node::File(FileNode {
        body: Some(FileBody::Blob(blob)),
        name,
        last_change,
        updated_at: updated_at.to_owned(),
    }));
    Ok(())
}

/// Finds a file by exact name in a sequence.
pub fn find_file<'t>(nodes: &'t [Node], name: &str) -> Option<&'t FileNode> {
    nodes.iter().find_map(|node| node.as_file_named(name))
}

/// Removes the file with the given name and returns it.
///
/// # Errors
///
/// Returns `ContentError::FileNotFound` when no file with this name exists;
/// a folder with the name does not count.
pub fn remove_file(nodes: &mut Vec<Node>, name: &str) -> ContentResult<FileNode> {
    let index = nodes
        .iter()
        .position(|node| matches!(node, Node::File(file) if file.name == *name))
        .ok_or_else(|| ContentError::FileNotFound(name.to_owned()))?;
    match nodes.remove(index) {
        Node::File(file) => Ok(file),
        // position above matched a file
        Node::Folder(_) => unreachable!("removed index always points at a file"),
    }
}

/// Removes the folder with the given name, discarding its whole subtree.
///
/// The cascade is structural: children are owned values, so removing the
/// folder node is the delete.
///
/// # Errors
///
/// Returns `ContentError::FolderNotFound` when no folder with this name
/// exists; a file with the name does not count.
pub fn remove_folder(nodes: &mut Vec<Node>, name: &str) -> ContentResult<FolderNode> {
    let index = nodes
        .iter()
        .position(|node| matches!(node, Node::Folder(folder) if folder.name == *name))
        .ok_or_else(|| ContentError::FolderNotFound(name.to_owned()))?;
    match nodes.remove(index) {
        Node::Folder(folder) => Ok(folder),
        Node::File(_) => unreachable!("removed index always points at a folder"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve;

    fn name(s: &str) -> EntryName {
        EntryName::new(s).expect("valid test name")
    }

    fn blob(key: &str) -> BlobRef {
        BlobRef {
            key: key.to_owned(),
            url: format!("memory://{key}"),
            size_bytes: 4,
        }
    }

    #[test]
    fn test_add_file_rejects_duplicate_file() {
        let mut root = Vec::new();
        add_file(&mut root, name("readme.md"), Some("a".into()), "t0").expect("first add");
        let err = add_file(&mut root, name("readme.md"), Some("b".into()), "t1")
            .expect_err("second add should collide");
        assert!(matches!(err, ContentError::DuplicateName(n) if n == "readme.md"));

        // First file's content is untouched.
        let file = find_file(&root, "readme.md").expect("file still present");
        assert_eq!(
            file.body,
            Some(FileBody::Inline { content: "a".into() })
        );
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn test_add_file_ignores_folder_with_same_name() {
        let mut root = Vec::new();
        add_folder(&mut root, name("docs"), "t0").expect("add folder");
        add_file(&mut root, name("docs"), None, "t1")
            .expect("a folder named 'docs' must not block a root file add");
        assert_eq!(root.len(), 2);
    }

    #[test]
    fn test_add_folder_rejects_any_same_named_sibling() {
        let mut root = Vec::new();
        add_file(&mut root, name("docs"), None, "t0").expect("add file");
        let err = add_folder(&mut root, name("docs"), "t1")
            .expect_err("a file named 'docs' blocks a folder add");
        assert!(matches!(err, ContentError::DuplicateName(_)));

        add_folder(&mut root, name("src"), "t2").expect("add folder");
        let err = add_folder(&mut root, name("src"), "t3")
            .expect_err("a folder named 'src' blocks a folder add");
        assert!(matches!(err, ContentError::DuplicateName(_)));
    }

    #[test]
    fn test_attach_blob_checks_files_only_in_target() {
        let mut root = Vec::new();
        add_folder(&mut root, name("docs"), "t0").expect("add folder");

        // A same-named folder does not block the upload at root.
        attach_blob(&mut root, name("docs"), blob("repos/r/docs"), "t1")
            .expect("upload may coexist with a folder of the same name");

        let err = attach_blob(&mut root, name("docs"), blob("repos/r/docs"), "t2")
            .expect_err("a same-named uploaded file does block");
        assert!(matches!(err, ContentError::DuplicateName(_)));
    }

    #[test]
    fn test_add_file_provenance_labels() {
        let mut root = Vec::new();
        add_file(&mut root, name("a.txt"), None, "t0").expect("add file");
        add_folder(&mut root, name("docs"), "t0").expect("add folder");
        attach_blob(&mut root, name("logo.png"), blob("k"), "t0").expect("attach");

        let Node::File(file) = &root[0] else {
            panic!("expected file")
        };
        assert_eq!(file.last_change, "Add a.txt");
        let Node::Folder(folder) = &root[1] else {
            panic!("expected folder")
        };
        assert_eq!(folder.last_change, "Add docs folder");
        let Node::File(upload) = &root[2] else {
            panic!("expected file")
        };
        assert_eq!(upload.last_change, "Upload logo.png");
    }

    #[test]
    fn test_remove_file_leaves_folder_untouched() {
        let mut root = Vec::new();
        add_folder(&mut root, name("notes"), "t0").expect("add folder");
        let err = remove_file(&mut root, "notes").expect_err("folder does not count as file");
        assert!(matches!(err, ContentError::FileNotFound(_)));

        add_file(&mut root, name("notes"), None, "t1").expect("add file");
        let removed = remove_file(&mut root, "notes").expect("file removal");
        assert_eq!(removed.name.as_str(), "notes");
        assert_eq!(root.len(), 1, "folder remains");
        assert!(root[0].is_folder());
    }

    #[test]
    fn test_remove_folder_cascades_structurally() {
        let mut root = Vec::new();
        let children = resolve::resolve_or_create(&mut root, &["docs", "images"], "t0")
            .expect("vivify docs/images");
        add_file(children, name("logo.png"), None, "t0").expect("nested file");

        let removed = remove_folder(&mut root, "docs").expect("remove docs");
        assert_eq!(removed.children.len(), 1, "subtree travels with the node");
        assert!(root.is_empty());
        assert!(resolve::resolve_strict(&root, &["docs"]).is_none());
        assert!(resolve::resolve_strict(&root, &["docs", "images"]).is_none());
    }

    #[test]
    fn test_remove_missing_reports_distinct_kinds() {
        let mut root = Vec::new();
        assert!(matches!(
            remove_file(&mut root, "ghost.txt"),
            Err(ContentError::FileNotFound(_))
        ));
        assert!(matches!(
            remove_folder(&mut root, "ghost"),
            Err(ContentError::FolderNotFound(_))
        ));
    }
}
