//! Navigation tree: walk the content root, prune, sort, and render.
//!
//! The tree is rebuilt from the filesystem on every call. Output is
//! deterministic for a fixed filesystem state: entries are classified,
//! sorted under a single documented policy, and rendered as a nested
//! unordered list with `/content/` links.
//!
//! # Sort policy
//!
//! Files come before directories. Files are ordered by descending date,
//! ties broken by name ascending (case-insensitive); files without a date
//! come after dated ones, ordered by name. Directories are ordered among
//! themselves alphabetically, case-insensitively.

use std::cmp::Ordering;
use std::fmt::Write;
use std::fs;
use std::path::Path;

use crate::util::{display_title, encode_href_path, escape_html, relative_url_path};
use crate::{IgnoreList, SiteError, front_matter, is_content_path};

/// A node in the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    /// File or directory name as it appears on disk.
    pub name: String,
    /// Path relative to the content root, forward-slash separated.
    pub rel_path: String,
    /// File leaf or directory with children.
    pub kind: NodeKind,
}

/// Node classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Eligible content file with its resolved sort date.
    File {
        /// Resolved date (`YYYY-MM-DD`), used for ordering and the badge.
        date: Option<String>,
    },
    /// Directory with at least one eligible descendant. Children are in
    /// final sort order.
    Directory {
        /// Sorted child nodes.
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    fn sort_date(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { date } => date.as_deref(),
            NodeKind::Directory { .. } => None,
        }
    }
}

/// Build the navigation tree for a content root.
///
/// Dotfiles and ignore-listed stems are excluded; files must carry a
/// recognized content extension; directories without any eligible
/// descendant are pruned entirely.
///
/// # Errors
///
/// Returns [`SiteError`] if the root (or any reachable directory or file)
/// cannot be read. The caller renders an error page rather than a partial
/// tree.
pub fn build_tree(root: &Path, ignore: &IgnoreList) -> Result<Vec<TreeNode>, SiteError> {
    walk_directory(root, root, ignore)
}

fn walk_directory(dir: &Path, root: &Path, ignore: &IgnoreList) -> Result<Vec<TreeNode>, SiteError> {
    let entries = fs::read_dir(dir).map_err(|e| SiteError::io(e, dir))?;

    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| SiteError::io(e, dir))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if ignore.contains(&stem) {
            continue;
        }

        let is_dir = entry
            .file_type()
            .map_err(|e| SiteError::io(e, &path))?
            .is_dir();

        if is_dir {
            let children = walk_directory(&path, root, ignore)?;
            if children.is_empty() {
                continue;
            }
            dirs.push(TreeNode {
                name,
                rel_path: relative_url_path(root, &path),
                kind: NodeKind::Directory { children },
            });
        } else {
            if !is_content_path(&path) {
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|e| SiteError::io(e, &path))?;
            let (matter, _) = front_matter::split(&text);
            let date = front_matter::resolve_date(matter.date.as_deref(), &path)?;
            files.push(TreeNode {
                name,
                rel_path: relative_url_path(root, &path),
                kind: NodeKind::File { date: Some(date) },
            });
        }
    }

    files.sort_by(compare_files);
    dirs.sort_by(|a, b| compare_names(&a.name, &b.name));

    files.append(&mut dirs);
    Ok(files)
}

/// File ordering: descending date, name breaking ties; dateless files
/// after dated ones, by name.
fn compare_files(a: &TreeNode, b: &TreeNode) -> Ordering {
    match (a.sort_date(), b.sort_date()) {
        (Some(da), Some(db)) => db.cmp(da).then_with(|| compare_names(&a.name, &b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_names(&a.name, &b.name),
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Render the tree as a nested unordered list.
///
/// The root list opens with a Home link. Files become `/content/` links
/// labeled with the humanized name plus a date badge; directories become
/// expandable items containing their sub-list.
#[must_use]
pub fn render_tree_html(nodes: &[TreeNode]) -> String {
    let mut out = String::from(r#"<ul class="nav-tree">"#);
    out.push_str(r#"<li><a href="/" class="home-link">Home</a></li>"#);
    for node in nodes {
        render_node(node, &mut out);
    }
    out.push_str("</ul>");
    out
}

fn render_node(node: &TreeNode, out: &mut String) {
    let stem = Path::new(&node.name)
        .file_stem()
        .map_or_else(|| node.name.clone(), |s| s.to_string_lossy().into_owned());
    let label = escape_html(&display_title(&stem));

    match &node.kind {
        NodeKind::File { date } => {
            let href = encode_href_path(&node.rel_path);
            let _ = write!(out, r#"<li><a href="/content/{href}">{label}</a>"#);
            if let Some(date) = date {
                let _ = write!(out, r#" <span class="file-date">{}</span>"#, escape_html(date));
            }
            out.push_str("</li>");
        }
        NodeKind::Directory { children } => {
            let _ = write!(
                out,
                r#"<li class="folder open"><span class="folder-name"><i class="fas fa-folder-open"></i> {label}</span><ul>"#
            );
            for child in children {
                render_node(child, out);
            }
            out.push_str("</ul></li>");
        }
    }
}
