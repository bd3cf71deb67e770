//! Hierarchical view of a section index.
//!
//! The index is keyed by full path in close order; the tree puts sections
//! back under their parents in document order for display.

use indextree::{Arena, NodeId};
use serde::Serialize;
use std::collections::HashMap;

use super::section::{Section, SectionIndex};

/// Sections arranged by nesting.
pub struct SectionTree<'a> {
    arena: Arena<&'a Section>,
    roots: Vec<NodeId>,
}

/// Owned tree node for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionNode {
    pub name: String,
    pub path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub children: Vec<SectionNode>,
}

impl<'a> SectionTree<'a> {
    /// Build the tree. Sections whose parent path is missing become roots.
    pub fn from_index(index: &'a SectionIndex) -> Self {
        let mut arena = Arena::new();
        let mut roots = Vec::new();
        let mut ids: HashMap<&'a str, NodeId> = HashMap::new();

        for section in index.in_document_order() {
            let id = arena.new_node(section);
            let parent = section
                .parent_path()
                .and_then(|parent| ids.get(parent.as_str()).copied());

            match parent {
                Some(parent_id) => parent_id.append(id, &mut arena),
                None => roots.push(id),
            }
            ids.insert(section.path.as_str(), id);
        }

        Self { arena, roots }
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn section(&self, id: NodeId) -> Option<&'a Section> {
        self.arena.get(id).map(|node| *node.get())
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Convert to owned nodes.
    pub fn to_nodes(&self) -> Vec<SectionNode> {
        self.roots.iter().filter_map(|&id| self.node(id)).collect()
    }

    fn node(&self, id: NodeId) -> Option<SectionNode> {
        let section = self.section(id)?;
        Some(SectionNode {
            name: section.name.clone(),
            path: section.path.clone(),
            start_line: section.start_line,
            end_line: section.end_line,
            children: self.children(id).filter_map(|c| self.node(c)).collect(),
        })
    }

    /// Render with box-drawing characters, one section per line.
    pub fn render_box_tree(&self) -> String {
        let mut out = String::new();
        let count = self.roots.len();
        for (i, &id) in self.roots.iter().enumerate() {
            self.render_node(id, "", i + 1 == count, &mut out);
        }
        out
    }

    fn render_node(&self, id: NodeId, prefix: &str, is_last: bool, out: &mut String) {
        let Some(section) = self.section(id) else {
            return;
        };

        let connector = if is_last { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&section.name);
        out.push('\n');

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        let children: Vec<_> = self.children(id).collect();
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.render_node(child, &child_prefix, i + 1 == count, out);
        }
    }
}
