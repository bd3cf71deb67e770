//! Section and interface index types.
//!
//! Both indexes are insertion-ordered maps. Sections are inserted in the
//! order they close, so a child always precedes its parent. Re-inserting an
//! existing path keeps its original position and replaces the section.

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};

/// Separator placed between ancestor names in a full section path.
pub const PATH_SEPARATOR: &str = " > ";

/// A `config ... end` block with its full nested body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Local name (text after `config `)
    pub name: String,
    /// Full path, ancestor names joined with [`PATH_SEPARATOR`]
    pub path: String,
    /// Path components, outermost first
    pub components: Vec<String>,
    /// Verbatim text from the opener to the closer, newline-joined
    pub body: String,
    /// Line number of the `config` opener (1-indexed)
    pub start_line: usize,
    /// Line number of the `end` closer (1-indexed)
    pub end_line: usize,
}

impl Section {
    /// Nesting depth (1 for a top-level section).
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// Number of lines in the body.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// Path of the enclosing section, if any.
    pub fn parent_path(&self) -> Option<String> {
        match self.components.split_last() {
            Some((_, ancestors)) if !ancestors.is_empty() => Some(ancestors.join(PATH_SEPARATOR)),
            _ => None,
        }
    }
}

/// Mapping from full path to section, in close order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionIndex {
    entries: IndexMap<String, Section>,
}

impl SectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a section under its path, replacing any earlier section with
    /// the same path.
    pub fn insert(&mut self, section: Section) -> Option<Section> {
        self.entries.insert(section.path.clone(), section)
    }

    pub fn get(&self, path: &str) -> Option<&Section> {
        self.entries.get(path)
    }

    /// Body text of the section at `path`.
    pub fn body(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(|s| s.body.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths in index order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.entries.values()
    }

    pub fn iter(&self) -> Iter<'_, String, Section> {
        self.entries.iter()
    }

    /// Sections sorted by where they open in the document.
    pub fn in_document_order(&self) -> Vec<&Section> {
        let mut sections: Vec<_> = self.entries.values().collect();
        sections.sort_by_key(|s| s.start_line);
        sections
    }

    /// Deepest nesting level of any section.
    pub fn max_depth(&self) -> usize {
        self.entries.values().map(Section::depth).max().unwrap_or(0)
    }
}

impl FromIterator<Section> for SectionIndex {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        let mut index = Self::new();
        for section in iter {
            index.insert(section);
        }
        index
    }
}

impl<'a> IntoIterator for &'a SectionIndex {
    type Item = (&'a String, &'a Section);
    type IntoIter = Iter<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// An `edit ... next` block inside `config system interface`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Interface name, quotes removed
    pub name: String,
    /// Verbatim text from `edit` to `next`, newline-joined
    pub body: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// Mapping from interface name to interface, in capture order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceIndex {
    entries: IndexMap<String, Interface>,
}

impl InterfaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, interface: Interface) -> Option<Interface> {
        self.entries.insert(interface.name.clone(), interface)
    }

    pub fn get(&self, name: &str) -> Option<&Interface> {
        self.entries.get(name)
    }

    pub fn body(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|i| i.body.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.entries.values()
    }
}

impl FromIterator<Interface> for InterfaceIndex {
    fn from_iter<I: IntoIterator<Item = Interface>>(iter: I) -> Self {
        let mut index = Self::new();
        for interface in iter {
            index.insert(interface);
        }
        index
    }
}
