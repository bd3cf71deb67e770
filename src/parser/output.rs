//! JSON output types for parsed configurations

use serde::{Deserialize, Serialize};

use super::ParsedConfig;
use super::section::{Interface, Section, SectionIndex};

/// Root document structure with metadata, sections and interfaces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutput {
    pub document: DocumentRoot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRoot {
    pub metadata: DocumentMetadata,
    pub sections: Vec<SectionOutput>,
    pub interfaces: Vec<InterfaceOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: Option<String>,
    #[serde(rename = "sectionCount")]
    pub section_count: usize,
    #[serde(rename = "interfaceCount")]
    pub interface_count: usize,
    #[serde(rename = "maxDepth")]
    pub max_depth: usize,
}

/// A section keyed by its full path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionOutput {
    /// Full hierarchical path
    pub path: String,
    /// Local name
    pub name: String,
    /// Nesting depth (1 for top level)
    pub depth: usize,
    pub position: Position,
    /// Verbatim section text
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceOutput {
    pub name: String,
    pub position: Position,
    pub body: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    /// First line (1-indexed)
    #[serde(rename = "startLine")]
    pub start_line: usize,
    /// Last line (1-indexed, inclusive)
    #[serde(rename = "endLine")]
    pub end_line: usize,
}

impl From<&Section> for SectionOutput {
    fn from(section: &Section) -> Self {
        Self {
            path: section.path.clone(),
            name: section.name.clone(),
            depth: section.depth(),
            position: Position {
                start_line: section.start_line,
                end_line: section.end_line,
            },
            body: section.body.clone(),
        }
    }
}

impl From<&Interface> for InterfaceOutput {
    fn from(interface: &Interface) -> Self {
        Self {
            name: interface.name.clone(),
            position: Position {
                start_line: interface.start_line,
                end_line: interface.end_line,
            },
            body: interface.body.clone(),
        }
    }
}

/// Build JSON output for a parse.
///
/// `sections` is the index to emit (the full index or a search result);
/// metadata counts always describe the whole document.
pub fn build_json_output(
    parsed: &ParsedConfig,
    sections: &SectionIndex,
    source: Option<String>,
) -> DocumentOutput {
    DocumentOutput {
        document: DocumentRoot {
            metadata: DocumentMetadata {
                source,
                section_count: parsed.sections.len(),
                interface_count: parsed.interfaces.len(),
                max_depth: parsed.sections.max_depth(),
            },
            sections: sections.sections().map(SectionOutput::from).collect(),
            interfaces: parsed.interfaces.interfaces().map(InterfaceOutput::from).collect(),
        },
    }
}
