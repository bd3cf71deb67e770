//! # fgtree
//!
//! A FortiGate configuration navigator library with hierarchical section
//! extraction and wildcard search.
//!
//! This library scans configuration backups built from nested
//! `config ... end` blocks, indexes every block under its full path, collects
//! the `edit ... next` interface blocks of `config system interface`, and
//! searches the index with `*` wildcards.
//!
//! ## Features
//!
//! - Single-pass parse with arbitrary nesting depth
//! - Section bodies include every nested descendant, verbatim
//! - Interface index keyed by interface name
//! - Case-insensitive wildcard search over paths and bodies
//! - Export filenames and atomic writes for selected sections
//!
//! ## Example
//!
//! ```rust
//! use fgtree::{parse_config, search};
//!
//! let text = r#"config system interface
//!     edit "port1"
//!         set ip 192.168.1.99 255.255.255.0
//!     next
//! end
//! config system dns
//!     set primary 8.8.8.8
//! end"#;
//!
//! let parsed = parse_config(text);
//! assert_eq!(parsed.sections.len(), 2);
//! assert!(parsed.interfaces.get("port1").is_some());
//!
//! let results = search(&parsed.sections, "system *");
//! for path in results.paths() {
//!     println!("{}", path);
//! }
//! ```

/// Configuration module for persisting user preferences.
pub mod config;

/// Export filenames and writing of selected sections.
pub mod export;

/// Input handling for files and stdin, including UTF-8 decoding.
pub mod input;

/// Parser module for configuration text.
///
/// Provides the section scan, the interface overlay, the section tree and
/// JSON output types.
pub mod parser;

/// Wildcard search over the section index.
pub mod search;

/// Fuzzy suggestions for unknown names.
pub mod suggest;

// Re-export commonly used types for convenience
pub use config::Config;
pub use export::{ExportPayload, export_filename};
pub use input::InputError;
pub use parser::{
    Interface, InterfaceIndex, ParsedConfig, Section, SectionIndex, parse_bytes, parse_config,
    parse_file,
};
pub use search::{SearchPattern, search, search_interfaces};
