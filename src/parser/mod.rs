//! FortiGate configuration parsing and section indexing.
//!
//! This module scans a configuration dump once, tracking `config ... end`
//! nesting with an explicit stack, and records every closed section under its
//! full hierarchical path. Interface blocks are collected by the overlay in
//! [`interface`] from the same line stream.

pub mod interface;
pub mod output;
pub mod section;
pub mod tree;

pub use interface::{CaptureState, INTERFACE_MARKER, InterfaceCapture};
pub use output::{DocumentOutput, build_json_output};
pub use section::{Interface, InterfaceIndex, PATH_SEPARATOR, Section, SectionIndex};
pub use tree::{SectionNode, SectionTree};

use crate::input::{self, InputError};
use std::path::Path;

/// Result of one parse: both indexes, built fresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfig {
    pub sections: SectionIndex,
    pub interfaces: InterfaceIndex,
}

/// Summary counts for a parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigStats {
    pub sections: usize,
    pub top_level: usize,
    pub interfaces: usize,
    pub max_depth: usize,
}

impl ParsedConfig {
    pub fn stats(&self) -> ConfigStats {
        ConfigStats {
            sections: self.sections.len(),
            top_level: self.sections.sections().filter(|s| s.depth() == 1).count(),
            interfaces: self.interfaces.len(),
            max_depth: self.sections.max_depth(),
        }
    }
}

/// An open section on the nesting stack.
struct Frame<'a> {
    name: &'a str,
    start_line: usize,
    lines: Vec<&'a str>,
}

/// Whether a trimmed line opens a section.
pub(crate) fn is_section_opener(trimmed: &str) -> bool {
    trimmed.starts_with("config ")
}

/// Parse a configuration file from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn parse_file(path: &Path) -> Result<ParsedConfig, InputError> {
    let bytes = std::fs::read(path)?;
    parse_bytes(&bytes)
}

/// Decode raw bytes as UTF-8 and parse them.
///
/// # Errors
///
/// Returns [`InputError::Decode`] if the bytes are not valid UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<ParsedConfig, InputError> {
    let content = input::decode(bytes)?;
    Ok(parse_config(content))
}

/// Parse configuration text into a section index and an interface index.
///
/// Lines are split on `\n` and kept verbatim in bodies. Keywords are matched
/// on the trimmed line. Malformed nesting never fails the parse: an `end`
/// with nothing open is ignored, and a section that is never closed is not
/// recorded.
pub fn parse_config(content: &str) -> ParsedConfig {
    let mut stack: Vec<Frame<'_>> = Vec::new();
    let mut sections = SectionIndex::new();
    let mut interfaces = InterfaceCapture::new();
    let mut ignored_ends = 0usize;

    for (idx, line) in content.split('\n').enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();

        interfaces.feed(line, line_no);

        if is_section_opener(trimmed) {
            let name = trimmed.split_once(' ').map_or("", |(_, rest)| rest);
            tracing::trace!(line = line_no, name, "open section");
            stack.push(Frame {
                name,
                start_line: line_no,
                lines: vec![line],
            });
        } else if trimmed == "end" {
            let Some(mut frame) = stack.pop() else {
                ignored_ends += 1;
                continue;
            };
            frame.lines.push(line);

            let components: Vec<String> = stack
                .iter()
                .map(|f| f.name)
                .chain(std::iter::once(frame.name))
                .map(str::to_string)
                .collect();
            let path = components.join(PATH_SEPARATOR);
            tracing::trace!(line = line_no, path = %path, "close section");

            let section = Section {
                name: frame.name.to_string(),
                path,
                components,
                body: frame.lines.join("\n"),
                start_line: frame.start_line,
                end_line: line_no,
            };
            if let Some(previous) = sections.insert(section) {
                tracing::debug!(
                    path = %previous.path,
                    line = previous.start_line,
                    "duplicate section path, keeping the later body"
                );
            }

            if let Some(parent) = stack.last_mut() {
                parent.lines.extend(frame.lines);
            }
        } else if let Some(top) = stack.last_mut() {
            top.lines.push(line);
        }
    }

    for frame in &stack {
        tracing::warn!(
            name = frame.name,
            line = frame.start_line,
            "section not terminated, dropping"
        );
    }

    let interfaces = interfaces.finish();
    tracing::debug!(
        sections = sections.len(),
        interfaces = interfaces.len(),
        ignored_ends,
        "parsed configuration"
    );

    ParsedConfig {
        sections,
        interfaces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"#config-version=FGT60F-7.2.5-FW-build1517-230606:opmode=0:vdom=0
config system global
    set hostname "FGT-EDGE"
    set timezone 04
end
config system interface
    edit "port1"
        set vdom "root"
        set ip 192.168.1.99 255.255.255.0
        set allowaccess ping https ssh
    next
    edit "wan1"
        set mode dhcp
    next
end
config firewall policy
    edit 1
        set name "LAN-out"
        set srcintf "port1"
        set dstintf "wan1"
    next
end
config router static
    edit 1
        set gateway 10.0.0.1
    next
end"#;

    #[test]
    fn test_single_interface_block() {
        let text = "config system interface\nedit \"port1\"\nset ip 1.2.3.4\nnext\nend";
        let parsed = parse_config(text);

        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(parsed.sections.body("system interface"), Some(text));
        assert_eq!(parsed.interfaces.len(), 1);
        assert_eq!(
            parsed.interfaces.body("port1"),
            Some("edit \"port1\"\nset ip 1.2.3.4\nnext")
        );
    }

    #[test]
    fn test_nested_sections() {
        let parsed = parse_config("config a\nconfig b\nend\nend");

        assert_eq!(parsed.sections.paths().collect::<Vec<_>>(), vec!["a > b", "a"]);
        assert_eq!(parsed.sections.body("a > b"), Some("config b\nend"));
        assert_eq!(parsed.sections.body("a"), Some("config a\nconfig b\nend\nend"));

        let inner = parsed.sections.get("a > b").unwrap();
        assert_eq!(inner.depth(), 2);
        assert_eq!((inner.start_line, inner.end_line), (2, 3));
    }

    #[test]
    fn test_parent_keeps_trailing_lines_in_order() {
        let text = "config vpn\n  set a 1\n  config child\n    set b 2\n  end\n  set c 3\nend";
        let parsed = parse_config(text);

        assert_eq!(parsed.sections.body("vpn"), Some(text));
        assert_eq!(
            parsed.sections.body("vpn > child"),
            Some("  config child\n    set b 2\n  end")
        );
    }

    #[test]
    fn test_section_count_matches_config_keywords() {
        let parsed = parse_config(SAMPLE);
        let openers = SAMPLE
            .lines()
            .filter(|l| l.trim().starts_with("config "))
            .count();

        assert_eq!(parsed.sections.len(), openers);
        assert_eq!(
            parsed.sections.paths().collect::<Vec<_>>(),
            vec![
                "system global",
                "system interface",
                "firewall policy",
                "router static"
            ]
        );
        assert_eq!(parsed.interfaces.names().collect::<Vec<_>>(), vec!["port1", "wan1"]);
    }

    #[test]
    fn test_bodies_are_contiguous_in_source() {
        let parsed = parse_config(SAMPLE);
        let lines: Vec<&str> = SAMPLE.split('\n').collect();

        for section in parsed.sections.sections() {
            let expected = lines[section.start_line - 1..section.end_line].join("\n");
            assert_eq!(section.body, expected, "body of {}", section.path);
        }
    }

    #[test]
    fn test_unmatched_end_ignored() {
        let parsed = parse_config("end\nconfig a\nset x 1\nend\nend\n");
        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(parsed.sections.body("a"), Some("config a\nset x 1\nend"));
    }

    #[test]
    fn test_unterminated_section_dropped() {
        let parsed = parse_config("config a\nconfig b\nend\n");
        // "a > b" closes, "a" never does
        assert_eq!(parsed.sections.paths().collect::<Vec<_>>(), vec!["a > b"]);
    }

    #[test]
    fn test_duplicate_sibling_overwrites() {
        let parsed = parse_config("config a\nset first\nend\nconfig a\nset second\nend");
        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(parsed.sections.body("a"), Some("config a\nset second\nend"));
    }

    #[test]
    fn test_lines_outside_sections_discarded() {
        let parsed = parse_config("#header\nconfig a\nend\ntrailing");
        assert_eq!(parsed.sections.body("a"), Some("config a\nend"));
    }

    #[test]
    fn test_crlf_input_keeps_carriage_returns() {
        let parsed = parse_config("config a\r\nset x\r\nend\r\n");
        assert_eq!(parsed.sections.body("a"), Some("config a\r\nset x\r\nend\r"));
    }

    #[test]
    fn test_stats() {
        let stats = parse_config("config a\nconfig b\nend\nend\nconfig c\nend").stats();
        assert_eq!(
            stats,
            ConfigStats {
                sections: 3,
                top_level: 2,
                interfaces: 0,
                max_depth: 2
            }
        );
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let err = parse_bytes(&[0x63, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, InputError::Decode(_)));
    }
}
