//! Plain-text bibliography export.
//!
//! Walks the map in stacking order and lists every node that carries
//! references, one heading per node and one bullet per reference. Nodes
//! without references are skipped entirely.

use std::fmt::Write;

use crate::store::LogicMap;

/// Renders the bibliography of a map as plain text.
///
/// Headings use only the first line of a node's text; body text can run
/// to several lines, and a multi-line heading would break the one-line
/// indentation scheme of the entries below it.
///
/// Returns an empty string when no node carries references.
pub fn render(map: &LogicMap) -> String {
    let mut out = String::new();

    for node in map.nodes() {
        if node.references().is_empty() {
            continue;
        }

        let heading = node.text().lines().next().unwrap_or_default().trim();
        // infallible: writing to a String cannot fail
        let _ = writeln!(out, "[{}] {}", node.kind(), heading);

        for reference in node.references() {
            let _ = writeln!(
                out,
                "  \u{2022} {} ({})",
                reference.display_title(),
                reference.link()
            );
            if !reference.note().is_empty() {
                let _ = writeln!(out, "    Note: {}", reference.note());
            }
            if let Some(file) = reference.file() {
                let _ = writeln!(out, "    File: {file}");
            }
        }
        out.push('\n');
    }

    out
}
