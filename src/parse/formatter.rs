//! Formats analysis prose into typed display nodes.
//!
//! The prompt's formatting guide asks the model for colon-terminated
//! subheadings, `* ` bullet lists, and `**bold**` emphasis. This module
//! turns a block of such text into a node sequence the renderers consume.
//! It is deliberately not a Markdown parser: it handles exactly that
//! template, tolerating minor drift.

use crate::models::{DisplayNode, Span};

/// Heading lines longer than this are treated as paragraphs; a long prose
/// sentence can also end with a colon.
const MAX_HEADING_LEN: usize = 80;

/// Convert analysis text into an ordered sequence of display nodes.
///
/// Line-oriented single pass. Blank lines emit nothing and do not break an
/// open list. Classification precedence is heading, then list item, then
/// paragraph; the order matters, since a short bullet-free line ending in a
/// colon must become a heading even if it would qualify as a paragraph.
pub fn format_analysis(text: &str) -> Vec<DisplayNode> {
    let mut nodes = Vec::new();
    let mut open_list: Vec<Vec<Span>> = Vec::new();

    for line in text.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.ends_with(':') && line.chars().count() < MAX_HEADING_LEN {
            flush_list(&mut nodes, &mut open_list);
            nodes.push(DisplayNode::Heading {
                spans: resolve_spans(line.strip_suffix(':').unwrap_or(line)),
            });
        } else if line.starts_with("* ") || line.starts_with("- ") {
            open_list.push(resolve_spans(&line[2..]));
        } else {
            flush_list(&mut nodes, &mut open_list);
            nodes.push(DisplayNode::Paragraph {
                spans: resolve_spans(line),
            });
        }
    }

    flush_list(&mut nodes, &mut open_list);
    nodes
}

/// Emit the open list buffer as a List node, if non-empty.
fn flush_list(nodes: &mut Vec<DisplayNode>, open_list: &mut Vec<Vec<Span>>) {
    if !open_list.is_empty() {
        nodes.push(DisplayNode::List {
            items: std::mem::take(open_list),
        });
    }
}

/// Split a line on double-asterisk delimiters into plain and bold spans.
///
/// Odd-indexed segments sat between a delimiter pair and become bold.
/// Empty segments are kept; renderers skip them.
fn resolve_spans(text: &str) -> Vec<Span> {
    text.split("**")
        .enumerate()
        .map(|(i, segment)| {
            if i % 2 == 1 {
                Span::Bold(segment.to_string())
            } else {
                Span::Plain(segment.to_string())
            }
        })
        .collect()
}
