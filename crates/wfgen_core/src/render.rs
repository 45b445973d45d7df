//! Deterministic YAML rendering of a [`Node`] tree.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::node::{Mapping, Node};
use crate::scalar::{comment_text, encode_key, encode_value, Encoded};

/// Spaces per nesting level.
pub const INDENT: usize = 2;

/// Document-level rendering options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Comment block emitted above the document, one `#` line per line.
    pub header: Option<String>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

/// Render a tree to YAML text ending in a single newline.
pub fn render(root: &Node) -> RenderResult<String> {
    render_document(root, &RenderOptions::default())
}

/// Render a tree with document-level options applied.
pub fn render_document(root: &Node, options: &RenderOptions) -> RenderResult<String> {
    debug!(nodes = root.count(), "Rendering document");

    let mut writer = Writer::default();
    if let Some(header) = &options.header {
        writer.comment(header);
    }
    writer.root(root)?;

    let text = writer.finish();
    debug!(bytes = text.len(), "Rendered document");
    Ok(text)
}

/// Location of a node, used in error messages.
#[derive(Debug, Clone, Default)]
struct KeyPath {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Key(String),
    Index(usize),
}

impl KeyPath {
    fn key(&self, key: &str) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Key(key.to_string()));
        path
    }

    fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Index(index));
        path
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{}", key)?,
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// What goes on the line that introduces a value.
enum Head {
    Inline(String),
    Block(&'static str, Vec<String>),
    Nested,
}

fn head(node: &Node) -> Head {
    match node {
        Node::Scalar(scalar) => match encode_value(scalar) {
            Encoded::Inline(text) => Head::Inline(text),
            Encoded::Block { header, lines } => Head::Block(header, lines),
        },
        Node::Mapping(mapping) if mapping.present().next().is_none() => Head::Inline("{}".to_string()),
        Node::Sequence(items) if items.iter().all(Node::is_absent) => Head::Inline("[]".to_string()),
        Node::Mapping(_) | Node::Sequence(_) => Head::Nested,
        // Containers filter absent nodes before asking for a head.
        Node::Absent => Head::Inline("{}".to_string()),
    }
}

#[derive(Default)]
struct Writer {
    lines: Vec<String>,
}

impl Writer {
    fn line(&mut self, depth: usize, text: &str) {
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{:width$}{}", "", text, width = depth * INDENT));
        }
    }

    fn comment(&mut self, header: &str) {
        // A bare `\r` would end the comment early in a parser, so it
        // starts a new comment line here.
        let header = header.replace("\r\n", "\n");
        let header = header.trim_end_matches(['\n', '\r']);
        if header.is_empty() {
            return;
        }
        for line in header.split(['\n', '\r']) {
            let line = comment_text(line.trim_end());
            if line.is_empty() {
                self.lines.push("#".to_string());
            } else {
                self.lines.push(format!("# {}", line));
            }
        }
    }

    fn block(&mut self, depth: usize, lines: &[String]) {
        for line in lines {
            self.line(depth, line);
        }
    }

    fn root(&mut self, node: &Node) -> RenderResult<()> {
        let path = KeyPath::default();
        match head(node) {
            Head::Inline(text) => self.line(0, &text),
            Head::Block(header, lines) => {
                self.line(0, header);
                self.block(1, &lines);
            }
            Head::Nested => self.collection(node, 0, &path)?,
        }
        Ok(())
    }

    fn collection(&mut self, node: &Node, depth: usize, path: &KeyPath) -> RenderResult<()> {
        match node {
            Node::Mapping(mapping) => self.mapping(mapping, depth, path),
            Node::Sequence(items) => self.sequence(items, depth, path),
            Node::Scalar(_) | Node::Absent => Ok(()),
        }
    }

    fn mapping(&mut self, mapping: &Mapping, depth: usize, path: &KeyPath) -> RenderResult<()> {
        let mut seen = HashSet::new();
        for (key, value) in mapping.present() {
            if !seen.insert(key) {
                return Err(RenderError::DuplicateKey {
                    path: path.to_string(),
                    key: key.to_string(),
                });
            }

            let key_text = encode_key(key);
            match head(value) {
                Head::Inline(text) => self.line(depth, &format!("{}: {}", key_text, text)),
                Head::Block(header, lines) => {
                    self.line(depth, &format!("{}: {}", key_text, header));
                    self.block(depth + 1, &lines);
                }
                Head::Nested => {
                    self.line(depth, &format!("{}:", key_text));
                    self.collection(value, depth + 1, &path.key(key))?;
                }
            }
        }
        Ok(())
    }

    fn sequence(&mut self, items: &[Node], depth: usize, path: &KeyPath) -> RenderResult<()> {
        for (index, item) in items.iter().filter(|item| !item.is_absent()).enumerate() {
            match head(item) {
                Head::Inline(text) => self.line(depth, &format!("- {}", text)),
                Head::Block(header, lines) => {
                    self.line(depth, &format!("- {}", header));
                    self.block(depth + 1, &lines);
                }
                Head::Nested => {
                    // Render one level deeper, then pull the first line up
                    // onto the list marker.
                    let mut nested = Writer::default();
                    nested.collection(item, depth + 1, &path.index(index))?;
                    let mut lines = nested.lines.into_iter();
                    if let Some(first) = lines.next() {
                        self.line(depth, &format!("- {}", first.trim_start()));
                    }
                    self.lines.extend(lines);
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
