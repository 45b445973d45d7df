//! The generic document tree consumed by the renderer.

use serde::{Deserialize, Serialize};

use crate::ordered_map::OrderedMap;

/// A leaf value.
///
/// Deserializes untagged, so definition files can use plain YAML/JSON
/// values wherever a scalar is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Explicitly supplied null. Not the same as an absent field.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// An ordered list of key/value pairs.
///
/// Construction never deduplicates. Key uniqueness is checked when the
/// tree is rendered, so a duplicate is reported instead of silently
/// overwritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Node>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Builder-style append of an already-built node.
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        self.push(key, value);
        self
    }

    /// Builder-style append of anything convertible to a node. `None`
    /// becomes [`Node::Absent`] and is left out of the output.
    pub fn field<T: ToNode + ?Sized>(mut self, key: impl Into<String>, value: &T) -> Self {
        self.entries.push((key.into(), value.to_node()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries that will actually be rendered.
    pub fn present(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.iter().filter(|(_, v)| !v.is_absent())
    }

    /// Number of entries, absent ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.push(key, value);
        }
        mapping
    }
}

/// One position in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Mapping(Mapping),
    Sequence(Vec<Node>),
    /// A field the caller never supplied. Containers skip it entirely.
    Absent,
}

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Node::Absent)
    }

    /// Total number of present nodes in this subtree, itself included.
    pub fn count(&self) -> usize {
        match self {
            Node::Absent => 0,
            Node::Scalar(_) => 1,
            Node::Mapping(mapping) => 1 + mapping.present().map(|(_, v)| v.count()).sum::<usize>(),
            Node::Sequence(items) => 1 + items.iter().map(Node::count).sum::<usize>(),
        }
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Node::Scalar(value)
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Sequence(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(value.into())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(value.into())
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Scalar(value.into())
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Scalar(value.into())
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Scalar(value.into())
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Scalar(value.into())
    }
}

/// Conversion of typed values into the document tree.
///
/// Record types implement this field by field; the order of the
/// `Mapping::field` calls is the order of the rendered keys.
pub trait ToNode {
    fn to_node(&self) -> Node;
}

impl ToNode for Node {
    fn to_node(&self) -> Node {
        self.clone()
    }
}

impl ToNode for Scalar {
    fn to_node(&self) -> Node {
        Node::Scalar(self.clone())
    }
}

impl ToNode for Mapping {
    fn to_node(&self) -> Node {
        Node::Mapping(self.clone())
    }
}

impl ToNode for str {
    fn to_node(&self) -> Node {
        self.into()
    }
}

impl ToNode for String {
    fn to_node(&self) -> Node {
        self.as_str().into()
    }
}

impl ToNode for bool {
    fn to_node(&self) -> Node {
        (*self).into()
    }
}

impl ToNode for i64 {
    fn to_node(&self) -> Node {
        (*self).into()
    }
}

impl ToNode for i32 {
    fn to_node(&self) -> Node {
        (*self).into()
    }
}

impl ToNode for u32 {
    fn to_node(&self) -> Node {
        Node::Scalar((*self).into())
    }
}

impl ToNode for u16 {
    fn to_node(&self) -> Node {
        Node::Scalar(Scalar::Int((*self).into()))
    }
}

impl ToNode for f64 {
    fn to_node(&self) -> Node {
        (*self).into()
    }
}

impl<T: ToNode + ?Sized> ToNode for &T {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: ToNode> ToNode for Option<T> {
    fn to_node(&self) -> Node {
        match self {
            Some(value) => value.to_node(),
            None => Node::Absent,
        }
    }
}

impl<T: ToNode> ToNode for [T] {
    fn to_node(&self) -> Node {
        Node::Sequence(self.iter().map(ToNode::to_node).collect())
    }
}

impl<T: ToNode> ToNode for Vec<T> {
    fn to_node(&self) -> Node {
        self.as_slice().to_node()
    }
}

impl<V: ToNode> ToNode for OrderedMap<V> {
    fn to_node(&self) -> Node {
        Node::Mapping(
            self.iter()
                .map(|(key, value)| (key, value.to_node()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_maps_to_absent() {
        let missing: Option<String> = None;
        assert_eq!(missing.to_node(), Node::Absent);
        assert_eq!(Some("x").to_node(), Node::from("x"));
    }

    #[test]
    fn test_field_order_is_call_order() {
        let mapping = Mapping::new()
            .field("zeta", "1")
            .field("alpha", &true)
            .field("mid", &None::<i64>);

        let keys: Vec<_> = mapping.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        let present: Vec<_> = mapping.present().map(|(k, _)| k).collect();
        assert_eq!(present, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_count_skips_absent() {
        let node: Node = Mapping::new()
            .field("a", "x")
            .field("b", &vec!["y", "z"])
            .field("c", &None::<bool>)
            .into();
        // mapping + scalar + sequence + 2 items
        assert_eq!(node.count(), 5);
    }

    #[test]
    fn test_scalar_untagged_deserialize() {
        let values: Vec<Scalar> = serde_json::from_str(r#"[null, true, 3, 1.5, "s"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Scalar::Null,
                Scalar::Bool(true),
                Scalar::Int(3),
                Scalar::Float(1.5),
                Scalar::Str("s".to_string()),
            ]
        );
    }
}
