//! SVG attribute and node serialization
//!
//! Turns descriptor attributes into JSX props. Attribute names are converted
//! to lower camel case (`fill-rule` → `fillRule`) except for names starting
//! with a denylisted prefix, which React expects verbatim (`aria-label`,
//! `data-icon`).
//!
//! Values are written between double quotes as-is. Nothing is escaped.

use std::borrow::Cow;

use heck::ToLowerCamelCase;
use iconkit_core::{Attributes, Node};

/// Name prefixes that are passed through without case conversion
pub const ATTRIBUTE_DENYLIST: &[&str] = &["data", "aria"];

/// Whether `name` should be camel-cased when emitted as a prop
pub fn should_transform_attribute(name: &str) -> bool {
    ATTRIBUTE_DENYLIST
        .iter()
        .all(|prefix| !name.starts_with(prefix))
}

/// Prop name for an SVG attribute name
pub fn format_attribute_name(name: &str) -> Cow<'_, str> {
    if should_transform_attribute(name) {
        Cow::Owned(name.to_lower_camel_case())
    } else {
        Cow::Borrowed(name)
    }
}

/// Serialize attributes as space separated `name="value"` pairs, in order
pub fn format_attributes(attrs: &Attributes) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!("{}=\"{}\"", format_attribute_name(name), value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serialize a leaf node as a self-closing JSX element
pub fn serialize_node(node: &Node) -> String {
    if node.attrs.is_empty() {
        format!("<{} />", node.tag)
    } else {
        format!("<{} {} />", node.tag, format_attributes(&node.attrs))
    }
}
