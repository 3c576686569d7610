//! Component synthesis
//!
//! Each icon size becomes a `React.forwardRef` wrapper around the shared
//! `Icon` primitive. The wrapper pins `width`, `height` and `viewBox` from
//! the descriptor, inlines the child nodes and forwards caller props after
//! the fixed attributes so callers can override any of them.
//!
//! Deprecated icons get a module-level `didWarnAboutDeprecation` flag. The
//! render function checks it, flips it and warns, so the warning fires at
//! most once per component for the lifetime of the page.

use iconkit_core::IconDescriptor;
use minijinja::Environment;
use serde::Serialize;

use crate::attributes::{format_attributes, serialize_node};
use crate::error::Result;
use crate::templates;

/// Rendered in place of a missing dimension
const UNDEFINED: &str = "undefined";

/// Typed parameters for the component template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentTemplate {
    /// Component identifier
    pub module_name: String,

    /// JS expression for the width prop
    pub width: String,

    /// JS expression for the height prop
    pub height: String,

    /// View box string
    pub view_box: String,

    /// Remaining top-level attributes, already formatted
    pub attributes: String,

    /// Serialized child elements
    pub children: Vec<String>,

    /// Emit the one-shot deprecation warning
    pub deprecated: bool,

    /// Package named in the deprecation warning
    pub package: String,
}

impl ComponentTemplate {
    /// Derive template parameters from a descriptor.
    ///
    /// Missing dimensions are not an error; they render as `undefined`.
    pub fn from_descriptor(
        module_name: impl Into<String>,
        descriptor: &IconDescriptor,
        deprecated: bool,
        package: impl Into<String>,
    ) -> Self {
        let mut rest = descriptor.attrs.clone();
        rest.shift_remove("width");
        rest.shift_remove("height");
        rest.shift_remove("viewBox");

        Self {
            module_name: module_name.into(),
            width: descriptor.width().unwrap_or(UNDEFINED).to_string(),
            height: descriptor.height().unwrap_or(UNDEFINED).to_string(),
            view_box: descriptor.view_box().unwrap_or(UNDEFINED).to_string(),
            attributes: format_attributes(&rest),
            children: descriptor.content.iter().map(serialize_node).collect(),
            deprecated,
            package: package.into(),
        }
    }

    /// Render with a prepared environment
    pub fn render_with(&self, env: &Environment<'_>) -> Result<String> {
        let template = env.get_template(templates::COMPONENT)?;
        Ok(template.render(self)?)
    }

    /// Render with a fresh environment
    pub fn render(&self) -> Result<String> {
        self.render_with(&templates::environment()?)
    }
}

/// Generate the source of one icon component
pub fn synthesize_component(
    module_name: &str,
    descriptor: &IconDescriptor,
    deprecated: bool,
    package: &str,
) -> Result<String> {
    ComponentTemplate::from_descriptor(module_name, descriptor, deprecated, package).render()
}
