//! Icon metadata model
//!
//! The metadata set is produced upstream by the icon build and describes,
//! per icon, the SVG descriptor and every size variant that should become a
//! generated component.
//!
//! # Format
//!
//! ```yaml
//! icons:
//!   - name: add
//!     deprecated: false
//!     descriptor: { attrs: { width: 16, height: 16, viewBox: "0 0 16 16" }, content: [] }
//!     output:
//!       - moduleName: Add16
//!         filepath: add/16.js
//!         descriptor:
//!           attrs: { width: 16, height: 16, viewBox: "0 0 16 16" }
//!           content:
//!             - elem: path
//!               attrs: { d: "M17 15L17 8 15 8 15 15 8 15 8 17 15 17 15 24 17 24 17 17 24 17 24 15z" }
//! ```

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Ordered SVG attribute mapping. Insertion order is preserved all the way
/// into the generated markup.
pub type Attributes = IndexMap<String, String>;

/// A leaf markup element inside an icon descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Element name (`path`, `circle`, `rect`, ...)
    #[serde(alias = "elem")]
    pub tag: String,

    /// Element attributes
    #[serde(default, deserialize_with = "deserialize_attributes")]
    pub attrs: Attributes,
}

impl Node {
    /// Create a node with no attributes
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attributes::new(),
        }
    }

    /// Append an attribute, keeping insertion order
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// SVG descriptor for one icon (or one size variant of it)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDescriptor {
    /// Top-level `<svg>` attributes, including `width`, `height` and `viewBox`
    #[serde(default, deserialize_with = "deserialize_attributes")]
    pub attrs: Attributes,

    /// Child elements in document order
    #[serde(default)]
    pub content: Vec<Node>,
}

impl IconDescriptor {
    /// Declared width, if any
    pub fn width(&self) -> Option<&str> {
        self.attrs.get("width").map(String::as_str)
    }

    /// Declared height, if any
    pub fn height(&self) -> Option<&str> {
        self.attrs.get("height").map(String::as_str)
    }

    /// Declared view box, if any
    pub fn view_box(&self) -> Option<&str> {
        self.attrs.get("viewBox").map(String::as_str)
    }
}

/// One size variant of an icon that becomes its own generated module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconOutput {
    /// Component identifier; doubles as the export binding
    pub module_name: String,

    /// Module path relative to the package root (e.g. `add/16.js`)
    pub filepath: String,

    /// Descriptor for this size
    pub descriptor: IconDescriptor,
}

/// A single icon with all of its requested outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// Icon name, informational only
    #[serde(default)]
    pub name: Option<String>,

    /// Base descriptor
    #[serde(default)]
    pub descriptor: IconDescriptor,

    /// Deprecated icons warn once on first render
    #[serde(default)]
    pub deprecated: bool,

    /// Size variants to generate
    #[serde(default)]
    pub output: Vec<IconOutput>,
}

/// The complete metadata set handed to the generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconMetadata {
    /// Icons in the order they should be exported
    #[serde(default)]
    pub icons: Vec<Icon>,
}

impl IconMetadata {
    /// Load metadata from a `.json`, `.yaml` or `.yml` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::MetadataNotFound {
                path: path.display().to_string(),
            });
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let contents = std::fs::read_to_string(path)?;
        let metadata = match extension.as_str() {
            "json" => Self::from_json_str(&contents)?,
            "yaml" | "yml" => Self::from_yaml_str(&contents)?,
            _ => return Err(Error::UnsupportedMetadataFormat { extension }),
        };

        tracing::debug!(
            "Loaded {} icons ({} outputs) from {}",
            metadata.icons.len(),
            metadata.output_count(),
            path.display()
        );

        Ok(metadata)
    }

    /// Parse metadata from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse metadata from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::MetadataYaml)
    }

    /// Iterate over every output together with its owning icon
    pub fn outputs(&self) -> impl Iterator<Item = (&Icon, &IconOutput)> {
        self.icons
            .iter()
            .flat_map(|icon| icon.output.iter().map(move |output| (icon, output)))
    }

    /// Total number of size variants across all icons
    pub fn output_count(&self) -> usize {
        self.icons.iter().map(|icon| icon.output.len()).sum()
    }

    /// Module names that occur more than once, in first-repeat order.
    ///
    /// Generation does not reject these; a repeated name produces a module
    /// with duplicate bindings.
    pub fn duplicate_module_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for (_, output) in self.outputs() {
            let name = output.module_name.as_str();
            if !seen.insert(name) && reported.insert(name) {
                duplicates.push(name);
            }
        }

        duplicates
    }
}

/// Attribute values in the wild are strings, numbers or booleans
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Str(s) => s,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

fn deserialize_attributes<'de, D>(deserializer: D) -> std::result::Result<Attributes, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: IndexMap<String, Scalar> = IndexMap::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (k, v.into())).collect())
}
