//! Module assembly
//!
//! Builds the in-memory package: one module per icon size plus a synthetic
//! `index.js` that re-exports every component. Every module is also a
//! bundler entry keyed by its own filepath, so it stays individually
//! importable in the ES and CommonJS trees.

use std::path::Path;

use iconkit_core::{IconMetadata, ProjectConfig};
use indexmap::IndexMap;
use minijinja::{Environment, context};

use crate::component::ComponentTemplate;
use crate::error::Result;
use crate::templates;

/// Name of the synthetic entry module
pub const INDEX_MODULE: &str = "index.js";

/// Name of the shared rendering primitive
pub const ICON_MODULE: &str = "Icon.js";

/// Ordered mapping of filepath → module source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualFileSet {
    files: IndexMap<String, String>,
}

impl VirtualFileSet {
    /// Create an empty file set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&mut self, filepath: impl Into<String>, source: impl Into<String>) {
        self.files.insert(filepath.into(), source.into());
    }

    /// Source of a file, if present
    pub fn get(&self, filepath: &str) -> Option<&str> {
        self.files.get(filepath).map(String::as_str)
    }

    /// Append to an existing file
    pub fn append(&mut self, filepath: &str, text: &str) {
        if let Some(source) = self.files.get_mut(filepath) {
            source.push_str(text);
        }
    }

    /// Iterate over `(filepath, source)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every file under `dir`, creating parent directories
    pub fn write_to(&self, dir: &Path) -> std::io::Result<()> {
        for (filepath, source) in self.iter() {
            let path = dir.join(filepath);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, source)?;
            tracing::trace!("Wrote {}", path.display());
        }
        Ok(())
    }
}

/// One generated component module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Component identifier
    pub module_name: String,
    /// Module path inside the package
    pub filepath: String,
    /// Whether the component warns on first render
    pub deprecated: bool,
}

/// Result of assembling a metadata set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledModules {
    /// Module sources, `index.js` first
    pub files: VirtualFileSet,

    /// Bundler input key → filepath
    pub inputs: IndexMap<String, String>,

    /// Generated components in export order
    pub modules: Vec<GeneratedModule>,
}

/// Assembles component modules and the entry index
pub struct ModuleAssembler {
    banner: String,
    package: String,
}

impl ModuleAssembler {
    /// Create an assembler
    pub fn new(banner: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
            package: package.into(),
        }
    }

    /// Create an assembler from project settings
    pub fn from_config(project: &ProjectConfig) -> Self {
        Self::new(&project.banner, &project.package)
    }

    /// Generate every module for `metadata`
    pub fn assemble(&self, metadata: &IconMetadata) -> Result<AssembledModules> {
        for duplicate in metadata.duplicate_module_names() {
            tracing::warn!(
                "Module name '{}' is used more than once; generated output will not load",
                duplicate
            );
        }
        for (_, output) in metadata.outputs() {
            if let Some(conflict) = filepath_conflict(&output.filepath) {
                tracing::warn!(
                    "Module '{}' has filepath '{}', which {}",
                    output.module_name,
                    output.filepath,
                    conflict
                );
            }
        }

        let env = templates::environment()?;
        let mut assembled = AssembledModules::default();

        assembled.files.insert(
            INDEX_MODULE,
            format!(
                "{}\n\nexport {{ default as Icon }} from './{}';",
                self.banner, ICON_MODULE
            ),
        );
        assembled
            .inputs
            .insert(INDEX_MODULE.to_string(), INDEX_MODULE.to_string());

        for (icon, output) in metadata.outputs() {
            let filepath = normalize(&output.filepath);
            let source = self.render_module(
                &env,
                &output.module_name,
                filepath,
                ComponentTemplate::from_descriptor(
                    &output.module_name,
                    &output.descriptor,
                    icon.deprecated,
                    &self.package,
                ),
            )?;

            tracing::debug!("Generated {} → {}", output.module_name, filepath);

            assembled.files.insert(filepath, source);
            assembled
                .inputs
                .insert(filepath.to_string(), filepath.to_string());
            assembled.files.append(
                INDEX_MODULE,
                &format!(
                    "\nexport {{ default as {} }} from '{}';",
                    output.module_name,
                    relative_specifier(filepath)
                ),
            );
            assembled.modules.push(GeneratedModule {
                module_name: output.module_name.clone(),
                filepath: filepath.to_string(),
                deprecated: icon.deprecated,
            });
        }

        assembled.files.append(INDEX_MODULE, "\n");

        tracing::info!(
            "Assembled {} component modules from {} icons",
            assembled.modules.len(),
            metadata.icons.len()
        );

        Ok(assembled)
    }

    fn render_module(
        &self,
        env: &Environment<'_>,
        module_name: &str,
        filepath: &str,
        component: ComponentTemplate,
    ) -> Result<String> {
        let component = component.render_with(env)?;
        let template = env.get_template(templates::MODULE)?;
        let mut source = template.render(context! {
            banner => &self.banner,
            icon_import => icon_import_path(filepath),
            component => component,
            module_name => module_name,
        })?;
        source.push('\n');
        Ok(source)
    }
}

/// Import path from `filepath` to the shared `Icon.js` at the package root
pub fn icon_import_path(filepath: &str) -> String {
    let depth = normalize(filepath).matches('/').count();
    if depth == 0 {
        format!("./{ICON_MODULE}")
    } else {
        format!("{}{ICON_MODULE}", "../".repeat(depth))
    }
}

/// Relative specifier for `filepath` as seen from the package root
pub fn relative_specifier(filepath: &str) -> String {
    if filepath.starts_with("./") || filepath.starts_with("../") {
        filepath.to_string()
    } else {
        format!("./{}", filepath.trim_start_matches('/'))
    }
}

/// Why `filepath` cannot be emitted as its own module, if it cannot.
///
/// `index.js` and `Icon.js` at the package root are written by the
/// pipeline itself, and a path climbing above the root lands outside the
/// staging and output directories.
pub fn filepath_conflict(filepath: &str) -> Option<&'static str> {
    let filepath = normalize(filepath);
    if filepath == INDEX_MODULE || filepath == ICON_MODULE {
        return Some("is reserved for a generated package file");
    }

    let mut depth = 0usize;
    for segment in filepath.split('/') {
        match segment {
            "" | "." => {}
            ".." => match depth.checked_sub(1) {
                Some(parent) => depth = parent,
                None => return Some("resolves outside the package root"),
            },
            _ => depth += 1,
        }
    }
    None
}

/// Strip leading `./` and `/` so filepaths key the file set uniformly
fn normalize(filepath: &str) -> &str {
    let mut filepath = filepath;
    loop {
        let trimmed = filepath.trim_start_matches("./").trim_start_matches('/');
        if trimmed.len() == filepath.len() {
            return trimmed;
        }
        filepath = trimmed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconkit_core::{Icon, IconDescriptor, IconOutput, Node};

    fn output(module_name: &str, filepath: &str) -> IconOutput {
        let mut descriptor = IconDescriptor::default();
        descriptor.attrs.insert("width".into(), "16".into());
        descriptor.attrs.insert("height".into(), "16".into());
        descriptor.attrs.insert("viewBox".into(), "0 0 16 16".into());
        descriptor.content.push(Node::new("path").with_attr("d", "M1 1"));

        IconOutput {
            module_name: module_name.into(),
            filepath: filepath.into(),
            descriptor,
        }
    }

    fn metadata(names: &[&str]) -> IconMetadata {
        IconMetadata {
            icons: names
                .iter()
                .map(|name| Icon {
                    name: Some(name.to_lowercase()),
                    descriptor: IconDescriptor::default(),
                    deprecated: false,
                    output: vec![output(name, &format!("{name}.js"))],
                })
                .collect(),
        }
    }

    fn assembler() -> ModuleAssembler {
        ModuleAssembler::new("/* banner */", "@acme/icons")
    }

    fn component_exports(index: &str) -> Vec<&str> {
        index
            .lines()
            .filter(|line| line.starts_with("export { default as ") && !line.contains(ICON_MODULE))
            .collect()
    }

    #[test]
    fn test_index_has_one_export_per_module() {
        let assembled = assembler()
            .assemble(&metadata(&["Add16", "Close16", "Search16"]))
            .unwrap();
        let index = assembled.files.get(INDEX_MODULE).unwrap();

        let exports = component_exports(index);
        assert_eq!(exports.len(), 3);
        assert_eq!(exports[0], "export { default as Add16 } from './Add16.js';");
        assert_eq!(exports[2], "export { default as Search16 } from './Search16.js';");

        let unique: std::collections::HashSet<_> = exports.iter().collect();
        assert_eq!(unique.len(), exports.len());
    }

    #[test]
    fn test_index_reexports_icon_primitive() {
        let assembled = assembler().assemble(&metadata(&["Add16"])).unwrap();
        let index = assembled.files.get(INDEX_MODULE).unwrap();

        assert!(index.starts_with("/* banner */\n\n"));
        assert!(index.contains("export { default as Icon } from './Icon.js';"));
    }

    #[test]
    fn test_every_module_is_a_bundle_input() {
        let assembled = assembler()
            .assemble(&metadata(&["Add16", "Close16"]))
            .unwrap();

        let keys: Vec<_> = assembled.inputs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["index.js", "Add16.js", "Close16.js"]);
        for (key, filepath) in &assembled.inputs {
            assert_eq!(key, filepath);
            assert!(assembled.files.get(filepath).is_some());
        }
    }

    #[test]
    fn test_module_source_layout() {
        let assembled = assembler().assemble(&metadata(&["Add16"])).unwrap();
        let source = assembled.files.get("Add16.js").unwrap();

        assert!(source.starts_with("/* banner */\n\nimport React from 'react';\n"));
        assert!(source.contains("import Icon from './Icon.js';"));
        assert!(source.contains(r#"width={16} height={16} viewBox="0 0 16 16""#));
        assert!(source.trim_end().ends_with("export default Add16;"));
    }

    #[test]
    fn test_nested_filepaths() {
        let mut metadata = metadata(&[]);
        metadata.icons.push(Icon {
            name: Some("add".into()),
            descriptor: IconDescriptor::default(),
            deprecated: true,
            output: vec![output("Add16", "add/16.js"), output("Add32", "add/32.js")],
        });

        let assembled = assembler().assemble(&metadata).unwrap();
        let source = assembled.files.get("add/16.js").unwrap();
        assert!(source.contains("import Icon from '../Icon.js';"));
        assert!(source.contains("The Add16 component has been deprecated"));
        assert!(source.contains("@acme/icons"));

        let index = assembled.files.get(INDEX_MODULE).unwrap();
        assert!(index.contains("export { default as Add32 } from './add/32.js';"));
        assert!(assembled.modules.iter().all(|m| m.deprecated));
    }

    #[test]
    fn test_empty_metadata() {
        let assembled = assembler().assemble(&IconMetadata::default()).unwrap();
        assert_eq!(assembled.files.len(), 1);
        assert!(assembled.modules.is_empty());
        assert!(component_exports(assembled.files.get(INDEX_MODULE).unwrap()).is_empty());
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let metadata = metadata(&["Add16", "Close16"]);
        let first = assembler().assemble(&metadata).unwrap();
        let second = assembler().assemble(&metadata).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_icon_import_path() {
        assert_eq!(icon_import_path("Add16.js"), "./Icon.js");
        assert_eq!(icon_import_path("./Add16.js"), "./Icon.js");
        assert_eq!(icon_import_path("add/16.js"), "../Icon.js");
        assert_eq!(icon_import_path("icons/add/16.js"), "../../Icon.js");
    }

    #[test]
    fn test_relative_specifier() {
        assert_eq!(relative_specifier("Add16.js"), "./Add16.js");
        assert_eq!(relative_specifier("./Add16.js"), "./Add16.js");
        assert_eq!(relative_specifier("add/16.js"), "./add/16.js");
    }

    #[test]
    fn test_dot_prefixed_filepaths_share_one_key() {
        let mut metadata = metadata(&[]);
        metadata.icons.push(Icon {
            name: Some("add".into()),
            descriptor: IconDescriptor::default(),
            deprecated: false,
            output: vec![output("Add16", "./Add16.js"), output("Add32", "/add/32.js")],
        });

        let assembled = assembler().assemble(&metadata).unwrap();

        let keys: Vec<_> = assembled.inputs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["index.js", "Add16.js", "add/32.js"]);
        assert!(assembled.files.get("Add16.js").is_some());
        assert!(assembled.files.get("./Add16.js").is_none());
        assert_eq!(assembled.modules[1].filepath, "add/32.js");

        let index = assembled.files.get(INDEX_MODULE).unwrap();
        assert!(index.contains("export { default as Add16 } from './Add16.js';"));
        assert!(index.contains("export { default as Add32 } from './add/32.js';"));
    }

    #[test]
    fn test_filepath_conflicts() {
        assert_eq!(filepath_conflict("Add16.js"), None);
        assert_eq!(filepath_conflict("add/16.js"), None);
        assert_eq!(filepath_conflict("add/../Add16.js"), None);

        for reserved in ["index.js", "./index.js", "Icon.js", "/Icon.js"] {
            assert!(
                filepath_conflict(reserved).unwrap().contains("reserved"),
                "{reserved}"
            );
        }
        for escaping in ["../Add16.js", "add/../../Add16.js", "./../x.js"] {
            assert!(
                filepath_conflict(escaping).unwrap().contains("outside"),
                "{escaping}"
            );
        }
        // Nested index modules are ordinary components
        assert_eq!(filepath_conflict("add/index.js"), None);
    }

    #[test]
    fn test_conflicting_filepaths_still_assemble() {
        let mut metadata = metadata(&["Add16"]);
        metadata.icons[0].output.push(output("Escape16", "../Escape16.js"));

        let assembled = assembler().assemble(&metadata).unwrap();
        assert!(assembled.inputs.contains_key("../Escape16.js"));
        assert_eq!(assembled.modules.len(), 2);
    }

    #[test]
    fn test_write_to_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = VirtualFileSet::new();
        files.insert("index.js", "export {};");
        files.insert("add/16.js", "export default 1;");

        files.write_to(dir.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("add/16.js")).unwrap(),
            "export default 1;"
        );
        assert!(dir.path().join("index.js").exists());
    }
}
