//! Embedded source templates

use minijinja::{AutoEscape, Environment};

/// Template for one forwarding wrapper component
pub const COMPONENT: &str = "component.jsx";

/// Template wrapping a component into a standalone module
pub const MODULE: &str = "module.js";

/// Template for a rollup configuration file
pub const ROLLUP_CONFIG: &str = "rollup.config.mjs";

/// Default shared rendering primitive every generated module imports
pub const ICON_PRIMITIVE: &str = include_str!("../templates/Icon.js");

/// Build the environment holding every codegen template.
///
/// Output is JavaScript, so auto-escaping is disabled for all templates.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);

    env.add_template(COMPONENT, include_str!("../templates/component.jsx.j2"))?;
    env.add_template(MODULE, include_str!("../templates/module.js.j2"))?;
    env.add_template(ROLLUP_CONFIG, include_str!("../templates/rollup.config.mjs.j2"))?;

    Ok(env)
}
