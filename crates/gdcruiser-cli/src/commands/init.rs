//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# gdcruiser configuration

[analyzer]
# Glob patterns, relative to the project root, to skip while scanning
exclude = [
    "addons/**",
]

# Respect .gitignore files
respect_gitignore = true

[options]
# Regular expressions; matching modules are invisible to every rule
# exclude = ["^res://tests/"]

# Forbidden: matching dependencies (or cycles / orphans) are violations.
# Severity: error | warn | info | ignore (default: error)

[[forbidden]]
name = "no-circular"
severity = "warn"
comment = "Circular dependencies make load order fragile"
circular = true

# [[forbidden]]
# name = "no-orphans"
# severity = "info"
# orphan = true
# from = { pathNot = "^res://main\\.gd$" }

# [[forbidden]]
# name = "no-ui-to-core"
# from = { path = "^res://ui/" }
# to = { path = "^res://core/" }

# Allowed: a dependency from `from` to anything outside `to` is a violation.
# [[allowed]]
# name = "core-stays-in-core"
# from = { path = "^res://core/" }
# to = { path = "^res://core/" }

# Required: every `from` module needs at least one dependency matching `to`.
# [[required]]
# name = "levels-extend-base"
# from = { path = "^res://levels/", pathNot = "level_base\\.gd$" }
# to = { path = "level_base\\.gd$" }
"#;

const CONFIG_FILE: &str = "gdcruiser.toml";

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_template(Path::new("."), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to declare your architecture rules");
    println!("  2. Run: gdcruiser check");

    Ok(())
}

fn write_template(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
