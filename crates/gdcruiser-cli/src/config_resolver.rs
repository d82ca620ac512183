//! Locating and loading the configuration for a run.
//!
//! A `--config` path wins. Otherwise the project directory is searched,
//! TOML names before JSON names, then the user directory
//! (`$GDCRUISER_CONFIG_DIR` or `~/.gdcruiser`). With no file anywhere the
//! built-in defaults apply and no rules run.

use anyhow::{Context, Result};
use gdcruiser_core::{Config, ConfigError, ConfigFormat};
use std::path::{Path, PathBuf};

/// File names looked up in the project directory, in priority order.
const PROJECT_FILES: [(&str, ConfigFormat); 4] = [
    ("gdcruiser.toml", ConfigFormat::Toml),
    (".gdcruiser.toml", ConfigFormat::Toml),
    (".gdcruiser.json", ConfigFormat::Json),
    ("gdcruiser.json", ConfigFormat::Json),
];

/// File looked up in the user directory.
const USER_FILE: (&str, ConfigFormat) = ("config.toml", ConfigFormat::Toml);

/// Overrides the user directory.
const CONFIG_DIR_ENV: &str = "GDCRUISER_CONFIG_DIR";

/// How a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Named by `--config`.
    CommandLine,
    /// Next to the analyzed project.
    Project,
    /// In the user directory.
    User,
}

/// A configuration file chosen for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Location on disk.
    pub path: PathBuf,
    /// How the content is parsed.
    pub format: ConfigFormat,
    /// Where it was found.
    pub origin: Origin,
}

/// Finds the configuration file for `project_dir`.
///
/// Returns `Ok(None)` when defaults should be used.
///
/// # Errors
///
/// Returns an error if `explicit` has neither a `.toml` nor a `.json`
/// extension.
pub fn locate(project_dir: &Path, explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    locate_in(project_dir, explicit, user_config_dir().as_deref())
}

fn locate_in(
    project_dir: &Path,
    explicit: Option<&Path>,
    user_dir: Option<&Path>,
) -> Result<Option<ConfigFile>> {
    if let Some(path) = explicit {
        let format = ConfigFormat::from_path(path).map_err(render)?;
        return Ok(Some(ConfigFile {
            path: path.to_path_buf(),
            format,
            origin: Origin::CommandLine,
        }));
    }

    let project = PROJECT_FILES
        .iter()
        .map(|&(name, format)| (project_dir.join(name), format, Origin::Project));
    let user = user_dir
        .into_iter()
        .map(|dir| (dir.join(USER_FILE.0), USER_FILE.1, Origin::User));

    let found = project
        .chain(user)
        .find(|(path, _, _)| path.is_file())
        .map(|(path, format, origin)| ConfigFile { path, format, origin });

    match &found {
        Some(file) => tracing::debug!("Found {:?} config: {}", file.origin, file.path.display()),
        None => tracing::debug!("No config file in {}", project_dir.display()),
    }
    Ok(found)
}

/// Directory holding the user-wide `config.toml`.
fn user_config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".gdcruiser")),
    }
}

/// Reads the located configuration, or the defaults when there is none.
///
/// # Errors
///
/// Returns the rendered diagnostic if the file cannot be read or parsed.
pub fn load(file: Option<&ConfigFile>) -> Result<Config> {
    let Some(file) = file else {
        return Ok(Config::new());
    };
    if file.origin == Origin::User {
        tracing::info!("Using user config: {}", file.path.display());
    }
    Config::read(&file.path, file.format)
        .map_err(render)
        .with_context(|| format!("Failed to load config: {}", file.path.display()))
}

fn render(err: ConfigError) -> anyhow::Error {
    anyhow::anyhow!("{:?}", miette::Report::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CYCLES_TOML: &str = "[[forbidden]]\nname = \"no-cycles\"\ncircular = true\n";
    const CYCLES_JSON: &str = r#"{"forbidden": [{"name": "no-cycles-json", "circular": true}]}"#;

    fn locate_here(project: &Path, user: Option<&Path>) -> Option<ConfigFile> {
        locate_in(project, None, user).unwrap()
    }

    #[test]
    fn json_config_is_found_and_loaded_without_toml() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".gdcruiser.json"), CYCLES_JSON).unwrap();

        let file = locate_here(project.path(), None).unwrap();
        assert_eq!(file.format, ConfigFormat::Json);
        assert_eq!(file.origin, Origin::Project);

        let config = load(Some(&file)).unwrap();
        assert_eq!(config.rules.forbidden[0].name, "no-cycles-json");
    }

    #[test]
    fn toml_names_shadow_json_names() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("gdcruiser.json"), CYCLES_JSON).unwrap();
        fs::write(project.path().join(".gdcruiser.toml"), CYCLES_TOML).unwrap();

        let file = locate_here(project.path(), None).unwrap();
        assert_eq!(file.path, project.path().join(".gdcruiser.toml"));
        assert_eq!(load(Some(&file)).unwrap().rules.forbidden[0].name, "no-cycles");
    }

    #[test]
    fn user_config_applies_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::write(user.path().join("config.toml"), CYCLES_TOML).unwrap();

        let file = locate_here(project.path(), Some(user.path())).unwrap();
        assert_eq!(file.origin, Origin::User);
        assert!(load(Some(&file)).unwrap().has_rules());

        fs::write(project.path().join("gdcruiser.json"), "{}").unwrap();
        let file = locate_here(project.path(), Some(user.path())).unwrap();
        assert_eq!(file.origin, Origin::Project);
        assert!(!load(Some(&file)).unwrap().has_rules());
    }

    #[test]
    fn nothing_found_loads_defaults() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        assert!(locate_here(project.path(), Some(user.path())).is_none());
        assert!(!load(None).unwrap().has_rules());
    }

    #[test]
    fn explicit_path_picks_format_by_extension() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("gdcruiser.toml"), CYCLES_TOML).unwrap();

        let file = locate_in(project.path(), Some(Path::new("ci/rules.json")), None)
            .unwrap()
            .unwrap();
        assert_eq!(file.origin, Origin::CommandLine);
        assert_eq!(file.format, ConfigFormat::Json);

        let err = locate_in(project.path(), Some(Path::new("rules.yaml")), None).unwrap_err();
        assert!(err.to_string().contains("unsupported config file format"));
    }

    #[test]
    fn parse_errors_render_the_diagnostic() {
        let project = TempDir::new().unwrap();
        let path = project.path().join("gdcruiser.toml");
        fs::write(&path, "[[forbidden]\n").unwrap();

        let file = locate_here(project.path(), None).unwrap();
        let err = load(Some(&file)).unwrap_err();
        let rendered = format!("{err:#}");
        assert!(rendered.contains("Failed to load config"));
        assert!(rendered.contains("gdcruiser::config::parse"));
    }

    #[test]
    fn missing_explicit_file_fails_on_load() {
        let file = locate_in(Path::new("."), Some(Path::new("/nonexistent/gdcruiser.toml")), None)
            .unwrap()
            .unwrap();
        let err = load(Some(&file)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
