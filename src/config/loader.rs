use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::options::RawOptions;
use crate::errors::ConfigWarning;

/// Looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".covgate.toml";

/// Keys accepted in `.covgate.toml`. Values may be strings, numbers or
/// booleans; they are stringified and validated like every other layer.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileOptions {
    minimum_suite_coverage: Option<toml::Value>,
    minimum_file_coverage: Option<toml::Value>,
    coverage_path: Option<toml::Value>,
    debug_mode: Option<toml::Value>,
    on_fail_status: Option<toml::Value>,
    post_comment: Option<toml::Value>,
    update_comment: Option<toml::Value>,
}

impl From<FileOptions> for RawOptions {
    fn from(file: FileOptions) -> Self {
        RawOptions {
            minimum_suite_coverage: file.minimum_suite_coverage.map(value_to_string),
            minimum_file_coverage: file.minimum_file_coverage.map(value_to_string),
            coverage_path: file.coverage_path.map(value_to_string),
            debug_mode: file.debug_mode.map(value_to_string),
            on_fail_status: file.on_fail_status.map(value_to_string),
            post_comment: file.post_comment.map(value_to_string),
            update_comment: file.update_comment.map(value_to_string),
            // Tokens are never read from disk.
            github_token: None,
        }
    }
}

fn value_to_string(value: toml::Value) -> String {
    match value {
        toml::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Pure function to parse config file contents
pub fn parse_file_options(contents: &str) -> Result<RawOptions, String> {
    toml::from_str::<FileOptions>(contents)
        .map(RawOptions::from)
        .map_err(|e| format!("Failed to parse config file: {}", e))
}

/// Load option defaults from a TOML file.
///
/// An explicitly requested file that cannot be read produces a warning; the
/// implicit `.covgate.toml` is optional and silently skipped when absent. A
/// file that fails to parse is ignored with a warning.
pub fn load_file_options(explicit: Option<&Path>) -> (RawOptions, Vec<ConfigWarning>) {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if explicit.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No {} found, using environment only", DEFAULT_CONFIG_FILE);
            return (RawOptions::default(), Vec::new());
        }
        Err(e) => {
            let warning = ConfigWarning::new(
                "config",
                format!("cannot read {}: {}; ignoring it", path.display(), e),
            );
            return (RawOptions::default(), vec![warning]);
        }
    };

    match parse_file_options(&contents) {
        Ok(options) => {
            log::debug!("Loaded config from {}", path.display());
            (options, Vec::new())
        }
        Err(e) => (
            RawOptions::default(),
            vec![ConfigWarning::new(
                "config",
                format!("{} ({}); ignoring it", e, path.display()),
            )],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_mixed_value_types() {
        let options = parse_file_options(indoc! {r#"
            minimum_suite_coverage = 85
            minimum_file_coverage = 60.5
            coverage_path = "tmp/.resultset.json"
            debug_mode = true
            on_fail_status = "warn"
        "#})
        .unwrap();

        assert_eq!(options.minimum_suite_coverage.as_deref(), Some("85"));
        assert_eq!(options.minimum_file_coverage.as_deref(), Some("60.5"));
        assert_eq!(options.coverage_path.as_deref(), Some("tmp/.resultset.json"));
        assert_eq!(options.debug_mode.as_deref(), Some("true"));
        assert_eq!(options.on_fail_status.as_deref(), Some("warn"));
        assert_eq!(options.github_token, None);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(parse_file_options("github_token = \"secret\"").is_err());
        assert!(parse_file_options("minimum_coverage = 3").is_err());
    }

    #[test]
    fn test_missing_explicit_file_warns() {
        let dir = TempDir::new().unwrap();
        let (options, warnings) = load_file_options(Some(&dir.path().join("nope.toml")));
        assert_eq!(options, RawOptions::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].option, "config");
    }

    #[test]
    fn test_malformed_file_warns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("covgate.toml");
        std::fs::write(&path, "minimum_suite_coverage = [").unwrap();

        let (options, warnings) = load_file_options(Some(&path));
        assert_eq!(options, RawOptions::default());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("covgate.toml");
        std::fs::write(&path, "minimum_file_coverage = 75\n").unwrap();

        let (options, warnings) = load_file_options(Some(&path));
        assert!(warnings.is_empty());
        assert_eq!(options.minimum_file_coverage.as_deref(), Some("75"));
    }
}
