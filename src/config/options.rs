//! Raw option strings and the validating parser.
//!
//! Every value is parsed independently. Only the two numeric thresholds are
//! fatal when invalid; anything else falls back to its default and records a
//! warning.

use super::thresholds::{FailStatus, GateConfig, ThresholdConfig, DEFAULT_COVERAGE_PATH};
use crate::errors::{ConfigWarning, GateError};
use std::path::PathBuf;

/// Unvalidated option values as read from flags, environment or file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    pub minimum_suite_coverage: Option<String>,
    pub minimum_file_coverage: Option<String>,
    pub coverage_path: Option<String>,
    pub debug_mode: Option<String>,
    pub on_fail_status: Option<String>,
    pub post_comment: Option<String>,
    pub update_comment: Option<String>,
    pub github_token: Option<String>,
}

impl RawOptions {
    /// Fill every blank value in `self` from `fallback`.
    ///
    /// Blank strings count as unset; CI runners export empty variables for
    /// inputs that were never given.
    #[must_use]
    pub fn or(self, fallback: RawOptions) -> RawOptions {
        fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
            non_blank(primary).or_else(|| non_blank(fallback))
        }

        RawOptions {
            minimum_suite_coverage: pick(
                self.minimum_suite_coverage,
                fallback.minimum_suite_coverage,
            ),
            minimum_file_coverage: pick(
                self.minimum_file_coverage,
                fallback.minimum_file_coverage,
            ),
            coverage_path: pick(self.coverage_path, fallback.coverage_path),
            debug_mode: pick(self.debug_mode, fallback.debug_mode),
            on_fail_status: pick(self.on_fail_status, fallback.on_fail_status),
            post_comment: pick(self.post_comment, fallback.post_comment),
            update_comment: pick(self.update_comment, fallback.update_comment),
            github_token: pick(self.github_token, fallback.github_token),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Turn raw option strings into a typed configuration.
///
/// # Errors
///
/// Returns `GateError::Config` when a numeric threshold is not a number or
/// lies outside `[0, 100]`.
pub fn parse_options(raw: &RawOptions) -> Result<(GateConfig, Vec<ConfigWarning>), GateError> {
    let defaults = ThresholdConfig::default();
    let mut warnings = Vec::new();

    let minimum_suite_coverage = parse_percentage(
        "minimum_suite_coverage",
        raw.minimum_suite_coverage.as_deref(),
        defaults.minimum_suite_coverage,
    )?;
    let minimum_file_coverage = parse_percentage(
        "minimum_file_coverage",
        raw.minimum_file_coverage.as_deref(),
        defaults.minimum_file_coverage,
    )?;

    let debug_mode = parse_flag("debug_mode", raw.debug_mode.as_deref(), false, &mut warnings);
    let on_fail = parse_fail_status(raw.on_fail_status.as_deref(), &mut warnings);
    let mut post_comment = parse_flag(
        "post_comment",
        raw.post_comment.as_deref(),
        defaults.post_comment,
        &mut warnings,
    );
    let update_comment = parse_flag(
        "update_comment",
        raw.update_comment.as_deref(),
        defaults.update_comment,
        &mut warnings,
    );

    let github_token = non_blank(raw.github_token.clone()).map(|t| t.trim().to_string());
    if post_comment && github_token.is_none() {
        warnings.push(ConfigWarning::new(
            "post_comment",
            "enabled without github_token; comment posting is disabled",
        ));
        post_comment = false;
    }

    let coverage_path = non_blank(raw.coverage_path.clone())
        .map(|p| PathBuf::from(p.trim()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COVERAGE_PATH));

    let config = GateConfig {
        thresholds: ThresholdConfig {
            minimum_suite_coverage,
            minimum_file_coverage,
            on_fail,
            post_comment,
            update_comment,
        },
        coverage_path,
        debug_mode,
        github_token,
    };

    Ok((config, warnings))
}

fn parse_percentage(
    option: &'static str,
    raw: Option<&str>,
    default: f64,
) -> Result<f64, GateError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };

    let value: f64 = raw
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| GateError::config(option, format!("'{raw}' is not a number")))?;

    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(GateError::config(
            option,
            format!("{raw} is outside the range 0-100"),
        ))
    }
}

fn parse_flag(
    option: &'static str,
    raw: Option<&str>,
    default: bool,
    warnings: &mut Vec<ConfigWarning>,
) -> bool {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };

    match raw {
        "true" | "True" | "TRUE" | "yes" | "on" | "1" => true,
        "false" | "False" | "FALSE" | "no" | "off" | "0" => false,
        other => {
            warnings.push(ConfigWarning::new(
                option,
                format!("expected a boolean, got '{other}'; using {default}"),
            ));
            default
        }
    }
}

fn parse_fail_status(raw: Option<&str>, warnings: &mut Vec<ConfigWarning>) -> FailStatus {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return FailStatus::default();
    };

    match raw.to_ascii_lowercase().as_str() {
        "fail" | "failure" | "error" => FailStatus::Fail,
        "warn" | "warning" | "neutral" => FailStatus::Warn,
        _ => {
            warnings.push(ConfigWarning::new(
                "on_fail_status",
                format!("expected 'fail' or 'warn', got '{raw}'; using fail"),
            ));
            FailStatus::Fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw() -> RawOptions {
        RawOptions::default()
    }

    #[test]
    fn test_defaults_without_any_option() {
        let (config, warnings) = parse_options(&raw()).unwrap();
        assert_eq!(config, GateConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_thresholds_are_parsed() {
        let options = RawOptions {
            minimum_suite_coverage: Some("87.5".into()),
            minimum_file_coverage: Some(" 50 ".into()),
            ..raw()
        };
        let (config, _) = parse_options(&options).unwrap();
        assert_eq!(config.thresholds.minimum_suite_coverage, 87.5);
        assert_eq!(config.thresholds.minimum_file_coverage, 50.0);
    }

    #[test]
    fn test_percent_sign_is_tolerated() {
        let options = RawOptions {
            minimum_suite_coverage: Some("90%".into()),
            ..raw()
        };
        let (config, _) = parse_options(&options).unwrap();
        assert_eq!(config.thresholds.minimum_suite_coverage, 90.0);
    }

    #[test]
    fn test_threshold_bounds_are_inclusive() {
        let options = RawOptions {
            minimum_suite_coverage: Some("0".into()),
            minimum_file_coverage: Some("100".into()),
            ..raw()
        };
        assert!(parse_options(&options).is_ok());
    }

    #[test]
    fn test_out_of_range_threshold_is_fatal() {
        for bad in ["100.01", "-1", "250"] {
            let options = RawOptions {
                minimum_file_coverage: Some(bad.into()),
                ..raw()
            };
            match parse_options(&options) {
                Err(GateError::Config { option, .. }) => {
                    assert_eq!(option, "minimum_file_coverage")
                }
                other => panic!("expected config error for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_numeric_threshold_is_fatal() {
        for bad in ["eighty", "NaN", "inf"] {
            let options = RawOptions {
                minimum_suite_coverage: Some(bad.into()),
                ..raw()
            };
            assert!(parse_options(&options).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_malformed_flag_warns_and_uses_default() {
        let options = RawOptions {
            debug_mode: Some("sometimes".into()),
            update_comment: Some("nah".into()),
            ..raw()
        };
        let (config, warnings) = parse_options(&options).unwrap();

        assert!(!config.debug_mode);
        assert!(config.thresholds.update_comment);
        let options: Vec<&str> = warnings.iter().map(|w| w.option).collect();
        assert_eq!(options, vec!["debug_mode", "update_comment"]);
    }

    #[test]
    fn test_boolean_spellings() {
        let cases = [
            ("TRUE", true),
            ("yes", true),
            ("1", true),
            ("False", false),
            ("off", false),
        ];
        for (input, expected) in cases {
            let options = RawOptions {
                debug_mode: Some(input.into()),
                ..raw()
            };
            let (config, warnings) = parse_options(&options).unwrap();
            assert_eq!(config.debug_mode, expected, "input {input}");
            assert!(warnings.is_empty());
        }
    }

    #[test]
    fn test_fail_status_values() {
        let parse = |value: &str| {
            let options = RawOptions {
                on_fail_status: Some(value.into()),
                ..raw()
            };
            parse_options(&options).unwrap()
        };

        assert_eq!(parse("warn").0.thresholds.on_fail, FailStatus::Warn);
        assert_eq!(parse("Warning").0.thresholds.on_fail, FailStatus::Warn);
        assert_eq!(parse("fail").0.thresholds.on_fail, FailStatus::Fail);

        let (config, warnings) = parse("explode");
        assert_eq!(config.thresholds.on_fail, FailStatus::Fail);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].option, "on_fail_status");
    }

    #[test]
    fn test_post_comment_requires_token() {
        let options = RawOptions {
            post_comment: Some("true".into()),
            ..raw()
        };
        let (config, warnings) = parse_options(&options).unwrap();
        assert!(!config.thresholds.post_comment);
        assert_eq!(warnings[0].option, "post_comment");

        let options = RawOptions {
            post_comment: Some("true".into()),
            github_token: Some("ghp_secret".into()),
            ..raw()
        };
        let (config, warnings) = parse_options(&options).unwrap();
        assert!(config.thresholds.post_comment);
        assert_eq!(config.github_token.as_deref(), Some("ghp_secret"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_blank_values_use_defaults_silently() {
        let options = RawOptions {
            minimum_suite_coverage: Some("".into()),
            coverage_path: Some("  ".into()),
            debug_mode: Some("".into()),
            github_token: Some("".into()),
            ..raw()
        };
        let (config, warnings) = parse_options(&options).unwrap();
        assert_eq!(config, GateConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_or_prefers_non_blank_primary() {
        let primary = RawOptions {
            minimum_suite_coverage: Some("80".into()),
            coverage_path: Some("".into()),
            ..raw()
        };
        let fallback = RawOptions {
            minimum_suite_coverage: Some("10".into()),
            coverage_path: Some("cov/rs.json".into()),
            debug_mode: Some("true".into()),
            ..raw()
        };
        let merged = primary.or(fallback);

        assert_eq!(merged.minimum_suite_coverage.as_deref(), Some("80"));
        assert_eq!(merged.coverage_path.as_deref(), Some("cov/rs.json"));
        assert_eq!(merged.debug_mode.as_deref(), Some("true"));
    }
}
