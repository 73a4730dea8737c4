use clap::Parser;
use std::path::PathBuf;

use crate::config::RawOptions;

/// Every option is read as a raw string so that malformed values can be
/// reported as warnings instead of aborting argument parsing. Environment
/// names follow the GitHub Actions `INPUT_<NAME>` convention.
#[derive(Parser, Debug, Default)]
#[command(name = "covgate")]
#[command(about = "Fail CI when SimpleCov coverage drops below a threshold", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Minimum total coverage percentage (0-100)
    #[arg(long, env = "INPUT_MINIMUM_SUITE_COVERAGE", value_name = "PERCENT")]
    pub minimum_suite_coverage: Option<String>,

    /// Minimum coverage percentage for every file (0-100)
    #[arg(long, env = "INPUT_MINIMUM_FILE_COVERAGE", value_name = "PERCENT")]
    pub minimum_file_coverage: Option<String>,

    /// Path to the SimpleCov result set [default: coverage/.resultset.json]
    #[arg(long, env = "INPUT_COVERAGE_PATH", value_name = "PATH")]
    pub coverage_path: Option<String>,

    /// Print per-file details as debug annotations
    #[arg(
        long,
        env = "INPUT_DEBUG_MODE",
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub debug_mode: Option<String>,

    /// What a failed check does: fail (exit 1) or warn (exit 0)
    #[arg(long, env = "INPUT_ON_FAIL_STATUS", value_name = "fail|warn")]
    pub on_fail_status: Option<String>,

    /// Post the report as a pull request comment
    #[arg(
        long,
        env = "INPUT_POST_COMMENT",
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub post_comment: Option<String>,

    /// Edit the previous report comment instead of adding a new one
    #[arg(
        long,
        env = "INPUT_UPDATE_COMMENT",
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub update_comment: Option<String>,

    /// Token used to post the pull request comment
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub github_token: Option<String>,

    /// Config file with option defaults [default: .covgate.toml]
    #[arg(long, env = "COVGATE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Option strings from flags and environment, before file defaults.
    pub fn raw_options(&self) -> RawOptions {
        RawOptions {
            minimum_suite_coverage: self.minimum_suite_coverage.clone(),
            minimum_file_coverage: self.minimum_file_coverage.clone(),
            coverage_path: self.coverage_path.clone(),
            debug_mode: self.debug_mode.clone(),
            on_fail_status: self.on_fail_status.clone(),
            post_comment: self.post_comment.clone(),
            update_comment: self.update_comment.clone(),
            github_token: self.github_token.clone(),
        }
    }
}
