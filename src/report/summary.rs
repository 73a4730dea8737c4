use crate::config::CiEnvironment;
use crate::errors::GateError;
use std::fs;

/// Overwrite the CI step-summary file with `content`.
///
/// Returns `Ok(false)` without touching the file system when the runner
/// provides no summary file.
pub fn write_step_summary(ci: &CiEnvironment, content: &str) -> Result<bool, GateError> {
    let Some(path) = ci.step_summary.as_deref() else {
        log::debug!("GITHUB_STEP_SUMMARY not set, skipping job summary");
        return Ok(false);
    };

    fs::write(path, content).map_err(|e| GateError::io(e, path))?;
    log::debug!("Wrote job summary to {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_sink_is_a_no_op() {
        assert!(!write_step_summary(&CiEnvironment::default(), "ignored").unwrap());
    }

    #[test]
    fn test_summary_overwrites_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.md");
        fs::write(&path, "previous step output\n").unwrap();
        let ci = CiEnvironment {
            step_summary: Some(path.clone()),
            ..CiEnvironment::default()
        };

        assert!(write_step_summary(&ci, "## Coverage report\n").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "## Coverage report\n");
    }

    #[test]
    fn test_unwritable_sink_is_an_error() {
        let dir = TempDir::new().unwrap();
        let ci = CiEnvironment {
            step_summary: Some(dir.path().join("missing/dir/summary.md")),
            ..CiEnvironment::default()
        };

        assert!(matches!(
            write_step_summary(&ci, "x"),
            Err(GateError::Io { .. })
        ));
    }
}
