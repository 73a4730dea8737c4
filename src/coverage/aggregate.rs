//! Pure line-count aggregation over a selected run.

use super::types::RunResult;

/// Line counts for a file with at least one executable line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTotals {
    pub path: String,
    pub executable_lines: usize,
    pub covered_lines: usize,
}

impl FileTotals {
    /// Unrounded coverage percentage in `[0, 100]`.
    pub fn percent(&self) -> f64 {
        percent_of(self.covered_lines, self.executable_lines)
    }
}

/// Per-file figures and running totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Qualifying files in encounter order.
    pub files: Vec<FileTotals>,
    pub total_executable: usize,
    pub total_covered: usize,
}

impl Aggregate {
    /// Unrounded total coverage; exactly `0.0` when nothing is executable.
    pub fn total_percent(&self) -> f64 {
        percent_of(self.total_covered, self.total_executable)
    }
}

/// Count executable and covered lines per file and across the run.
///
/// Files without executable lines have undefined coverage and are dropped.
pub fn aggregate(run: &RunResult) -> Aggregate {
    run.files
        .iter()
        .map(|file| FileTotals {
            path: file.path.clone(),
            executable_lines: file.executable_line_count(),
            covered_lines: file.covered_line_count(),
        })
        .filter(|totals| totals.executable_lines > 0)
        .fold(Aggregate::default(), |mut acc, totals| {
            acc.total_executable += totals.executable_lines;
            acc.total_covered += totals.covered_lines;
            acc.files.push(totals);
            acc
        })
}

/// `covered / executable * 100`, defined as `0.0` for an empty denominator.
///
/// Multiplying before dividing keeps whole percentages exact (7 of 10 is
/// 70.0, not 69.99...).
pub fn percent_of(covered: usize, executable: usize) -> f64 {
    if executable == 0 {
        0.0
    } else {
        covered as f64 * 100.0 / executable as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::types::FileCoverage;

    fn run(files: Vec<FileCoverage>) -> RunResult {
        RunResult { files }
    }

    #[test]
    fn test_aggregate_single_file() {
        let totals = aggregate(&run(vec![FileCoverage::new(
            "a.rb",
            vec![Some(1), Some(1), Some(0), None],
        )]));

        assert_eq!(totals.total_executable, 3);
        assert_eq!(totals.total_covered, 2);
        assert_eq!(totals.files.len(), 1);
        assert!((totals.files[0].percent() - 66.666_666).abs() < 1e-4);
    }

    #[test]
    fn test_files_without_executable_lines_are_dropped() {
        let totals = aggregate(&run(vec![
            FileCoverage::new("blank.rb", vec![None, None]),
            FileCoverage::new("empty.rb", vec![]),
            FileCoverage::new("real.rb", vec![Some(0), Some(4)]),
        ]));

        assert_eq!(totals.files.len(), 1);
        assert_eq!(totals.files[0].path, "real.rb");
        assert_eq!(totals.total_executable, 2);
        assert_eq!(totals.total_covered, 1);
    }

    #[test]
    fn test_totals_sum_across_files() {
        let totals = aggregate(&run(vec![
            FileCoverage::new("a.rb", vec![Some(1), Some(0)]),
            FileCoverage::new("b.rb", vec![Some(1), Some(1), Some(1), Some(0)]),
        ]));

        assert_eq!(totals.total_executable, 6);
        assert_eq!(totals.total_covered, 4);
    }

    #[test]
    fn test_total_percent_is_zero_without_executable_lines() {
        let totals = aggregate(&run(vec![FileCoverage::new("blank.rb", vec![None])]));
        assert_eq!(totals.total_percent(), 0.0);
    }

    #[test]
    fn test_whole_percentages_are_exact() {
        assert_eq!(percent_of(7, 10), 70.0);
        assert_eq!(percent_of(1, 2), 50.0);
        assert_eq!(percent_of(3, 3), 100.0);
    }
}
