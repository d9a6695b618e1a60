//! Runs the strategies a [`Mode`](crate::Mode) asks for and reports their timings.
use crate::journal::Journal;
use crate::outcome::Outcome;
use crate::{parallel, sequential, Config};
use std::io::{self, Write};
use std::sync::Arc;

/// Outcomes of whichever strategies ran.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    /// Set when the sequential strategy ran.
    pub sequential: Option<Outcome>,
    /// Set when the parallel strategy ran.
    pub parallel: Option<Outcome>,
}

impl Report {
    /// Sequential minus parallel elapsed time, in milliseconds, when both ran.
    pub fn difference_ms(&self) -> Option<i128> {
        match (&self.sequential, &self.parallel) {
            (Some(seq), Some(par)) => Some(seq.elapsed_ms() as i128 - par.elapsed_ms() as i128),
            _ => None,
        }
    }

    /// Writes the `[Summary]` block.
    pub fn write_summary(&self, out: &mut impl Write) -> io::Result<()> {
        let both = self.sequential.is_some() && self.parallel.is_some();
        if let Some(seq) = &self.sequential {
            writeln!(out, "[Summary] SEQUENTIAL total: {} ms", seq.elapsed_ms())?;
        }
        if let Some(par) = &self.parallel {
            if both {
                writeln!(out, "[Summary] PARALLEL   total: {} ms", par.elapsed_ms())?;
            } else {
                writeln!(out, "[Summary] PARALLEL total: {} ms", par.elapsed_ms())?;
            }
        }
        if let Some(diff) = self.difference_ms() {
            writeln!(out, "[Summary] Difference (seq-par): {diff} ms")?;
        }
        Ok(())
    }
}

/// Runs the strategies selected by `config.mode()`, sequential first,
/// framing each with banners on `out`, then writes the summary.
///
/// Every parallel run gets its own buffer and completion flag, so a
/// preceding sequential run can't leak state into it.
pub fn run<W: Write>(config: &Config, journal: Arc<dyn Journal>, out: &mut W) -> io::Result<Report> {
    let mode = config.mode();
    let mut report = Report::default();

    if mode.runs_sequential() {
        writeln!(out, "===== SEQUENTIAL run started =====\n")?;
        out.flush()?;
        report.sequential = Some(sequential::run(config, &*journal));
        writeln!(out, "\n===== SEQUENTIAL run finished =====")?;
        if mode.runs_parallel() {
            writeln!(out)?;
        }
    }

    if mode.runs_parallel() {
        writeln!(out, "===== PARALLEL run started =====\n")?;
        out.flush()?;
        report.parallel = Some(parallel::run(config, journal));
        writeln!(out, "\n===== PARALLEL run finished =====")?;
        if mode.runs_sequential() {
            writeln!(out)?;
        }
    }

    report.write_summary(out)?;
    out.flush()?;
    Ok(report)
}

/// Writes the parameter header printed before any run.
pub fn write_header(config: &Config, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n=== Run parameters ===")?;
    writeln!(out, "{config}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{Recorder, Strategy};
    use crate::Mode;
    use std::time::Duration;

    cfg_not_loom! {
    fn run_to_string(config: &Config, journal: Arc<dyn Journal>) -> (Report, String) {
        let mut out = Vec::new();
        let report = run(config, journal, &mut out).unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn sequential_only() {
        let config = Config::new(Mode::Sequential, 3, 5, 0, 0).unwrap();
        let journal = Arc::new(Recorder::new());
        let (report, out) = run_to_string(&config, journal.clone());

        assert_eq!(report.sequential.unwrap().consumed, vec![1, 2, 3, 4, 5]);
        assert!(report.parallel.is_none());
        assert!(journal.consumed(Strategy::Parallel).is_empty());
        assert!(out.contains("===== SEQUENTIAL run started ====="));
        assert!(!out.contains("PARALLEL"));
        assert!(out.contains("[Summary] SEQUENTIAL total: "));
        assert!(!out.contains("Difference"));
    }

    #[test]
    fn parallel_only() {
        let config = Config::new(Mode::Parallel, 1, 3, 0, 0).unwrap();
        let (report, out) = run_to_string(&config, Arc::new(Recorder::new()));

        assert_eq!(report.parallel.unwrap().consumed, vec![1, 2, 3]);
        assert!(report.sequential.is_none());
        assert!(out.contains("[Summary] PARALLEL total: "));
        assert!(!out.contains("SEQUENTIAL"));
    }

    #[test]
    fn both_runs_are_independent() {
        let both = Config::new(Mode::Both, 2, 30, 0, 0).unwrap();
        let journal = Arc::new(Recorder::new());
        let (report, out) = run_to_string(&both, journal.clone());

        let standalone = Config::new(Mode::Parallel, 2, 30, 0, 0).unwrap();
        let (alone, _) = run_to_string(&standalone, Arc::new(Recorder::new()));

        let expected: Vec<_> = (1..=30).collect();
        assert_eq!(report.sequential.as_ref().unwrap().consumed, expected);
        assert_eq!(report.parallel.as_ref().unwrap().consumed, expected);
        assert_eq!(report.parallel.as_ref().unwrap().consumed, alone.parallel.unwrap().consumed);
        assert_eq!(journal.consumed(Strategy::Parallel), expected);
        assert_eq!(journal.consumed(Strategy::Sequential), expected);

        assert!(report.difference_ms().is_some());
        let seq_at = out.find("SEQUENTIAL run started").unwrap();
        let par_at = out.find("PARALLEL run started").unwrap();
        assert!(seq_at < par_at);
        assert!(out.contains("[Summary] PARALLEL   total: "));
        assert!(out.contains("[Summary] Difference (seq-par): "));
    }
    }

    fn outcome(ms: u64) -> Outcome {
        Outcome {
            consumed: vec![],
            produced: 0,
            peak_fill: 0,
            elapsed: Duration::from_millis(ms),
        }
    }

    #[test]
    fn difference_is_signed() {
        let report = Report {
            sequential: Some(outcome(100)),
            parallel: Some(outcome(250)),
        };
        assert_eq!(report.difference_ms(), Some(-150));

        let mut out = Vec::new();
        report.write_summary(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[Summary] SEQUENTIAL total: 100 ms\n\
             [Summary] PARALLEL   total: 250 ms\n\
             [Summary] Difference (seq-par): -150 ms\n"
        );
    }

    #[test]
    fn single_strategy_summary() {
        let report = Report {
            sequential: None,
            parallel: Some(outcome(42)),
        };
        assert_eq!(report.difference_ms(), None);

        let mut out = Vec::new();
        report.write_summary(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[Summary] PARALLEL total: 42 ms\n");
    }

    #[test]
    fn header() {
        let mut out = Vec::new();
        write_header(&Config::default(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n=== Run parameters ===\nmode=both | capacity=3 | items=12 | P=120ms | C=150ms\n\n"
        );
    }
}
