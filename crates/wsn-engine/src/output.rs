//! Round sink that streams reports as JSON lines.
//!
//! Each completed round is written as one line holding the rounded
//! [`RoundReport`], so a dashboard or `jq` can follow the run live.
//! Logs go to stderr, which keeps stdout a clean report stream.

use std::io::{self, Stdout, Write};

use tracing::{debug, warn};
use wsn_core::runner::RoundSink;
use wsn_types::RoundReport;

/// Writes each round report as a single JSON line.
pub struct JsonLinesSink<W> {
    writer: W,
    failed_writes: u64,
}

impl JsonLinesSink<Stdout> {
    /// A sink writing to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a sink over any writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            failed_writes: 0,
        }
    }

    /// Number of reports that could not be written.
    pub const fn failed_writes(&self) -> u64 {
        self.failed_writes
    }

    /// Consume the sink and return its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_report(&mut self, report: &RoundReport) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &report.rounded())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write + Send> RoundSink for JsonLinesSink<W> {
    fn on_round(&mut self, round: u64, report: &RoundReport) {
        // A broken pipe must not stop the simulation; the next round retries.
        if let Err(e) = self.write_report(report) {
            self.failed_writes = self.failed_writes.saturating_add(1);
            warn!(round, error = %e, "Failed to write round report");
            return;
        }
        debug!(round, cluster_head = %report.cluster_head, "Round report written");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wsn_core::config::RoundConfig;
    use wsn_core::{FuzzyEngine, run_round};

    use super::*;

    /// A writer that always fails.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn report(seed: u64) -> RoundReport {
        let engine = FuzzyEngine::new().unwrap();
        run_round(
            &RoundConfig::default(),
            &engine,
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    #[test]
    fn writes_one_rounded_line_per_round() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let first = report(1);
        let second = report(2);
        sink.on_round(1, &first);
        sink.on_round(2, &second);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let decoded: RoundReport = serde_json::from_str(lines.first().unwrap()).unwrap();
        assert_eq!(decoded, first.rounded());
        assert_eq!(decoded.records.len(), 30);
    }

    #[test]
    fn write_failures_are_counted_not_fatal() {
        let mut sink = JsonLinesSink::new(Broken);
        sink.on_round(1, &report(3));
        sink.on_round(2, &report(4));
        assert_eq!(sink.failed_writes(), 2);
    }
}
