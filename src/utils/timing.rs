//! Wall-clock timing of each metric, printed as a two-column table.

use console::style;
use std::time::{Duration, Instant};

/// Collects the time spent on each labelled step of a run.
#[derive(Debug, Default)]
pub struct Timings {
    total: Duration,
}

impl Timings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f`, print how long it took under `label` and return its result.
    pub fn measure<T>(&mut self, label: &str, f: impl FnOnce() -> T) -> T {
        let (out, elapsed) = timed(f);
        self.record(label, elapsed);
        out
    }

    /// Print and accumulate a duration measured elsewhere, for labels that depend on
    /// the result.
    pub fn record(&mut self, label: &str, elapsed: Duration) {
        self.total += elapsed;
        println!("{}", format_timing(label, elapsed));
    }

    pub fn total(&self) -> Duration {
        self.total
    }
}

pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// `   label:            1.2345 s ` for anything above a second, milliseconds otherwise.
pub fn format_timing(label: &str, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    let value = if secs > 1.0 {
        format!("{:.4} s ", secs)
    } else {
        format!("{:.4} ms", secs * 1000.0)
    };
    format!("{:<23}{}", format!("   {label}:"), style(format!("{value:>12}")).dim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_durations_use_milliseconds() {
        console::set_colors_enabled(false);
        let line = format_timing("account data", Duration::from_millis(12));
        assert!(line.starts_with("   account data:"));
        assert!(line.ends_with("12.0000 ms"));
    }

    #[test]
    fn long_durations_use_seconds() {
        console::set_colors_enabled(false);
        let line = format_timing("LOC (no cache)", Duration::from_millis(2500));
        assert!(line.ends_with("2.5000 s "));
    }

    #[test]
    fn measure_accumulates_total() {
        let mut timings = Timings::new();
        let value = timings.measure("noop", || 41 + 1);
        assert_eq!(value, 42);
        assert!(timings.total() < Duration::from_secs(5));

        timings.record("LOC (cached)", Duration::from_secs(10));
        assert!(timings.total() >= Duration::from_secs(10));
    }
}
