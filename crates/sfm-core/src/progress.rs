//! Progress reporting scoped to pipeline phases.
//!
//! Each phase owns a sub-range of `[0, 1]` so several phases can share one
//! progress bar. Within a phase the reported fraction is monotone because
//! it derives from an atomically incremented completion counter; across
//! concurrently reporting tasks no arrival order is guaranteed.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::math::Real;

/// Receiver of progress reports.
///
/// `fraction` lies in `[0, 1]`; `status` is a human-readable message.
/// Implementations must tolerate concurrent, unordered invocation.
pub trait ProgressSink: Sync {
    fn report(&self, fraction: Real, status: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(Real, &str) + Sync,
{
    fn report(&self, fraction: Real, status: &str) {
        self(fraction, status)
    }
}

/// Completion counter for one phase, scaled into a `[lo, hi]` sub-range.
///
/// Owned by a single pipeline invocation, not process-wide state.
pub struct PhaseProgress<'a> {
    sink: Option<&'a dyn ProgressSink>,
    counter: AtomicUsize,
    total: usize,
    lo: Real,
    hi: Real,
}

impl<'a> PhaseProgress<'a> {
    pub fn new(sink: Option<&'a dyn ProgressSink>, total: usize, range: (Real, Real)) -> Self {
        Self {
            sink,
            counter: AtomicUsize::new(0),
            total,
            lo: range.0,
            hi: range.1,
        }
    }

    /// Record one completed unit of work and report the scaled fraction.
    ///
    /// Returns the number of completed units including this one.
    pub fn tick(&self, status: &str) -> usize {
        let done = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(sink) = self.sink {
            let frac = if self.total == 0 {
                self.hi
            } else {
                self.lo + (self.hi - self.lo) * done as Real / self.total as Real
            };
            sink.report(frac.min(self.hi), status);
        }
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<Real>>);

    impl ProgressSink for Recorder {
        fn report(&self, fraction: Real, _status: &str) {
            self.0.lock().unwrap().push(fraction);
        }
    }

    #[test]
    fn fractions_are_monotone_and_stay_in_range() {
        let rec = Recorder(Mutex::new(Vec::new()));
        let phase = PhaseProgress::new(Some(&rec), 4, (0.1, 0.4));
        for _ in 0..4 {
            phase.tick("working");
        }
        let fractions = rec.0.lock().unwrap();
        assert_eq!(fractions.len(), 4);
        for pair in fractions.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(fractions.iter().all(|&f| f > 0.1 && f <= 0.4));
        assert!((fractions[3] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn closures_are_sinks() {
        let phase = PhaseProgress::new(None, 1, (0.0, 1.0));
        assert_eq!(phase.tick("done"), 1);

        fn assert_sink(_s: &dyn ProgressSink) {}
        let f = |_: Real, _: &str| {};
        assert_sink(&f);
    }
}
