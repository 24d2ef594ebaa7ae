// ─── Progress Reporting ───
// Assembly reports one step per file written to the archive.

/// Receives progress while an archive is being built.
///
/// `task` gets the completed fraction (0.0..=1.0) of the current archive.
/// `global` gets the increment contributed to an overall run spanning several
/// archives; ignore it unless you drive a global progress bar.
pub trait ProgressReporter {
    fn task(&mut self, progress: f64, label: &str);

    fn global(&mut self, _delta: f64, _label: &str) {}
}

impl<F> ProgressReporter for F
where
    F: FnMut(f64, &str),
{
    fn task(&mut self, progress: f64, label: &str) {
        self(progress, label)
    }
}

/// Reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn task(&mut self, _progress: f64, _label: &str) {}
}

/// Holds the delta progress of one archive and forwards steps to a reporter.
pub struct ProgressTracker<'r> {
    reporter: &'r mut dyn ProgressReporter,
    delta_progress: f64,
    increment: f64,
    global_share: f64,
    steps: usize,
    total: usize,
}

impl<'r> ProgressTracker<'r> {
    pub fn new(reporter: &'r mut dyn ProgressReporter) -> Self {
        Self {
            reporter,
            delta_progress: 0.0,
            increment: 0.0,
            global_share: 1.0,
            steps: 0,
            total: 0,
        }
    }

    /// Start a new task of `total_files` steps worth `global_share` of the whole run.
    pub fn reset(&mut self, total_files: usize, global_share: f64) {
        self.delta_progress = 0.0;
        self.steps = 0;
        self.total = total_files;
        self.global_share = global_share;
        self.increment = if total_files == 0 {
            0.0
        } else {
            1.0 / total_files as f64
        };
    }

    /// Record one file and notify the reporter.
    pub fn advance(&mut self, label: &str) {
        self.steps += 1;
        // The last step lands exactly on 1.0 regardless of float drift.
        self.delta_progress = if self.steps >= self.total {
            1.0
        } else {
            (self.delta_progress + self.increment).min(1.0)
        };

        self.reporter.task(self.delta_progress, label);
        self.reporter
            .global(self.increment * self.global_share, label);
    }

    pub fn progress(&self) -> f64 {
        self.delta_progress
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn steps(&self) -> usize {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        task: Vec<(f64, String)>,
        global: Vec<f64>,
    }

    impl ProgressReporter for Recorder {
        fn task(&mut self, progress: f64, label: &str) {
            self.task.push((progress, label.to_string()));
        }

        fn global(&mut self, delta: f64, _label: &str) {
            self.global.push(delta);
        }
    }

    #[test]
    fn advances_by_fixed_increment_and_ends_at_one() {
        let mut recorder = Recorder::default();
        {
            let mut tracker = ProgressTracker::new(&mut recorder);
            tracker.reset(3, 0.5);
            for label in ["a", "b", "c"] {
                tracker.advance(label);
            }
            assert_eq!(tracker.steps(), 3);
            assert_eq!(tracker.progress(), 1.0);
        }

        let fractions: Vec<f64> = recorder.task.iter().map(|(p, _)| *p).collect();
        assert!((fractions[0] - 1.0 / 3.0).abs() < 1e-9);
        assert!((fractions[1] - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(fractions[2], 1.0);
        assert_eq!(recorder.task[1].1, "b");
        assert!(recorder
            .global
            .iter()
            .all(|d| (d - 1.0 / 6.0).abs() < 1e-9));
    }

    #[test]
    fn closures_are_task_reporters() {
        let mut seen = Vec::new();
        let mut reporter = |p: f64, label: &str| seen.push((p, label.to_string()));
        {
            let mut tracker = ProgressTracker::new(&mut reporter);
            tracker.reset(2, 1.0);
            tracker.advance("mods/forge.jar");
        }
        assert_eq!(seen, vec![(0.5, "mods/forge.jar".to_string())]);
    }

    #[test]
    fn reset_clears_previous_task() {
        let mut reporter = NoProgress;
        let mut tracker = ProgressTracker::new(&mut reporter);
        tracker.reset(4, 1.0);
        tracker.advance("x");
        tracker.reset(0, 1.0);
        assert_eq!(tracker.progress(), 0.0);
        assert_eq!(tracker.increment(), 0.0);
    }
}
