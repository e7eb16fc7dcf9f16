use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Wall-clock durations of the pipeline stages, in execution order.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts timing `name`; the step is recorded when the guard drops,
    /// including on early return through `?`.
    pub fn step(&mut self, name: &'static str) -> StepGuard<'_> {
        StepGuard {
            timings: self,
            name,
            start: Instant::now(),
        }
    }

    pub fn add_step(&mut self, name: &'static str, duration: Duration) {
        self.steps.push(StepTiming { name, duration });
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Summed duration of every run of `name`.
    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.steps
            .iter()
            .filter(|s| s.name == name)
            .map(|s| s.duration)
            .reduce(|a, b| a + b)
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn print_summary(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for PipelineTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_duration().as_secs_f64();
        writeln!(f, "\nDust Detection Timing Summary:")?;
        writeln!(f, "{:-<60}", "")?;
        for step in &self.steps {
            let secs = step.duration.as_secs_f64();
            let share = if total > 0.0 { secs / total * 100.0 } else { 0.0 };
            writeln!(f, "{:<30} {:>12.3}ms ({:>5.1}%)", step.name, secs * 1000.0, share)?;
        }
        writeln!(f, "{:-<60}", "")?;
        write!(f, "{:<30} {:>12.3}ms", "Total", total * 1000.0)
    }
}

/// Running step of a [`PipelineTimings`]
pub struct StepGuard<'a> {
    timings: &'a mut PipelineTimings,
    name: &'static str,
    start: Instant,
}

impl Drop for StepGuard<'_> {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.timings.add_step(self.name, duration);
    }
}
