use std::time::{Duration, Instant};

const SAMPLE_EVERY: Duration = Duration::from_millis(500);

/// Windowed generations-per-second meter.
pub struct Throughput {
    steps: u32,
    since: Instant,
}
impl Throughput {
    pub fn new() -> Self {
        Self {
            steps: 0,
            since: Instant::now(),
        }
    }

    pub fn record(&mut self) {
        self.steps += 1;
    }

    pub fn has_sample(&self) -> bool {
        self.since.elapsed() >= SAMPLE_EVERY
    }
    /// Rate over the elapsed window; starts a new window.
    pub fn sample(&mut self) -> f64 {
        let rate = f64::from(self.steps) / self.since.elapsed().as_secs_f64();
        self.steps = 0;
        self.since = Instant::now();
        rate
    }
}
