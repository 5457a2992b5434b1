//! Fixed-interval run loop.
//!
//! Each iteration measures wall time, feeds it into an accumulator and decides
//! between a full step (update + render) and a fast step (update only) used to
//! catch up after the loop fell behind.

use std::time::{Duration, Instant};

/// Cap on the backlog, in intervals, so a long stall cannot spiral.
const MAX_BACKLOG_INTERVALS: f64 = 10.0;

/// Pause between loop iterations.
const PACING_WAIT_MS: f64 = 1.0;

/// Which kind of step an iteration ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Update followed by render.
    Full,
    /// Update only, to catch up without paying for a render.
    Fast,
}

/// Something the scheduler can drive.
pub trait Runnable {
    /// Update and render one frame.
    fn step(&mut self);

    /// Update without rendering.
    fn fast_step(&mut self);

    /// Present the back buffer. Called once per loop iteration whether or not
    /// a step ran.
    fn present(&mut self) {}

    /// Default loop predicate. The object clears this itself (e.g. on a quit event).
    fn is_running(&self) -> bool {
        true
    }
}

/// Millisecond time source used by [`run`].
pub trait Clock {
    /// Monotonic milliseconds since an arbitrary origin.
    fn now_ms(&mut self) -> f64;

    /// Block (or pretend to) for `ms` milliseconds.
    fn wait_ms(&mut self, ms: f64);
}

/// Wall clock backed by [`Instant`].
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn wait_ms(&mut self, ms: f64) {
        std::thread::sleep(Duration::from_secs_f64(ms / 1000.0));
    }
}

/// Fixed-interval accumulator deciding between full and fast steps.
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Milliseconds per frame (`1000 / fps`).
    interval: f64,
    /// Real time not yet consumed by a step.
    accumulator: f64,
}

impl Scheduler {
    pub fn new(fps: f64) -> Self {
        assert!(fps > 0.0, "scheduler fps must be positive, got {}", fps);
        Self {
            interval: 1000.0 / fps,
            accumulator: 0.0,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Add `elapsed_ms` of wall time and decide what to run.
    ///
    /// Once a full interval has accumulated it is consumed. If less than one
    /// more interval remains the loop is on time and a full step runs.
    /// Otherwise the loop is behind: a fast step runs and absorbs the extra
    /// interval it stands in for.
    pub fn advance(&mut self, elapsed_ms: f64) -> Option<StepKind> {
        self.accumulator = (self.accumulator + elapsed_ms.max(0.0))
            .min(self.interval * MAX_BACKLOG_INTERVALS);

        if self.accumulator < self.interval {
            return None;
        }
        self.accumulator -= self.interval;

        if self.accumulator < self.interval {
            Some(StepKind::Full)
        } else {
            self.accumulator -= self.interval;
            log::trace!("scheduler behind, fast step (backlog {:.2}ms)", self.accumulator);
            Some(StepKind::Fast)
        }
    }

    /// One loop iteration: advance, dispatch the chosen step, then present.
    pub fn tick<R: Runnable>(&mut self, elapsed_ms: f64, that: &mut R) -> Option<StepKind> {
        let kind = self.advance(elapsed_ms);
        match kind {
            Some(StepKind::Full) => that.step(),
            Some(StepKind::Fast) => that.fast_step(),
            None => {}
        }
        that.present();
        kind
    }
}

/// Run `that` at `fps` until it reports it is no longer running.
pub fn run<R: Runnable, C: Clock>(that: &mut R, clock: &mut C, fps: f64) {
    run_until(that, clock, fps, |r| r.is_running());
}

/// Run `that` at `fps` until `check(that)` returns false.
pub fn run_until<R, C, F>(that: &mut R, clock: &mut C, fps: f64, mut check: F)
where
    R: Runnable,
    C: Clock,
    F: FnMut(&R) -> bool,
{
    let mut scheduler = Scheduler::new(fps);
    let mut curr = clock.now_ms();

    while check(&*that) {
        let prev = curr;
        curr = clock.now_ms();
        scheduler.tick(curr - prev, that);
        clock.wait_ms(PACING_WAIT_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        full: u32,
        fast: u32,
        presented: u32,
        log: Vec<StepKind>,
    }

    impl Runnable for Counter {
        fn step(&mut self) {
            self.full += 1;
            self.log.push(StepKind::Full);
        }

        fn fast_step(&mut self) {
            self.fast += 1;
            self.log.push(StepKind::Fast);
        }

        fn present(&mut self) {
            self.presented += 1;
        }
    }

    /// Advances by a scripted amount on every wait.
    struct FakeClock {
        now: f64,
        deltas: Vec<f64>,
        waits: usize,
    }

    impl Clock for FakeClock {
        fn now_ms(&mut self) -> f64 {
            self.now
        }

        fn wait_ms(&mut self, _ms: f64) {
            let d = self.deltas[self.waits % self.deltas.len()];
            self.now += d;
            self.waits += 1;
        }
    }

    #[test]
    fn on_time_clock_runs_only_full_steps() {
        let mut sched = Scheduler::new(60.0);
        let interval = sched.interval();
        let mut c = Counter::default();
        for _ in 0..120 {
            assert_eq!(sched.tick(interval, &mut c), Some(StepKind::Full));
        }
        assert_eq!(c.full, 120);
        assert_eq!(c.fast, 0);
    }

    #[test]
    fn jump_causes_exactly_one_fast_step() {
        let mut sched = Scheduler::new(60.0);
        let interval = sched.interval();
        let mut c = Counter::default();

        for _ in 0..5 {
            sched.tick(interval, &mut c);
        }
        assert_eq!(sched.tick(interval * 2.5, &mut c), Some(StepKind::Fast));
        for _ in 0..5 {
            assert_eq!(sched.tick(interval, &mut c), Some(StepKind::Full));
        }
        assert_eq!(c.fast, 1);
        assert_eq!(c.full, 10);
    }

    #[test]
    fn partial_interval_runs_nothing_but_still_presents() {
        let mut sched = Scheduler::new(60.0);
        let mut c = Counter::default();
        assert_eq!(sched.tick(5.0, &mut c), None);
        assert_eq!(c.full + c.fast, 0);
        assert_eq!(c.presented, 1);
    }

    #[test]
    fn backlog_is_capped() {
        let mut sched = Scheduler::new(60.0);
        sched.advance(1_000_000.0);
        assert!(sched.accumulator() <= sched.interval() * MAX_BACKLOG_INTERVALS);
    }

    #[test]
    fn long_stall_drains_through_fast_steps() {
        let mut sched = Scheduler::new(60.0);
        let interval = sched.interval();
        let mut c = Counter::default();
        sched.tick(interval * 6.0, &mut c);
        for _ in 0..10 {
            sched.tick(interval, &mut c);
        }
        // Once caught up, the tail of the log is all full steps.
        assert!(c.fast > 0);
        assert_eq!(c.log.last(), Some(&StepKind::Full));
        assert!(sched.accumulator() < interval);
    }

    #[test]
    fn run_until_stops_on_predicate() {
        let mut c = Counter::default();
        let mut clock = FakeClock {
            now: 0.0,
            deltas: vec![20.0],
            waits: 0,
        };
        run_until(&mut c, &mut clock, 50.0, |c| c.full < 30);
        assert_eq!(c.full, 30);
        assert_eq!(c.fast, 0);
        // The first iteration sees zero elapsed time.
        assert_eq!(c.presented, 31);
    }

    #[test]
    fn run_until_handles_a_hiccup() {
        // 50 fps keeps every timestamp exactly representable.
        let interval = 20.0;
        let mut deltas = vec![interval; 9];
        deltas.push(interval * 2.5);
        let mut c = Counter::default();
        let mut clock = FakeClock {
            now: 0.0,
            deltas,
            waits: 0,
        };
        run_until(&mut c, &mut clock, 50.0, |c| c.log.len() < 15);
        let fast_at: Vec<usize> = c
            .log
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == StepKind::Fast)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(fast_at.len(), 1);
        assert_eq!(c.log[fast_at[0] + 1], StepKind::Full);
    }
}
