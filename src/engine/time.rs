use std::time::Instant;

/// Measures wall-clock delta time between frames. Used by the demo binary's
/// real-time loop; the simulation itself only ever sees the `dt` values the
/// host feeds it.
pub struct FrameTimer {
    last: Instant,
    pub dt: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt: 0.0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
    }
}

// ---------------------------------------------------------------------------
// Deferred one-shot timers
// ---------------------------------------------------------------------------

/// Opaque handle to an armed timer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimerHandle(u64);

struct Timer {
    handle: TimerHandle,
    remaining: f32,
}

/// Cancellable one-shot timers driven by the simulation clock.
///
/// `arm` schedules, `tick` advances every armed timer, and `poll` observes a
/// single timer: it returns `true` exactly once, on the first poll after the
/// timer's duration has fully elapsed, and `false` forever after. `cancel` is
/// a no-op for handles that are unknown, already fired, or already cancelled
/// — those races are expected and deliberately silent.
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
        }
    }

    /// Arm a one-shot timer for `duration` seconds of simulated time.
    pub fn arm(&mut self, duration: f32) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            handle,
            remaining: duration,
        });
        handle
    }

    /// Disarm `handle` if it is still pending. No-op otherwise.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|timer| timer.handle != handle);
    }

    /// Advance all armed timers by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        for timer in &mut self.timers {
            timer.remaining -= dt;
        }
    }

    /// Consume `handle`'s expiry: `true` exactly once after it has elapsed.
    pub fn poll(&mut self, handle: TimerHandle) -> bool {
        let fired = self
            .timers
            .iter()
            .any(|timer| timer.handle == handle && timer.remaining <= 0.0);
        if fired {
            self.cancel(handle);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once_after_elapsed() {
        let mut timers = TimerQueue::new();
        let handle = timers.arm(0.5);

        timers.tick(0.49);
        assert!(!timers.poll(handle));
        timers.tick(0.01);
        assert!(timers.poll(handle));
        // Already consumed.
        timers.tick(1.0);
        assert!(!timers.poll(handle));
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut timers = TimerQueue::new();
        let handle = timers.arm(0.5);
        timers.cancel(handle);
        timers.tick(1.0);
        assert!(!timers.poll(handle));
    }

    #[test]
    fn cancel_after_fire_is_a_no_op() {
        let mut timers = TimerQueue::new();
        let handle = timers.arm(0.1);
        timers.tick(0.2);
        assert!(timers.poll(handle));
        timers.cancel(handle);
        timers.cancel(handle);
    }

    #[test]
    fn timers_are_independent() {
        let mut timers = TimerQueue::new();
        let a = timers.arm(0.1);
        let b = timers.arm(0.3);
        timers.tick(0.2);
        assert!(timers.poll(a));
        assert!(!timers.poll(b));
        timers.tick(0.2);
        assert!(timers.poll(b));
    }

    #[test]
    fn handles_are_never_reused() {
        let mut timers = TimerQueue::new();
        let a = timers.arm(0.1);
        timers.cancel(a);
        let b = timers.arm(0.1);
        assert_ne!(a, b);
        // Polling the stale handle must not observe the new timer.
        timers.tick(0.2);
        assert!(!timers.poll(a));
        assert!(timers.poll(b));
    }
}
