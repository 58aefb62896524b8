use std::time::{Duration, Instant};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerSignal {
    /// Remaining seconds changed; redraw the clock.
    Display(u32),
    /// Countdown hit zero. Emitted once per countdown.
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerState {
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub phase: TimerPhase,
}

impl TimerState {
    fn idle() -> Self {
        Self {
            total_seconds: 0,
            remaining_seconds: 0,
            phase: TimerPhase::Idle,
        }
    }

    pub fn running(&self) -> bool {
        self.phase == TimerPhase::Running
    }
}

/// The recurring one-second trigger. Replacing or dropping it is the only
/// way a countdown stops receiving ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TickSchedule {
    next_due: Instant,
}

#[derive(Clone, Debug)]
pub struct Timer {
    state: TimerState,
    schedule: Option<TickSchedule>,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            state: TimerState::idle(),
            schedule: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    pub fn remaining(&self) -> u32 {
        self.state.remaining_seconds
    }

    pub fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn start(&mut self, seconds: u32) -> TimerSignal {
        self.start_at(seconds, Instant::now())
    }

    /// Starts a fresh countdown from any state. The previous schedule is
    /// dropped before the new one is armed.
    pub fn start_at(&mut self, seconds: u32, now: Instant) -> TimerSignal {
        self.schedule = None;
        self.state = TimerState {
            total_seconds: seconds,
            remaining_seconds: seconds,
            phase: TimerPhase::Running,
        };
        if seconds == 0 {
            self.state.phase = TimerPhase::Expired;
            return TimerSignal::Expired;
        }
        self.schedule = Some(TickSchedule {
            next_due: now + TICK_INTERVAL,
        });
        TimerSignal::Display(seconds)
    }

    /// One second elapsed. Ignored unless running.
    pub fn tick(&mut self) -> Option<TimerSignal> {
        if self.state.phase != TimerPhase::Running {
            return None;
        }
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.state.phase = TimerPhase::Expired;
            self.schedule = None;
            Some(TimerSignal::Expired)
        } else {
            Some(TimerSignal::Display(self.state.remaining_seconds))
        }
    }

    /// Fires every tick of the live schedule that has come due by `now`.
    /// The schedule keeps its cadence while paused; those ticks are dropped.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerSignal> {
        let mut signals = Vec::new();
        loop {
            let Some(schedule) = self.schedule.as_mut() else {
                break;
            };
            if schedule.next_due > now {
                break;
            }
            schedule.next_due += TICK_INTERVAL;
            if let Some(signal) = self.tick() {
                signals.push(signal);
            }
        }
        signals
    }

    pub fn pause(&mut self) -> bool {
        if self.state.phase != TimerPhase::Running {
            return false;
        }
        self.state.phase = TimerPhase::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.phase != TimerPhase::Paused {
            return false;
        }
        self.state.phase = TimerPhase::Running;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.pause() || self.resume()
    }

    pub fn reset(&mut self) {
        self.schedule = None;
        self.state = TimerState::idle();
    }

    /// Clock text for the view; empty while idle.
    pub fn display(&self) -> String {
        match self.state.phase {
            TimerPhase::Idle => String::new(),
            _ => format_clock(self.state.remaining_seconds),
        }
    }
}

/// `M:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timer_is_idle_with_blank_display() {
        let timer = Timer::new();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.display(), "");
        assert!(!timer.is_scheduled());
    }

    #[test]
    fn five_ticks_count_down_and_expire_on_the_last() {
        let mut timer = Timer::new();
        assert_eq!(timer.start(5), TimerSignal::Display(5));

        let mut remaining = Vec::new();
        let mut signals = Vec::new();
        for _ in 0..5 {
            signals.push(timer.tick().unwrap());
            remaining.push(timer.remaining());
        }

        assert_eq!(remaining, vec![4, 3, 2, 1, 0]);
        assert_eq!(signals[3], TimerSignal::Display(1));
        assert_eq!(signals[4], TimerSignal::Expired);
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert!(!timer.state().running());
    }

    #[test]
    fn expiry_is_signalled_once() {
        let mut timer = Timer::new();
        timer.start(1);
        assert_eq!(timer.tick(), Some(TimerSignal::Expired));
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn zero_duration_expires_immediately() {
        let mut timer = Timer::new();
        assert_eq!(timer.start(0), TimerSignal::Expired);
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert!(!timer.is_scheduled());
        assert_eq!(timer.display(), "0:00");
    }

    #[test]
    fn paused_timer_ignores_ticks() {
        let mut timer = Timer::new();
        timer.start(10);
        timer.tick();
        assert!(timer.pause());
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 9);

        assert!(timer.resume());
        assert_eq!(timer.tick(), Some(TimerSignal::Display(8)));
    }

    #[test]
    fn pause_and_resume_are_noops_in_wrong_state() {
        let mut timer = Timer::new();
        assert!(!timer.pause());
        assert!(!timer.resume());

        timer.start(3);
        assert!(!timer.resume());
        assert_eq!(timer.phase(), TimerPhase::Running);
    }

    #[test]
    fn toggle_pause_flips_between_running_and_paused() {
        let mut timer = Timer::new();
        timer.start(3);
        assert!(timer.toggle_pause());
        assert_eq!(timer.phase(), TimerPhase::Paused);
        assert!(timer.toggle_pause());
        assert_eq!(timer.phase(), TimerPhase::Running);
    }

    #[test]
    fn reset_cancels_schedule_from_any_state() {
        let mut timer = Timer::new();
        timer.start(30);
        timer.pause();
        timer.reset();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert!(!timer.is_scheduled());
        assert_eq!(timer.display(), "");
    }

    #[test]
    fn poll_fires_each_due_second() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.start_at(5, t0);

        assert!(timer.poll(t0 + Duration::from_millis(500)).is_empty());
        assert_eq!(
            timer.poll(t0 + Duration::from_millis(1000)),
            vec![TimerSignal::Display(4)]
        );
        assert_eq!(
            timer.poll(t0 + Duration::from_millis(3100)),
            vec![TimerSignal::Display(3), TimerSignal::Display(2)]
        );
    }

    #[test]
    fn poll_stops_after_expiry() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.start_at(2, t0);

        let signals = timer.poll(t0 + Duration::from_secs(10));
        assert_eq!(signals, vec![TimerSignal::Display(1), TimerSignal::Expired]);
        assert!(timer.poll(t0 + Duration::from_secs(20)).is_empty());
    }

    #[test]
    fn restart_replaces_old_schedule() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.start_at(5, t0);
        timer.start_at(5, t0 + Duration::from_millis(900));

        // The first schedule would have fired at t0+1s; only the new one counts.
        assert!(timer.poll(t0 + Duration::from_millis(1100)).is_empty());
        assert_eq!(
            timer.poll(t0 + Duration::from_millis(1900)),
            vec![TimerSignal::Display(4)]
        );
    }

    #[test]
    fn ticks_due_while_paused_are_dropped() {
        let t0 = Instant::now();
        let mut timer = Timer::new();
        timer.start_at(10, t0);
        timer.pause();

        assert!(timer.poll(t0 + Duration::from_secs(3)).is_empty());
        assert_eq!(timer.remaining(), 10);

        timer.resume();
        assert_eq!(
            timer.poll(t0 + Duration::from_secs(4)),
            vec![TimerSignal::Display(9)]
        );
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(125), "2:05");
    }
}
