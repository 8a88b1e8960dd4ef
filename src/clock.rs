/// Phase of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPhase {
    Idle,
    Running,
    Finished,
}

/// Read-only view of the clock counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    pub elapsed_secs: u32,
    pub remaining_secs: u32,
    pub running: bool,
}

/// Whole-second countdown driven by external ticks.
///
/// `elapsed_secs + remaining_secs == duration_secs` holds in every phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClock {
    duration_secs: u32,
    elapsed_secs: u32,
    remaining_secs: u32,
    phase: ClockPhase,
}

impl SessionClock {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            elapsed_secs: 0,
            remaining_secs: duration_secs,
            phase: ClockPhase::Idle,
        }
    }

    pub fn phase(&self) -> ClockPhase {
        self.phase
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn is_running(&self) -> bool {
        self.phase == ClockPhase::Running
    }

    pub fn has_started(&self) -> bool {
        self.phase != ClockPhase::Idle
    }

    pub fn has_finished(&self) -> bool {
        self.phase == ClockPhase::Finished
    }

    pub fn state(&self) -> ClockState {
        ClockState {
            elapsed_secs: self.elapsed_secs,
            remaining_secs: self.remaining_secs,
            running: self.is_running(),
        }
    }

    /// Idle -> Running. Returns false in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != ClockPhase::Idle {
            return false;
        }
        self.elapsed_secs = 0;
        self.remaining_secs = self.duration_secs;
        self.phase = if self.duration_secs == 0 {
            ClockPhase::Finished
        } else {
            ClockPhase::Running
        };
        true
    }

    /// Advance one second. Ticks outside Running are ignored and return false.
    pub fn on_tick(&mut self) -> bool {
        if self.phase != ClockPhase::Running {
            return false;
        }
        self.elapsed_secs += 1;
        if self.remaining_secs <= 1 {
            self.remaining_secs = 0;
            self.phase = ClockPhase::Finished;
        } else {
            self.remaining_secs -= 1;
        }
        true
    }

    /// Back to Idle with a full countdown of `duration_secs`.
    pub fn reset(&mut self, duration_secs: u32) {
        *self = Self::new(duration_secs);
    }
}
