use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running { since: Instant, shift: Duration },
    // Stopped, waiting for the session to be named.
    Paused { frozen_secs: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    #[error("timer is already running")]
    AlreadyRunning,
    #[error("timer is not running")]
    NotRunning,
    #[error("timer is not paused")]
    NotPaused,
    #[error("timer is paused until the session is committed")]
    AwaitingCommit,
}

#[derive(Debug)]
pub struct SessionTimer {
    state: TimerState,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, TimerState::Paused { .. })
    }

    pub fn start(&mut self, now: Instant) -> Result<(), TimerError> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running {
                    since: now,
                    shift: Duration::ZERO,
                };
                Ok(())
            }
            TimerState::Running { .. } => Err(TimerError::AlreadyRunning),
            TimerState::Paused { .. } => Err(TimerError::AwaitingCommit),
        }
    }

    pub fn elapsed_at(&self, now: Instant) -> u64 {
        match self.state {
            TimerState::Idle => 0,
            TimerState::Running { since, shift } => {
                (now.saturating_duration_since(since) + shift).as_secs()
            }
            TimerState::Paused { frozen_secs } => frozen_secs,
        }
    }

    pub fn stop(&mut self, now: Instant) -> Result<u64, TimerError> {
        if !self.is_running() {
            return Err(TimerError::NotRunning);
        }
        let frozen_secs = self.elapsed_at(now);
        self.state = TimerState::Paused { frozen_secs };
        Ok(frozen_secs)
    }

    pub fn commit(&mut self) -> Result<u64, TimerError> {
        match self.state {
            TimerState::Paused { frozen_secs } => {
                self.state = TimerState::Idle;
                Ok(frozen_secs)
            }
            _ => Err(TimerError::NotPaused),
        }
    }

    pub fn shift_start(&mut self, delta: Duration) -> Result<(), TimerError> {
        match &mut self.state {
            TimerState::Running { shift, .. } => {
                *shift += delta;
                Ok(())
            }
            _ => Err(TimerError::NotRunning),
        }
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}
