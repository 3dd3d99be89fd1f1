//! Display power state machine
//!
//! Owns the playback-to-power cascade `Active -> PendingIdle -> PendingOff
//! -> Off`, with a grace period before the paused visual appears and a
//! second, longer grace period before the backlight is cut. The machine
//! performs no side effects itself: every decision is emitted as a
//! [`PowerCommand`] for the caller to dispatch, which keeps the transition
//! logic testable with no real display or switch behind it.
//!
//! Timer handling: each armed timer carries the machine's current epoch.
//! Every transition that arms, cancels, or consumes a timer bumps the
//! epoch, so a fire that lost the race against cancellation arrives with a
//! stale epoch and is ignored. Cancellation is symmetric: leaving either
//! pending state cancels whichever timer is armed.

use std::time::Duration;

use crate::model::PlaybackState;

/// Power-facing state of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPowerState {
    /// Display fully on, normal rendering
    Active,
    /// Playback paused or stopped, idle timer running
    PendingIdle,
    /// Paused visual shown, power-off timer running
    PendingOff,
    /// Backlight powered off
    Off,
}

/// The two timers the machine arms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires after the pause grace period of continued pause/stop
    Idle,
    /// Fires after the power-off grace period in the paused-visual state
    PowerOff,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowerCommand {
    /// Arm a single-shot timer; the fire must echo `epoch` back
    ArmTimer {
        kind: TimerKind,
        epoch: u64,
        after: Duration,
    },
    /// Cancel the outstanding timer, if any
    CancelTimer,
    /// Show or hide the paused overlay
    ShowPausedVisual(bool),
    /// Drive the backlight switch
    SetPower(bool),
}

/// Grace periods for the two cascade stages
#[derive(Debug, Clone, Copy)]
pub struct PowerTimeouts {
    /// Continued pause/stop before the paused visual appears
    pub pause_timeout: Duration,
    /// Time in the paused-visual state before the backlight is cut
    pub display_off_timeout: Duration,
}

impl Default for PowerTimeouts {
    fn default() -> Self {
        Self {
            pause_timeout: Duration::from_secs(30),
            display_off_timeout: Duration::from_secs(60),
        }
    }
}

/// The display power state machine
///
/// Driven only by playback-state inputs and fires of the timers it itself
/// armed. Never sees zone or track data.
#[derive(Debug)]
pub struct PowerStateMachine {
    state: DisplayPowerState,
    timeouts: PowerTimeouts,
    /// Bumped on every arm/cancel/consume; stale fires are no-ops
    epoch: u64,
}

impl PowerStateMachine {
    /// Create a machine in the `Active` state
    ///
    /// The pre-first-event state is treated as `Active`: a first snapshot
    /// that is already paused arms the idle timer exactly as a live
    /// transition would.
    pub fn new(timeouts: PowerTimeouts) -> Self {
        Self {
            state: DisplayPowerState::Active,
            timeouts,
            epoch: 0,
        }
    }

    pub fn state(&self) -> DisplayPowerState {
        self.state
    }

    /// Epoch the next armed timer will carry; exposed for tests
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Feed a playback-state input, returning the commands to dispatch
    pub fn on_playback(&mut self, playback: PlaybackState) -> Vec<PowerCommand> {
        use DisplayPowerState::*;
        use PlaybackState::*;

        // Track-change gaps are neither playing nor paused; they must not
        // disturb a running cascade.
        if playback == Loading {
            return Vec::new();
        }

        let commands = match (self.state, playback) {
            (Active, Playing) => Vec::new(),
            (Active, Paused | Stopped) => {
                self.state = PendingIdle;
                vec![self.arm(TimerKind::Idle, self.timeouts.pause_timeout)]
            }
            (PendingIdle, Playing) => {
                self.state = Active;
                self.invalidate_timers();
                vec![PowerCommand::CancelTimer]
            }
            (PendingIdle, Paused | Stopped) => Vec::new(),
            (PendingOff, Playing) => {
                self.state = Active;
                self.invalidate_timers();
                vec![
                    PowerCommand::CancelTimer,
                    PowerCommand::ShowPausedVisual(false),
                ]
            }
            (PendingOff, Paused | Stopped) => Vec::new(),
            (Off, Playing) => {
                self.state = Active;
                vec![
                    PowerCommand::ShowPausedVisual(false),
                    PowerCommand::SetPower(true),
                ]
            }
            (Off, Paused | Stopped) => Vec::new(),
            (_, Loading) => unreachable!("Loading handled above"),
        };

        if !commands.is_empty() {
            tracing::debug!(state = ?self.state, input = ?playback, "power transition");
        }

        commands
    }

    /// Feed a timer fire, returning the commands to dispatch
    ///
    /// Fires carrying a stale epoch, or arriving in a state that is not
    /// waiting on that timer kind, are no-ops.
    pub fn on_timer_fired(&mut self, kind: TimerKind, epoch: u64) -> Vec<PowerCommand> {
        use DisplayPowerState::*;

        if epoch != self.epoch {
            tracing::debug!(?kind, epoch, current = self.epoch, "stale timer fire ignored");
            return Vec::new();
        }

        match (self.state, kind) {
            (PendingIdle, TimerKind::Idle) => {
                self.state = PendingOff;
                tracing::info!("pause grace period elapsed, showing paused visual");
                vec![
                    PowerCommand::ShowPausedVisual(true),
                    self.arm(TimerKind::PowerOff, self.timeouts.display_off_timeout),
                ]
            }
            (PendingOff, TimerKind::PowerOff) => {
                self.state = Off;
                self.invalidate_timers();
                tracing::info!("power-off grace period elapsed, cutting backlight");
                vec![PowerCommand::SetPower(false)]
            }
            _ => {
                tracing::debug!(?kind, state = ?self.state, "unexpected timer fire ignored");
                Vec::new()
            }
        }
    }

    /// Arm a timer under a fresh epoch
    fn arm(&mut self, kind: TimerKind, after: Duration) -> PowerCommand {
        self.epoch += 1;
        PowerCommand::ArmTimer {
            kind,
            epoch: self.epoch,
            after,
        }
    }

    /// Invalidate any in-flight fire for a previously armed timer
    fn invalidate_timers(&mut self) {
        self.epoch += 1;
    }
}
