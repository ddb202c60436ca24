//! Retro TV state machine.
//!
//! The machine never sleeps. Each command returns a [`Transition`] telling
//! the host whether to drop its pending timer and which timer to start next.
//! Every state change bumps a generation counter; a timer only applies when
//! its token still equals the current generation, so a late timer from a
//! superseded command is ignored.

use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub power_on_static: Duration,
    pub channel_static: Duration,
    /// Fallback for hosts that cannot observe the end of playback.
    pub content_end: Option<Duration>,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            power_on_static: Duration::from_millis(2000),
            channel_static: Duration::from_millis(1000),
            content_end: Some(Duration::from_secs(180)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticReason {
    PowerOn,
    ChannelChange,
    ContentEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastState {
    Off,
    StaticTransition { target: usize, reason: StaticReason },
    Playing(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// What the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Off,
    Noise,
    Channel(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Static,
    ContentEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub token: u64,
    pub delay: Duration,
    pub kind: TimerKind,
}

/// Result of a command.
///
/// `changed == true` means any pending timer is now stale and should be
/// cancelled. `schedule` is the single timer to start in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    pub changed: bool,
    pub schedule: Option<Timer>,
}

impl Transition {
    fn ignored() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct Broadcast {
    state: BroadcastState,
    channels: usize,
    timings: Timings,
    generation: u64,
    pending: Option<TimerKind>,
}

impl Broadcast {
    pub fn new(channels: usize, timings: Timings) -> Self {
        Self {
            state: BroadcastState::Off,
            channels,
            timings,
            generation: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> BroadcastState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn is_on(&self) -> bool {
        self.state != BroadcastState::Off
    }

    pub fn power_on(&mut self) -> Transition {
        if self.is_on() {
            return Transition::ignored();
        }
        let state = BroadcastState::StaticTransition {
            target: 0,
            reason: StaticReason::PowerOn,
        };
        if self.channels == 0 {
            // Nothing to tune to: the set stays on noise.
            return self.enter(state, None);
        }
        self.enter(state, Some((TimerKind::Static, self.timings.power_on_static)))
    }

    pub fn power_off(&mut self) -> Transition {
        if !self.is_on() {
            return Transition::ignored();
        }
        self.enter(BroadcastState::Off, None)
    }

    pub fn toggle_power(&mut self) -> Transition {
        if self.is_on() {
            self.power_off()
        } else {
            self.power_on()
        }
    }

    /// Step one channel. During static the step is taken from the pending
    /// target and the static period restarts.
    pub fn channel(&mut self, dir: Direction) -> Transition {
        let from = match self.state {
            BroadcastState::Off => return Transition::ignored(),
            _ if self.channels == 0 => return Transition::ignored(),
            BroadcastState::Playing(i) => i,
            BroadcastState::StaticTransition { target, .. } => target,
        };
        let target = self.step(from, dir);
        self.static_to(target, StaticReason::ChannelChange)
    }

    /// Jump to channel `n` (zero based, taken modulo the playlist length).
    pub fn tune(&mut self, n: usize) -> Transition {
        if !self.is_on() || self.channels == 0 {
            return Transition::ignored();
        }
        self.static_to(n % self.channels, StaticReason::ChannelChange)
    }

    /// The current content finished; advance to the next channel.
    pub fn content_ended(&mut self) -> Transition {
        match self.state {
            BroadcastState::Playing(i) if self.channels > 0 => {
                let target = self.step(i, Direction::Next);
                self.static_to(target, StaticReason::ContentEnd)
            }
            _ => Transition::ignored(),
        }
    }

    /// A timer fired. Anything but the current token is ignored.
    pub fn timeout(&mut self, token: u64) -> Transition {
        if token != self.generation {
            trace!(
                "stale broadcast timer {} (current {})",
                token,
                self.generation
            );
            return Transition::ignored();
        }
        match (self.state, self.pending) {
            (BroadcastState::StaticTransition { target, .. }, Some(TimerKind::Static)) => {
                let schedule = self
                    .timings
                    .content_end
                    .map(|delay| (TimerKind::ContentEnd, delay));
                self.enter(BroadcastState::Playing(target), schedule)
            }
            (BroadcastState::Playing(_), Some(TimerKind::ContentEnd)) => self.content_ended(),
            _ => Transition::ignored(),
        }
    }

    pub fn screen(&self) -> Screen {
        match self.state {
            BroadcastState::Off => Screen::Off,
            BroadcastState::StaticTransition { .. } => Screen::Noise,
            BroadcastState::Playing(i) => Screen::Channel(i),
        }
    }

    /// Two-digit, one-based channel number for the front panel.
    pub fn channel_label(&self) -> String {
        match self.state {
            BroadcastState::Off => String::new(),
            BroadcastState::StaticTransition { .. } => "--".to_string(),
            BroadcastState::Playing(i) => format!("{:02}", i + 1),
        }
    }

    fn step(&self, from: usize, dir: Direction) -> usize {
        match dir {
            Direction::Next => (from + 1) % self.channels,
            Direction::Prev => (from + self.channels - 1) % self.channels,
        }
    }

    fn static_to(&mut self, target: usize, reason: StaticReason) -> Transition {
        self.enter(
            BroadcastState::StaticTransition { target, reason },
            Some((TimerKind::Static, self.timings.channel_static)),
        )
    }

    fn enter(
        &mut self,
        state: BroadcastState,
        schedule: Option<(TimerKind, Duration)>,
    ) -> Transition {
        debug!("broadcast {:?} -> {:?}", self.state, state);
        self.state = state;
        self.generation += 1;
        self.pending = schedule.map(|(kind, _)| kind);
        Transition {
            changed: true,
            schedule: schedule.map(|(kind, delay)| Timer {
                token: self.generation,
                delay,
                kind,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tv(channels: usize) -> Broadcast {
        Broadcast::new(channels, Timings::default())
    }

    /// Fire whatever the transition scheduled.
    fn fire(tv: &mut Broadcast, t: Transition) -> Transition {
        let timer = t.schedule.expect("transition scheduled nothing");
        tv.timeout(timer.token)
    }

    #[test]
    fn test_power_on_goes_through_static() {
        let mut tv = tv(3);
        let t = tv.power_on();
        assert_eq!(tv.screen(), Screen::Noise);
        assert_eq!(tv.channel_label(), "--");
        let timer = t.schedule.unwrap();
        assert_eq!(timer.delay, Duration::from_millis(2000));
        assert_eq!(timer.kind, TimerKind::Static);

        let t = tv.timeout(timer.token);
        assert_eq!(tv.state(), BroadcastState::Playing(0));
        assert_eq!(tv.channel_label(), "01");
        assert_eq!(t.schedule.unwrap().kind, TimerKind::ContentEnd);
    }

    #[test]
    fn test_power_on_when_on_is_ignored() {
        let mut tv = tv(3);
        let first = tv.power_on();
        let again = tv.power_on();
        assert!(!again.changed);
        fire(&mut tv, first);
        assert_eq!(tv.state(), BroadcastState::Playing(0));
    }

    #[test]
    fn test_power_off_invalidates_pending_timer() {
        let mut tv = tv(3);
        let t = tv.power_on();
        let off = tv.power_off();
        assert!(off.changed);
        assert!(off.schedule.is_none());
        fire(&mut tv, t);
        assert_eq!(tv.state(), BroadcastState::Off);
        assert_eq!(tv.channel_label(), "");
    }

    #[test]
    fn test_channel_during_static_is_relative_to_target() {
        let mut tv = tv(3);
        let t = tv.power_on();
        fire(&mut tv, t);
        let first = tv.channel(Direction::Next);
        let second = tv.channel(Direction::Next);
        assert_eq!(
            tv.state(),
            BroadcastState::StaticTransition {
                target: 2,
                reason: StaticReason::ChannelChange
            }
        );
        // The first static timer is stale now.
        assert!(!fire(&mut tv, first).changed);
        fire(&mut tv, second);
        assert_eq!(tv.state(), BroadcastState::Playing(2));
    }

    #[test]
    fn test_channel_when_off_is_ignored() {
        let mut tv = tv(3);
        assert!(!tv.channel(Direction::Next).changed);
        assert!(!tv.tune(1).changed);
        assert!(!tv.content_ended().changed);
        assert_eq!(tv.state(), BroadcastState::Off);
    }

    #[test]
    fn test_tune_wraps() {
        let mut tv = tv(3);
        let t = tv.power_on();
        fire(&mut tv, t);
        let t = tv.tune(4);
        fire(&mut tv, t);
        assert_eq!(tv.state(), BroadcastState::Playing(1));
    }

    #[test]
    fn test_content_end_timer_advances() {
        let mut tv = tv(2);
        let t = tv.power_on();
        let playing = fire(&mut tv, t);
        let t = fire(&mut tv, playing);
        assert_eq!(
            tv.state(),
            BroadcastState::StaticTransition {
                target: 1,
                reason: StaticReason::ContentEnd
            }
        );
        assert_eq!(t.schedule.unwrap().delay, Duration::from_millis(1000));
        fire(&mut tv, t);
        assert_eq!(tv.state(), BroadcastState::Playing(1));
    }

    #[test]
    fn test_disabled_content_end_schedules_nothing() {
        let timings = Timings {
            content_end: None,
            ..Timings::default()
        };
        let mut tv = Broadcast::new(3, timings);
        let t = tv.power_on();
        let playing = fire(&mut tv, t);
        assert!(playing.changed);
        assert!(playing.schedule.is_none());
    }

    #[test]
    fn test_empty_playlist_stays_on_noise() {
        let mut tv = tv(0);
        let t = tv.power_on();
        assert!(t.changed);
        assert!(t.schedule.is_none());
        assert_eq!(tv.screen(), Screen::Noise);
        assert!(!tv.channel(Direction::Prev).changed);
        assert!(tv.toggle_power().changed);
        assert_eq!(tv.screen(), Screen::Off);
    }

    #[test]
    fn test_generation_increases_on_every_change() {
        let mut tv = tv(3);
        let g0 = tv.generation();
        tv.power_on();
        tv.channel(Direction::Prev);
        tv.power_off();
        assert_eq!(tv.generation(), g0 + 3);
    }
}
