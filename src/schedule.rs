/// Fixed-period spawn timers.
///
/// Timers never read the wall clock themselves: the caller feeds them the
/// elapsed time since the last call, so tests can drive them with exact
/// durations.  Firing order within one `advance` call is pipes, enemies,
/// then shots, and every due firing is reported (a long stall yields a
/// burst rather than dropped spawns).
use std::time::Duration;

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnEvent {
    Pipes,
    Enemy,
    Shot,
}

/// A repeating timer with a fixed period.
#[derive(Clone, Debug)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Add `dt` and return how many periods completed.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// The three spawn timers of one game.
#[derive(Clone, Debug)]
pub struct SpawnClock {
    pipes: Interval,
    enemies: Interval,
    shots: Interval,
}

impl SpawnClock {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pipes: Interval::new(config.pipe_interval),
            enemies: Interval::new(config.enemy_interval),
            shots: Interval::new(config.fire_interval),
        }
    }

    /// Advance all timers by `dt` and list the spawns that came due.
    pub fn advance(&mut self, dt: Duration) -> Vec<SpawnEvent> {
        let mut due = Vec::new();
        for (timer, event) in [
            (&mut self.pipes, SpawnEvent::Pipes),
            (&mut self.enemies, SpawnEvent::Enemy),
            (&mut self.shots, SpawnEvent::Shot),
        ] {
            let n = timer.advance(dt);
            due.extend(std::iter::repeat(event).take(n as usize));
        }
        due
    }
}
