use std::time::Duration;

use flappy_shooter::config::GameConfig;
use flappy_shooter::schedule::{Interval, SpawnClock, SpawnEvent};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn interval_fires_on_period() {
    let mut t = Interval::new(ms(300));
    assert_eq!(t.advance(ms(299)), 0);
    assert_eq!(t.advance(ms(1)), 1);
    assert_eq!(t.advance(ms(299)), 0);
    assert_eq!(t.advance(ms(1)), 1);
}

#[test]
fn interval_catches_up_after_stall() {
    let mut t = Interval::new(ms(300));
    assert_eq!(t.advance(ms(1000)), 3);
    // 100 ms carried over
    assert_eq!(t.advance(ms(200)), 1);
}

#[test]
fn zero_period_never_fires() {
    let mut t = Interval::new(Duration::ZERO);
    assert_eq!(t.advance(ms(1000)), 0);
}

#[test]
fn clock_uses_config_periods() {
    let mut clock = SpawnClock::new(&GameConfig::default());
    // 3 s: 2 pipe pairs, 1 enemy, 10 shots
    let events = clock.advance(ms(3000));
    let count = |kind: SpawnEvent| events.iter().filter(|&&e| e == kind).count();
    assert_eq!(count(SpawnEvent::Pipes), 2);
    assert_eq!(count(SpawnEvent::Enemy), 1);
    assert_eq!(count(SpawnEvent::Shot), 10);
}

#[test]
fn clock_independent_of_frame_cadence() {
    let config = GameConfig::default();
    let mut coarse = SpawnClock::new(&config);
    let mut fine = SpawnClock::new(&config);

    let coarse_events: Vec<_> = (0..30).flat_map(|_| coarse.advance(ms(100))).collect();
    let fine_events: Vec<_> = (0..3000).flat_map(|_| fine.advance(ms(1))).collect();

    let count = |events: &[SpawnEvent], kind: SpawnEvent| events.iter().filter(|&&e| e == kind).count();
    for kind in [SpawnEvent::Pipes, SpawnEvent::Enemy, SpawnEvent::Shot] {
        assert_eq!(count(&coarse_events, kind), count(&fine_events, kind));
    }
}

#[test]
fn clock_orders_events_pipes_enemy_shot() {
    let config = GameConfig {
        pipe_interval: ms(100),
        enemy_interval: ms(100),
        fire_interval: ms(100),
        ..GameConfig::default()
    };
    let mut clock = SpawnClock::new(&config);
    assert_eq!(
        clock.advance(ms(100)),
        vec![SpawnEvent::Pipes, SpawnEvent::Enemy, SpawnEvent::Shot]
    );
}
