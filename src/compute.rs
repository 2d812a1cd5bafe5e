/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.
use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::entities::{Bounds, Bullet, Enemy, GameState, GameStatus, Pipe, Player};
use crate::schedule::SpawnEvent;

/// Points for each pipe half passed (two halves per pair).
const PIPE_HALF_SCORE: f32 = 0.5;
/// Points for each enemy shot down.
const ENEMY_SCORE: f32 = 2.0;

// ── Collision ────────────────────────────────────────────────────────────────

/// Strict axis-aligned overlap.  Boxes that merely touch do not collide.
pub fn overlaps(a: &impl Bounds, b: &impl Bounds) -> bool {
    a.x() < b.x() + b.width()
        && a.x() + a.width() > b.x()
        && a.y() < b.y() + b.height()
        && a.y() + a.height() > b.y()
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: player at spawn, nothing on screen.
pub fn init_state(config: GameConfig) -> GameState {
    let (x, y) = config.player_spawn();
    GameState {
        player: Player {
            x,
            y,
            width: config.player_width,
            height: config.player_height,
            velocity: 0.0,
        },
        pipes: Vec::new(),
        enemies: Vec::new(),
        bullets: Vec::new(),
        score: 0.0,
        status: GameStatus::Playing,
        fast_fall_held: false,
        frame: 0,
        config,
    }
}

/// Reset everything except the configuration and the physical state of the
/// fast-fall key.
pub fn restart(state: &GameState) -> GameState {
    info!(final_score = state.score, "restarting");
    GameState {
        fast_fall_held: state.fast_fall_held,
        ..init_state(state.config)
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Jump.  After a game over this also restarts, keeping the jump velocity.
pub fn jump(state: &GameState) -> GameState {
    let mut next = if state.status == GameStatus::GameOver {
        restart(state)
    } else {
        state.clone()
    };
    next.player.velocity = next.config.jump_velocity;
    next
}

/// Fast-fall key pressed.  Only the first press of a hold accelerates.
pub fn fast_fall_press(state: &GameState) -> GameState {
    if state.fast_fall_held {
        return state.clone();
    }
    GameState {
        player: Player {
            velocity: state.player.velocity + state.config.fast_fall_boost,
            ..state.player.clone()
        },
        fast_fall_held: true,
        ..state.clone()
    }
}

pub fn fast_fall_release(state: &GameState) -> GameState {
    GameState {
        fast_fall_held: false,
        ..state.clone()
    }
}

// ── Spawners (timer-driven) ──────────────────────────────────────────────────

/// Append a top/bottom pipe pair at the right edge with a random gap height.
pub fn place_pipes(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let cfg = &state.config;

    // Top pipe ends somewhere between 1/4 and 3/4 of its own height above 0.
    let top_y = -cfg.pipe_height / 4.0 - rng.gen::<f32>() * (cfg.pipe_height / 2.0);
    let bottom_y = top_y + cfg.pipe_height + cfg.opening_space();
    debug!(top_y, bottom_y, "placing pipes");

    let mut pipes = state.pipes.clone();
    for y in [top_y, bottom_y] {
        pipes.push(Pipe {
            x: cfg.board_width,
            y,
            width: cfg.pipe_width,
            height: cfg.pipe_height,
            passed: false,
        });
    }
    GameState {
        pipes,
        ..state.clone()
    }
}

/// Append one enemy at the right edge, anywhere it fits vertically.
pub fn place_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let cfg = &state.config;
    let y = rng.gen::<f32>() * (cfg.board_height - cfg.enemy_height);
    debug!(y, "placing enemy");

    let mut enemies = state.enemies.clone();
    enemies.push(Enemy {
        x: cfg.board_width,
        y,
        width: cfg.enemy_width,
        height: cfg.enemy_height,
    });
    GameState {
        enemies,
        ..state.clone()
    }
}

/// Fire a bullet from the player's trailing edge, vertically centred.
pub fn auto_shoot(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let cfg = &state.config;
    let p = &state.player;
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        x: p.x + p.width,
        y: p.y + p.height / 2.0 - cfg.bullet_height / 2.0,
        width: cfg.bullet_width,
        height: cfg.bullet_height,
    });
    GameState {
        bullets,
        ..state.clone()
    }
}

/// Route a due timer to its spawner.
pub fn spawn(state: &GameState, event: SpawnEvent, rng: &mut impl Rng) -> GameState {
    match event {
        SpawnEvent::Pipes => place_pipes(state, rng),
        SpawnEvent::Enemy => place_enemy(state, rng),
        SpawnEvent::Shot => auto_shoot(state),
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  Does nothing once the game is over.
pub fn tick(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let cfg = &state.config;
    let frame = state.frame + 1;
    let mut score = state.score;
    let mut crashed = false;

    // ── 1. Gravity (clamped at the top edge only) ────────────────────────────
    let velocity = state.player.velocity + cfg.gravity;
    let player = Player {
        y: (state.player.y + velocity).max(0.0),
        velocity,
        ..state.player.clone()
    };
    if player.y > cfg.board_height {
        debug!(y = player.y, "fell out of the board");
        crashed = true;
    }

    // ── 2. Pipes: scroll, score, collide ─────────────────────────────────────
    let mut pipes: Vec<Pipe> = state
        .pipes
        .iter()
        .map(|p| Pipe {
            x: p.x + cfg.pipe_speed,
            ..p.clone()
        })
        .collect();
    for pipe in &mut pipes {
        if !pipe.passed && player.x > pipe.x + pipe.width {
            pipe.passed = true;
            score += PIPE_HALF_SCORE;
        }
        if overlaps(&player, &*pipe) {
            crashed = true;
        }
    }

    // Spawn order is scroll order, so only the head can be off-screen.
    let gone = pipes.iter().take_while(|p| p.x + p.width < 0.0).count();
    pipes.drain(..gone);

    // ── 3. Enemies: scroll, drop off-screen, collide with player ─────────────
    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| Enemy {
            x: e.x + cfg.enemy_speed,
            ..e.clone()
        })
        .collect();
    let gone = enemies.iter().take_while(|e| e.x + e.width < 0.0).count();
    enemies.drain(..gone);

    if enemies.iter().any(|e| overlaps(&player, e)) {
        crashed = true;
    }

    // ── 4. Bullets: move, hit at most one enemy each ─────────────────────────
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .map(|b| Bullet {
            x: b.x + cfg.bullet_speed,
            ..b.clone()
        })
        .collect();

    let mut killed = vec![false; enemies.len()];
    let mut spent = vec![false; bullets.len()];
    for (bi, bullet) in bullets.iter().enumerate() {
        let hit = enemies
            .iter()
            .enumerate()
            .position(|(ei, e)| !killed[ei] && overlaps(bullet, e));
        match hit {
            Some(ei) => {
                killed[ei] = true;
                spent[bi] = true;
                score += ENEMY_SCORE;
                debug!(enemy = ei, bullet = bi, "enemy destroyed");
            }
            None if bullet.x > cfg.board_width => spent[bi] = true,
            None => {}
        }
    }

    let enemies: Vec<Enemy> = enemies
        .into_iter()
        .zip(killed)
        .filter(|(_, dead)| !dead)
        .map(|(e, _)| e)
        .collect();
    let bullets: Vec<Bullet> = bullets
        .into_iter()
        .zip(spent)
        .filter(|(_, used)| !used)
        .map(|(b, _)| b)
        .collect();

    // ── 5. Status ────────────────────────────────────────────────────────────
    let status = if crashed {
        info!(score, frame, "game over");
        GameStatus::GameOver
    } else {
        GameStatus::Playing
    };
    trace!(
        frame,
        pipes = pipes.len(),
        enemies = enemies.len(),
        bullets = bullets.len(),
        "tick"
    );

    GameState {
        player,
        pipes,
        enemies,
        bullets,
        score,
        status,
        frame,
        ..state.clone()
    }
}
