/// All game entity types — pure data, no logic.
use crate::config::GameConfig;

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Anything with an axis-aligned bounding box in world units.
pub trait Bounds {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn width(&self) -> f32;
    fn height(&self) -> f32;
}

macro_rules! impl_bounds {
    ($($ty:ty),*) => {
        $(impl Bounds for $ty {
            fn x(&self) -> f32 { self.x }
            fn y(&self) -> f32 { self.y }
            fn width(&self) -> f32 { self.width }
            fn height(&self) -> f32 { self.height }
        })*
    };
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Fixed horizontal position.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity in world units per frame (positive = down).
    pub velocity: f32,
}

// ── Pipes ─────────────────────────────────────────────────────────────────────

/// One half of a pipe pair.  Top and bottom halves are scored separately
/// (0.5 each) so a full pair is worth 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub passed: bool,
}

// ── Enemies & projectiles ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl_bounds!(Player, Pipe, Enemy, Bullet);

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    /// Oldest first; always appended in top/bottom pairs.
    pub pipes: Vec<Pipe>,
    /// Oldest first.
    pub enemies: Vec<Enemy>,
    /// Auto-fired player bullets, oldest first.
    pub bullets: Vec<Bullet>,
    pub score: f32,
    pub status: GameStatus,
    /// Set while the fast-fall key is down so holding it only pushes once.
    pub fast_fall_held: bool,
    pub frame: u64,
}
