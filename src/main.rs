use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flappy_shooter::compute::{fast_fall_press, fast_fall_release, init_state, jump, spawn, tick};
use flappy_shooter::config::GameConfig;
use flappy_shooter::display::{self, Viewport};
use flappy_shooter::input::{translate, Action, HoldTracker};
use flappy_shooter::schedule::SpawnClock;

#[derive(Parser, Debug)]
#[command(name = "flappy-shooter")]
#[command(about = "Dodge the pipes, shoot the enemies, in your terminal")]
struct Args {
    /// Update loop rate (frames per second)
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for pipe gaps and enemy placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between pipe pairs
    #[arg(long, default_value_t = 1500)]
    pipe_interval_ms: u64,

    /// Milliseconds between enemies
    #[arg(long, default_value_t = 3000)]
    enemy_interval_ms: u64,

    /// Milliseconds between automatic shots
    #[arg(long, default_value_t = 300)]
    fire_interval_ms: u64,

    /// Write logs to this file; level comes from RUST_LOG (default: info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            pipe_interval: Duration::from_millis(self.pipe_interval_ms),
            enemy_interval: Duration::from_millis(self.enemy_interval_ms),
            fire_interval: Duration::from_millis(self.fire_interval_ms),
            ..GameConfig::default()
        }
    }
}

/// Stderr shares the terminal with the game, so logs only go to a file.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Everything that touches the game state happens on this thread, in a fixed
/// order per frame: queued key events, then due spawn timers, then the
/// physics tick, then rendering.  The loop keeps running after a game over so
/// the jump key can restart.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    rng: &mut StdRng,
    fps: u32,
    release_events: bool,
) -> anyhow::Result<()> {
    let frame_len = Duration::from_secs_f64(1.0 / f64::from(fps));
    let mut state = init_state(config);
    let mut clock = SpawnClock::new(&config);
    let mut hold = HoldTracker::default();

    let (cols, rows) = terminal::size().context("failed to read terminal size")?;
    let mut view = Viewport::fit(config.board_width, config.board_height, cols, rows);

    let started = Instant::now();
    let mut last = started;

    loop {
        let frame_start = Instant::now();
        let now = frame_start - started;

        // ── Drain pending input (non-blocking) ────────────────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => match translate(&key) {
                    Some(Action::Quit) => return Ok(()),
                    Some(Action::Jump) => state = jump(&state),
                    Some(Action::FastFallPress) => {
                        hold.seen(now);
                        state = fast_fall_press(&state);
                    }
                    Some(Action::FastFallRelease) => {
                        hold.clear();
                        state = fast_fall_release(&state);
                    }
                    None => {}
                },
                Event::Resize(cols, rows) => {
                    view = Viewport::fit(config.board_width, config.board_height, cols, rows);
                }
                _ => {}
            }
        }
        if !release_events && hold.expire(now) {
            state = fast_fall_release(&state);
        }

        // ── Timers, physics, draw ─────────────────────────────────────────────
        for event in clock.advance(frame_start - last) {
            state = spawn(&state, event, rng);
        }
        last = frame_start;

        state = tick(&state);
        display::render(out, &state, &view).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    ensure!(args.fps > 0, "--fps must be at least 1");
    let config = args.game_config();
    config.validate().context("invalid game configuration")?;

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?args.seed, fps = args.fps, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events let fast-fall re-arm exactly on release; terminals
    // without the protocol fall back to the hold-window heuristic.
    let release_events = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    // Blocking reads live on their own thread; the loop only drains the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &rx, config, &mut rng, args.fps, release_events);

    // Always restore the terminal
    if release_events {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(ok = result.is_ok(), "exiting");
    result
}
