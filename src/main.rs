mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_shooter::audio::AudioCmd;
use space_shooter::compute::Game;
use space_shooter::config::GameConfig;
use space_shooter::entities::InputSnapshot;
use space_shooter::snapshot::build_snapshot;

/// Terminal space shooter: four waves of alien ships ending in a boss fight.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI file with game tuning.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Write log output to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Write the default configuration to `--config` and exit.
    #[arg(long)]
    write_default_config: bool,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Collapse the live keys into the simulation's input record.
fn read_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputSnapshot {
    InputSnapshot {
        move_left: any_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        ),
        move_right: any_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        ),
        fire: is_held(key_frame, &KeyCode::Char(' '), frame),
        reload: any_held(key_frame, &[KeyCode::Char('r'), KeyCode::Char('R')], frame),
        confirm: is_held(key_frame, &KeyCode::Enter, frame),
    }
}

// ── Audio sink ────────────────────────────────────────────────────────────────

/// The terminal has no mixer; directives are only traced.
fn forward_audio(cmds: Vec<AudioCmd>) {
    for cmd in cmds {
        match cmd {
            AudioCmd::VolumeMusic { .. } => {}
            other => debug!("[audio] {:?}", other),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the user quits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame the keys that are still "fresh" become
/// one [`InputSnapshot`], so Space + A/D can be held at the same time.
/// Keyboard-enhancement terminals also send `Release`, which drops the key
/// immediately.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let frame_budget = Duration::from_secs_f64(1.0 / game.config().target_fps.max(1) as f64);
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {}
                    }
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = read_input(&key_frame, frame);
        let dt = last.elapsed().as_secs_f32();
        last = Instant::now();

        game.tick(&input, dt, rng);
        forward_audio(game.drain_audio());

        display::render(out, &build_snapshot(game))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(log_file: Option<&PathBuf>) -> std::io::Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        // stderr shares the terminal with the game screen
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        }
    }
    Ok(())
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut config = GameConfig::with_path(&cli.config);
    if cli.write_default_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Default config written to {}", cli.config.display());
        return Ok(());
    }
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using defaults");
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(config, &mut rng);
    info!("space shooter starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &mut rng, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("space shooter exiting after {} frames", game.frame_count());
    result
}
