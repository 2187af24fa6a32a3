mod display;

use std::collections::HashMap;
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

use boss_battle::audio::{ChannelCueSink, Cue};
use boss_battle::battle::Battle;
use boss_battle::config::BattleConfig;
use boss_battle::entities::Difficulty;
use boss_battle::input::{CycleDir, Direction, Input};

#[derive(Parser, Debug)]
#[command(name = "boss_battle", about = "Turn-based boss battle in the terminal")]
struct Cli {
    /// RON file overriding the default battle configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Starting difficulty (easy, hard, cheat)
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Seed for the attack patterns; omit for a fresh layout every run
    #[arg(short, long)]
    seed: Option<u64>,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A direction key counts as held if its last press/repeat event arrived
/// within this many ticks.  Covers terminals that never report releases:
/// OS key-repeat (≥ 15 Hz) refreshes it well before it expires.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_frame: &HashMap<Direction, u64>, key: Direction, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn direction_of(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// One-shot keys.  Directions are handled separately because they are held.
fn action_of(code: KeyCode) -> Option<Input> {
    match code {
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Enter => Some(Input::Confirm),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Backspace => Some(Input::Cancel),
        KeyCode::Tab => Some(Input::Cycle(CycleDir::Forward)),
        KeyCode::BackTab => Some(Input::Cycle(CycleDir::Backward)),
        KeyCode::Char(' ') => Some(Input::Shoot),
        _ => None,
    }
}

// ── Battle loop ───────────────────────────────────────────────────────────────

/// Drives the battle until the user quits.
///
/// Direction keys go through a `key_frame` map recording the tick of the
/// last press/repeat.  A fresh press becomes `Input::Press`; once a key falls
/// out of the hold window (or a real release arrives on terminals with
/// keyboard enhancement) it becomes `Input::Release`.  The engine turns
/// these into level-triggered movement flags, so two axes can be held at
/// once.
fn battle_loop<W: Write>(
    out: &mut W,
    battle: &mut Battle,
    rx: &mpsc::Receiver<Event>,
    cues: &mpsc::Receiver<Cue>,
) -> std::io::Result<()> {
    let tick_period = Duration::from_millis(battle.config().tick_ms);
    let clock = Instant::now();
    let mut key_frame: HashMap<Direction, u64> = HashMap::new();
    let mut last_cue: Option<Cue> = None;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let now = clock.elapsed().as_millis() as u64;

        // ── Input ─────────────────────────────────────────────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if let Some(dir) = direction_of(code) {
                        if key_frame.insert(dir, frame).is_none() {
                            battle.handle_input(Input::Press(dir), now);
                        }
                        continue;
                    }
                    if kind == KeyEventKind::Repeat {
                        continue;
                    }
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                        _ => {}
                    }
                    if let Some(input) = action_of(code) {
                        battle.handle_input(input, now);
                    }
                }
                KeyEventKind::Release => {
                    if let Some(dir) = direction_of(code) {
                        if key_frame.remove(&dir).is_some() {
                            battle.handle_input(Input::Release(dir), now);
                        }
                    }
                }
            }
        }

        // ── Expire keys that stopped repeating ────────────────────────────────
        let expired: Vec<Direction> = key_frame
            .keys()
            .copied()
            .filter(|&dir| !is_held(&key_frame, dir, frame))
            .collect();
        for dir in expired {
            key_frame.remove(&dir);
            battle.handle_input(Input::Release(dir), now);
        }

        battle.tick(now);

        while let Ok(cue) = cues.try_recv() {
            log::trace!("cue {}", cue);
            last_cue = Some(cue);
        }

        display::render(out, battle, last_cue)?;

        let elapsed = frame_start.elapsed();
        if elapsed < tick_period {
            std::thread::sleep(tick_period - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> Result<BattleConfig, boss_battle::error::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; redirect it (2>battle.log) to keep the screen clean.
    let _ = env_logger::Builder::from_default_env().try_init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    log::info!("starting with {:?}", config);

    let (sink, cue_rx) = ChannelCueSink::new();
    let mut battle = Battle::new(config, Box::new(sink));

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release/repeat events so held directions end cleanly.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Blocking reads live on their own thread; the loop only polls the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = battle_loop(&mut out, &mut battle, &rx, &cue_rx);

    // Restore the terminal even when the loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result?;
    Ok(())
}
