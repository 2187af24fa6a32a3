//! Terminal renderer.
//!
//! Reads the battle through its query API and queues crossterm commands; it
//! never mutates the engine.  The engine works in logical pixels and one
//! terminal cell covers `CELL_W × CELL_H` of them.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use boss_battle::audio::Cue;
use boss_battle::battle::{ActOption, Battle, MainMenuOption, MenuOption, INSTRUCTION_PAGES};
use boss_battle::entities::{BattleState, Bullet, BulletTag, Difficulty};
use boss_battle::fight::{FightBar, BAR_WIDTH, TARGET_WIDTH};
use boss_battle::geometry::Rect;
use boss_battle::patterns::{ColumnShape, LaneShape, Overlay};
use boss_battle::player::PlayerForm;
use strum::IntoEnumIterator;

/// Logical pixels per terminal column / row.
const CELL_W: i32 = 10;
const CELL_H: i32 = 20;
/// Row 0 is the HUD; the field starts below it.
const FIELD_TOP_ROW: i32 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::White;
const C_BOSS: Color = Color::Magenta;
const C_HUD_PLAYER: Color = Color::Yellow;
const C_HUD_BOSS: Color = Color::Red;
const C_HUD_CUE: Color = Color::DarkGrey;
const C_SOUL: Color = Color::Red;
const C_SHIP: Color = Color::Cyan;
const C_FLASH: Color = Color::White;
const C_ORB: Color = Color::White;
const C_SEEKER: Color = Color::Magenta;
const C_SHOT: Color = Color::Yellow;
const C_PILLAR: Color = Color::Green;
const C_BOX: Color = Color::DarkYellow;
const C_LASER_WARN: Color = Color::DarkRed;
const C_LASER_FIRE: Color = Color::Red;
const C_SELECTED: Color = Color::Yellow;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_TARGET: Color = Color::Green;

const INSTRUCTIONS: [&str; INSTRUCTION_PAGES as usize] = [
    "A BOSS STANDS IN YOUR WAY. TAKE TURNS: YOU ACT, THEN HE ATTACKS.",
    "FIGHT: STOP THE SLIDING MARKER. THE CLOSER TO THE GREEN ZONE, THE HARDER YOU HIT.",
    "ACT: CHECK CODE, JOKE, TECH SUPPORT OR ORZ. EACH DOES SOMETHING DIFFERENT.",
    "ITEM: POTIONS HEAL, THE SHIELD TOKEN BLOCKS TWO HITS, THE POWER FLASK BOOSTS YOUR NEXT ATTACK.",
    "QUIT: FORFEIT AND RETURN TO THE MAIN MENU.",
    "DURING HIS ATTACK, MOVE WITH THE ARROW KEYS OR WASD AND DODGE EVERYTHING.",
    "WHEN YOU BECOME A SHIP, PRESS SPACE TO SHOOT THE BOXES BLOCKING THE GAPS.",
];

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, battle: &Battle, last_cue: Option<Cue>) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut screen = Screen { out, cols, rows };
    screen.out.queue(terminal::Clear(terminal::ClearType::All))?;

    match battle.state() {
        BattleState::MainMenu => draw_main_menu(&mut screen, battle)?,
        BattleState::Instructions => draw_instructions(&mut screen, battle)?,
        BattleState::Settings => draw_settings(&mut screen, battle)?,
        BattleState::Win => draw_banner(&mut screen, battle, "YOU WON!", Color::Yellow)?,
        BattleState::Lose => draw_banner(&mut screen, battle, "YOU LOST...", Color::Red)?,
        state => {
            draw_hud(&mut screen, battle, last_cue)?;
            draw_boss(&mut screen, battle)?;
            screen.outline(&battle.arena(), C_BORDER)?;
            match state {
                BattleState::BossAttack => draw_attack(&mut screen, battle)?,
                BattleState::PlayerFightTiming => draw_fight_bar(&mut screen, battle)?,
                BattleState::PlayerMenu => {
                    draw_text_box(&mut screen, &battle.arena(), "* WHAT WILL YOU DO?")?;
                    draw_menu_bar(&mut screen, battle)?;
                }
                BattleState::PlayerAct => draw_act_grid(&mut screen, battle)?,
                BattleState::PlayerItemSelect => draw_items(&mut screen, battle)?,
                _ => draw_text_box(&mut screen, &battle.arena(), battle.dialog())?,
            }
            draw_popup(&mut screen, battle)?;
        }
    }

    // Park cursor in a harmless spot and flush
    screen.out.queue(style::ResetColor)?;
    screen.out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    screen.out.flush()?;
    Ok(())
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

struct Screen<'w, W: Write> {
    out: &'w mut W,
    cols: u16,
    rows: u16,
}

impl<W: Write> Screen<'_, W> {
    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let col = x.div_euclid(CELL_W);
        let row = y.div_euclid(CELL_H) + FIELD_TOP_ROW;
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn put(&mut self, col: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
        if col >= self.cols || row >= self.rows {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn put_px(&mut self, x: i32, y: i32, text: &str, color: Color) -> std::io::Result<()> {
        match self.cell(x, y) {
            Some((col, row)) => self.put(col, row, text, color),
            None => Ok(()),
        }
    }

    fn centered(&mut self, row: u16, text: &str, color: Color) -> std::io::Result<()> {
        let col = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.put(col, row, text, color)
    }

    fn outline(&mut self, rect: &Rect, color: Color) -> std::io::Result<()> {
        let (Some((l, t)), Some((r, b))) = (self.cell(rect.x, rect.y), self.cell(rect.right(), rect.bottom()))
        else {
            return Ok(());
        };
        let inner = r.saturating_sub(l + 1) as usize;
        self.put(l, t, &format!("┌{}┐", "─".repeat(inner)), color)?;
        self.put(l, b, &format!("└{}┘", "─".repeat(inner)), color)?;
        for row in t + 1..b {
            self.put(l, row, "│", color)?;
            self.put(r, row, "│", color)?;
        }
        Ok(())
    }

    /// Fill the part of `rect` that lies inside `clip`.
    fn fill(&mut self, rect: &Rect, clip: &Rect, glyph: &str, color: Color) -> std::io::Result<()> {
        let x0 = rect.x.max(clip.x + 1);
        let x1 = rect.right().min(clip.right() - 1);
        let y0 = rect.y.max(clip.y + 1);
        let y1 = rect.bottom().min(clip.bottom() - 1);
        let mut y = y0;
        while y < y1 {
            let mut x = x0;
            while x < x1 {
                self.put_px(x, y, glyph, color)?;
                x += CELL_W;
            }
            y += CELL_H;
        }
        Ok(())
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle, last_cue: Option<Cue>) -> std::io::Result<()> {
    let player = battle.player();
    let mut left = format!("YOU  HP {}/{}", player.hp(), player.max_hp());
    if player.shield_active() {
        left.push_str(&format!("  SHIELD x{}", player.shield_charges()));
    }
    if player.next_attack_boost() > 0 {
        left.push_str(&format!("  BOOST +{}", player.next_attack_boost()));
    }
    screen.put(1, 0, &left, C_HUD_PLAYER)?;

    let boss = battle.boss();
    let right = format!("{}  HP {}/{}  CYCLE {}", boss.name(), boss.hp(), boss.max_hp(), battle.cycle());
    let col = screen.cols.saturating_sub(right.chars().count() as u16 + 1);
    screen.put(col, 0, &right, C_HUD_BOSS)?;

    if let Some(cue) = last_cue {
        let tag = format!("♪ {}", cue.name());
        screen.centered(0, &tag, C_HUD_CUE)?;
    }
    Ok(())
}

// ── Boss & popup ──────────────────────────────────────────────────────────────

fn draw_boss<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle) -> std::io::Result<()> {
    let boss = battle.boss();
    let region = boss.region();
    screen.outline(&region, C_BOSS)?;
    let face = region.center();
    screen.put_px(face.x - 2 * CELL_W, face.y - CELL_H, "ಠ_ಠ", C_BOSS)?;
    let name = boss.name();
    screen.put_px(face.x - (name.chars().count() as i32 / 2) * CELL_W, region.bottom() - CELL_H, name, C_BOSS)?;

    let filled = ((boss.hp_ratio() * 10.0).ceil() as usize).min(10);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled));
    screen.put_px(face.x - 5 * CELL_W, region.y + CELL_H, &bar, C_HUD_BOSS)?;
    Ok(())
}

fn draw_popup<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle) -> std::io::Result<()> {
    if let Some(popup) = battle.popup() {
        screen.put_px(popup.at.x, popup.at.y, &popup.text, Color::Red)?;
    }
    Ok(())
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn draw_main_menu<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle) -> std::io::Result<()> {
    let mid = screen.rows / 2;
    screen.centered(mid.saturating_sub(5), "★  BOSS  BATTLE  ★", Color::Cyan)?;
    screen.centered(mid.saturating_sub(4), &format!("VS. {}", battle.boss().name()), C_BOSS)?;

    for (i, option) in MainMenuOption::iter().enumerate() {
        let selected = battle.main_menu_selection() == Some(option);
        let label = if selected { format!("▶ {option}") } else { format!("  {option}") };
        let color = if selected { C_SELECTED } else { C_TEXT };
        screen.centered(mid.saturating_sub(1) + i as u16, &label, color)?;
    }
    screen.centered(mid + 4, &format!("DIFFICULTY: {}", battle.difficulty()), C_HINT)?;
    screen.centered(mid + 6, "↑ ↓ : Choose   Z / ENTER : Confirm   Q : Quit", C_HINT)?;
    Ok(())
}

fn draw_instructions<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle) -> std::io::Result<()> {
    let mid = screen.rows / 2;
    let page = battle.instruction_page();
    screen.centered(mid.saturating_sub(3), &format!("HOW TO PLAY  ({page}/{INSTRUCTION_PAGES})"), Color::Cyan)?;
    let text = INSTRUCTIONS.get(page.saturating_sub(1) as usize).copied().unwrap_or_default();
    for (i, line) in wrap(text, (screen.cols as usize).saturating_sub(10).max(20)).iter().enumerate() {
        screen.centered(mid.saturating_sub(1) + i as u16, line, C_TEXT)?;
    }
    screen.centered(mid + 5, "← → : Page   Z / X : Back", C_HINT)?;
    Ok(())
}

fn draw_settings<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle) -> std::io::Result<()> {
    let mid = screen.rows / 2;
    screen.centered(mid.saturating_sub(4), "SETTINGS", Color::Cyan)?;
    for (i, difficulty) in Difficulty::iter().enumerate() {
        let selected = battle.settings_selection() == difficulty;
        let marker = if selected { "▶" } else { " " };
        let line = format!("{marker} {:<6} {}", difficulty, difficulty.description());
        let color = if selected { C_SELECTED } else { C_TEXT };
        screen.centered(mid.saturating_sub(1) + i as u16, &line, color)?;
    }
    screen.centered(mid + 4, "↑ ↓ : Choose   Z : Save   X : Discard", C_HINT)?;
    Ok(())
}

fn draw_banner<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle, title: &str, color: Color) -> std::io::Result<()> {
    let mid = screen.rows / 2;
    let bar = "═".repeat(title.chars().count() + 8);
    screen.centered(mid.saturating_sub(2), &format!("╔{bar}╗"), color)?;
    screen.centered(mid.saturating_sub(1), &format!("║    {title}    ║"), color)?;
    screen.centered(mid, &format!("╚{bar}╝"), color)?;
    let boss = battle.boss();
    screen.centered(mid + 2, &format!("{} HP {}/{}", boss.name(), boss.hp(), boss.max_hp()), C_TEXT)?;
    screen.centered(mid + 4, "Z - Main Menu  Q - Quit", C_HINT)?;
    Ok(())
}

/// Greedy word wrap.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

fn draw_text_box<W: Write>(screen: &mut Screen<'_, W>, arena: &Rect, text: &str) -> std::io::Result<()> {
    let width = (arena.width / CELL_W - 4).max(8) as usize;
    for (i, line) in wrap(text, width).iter().enumerate() {
        screen.put_px(arena.x + 2 * CELL_W, arena.y + (i as i32 + 1) * CELL_H, line, C_TEXT)?;
    }
    Ok(())
}

fn draw_menu_bar<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle) -> std::io::Result<()> {
    let arena = battle.arena();
    let y = arena.bottom() + CELL_H;
    let mut x = arena.x;
    for option in MenuOption::iter() {
        let selected = battle.menu_selection() == Some(option);
        let label = if selected { format!("[▶{option}]") } else { format!("[ {option}]") };
        let color = if selected { C_SELECTED } else { C_TEXT };
        screen.put_px(x, y, &label, color)?;
        x += (label.chars().count() as i32 + 2) * CELL_W;
    }
    Ok(())
}

fn draw_act_grid<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle) -> std::io::Result<()> {
    let arena = battle.arena();
    for (i, option) in ActOption::iter().enumerate() {
        let col = (i % 2) as i32;
        let row = (i / 2) as i32;
        let selected = battle.act_selection() == Some(option);
        let label = if selected { format!("▶ * {option}") } else { format!("  * {option}") };
        let color = if selected { C_SELECTED } else { C_TEXT };
        let x = arena.x + 2 * CELL_W + col * (arena.width / 2);
        let y = arena.y + (row * 2 + 2) * CELL_H;
        screen.put_px(x, y, &label, color)?;
    }
    Ok(())
}

fn draw_items<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle) -> std::io::Result<()> {
    let arena = battle.arena();
    let player = battle.player();
    let count = player.inventory().len();
    let Some(item) = player.selected_item() else {
        return draw_text_box(screen, &arena, "YOUR POCKETS ARE EMPTY.");
    };
    let header = format!("◀ {} ({}/{}) ▶", item.name.to_uppercase(), player.selected_index() + 1, count);
    screen.put_px(arena.x + 2 * CELL_W, arena.y + CELL_H, &header, C_SELECTED)?;
    let body = format!("{}\nLEFT: {}", item.description, item.quantity());
    let body_box = Rect::new(arena.x, arena.y + 2 * CELL_H, arena.width, arena.height);
    draw_text_box(screen, &body_box, &body)
}

// ── FIGHT bar ─────────────────────────────────────────────────────────────────

fn draw_fight_bar<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle) -> std::io::Result<()> {
    let arena = battle.arena();
    let bar_x = arena.center().x - BAR_WIDTH / 2;
    let bar_y = arena.center().y;

    let mut x = bar_x;
    while x < bar_x + BAR_WIDTH {
        screen.put_px(x, bar_y, "═", C_TEXT)?;
        x += CELL_W;
    }
    let zone = FightBar::target_start();
    let mut x = bar_x + zone;
    while x <= bar_x + zone + TARGET_WIDTH {
        screen.put_px(x, bar_y, "█", C_TARGET)?;
        x += CELL_W;
    }

    let bar = battle.fight_bar();
    let marker_x = bar_x + bar.marker();
    screen.put_px(marker_x, bar_y - CELL_H, "▼", C_SELECTED)?;
    screen.put_px(marker_x, bar_y + CELL_H, "▲", C_SELECTED)?;
    screen.put_px(arena.x + 2 * CELL_W, arena.bottom() - 2 * CELL_H, "Z : STRIKE", C_HINT)?;
    Ok(())
}

// ── Boss attack ───────────────────────────────────────────────────────────────

fn draw_attack<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle) -> std::io::Result<()> {
    let arena = battle.arena();

    match battle.overlay() {
        Overlay::Columns(columns) => {
            for column in &columns {
                draw_column(screen, column, &arena)?;
            }
        }
        Overlay::Lanes(lanes) => {
            for lane in &lanes {
                draw_lane(screen, lane, &arena)?;
            }
        }
        Overlay::Warning(Some(at)) => screen.put_px(at.x, at.y, "!", Color::Yellow)?,
        Overlay::Warning(None) | Overlay::None => {}
    }

    for bullet in battle.boss_bullets().iter().chain(battle.player_bullets()) {
        draw_bullet(screen, bullet, &arena)?;
    }
    draw_player(screen, battle)?;

    let hint = if battle.current_pattern().is_some_and(|p| p.allows_shooting()) {
        "ARROWS / WASD : Move   SPACE : Shoot"
    } else {
        "ARROWS / WASD : Move"
    };
    screen.put_px(arena.x, arena.bottom() + CELL_H, hint, C_HINT)?;
    Ok(())
}

fn draw_column<W: Write>(screen: &mut Screen<'_, W>, column: &ColumnShape, arena: &Rect) -> std::io::Result<()> {
    screen.fill(&column.top, arena, "█", C_PILLAR)?;
    screen.fill(&column.bottom, arena, "█", C_PILLAR)?;
    for b in &column.boxes {
        screen.fill(b, arena, "▒", C_BOX)?;
    }
    Ok(())
}

fn draw_lane<W: Write>(screen: &mut Screen<'_, W>, lane: &LaneShape, arena: &Rect) -> std::io::Result<()> {
    if lane.active {
        screen.fill(&lane.rect, arena, "┃", C_LASER_FIRE)
    } else {
        screen.fill(&lane.rect, arena, "░", C_LASER_WARN)
    }
}

fn draw_bullet<W: Write>(screen: &mut Screen<'_, W>, bullet: &Bullet, arena: &Rect) -> std::io::Result<()> {
    if !arena.contains(bullet.bounds().center()) {
        return Ok(());
    }
    let (glyph, color) = match bullet.tag {
        BulletTag::Orb => ("●", C_ORB),
        BulletTag::Seeker => ("◆", C_SEEKER),
        BulletTag::PlayerShot => ("-", C_SHOT),
    };
    screen.put_px(bullet.x, bullet.y, glyph, color)
}

fn draw_player<W: Write>(screen: &mut Screen<'_, W>, battle: &Battle) -> std::io::Result<()> {
    let player = battle.player();
    let at = player.hitbox().center();
    // Alternate every few ticks while flashing.
    let flash = player.is_flashing() && (player.flash_ticks() / 4) % 2 == 0;
    let (glyph, color) = match player.form() {
        PlayerForm::Soul => ("♥", C_SOUL),
        PlayerForm::Ship => ("►", C_SHIP),
    };
    screen.put_px(at.x, at.y, glyph, if flash { C_FLASH } else { color })
}
