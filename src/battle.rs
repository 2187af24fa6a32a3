//! The turn state machine.
//!
//! [`Battle`] owns every entity: the player, the boss, both bullet lists and
//! the attack-pattern rotation.  Front-ends feed it semantic [`Input`]s and a
//! fixed-period [`Battle::tick`], then read back whatever they need to draw.
//!
//! Turn order:
//!
//! ```text
//! MainMenu ─START─▶ Intro ─▶ PlayerMenu ─FIGHT/ACT/ITEM─▶ Dialog ─▶ BossAttack
//!                               ▲                                     │
//!                               └──────────── Dialog ◀─── finished ───┘
//! ```
//!
//! QUIT goes through a Dialog back to MainMenu.  Win is entered the instant a
//! FIGHT or ACT leaves the boss at 0 HP; Lose the instant a pattern leaves the
//! player at 0 HP.

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::audio::{Cue, CueSink};
use crate::compute::{
    boss_ratio_modifier, fight_damage, joke_heal, starting_max_hp, CHECK_CODE_MULTIPLIER, ORZ_MULTIPLIER,
};
use crate::config::BattleConfig;
use crate::entities::{BattleState, Boss, Bullet, Difficulty};
use crate::fight::FightBar;
use crate::geometry::{Point, Rect};
use crate::input::{CycleDir, Direction, Input, MoveIntents};
use crate::patterns::{gunner, standard_rotation, AttackPattern, Overlay, PatternContext};
use crate::player::{default_inventory, Player};

pub const INSTRUCTION_PAGES: u32 = 7;
/// Ticks the floating damage number stays up.
pub const POPUP_TICKS: u32 = 60;

// ── Menu options ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum MainMenuOption {
    Start,
    Instructions,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum MenuOption {
    Fight,
    Act,
    Item,
    Quit,
}

/// Laid out as a 2×2 grid, row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
pub enum ActOption {
    #[strum(serialize = "CHECK CODE")]
    CheckCode,
    #[strum(serialize = "JOKE")]
    Joke,
    #[strum(serialize = "TECH SUPPORT")]
    TechSupport,
    #[strum(serialize = "ORZ")]
    Orz,
}

fn option_at<T: IntoEnumIterator>(index: usize) -> Option<T> {
    T::iter().nth(index)
}

fn wrap_step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

// ── Transient UI state ───────────────────────────────────────────────────────

/// Where a Dialog goes once confirmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AfterDialog {
    PlayerMenu,
    BossAttack,
    /// Reset the battle, then show the main menu.
    MainMenu,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamagePopup {
    pub text: String,
    pub at: Point,
    pub ticks_left: u32,
}

// ── Battle ───────────────────────────────────────────────────────────────────

pub struct Battle {
    config: BattleConfig,
    state: BattleState,
    /// Preset applied at the next reset.
    difficulty: Difficulty,
    settings_cursor: Difficulty,

    player: Player,
    boss: Boss,
    boss_bullets: Vec<Bullet>,
    player_bullets: Vec<Bullet>,

    patterns: Vec<Box<dyn AttackPattern>>,
    pattern_index: usize,
    cycle: u32,

    boss_damage_modifier: f32,
    player_damage_modifier: f32,
    orz_active: bool,

    main_cursor: usize,
    menu_cursor: usize,
    act_cursor: usize,
    instruction_page: u32,

    fight_bar: FightBar,
    dialog: String,
    after_dialog: AfterDialog,
    popup: Option<DamagePopup>,
    /// Directions currently held, tracked in every state so a key held
    /// through the dialog moves the player as soon as the attack starts.
    intents: MoveIntents,

    cues: Box<dyn CueSink>,
}

impl Battle {
    pub fn new(config: BattleConfig, cues: Box<dyn CueSink>) -> Self {
        let patterns = standard_rotation(config.seed);
        Battle::with_patterns(config, patterns, cues)
    }

    /// Build a battle around a custom pattern rotation.
    pub fn with_patterns(config: BattleConfig, patterns: Vec<Box<dyn AttackPattern>>, cues: Box<dyn CueSink>) -> Self {
        let difficulty = config.difficulty;
        let player = new_player(&config, difficulty);
        let boss = new_boss(&config);
        let mut battle = Battle {
            config,
            state: BattleState::MainMenu,
            difficulty,
            settings_cursor: difficulty,
            player,
            boss,
            boss_bullets: Vec::new(),
            player_bullets: Vec::new(),
            patterns,
            pattern_index: 0,
            cycle: 0,
            boss_damage_modifier: 1.0,
            player_damage_modifier: 1.0,
            orz_active: false,
            main_cursor: 0,
            menu_cursor: 0,
            act_cursor: 0,
            instruction_page: 1,
            fight_bar: FightBar::new(),
            dialog: String::new(),
            after_dialog: AfterDialog::PlayerMenu,
            popup: None,
            intents: MoveIntents::default(),
            cues,
        };
        battle.dialog = battle.encounter_text();
        battle
    }

    /// Fresh player, boss and modifiers; the pattern rotation restarts at
    /// its first entry with the cycle counter back at zero.
    pub fn reset(&mut self) {
        self.player = new_player(&self.config, self.difficulty);
        self.boss = new_boss(&self.config);
        self.boss_bullets.clear();
        self.player_bullets.clear();
        self.pattern_index = 0;
        self.cycle = 0;
        self.boss_damage_modifier = 1.0;
        self.player_damage_modifier = 1.0;
        self.orz_active = false;
        self.menu_cursor = 0;
        self.act_cursor = 0;
        self.fight_bar.reset();
        self.popup = None;
        self.dialog = self.encounter_text();
        log::info!("battle reset: difficulty {}, player hp {}", self.difficulty, self.player.max_hp());
    }

    // ── Inbound ──────────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, input: Input, now: u64) {
        match input {
            Input::Release(dir) => {
                self.intents.set(dir, false);
                return;
            }
            Input::Press(dir) => self.intents.set(dir, true),
            _ => {}
        }

        match self.state {
            BattleState::MainMenu => self.main_menu_input(input),
            BattleState::Instructions => self.instructions_input(input),
            BattleState::Settings => self.settings_input(input),
            BattleState::Intro => {
                if input == Input::Confirm {
                    self.set_state(BattleState::PlayerMenu);
                }
            }
            BattleState::PlayerMenu => self.player_menu_input(input),
            BattleState::PlayerFightTiming => {
                if input == Input::Confirm {
                    self.confirm_fight();
                }
            }
            BattleState::PlayerAct => self.act_input(input),
            BattleState::PlayerItemSelect => self.item_input(input),
            BattleState::Dialog => {
                if input == Input::Confirm {
                    self.end_dialog(now);
                }
            }
            BattleState::BossAttack => self.boss_attack_input(input),
            BattleState::Win | BattleState::Lose => {
                if input == Input::Confirm {
                    self.reset();
                    self.set_state(BattleState::MainMenu);
                }
            }
        }
    }

    /// One fixed-period step at wall-clock `now` (ms).
    pub fn tick(&mut self, now: u64) {
        log::trace!("tick at {}ms in {}", now, self.state);
        match self.state {
            BattleState::BossAttack => self.run_pattern(now),
            BattleState::PlayerFightTiming => self.fight_bar.advance(),
            _ => {}
        }

        if self.state == BattleState::BossAttack {
            let arena = self.config.attack_arena();
            let (dx, dy) = self.intents.delta(self.config.player_speed);
            if dx != 0 || dy != 0 {
                self.player.move_within(dx, dy, &arena);
            }

            for shot in &mut self.player_bullets {
                shot.advance();
            }
            self.player_bullets.retain(|shot| !shot.is_out_of_bounds(&arena));
        }

        if let Some(popup) = &mut self.popup {
            popup.ticks_left = popup.ticks_left.saturating_sub(1);
            if popup.ticks_left == 0 {
                self.popup = None;
            }
        }
        self.player.tick_flash();
    }

    // ── Per-state input ──────────────────────────────────────────────────────

    fn main_menu_input(&mut self, input: Input) {
        let len = MainMenuOption::iter().count();
        match input {
            Input::Press(Direction::Up | Direction::Left) | Input::Cycle(CycleDir::Backward) => {
                self.main_cursor = wrap_step(self.main_cursor, len, false);
                self.cues.trigger(Cue::MenuMove);
            }
            Input::Press(Direction::Down | Direction::Right) | Input::Cycle(CycleDir::Forward) => {
                self.main_cursor = wrap_step(self.main_cursor, len, true);
                self.cues.trigger(Cue::MenuMove);
            }
            Input::Confirm => {
                self.cues.trigger(Cue::MenuSelect);
                match option_at::<MainMenuOption>(self.main_cursor) {
                    Some(MainMenuOption::Start) => {
                        self.reset();
                        self.cues.trigger(Cue::BattleStart);
                        self.set_state(BattleState::Intro);
                    }
                    Some(MainMenuOption::Instructions) => {
                        self.instruction_page = 1;
                        self.set_state(BattleState::Instructions);
                    }
                    Some(MainMenuOption::Settings) => {
                        self.settings_cursor = self.difficulty;
                        self.set_state(BattleState::Settings);
                    }
                    None => {}
                }
            }
            _ => {}
        }
    }

    fn instructions_input(&mut self, input: Input) {
        match input {
            Input::Press(Direction::Left) | Input::Cycle(CycleDir::Backward) if self.instruction_page > 1 => {
                self.instruction_page -= 1;
                self.cues.trigger(Cue::MenuMove);
            }
            Input::Press(Direction::Right) | Input::Cycle(CycleDir::Forward)
                if self.instruction_page < INSTRUCTION_PAGES =>
            {
                self.instruction_page += 1;
                self.cues.trigger(Cue::MenuMove);
            }
            Input::Confirm | Input::Cancel => {
                self.cues.trigger(Cue::MenuSelect);
                self.set_state(BattleState::MainMenu);
            }
            _ => {}
        }
    }

    fn settings_input(&mut self, input: Input) {
        match input {
            Input::Press(Direction::Up | Direction::Left) | Input::Cycle(CycleDir::Backward) => {
                self.settings_cursor = self.settings_cursor.previous();
                self.cues.trigger(Cue::MenuMove);
            }
            Input::Press(Direction::Down | Direction::Right) | Input::Cycle(CycleDir::Forward) => {
                self.settings_cursor = self.settings_cursor.next();
                self.cues.trigger(Cue::MenuMove);
            }
            Input::Confirm => {
                self.difficulty = self.settings_cursor;
                log::info!("difficulty set to {}", self.difficulty);
                self.cues.trigger(Cue::MenuSelect);
                self.set_state(BattleState::MainMenu);
            }
            Input::Cancel => {
                self.settings_cursor = self.difficulty;
                self.cues.trigger(Cue::MenuSelect);
                self.set_state(BattleState::MainMenu);
            }
            _ => {}
        }
    }

    fn player_menu_input(&mut self, input: Input) {
        let len = MenuOption::iter().count();
        match input {
            Input::Press(Direction::Left) | Input::Cycle(CycleDir::Backward) => {
                self.menu_cursor = wrap_step(self.menu_cursor, len, false);
                self.cues.trigger(Cue::MenuMove);
            }
            Input::Press(Direction::Right) | Input::Cycle(CycleDir::Forward) => {
                self.menu_cursor = wrap_step(self.menu_cursor, len, true);
                self.cues.trigger(Cue::MenuMove);
            }
            Input::Confirm => {
                self.cues.trigger(Cue::MenuSelect);
                match option_at::<MenuOption>(self.menu_cursor) {
                    Some(MenuOption::Fight) => {
                        self.fight_bar.reset();
                        self.set_state(BattleState::PlayerFightTiming);
                    }
                    Some(MenuOption::Act) => {
                        self.act_cursor = 0;
                        self.set_state(BattleState::PlayerAct);
                    }
                    Some(MenuOption::Item) => self.set_state(BattleState::PlayerItemSelect),
                    Some(MenuOption::Quit) => {
                        let text = format!("YOU FORFEIT THE FIGHT MID-BATTLE.\n\n{}: YOU... FAIL!", self.speaker());
                        self.show_dialog(text, AfterDialog::MainMenu);
                    }
                    None => {}
                }
            }
            _ => {}
        }
    }

    fn act_input(&mut self, input: Input) {
        let len = ActOption::iter().count();
        let before = self.act_cursor;
        match input {
            Input::Press(Direction::Left) if self.act_cursor % 2 == 1 => self.act_cursor -= 1,
            Input::Press(Direction::Right) if self.act_cursor % 2 == 0 && self.act_cursor + 1 < len => {
                self.act_cursor += 1
            }
            Input::Press(Direction::Up) if self.act_cursor >= 2 => self.act_cursor -= 2,
            Input::Press(Direction::Down) if self.act_cursor + 2 < len => self.act_cursor += 2,
            Input::Cycle(dir) => self.act_cursor = wrap_step(self.act_cursor, len, dir == CycleDir::Forward),
            Input::Confirm => {
                if let Some(choice) = option_at::<ActOption>(self.act_cursor) {
                    self.cues.trigger(Cue::MenuSelect);
                    self.resolve_act(choice);
                }
            }
            Input::Cancel => self.set_state(BattleState::PlayerMenu),
            _ => {}
        }
        if self.act_cursor != before {
            self.cues.trigger(Cue::MenuMove);
        }
    }

    fn item_input(&mut self, input: Input) {
        match input {
            Input::Press(Direction::Left) | Input::Cycle(CycleDir::Backward) => {
                self.player.cycle_item(false);
                self.cues.trigger(Cue::MenuMove);
            }
            Input::Press(Direction::Right) | Input::Cycle(CycleDir::Forward) => {
                self.player.cycle_item(true);
                self.cues.trigger(Cue::MenuMove);
            }
            Input::Confirm => self.use_item(),
            Input::Cancel => self.set_state(BattleState::PlayerMenu),
            _ => {}
        }
    }

    fn boss_attack_input(&mut self, input: Input) {
        if input != Input::Shoot {
            return;
        }
        let allowed = self.current_pattern().is_some_and(|p| p.allows_shooting());
        if allowed {
            self.player_bullets.push(gunner::player_shot(&self.player.hitbox()));
            self.cues.trigger(Cue::PlayerShot);
        }
    }

    // ── Turn resolution ──────────────────────────────────────────────────────

    fn confirm_fight(&mut self) {
        let Some(tier) = self.fight_bar.confirm() else {
            return;
        };
        self.cues.trigger(Cue::AttackConfirmed);

        let boost = self.player.take_attack_boost();
        let ratio = boss_ratio_modifier(self.boss.hp(), self.boss.max_hp());
        let damage = fight_damage(tier, boost, ratio, self.player_damage_modifier() as f64);
        self.boss.damage(damage);
        self.orz_active = false;
        log::debug!("fight: {} for {} (boost {}), boss hp {}", tier, damage, boost, self.boss.hp());

        let region = self.boss.region();
        self.popup = Some(DamagePopup {
            text: format!("-{damage}"),
            at: Point::new(region.x + region.width / 2 + 50, region.y + 60),
            ticks_left: POPUP_TICKS,
        });

        if !self.check_victory() {
            self.show_dialog(tier.message().to_string(), AfterDialog::BossAttack);
        }
    }

    fn resolve_act(&mut self, choice: ActOption) {
        let speaker = self.speaker();
        let text = match choice {
            ActOption::CheckCode => {
                self.boss_damage_modifier *= CHECK_CODE_MULTIPLIER;
                format!(
                    "YOU CHECK THE CODE...\n{speaker}: SCROLL UP, SCROLL DOWN.\n\
                     {speaker}: THERE'S AN ERROR IN YOUR CODE!!\n{speaker} IS NOT PLEASED."
                )
            }
            ActOption::Joke => {
                let heal = joke_heal(self.boss.hp(), self.boss.max_hp());
                self.boss.heal(heal);
                format!(
                    "YOU TELL A JOKE...\n{speaker}: HAHAHAHAHAHAHAHAHA!!!\n\
                     {speaker} IS IN A GOOD MOOD.\nHE REGAINS SOME HEALTH!"
                )
            }
            ActOption::TechSupport => format!(
                "YOU CALL TECH SUPPORT...\nBOSS: \"THANK YOU FOR CALLING TECH SUPPORT.\"\n\
                 {speaker}: I WILL NOT HELP YOU."
            ),
            ActOption::Orz if self.orz_active => "YOUR SPIRIT IS ALREADY DETERMINED!".to_string(),
            ActOption::Orz => {
                self.orz_active = true;
                "YOU GO 'ORZ' AND SHOW RESPECT.\nYOUR DETERMINATION SWELLS.\n\
                 YOUR NEXT ATTACK DEALS MORE DAMAGE!"
                    .to_string()
            }
        };
        log::debug!("act: {}", choice);

        if !self.check_victory() {
            self.show_dialog(text, AfterDialog::BossAttack);
        }
    }

    /// Item failures still cost the turn.
    fn use_item(&mut self) {
        let text = match self.player.use_selected_item() {
            Ok(name) => {
                self.cues.trigger(Cue::ItemUsed);
                format!("YOU USED THE {}!", name.to_uppercase())
            }
            Err(err) => {
                log::debug!("item rejected: {}", err);
                err.to_string()
            }
        };
        self.show_dialog(text, AfterDialog::BossAttack);
    }

    fn check_victory(&mut self) -> bool {
        if !self.boss.is_defeated() {
            return false;
        }
        log::info!("{} defeated", self.boss.name());
        self.cues.trigger(Cue::Victory);
        self.set_state(BattleState::Win);
        true
    }

    fn end_dialog(&mut self, now: u64) {
        match self.after_dialog {
            AfterDialog::MainMenu => {
                self.reset();
                self.set_state(BattleState::MainMenu);
            }
            AfterDialog::BossAttack if !self.boss.is_defeated() && !self.player.is_dead() => {
                self.start_boss_attack(now);
            }
            AfterDialog::BossAttack | AfterDialog::PlayerMenu => self.set_state(BattleState::PlayerMenu),
        }
    }

    // ── Boss phase ───────────────────────────────────────────────────────────

    fn start_boss_attack(&mut self, now: u64) {
        self.set_state(BattleState::BossAttack);
        let arena = self.config.attack_arena();
        self.player.center_in(&arena);

        let Some(pattern) = self.patterns.get_mut(self.pattern_index) else {
            log::warn!("no attack pattern at index {}", self.pattern_index);
            self.set_state(BattleState::PlayerMenu);
            return;
        };
        log::info!("boss attack: {} (cycle {})", pattern.name(), self.cycle);
        let mut ctx = PatternContext {
            now,
            arena,
            cycle: self.cycle,
            boss_damage_modifier: self.boss_damage_modifier,
            player: &mut self.player,
            boss_bullets: &mut self.boss_bullets,
            player_bullets: &mut self.player_bullets,
            cues: &mut *self.cues,
        };
        pattern.initialize(&mut ctx);
        log::debug!("{} tuned to {:?}", pattern.name(), pattern.tuning());
    }

    fn run_pattern(&mut self, now: u64) {
        let arena = self.config.attack_arena();
        let Some(pattern) = self.patterns.get_mut(self.pattern_index) else {
            log::warn!("no attack pattern at index {}", self.pattern_index);
            self.set_state(BattleState::PlayerMenu);
            return;
        };
        let mut ctx = PatternContext {
            now,
            arena,
            cycle: self.cycle,
            boss_damage_modifier: self.boss_damage_modifier,
            player: &mut self.player,
            boss_bullets: &mut self.boss_bullets,
            player_bullets: &mut self.player_bullets,
            cues: &mut *self.cues,
        };
        pattern.execute(&mut ctx);
        let finished = pattern.is_finished();

        if self.player.is_dead() {
            log::info!("player defeated by {}", self.boss.name());
            self.cues.trigger(Cue::Defeat);
            self.set_state(BattleState::Lose);
            return;
        }
        if finished {
            log::debug!("{} finished", pattern.name());
            self.advance_rotation();
            let text = format!("{}: NOT BAD... NEXT PHASE!", self.speaker());
            self.show_dialog(text, AfterDialog::PlayerMenu);
        }
    }

    fn advance_rotation(&mut self) {
        self.pattern_index += 1;
        if self.pattern_index >= self.patterns.len() {
            self.pattern_index = 0;
            self.cycle += 1;
            log::info!("pattern rotation complete, cycle now {}", self.cycle);
        }
    }

    // ── State plumbing ───────────────────────────────────────────────────────

    fn set_state(&mut self, next: BattleState) {
        if next != BattleState::BossAttack {
            self.boss_bullets.clear();
            self.player_bullets.clear();
        }
        log::debug!("state {} -> {}", self.state, next);
        self.state = next;
    }

    fn show_dialog(&mut self, text: String, after: AfterDialog) {
        self.dialog = text;
        self.after_dialog = after;
        self.set_state(BattleState::Dialog);
    }

    /// Short name the boss speaks under in dialog.
    fn speaker(&self) -> String {
        let name = self.boss.name();
        name.split_whitespace().next().unwrap_or(name).to_uppercase()
    }

    fn encounter_text(&self) -> String {
        format!("YOU ENCOUNTERED {}.", self.boss.name().to_uppercase())
    }

    // ── Outbound queries ─────────────────────────────────────────────────────

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    pub fn boss_bullets(&self) -> &[Bullet] {
        &self.boss_bullets
    }

    pub fn player_bullets(&self) -> &[Bullet] {
        &self.player_bullets
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn pattern_index(&self) -> usize {
        self.pattern_index
    }

    /// The pattern that the next (or current) boss attack uses, if any.
    pub fn current_pattern(&self) -> Option<&dyn AttackPattern> {
        self.patterns.get(self.pattern_index).map(|p| p.as_ref())
    }

    /// Pattern geometry to draw; empty outside a boss attack.
    pub fn overlay(&self) -> Overlay {
        if self.state != BattleState::BossAttack {
            return Overlay::None;
        }
        let arena = self.config.attack_arena();
        self.current_pattern().map(|p| p.overlay(&arena)).unwrap_or_default()
    }

    /// The homing pattern's "!" marker, while lit.
    pub fn exclamation(&self) -> Option<Point> {
        match self.overlay() {
            Overlay::Warning(at) => at,
            _ => None,
        }
    }

    /// The box the current state draws in.
    pub fn arena(&self) -> Rect {
        match self.state {
            BattleState::BossAttack => self.config.attack_arena(),
            BattleState::PlayerFightTiming => self.config.fight_arena(),
            _ => self.config.menu_arena(),
        }
    }

    pub fn dialog(&self) -> &str {
        &self.dialog
    }

    pub fn after_dialog(&self) -> AfterDialog {
        self.after_dialog
    }

    pub fn fight_bar(&self) -> &FightBar {
        &self.fight_bar
    }

    pub fn popup(&self) -> Option<&DamagePopup> {
        self.popup.as_ref()
    }

    pub fn main_menu_selection(&self) -> Option<MainMenuOption> {
        option_at(self.main_cursor)
    }

    pub fn menu_selection(&self) -> Option<MenuOption> {
        option_at(self.menu_cursor)
    }

    pub fn act_selection(&self) -> Option<ActOption> {
        option_at(self.act_cursor)
    }

    pub fn instruction_page(&self) -> u32 {
        self.instruction_page
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn settings_selection(&self) -> Difficulty {
        self.settings_cursor
    }

    pub fn boss_damage_modifier(&self) -> f32 {
        self.boss_damage_modifier
    }

    /// Modifier the next FIGHT uses, including a pending ORZ.
    pub fn player_damage_modifier(&self) -> f32 {
        if self.orz_active {
            self.player_damage_modifier * ORZ_MULTIPLIER
        } else {
            self.player_damage_modifier
        }
    }

    pub fn orz_active(&self) -> bool {
        self.orz_active
    }

    pub fn intents(&self) -> MoveIntents {
        self.intents
    }
}

fn new_boss(config: &BattleConfig) -> Boss {
    let boss = Boss::new(config.boss_name.clone(), config.boss_max_hp, config.boss_region());
    match config.boss_start_hp {
        Some(hp) => boss.with_hp(hp),
        None => boss,
    }
}

fn new_player(config: &BattleConfig, difficulty: Difficulty) -> Player {
    let arena = config.attack_arena();
    let hitbox = Rect::centered_on(arena.center(), config.player_size, config.player_size);
    Player::new(hitbox, starting_max_hp(difficulty)).with_inventory(default_inventory())
}
