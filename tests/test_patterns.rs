use boss_battle::audio::{Cue, CueSink};
use boss_battle::entities::{Bullet, BulletTag};
use boss_battle::geometry::{Point, Rect};
use boss_battle::patterns::*;
use boss_battle::player::{Player, PlayerForm};

use rand::rngs::StdRng;
use rand::SeedableRng;

const TICK: u64 = 15;

fn arena() -> Rect {
    Rect::new(400, 210, 600, 400)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[derive(Default)]
struct Recorder(Vec<Cue>);

impl CueSink for Recorder {
    fn trigger(&mut self, cue: Cue) {
        self.0.push(cue);
    }
}

/// Owns everything a pattern borrows and hands out a fresh context per call.
struct Rig {
    now: u64,
    cycle: u32,
    player: Player,
    boss_bullets: Vec<Bullet>,
    player_bullets: Vec<Bullet>,
    cues: Recorder,
}

impl Rig {
    fn with_hp(hp: u32) -> Self {
        let mut player = Player::new(Rect::new(0, 0, 25, 25), hp);
        player.center_in(&arena());
        Rig {
            now: 0,
            cycle: 0,
            player,
            boss_bullets: Vec::new(),
            player_bullets: Vec::new(),
            cues: Recorder::default(),
        }
    }

    fn new() -> Self {
        Rig::with_hp(1_000_000)
    }

    fn ctx(&mut self) -> PatternContext<'_> {
        PatternContext {
            now: self.now,
            arena: arena(),
            cycle: self.cycle,
            boss_damage_modifier: 1.0,
            player: &mut self.player,
            boss_bullets: &mut self.boss_bullets,
            player_bullets: &mut self.player_bullets,
            cues: &mut self.cues,
        }
    }

    fn init(&mut self, pattern: &mut dyn AttackPattern) {
        pattern.initialize(&mut self.ctx());
    }

    /// Advance the clock one tick, then execute.
    fn step(&mut self, pattern: &mut dyn AttackPattern) {
        self.now += TICK;
        pattern.execute(&mut self.ctx());
    }

    /// Step until finished; returns the number of ticks taken.
    fn run_to_finish(&mut self, pattern: &mut dyn AttackPattern, max_ticks: u32) -> u32 {
        for n in 1..=max_ticks {
            self.step(pattern);
            assert!(self.player.hp() <= self.player.max_hp());
            if pattern.is_finished() {
                return n;
            }
        }
        panic!("{} did not finish within {} ticks", pattern.name(), max_ticks);
    }

    fn move_player_to(&mut self, x: i32) {
        let dx = x - self.player.hitbox().center().x;
        self.player.move_within(dx, 0, &arena());
    }
}

// ── Shared contract ───────────────────────────────────────────────────────────

#[test]
fn every_pattern_finishes_with_hp_in_range() {
    for mut pattern in standard_rotation(Some(42)) {
        let mut rig = Rig::new();
        rig.init(pattern.as_mut());
        assert!(!pattern.is_finished());
        rig.run_to_finish(pattern.as_mut(), 5000);
        assert!(rig.player.hp() > 0);
    }
}

#[test]
fn rotation_order_is_fixed() {
    let names: Vec<&str> = standard_rotation(Some(1)).iter().map(|p| p.name()).collect();
    assert_eq!(names, ["moving gap", "random projectile", "homing projectile", "vertical laser", "gunner"]);
}

#[test]
fn second_cycle_is_harder_for_every_pattern() {
    for mut pattern in standard_rotation(Some(7)) {
        let mut rig = Rig::new();
        rig.init(pattern.as_mut());
        let base = pattern.tuning();

        rig.cycle = 1;
        rig.init(pattern.as_mut());
        let harder = pattern.tuning();
        assert!(harder.is_harder_than(&base), "{}: {:?} vs {:?}", pattern.name(), harder, base);

        rig.cycle = 4;
        rig.init(pattern.as_mut());
        assert_eq!(pattern.tuning(), harder);
    }
}

#[test]
fn finished_pattern_is_inert() {
    for mut pattern in standard_rotation(Some(3)) {
        let mut rig = Rig::new();
        rig.init(pattern.as_mut());
        rig.run_to_finish(pattern.as_mut(), 5000);

        let hp = rig.player.hp();
        rig.boss_bullets.push(Bullet::straight(700, 400, 10, 0, 0, 5, BulletTag::Orb));
        for _ in 0..50 {
            rig.step(pattern.as_mut());
        }
        assert_eq!(rig.player.hp(), hp);
        assert_eq!(rig.boss_bullets.len(), 1);
    }
}

#[test]
fn scaling_is_pure() {
    assert_eq!(moving_gap::scale_for_cycle(moving_gap::MovingGapConfig::BASE, 0), moving_gap::MovingGapConfig::BASE);
    let hard = moving_gap::scale_for_cycle(moving_gap::MovingGapConfig::BASE, 1);
    assert_eq!((hard.duration_ms, hard.damage, hard.speed, hard.pillar_count), (14000, 25, 10, 16));

    let hard = random_projectile::scale_for_cycle(random_projectile::RandomProjectileConfig::BASE, 1);
    assert_eq!(hard.spawn_cap, 200);

    let hard = homing::scale_for_cycle(homing::HomingConfig::BASE, 2);
    assert_eq!((hard.duration_ms, hard.damage, hard.spawn_interval_ms, hard.spawn_cap), (10000, 25, 1500, 15));

    let hard = vertical_laser::scale_for_cycle(vertical_laser::VerticalLaserConfig::BASE, 1);
    assert_eq!((hard.damage, hard.warning_ms, hard.active_ms), (40, 750, 500));

    let hard = gunner::scale_for_cycle(gunner::GunnerConfig::BASE, 1);
    assert_eq!((hard.duration_ms, hard.damage, hard.speed, hard.column_count), (10000, 25, 6, 10));
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[test]
fn edge_points_lie_on_outline() {
    let mut rng = seeded_rng();
    let a = arena();
    for _ in 0..200 {
        let p = random_edge_point(&mut rng, &a);
        let on_vertical = (p.x == a.x || p.x == a.right()) && p.y >= a.y && p.y <= a.bottom();
        let on_horizontal = (p.y == a.y || p.y == a.bottom()) && p.x >= a.x && p.x <= a.right();
        assert!(on_vertical || on_horizontal, "{:?}", p);
    }
}

#[test]
fn lane_lookup_clamps() {
    let a = arena();
    assert_eq!(lane_width(&a), 100);
    assert_eq!(lane_at(&a, 399), 0);
    assert_eq!(lane_at(&a, 450), 0);
    assert_eq!(lane_at(&a, 700), 3);
    assert_eq!(lane_at(&a, 2000), LANE_COUNT - 1);
    assert_eq!(lane_rect(&a, 5), Rect::new(900, 210, 100, 400));
}

// ── MovingGap ─────────────────────────────────────────────────────────────────

#[test]
fn pillars_scroll_left() {
    let mut pattern = MovingGapAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    assert_eq!(pattern.columns().len(), 8);
    assert_eq!(pattern.columns()[0].x, arena().right() + 200);

    let before = pattern.columns()[0].x;
    rig.step(&mut pattern);
    assert_eq!(pattern.columns()[0].x, before - pattern.config().speed);
}

#[test]
fn pillar_overlay_matches_columns() {
    let mut pattern = MovingGapAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    match pattern.overlay(&arena()) {
        Overlay::Columns(shapes) => {
            assert_eq!(shapes.len(), 8);
            assert_eq!(shapes[0].top, pattern.columns()[0].top_rect(&arena()));
            assert!(shapes[0].boxes.is_empty());
        }
        other => panic!("unexpected overlay {:?}", other),
    }
}

// ── RandomProjectile ──────────────────────────────────────────────────────────

#[test]
fn orbs_spawn_on_interval_and_head_inward() {
    let mut pattern = RandomProjectileAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);

    for _ in 0..6 {
        rig.step(&mut pattern); // 90 ms
    }
    assert_eq!(pattern.spawned(), 0);
    rig.step(&mut pattern); // 105 ms
    assert_eq!(pattern.spawned(), 1);

    let orb = &rig.boss_bullets[0];
    assert_eq!(orb.size, 35);
    assert_eq!(orb.damage, 10);
    assert!((3..=4).contains(&orb.vx.abs()) && (3..=4).contains(&orb.vy.abs()));
}

#[test]
fn random_projectile_stops_at_cap() {
    let mut pattern = RandomProjectileAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    rig.run_to_finish(&mut pattern, 5000);
    assert_eq!(pattern.spawned(), 100);
    assert!(rig.boss_bullets.is_empty());
}

// ── HomingProjectile ──────────────────────────────────────────────────────────

#[test]
fn homing_warns_then_bursts_five() {
    let mut pattern = HomingProjectileAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    assert!(rig.cues.0.contains(&Cue::HomingWarning));
    assert_eq!(pattern.overlay(&arena()), Overlay::Warning(Some(Point::new(700, 390))));

    while rig.now + TICK < homing::WARNING_DELAY_MS {
        rig.step(&mut pattern);
        assert!(rig.boss_bullets.is_empty());
    }
    rig.step(&mut pattern);
    assert!(pattern.has_launched());
    assert_eq!(rig.boss_bullets.len(), 5);
    assert_eq!(pattern.spawned(), 5);
    assert!(rig.boss_bullets.iter().all(Bullet::is_homing));
    assert_eq!(pattern.warning(), None);
    assert!(rig.cues.0.contains(&Cue::HomingLaunch));
}

#[test]
fn warning_marker_blinks() {
    let mut pattern = HomingProjectileAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    rig.now = 600 - TICK;
    rig.step(&mut pattern);
    assert_eq!(pattern.warning(), None);
    rig.now = 1100 - TICK;
    rig.step(&mut pattern);
    assert!(pattern.warning().is_some());
}

#[test]
fn seekers_reaim_every_tick() {
    let mut pattern = HomingProjectileAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    rig.now = homing::WARNING_DELAY_MS - TICK;
    rig.step(&mut pattern);
    assert_eq!(rig.boss_bullets.len(), 5);

    for _ in 0..3 {
        let target = rig.player.hitbox().center();
        let mut expected = rig.boss_bullets.clone();
        for b in &mut expected {
            b.home_toward(target);
            b.advance();
        }
        rig.step(&mut pattern);
        assert_eq!(rig.boss_bullets, expected);
    }
}

#[test]
fn homing_respects_duration() {
    let mut pattern = HomingProjectileAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    let ticks = rig.run_to_finish(&mut pattern, 5000) as u64;
    assert!(ticks * TICK <= pattern.config().duration_ms + TICK);
}

// ── VerticalLaser ─────────────────────────────────────────────────────────────

#[test]
fn steps_light_three_distinct_lanes() {
    let mut pattern = VerticalLaserAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    let lanes = pattern.lanes().to_vec();
    assert_eq!(lanes.len(), 3);
    assert!(lanes.windows(2).all(|w| w[0] < w[1]));
    assert!(lanes.iter().all(|&l| l < LANE_COUNT));
    assert!(!pattern.is_firing());
    assert_eq!(pattern.step(), Some(0));
}

#[test]
fn laser_damages_only_after_lighting_up() {
    let mut pattern = VerticalLaserAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    let lane = pattern.lanes()[0];
    rig.move_player_to(lane_rect(&arena(), lane).center().x);
    let hp = rig.player.hp();

    rig.now = 1500 - TICK;
    rig.step(&mut pattern);
    assert!(pattern.is_firing());
    assert_eq!(rig.player.hp(), hp);
    assert!(rig.cues.0.contains(&Cue::LaserFire));

    rig.step(&mut pattern);
    assert_eq!(rig.player.hp(), hp - 30);
    assert!(rig.cues.0.contains(&Cue::DamageTaken));
}

#[test]
fn final_phase_locks_onto_player_lane() {
    let mut pattern = VerticalLaserAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    while !pattern.in_final_phase() {
        rig.step(&mut pattern);
    }
    let here = lane_at(&arena(), rig.player.hitbox().center().x);
    assert_eq!(pattern.lanes(), [here]);

    // Moving away during the warning does not drag the beam along.
    rig.move_player_to(arena().x);
    rig.step(&mut pattern);
    assert_eq!(pattern.lanes(), [here]);

    // The next warning picks up the new position.
    while !pattern.is_firing() {
        rig.step(&mut pattern);
    }
    while pattern.is_firing() {
        rig.step(&mut pattern);
    }
    assert_eq!(pattern.lanes(), [0]);
}

#[test]
fn lane_overlay_reports_warning_state() {
    let mut pattern = VerticalLaserAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    match pattern.overlay(&arena()) {
        Overlay::Lanes(lanes) => {
            assert_eq!(lanes.len(), 3);
            assert!(lanes.iter().all(|l| !l.active));
            assert_eq!(lanes[0].rect, lane_rect(&arena(), lanes[0].lane));
        }
        other => panic!("unexpected overlay {:?}", other),
    }
}

#[test]
fn lethal_hit_finishes_and_discards_bullets() {
    let mut pattern = VerticalLaserAttack::new(seeded_rng());
    let mut rig = Rig::with_hp(10);
    rig.init(&mut pattern);
    let lane = pattern.lanes()[0];
    rig.move_player_to(lane_rect(&arena(), lane).center().x);
    rig.boss_bullets.push(Bullet::straight(0, 0, 10, 0, 0, 1, BulletTag::Orb));

    rig.now = 1500;
    pattern.execute(&mut rig.ctx());
    rig.step(&mut pattern);
    assert!(rig.player.is_dead());
    assert!(pattern.is_finished());
    assert!(rig.boss_bullets.is_empty());
}

// ── Gunner ────────────────────────────────────────────────────────────────────

#[test]
fn gunner_turns_player_into_ship() {
    let mut pattern = GunnerAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.player_bullets.push(Bullet::straight(0, 0, 10, 0, 0, 0, BulletTag::PlayerShot));
    rig.init(&mut pattern);
    assert_eq!(rig.player.form(), PlayerForm::Ship);
    assert!(pattern.allows_shooting());
    assert!(rig.player_bullets.is_empty());
    assert_eq!(pattern.columns().len(), 5);
    assert!(pattern.columns().iter().all(|c| c.box_rows.len() == 3));

    rig.run_to_finish(&mut pattern, 5000);
    assert_eq!(rig.player.form(), PlayerForm::Soul);
    assert!(!pattern.allows_shooting());
}

#[test]
fn shot_breaks_exactly_one_box() {
    let mut pattern = GunnerAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    let column = pattern.columns()[0].clone();
    let target = column.box_rect(column.box_rows[1]).center();
    rig.player_bullets.push(Bullet::straight(target.x, target.y, 10, 10, 0, 0, BulletTag::PlayerShot));

    rig.step(&mut pattern);
    assert!(rig.player_bullets.is_empty());
    assert_eq!(pattern.columns()[0].box_rows.len(), 2);
    assert!(!pattern.columns()[0].box_rows.contains(&column.box_rows[1]));
}

#[test]
fn pillar_absorbs_shot_without_breaking() {
    let mut pattern = GunnerAttack::new(seeded_rng());
    let mut rig = Rig::new();
    rig.init(&mut pattern);
    let index = pattern
        .columns()
        .iter()
        .position(|c| c.bottom_rect(&arena()).height >= 20)
        .expect("some column has a solid bottom half");
    let bottom = pattern.columns()[index].bottom_rect(&arena());
    let at = bottom.center();
    rig.player_bullets.push(Bullet::straight(at.x, at.y, 10, 10, 0, 0, BulletTag::PlayerShot));

    rig.step(&mut pattern);
    assert!(rig.player_bullets.is_empty());
    assert_eq!(pattern.columns()[index].box_rows.len(), 3);
}

#[test]
fn player_shot_leaves_the_nose() {
    let hitbox = Rect::new(100, 100, 25, 25);
    let shot = gunner::player_shot(&hitbox);
    assert_eq!(shot.tag, BulletTag::PlayerShot);
    assert_eq!(shot.bounds().x, hitbox.right());
    assert_eq!(shot.y, hitbox.center().y);
    assert_eq!((shot.vx, shot.vy), (gunner::SHOT_SPEED, 0));
}
