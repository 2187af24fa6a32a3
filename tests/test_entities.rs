use boss_battle::entities::*;
use boss_battle::error::ItemError;
use boss_battle::geometry::{Point, Rect};
use boss_battle::player::*;

fn arena() -> Rect {
    Rect::new(400, 210, 600, 400)
}

fn make_player() -> Player {
    Player::new(Rect::new(688, 398, 25, 25), 100).with_inventory(default_inventory())
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10, 20, 30, 40);
    assert_eq!(r.right(), 40);
    assert_eq!(r.bottom(), 60);
    assert_eq!(r.center(), Point::new(25, 40));
}

#[test]
fn rect_intersection_is_strict() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
    assert!(!a.intersects(&Rect::new(10, 0, 10, 10))); // shared edge only
    assert!(!a.intersects(&Rect::new(0, 0, 0, 10))); // empty
}

#[test]
fn rect_clamped_inside_keeps_size() {
    let outer = arena();
    let r = Rect::new(990, 100, 25, 25).clamped_inside(&outer);
    assert_eq!(r, Rect::new(975, 210, 25, 25));
}

#[test]
fn rect_centered_on() {
    let r = Rect::centered_on(Point::new(100, 100), 20, 10);
    assert_eq!(r, Rect::new(90, 95, 20, 10));
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_bounds_centered_on_position() {
    let b = Bullet::straight(100, 50, 10, 1, 0, 5, BulletTag::Orb);
    assert_eq!(b.bounds(), Rect::new(95, 45, 10, 10));
}

#[test]
fn bullet_advance_applies_velocity() {
    let mut b = Bullet::straight(0, 0, 10, 3, -4, 5, BulletTag::Orb);
    b.advance();
    assert_eq!((b.x, b.y), (3, -4));
}

#[test]
fn bullet_out_of_bounds_uses_size_margin() {
    let area = Rect::new(0, 0, 100, 100);
    let inside = Bullet::straight(-10, 50, 10, 0, 0, 1, BulletTag::Orb);
    let outside = Bullet::straight(-11, 50, 10, 0, 0, 1, BulletTag::Orb);
    assert!(!inside.is_out_of_bounds(&area));
    assert!(outside.is_out_of_bounds(&area));
}

#[test]
fn homing_bullet_aims_at_target() {
    let mut b = Bullet::homing(0, 0, 45, 15, 5.0);
    b.home_toward(Point::new(100, 0));
    assert_eq!((b.vx, b.vy), (5, 0));
    b.home_toward(Point::new(0, -30));
    assert_eq!((b.vx, b.vy), (0, -5));
}

#[test]
fn homing_bullet_on_target_keeps_velocity() {
    let mut b = Bullet::homing(10, 10, 45, 15, 5.0);
    b.home_toward(Point::new(50, 10));
    b.home_toward(Point::new(10, 10));
    assert_eq!((b.vx, b.vy), (5, 0));
}

#[test]
fn straight_bullet_ignores_homing() {
    let mut b = Bullet::straight(0, 0, 10, 1, 1, 5, BulletTag::Orb);
    b.home_toward(Point::new(-100, -100));
    assert_eq!((b.vx, b.vy), (1, 1));
    assert!(!b.is_homing());
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_hp_clamps_both_ways() {
    let mut boss = Boss::new("GREBBORY ANTONY", 100, Rect::new(625, 50, 150, 150));
    boss.damage(150);
    assert_eq!(boss.hp(), 0);
    assert!(boss.is_defeated());
    boss.heal(500);
    assert_eq!(boss.hp(), 100);
}

#[test]
fn boss_can_start_wounded() {
    let boss = Boss::new("GREBBORY ANTONY", 100, Rect::default()).with_hp(30);
    assert_eq!((boss.hp(), boss.max_hp()), (30, 100));
    let boss = Boss::new("GREBBORY ANTONY", 100, Rect::default()).with_hp(500);
    assert_eq!(boss.hp(), 100);
}

#[test]
fn boss_ratio_guards_zero_max() {
    let boss = Boss::new("NOBODY", 0, Rect::default());
    assert_eq!(boss.hp_ratio(), 0.0);
}

// ── Column ────────────────────────────────────────────────────────────────────

#[test]
fn column_rects_follow_position() {
    let a = arena();
    let mut c = Column::new(500, 60, 300, 80);
    assert_eq!(c.top_rect(&a), Rect::new(500, 210, 60, 90));
    assert_eq!(c.bottom_rect(&a), Rect::new(500, 380, 60, 230));

    c.x -= 100;
    assert_eq!(c.top_rect(&a).x, 400);
    assert_eq!(c.bottom_rect(&a).x, 400);
}

#[test]
fn column_gap_lets_target_through() {
    let a = arena();
    let c = Column::new(500, 60, 300, 80);
    assert!(!c.blocks(&a, &Rect::new(510, 320, 25, 25)));
    assert!(c.blocks(&a, &Rect::new(510, 250, 25, 25)));
    assert!(c.blocks(&a, &Rect::new(510, 370, 25, 25)));
}

#[test]
fn column_box_rects_are_centred() {
    let mut c = Column::new(500, 50, 300, 130);
    c.box_size = 40;
    c.box_rows = vec![300, 345, 390];
    let boxes: Vec<Rect> = c.box_rects().collect();
    assert_eq!(boxes[0], Rect::new(505, 300, 40, 40));
    assert_eq!(boxes.len(), 3);
}

// ── Player damage ─────────────────────────────────────────────────────────────

#[test]
fn damage_starts_invincibility_window() {
    let mut p = make_player();
    assert_eq!(p.take_damage(30, 1000), DamageOutcome::Taken(30));
    assert_eq!(p.hp(), 70);
    assert_eq!(p.invincible_until(), 1000 + INVINCIBILITY_MS);
    assert!(p.is_flashing());
}

#[test]
fn damage_inside_window_is_ignored() {
    let mut p = make_player();
    p.take_damage(30, 1000);
    assert_eq!(p.take_damage(30, 1499), DamageOutcome::Ignored);
    assert_eq!(p.hp(), 70);
    // Accepted again exactly at expiry.
    assert_eq!(p.take_damage(30, 1500), DamageOutcome::Taken(30));
    assert_eq!(p.hp(), 40);
}

#[test]
fn damage_clamps_at_zero() {
    let mut p = make_player();
    assert_eq!(p.take_damage(250, 0), DamageOutcome::Taken(100));
    assert_eq!(p.hp(), 0);
    assert!(p.is_dead());
}

#[test]
fn shield_absorbs_two_hits() {
    let mut p = make_player();
    p.cycle_item(true); // Shield Token
    assert_eq!(p.use_selected_item().unwrap(), "Shield Token");
    assert!(p.shield_active());
    assert_eq!(p.shield_charges(), 2);

    assert_eq!(p.take_damage(50, 0), DamageOutcome::Absorbed);
    assert_eq!(p.shield_charges(), 1);
    assert!(p.shield_active());

    assert_eq!(p.take_damage(50, 1000), DamageOutcome::Absorbed);
    assert_eq!(p.hp(), 100);
    assert!(!p.shield_active());

    assert_eq!(p.take_damage(50, 2000), DamageOutcome::Taken(50));
}

#[test]
fn shield_not_spent_while_invincible() {
    let mut p = make_player();
    p.cycle_item(true);
    p.use_selected_item().unwrap();
    p.take_damage(50, 0);
    assert_eq!(p.take_damage(50, 100), DamageOutcome::Ignored);
    assert_eq!(p.shield_charges(), 1);
}

#[test]
fn flash_counts_down() {
    let mut p = make_player();
    p.take_damage(1, 0);
    for _ in 0..FLASH_TICKS {
        p.tick_flash();
    }
    assert!(!p.is_flashing());
}

// ── Player movement ───────────────────────────────────────────────────────────

#[test]
fn move_within_clamps_to_arena() {
    let mut p = make_player();
    let a = arena();
    p.move_within(-1000, 0, &a);
    assert_eq!(p.hitbox().x, a.x);
    p.move_within(0, 1000, &a);
    assert_eq!(p.hitbox().bottom(), a.bottom());
}

#[test]
fn center_in_arena() {
    let mut p = make_player();
    p.move_within(-1000, -1000, &arena());
    p.center_in(&arena());
    assert_eq!(p.hitbox(), Rect::new(688, 398, 25, 25));
}

// ── Inventory ─────────────────────────────────────────────────────────────────

#[test]
fn potion_heals_capped_at_max() {
    let mut p = make_player();
    p.take_damage(10, 0);
    assert_eq!(p.use_selected_item().unwrap(), "Health Potion");
    assert_eq!(p.hp(), 100);
    assert_eq!(p.inventory()[0].quantity(), 2);
}

#[test]
fn power_flask_sets_one_shot_boost() {
    let mut p = make_player();
    p.cycle_item(true);
    p.cycle_item(true);
    p.use_selected_item().unwrap();
    assert_eq!(p.next_attack_boost(), 15);
    assert_eq!(p.take_attack_boost(), 15);
    assert_eq!(p.next_attack_boost(), 0);
}

#[test]
fn resubmission_restores_full_hp() {
    let mut p = make_player();
    p.take_damage(95, 0);
    p.cycle_item(false); // wraps to the last item
    p.use_selected_item().unwrap();
    assert_eq!(p.hp(), 100);
}

#[test]
fn out_of_stock_item_is_rejected_without_effect() {
    let mut p = make_player();
    p.take_damage(20, 0);
    p.cycle_item(true);
    p.use_selected_item().unwrap();
    let err = p.use_selected_item().unwrap_err();
    assert_eq!(err, ItemError::OutOfStock { name: "SHIELD TOKEN".into() });
    assert_eq!(err.to_string(), "YOU HAVE NO SHIELD TOKEN LEFT!");
    assert_eq!(p.hp(), 80);
}

#[test]
fn empty_inventory_is_rejected() {
    let mut p = Player::new(Rect::new(0, 0, 25, 25), 100);
    assert!(!p.has_items());
    assert_eq!(p.use_selected_item(), Err(ItemError::NoItems));
}

#[test]
fn cycle_item_wraps() {
    let mut p = make_player();
    let count = p.inventory().len();
    for _ in 0..count {
        p.cycle_item(true);
    }
    assert_eq!(p.selected_index(), 0);
    p.cycle_item(false);
    assert_eq!(p.selected_index(), count - 1);
}

// ── Difficulty ────────────────────────────────────────────────────────────────

#[test]
fn difficulty_parses_case_insensitively() {
    assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    assert_eq!(Difficulty::Cheat.to_string(), "CHEAT");
    assert_eq!(Difficulty::Easy.previous(), Difficulty::Cheat);
    assert_eq!(Difficulty::Cheat.next(), Difficulty::Easy);
}
