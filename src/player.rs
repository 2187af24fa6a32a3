//! The player's combat entity: hitbox, HP, damage resolution and inventory.

use crate::entities::{Item, ItemEffect};
use crate::error::ItemError;
use crate::geometry::Rect;

/// Length of the post-hit invincibility window.
pub const INVINCIBILITY_MS: u64 = 500;
/// Ticks the sprite flashes after an accepted hit.
pub const FLASH_TICKS: u32 = 30;

/// Which sprite set the renderer should use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerForm {
    #[default]
    Soul,
    /// Mobile gunship used while shooting is allowed.
    Ship,
}

/// Result of one damage event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Inside the invincibility window; nothing changed.
    Ignored,
    /// A shield charge was spent and the damage forced to zero.
    Absorbed,
    /// HP was reduced by the given amount (after clamping at zero).
    Taken(u32),
}

/// The fixed starting inventory.
pub fn default_inventory() -> Vec<Item> {
    vec![
        Item::new("Health Potion", "Heals 40 HP.", ItemEffect::Heal(40), 3),
        Item::new(
            "Shield Token",
            "Nullifies all damage twice.",
            ItemEffect::Shield { charges: 2 },
            1,
        ),
        Item::new(
            "Power Flask",
            "Your next attack deals +150% damage.",
            ItemEffect::AttackBoost(15),
            2,
        ),
        Item::new(
            "Grebbory's Assignment Resubmission",
            "Heals all missing HP.",
            ItemEffect::FullHeal,
            1,
        ),
    ]
}

#[derive(Clone, Debug)]
pub struct Player {
    hitbox: Rect,
    hp: u32,
    max_hp: u32,
    invincible_until: u64,
    next_attack_boost: u32,
    flash_ticks: u32,
    items: Vec<Item>,
    selected_item: usize,
    shield_active: bool,
    shield_charges: u32,
    form: PlayerForm,
}

impl Player {
    pub fn new(hitbox: Rect, max_hp: u32) -> Self {
        Player {
            hitbox,
            hp: max_hp,
            max_hp,
            invincible_until: 0,
            next_attack_boost: 0,
            flash_ticks: 0,
            items: Vec::new(),
            selected_item: 0,
            shield_active: false,
            shield_charges: 0,
            form: PlayerForm::Soul,
        }
    }

    pub fn with_inventory(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self.selected_item = 0;
        self
    }

    // ── Health ───────────────────────────────────────────────────────────────

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    pub fn is_invincible(&self, now: u64) -> bool {
        now < self.invincible_until
    }

    pub fn invincible_until(&self) -> u64 {
        self.invincible_until
    }

    /// Resolve one damage event at wall-clock `now` (ms).
    ///
    /// Inside the invincibility window the event is dropped entirely.  Otherwise
    /// a live shield forces the amount to zero and spends one charge, and the
    /// window restarts either way.
    pub fn take_damage(&mut self, amount: u32, now: u64) -> DamageOutcome {
        if self.is_invincible(now) {
            return DamageOutcome::Ignored;
        }

        self.invincible_until = now + INVINCIBILITY_MS;
        self.flash_ticks = FLASH_TICKS;

        if self.shield_active {
            self.shield_charges = self.shield_charges.saturating_sub(1);
            if self.shield_charges == 0 {
                self.shield_active = false;
            }
            return DamageOutcome::Absorbed;
        }

        let taken = amount.min(self.hp);
        self.hp -= taken;
        DamageOutcome::Taken(taken)
    }

    fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    // ── Shield & attack boost ────────────────────────────────────────────────

    pub fn shield_active(&self) -> bool {
        self.shield_active
    }

    pub fn shield_charges(&self) -> u32 {
        self.shield_charges
    }

    pub fn next_attack_boost(&self) -> u32 {
        self.next_attack_boost
    }

    /// Hand the pending boost to a FIGHT computation, clearing it.
    pub fn take_attack_boost(&mut self) -> u32 {
        std::mem::take(&mut self.next_attack_boost)
    }

    // ── Position ─────────────────────────────────────────────────────────────

    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    /// Move by (dx, dy), then clamp the hitbox inside `arena`.
    pub fn move_within(&mut self, dx: i32, dy: i32, arena: &Rect) {
        self.hitbox = self.hitbox.translated(dx, dy).clamped_inside(arena);
    }

    pub fn center_in(&mut self, arena: &Rect) {
        self.hitbox.x = arena.x + arena.width / 2 - self.hitbox.width / 2;
        self.hitbox.y = arena.y + arena.height / 2 - self.hitbox.height / 2;
    }

    // ── Visuals ──────────────────────────────────────────────────────────────

    pub fn form(&self) -> PlayerForm {
        self.form
    }

    pub fn set_form(&mut self, form: PlayerForm) {
        self.form = form;
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_ticks > 0
    }

    pub fn flash_ticks(&self) -> u32 {
        self.flash_ticks
    }

    pub fn tick_flash(&mut self) {
        self.flash_ticks = self.flash_ticks.saturating_sub(1);
    }

    // ── Inventory ────────────────────────────────────────────────────────────

    pub fn inventory(&self) -> &[Item] {
        &self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected_item
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.items.get(self.selected_item)
    }

    /// Any item with quantity left?
    pub fn has_items(&self) -> bool {
        self.items.iter().any(|i| i.quantity() > 0)
    }

    pub fn cycle_item(&mut self, forward: bool) {
        let count = self.items.len();
        if count == 0 {
            return;
        }
        self.selected_item = if forward {
            (self.selected_item + 1) % count
        } else {
            (self.selected_item + count - 1) % count
        };
    }

    /// Consume one unit of the selected item and apply it.  Returns the item's
    /// name on success; on failure nothing changes.
    pub fn use_selected_item(&mut self) -> Result<String, ItemError> {
        if !self.has_items() {
            return Err(ItemError::NoItems);
        }
        let item = self.items.get_mut(self.selected_item).ok_or(ItemError::NoItems)?;
        if !item.use_one() {
            return Err(ItemError::OutOfStock { name: item.name.to_uppercase() });
        }
        let effect = item.effect;
        let name = item.name.clone();

        match effect {
            ItemEffect::Heal(amount) => self.heal(amount),
            ItemEffect::FullHeal => self.hp = self.max_hp,
            ItemEffect::Shield { charges } => {
                self.shield_active = charges > 0;
                self.shield_charges = charges;
            }
            ItemEffect::AttackBoost(boost) => self.next_attack_boost = boost,
        }
        Ok(name)
    }
}
