//! Fixed-capacity sprite pools.
//!
//! Each pool pre-allocates every slot at scene setup and satisfies
//! spawn requests by linear scan for an inactive slot. Exhaustion is a
//! routine outcome (`None`), not an error: the caller simply skips
//! spawning this tick. Slots are never freed during a session.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use honk_core::constants::*;
use honk_core::enums::SpriteKind;
use honk_core::sprite::Sprite;
use honk_core::templates::{require_template, SetupError};

/// All sprites of one kind.
#[derive(Debug, Clone)]
pub struct SpritePool {
    kind: SpriteKind,
    sprites: Vec<Sprite>,
}

impl SpritePool {
    /// Pre-fill a pool to its template capacity, all slots parked.
    /// Fails fast if the kind has no template configured.
    pub fn prefill(kind: SpriteKind, next_id: &mut u32) -> Result<Self, SetupError> {
        let template = require_template(kind)?;
        let mut sprites = Vec::with_capacity(template.capacity);
        for _ in 0..template.capacity {
            sprites.push(Sprite::parked(*next_id, kind, template.size(), template.z));
            *next_id += 1;
        }
        Ok(Self { kind, sprites })
    }

    pub fn kind(&self) -> SpriteKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.sprites.len()
    }

    pub fn active_count(&self) -> usize {
        self.sprites.iter().filter(|s| s.active).count()
    }

    pub fn has_active(&self) -> bool {
        self.sprites.iter().any(|s| s.active)
    }

    /// Activate the first inactive slot and reset it to spawn defaults.
    /// Returns `None` when every slot is active (capacity exhausted).
    pub fn acquire(&mut self, rng: &mut ChaCha8Rng) -> Option<&mut Sprite> {
        let kind = self.kind;
        let sprite = self.sprites.iter_mut().find(|s| !s.active)?;
        reset_for_spawn(sprite, kind, rng);
        Some(sprite)
    }

    /// Deactivate and park a sprite. Releasing an inactive or unknown
    /// id is a no-op.
    pub fn release(&mut self, id: u32) {
        if let Some(sprite) = self.sprites.iter_mut().find(|s| s.id == id) {
            sprite.park();
        }
    }

    pub fn get(&self, id: u32) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.id == id)
    }

    pub fn first_active(&self) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.active)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(|s| s.active)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Sprite> {
        self.sprites.iter_mut().filter(|s| s.active)
    }

    /// Park every slot (session teardown / restart).
    pub fn park_all(&mut self) {
        for sprite in &mut self.sprites {
            sprite.park();
        }
    }
}

/// Every pool, indexed by [`SpriteKind::ALL`] order.
#[derive(Debug, Clone)]
pub struct Pools {
    pools: Vec<SpritePool>,
}

impl Pools {
    /// Pre-fill one pool per kind. Fails fast on a missing template.
    pub fn new() -> Result<Self, SetupError> {
        let mut next_id = 0;
        let mut pools = Vec::with_capacity(SpriteKind::ALL.len());
        for kind in SpriteKind::ALL {
            pools.push(SpritePool::prefill(kind, &mut next_id)?);
        }
        Ok(Self { pools })
    }

    pub fn get(&self, kind: SpriteKind) -> &SpritePool {
        &self.pools[kind.index()]
    }

    pub fn get_mut(&mut self, kind: SpriteKind) -> &mut SpritePool {
        &mut self.pools[kind.index()]
    }

    /// A copy of the active player sprite, if any.
    pub fn player(&self) -> Option<Sprite> {
        self.get(SpriteKind::Player).first_active().cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpritePool> {
        self.pools.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SpritePool> {
        self.pools.iter_mut()
    }

    pub fn park_all(&mut self) {
        for pool in &mut self.pools {
            pool.park_all();
        }
    }
}

/// Reset a slot to its kind-specific spawn defaults.
///
/// Every auxiliary field is overwritten here so a recycled slot never
/// leaks state from its previous activation.
fn reset_for_spawn(sprite: &mut Sprite, kind: SpriteKind, rng: &mut ChaCha8Rng) {
    let template = honk_core::templates::template(kind).expect("pool was prefilled from template");

    sprite.active = true;
    sprite.size = template.size();
    sprite.z = template.z;
    sprite.template_index = rng.gen_range(0..template.variants);
    sprite.opacity = 1.0;
    sprite.rotation = 0.0;
    sprite.scale = 1.0;
    sprite.speed_offset = 0.0;
    sprite.isometric_displacement = 0.0;
    sprite.health = 0.0;
    sprite.will_honk = false;
    sprite.honk_delay = 0.0;
    sprite.blast_delay = 0.0;
    sprite.is_blasting = false;
    sprite.is_attacking = false;
    sprite.movement_pattern = Default::default();
    sprite.movement_direction = Default::default();
    sprite.pattern_change_delay = 0.0;
    sprite.hover_delay = 0.0;
    sprite.attached_to = None;
    sprite.seek_target = None;

    match kind {
        SpriteKind::Player => {
            sprite.health = PLAYER_MAX_HEALTH;
        }
        SpriteKind::Vehicle => {
            sprite.isometric_displacement = ISOMETRIC_DISPLACEMENT;
            // Lower bound keeps net speed at least 1 px/tick, so a
            // fresh vehicle always drifts onto the scene instead of
            // backing off its top-edge entry position.
            sprite.speed_offset =
                rng.gen_range(-(DEFAULT_SCENE_SPEED - 1.0)..DEFAULT_SPEED_OFFSET - 1.0);
            sprite.will_honk = rng.gen_bool(0.5);
            if sprite.will_honk {
                sprite.honk_delay = rng.gen_range(HONK_DELAY_MIN..HONK_DELAY_MAX);
            }
        }
        SpriteKind::RoadMark
        | SpriteKind::RoadSideTree
        | SpriteKind::RoadSideHedge
        | SpriteKind::RoadSideLamp
        | SpriteKind::RoadSideBillboard => {
            sprite.isometric_displacement = ISOMETRIC_DISPLACEMENT;
            sprite.speed_offset = DEFAULT_SPEED_OFFSET;
        }
        SpriteKind::Cloud => {
            sprite.isometric_displacement = ISOMETRIC_DISPLACEMENT;
            sprite.speed_offset = rng.gen_range(1.0..4.0);
        }
        SpriteKind::Honk => {
            sprite.rotation = rng.gen_range(-30.0..30.0);
        }
        SpriteKind::PlayerRocket | SpriteKind::PlayerFireCracker => {
            sprite.speed_offset = DEFAULT_SPEED_OFFSET + 2.0;
            sprite.blast_delay = ROCKET_BLAST_DELAY;
        }
        SpriteKind::PlayerRocketSeeking => {
            sprite.speed_offset = DEFAULT_SPEED_OFFSET + 2.0;
            sprite.blast_delay = ROCKET_BLAST_DELAY * 2.0;
        }
        SpriteKind::UfoEnemy => {
            sprite.isometric_displacement = ISOMETRIC_DISPLACEMENT;
            sprite.speed_offset = rng.gen_range(-2.0..2.0);
            sprite.health = BOSS_HIT_LOSS * 2.0;
            sprite.will_honk = rng.gen_bool(0.5);
            if sprite.will_honk {
                sprite.honk_delay = rng.gen_range(HONK_DELAY_MIN..HONK_DELAY_MAX);
            }
        }
        SpriteKind::UfoEnemyRocket
        | SpriteKind::UfoBossRocket
        | SpriteKind::VehicleBossRocket => {
            sprite.speed_offset = DEFAULT_SPEED_OFFSET - 2.0;
            sprite.blast_delay = ROCKET_BLAST_DELAY;
        }
        SpriteKind::UfoBossRocketSeeking => {
            sprite.speed_offset = DEFAULT_SPEED_OFFSET - 4.0;
            sprite.blast_delay = ROCKET_BLAST_DELAY * 2.0;
        }
        SpriteKind::UfoBoss | SpriteKind::VehicleBoss => {
            sprite.hover_delay = BOSS_HOVER_DELAY;
            // Health and pattern are set by the boss release path,
            // scaled from the difficulty threshold.
        }
        SpriteKind::HealthPickup | SpriteKind::PowerUpPickup => {
            sprite.isometric_displacement = ISOMETRIC_DISPLACEMENT;
            sprite.speed_offset = 1.0;
        }
        SpriteKind::DropShadow => {}
    }
}
