//! Headless match world: characters, projectiles, scoreboard.

use crate::bot::Bot;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{EntityId, Profile, Vec3};
use sim::input::VirtualStick;
use sim::physics::{BodyTag, DampedBody, PhysicsBody};
use sim::spawn::SpawnTable;
use sim::store::{NetworkStateStore, Role};
use sim::{CharacterController, ProjectileSpawn, SimEvent, StoreError};
use std::collections::HashMap;
use std::f32::consts::TAU;
use std::sync::Arc;

const BOT_COLORS: [&str; 8] = [
    "blue", "red", "green", "purple", "orange", "cyan", "magenta", "yellow",
];

/// Gameplay tuning for projectiles fired in the arena.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileTuning {
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Health removed per hit.
    pub damage: i32,
    /// Lifetime before despawn.
    pub life_ms: u64,
    /// Horizontal distance that counts as a hit.
    pub hit_radius: f32,
    /// Forward offset of the muzzle from the character origin.
    pub muzzle_offset: f32,
    /// Vertical offset of the muzzle.
    pub muzzle_height: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 30.0,
            damage: 30,
            life_ms: 2000,
            hit_radius: 1.8,
            muzzle_offset: 0.8,
            muzzle_height: 1.4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub shooter: EntityId,
    pub damage: i32,
    pub expires_ms: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub kills: u32,
    pub deaths: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct WorldConfig {
    pub seed: u64,
    pub tuning: ProjectileTuning,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            tuning: ProjectileTuning::default(),
        }
    }
}

struct CharacterSlot {
    controller: CharacterController<VirtualStick, DampedBody>,
    bot: Option<Bot>,
}

/// One local match. Every character here is hosted by this process, which
/// is exactly the original's topology: each participant is authoritative
/// for its own entity.
pub struct World {
    store: NetworkStateStore,
    spawns: Arc<SpawnTable>,
    characters: Vec<CharacterSlot>,
    projectiles: Vec<Projectile>,
    scoreboard: HashMap<EntityId, Score>,
    tuning: ProjectileTuning,
    rng: StdRng,
    next_id: EntityId,
    now_ms: u64,
}

/// Evenly spaced spawn markers on a circle, the default arena layout.
pub fn spawn_ring(count: usize, radius: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            Vec3::new(radius * angle.sin(), 0.0, radius * angle.cos())
        })
        .collect()
}

impl World {
    pub fn new(spawns: SpawnTable, config: WorldConfig) -> Self {
        Self {
            store: NetworkStateStore::new(),
            spawns: Arc::new(spawns),
            characters: Vec::new(),
            projectiles: Vec::new(),
            scoreboard: HashMap::new(),
            tuning: config.tuning,
            rng: StdRng::seed_from_u64(config.seed),
            next_id: 1,
            now_ms: 0,
        }
    }

    /// Adds a bot-driven character.
    pub fn add_bot(&mut self, name: &str) -> Result<EntityId, StoreError> {
        self.add(name, Some(Bot::new()))
    }

    /// Adds a character whose stick is driven externally, for tests and
    /// manual scenarios.
    pub fn add_character(&mut self, name: &str) -> Result<EntityId, StoreError> {
        self.add(name, None)
    }

    fn add(&mut self, name: &str, bot: Option<Bot>) -> Result<EntityId, StoreError> {
        let id = self.next_id;
        self.next_id += 1;

        let color = BOT_COLORS[(id as usize - 1) % BOT_COLORS.len()];
        let controller = CharacterController::new(
            id,
            Profile::new(name, color),
            VirtualStick::new(),
            DampedBody::new(Vec3::default()),
            self.store.handle(id, Role::Host),
            Arc::clone(&self.spawns),
            StdRng::seed_from_u64(self.rng.gen()),
        )?;

        self.scoreboard.insert(id, Score::default());
        self.characters.push(CharacterSlot { controller, bot });
        Ok(id)
    }

    pub fn store(&self) -> &NetworkStateStore {
        &self.store
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn scoreboard(&self) -> &HashMap<EntityId, Score> {
        &self.scoreboard
    }

    pub fn character(
        &self,
        id: EntityId,
    ) -> Option<&CharacterController<VirtualStick, DampedBody>> {
        self.characters
            .iter()
            .map(|slot| &slot.controller)
            .find(|c| c.id() == id)
    }

    pub fn character_mut(
        &mut self,
        id: EntityId,
    ) -> Option<&mut CharacterController<VirtualStick, DampedBody>> {
        self.characters
            .iter_mut()
            .map(|slot| &mut slot.controller)
            .find(|c| c.id() == id)
    }

    /// Advances the whole match by one tick of `dt` seconds and returns
    /// the simulation events it produced.
    pub fn tick(&mut self, dt: f32) -> Result<Vec<SimEvent>, StoreError> {
        self.now_ms += (dt * 1000.0).round() as u64;
        let now_ms = self.now_ms;

        let mut events = Vec::new();
        for slot in &mut self.characters {
            if let Some(bot) = slot.bot.as_mut() {
                bot.drive(slot.controller.device_mut(), now_ms, &mut self.rng);
            }
            events.extend(slot.controller.tick(dt, now_ms)?);
        }

        for event in &events {
            match event {
                SimEvent::Fired(spawn) => self.spawn_projectile(spawn),
                SimEvent::Killed { victim, shooter } => {
                    info!("kill: {} -> {}", shooter, victim);
                    self.scoreboard.entry(*shooter).or_default().kills += 1;
                    self.scoreboard.entry(*victim).or_default().deaths += 1;
                }
            }
        }

        self.advance_projectiles(dt);

        for slot in &mut self.characters {
            slot.controller.body_mut().step(dt);
        }

        Ok(events)
    }

    fn spawn_projectile(&mut self, spawn: &ProjectileSpawn) {
        let forward = Vec3::new(spawn.angle.sin(), 0.0, spawn.angle.cos());
        let muzzle = spawn
            .position
            .add(&forward.scale(self.tuning.muzzle_offset))
            .add(&Vec3::new(0.0, self.tuning.muzzle_height, 0.0));

        debug!("projectile {} spawned by {}", spawn.id, spawn.owner);
        self.projectiles.push(Projectile {
            id: spawn.id.clone(),
            position: muzzle,
            velocity: forward.scale(self.tuning.speed),
            shooter: spawn.owner,
            damage: self.tuning.damage,
            expires_ms: self.now_ms + self.tuning.life_ms,
        });
    }

    /// Integrates projectiles and turns overlaps into contact events on
    /// the victim's body. The contact is resolved by the victim's own
    /// controller on its next tick, never here.
    fn advance_projectiles(&mut self, dt: f32) {
        let now_ms = self.now_ms;
        let tuning = self.tuning;
        let projectiles = std::mem::take(&mut self.projectiles);
        let mut live = Vec::with_capacity(projectiles.len());

        'bullets: for mut projectile in projectiles {
            projectile.position = projectile.position.add(&projectile.velocity.scale(dt));
            if now_ms >= projectile.expires_ms {
                continue;
            }

            for slot in &mut self.characters {
                let controller = &mut slot.controller;
                if controller.id() == projectile.shooter || controller.handle().dead() {
                    continue;
                }
                let body = controller.body_mut();
                if !body.is_enabled() {
                    continue;
                }
                let distance = body.translation().horizontal_distance(&projectile.position);
                if distance <= tuning.hit_radius {
                    debug!(
                        "projectile {} hit entity {}",
                        projectile.id,
                        controller.id()
                    );
                    body.queue_contact(BodyTag::Projectile {
                        damage: projectile.damage,
                        shooter: projectile.shooter,
                    });
                    continue 'bullets;
                }
            }

            live.push(projectile);
        }

        self.projectiles = live;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim::input::FIRE_BUTTON;
    use sim::store::Role;

    fn world() -> World {
        World::new(
            SpawnTable::new(spawn_ring(8, 12.0)).unwrap(),
            WorldConfig::default(),
        )
    }

    /// Places a shooter at the origin facing +z and a target down range.
    fn face_off(world: &mut World) -> (EntityId, EntityId) {
        let shooter = world.add_character("shooter").unwrap();
        let target = world.add_character("target").unwrap();

        world
            .character_mut(shooter)
            .unwrap()
            .body_mut()
            .set_translation(Vec3::default());
        world
            .character_mut(target)
            .unwrap()
            .body_mut()
            .set_translation(Vec3::new(0.0, 0.0, 6.0));
        (shooter, target)
    }

    #[test]
    fn test_spawn_ring_layout() {
        let ring = spawn_ring(4, 10.0);
        assert_eq!(ring.len(), 4);
        for point in &ring {
            assert!((point.horizontal_distance(&Vec3::default()) - 10.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_fired_event_becomes_projectile() {
        let mut world = world();
        let (shooter, _) = face_off(&mut world);

        world
            .character_mut(shooter)
            .unwrap()
            .device_mut()
            .press(FIRE_BUTTON);
        world.tick(0.016).unwrap();

        assert_eq!(world.projectiles().len(), 1);
        assert_eq!(world.projectiles()[0].shooter, shooter);
    }

    #[test]
    fn test_projectile_hit_registers_on_target() {
        let mut world = world();
        let (shooter, target) = face_off(&mut world);

        world
            .character_mut(shooter)
            .unwrap()
            .device_mut()
            .press(FIRE_BUTTON);
        world.tick(0.016).unwrap();
        world
            .character_mut(shooter)
            .unwrap()
            .device_mut()
            .release_button(FIRE_BUTTON);

        for _ in 0..30 {
            world.tick(0.016).unwrap();
        }

        let handle = world.store().handle(target, Role::Observer);
        assert_eq!(handle.hits(), 1);
        assert!(handle.health() < shared::MAX_HEALTH);
        assert!(world.projectiles().is_empty());
    }

    #[test]
    fn test_sustained_fire_kills_and_scores() {
        let mut world = world();
        let (shooter, target) = face_off(&mut world);

        world
            .character_mut(shooter)
            .unwrap()
            .device_mut()
            .press(FIRE_BUTTON);

        let mut killed = false;
        for _ in 0..400 {
            let events = world.tick(0.016).unwrap();
            if events.iter().any(|e| {
                matches!(e, SimEvent::Killed { victim, shooter: s } if *victim == target && *s == shooter)
            }) {
                killed = true;
                break;
            }
        }
        assert!(killed);

        let scores = world.scoreboard();
        assert_eq!(scores[&shooter].kills, 1);
        assert_eq!(scores[&target].deaths, 1);
        assert_eq!(scores[&shooter].deaths, 0);

        let handle = world.store().handle(target, Role::Observer);
        assert!(handle.dead());
        assert_eq!(handle.health(), 0);
    }

    #[test]
    fn test_projectiles_expire() {
        let mut world = world();
        let shooter = world.add_character("lonely").unwrap();

        world
            .character_mut(shooter)
            .unwrap()
            .device_mut()
            .press(FIRE_BUTTON);
        world.tick(0.016).unwrap();
        world
            .character_mut(shooter)
            .unwrap()
            .device_mut()
            .release_button(FIRE_BUTTON);
        assert_eq!(world.projectiles().len(), 1);

        for _ in 0..150 {
            world.tick(0.016).unwrap();
        }
        assert!(world.projectiles().is_empty());
    }

    #[test]
    fn test_own_projectiles_pass_through_shooter() {
        let mut world = world();
        let shooter = world.add_character("lonely").unwrap();

        world
            .character_mut(shooter)
            .unwrap()
            .device_mut()
            .press(FIRE_BUTTON);
        for _ in 0..10 {
            world.tick(0.016).unwrap();
        }

        let handle = world.store().handle(shooter, Role::Observer);
        assert_eq!(handle.hits(), 0);
    }
}
