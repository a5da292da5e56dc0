//! Scene engine — the core of the game.
//!
//! `Scene` owns the sprite pools, processes player commands, runs the
//! tick pipeline, and produces `SceneSnapshot`s. Completely headless
//! (no timer, renderer, or audio dependency), enabling deterministic
//! testing: the external timer facility just calls `tick` at a fixed
//! interval.

use std::collections::VecDeque;

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use honk_core::commands::PlayerCommand;
use honk_core::constants::*;
use honk_core::enums::{ScenePhase, SpriteKind};
use honk_core::events::AudioEvent;
use honk_core::state::SceneSnapshot;
use honk_core::templates::SetupError;
use honk_core::types::{SceneBounds, SimTime};

use crate::pool::Pools;
use crate::scene_setup;
use crate::systems;
use crate::systems::gameplay::GameplayState;
use crate::systems::movement::{InputState, MoveState};
use crate::systems::snapshot::SnapshotInput;
use crate::systems::spawn::SpawnState;
use crate::threshold::Difficulty;

/// Configuration for a new scene.
pub struct SceneConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    pub bounds: SceneBounds,
    /// Global scene speed in pixels per tick.
    pub scene_speed: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bounds: SceneBounds::default(),
            scene_speed: DEFAULT_SCENE_SPEED,
        }
    }
}

/// The scene engine. Owns the pools and all session state.
pub struct Scene {
    pools: Pools,
    generators: Vec<crate::generator::Generator>,
    time: SimTime,
    phase: ScenePhase,
    bounds: SceneBounds,
    scene_speed: f64,
    rng: ChaCha8Rng,
    score: u32,
    powerup_charges: u32,
    slow_motion_ticks: u32,
    difficulty: Difficulty,
    boss_max_health: f64,
    input: InputState,
    command_queue: VecDeque<PlayerCommand>,
    recycle_buffer: Vec<(SpriteKind, u32)>,
    audio_events: Vec<AudioEvent>,
}

impl Scene {
    /// Create a new scene with all pools pre-filled. Fails fast on a
    /// missing sprite template.
    pub fn new(config: SceneConfig) -> Result<Self, SetupError> {
        Ok(Self {
            pools: Pools::new()?,
            generators: crate::generator::generator_table(),
            time: SimTime::default(),
            phase: ScenePhase::default(),
            bounds: config.bounds,
            scene_speed: config.scene_speed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            score: 0,
            powerup_charges: 0,
            slow_motion_ticks: 0,
            difficulty: Difficulty::new(),
            boss_max_health: 0.0,
            input: InputState::default(),
            command_queue: VecDeque::new(),
            recycle_buffer: Vec::new(),
            audio_events: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the scene by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SceneSnapshot {
        self.process_commands();

        if self.phase == ScenePhase::Running {
            self.run_systems();
            self.time.advance();
            self.slow_motion_ticks = self.slow_motion_ticks.saturating_sub(1);
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.pools,
            SnapshotInput {
                time: self.time,
                phase: self.phase,
                speed: self.effective_speed(),
                slow_motion_active: self.slow_motion_ticks > 0,
                score: self.score,
                powerup_charges: self.powerup_charges,
                boss_max_health: self.boss_max_health,
                audio_events,
            },
        )
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn bounds(&self) -> SceneBounds {
        self.bounds
    }

    /// Read-only access to the pools.
    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    /// Force the score (for tests exercising the difficulty gates).
    #[cfg(test)]
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    #[cfg(test)]
    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    fn effective_speed(&self) -> f64 {
        self.scene_speed * self.slow_factor()
    }

    fn slow_factor(&self) -> f64 {
        if self.slow_motion_ticks > 0 {
            1.0 / SLOW_MOTION_REDUCTION_FACTOR
        } else {
            1.0
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if matches!(self.phase, ScenePhase::MainMenu | ScenePhase::GameOver) {
                    self.start_session();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == ScenePhase::Running {
                    self.phase = ScenePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == ScenePhase::Paused {
                    self.phase = ScenePhase::Running;
                }
            }
            PlayerCommand::Stop => {
                self.pools.park_all();
                self.phase = ScenePhase::MainMenu;
            }
            PlayerCommand::SetMovement { dx, dy } => {
                self.input.movement = DVec2::new(dx.clamp(-1.0, 1.0), dy.clamp(-1.0, 1.0));
            }
            PlayerCommand::Attack => {
                self.input.attack = true;
            }
        }
    }

    fn start_session(&mut self) {
        scene_setup::setup_session(&mut self.pools, &mut self.rng, &self.bounds);
        for generator in &mut self.generators {
            generator.reset();
        }
        self.difficulty.reset();
        self.score = 0;
        self.powerup_charges = 0;
        self.slow_motion_ticks = 0;
        self.boss_max_health = 0.0;
        self.input = InputState::default();
        self.time = SimTime::default();
        self.phase = ScenePhase::Running;
        log::info!("session started");
    }

    /// Run the tick pipeline in its fixed order.
    fn run_systems(&mut self) {
        // 1. Spawn: generators fire, gated spawns acquire from pools.
        systems::spawn::run(
            &mut self.pools,
            &mut self.generators,
            &mut self.rng,
            &self.bounds,
            &mut SpawnState {
                difficulty: &mut self.difficulty,
                score: self.score,
                slow_motion_ticks: &mut self.slow_motion_ticks,
                boss_max_health: &mut self.boss_max_health,
                audio_events: &mut self.audio_events,
            },
        );
        // 2. Movement: every active sprite advances, input is consumed.
        let slow_factor = self.slow_factor();
        systems::movement::run(
            &mut self.pools,
            &mut self.rng,
            &self.bounds,
            &mut MoveState {
                input: &mut self.input,
                powerup_charges: &mut self.powerup_charges,
                audio_events: &mut self.audio_events,
                scene_speed: self.scene_speed,
                slow_factor,
            },
        );
        // 3. Gameplay: collision rules mutate health, score, charges.
        let game_over = systems::gameplay::run(
            &mut self.pools,
            &mut GameplayState {
                score: &mut self.score,
                powerup_charges: &mut self.powerup_charges,
                slow_motion_ticks: &mut self.slow_motion_ticks,
                audio_events: &mut self.audio_events,
            },
        );
        // 4. Recycle: finished sprites return to their pools.
        systems::recycle::run(&mut self.pools, &self.bounds, &mut self.recycle_buffer);

        if game_over {
            self.phase = ScenePhase::GameOver;
        }
    }
}
