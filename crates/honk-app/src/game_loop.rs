//! Game loop thread — drives the scene at the fixed frame interval.
//!
//! The external timer facility from the scene's point of view: calls
//! `Scene::tick` on a fixed cadence, forwards queued player commands,
//! and publishes each snapshot into shared state. Pause semantics live
//! inside the engine; the loop never stops ticking until shutdown.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;

use honk_core::constants::FRAME_TIME_MS;
use honk_core::state::SceneSnapshot;
use honk_sim::engine::{Scene, SceneConfig};

use crate::state::GameLoopCommand;

/// Duration of one frame.
const FRAME_DURATION: Duration = Duration::from_millis(FRAME_TIME_MS);

/// Spawn the game loop in a new thread.
///
/// Returns the command sender for the input layer plus the join handle
/// for a graceful shutdown.
pub fn spawn_game_loop(
    latest_snapshot: Arc<Mutex<Option<SceneSnapshot>>>,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let scene = Scene::new(SceneConfig::default()).context("scene setup failed")?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("honk-game-loop".into())
        .spawn(move || {
            run_game_loop(scene, cmd_rx, &latest_snapshot);
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut scene: Scene,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SceneSnapshot>>,
) {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands.
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    scene.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick.
        let snapshot = scene.tick();

        // 3. Store the snapshot for synchronous polling.
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next frame.
        next_tick_time += FRAME_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > FRAME_DURATION * 2 {
            // Too far behind — reset to avoid a catch-up spiral.
            next_tick_time = now;
        }
    }
}
