//! Headless demo session for the honk arcade kernel.
//!
//! Runs the scene on the game loop thread at the fixed frame interval,
//! drives it with a short scripted command sequence, and prints a JSON
//! summary of the latest snapshot once per second.

mod game_loop;
mod state;

use std::time::Duration;

use anyhow::Context;

use honk_core::commands::PlayerCommand;
use honk_core::state::SceneSnapshot;

use crate::state::{AppState, GameLoopCommand};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let app_state = AppState::new();
    let (cmd_tx, handle) = game_loop::spawn_game_loop(app_state.latest_snapshot.clone())?;
    *app_state.command_tx.lock().unwrap() = Some(cmd_tx.clone());
    *app_state.running.lock().unwrap() = true;
    log::info!("game loop running at {} ms per frame", honk_core::constants::FRAME_TIME_MS);

    cmd_tx
        .send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
        .context("game loop thread gone")?;

    // A short scripted session: cruise, weave, and fire.
    for second in 0..10 {
        let (dx, dy) = match second % 4 {
            0 => (0.6, 0.0),
            1 => (0.0, -0.5),
            2 => (-0.6, 0.0),
            _ => (0.0, 0.5),
        };
        cmd_tx.send(GameLoopCommand::PlayerCommand(
            PlayerCommand::SetMovement { dx, dy },
        ))?;
        if second % 2 == 1 {
            cmd_tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Attack))?;
        }

        std::thread::sleep(Duration::from_secs(1));
        if let Some(snapshot) = app_state.latest_snapshot.lock().unwrap().as_ref() {
            print_summary(snapshot)?;
        }
    }

    cmd_tx.send(GameLoopCommand::Shutdown)?;
    handle.join().ok();
    *app_state.running.lock().unwrap() = false;
    log::info!("session ended");
    Ok(())
}

fn print_summary(snapshot: &SceneSnapshot) -> anyhow::Result<()> {
    let summary = serde_json::json!({
        "tick": snapshot.time.tick,
        "phase": snapshot.phase,
        "score": snapshot.score,
        "player_health": snapshot.player.health,
        "active_sprites": snapshot.sprites.len(),
        "boss": snapshot.boss.as_ref().map(|b| (b.kind, b.health)),
        "slow_motion": snapshot.slow_motion_active,
    });
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
