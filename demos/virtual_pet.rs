//! Virtual Pet Session
//!
//! This example runs a live session on a real clock: the pet grows
//! hungry on every tick, eats, plays, pauses and is finally restarted.
//!
//! Key concepts:
//! - Subscribers that survive restarts
//! - State-entry timers (stomach_full, playing) resolving on their own
//! - Pausing suspends the hunger tick
//! - RESTART_GAME tears the engine down and builds a fresh one
//!
//! Run with: cargo run --example virtual_pet
//! Set CHIMERA_LOG_LEVEL=warn to hide the engine's own logging.

use chimera::config::EngineConfig;
use chimera::logging;
use chimera::machine::Snapshot;
use chimera::pet::{Food, PetEvent};
use chimera::runtime::Session;
use std::time::Duration;
use tokio::time::sleep;

fn report(snapshot: &Snapshot) {
    let ctx = &snapshot.context;
    println!(
        "  {:<16} hunger={:>2} energy={:>2} mood={:?} ({:?})",
        snapshot.state_name(),
        ctx.hunger,
        ctx.energy,
        ctx.mood,
        snapshot.hunger_level()
    );
    if !ctx.current_fun_fact.is_empty() {
        println!("  fun fact: {}", ctx.current_fun_fact);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_default()?;

    println!("=== Virtual Pet Session ===\n");

    let config = EngineConfig {
        tick_interval_ms: 1000,
        state_timeout_ms: 1500,
        ..EngineConfig::default()
    };
    let mut session = Session::new(config);
    session.subscribe(report);
    session.start()?;

    println!("\nLetting the pet get a little hungry...");
    sleep(Duration::from_millis(3200)).await;

    println!("\nFeeding a cookie:");
    session.send(PetEvent::Feed)?;
    session.send(PetEvent::player_selecting(Food::Cookie))?;
    sleep(Duration::from_millis(1800)).await;

    println!("\nPlaying:");
    session.send(PetEvent::Play)?;
    sleep(Duration::from_millis(1800)).await;

    println!("\nPausing for two seconds (no ticks):");
    session.send(PetEvent::TogglePause)?;
    sleep(Duration::from_millis(2000)).await;

    println!("\nRestarting the game:");
    session.send(PetEvent::RestartGame)?;
    sleep(Duration::from_millis(200)).await;
    println!("  generation {}", session.generation());

    session.shutdown().await?;
    println!("\n=== Example Complete ===");
    Ok(())
}
