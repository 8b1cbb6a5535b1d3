use arena::world::{spawn_ring, WorldConfig};
use arena::World;
use clap::Parser;
use log::{info, warn};
use rand::RngCore;
use sim::spawn::SpawnTable;
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};

/// Main-method of the harness.
/// Builds a bot match and drives it with a fixed-rate simulation tick.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Command line arguments
    #[derive(Parser, Debug)]
    #[clap(author, version, about)]
    struct Args {
        /// Number of bot-driven characters
        #[clap(short, long, default_value = "4")]
        bots: usize,
        /// Tick rate (updates per second)
        #[clap(short, long, default_value = "60")]
        tick_rate: u32,
        /// Match length in seconds
        #[clap(short, long, default_value = "30")]
        duration: u64,
        /// RNG seed (random when omitted)
        #[clap(short, long)]
        seed: Option<u64>,
        /// Spawn points placed on the arena ring
        #[clap(long, default_value = "8")]
        spawn_points: usize,
    }

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().next_u64());

    let spawns = SpawnTable::new(spawn_ring(args.spawn_points, 12.0))?;
    let mut world = World::new(
        spawns,
        WorldConfig {
            seed,
            ..WorldConfig::default()
        },
    );
    for i in 0..args.bots {
        let id = world.add_bot(&format!("bot-{}", i + 1))?;
        info!("bot-{} joined as entity {}", i + 1, id);
    }

    info!(
        "match start: {} bots, {} Hz, {}s, seed {}",
        args.bots, args.tick_rate, args.duration, seed
    );

    let mut interval_timer = interval(Duration::from_secs_f32(1.0 / args.tick_rate as f32));
    interval_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Cap the maximum delta time to keep the simulation stable when the
    // loop falls behind.
    let max_delta_time = 1.0 / 20.0;

    let started = Instant::now();
    let mut last_update = started;

    // Skip the first tick since it fires immediately
    interval_timer.tick().await;

    while started.elapsed() < Duration::from_secs(args.duration) {
        interval_timer.tick().await;

        let current_time = Instant::now();
        let mut delta_time = (current_time - last_update).as_secs_f32();
        last_update = current_time;

        if delta_time > max_delta_time {
            warn!(
                "large delta time ({:.3}s), capping to {:.3}s",
                delta_time, max_delta_time
            );
            delta_time = max_delta_time;
        }

        world.tick(delta_time)?;
    }

    info!("match over after {} simulated ms", world.now_ms());
    let mut scores: Vec<_> = world.scoreboard().iter().collect();
    scores.sort_by(|a, b| b.1.kills.cmp(&a.1.kills).then(a.0.cmp(b.0)));
    for (id, score) in scores {
        println!(
            "entity {:>3}  kills {:>3}  deaths {:>3}",
            id, score.kills, score.deaths
        );
    }

    Ok(())
}
