//! Feed a random event stream through the engine and cross-check it
//! against the reference transform.
//!
//! Run with: cargo run --example event_stream -p efft-core
//!
//! Settings come from the usual config search path (`EFFT_CONFIG`,
//! `./efft.yaml`, ...). Set `engine.verify_every` to control how often the
//! incremental spectrum is compared with a full recompute.

use efft_core::config::EfftConfig;
use efft_core::factory::EngineFactory;
use efft_core::observe::init_logging;
use efft_core::{GroundTruth, Stimuli, Stimulus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EVENTS: usize = 5_000;
const PACKET: usize = 32;

fn main() {
    let mut config = EfftConfig::load().expect("load config");
    if config.engine.verify_every == 0 {
        config.engine.verify_every = 1_000;
    }
    init_logging(&config.logging);

    let mut efft = EngineFactory::from_config(&config.engine);
    let mut truth = GroundTruth::new(efft.frame_size());
    let n = efft.framesize();
    let mut rng = StdRng::seed_from_u64(2024);

    println!("Streaming {} events into a {} frame\n", EVENTS, efft.frame_size());

    let mut sent = 0;
    let mut worst: f64 = 0.0;
    while sent < EVENTS {
        let packet: Stimuli = (0..PACKET)
            .map(|_| Stimulus::new(rng.gen_range(0..n), rng.gen_range(0..n), rng.gen_bool(0.6)))
            .collect();

        efft.update(&packet).expect("in-range packet");
        truth.update_batch(packet.as_slice()).expect("in-range packet");

        for _ in 0..PACKET {
            sent += 1;
            if config.engine.verify_due(sent) {
                let distance = efft.check(&truth);
                worst = worst.max(distance);
                println!("after {:>5} events: distance = {:.3e}", sent, distance);
            }
        }
    }

    let stats = efft.metrics().snapshot();
    println!("\nActive cells:   {}", efft.grid().active_count());
    println!("Change ratio:   {:.2}", stats.change_ratio());
    println!("Worst distance: {:.3e} (tolerance {:.1e})", worst, config.engine.tolerance);
    println!("\n{}", stats.to_json());

    if worst > config.engine.tolerance {
        eprintln!("incremental spectrum drifted beyond tolerance");
        std::process::exit(1);
    }
}
