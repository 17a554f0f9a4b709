use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use streamring::config::RelayConfig;
use streamring::ring::SharedRing;
use streamring::sink::{Pump, PumpStats};
use streamring::storage::{CaptureSink, CaptureWriter};
use tracing::{error, info, warn};

const TONE_HZ: f32 = 440.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = RelayConfig::from_env();
    info!(?config, "streamring relay starting, press Ctrl+C to stop");

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| format!("Failed to set Ctrl+C handler: {}", e))?;

    let mut ring = SharedRing::<i16>::new(config.capacity)?;
    let (mut producer, mut consumer) = ring.split();

    let writer = CaptureWriter::<i16>::create(
        &config.output,
        config.capture_bytes,
        config.channels,
        config.sample_rate,
    )?;
    let mut pump = Pump::new(config.chunk)?;
    pump.add_sink(CaptureSink::new(writer));

    let tick = Duration::from_millis(config.tick_ms);
    let frames_per_tick =
        ((config.sample_rate as u64).saturating_mul(config.tick_ms) / 1000).max(1) as usize;
    let channels = config.channels as usize;

    std::thread::scope(|scope| -> Result<(), Box<dyn std::error::Error>> {
        let decoder_running = running.clone();
        let decoder = scope.spawn(move || {
            let step = TONE_HZ * std::f32::consts::TAU / config.sample_rate as f32;
            let mut phase = 0.0f32;
            let mut produced = 0u64;
            let mut overruns = 0u64;
            let mut block = Vec::with_capacity(frames_per_tick * channels);

            while decoder_running.load(Ordering::Relaxed) {
                block.clear();
                for _ in 0..frames_per_tick {
                    let value = (phase.sin() * i16::MAX as f32 * 0.25) as i16;
                    block.extend(std::iter::repeat_n(value, channels));
                    phase = (phase + step) % std::f32::consts::TAU;
                }

                if block.len() > producer.free() {
                    overruns += 1;
                }
                producer.write(&block);
                produced += block.len() as u64;

                std::thread::sleep(tick);
            }

            (produced, overruns)
        });

        let mut total = PumpStats::default();
        let mut last_report = Instant::now();

        while running.load(Ordering::SeqCst) {
            total.merge(pump.drain_shared(&mut consumer));

            if pump.has_full_sink() {
                warn!(
                    capture_bytes = config.capture_bytes,
                    output = %config.output.display(),
                    "capture file full, stopping relay"
                );
                running.store(false, Ordering::SeqCst);
                break;
            }

            if last_report.elapsed() >= Duration::from_secs(5) {
                info!(
                    samples = total.samples_read,
                    chunks = total.chunks_read,
                    ring_available = consumer.available(),
                    "relay status"
                );
                last_report = Instant::now();
            }

            std::thread::sleep(tick);
        }

        let (produced, overruns) = decoder
            .join()
            .map_err(|_| "decoder thread panicked")?;
        total.merge(pump.drain_shared(&mut consumer));

        if overruns > 0 {
            warn!(overruns, "decoder overran the ring; oldest samples were dropped");
        }
        info!(
            produced,
            captured = total.samples_read,
            failures = total.failures,
            success_rate = total.success_rate(),
            output = %config.output.display(),
            "relay stopped"
        );

        Ok(())
    })
}
