use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use streamring::ring::SharedRing;
use tracing::info;

const RING_BYTES: usize = 1024 * 1024;
const WRITE_CHUNK: usize = 4096;
const READ_CHUNK: usize = 64 * 1024;
const RUN_FOR: Duration = Duration::from_secs(5);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("shared ring stress test");

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| format!("Failed to set Ctrl+C handler: {}", e))?;

    let mut ring = SharedRing::<u8>::new(RING_BYTES)?;
    let (mut prod, mut cons) = ring.split();

    std::thread::scope(|scope| -> Result<(), Box<dyn std::error::Error>> {
        let writer_running = running.clone();
        let writer = scope.spawn(move || {
            let mut written = 0u64;
            let mut overruns = 0u64;
            let mut chunk = [0u8; WRITE_CHUNK];

            while writer_running.load(Ordering::Relaxed) {
                for (i, byte) in chunk.iter_mut().enumerate() {
                    *byte = (written as usize + i) as u8;
                }
                if prod.free() < WRITE_CHUNK {
                    overruns += 1;
                }
                prod.write(&chunk);
                written += WRITE_CHUNK as u64;
            }

            (written, overruns)
        });

        let reader_running = running.clone();
        let reader = scope.spawn(move || {
            let mut read = 0u64;

            loop {
                let chunk = cons.read_available(READ_CHUNK);
                read += chunk.len() as u64;

                if chunk.is_empty() && !reader_running.load(Ordering::Relaxed) && cons.is_empty() {
                    break;
                }
            }

            read
        });

        info!(seconds = RUN_FOR.as_secs(), "running");
        std::thread::sleep(RUN_FOR);
        running.store(false, Ordering::SeqCst);

        let (written, overruns) = writer.join().map_err(|_| "writer thread panicked")?;
        let read = reader.join().map_err(|_| "reader thread panicked")?;
        let lost = written.saturating_sub(read);

        info!(
            written,
            read,
            lost,
            overruns,
            throughput_mb_s = written as f64 / RUN_FOR.as_secs_f64() / 1024.0 / 1024.0,
            "results"
        );

        Ok(())
    })
}
