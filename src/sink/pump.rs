use super::SampleSink;
use crate::ring::{Consumer, RingBuffer, RingError};

/// Drains a ring in chunks and hands each chunk to every sink.
///
/// Reads are sized from `available()` first, so draining never underflows.
pub struct Pump<T> {
    sinks: Vec<Box<dyn SampleSink<T>>>,
    chunk: usize,
}

impl<T: Copy + Default + Send + 'static> Pump<T> {
    pub fn new(chunk: usize) -> Result<Self, RingError> {
        if chunk == 0 {
            return Err(RingError::InvalidChunk { chunk });
        }

        Ok(Self {
            sinks: Vec::new(),
            chunk,
        })
    }

    pub fn add_sink<S: SampleSink<T> + 'static>(&mut self, sink: S) {
        self.sinks.push(Box::new(sink));
    }

    #[inline]
    pub fn chunk(&self) -> usize {
        self.chunk
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|sink| sink.name()).collect()
    }

    #[inline]
    pub fn drain(&mut self, ring: &mut RingBuffer<T>) -> PumpStats {
        let stats = self.drain_batch(ring, usize::MAX);
        self.flush();
        stats
    }

    #[inline]
    pub fn drain_shared(&mut self, consumer: &mut Consumer<'_, T>) -> PumpStats {
        let stats = self.drain_shared_batch(consumer, usize::MAX);
        self.flush();
        stats
    }

    /// Like [`Pump::drain`] but stops after `limit` chunks and skips the flush.
    #[inline]
    pub fn drain_batch(&mut self, ring: &mut RingBuffer<T>, limit: usize) -> PumpStats {
        let mut stats = PumpStats::default();
        for _ in 0..limit {
            let count = self.chunk.min(ring.available());
            if count == 0 {
                break;
            }
            let chunk = ring.read(count);
            self.deliver(&chunk, &mut stats);
        }
        stats
    }

    #[inline]
    pub fn drain_shared_batch(&mut self, consumer: &mut Consumer<'_, T>, limit: usize) -> PumpStats {
        let mut stats = PumpStats::default();
        for _ in 0..limit {
            let chunk = consumer.read_available(self.chunk);
            if chunk.is_empty() {
                break;
            }
            self.deliver(&chunk, &mut stats);
        }
        stats
    }

    /// True once any sink has stopped accepting data for good.
    pub fn has_full_sink(&self) -> bool {
        self.sinks.iter().any(|sink| sink.is_full())
    }

    // Full sinks are skipped and counted as failures without logging again.
    fn deliver(&mut self, chunk: &[T], stats: &mut PumpStats) {
        stats.chunks_read += 1;
        stats.samples_read += chunk.len() as u64;
        for sink in &mut self.sinks {
            if sink.is_full() {
                stats.failures += 1;
            } else if sink.consume(chunk) {
                stats.deliveries += 1;
            } else if sink.is_full() {
                stats.failures += 1;
                stats.sinks_filled += 1;
                tracing::warn!(sink = sink.name(), "sink full, dropping further chunks");
            } else {
                stats.failures += 1;
                tracing::warn!(sink = sink.name(), len = chunk.len(), "sink rejected chunk");
            }
        }
    }

    fn flush(&mut self) {
        for sink in &mut self.sinks {
            sink.flush();
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpStats {
    pub chunks_read: u64,
    pub samples_read: u64,
    pub deliveries: u64,
    pub failures: u64,
    /// Sinks that became full during this drain.
    pub sinks_filled: u64,
}

impl PumpStats {
    #[inline]
    pub fn success_rate(&self) -> f64 {
        let total = self.deliveries + self.failures;
        if total == 0 {
            1.0
        } else {
            self.deliveries as f64 / total as f64
        }
    }

    pub fn merge(&mut self, other: PumpStats) {
        self.chunks_read += other.chunks_read;
        self.samples_read += other.samples_read;
        self.deliveries += other.deliveries;
        self.failures += other.failures;
        self.sinks_filled += other.sinks_filled;
    }
}
