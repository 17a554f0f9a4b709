pub mod pump;

pub use pump::{Pump, PumpStats};

/// Receives chunks drained from a ring.
pub trait SampleSink<T>: Send {
    /// Returns false if the chunk was not accepted.
    fn consume(&mut self, samples: &[T]) -> bool;

    fn flush(&mut self) {}

    /// A full sink rejects every later chunk.
    fn is_full(&self) -> bool {
        false
    }

    fn name(&self) -> &str;
}
