mod access;
pub mod buffer;
pub mod grow;
pub mod ring_error;
pub mod shared;

pub use buffer::{ByteRing, FloatRing, PcmRing, ResyncPolicy, RingBuffer};
pub use grow::{grow, reserve};
pub use ring_error::*;
pub use shared::*;
