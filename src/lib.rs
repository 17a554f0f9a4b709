//! Fixed-capacity circular buffers for streaming byte and sample data.
//!
//! [`ring::RingBuffer`] never blocks and never fails on overrun: writers win
//! over unread data and readers past the end get stale elements, with both
//! cursors resynced so the accounting stays consistent. Everything else in the
//! crate is built on its public operations.

pub mod config;
pub mod ring;
pub mod sample;
pub mod sink;
pub mod storage;
