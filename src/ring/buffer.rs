use super::RingError;

/// How the opposite cursor is moved when a write overruns unread data or a
/// read runs past the valid data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResyncPolicy {
    /// Overflow sets `read = write`, underflow sets `write = read`. The
    /// oldest surviving element is exactly `capacity` back from the newest.
    #[default]
    Exact,
    /// Overflow sets `read = write + 1`, underflow sets `write = read + 1`
    /// (both modulo capacity). Matches buffers that keep one slot in reserve.
    SkipSlot,
}

/// Fixed-capacity circular buffer.
///
/// Writes never block and never fail: overrunning unread data moves the read
/// cursor so the newest data wins, and over-reading moves the write cursor so
/// `available` stays at zero. The store is allocated once in [`RingBuffer::new`].
///
/// [`RingBuffer::new`] uses [`ResyncPolicy::Exact`]; buffers that must match the
/// legacy one-past-cursor resync arithmetic use [`ResyncPolicy::SkipSlot`].
///
/// Not synchronized. One writer and one reader may share it only under an
/// external lock; see [`super::SharedRing`].
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    pub(super) store: Box<[T]>,
    pub(super) capacity: usize,
    pub(super) write_cursor: usize,
    pub(super) read_cursor: usize,
    pub(super) available: usize,
    pub(super) policy: ResyncPolicy,
}

pub type ByteRing = RingBuffer<u8>;
pub type PcmRing = RingBuffer<i16>;
pub type FloatRing = RingBuffer<f32>;

impl<T: Copy + Default> RingBuffer<T> {
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        Self::with_policy(capacity, ResyncPolicy::default())
    }

    pub fn with_policy(capacity: usize, policy: ResyncPolicy) -> Result<Self, RingError> {
        if capacity == 0 {
            return Err(RingError::InvalidCapacity {
                capacity,
                reason: "must be greater than zero",
            });
        }

        Ok(Self {
            store: vec![T::default(); capacity].into_boxed_slice(),
            capacity,
            write_cursor: 0,
            read_cursor: 0,
            available: 0,
            policy,
        })
    }
}

impl<T> RingBuffer<T> {
    #[inline(always)]
    pub fn available(&self) -> usize {
        self.available
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn free(&self) -> usize {
        self.capacity - self.available
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.available == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.available == self.capacity
    }

    #[inline(always)]
    pub fn policy(&self) -> ResyncPolicy {
        self.policy
    }

    /// Next slot the writer fills.
    #[inline(always)]
    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    /// Next slot the reader takes.
    #[inline(always)]
    pub fn read_cursor(&self) -> usize {
        self.read_cursor
    }

    /// Marks everything unread. The store keeps its stale contents.
    pub fn clear(&mut self) {
        self.write_cursor = 0;
        self.read_cursor = 0;
        self.available = 0;
    }
}
