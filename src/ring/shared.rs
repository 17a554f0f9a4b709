use super::{ResyncPolicy, RingBuffer, RingError};
use std::sync::{Mutex, MutexGuard};

/// A [`RingBuffer`] behind a mutex, for one producer thread and one consumer
/// thread. Each handle call holds the lock for the whole operation.
#[derive(Debug)]
pub struct SharedRing<T> {
    inner: Mutex<RingBuffer<T>>,
    capacity: usize,
}

impl<T: Copy + Default + Send> SharedRing<T> {
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        Self::with_policy(capacity, ResyncPolicy::default())
    }

    pub fn with_policy(capacity: usize, policy: ResyncPolicy) -> Result<Self, RingError> {
        Ok(Self {
            inner: Mutex::new(RingBuffer::with_policy(capacity, policy)?),
            capacity,
        })
    }

    /// Hands out the one producer and the one consumer. The ring stays
    /// borrowed until both handles are gone, so a second pair cannot exist:
    ///
    /// ```compile_fail
    /// use streamring::ring::SharedRing;
    ///
    /// let mut ring = SharedRing::<u8>::new(8).unwrap();
    /// let (mut first, _) = ring.split();
    /// let (mut second, _) = ring.split();
    /// first.write(&[1]);
    /// second.write(&[2]);
    /// ```
    pub fn split(&mut self) -> (Producer<'_, T>, Consumer<'_, T>) {
        let ring = &*self;
        (Producer { ring }, Consumer { ring })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn available(&self) -> usize {
        self.lock().available()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // Ring operations never unwind between field updates, so a poisoned lock
    // still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, RingBuffer<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct Producer<'a, T> {
    ring: &'a SharedRing<T>,
}

pub struct Consumer<'a, T> {
    ring: &'a SharedRing<T>,
}

impl<T: Copy + Default + Send> Producer<'_, T> {
    #[inline]
    pub fn write(&mut self, items: &[T]) {
        self.ring.lock().write(items);
    }

    #[inline]
    pub fn write_one(&mut self, item: T) {
        self.ring.lock().write_one(item);
    }

    #[inline]
    pub fn free(&self) -> usize {
        self.ring.lock().free()
    }
}

impl<T: Copy + Default + Send> Consumer<'_, T> {
    #[inline]
    pub fn read(&mut self, count: usize) -> Vec<T> {
        self.ring.lock().read(count)
    }

    /// Takes at most `max` elements, never more than are valid.
    #[inline]
    pub fn read_available(&mut self, max: usize) -> Vec<T> {
        let mut ring = self.ring.lock();
        let count = max.min(ring.available());
        ring.read(count)
    }

    #[inline]
    pub fn peek(&self, count: usize) -> Vec<T> {
        self.ring.lock().peek(count)
    }

    #[inline]
    pub fn available(&self) -> usize {
        self.ring.available()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }
}
