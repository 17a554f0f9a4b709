use super::{ResyncPolicy, RingBuffer};

impl<T: Copy + Default> RingBuffer<T> {
    /// Appends `items`, overwriting the oldest unread data when they do not fit.
    ///
    /// When more than `capacity` items arrive at once only the trailing
    /// `capacity` of them survive, laid out exactly as sequential writes
    /// would leave them.
    #[inline]
    pub fn write(&mut self, items: &[T]) {
        let len = items.len();
        if len == 0 {
            return;
        }

        let cap = self.capacity;
        let skip = len.saturating_sub(cap);
        let tail = &items[skip..];
        let start = (self.write_cursor + skip % cap) % cap;
        let contiguous = cap - start;

        if tail.len() <= contiguous {
            self.store[start..start + tail.len()].copy_from_slice(tail);
        } else {
            let (first, second) = tail.split_at(contiguous);
            self.store[start..].copy_from_slice(first);
            self.store[..second.len()].copy_from_slice(second);
        }

        self.write_cursor = (self.write_cursor + len % cap) % cap;
        self.available = self.available.saturating_add(len);

        if self.available > cap {
            self.resync_after_overflow();
        }
    }

    #[inline]
    pub fn write_one(&mut self, item: T) {
        self.store[self.write_cursor] = item;
        self.write_cursor = (self.write_cursor + 1) % self.capacity;
        self.available += 1;

        if self.available > self.capacity {
            self.resync_after_overflow();
        }
    }

    /// Takes `count` elements. The result always has length `count`; anything
    /// past `available()` is stale store content.
    #[inline]
    pub fn read(&mut self, count: usize) -> Vec<T> {
        let mut out = vec![T::default(); count];
        self.read_into(&mut out);
        out
    }

    /// Fills `out` from the read cursor, with the same accounting as [`read`].
    ///
    /// [`read`]: RingBuffer::read
    #[inline]
    pub fn read_into(&mut self, out: &mut [T]) {
        let count = out.len();
        if count == 0 {
            return;
        }

        self.copy_out(self.read_cursor, out);
        self.read_cursor = (self.read_cursor + count % self.capacity) % self.capacity;

        if count > self.available {
            self.resync_after_underflow(count - self.available);
        } else {
            self.available -= count;
        }
    }

    #[inline]
    pub fn read_one(&mut self) -> T {
        let item = self.store[self.read_cursor];
        self.read_cursor = (self.read_cursor + 1) % self.capacity;

        if self.available == 0 {
            self.resync_after_underflow(1);
        } else {
            self.available -= 1;
        }

        item
    }

    /// Copies up to `count` valid elements without consuming them.
    #[inline]
    pub fn peek(&self, count: usize) -> Vec<T> {
        let mut out = vec![T::default(); count.min(self.available)];
        self.copy_out(self.read_cursor, &mut out);
        out
    }

    /// Non-consuming [`read_into`]; returns how many leading slots of `out`
    /// hold valid data.
    ///
    /// [`read_into`]: RingBuffer::read_into
    #[inline]
    pub fn peek_into(&self, out: &mut [T]) -> usize {
        let n = out.len().min(self.available);
        self.copy_out(self.read_cursor, &mut out[..n]);
        n
    }

    fn copy_out(&self, start: usize, out: &mut [T]) {
        let mut cursor = start;
        let mut filled = 0;

        while filled < out.len() {
            let run = (self.capacity - cursor).min(out.len() - filled);
            out[filled..filled + run].copy_from_slice(&self.store[cursor..cursor + run]);
            filled += run;
            cursor = (cursor + run) % self.capacity;
        }
    }
}

impl<T> RingBuffer<T> {
    fn resync_after_overflow(&mut self) {
        let dropped = self.available - self.capacity;
        self.read_cursor = match self.policy {
            ResyncPolicy::Exact => self.write_cursor,
            ResyncPolicy::SkipSlot => (self.write_cursor + 1) % self.capacity,
        };
        self.available = self.capacity;
        tracing::trace!(dropped, read_cursor = self.read_cursor, "ring overflow");
    }

    fn resync_after_underflow(&mut self, missing: usize) {
        self.write_cursor = match self.policy {
            ResyncPolicy::Exact => self.read_cursor,
            ResyncPolicy::SkipSlot => (self.read_cursor + 1) % self.capacity,
        };
        self.available = 0;
        tracing::trace!(missing, write_cursor = self.write_cursor, "ring underflow");
    }
}
