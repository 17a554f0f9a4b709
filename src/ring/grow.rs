use super::{RingBuffer, RingError};

/// Moves every unread element of `ring` into a fresh ring of `new_capacity`.
///
/// The old ring is left empty. Growth is always a new allocation; the ring
/// itself never resizes.
pub fn grow<T: Copy + Default>(
    ring: &mut RingBuffer<T>,
    new_capacity: usize,
) -> Result<RingBuffer<T>, RingError> {
    let pending = ring.available();
    if new_capacity < pending {
        return Err(RingError::CapacityTooSmall {
            requested: new_capacity,
            required: pending,
        });
    }

    let mut grown = RingBuffer::with_policy(new_capacity, ring.policy())?;
    let moved = ring.read(pending);
    grown.write(&moved);

    Ok(grown)
}

/// Makes room for `incoming` more elements, doubling the capacity until they
/// fit. Returns whether `ring` was replaced.
pub fn reserve<T: Copy + Default>(
    ring: &mut RingBuffer<T>,
    incoming: usize,
) -> Result<bool, RingError> {
    if incoming <= ring.free() {
        return Ok(false);
    }

    let needed = ring.available().saturating_add(incoming);
    let mut new_capacity = ring.capacity();
    while new_capacity < needed {
        new_capacity = new_capacity.checked_mul(2).ok_or(RingError::InvalidCapacity {
            capacity: new_capacity,
            reason: "doubling overflows usize",
        })?;
    }

    let old_capacity = ring.capacity();
    *ring = grow(ring, new_capacity)?;
    tracing::debug!(old_capacity, new_capacity, incoming, "ring grown");

    Ok(true)
}
