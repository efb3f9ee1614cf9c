//! Fixed-capacity ring buffer of particle slots
//!
//! The arena is allocated once with `capacity + 1` slots and never grows or
//! moves. Live particles occupy the half-open range `[head, tail)` modulo the
//! arena length; the spare slot keeps "empty" (`head == tail`) distinct from
//! "full" without a separate flag.
//!
//! ```text
//!   index:   0   1   2   3   4   5
//!          +---+---+---+---+---+---+
//!          | L | L |   |   | L | L |     capacity 5, count 4
//!          +---+---+---+---+---+---+
//!                    ^tail     ^head
//! ```

use log::{debug, trace};

use crate::error::{ParticleError, Result};
use crate::particle::Particle;

/// Ring buffer owning every particle slot of one emitter
#[derive(Debug)]
pub struct ParticleBuffer {
    /// Contiguous slot storage, `capacity + 1` long until disposed
    arena: Box<[Particle]>,
    /// Index of the oldest live particle
    head: usize,
    /// Index one past the newest live particle
    tail: usize,
    /// Maximum number of live particles
    capacity: usize,
}

impl ParticleBuffer {
    /// Allocate a buffer able to hold `capacity` live particles
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ParticleError::InvalidCapacity(capacity));
        }

        let arena = vec![Particle::default(); capacity + 1].into_boxed_slice();
        debug!(
            "Allocated particle buffer: capacity {}, {} bytes",
            capacity,
            arena.len() * size_of::<Particle>()
        );

        Ok(Self {
            arena,
            head: 0,
            tail: 0,
            capacity,
        })
    }

    /// Maximum number of live particles
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live particles
    pub fn count(&self) -> usize {
        let slots = self.arena.len();
        if slots == 0 {
            return 0;
        }
        (self.tail + slots - self.head) % slots
    }

    /// Number of slots that can still be released
    pub fn available(&self) -> usize {
        self.capacity - self.count()
    }

    /// Whether no particle is live
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Whether every slot is in use
    pub fn is_full(&self) -> bool {
        self.available() == 0
    }

    /// Size of the whole arena in bytes
    pub fn size_in_bytes(&self) -> usize {
        self.arena.len() * size_of::<Particle>()
    }

    /// Size of the live particles in bytes
    pub fn active_size_in_bytes(&self) -> usize {
        self.count() * size_of::<Particle>()
    }

    /// Allocate up to `quantity` slots at the tail
    ///
    /// The request is silently truncated to [`available`](Self::available);
    /// a saturated buffer hands back an empty cursor. The returned cursor
    /// walks exactly the newly allocated slots so the caller can initialise
    /// them. Slot contents are left over from earlier particles.
    pub fn release(&mut self, quantity: usize) -> ParticleCursor<'_> {
        let granted = quantity.min(self.available());
        if granted < quantity {
            trace!(
                "Particle buffer saturated: requested {}, granted {}",
                quantity, granted
            );
        }

        let start = self.tail;
        if granted > 0 {
            self.tail = (self.tail + granted) % self.arena.len();
        }

        ParticleCursor::new(&mut self.arena, start, granted)
    }

    /// Free the `quantity` oldest live particles
    ///
    /// No liveness check is made; the caller decides which particles are
    /// expired. Reclaiming more particles than are live is a caller bug.
    pub fn reclaim(&mut self, quantity: usize) {
        let count = self.count();
        assert!(
            quantity <= count,
            "cannot reclaim {quantity} particles, only {count} are live"
        );

        if quantity > 0 {
            self.head = (self.head + quantity) % self.arena.len();
        }
    }

    /// Free every particle at once without touching slot contents
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Cursor over the whole live range, starting at the oldest particle
    pub fn cursor(&mut self) -> ParticleCursor<'_> {
        let count = self.count();
        ParticleCursor::new(&mut self.arena, self.head, count)
    }

    /// Iterate the live particles from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        let (front, back) = self.as_slices();
        front.iter().chain(back.iter())
    }

    /// The live range as at most two contiguous slices, oldest first
    pub fn as_slices(&self) -> (&[Particle], &[Particle]) {
        if self.head <= self.tail {
            (&self.arena[self.head..self.tail], &[])
        } else {
            let (wrapped, front) = self.arena.split_at(self.head);
            (front, &wrapped[..self.tail])
        }
    }

    /// Mutable view of the live range as at most two contiguous slices
    pub fn as_mut_slices(&mut self) -> (&mut [Particle], &mut [Particle]) {
        let (wrapped, front) = self.arena.split_at_mut(self.head);
        if self.head <= self.tail {
            (&mut front[..self.tail - self.head], &mut [])
        } else {
            (front, &mut wrapped[..self.tail])
        }
    }

    /// Release the arena
    ///
    /// Safe to call more than once. A disposed buffer has zero capacity and
    /// grants no slots. Dropping the buffer frees the arena as well.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }

        debug!("Disposing particle buffer of capacity {}", self.capacity);
        self.arena = Box::default();
        self.head = 0;
        self.tail = 0;
        self.capacity = 0;
    }

    /// Whether [`dispose`](Self::dispose) has been called
    pub fn is_disposed(&self) -> bool {
        self.arena.is_empty()
    }
}

/// Index-based traversal over a span of particle slots
///
/// A cursor starts at a slot index, covers a fixed number of slots and wraps
/// at the end of the arena. It never allocates; [`reset`](Self::reset)
/// rewinds it so the same span can be walked again.
#[derive(Debug)]
pub struct ParticleCursor<'a> {
    arena: &'a mut [Particle],
    start: usize,
    len: usize,
    visited: usize,
}

impl<'a> ParticleCursor<'a> {
    pub(crate) fn new(arena: &'a mut [Particle], start: usize, len: usize) -> Self {
        debug_assert!(len <= arena.len());
        Self {
            arena,
            start,
            len,
            visited: 0,
        }
    }

    /// Cursor over every particle of a contiguous slice
    pub fn over(particles: &'a mut [Particle]) -> Self {
        let len = particles.len();
        Self::new(particles, 0, len)
    }

    /// Whether another particle remains
    #[inline]
    pub fn has_next(&self) -> bool {
        self.visited < self.len
    }

    /// Borrow the current particle and advance
    #[inline]
    pub fn next_mut(&mut self) -> Option<&mut Particle> {
        if !self.has_next() {
            return None;
        }

        let mut index = self.start + self.visited;
        if index >= self.arena.len() {
            index -= self.arena.len();
        }
        self.visited += 1;

        Some(&mut self.arena[index])
    }

    /// Apply `f` to every remaining particle
    #[inline]
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Particle),
    {
        while let Some(particle) = self.next_mut() {
            f(particle);
        }
    }

    /// Rewind to the first particle of the span
    #[inline]
    pub fn reset(&mut self) {
        self.visited = 0;
    }

    /// Number of particles the cursor covers
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the cursor covers no particles
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of particles not yet visited
    pub fn remaining(&self) -> usize {
        self.len - self.visited
    }
}
