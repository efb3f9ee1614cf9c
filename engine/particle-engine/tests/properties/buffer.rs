//! Ring buffer invariants under random release/reclaim sequences.

use particle_engine::{Particle, ParticleBuffer};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Release(usize),
    Reclaim(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..20).prop_map(Op::Release),
        3 => (0usize..20).prop_map(Op::Reclaim),
        1 => Just(Op::Clear),
    ]
}

/// Stamp each released slot with a sequence number in its rotation field
fn release_stamped(buffer: &mut ParticleBuffer, quantity: usize, next: &mut u32) -> usize {
    let mut cursor = buffer.release(quantity);
    let granted = cursor.len();
    while let Some(p) = cursor.next_mut() {
        *p = Particle {
            rotation: *next as f32,
            ..Particle::default()
        };
        *next += 1;
    }
    granted
}

proptest! {
    #[test]
    fn release_is_bounded_by_capacity(
        capacity in 1usize..32,
        ops in prop::collection::vec(op(), 1..100),
    ) {
        let mut buffer = ParticleBuffer::new(capacity).unwrap();
        let mut next = 0;

        for op in ops {
            let before = buffer.count();
            match op {
                Op::Release(n) => {
                    let granted = release_stamped(&mut buffer, n, &mut next);
                    prop_assert_eq!(granted, n.min(capacity - before));
                    prop_assert_eq!(buffer.count(), before + granted);
                }
                Op::Reclaim(n) => {
                    let n = n.min(before);
                    buffer.reclaim(n);
                    prop_assert_eq!(buffer.count(), before - n);
                }
                Op::Clear => {
                    buffer.clear();
                    prop_assert_eq!(buffer.count(), 0);
                }
            }
            prop_assert!(buffer.count() <= capacity);
            prop_assert_eq!(buffer.available(), capacity - buffer.count());
        }
    }

    #[test]
    fn traversal_visits_live_range_in_order(
        capacity in 1usize..16,
        rounds in 3usize..12,
        batch in 1usize..16,
    ) {
        let mut buffer = ParticleBuffer::new(capacity).unwrap();
        let mut next = 0u32;
        let mut oldest = 0u32;

        // Enough rounds of fill-then-drain to cross the arena end repeatedly
        for _ in 0..rounds {
            release_stamped(&mut buffer, batch, &mut next);
            let drop = buffer.count() / 2;
            buffer.reclaim(drop);
            oldest += drop as u32;

            let expected: Vec<f32> = (oldest..next).map(|i| i as f32).collect();
            prop_assert_eq!(expected.len(), buffer.count());

            let mut visited = Vec::new();
            let mut cursor = buffer.cursor();
            while let Some(p) = cursor.next_mut() {
                visited.push(p.rotation);
            }
            prop_assert_eq!(&visited, &expected);

            let iterated: Vec<f32> = buffer.iter().map(|p| p.rotation).collect();
            prop_assert_eq!(&iterated, &expected);

            let (front, back) = buffer.as_slices();
            prop_assert_eq!(front.len() + back.len(), buffer.count());
        }
    }

    #[test]
    fn clear_is_idempotent(capacity in 1usize..32, fill in 0usize..40) {
        let mut buffer = ParticleBuffer::new(capacity).unwrap();
        let _ = buffer.release(fill);

        buffer.clear();
        let once = buffer.count();
        buffer.clear();

        prop_assert_eq!(once, 0);
        prop_assert_eq!(buffer.count(), 0);
        prop_assert!(!buffer.cursor().has_next());
        prop_assert_eq!(buffer.iter().count(), 0);
    }
}
