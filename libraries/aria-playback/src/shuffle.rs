//! Shuffle selection
//!
//! Shuffle never reorders the queue; it only picks which index plays next.

use rand::{thread_rng, Rng};

/// Pick a random index in `[0, len)` that differs from `cursor` when the
/// queue has more than one entry
///
/// Returns `None` for an empty queue.
pub fn pick_next_index(len: usize, cursor: Option<usize>) -> Option<usize> {
    pick_next_index_with(&mut thread_rng(), len, cursor)
}

/// Same as [`pick_next_index`] with a caller-supplied random source
///
/// A pick that lands on the cursor moves one step forward (wrapping), so the
/// distribution stays over `[0, len)` without a retry loop.
pub fn pick_next_index_with<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    cursor: Option<usize>,
) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let pick = rng.gen_range(0..len);
    if len > 1 && Some(pick) == cursor {
        Some((pick + 1) % len)
    } else {
        Some(pick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_queue_has_no_pick() {
        assert_eq!(pick_next_index(0, None), None);
    }

    #[test]
    fn single_entry_repeats_itself() {
        assert_eq!(pick_next_index(1, Some(0)), Some(0));
    }

    #[test]
    fn never_repeats_cursor() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in 2..8 {
            for cursor in 0..len {
                for _ in 0..200 {
                    let pick = pick_next_index_with(&mut rng, len, Some(cursor)).unwrap();
                    assert_ne!(pick, cursor);
                    assert!(pick < len);
                }
            }
        }
    }

    #[test]
    fn reaches_every_other_index() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[pick_next_index_with(&mut rng, 5, Some(2)).unwrap()] = true;
        }
        assert_eq!(seen, [true, true, false, true, true]);
    }
}
