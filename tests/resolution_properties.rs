//! Resolution behaviour through the public coordinator API.
//!
//! Covers the two policies the coordinator is normally run with (portrait
//! default as a hard ceiling, and all-orientations with overriding) plus the
//! order-independence and never-empty guarantees.

use std::sync::Arc;

use interface_orientation::*;
use parking_lot::Mutex;

const P: OrientationMask = OrientationMask::PORTRAIT;
const U: OrientationMask = OrientationMask::PORTRAIT_UPSIDE_DOWN;
const L: OrientationMask = OrientationMask::LANDSCAPE_LEFT;
const R: OrientationMask = OrientationMask::LANDSCAPE_RIGHT;

fn coordinator(default: OrientationMask, allow_override: bool) -> Coordinator {
    Coordinator::headless(Policy::new(default, allow_override))
}

fn register_all(coordinator: &Coordinator, masks: &[OrientationMask]) -> Vec<RegistrantId> {
    masks
        .iter()
        .map(|&mask| {
            let id = RegistrantId::new();
            coordinator.register(id, mask);
            id
        })
        .collect()
}

/// Every non-empty mask.
fn non_empty_masks() -> Vec<OrientationMask> {
    (0..=OrientationMask::ALL.bits())
        .map(OrientationMask::from_bits_truncate)
        .filter(|m| !m.is_empty())
        .fold(Vec::new(), |mut acc, m| {
            if !acc.contains(&m) {
                acc.push(m);
            }
            acc
        })
}

// ============================================================
// Portrait default, no overriding
// ============================================================

mod portrait_ceiling {
    use super::*;

    #[test]
    fn no_registrants_returns_default() {
        assert_eq!(coordinator(P, false).supported_orientations(), P);
    }

    #[test]
    fn landscape_only_falls_back_to_portrait() {
        let c = coordinator(P, false);
        register_all(&c, &[L]);
        assert_eq!(c.supported_orientations(), P);
    }

    #[test]
    fn any_single_mask_stays_under_ceiling() {
        for mask in non_empty_masks() {
            let c = coordinator(P, false);
            register_all(&c, &[mask]);
            assert_eq!(c.supported_orientations(), P, "registered {mask}");
        }
    }

    #[test]
    fn intersection_containing_portrait() {
        let c = coordinator(P, false);
        register_all(&c, &[P, P | L, P | L | R]);
        assert_eq!(c.supported_orientations(), P);
    }
}

// ============================================================
// All orientations, overriding allowed
// ============================================================

mod all_with_override {
    use super::*;

    #[test]
    fn no_registrants_returns_all() {
        assert_eq!(
            coordinator(OrientationMask::ALL, true).supported_orientations(),
            OrientationMask::ALL
        );
    }

    #[test]
    fn intersection_of_overlapping_masks() {
        let c = coordinator(OrientationMask::ALL, true);
        register_all(&c, &[P | L, P | L | R, P]);
        assert_eq!(c.supported_orientations(), P);
    }

    #[test]
    fn disjoint_singletons_fall_back_to_all() {
        let c = coordinator(OrientationMask::ALL, true);
        register_all(&c, &[P, L, R]);
        assert_eq!(c.supported_orientations(), OrientationMask::ALL);
    }

    #[test]
    fn conflict_clears_when_view_leaves() {
        let c = coordinator(OrientationMask::ALL, true);
        let ids = register_all(&c, &[P | U, L]);
        assert_eq!(c.supported_orientations(), OrientationMask::ALL);
        c.unregister(ids[1]);
        assert_eq!(c.supported_orientations(), P | U);
    }
}

// ============================================================
// Lifecycle and invariants
// ============================================================

#[test]
fn unregistering_last_restores_default() {
    for (default, allow_override) in [(P, false), (OrientationMask::LANDSCAPE, true)] {
        let c = coordinator(default, allow_override);
        let ids = register_all(&c, &[P | L, L]);
        for id in ids {
            c.unregister(id);
        }
        assert_eq!(c.supported_orientations(), default);
        assert_eq!(c.registrant_count(), 0);
    }
}

#[test]
fn overwrite_replaces_previous_mask() {
    let c = coordinator(OrientationMask::ALL, true);
    let id = RegistrantId::new();
    c.register(id, P);
    c.register(id, L | R);
    assert_eq!(c.registrant_count(), 1);
    assert_eq!(c.supported_orientations(), L | R);
}

#[test]
fn resolved_mask_is_never_empty() {
    let masks = non_empty_masks();
    for allow_override in [false, true] {
        for &default in &masks {
            let c = coordinator(default, allow_override);
            for &mask in &masks {
                c.register(RegistrantId::new(), mask);
                assert!(
                    !c.supported_orientations().is_empty(),
                    "empty after adding {mask} (default {default}, override {allow_override})"
                );
            }
        }
    }
}

#[test]
fn registration_order_does_not_matter() {
    let entries: Vec<(RegistrantId, OrientationMask)> =
        [P | L | R, P | L, P | U | L, OrientationMask::ALL]
            .into_iter()
            .map(|mask| (RegistrantId::new(), mask))
            .collect();

    // Heap's algorithm over all 24 orderings.
    fn permutations<T: Clone>(items: &mut Vec<T>, k: usize, out: &mut Vec<Vec<T>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        permutations(items, k - 1, out);
        for i in 0..k - 1 {
            let j = if k % 2 == 0 { i } else { 0 };
            items.swap(j, k - 1);
            permutations(items, k - 1, out);
        }
    }
    let mut orderings = Vec::new();
    permutations(&mut entries.clone(), entries.len(), &mut orderings);
    assert_eq!(orderings.len(), 24);

    for allow_override in [false, true] {
        let results: Vec<_> = orderings
            .iter()
            .map(|ordering| {
                let c = coordinator(P | L, allow_override);
                for &(id, mask) in ordering {
                    c.register(id, mask);
                }
                c.supported_orientations()
            })
            .collect();
        assert!(
            results.windows(2).all(|w| w[0] == w[1]),
            "order-dependent result: {results:?}"
        );
        assert_eq!(results[0], P | L);
    }
}

#[test]
fn subscribers_see_every_recompute_in_order() {
    let c = coordinator(OrientationMask::ALL, true);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    c.subscribe(move |update: OrientationUpdate| sink.lock().push(update.resolved_mask));

    let ids = register_all(&c, &[P | L, L]);
    c.unregister(ids[1]);
    c.unregister(ids[0]);

    assert_eq!(*seen.lock(), vec![P | L, L, P | L, OrientationMask::ALL]);
}

#[test]
fn independent_subscribers_all_receive_updates() {
    let c = coordinator(P, false);
    let counts: Vec<_> = (0..3)
        .map(|_| {
            let count = Arc::new(Mutex::new(0usize));
            let sink = Arc::clone(&count);
            c.subscribe(move |_| *sink.lock() += 1);
            count
        })
        .collect();

    register_all(&c, &[P, L]);

    for count in counts {
        assert_eq!(*count.lock(), 2);
    }
}

#[test]
fn concurrent_registration_from_threads() {
    let c = Arc::new(coordinator(OrientationMask::ALL, true));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let c = Arc::clone(&c);
            std::thread::spawn(move || {
                let mask = if i % 2 == 0 { P | L } else { P | R };
                for _ in 0..50 {
                    let id = RegistrantId::new();
                    c.register(id, mask);
                    assert!(!c.supported_orientations().is_empty());
                    c.unregister(id);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(c.registrant_count(), 0);
    assert_eq!(c.supported_orientations(), OrientationMask::ALL);
}
