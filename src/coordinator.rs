//! The coordinator: registry, policy, cached resolution and change fan-out.
//!
//! One coordinator exists per running application. Construct it at startup,
//! wrap it in an [`Arc`](std::sync::Arc), and hand clones to the view layer
//! and to the platform glue that answers "which orientations are allowed".
//!
//! Every mutation runs as one critical section:
//!
//! ```text
//!   register / unregister / policy change
//!       │
//!       ▼
//!   resolve mask ──► refresh current orientation ──► notify subscribers
//!                                                         │
//!                                                         ▼
//!                                           host.request_orientation_update()
//! ```
//!
//! The lock is reentrant. Subscribers and the host may call any method from
//! inside a callback, including mutations: a mutation made while subscribers
//! are being notified takes effect immediately, and its update is queued and
//! delivered to every subscriber once the current round finishes. Other
//! threads block until the whole critical section, notifications included,
//! is over.
//!
//! The resolved mask and current orientation are also published to atomics,
//! so [`Coordinator::supported_orientations`] never takes the lock.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::ReentrantMutex;
use tracing::debug;

use crate::manifest;
use crate::orientation::{InterfaceOrientation, OrientationMask};
use crate::registry::{RegistrantId, Registry};
use crate::resolve::{Policy, resolve_mask};

/// The platform layer hosting the interface.
pub trait OrientationHost: Send + Sync {
    /// The orientation the interface is presented in right now.
    fn interface_orientation(&self) -> InterfaceOrientation;

    /// Ask the platform to query [`Coordinator::supported_orientations`] again.
    ///
    /// Fire-and-forget; the platform decides when to re-query.
    fn request_orientation_update(&self);
}

/// Host for headless use. Always reports `Unknown` and ignores update requests.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopHost;

impl OrientationHost for NoopHost {
    fn interface_orientation(&self) -> InterfaceOrientation {
        InterfaceOrientation::Unknown
    }

    fn request_orientation_update(&self) {}
}

/// Snapshot delivered to subscribers after every recompute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrientationUpdate {
    pub resolved_mask: OrientationMask,
    pub current_orientation: InterfaceOrientation,
}

/// Handle returned by [`Coordinator::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(OrientationUpdate) + Send>;

struct State {
    registry: Registry,
    policy: Policy,
    /// The callback slot is `None` while that subscriber is being called.
    subscribers: Vec<(SubscriptionId, Option<Subscriber>)>,
    next_subscription: u64,
    /// Updates waiting for delivery. Non-empty only while a round of
    /// notifications is running.
    pending: VecDeque<OrientationUpdate>,
    notifying: bool,
}

/// Resolves the supported interface orientations of an application.
///
/// ```
/// use interface_orientation::{Coordinator, OrientationMask, Policy, RegistrantId};
///
/// let coordinator = Coordinator::headless(Policy::new(OrientationMask::ALL, true));
///
/// let player = RegistrantId::new();
/// coordinator.register(player, OrientationMask::LANDSCAPE);
/// assert_eq!(coordinator.supported_orientations(), OrientationMask::LANDSCAPE);
///
/// coordinator.unregister(player);
/// assert_eq!(coordinator.supported_orientations(), OrientationMask::ALL);
/// ```
pub struct Coordinator<H: OrientationHost = NoopHost> {
    state: ReentrantMutex<RefCell<State>>,
    host: H,
    resolved: AtomicU8,
    current: AtomicU8,
}

impl Coordinator<NoopHost> {
    /// Coordinator without a platform host.
    pub fn headless(policy: Policy) -> Self {
        Self::new(policy, NoopHost)
    }
}

impl<H: OrientationHost> Coordinator<H> {
    /// Creates the coordinator and performs the initial resolution.
    pub fn new(policy: Policy, host: H) -> Self {
        let coordinator = Self {
            state: ReentrantMutex::new(RefCell::new(State {
                registry: Registry::new(),
                policy,
                subscribers: Vec::new(),
                next_subscription: 0,
                pending: VecDeque::new(),
                notifying: false,
            })),
            host,
            resolved: AtomicU8::new(policy.default_mask().bits()),
            current: AtomicU8::new(InterfaceOrientation::Unknown.to_raw()),
        };
        {
            let state = coordinator.state.lock();
            coordinator.recompute(&state);
        }
        coordinator
    }

    /// Creates the coordinator with the default mask read from manifest entries.
    ///
    /// Manifest problems are logged and degrade to [`OrientationMask::ALL`];
    /// see [`manifest::parse`].
    pub fn from_manifest<I, S>(names: I, allow_override: bool, host: H) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let result = manifest::parse(names);
        Self::new(Policy::new(result.mask, allow_override), host)
    }

    /// Inserts or replaces the constraint declared by `id`.
    ///
    /// `mask` must not be empty. Debug builds panic on an empty mask;
    /// release builds treat it as [`unregister`](Self::unregister).
    pub fn register(&self, id: RegistrantId, mask: OrientationMask) {
        let state = self.state.lock();
        state.borrow_mut().registry.register(id, mask);
        self.recompute(&state);
    }

    /// Removes the constraint declared by `id`. Unknown ids are ignored,
    /// but still trigger a recompute.
    pub fn unregister(&self, id: RegistrantId) {
        let state = self.state.lock();
        state.borrow_mut().registry.unregister(id);
        self.recompute(&state);
    }

    /// Replaces the default mask. An empty mask becomes [`OrientationMask::ALL`].
    pub fn set_default_mask(&self, mask: OrientationMask) {
        let state = self.state.lock();
        state.borrow_mut().policy.set_default_mask(mask);
        self.recompute(&state);
    }

    pub fn set_allow_override(&self, allow: bool) {
        let state = self.state.lock();
        state.borrow_mut().policy.set_allow_override(allow);
        self.recompute(&state);
    }

    pub fn policy(&self) -> Policy {
        self.state.lock().borrow().policy
    }

    /// Number of views currently declaring a constraint.
    pub fn registrant_count(&self) -> usize {
        self.state.lock().borrow().registry.len()
    }

    /// Entry point for the platform's orientation-change notification.
    ///
    /// Refreshes the current orientation from the host and notifies
    /// subscribers. The resolved mask cannot have changed, so the host is
    /// not asked to re-query.
    pub fn orientation_did_change(&self) {
        let state = self.state.lock();
        let update = OrientationUpdate {
            resolved_mask: self.supported_orientations(),
            current_orientation: self.refresh_current_orientation(),
        };
        debug!(current = %update.current_orientation, "interface orientation changed");
        notify(&state, update);
    }

    /// The orientations the platform should allow right now.
    ///
    /// Lock-free and never empty.
    pub fn supported_orientations(&self) -> OrientationMask {
        OrientationMask::from_bits_truncate(self.resolved.load(Ordering::Acquire))
    }

    /// The interface orientation observed at the last recompute or
    /// orientation-change notification.
    pub fn current_orientation(&self) -> InterfaceOrientation {
        InterfaceOrientation::from_raw(self.current.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Current snapshot, as subscribers would receive it.
    pub fn snapshot(&self) -> OrientationUpdate {
        OrientationUpdate {
            resolved_mask: self.supported_orientations(),
            current_orientation: self.current_orientation(),
        }
    }

    /// Calls `subscriber` after every recompute, whether or not anything changed.
    ///
    /// The callback runs synchronously on the mutating thread, inside the
    /// critical section. A subscriber added during a round of notifications
    /// receives the next update, not the one being delivered.
    pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(OrientationUpdate) + Send + 'static,
    {
        let state = self.state.lock();
        let mut state = state.borrow_mut();
        let id = SubscriptionId(state.next_subscription);
        state.next_subscription += 1;
        state.subscribers.push((id, Some(Box::new(subscriber))));
        id
    }

    /// Returns `false` if `id` was not subscribed. A subscriber may
    /// unsubscribe itself from inside its own callback.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let state = self.state.lock();
        let mut state = state.borrow_mut();
        let before = state.subscribers.len();
        state.subscribers.retain(|(sid, _)| *sid != id);
        state.subscribers.len() != before
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn recompute(&self, state: &RefCell<State>) {
        let (resolved_mask, registrants) = {
            let state = state.borrow();
            (resolve_mask(&state.registry, &state.policy), state.registry.len())
        };
        self.resolved.store(resolved_mask.bits(), Ordering::Release);
        let update = OrientationUpdate {
            resolved_mask,
            current_orientation: self.refresh_current_orientation(),
        };
        debug!(
            registrants,
            resolved = %update.resolved_mask,
            current = %update.current_orientation,
            "resolved supported interface orientations"
        );
        notify(state, update);
        self.host.request_orientation_update();
    }

    fn refresh_current_orientation(&self) -> InterfaceOrientation {
        let current = self.host.interface_orientation();
        self.current.store(current.to_raw(), Ordering::Release);
        current
    }
}

/// Deliver `update` to every subscriber, or queue it if a round is already
/// running further up the stack. No `RefCell` borrow is held while a
/// callback runs.
fn notify(state: &RefCell<State>, update: OrientationUpdate) {
    {
        let mut state = state.borrow_mut();
        state.pending.push_back(update);
        if state.notifying {
            return;
        }
        state.notifying = true;
    }
    let _round = NotifyRound(state);

    loop {
        let (update, ids) = {
            let mut state = state.borrow_mut();
            let Some(update) = state.pending.pop_front() else {
                break;
            };
            let ids: Vec<_> = state.subscribers.iter().map(|(id, _)| *id).collect();
            (update, ids)
        };
        for id in ids {
            let Some(mut subscriber) = take_subscriber(state, id) else {
                continue;
            };
            subscriber(update);
            let mut state = state.borrow_mut();
            // Gone if it unsubscribed during the call.
            if let Some((_, slot)) = state.subscribers.iter_mut().find(|(sid, _)| *sid == id) {
                *slot = Some(subscriber);
            }
        }
    }
}

fn take_subscriber(state: &RefCell<State>, id: SubscriptionId) -> Option<Subscriber> {
    state
        .borrow_mut()
        .subscribers
        .iter_mut()
        .find(|(sid, _)| *sid == id)
        .and_then(|(_, slot)| slot.take())
}

/// Ends a notification round, also when a subscriber panics.
struct NotifyRound<'a>(&'a RefCell<State>);

impl Drop for NotifyRound<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.0.try_borrow_mut() {
            state.notifying = false;
            state.pending.clear();
        }
    }
}

impl<H: OrientationHost + core::fmt::Debug> core::fmt::Debug for Coordinator<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Coordinator")
            .field("host", &self.host)
            .field("resolved", &self.supported_orientations())
            .field("current", &self.current_orientation())
            .finish_non_exhaustive()
    }
}
