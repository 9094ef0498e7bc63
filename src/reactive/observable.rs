// SPDX-License-Identifier: PMPL-1.0-or-later

//! Single-threaded observable cell.
//!
//! Writes publish, reads never do. A write that stores a value equal to the
//! current one (by `PartialEq`) is dropped entirely: no version bump, no
//! notification. Subscribers run after the new value is in place and while
//! no borrow is held, so a callback may read the cell (or anything built on
//! it) and sees the value it is being notified about.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Cell<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<dyn Fn(&T)>>,
}

/// Shared observable value. Clones are handles onto the same cell.
pub struct Observable<T> {
    cell: Rc<RefCell<Cell<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.cell.borrow();
        f.debug_struct("Observable")
            .field("value", &cell.value)
            .field("version", &cell.version)
            .field("subscribers", &cell.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Cell {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        self.cell.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.borrow().value)
    }

    /// Replace the value. Returns `true` when it changed and subscribers
    /// were notified.
    pub fn set(&self, value: T) -> bool {
        {
            let mut cell = self.cell.borrow_mut();
            if cell.value == value {
                return false;
            }
            cell.value = value;
            cell.version += 1;
        }
        self.notify();
        true
    }

    /// Register `callback` for every future change. The callback stays
    /// registered as long as the returned [`Subscription`] lives.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(callback);
        let mut cell = self.cell.borrow_mut();
        cell.subscribers.retain(|weak| weak.strong_count() > 0);
        cell.subscribers.push(Rc::downgrade(&callback));
        drop(cell);
        Subscription {
            _callback: Box::new(callback),
        }
    }

    /// Number of value-changing writes since construction.
    pub fn version(&self) -> u64 {
        self.cell.borrow().version
    }

    /// Registered callbacks, counting dropped ones not yet pruned.
    pub fn subscriber_count(&self) -> usize {
        self.cell.borrow().subscribers.len()
    }

    /// A callback that writes a new value starts a nested round that
    /// reaches every subscriber; the outer round stops there so nobody is
    /// handed the superseded value afterwards.
    fn notify(&self) {
        let (value, version, callbacks): (T, u64, Vec<Callback<T>>) = {
            let mut cell = self.cell.borrow_mut();
            cell.subscribers.retain(|weak| weak.strong_count() > 0);
            let live = cell.subscribers.iter().filter_map(Weak::upgrade).collect();
            (cell.value.clone(), cell.version, live)
        };
        for callback in &callbacks {
            if self.version() != version {
                break;
            }
            callback(&value);
        }
    }
}

/// Keeps a subscriber callback alive; dropping it unsubscribes.
pub struct Subscription {
    _callback: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;

    fn counter(obs: &Observable<u32>) -> (Rc<StdCell<u32>>, Subscription) {
        let hits = Rc::new(StdCell::new(0));
        let seen = Rc::clone(&hits);
        let sub = obs.subscribe(move |_| seen.set(seen.get() + 1));
        (hits, sub)
    }

    #[test]
    fn set_bumps_version_once_per_change() {
        let obs = Observable::new(1u32);
        assert!(obs.set(2));
        assert!(!obs.set(2));
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn equal_write_does_not_notify() {
        let obs = Observable::new(1u32);
        let (hits, _sub) = counter(&obs);
        obs.set(1);
        assert_eq!(hits.get(), 0);
        obs.set(3);
        obs.set(3);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn reads_never_notify() {
        let obs = Observable::new(7u32);
        let (hits, _sub) = counter(&obs);
        let _ = obs.get();
        let _ = obs.with(|v| *v + 1);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn callback_observes_new_value_through_handle() {
        let obs = Observable::new(0u32);
        let reader = obs.clone();
        let seen = Rc::new(StdCell::new(0));
        let seen_in = Rc::clone(&seen);
        let _sub = obs.subscribe(move |_| seen_in.set(reader.get()));
        obs.set(9);
        assert_eq!(seen.get(), 9);
    }

    #[test]
    fn dropped_subscription_is_pruned() {
        let obs = Observable::new(0u32);
        let (hits, sub) = counter(&obs);
        let (_other_hits, _other) = counter(&obs);
        obs.set(1);
        drop(sub);
        obs.set(2);
        assert_eq!(hits.get(), 1);
        assert_eq!(obs.subscriber_count(), 1);
    }

    #[test]
    fn subscribe_prunes_dropped_subscriptions() {
        let obs = Observable::new(0u32);
        let _kept = obs.subscribe(|_| {});
        for _ in 0..10_000 {
            let sub = obs.subscribe(|_| {});
            drop(sub);
        }
        assert_eq!(obs.subscriber_count(), 2);
        let _last = obs.subscribe(|_| {});
        assert_eq!(obs.subscriber_count(), 2);
    }

    #[test]
    fn nested_write_supersedes_outer_round() {
        let obs = Observable::new(0u32);
        let writer = obs.clone();
        let _bounce = obs.subscribe(move |v| {
            if *v == 1 {
                writer.set(2);
            }
        });
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let _watch = obs.subscribe(move |v| log.borrow_mut().push(*v));

        obs.set(1);
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 2);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn notifies_in_registration_order() {
        let obs = Observable::new(0u32);
        let order = Rc::new(RefCell::new(Vec::new()));
        let subs: Vec<Subscription> = ['a', 'b', 'c']
            .into_iter()
            .map(|tag| {
                let order = Rc::clone(&order);
                obs.subscribe(move |_| order.borrow_mut().push(tag))
            })
            .collect();
        obs.set(1);
        assert_eq!(*order.borrow(), vec!['a', 'b', 'c']);
        drop(subs);
    }
}
