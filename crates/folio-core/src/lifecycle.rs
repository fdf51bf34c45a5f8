//! Scoped ownership of host resources for one activation.
//!
//! Every listener a visualization registers goes into a [`SubscriptionSet`];
//! deactivation drains the set, so each handle is released exactly once no
//! matter how many activation cycles the page goes through.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::error::{CoreError, Result};

/// A registration that can be undone.
pub trait Subscription {
    fn unsubscribe(&mut self);
}

impl<S: Subscription + ?Sized> Subscription for Box<S> {
    fn unsubscribe(&mut self) {
        (**self).unsubscribe();
    }
}

/// Shared resources, e.g. one a render loop also reads from.
impl<S: Subscription> Subscription for Rc<RefCell<S>> {
    fn unsubscribe(&mut self) {
        self.borrow_mut().unsubscribe();
    }
}

/// Owned subscriptions, released together on `release_all` or drop.
pub struct SubscriptionSet<S: Subscription> {
    items: SmallVec<[S; 4]>,
}

impl<S: Subscription> Default for SubscriptionSet<S> {
    fn default() -> Self {
        Self {
            items: SmallVec::new(),
        }
    }
}

impl<S: Subscription> SubscriptionSet<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, subscription: S) {
        self.items.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Release everything held; returns how many were released. Idempotent.
    pub fn release_all(&mut self) -> usize {
        let n = self.items.len();
        for mut s in self.items.drain(..) {
            s.unsubscribe();
        }
        n
    }
}

impl<S: Subscription> Drop for SubscriptionSet<S> {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// Activation guard around a set of subscriptions.
pub struct Lifecycle<S: Subscription> {
    active: bool,
    subscriptions: SubscriptionSet<S>,
}

impl<S: Subscription> Default for Lifecycle<S> {
    fn default() -> Self {
        Self {
            active: false,
            subscriptions: SubscriptionSet::new(),
        }
    }
}

impl<S: Subscription> Lifecycle<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self) -> Result<()> {
        if self.active {
            return Err(CoreError::AlreadyActive);
        }
        self.active = true;
        Ok(())
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Track a subscription for this activation. Registrations made while
    /// inactive are released immediately.
    pub fn hold(&mut self, mut subscription: S) {
        if self.active {
            self.subscriptions.add(subscription);
        } else {
            subscription.unsubscribe();
        }
    }

    pub fn held(&self) -> usize {
        self.subscriptions.len()
    }

    /// Release everything; returns whether this call ended an activation.
    pub fn deactivate(&mut self) -> bool {
        let was_active = std::mem::replace(&mut self.active, false);
        self.subscriptions.release_all();
        was_active
    }
}

/// A lifecycle shared between a host handle and the registry.
pub type SharedLifecycle<S> = Rc<RefCell<Lifecycle<S>>>;

/// Activations keyed by the surface they draw to.
///
/// Only weak references are kept, so dropping a handle ends its claim as
/// surely as deactivating it. A key is live while its lifecycle exists and
/// is active.
pub struct ActivationRegistry<S: Subscription> {
    slots: HashMap<String, Weak<RefCell<Lifecycle<S>>>>,
}

impl<S: Subscription> Default for ActivationRegistry<S> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<S: Subscription> ActivationRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an activation for `key`, or fail with `AlreadyActive` while an
    /// earlier one on the same key is still live.
    pub fn claim(&mut self, key: &str) -> Result<SharedLifecycle<S>> {
        self.slots.retain(|_, slot| Self::is_live(slot));
        if self.slots.contains_key(key) {
            return Err(CoreError::AlreadyActive);
        }
        let lifecycle = Rc::new(RefCell::new(Lifecycle::new()));
        lifecycle.borrow_mut().activate()?;
        self.slots.insert(key.to_owned(), Rc::downgrade(&lifecycle));
        Ok(lifecycle)
    }

    /// Number of keys with a live activation.
    pub fn live(&self) -> usize {
        self.slots.values().filter(|slot| Self::is_live(slot)).count()
    }

    fn is_live(slot: &Weak<RefCell<Lifecycle<S>>>) -> bool {
        // a lifecycle borrowed mid-teardown still counts as live
        slot.upgrade()
            .is_some_and(|lc| lc.try_borrow().map_or(true, |lc| lc.is_active()))
    }
}
