//! Subscription: the cancellation side of a stream.
//!
//! A subscription owns whatever resources one active observation holds:
//! timer handles, inner subscriptions, buffered values. Disposal is
//! synchronous and consumes the handle, so a single handle cannot be
//! disposed twice; shared handles (slots, boxes, task handles) absorb a
//! second disposal as a no-op.

use crate::rc::{MutRc, RcDeref, RcDerefMut};

/// Handle returned by `subscribe`, used to cancel the production early.
pub trait Subscription {
  /// Stop the production and release every resource this subscription owns.
  /// Cancellation propagates upstream: disposing an operator's subscription
  /// disposes all sources and children it holds.
  fn unsubscribe(self);

  fn is_closed(&self) -> bool;
}

/// Synchronous sources finish before `subscribe` returns; their
/// subscription is the unit value.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

/// Pairs two subscriptions so operators that own a source plus one extra
/// resource (a timer slot, an inner subscription) can hand back a single
/// handle.
pub struct ZipSubscription<A, B> {
  a: A,
  b: B,
}

impl<A, B> ZipSubscription<A, B> {
  #[inline]
  pub fn new(a: A, b: B) -> Self { ZipSubscription { a, b } }
}

impl<A, B> Subscription for ZipSubscription<A, B>
where
  A: Subscription,
  B: Subscription,
{
  fn unsubscribe(self) {
    self.a.unsubscribe();
    self.b.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.a.is_closed() && self.b.is_closed() }
}

// ============================================================================
// Boxed subscriptions
// ============================================================================

/// Object-safe mirror of [`Subscription`]; `unsubscribe` consumes the box.
pub trait DynSubscription {
  fn dyn_unsubscribe(self: Box<Self>);
  fn dyn_is_closed(&self) -> bool;
}

impl<S: Subscription> DynSubscription for S {
  #[inline]
  fn dyn_unsubscribe(self: Box<Self>) { (*self).unsubscribe(); }

  #[inline]
  fn dyn_is_closed(&self) -> bool { self.is_closed() }
}

/// Type-erased subscription, for slots that hold changing upstream handles
/// (e.g. the current inner subscription of `switch_map`).
pub struct BoxSubscription(Box<dyn DynSubscription>);

impl BoxSubscription {
  pub fn new<S: Subscription + 'static>(subscription: S) -> Self {
    BoxSubscription(Box::new(subscription))
  }
}

impl Subscription for BoxSubscription {
  #[inline]
  fn unsubscribe(self) { self.0.dyn_unsubscribe(); }

  #[inline]
  fn is_closed(&self) -> bool { self.0.dyn_is_closed() }
}

/// Wraps a teardown closure; `observable::create` producers return one to
/// release whatever resource the producer acquired.
pub struct ClosureSubscription<F>(pub F);

impl<F: FnOnce()> Subscription for ClosureSubscription<F> {
  #[inline]
  fn unsubscribe(self) { (self.0)() }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// A shared slot holding at most one subscription. All clones observe the
/// same slot, so the first disposal wins and every later one is a no-op.
impl<S: Subscription> Subscription for MutRc<Option<S>> {
  fn unsubscribe(self) {
    let inner = self.rc_deref_mut().take();
    if let Some(subscription) = inner {
      subscription.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.rc_deref().as_ref().map_or(true, |s| s.is_closed()) }
}

#[cfg(test)]
mod test {
  use std::{cell::Cell, rc::Rc};

  use super::*;

  #[test]
  fn zip_unsubscribes_both() {
    let released = Rc::new(Cell::new(0));
    let a = released.clone();
    let b = released.clone();
    let zip = ZipSubscription::new(
      ClosureSubscription(move || a.set(a.get() + 1)),
      ClosureSubscription(move || b.set(b.get() + 1)),
    );

    assert!(!zip.is_closed());
    zip.unsubscribe();
    assert_eq!(released.get(), 2);
  }

  #[test]
  fn shared_slot_releases_once() {
    let released = Rc::new(Cell::new(0));
    let counter = released.clone();
    let slot: MutRc<Option<ClosureSubscription<_>>> =
      MutRc::own(Some(ClosureSubscription(move || counter.set(counter.get() + 1))));

    let first = slot.clone();
    let second = slot.clone();
    first.unsubscribe();
    second.unsubscribe();
    slot.unsubscribe();

    assert_eq!(released.get(), 1);
  }

  #[test]
  fn boxed_subscription_forwards() {
    let released = Rc::new(Cell::new(false));
    let flag = released.clone();
    let boxed = BoxSubscription::new(ClosureSubscription(move || flag.set(true)));

    boxed.unsubscribe();
    assert!(released.get());
  }
}
