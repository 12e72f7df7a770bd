//! Observer: the consuming side of a stream.
//!
//! An observer receives three kinds of notification: `next` for values,
//! `error` for a terminal failure, and `complete` for a successful end.
//! Terminal methods consume the observer, so once a stream has errored or
//! completed the type system itself forbids delivering anything further.

use std::convert::Infallible;

/// The consumer of a notification stream.
pub trait Observer<Item, Err> {
  /// Receive the next value.
  fn next(&mut self, value: Item);

  /// Receive the terminal error. Consumes the observer: nothing can be
  /// delivered after an error.
  fn error(self, err: Err);

  /// Receive successful completion. Consumes the observer: nothing can be
  /// delivered after completion.
  fn complete(self);

  /// `true` once this observer can no longer accept notifications.
  ///
  /// Sources use this to stop producing early, e.g. `from_iter` stops
  /// iterating and `interval` cancels its timer task once the downstream
  /// chain (a `take`, a disposed subscriber) is done.
  fn is_finished(&self) -> bool;
}

/// `None` absorbs every notification; `Some` delegates to the inner
/// observer. The canonical building block for slots that may already have
/// been torn down.
impl<O, Item, Err> Observer<Item, Err> for Option<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(observer) = self {
      observer.next(value);
    }
  }

  fn error(self, err: Err) {
    if let Some(observer) = self {
      observer.error(err);
    }
  }

  fn complete(self) {
    if let Some(observer) = self {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool { self.as_ref().map_or(true, |o| o.is_finished()) }
}

// ============================================================================
// Publisher: object-safe mirror of Observer
// ============================================================================

/// Object-safe mirror of [`Observer`], for boxed fan-out lists.
///
/// `Observer` is not object-safe because `error`/`complete` take `self` by
/// value; `Publisher` adapts them to `Box<Self>` so a `Box<dyn Publisher>`
/// can still consume itself on a terminal notification.
pub trait Publisher<Item, Err> {
  fn p_next(&mut self, value: Item);
  fn p_error(self: Box<Self>, err: Err);
  fn p_complete(self: Box<Self>);
  fn p_is_finished(&self) -> bool;
}

impl<T, Item, Err> Publisher<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  #[inline]
  fn p_next(&mut self, value: Item) { self.next(value); }

  #[inline]
  fn p_error(self: Box<Self>, err: Err) { (*self).error(err); }

  #[inline]
  fn p_complete(self: Box<Self>) { (*self).complete(); }

  #[inline]
  fn p_is_finished(&self) -> bool { self.is_finished() }
}

impl<'a, Item, Err> Observer<Item, Err> for Box<dyn Publisher<Item, Err> + 'a> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).p_next(value); }

  #[inline]
  fn error(self, err: Err) { self.p_error(err); }

  #[inline]
  fn complete(self) { self.p_complete(); }

  #[inline]
  fn is_finished(&self) -> bool { (**self).p_is_finished() }
}

// ============================================================================
// Emitter: the facade handed to `observable::create` closures
// ============================================================================

/// A `&mut`-only emission facade.
///
/// Producer closures (`observable::create`) receive a `&mut dyn Emitter`
/// instead of a concrete observer type, which keeps the producer decoupled
/// from whatever operator chain sits downstream. Implementations absorb
/// emissions after a terminal notification instead of panicking.
pub trait Emitter<Item, Err> {
  fn next(&mut self, value: Item);
  fn error(&mut self, err: Err);
  fn complete(&mut self);
}

// ============================================================================
// Closure adapters used by the subscribe family
// ============================================================================

/// Adapts up to three callbacks into an [`Observer`]; omitted callbacks are
/// no-ops at the `subscribe_*` call sites.
#[derive(Clone)]
pub struct AllObserver<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> AllObserver<N, E, C> {
  #[inline]
  pub fn new(next: N, error: E, complete: C) -> Self { AllObserver { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for AllObserver<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline]
  fn error(self, err: Err) { (self.error)(err); }

  #[inline]
  fn complete(self) { (self.complete)(); }

  #[inline]
  fn is_finished(&self) -> bool { false }
}

/// Marker for channels that cannot carry an error.
pub type NoError = Infallible;

#[cfg(test)]
mod test {
  use super::*;

  struct Collector {
    values: Vec<i32>,
  }

  impl Observer<i32, ()> for Collector {
    fn next(&mut self, value: i32) { self.values.push(value); }

    fn error(self, _: ()) {}

    fn complete(self) {}

    fn is_finished(&self) -> bool { false }
  }

  #[test]
  fn observer_receives_values() {
    let mut observer = Collector { values: vec![] };
    observer.next(1);
    observer.next(2);
    assert_eq!(observer.values, vec![1, 2]);
    assert!(!observer.is_finished());
  }

  #[test]
  fn none_absorbs_everything() {
    let mut slot: Option<Collector> = None;
    slot.next(1);
    assert!(slot.is_finished());
    slot.complete();
  }

  #[test]
  fn boxed_publisher_round_trip() {
    let mut count = 0;
    {
      let mut boxed: Box<dyn Publisher<i32, ()> + '_> =
        Box::new(AllObserver::new(|v: i32| count += v, |_: ()| {}, || {}));
      boxed.next(10);
      boxed.next(20);
      boxed.complete();
    }
    assert_eq!(count, 30);
  }
}
