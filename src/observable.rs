//! Observable: a lazy, restartable producer of notification streams.
//!
//! An observable is a description of work: nothing runs until
//! `actual_subscribe` is called, and every subscribe call starts an
//! independent production (subjects being the deliberate exception).
//! [`ObservableExt`] layers the operator and `subscribe` surface on top of
//! the core [`Observable`] contract.

use crate::{
  observer::{AllObserver, Observer, Publisher},
  ops::{
    box_it::BoxObservable,
    catch_error::CatchErrorOp,
    debounce::DebounceOp,
    delay::DelayOp,
    distinct_until_changed::{DistinctUntilChangedOp, DistinctUntilKeyChangedOp},
    filter::FilterOp,
    filter_map::FilterMapOp,
    finalize::FinalizeOp,
    map::MapOp,
    map_err::MapErrOp,
    merge::MergeOp,
    on_complete::OnCompleteOp,
    on_error::OnErrorOp,
    switch_map::SwitchMapOp,
    take::TakeOp,
    tap::TapOp,
  },
  scheduler::Duration,
  subscription::Subscription,
};

mod create;
mod from_iter;
mod interval;
mod of;
mod timer;
mod trivial;

pub use create::{create, Create};
pub use from_iter::{from_iter, ObservableIter};
pub use interval::{interval, IntervalObservable};
pub use of::{of, ObservableOf};
pub use timer::{timer, TimerObservable};
pub use trivial::{empty, never, throw, Empty, Never, Throw};

/// The core producer contract: a function from an observer to a
/// subscription.
///
/// `O` is the concrete observer type a given subscribe call threads through
/// the chain; operators implement `Observable` for the wrapped observer
/// type of their source, so whole pipelines monomorphize without boxing.
pub trait Observable<Item, Err, O> {
  type Unsub: Subscription;

  /// Start producing into `observer`. Must not emit before being called
  /// (laziness) and must never panic for producer-side failures; those
  /// travel as `error` notifications.
  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

fn noop_error<Err>(_: Err) {}

fn noop_complete() {}

/// Operator and subscription surface of every observable.
pub trait ObservableExt<Item, Err>: Sized {
  /// Transform each value with `f`.
  ///
  /// # Example
  ///
  /// ```rust
  /// use ripple::prelude::*;
  ///
  /// observable::from_iter(100..101)
  ///   .map(|v| v * 2)
  ///   .subscribe(|v| assert_eq!(v, 200));
  /// ```
  fn map<B, F>(self, f: F) -> MapOp<Self, F, B, Item>
  where
    F: FnMut(Item) -> B,
  {
    MapOp::new(self, f)
  }

  /// Transform the terminal error value with `f`.
  fn map_err<E, F>(self, f: F) -> MapErrOp<Self, F, Err>
  where
    F: FnOnce(Err) -> E,
  {
    MapErrOp::new(self, f)
  }

  /// Keep only the values for which `predicate` returns `true`. Dropped
  /// values produce no notification at all.
  fn filter<F>(self, predicate: F) -> FilterOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    FilterOp::new(self, predicate)
  }

  /// Filter and map in one pass: values mapped to `None` are dropped.
  fn filter_map<B, F>(self, f: F) -> FilterMapOp<Self, F, B, Item>
  where
    F: FnMut(Item) -> Option<B>,
  {
    FilterMapOp::new(self, f)
  }

  /// Pass the first `count` values through, then complete and stop
  /// observing the source. `take(0)` completes immediately without
  /// observing any source notification.
  ///
  /// # Example
  ///
  /// ```rust
  /// use ripple::prelude::*;
  ///
  /// let mut seen = vec![];
  /// observable::from_iter(0..100).take(5).subscribe(|v| seen.push(v));
  /// assert_eq!(seen, vec![0, 1, 2, 3, 4]);
  /// ```
  fn take(self, count: usize) -> TakeOp<Self> { TakeOp::new(self, count) }

  /// Suppress values equal to the immediately preceding one. The first
  /// value always passes.
  fn distinct_until_changed(self) -> DistinctUntilChangedOp<Self> {
    DistinctUntilChangedOp::new(self)
  }

  /// Like [`distinct_until_changed`](Self::distinct_until_changed), but
  /// compares the keys extracted by `key` instead of whole values.
  fn distinct_until_key_changed<Key, F>(self, key: F) -> DistinctUntilKeyChangedOp<Self, F>
  where
    F: FnMut(&Item) -> Key,
  {
    DistinctUntilKeyChangedOp::new(self, key)
  }

  /// Only emit a value once `duration` has elapsed with no newer value;
  /// each incoming value resets the timer and replaces the pending one. A
  /// pending value is flushed when the source completes.
  fn debounce<SD>(self, duration: Duration, scheduler: SD) -> DebounceOp<Self, SD> {
    DebounceOp::new(self, duration, scheduler)
  }

  /// Shift every value and the completion by `delay` on `scheduler`.
  /// Errors are not delayed.
  fn delay<SD>(self, delay: Duration, scheduler: SD) -> DelayOp<Self, SD> {
    DelayOp::new(self, delay, scheduler)
  }

  /// Map each value to an inner observable and forward only the most
  /// recent inner stream, unsubscribing the previous one first. At most
  /// one inner subscription is alive at any time; completion waits for
  /// both the source and the active inner stream.
  fn switch_map<Inner, F>(self, f: F) -> SwitchMapOp<Self, F, Item>
  where
    F: FnMut(Item) -> Inner,
  {
    SwitchMapOp::new(self, f)
  }

  /// Recover from a terminal error by continuing with the observable
  /// returned by `f`. Errors of the fallback itself end the stream.
  fn catch_error<C, F>(self, f: F) -> CatchErrorOp<Self, F, Err>
  where
    F: FnOnce(Err) -> C,
  {
    CatchErrorOp::new(self, f)
  }

  /// Interleave this stream with `other`: values of both pass through as
  /// they arrive, completion waits for both, the first error wins.
  fn merge<S>(self, other: S) -> MergeOp<Self, S> { MergeOp::new(self, other) }

  /// Observe each value by reference without changing value or timing.
  fn tap<F>(self, f: F) -> TapOp<Self, F>
  where
    F: FnMut(&Item),
  {
    TapOp::new(self, f)
  }

  /// Run a side effect on the terminal error, consuming it. The resulting
  /// stream cannot error.
  fn on_error<F>(self, f: F) -> OnErrorOp<Self, F, Err>
  where
    F: FnOnce(Err),
  {
    OnErrorOp::new(self, f)
  }

  /// Run a side effect on successful completion.
  fn on_complete<F>(self, f: F) -> OnCompleteOp<Self, F>
  where
    F: FnOnce(),
  {
    OnCompleteOp::new(self, f)
  }

  /// Run `f` exactly once when the stream ends for any reason: error,
  /// completion, or disposal.
  fn finalize<F>(self, f: F) -> FinalizeOp<Self, F>
  where
    F: FnOnce(),
  {
    FinalizeOp::new(self, f)
  }

  /// Erase the concrete chain type, at the cost of boxing the observer and
  /// the subscription.
  fn box_it(self) -> BoxObservable<Item, Err>
  where
    Self: Observable<Item, Err, Box<dyn Publisher<Item, Err>>> + 'static,
    Self::Unsub: 'static,
  {
    BoxObservable::new(self)
  }

  /// Subscribe with a `next` callback; errors and completion are ignored.
  fn subscribe<N>(self, next: N) -> Self::Unsub
  where
    N: FnMut(Item),
    Self: Observable<Item, Err, AllObserver<N, fn(Err), fn()>>,
  {
    self.actual_subscribe(AllObserver::new(next, noop_error as fn(Err), noop_complete as fn()))
  }

  /// Subscribe with `next` and `error` callbacks.
  fn subscribe_err<N, E>(self, next: N, error: E) -> Self::Unsub
  where
    N: FnMut(Item),
    E: FnOnce(Err),
    Self: Observable<Item, Err, AllObserver<N, E, fn()>>,
  {
    self.actual_subscribe(AllObserver::new(next, error, noop_complete as fn()))
  }

  /// Subscribe with `next` and `complete` callbacks.
  fn subscribe_complete<N, C>(self, next: N, complete: C) -> Self::Unsub
  where
    N: FnMut(Item),
    C: FnOnce(),
    Self: Observable<Item, Err, AllObserver<N, fn(Err), C>>,
  {
    self.actual_subscribe(AllObserver::new(next, noop_error as fn(Err), complete))
  }

  /// Subscribe with all three callbacks.
  fn subscribe_all<N, E, C>(self, next: N, error: E, complete: C) -> Self::Unsub
  where
    N: FnMut(Item),
    E: FnOnce(Err),
    C: FnOnce(),
    Self: Observable<Item, Err, AllObserver<N, E, C>>,
  {
    self.actual_subscribe(AllObserver::new(next, error, complete))
  }

  /// Subscribe with a full [`Observer`] implementation.
  fn subscribe_with<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item, Err>,
    Self: Observable<Item, Err, O>,
  {
    self.actual_subscribe(observer)
  }
}
