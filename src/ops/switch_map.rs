//! Cancellation-aware switching: map each value to an inner observable and
//! forward only the most recent one.
//!
//! The previous inner subscription is disposed *before* the new inner
//! observable is subscribed, so at most one inner production is alive at
//! any time. Completion is deferred: the downstream completes only once
//! the source has completed *and* the active inner stream (if any) has
//! completed.

use std::marker::PhantomData;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::rc::{MutRc, RcDeref, RcDerefMut};
use crate::subscriber::Subscriber;
use crate::subscription::{BoxSubscription, Subscription, ZipSubscription};

#[derive(Clone)]
pub struct SwitchMapOp<S, F, Item> {
  source: S,
  func: F,
  _marker: PhantomData<Item>,
}

impl<S, F, Item> SwitchMapOp<S, F, Item> {
  pub fn new(source: S, func: F) -> Self { SwitchMapOp { source, func, _marker: PhantomData } }
}

struct SwitchState<O> {
  observer: Subscriber<O>,
  inner_sub: Option<BoxSubscription>,
  inner_alive: bool,
  outer_done: bool,
}

impl<Item, B, Err, O, S, F, Inner> Observable<B, Err, O> for SwitchMapOp<S, F, Item>
where
  O: Observer<B, Err>,
  S: Observable<Item, Err, SwitchMapOuterObserver<O, F, B>>,
  F: FnMut(Item) -> Inner,
  Inner: Observable<B, Err, SwitchMapInnerObserver<O>>,
  Inner::Unsub: 'static,
{
  type Unsub = ZipSubscription<S::Unsub, SwitchSubscription<O>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let state = MutRc::own(SwitchState {
      observer: Subscriber::new(observer),
      inner_sub: None,
      inner_alive: false,
      outer_done: false,
    });
    let unsub = self
      .source
      .actual_subscribe(SwitchMapOuterObserver {
        state: state.clone(),
        func: self.func,
        _marker: PhantomData,
      });
    ZipSubscription::new(unsub, SwitchSubscription(state))
  }
}

impl<B, Err, S, F, Item> ObservableExt<B, Err> for SwitchMapOp<S, F, Item> where
  S: ObservableExt<Item, Err>
{
}

pub struct SwitchMapOuterObserver<O, F, B> {
  state: MutRc<SwitchState<O>>,
  func: F,
  _marker: PhantomData<B>,
}

impl<Item, B, Err, O, F, Inner> Observer<Item, Err> for SwitchMapOuterObserver<O, F, B>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> Inner,
  Inner: Observable<B, Err, SwitchMapInnerObserver<O>>,
  Inner::Unsub: 'static,
{
  fn next(&mut self, value: Item) {
    if self.is_finished() {
      return;
    }

    // Dispose the stale inner production before the new one starts.
    let previous = self.state.rc_deref_mut().inner_sub.take();
    if let Some(previous) = previous {
      previous.unsubscribe();
    }

    self.state.rc_deref_mut().inner_alive = true;
    let inner = (self.func)(value);
    let unsub = inner.actual_subscribe(SwitchMapInnerObserver { state: self.state.clone() });

    let mut state = self.state.rc_deref_mut();
    if state.inner_alive && !state.observer.is_closed() {
      state.inner_sub = Some(BoxSubscription::new(unsub));
    }
    // Otherwise the inner stream already terminated synchronously and the
    // fresh handle has nothing left to cancel.
  }

  fn error(self, err: Err) {
    let (observer, inner) = {
      let mut state = self.state.rc_deref_mut();
      state.outer_done = true;
      (state.observer.clone(), state.inner_sub.take())
    };
    if let Some(inner) = inner {
      inner.unsubscribe();
    }
    observer.error(err);
  }

  fn complete(self) {
    let (observer, inner_alive) = {
      let mut state = self.state.rc_deref_mut();
      state.outer_done = true;
      (state.observer.clone(), state.inner_alive)
    };
    if !inner_alive {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool { self.state.rc_deref().observer.is_finished() }
}

pub struct SwitchMapInnerObserver<O> {
  state: MutRc<SwitchState<O>>,
}

impl<B, Err, O> Observer<B, Err> for SwitchMapInnerObserver<O>
where
  O: Observer<B, Err>,
{
  fn next(&mut self, value: B) {
    let mut observer = self.state.rc_deref().observer.clone();
    observer.next(value);
  }

  fn error(self, err: Err) {
    let observer = {
      let mut state = self.state.rc_deref_mut();
      state.inner_alive = false;
      let _ = state.inner_sub.take();
      state.observer.clone()
    };
    observer.error(err);
  }

  fn complete(self) {
    let (observer, outer_done) = {
      let mut state = self.state.rc_deref_mut();
      state.inner_alive = false;
      let _ = state.inner_sub.take();
      (state.observer.clone(), state.outer_done)
    };
    if outer_done {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool { self.state.rc_deref().observer.is_finished() }
}

/// Owns the shared switch state on behalf of the returned subscription:
/// disposal drops the downstream observer and cancels whichever inner
/// subscription is active at that moment.
pub struct SwitchSubscription<O>(MutRc<SwitchState<O>>);

impl<O> Subscription for SwitchSubscription<O> {
  fn unsubscribe(self) {
    let (observer, inner) = {
      let mut state = self.0.rc_deref_mut();
      (state.observer.clone(), state.inner_sub.take())
    };
    if let Some(inner) = inner {
      inner.unsubscribe();
    }
    observer.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().observer.is_closed() }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn only_the_latest_inner_is_observed() {
    let result = Rc::new(RefCell::new(vec![]));
    let r = result.clone();

    let mut outer = Subject::<i32, ()>::new();
    let mut inner1 = Subject::<&'static str, ()>::new();
    let mut inner2 = Subject::<&'static str, ()>::new();

    let inner1_for_map = inner1.clone();
    let inner2_for_map = inner2.clone();
    let _subscription = outer
      .clone()
      .switch_map(move |x| if x == 1 { inner1_for_map.clone() } else { inner2_for_map.clone() })
      .subscribe(move |v| r.borrow_mut().push(v));

    outer.next(1);
    inner1.next("a");

    outer.next(2); // switch: inner1 is unsubscribed here
    inner1.next("b"); // ignored
    inner2.next("c");

    assert_eq!(*result.borrow(), vec!["a", "c"]);
  }

  #[test]
  fn completion_waits_for_the_active_inner() {
    let completed = Rc::new(RefCell::new(false));
    let c = completed.clone();

    let mut outer = Subject::<i32, ()>::new();
    let inner = Subject::<i32, ()>::new();
    let inner_for_map = inner.clone();

    let _subscription = outer
      .clone()
      .switch_map(move |_| inner_for_map.clone())
      .subscribe_complete(|_| {}, move || *c.borrow_mut() = true);

    outer.next(1);
    outer.clone().complete();
    assert!(!*completed.borrow());

    inner.complete();
    assert!(*completed.borrow());
  }

  #[test]
  fn outer_completion_without_inner_completes_immediately() {
    let completed = Rc::new(RefCell::new(false));
    let c = completed.clone();

    let mut outer = Subject::<i32, ()>::new();
    let _subscription = outer
      .clone()
      .switch_map(|v| observable::of(v))
      .subscribe_complete(|_| {}, move || *c.borrow_mut() = true);

    outer.next(1); // `of` completes synchronously
    outer.complete();
    assert!(*completed.borrow());
  }

  #[test]
  fn inner_error_ends_the_stream() {
    let got_error = Rc::new(RefCell::new(false));
    let g = got_error.clone();

    let mut outer = Subject::<i32, &'static str>::new();
    let _subscription = outer
      .clone()
      .switch_map(|_| observable::throw("boom"))
      .subscribe_err(|_: ()| {}, move |_| *g.borrow_mut() = true);

    outer.next(1);
    assert!(*got_error.borrow());
  }
}
