use std::marker::PhantomData;

use crate::observable::{Observable, ObservableExt};
use crate::observer::{Emitter, Observer};
use crate::subscription::Subscription;

/// Creates an observable from a producer closure.
///
/// The closure runs at subscribe time and pushes notifications through a
/// `&mut dyn Emitter`. It may return a teardown [`Subscription`] (or `()`
/// when there is nothing to release); disposing the subscribe handle runs
/// the teardown.
///
/// Emissions after a terminal notification are absorbed, so a sloppy
/// producer cannot violate the terminal invariant.
///
/// # Example
///
/// ```rust
/// use ripple::prelude::*;
///
/// let mut sum = 0;
/// observable::create(|emitter: &mut dyn Emitter<i32, ()>| {
///   emitter.next(1);
///   emitter.next(2);
///   emitter.complete();
///   emitter.next(3); // absorbed
/// })
/// .subscribe(|v| sum += v);
/// assert_eq!(sum, 3);
/// ```
pub fn create<F, Item, Err, U>(subscribe: F) -> Create<F, Item, Err>
where
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> U,
  U: Subscription,
{
  Create { f: subscribe, _marker: PhantomData }
}

#[derive(Clone)]
pub struct Create<F, Item, Err> {
  f: F,
  _marker: PhantomData<(Item, Err)>,
}

/// Guards the terminal invariant for the producer closure.
struct CreateEmitter<O>(Option<O>);

impl<O, Item, Err> Emitter<Item, Err> for CreateEmitter<O>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.0.next(value); }

  #[inline]
  fn error(&mut self, err: Err) { self.0.take().error(err); }

  #[inline]
  fn complete(&mut self) { self.0.take().complete(); }
}

impl<F, Item, Err, O, U> Observable<Item, Err, O> for Create<F, Item, Err>
where
  O: Observer<Item, Err>,
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> U,
  U: Subscription,
{
  type Unsub = U;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut emitter = CreateEmitter(Some(observer));
    (self.f)(&mut emitter)
  }
}

impl<F, Item, Err> ObservableExt<Item, Err> for Create<F, Item, Err> {}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn next_then_complete() {
    let emitted = Rc::new(RefCell::new(vec![]));
    let e = emitted.clone();

    observable::create(|emitter: &mut dyn Emitter<i32, ()>| {
      emitter.next(1);
      emitter.next(2);
      emitter.complete();
    })
    .subscribe(move |v| e.borrow_mut().push(v));

    assert_eq!(*emitted.borrow(), vec![1, 2]);
  }

  #[test]
  fn error_reaches_the_observer() {
    let mut error = None;

    observable::create(|emitter: &mut dyn Emitter<(), &str>| {
      emitter.error("oops");
    })
    .subscribe_err(|_| {}, |e| error = Some(e));

    assert_eq!(error, Some("oops"));
  }

  #[test]
  fn nothing_leaks_after_terminal() {
    let mut values = vec![];
    let mut errors = 0;

    observable::create(|emitter: &mut dyn Emitter<i32, ()>| {
      emitter.next(1);
      emitter.complete();
      emitter.next(2);
      emitter.error(());
    })
    .subscribe_err(|v| values.push(v), |_| errors += 1);

    assert_eq!(values, vec![1]);
    assert_eq!(errors, 0);
  }

  #[test]
  fn teardown_runs_on_unsubscribe() {
    let released = Rc::new(RefCell::new(false));
    let r = released.clone();

    let subscription = observable::create(move |emitter: &mut dyn Emitter<i32, ()>| {
      emitter.next(1);
      ClosureSubscription(move || *r.borrow_mut() = true)
    })
    .subscribe(|_| {});

    assert!(!*released.borrow());
    subscription.unsubscribe();
    assert!(*released.borrow());
  }
}
