use std::{convert::Infallible, marker::PhantomData};

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

/// Consumes the terminal error with a side-effect callback; the resulting
/// stream's error channel is `Infallible`.
pub struct OnErrorOp<S, F, Err> {
  source: S,
  func: F,
  _marker: PhantomData<Err>,
}

impl<S, F, Err> OnErrorOp<S, F, Err> {
  pub fn new(source: S, func: F) -> Self { OnErrorOp { source, func, _marker: PhantomData } }
}

impl<Item, Err, O, S, F> Observable<Item, Infallible, O> for OnErrorOp<S, F, Err>
where
  O: Observer<Item, Infallible>,
  S: Observable<Item, Err, OnErrorObserver<O, F>>,
  F: FnOnce(Err),
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(OnErrorObserver { observer, func: self.func })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Infallible> for OnErrorOp<S, F, Err> {}

pub struct OnErrorObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, Err, O, F> Observer<Item, Err> for OnErrorObserver<O, F>
where
  O: Observer<Item, Infallible>,
  F: FnOnce(Err),
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value); }

  #[inline]
  fn error(self, err: Err) { (self.func)(err); }

  #[inline]
  fn complete(self) { self.observer.complete(); }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn error_is_consumed() {
    let mut observed = None;
    let mut completed = false;
    observable::throw::<i32, _>("boom")
      .on_error(|e| observed = Some(e))
      .subscribe_complete(|_| {}, || completed = true);

    assert_eq!(observed, Some("boom"));
    assert!(!completed);
  }
}
