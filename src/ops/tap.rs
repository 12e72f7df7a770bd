use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

#[derive(Clone)]
pub struct TapOp<S, F> {
  source: S,
  func: F,
}

impl<S, F> TapOp<S, F> {
  pub fn new(source: S, func: F) -> Self { TapOp { source, func } }
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for TapOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, TapObserver<O, F>>,
  F: FnMut(&Item),
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(TapObserver { observer, func: self.func })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for TapOp<S, F> where S: ObservableExt<Item, Err> {}

pub struct TapObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, Err, O, F> Observer<Item, Err> for TapObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item),
{
  fn next(&mut self, value: Item) {
    (self.func)(&value);
    self.observer.next(value);
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err); }

  #[inline]
  fn complete(self) { self.observer.complete(); }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
