use std::marker::PhantomData;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

#[derive(Clone)]
pub struct MapErrOp<S, F, Err> {
  source: S,
  func: F,
  _marker: PhantomData<Err>,
}

impl<S, F, Err> MapErrOp<S, F, Err> {
  pub fn new(source: S, func: F) -> Self { MapErrOp { source, func, _marker: PhantomData } }
}

impl<Item, Err, E, O, S, F> Observable<Item, E, O> for MapErrOp<S, F, Err>
where
  O: Observer<Item, E>,
  S: Observable<Item, Err, MapErrObserver<O, F>>,
  F: FnOnce(Err) -> E,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(MapErrObserver { observer, func: self.func })
  }
}

impl<Item, E, S, F, Err> ObservableExt<Item, E> for MapErrOp<S, F, Err> where
  S: ObservableExt<Item, Err>
{
}

pub struct MapErrObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, Err, E, O, F> Observer<Item, Err> for MapErrObserver<O, F>
where
  O: Observer<Item, E>,
  F: FnOnce(Err) -> E,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value); }

  #[inline]
  fn error(self, err: Err) { self.observer.error((self.func)(err)); }

  #[inline]
  fn complete(self) { self.observer.complete(); }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
