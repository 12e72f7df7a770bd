use std::marker::PhantomData;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

#[derive(Clone)]
pub struct MapOp<S, F, B, Item> {
  source: S,
  func: F,
  _marker: PhantomData<(B, Item)>,
}

impl<S, F, B, Item> MapOp<S, F, B, Item> {
  pub fn new(source: S, func: F) -> Self { MapOp { source, func, _marker: PhantomData } }
}

impl<Item, B, Err, O, S, F> Observable<B, Err, O> for MapOp<S, F, B, Item>
where
  O: Observer<B, Err>,
  S: Observable<Item, Err, MapObserver<O, F>>,
  F: FnMut(Item) -> B,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(MapObserver { observer, func: self.func })
  }
}

impl<B, Err, S, F, Item> ObservableExt<B, Err> for MapOp<S, F, B, Item> where
  S: ObservableExt<Item, Err>
{
}

pub struct MapObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, B, Err, O, F> Observer<Item, Err> for MapObserver<O, F>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> B,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next((self.func)(value)); }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err); }

  #[inline]
  fn complete(self) { self.observer.complete(); }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
