use std::marker::PhantomData;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

#[derive(Clone)]
pub struct FilterMapOp<S, F, B, Item> {
  source: S,
  func: F,
  _marker: PhantomData<(B, Item)>,
}

impl<S, F, B, Item> FilterMapOp<S, F, B, Item> {
  pub fn new(source: S, func: F) -> Self { FilterMapOp { source, func, _marker: PhantomData } }
}

impl<Item, B, Err, O, S, F> Observable<B, Err, O> for FilterMapOp<S, F, B, Item>
where
  O: Observer<B, Err>,
  S: Observable<Item, Err, FilterMapObserver<O, F>>,
  F: FnMut(Item) -> Option<B>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(FilterMapObserver { observer, func: self.func })
  }
}

impl<B, Err, S, F, Item> ObservableExt<B, Err> for FilterMapOp<S, F, B, Item> where
  S: ObservableExt<Item, Err>
{
}

pub struct FilterMapObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, B, Err, O, F> Observer<Item, Err> for FilterMapObserver<O, F>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> Option<B>,
{
  fn next(&mut self, value: Item) {
    if let Some(mapped) = (self.func)(value) {
      self.observer.next(mapped);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err); }

  #[inline]
  fn complete(self) { self.observer.complete(); }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
