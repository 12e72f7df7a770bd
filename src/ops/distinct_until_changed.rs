//! Suppress consecutive duplicate values.

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

/// Emits a value only if it differs from the immediately preceding emitted
/// value. The first value always passes. Requires `Item: PartialEq + Clone`.
#[derive(Clone)]
pub struct DistinctUntilChangedOp<S> {
  source: S,
}

impl<S> DistinctUntilChangedOp<S> {
  pub fn new(source: S) -> Self { DistinctUntilChangedOp { source } }
}

impl<Item, Err, O, S> Observable<Item, Err, O> for DistinctUntilChangedOp<S>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, DistinctUntilChangedObserver<O, Item>>,
  Item: PartialEq + Clone,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(DistinctUntilChangedObserver { observer, last: None })
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for DistinctUntilChangedOp<S> where
  S: ObservableExt<Item, Err>
{
}

pub struct DistinctUntilChangedObserver<O, Item> {
  observer: O,
  last: Option<Item>,
}

impl<Item, Err, O> Observer<Item, Err> for DistinctUntilChangedObserver<O, Item>
where
  O: Observer<Item, Err>,
  Item: PartialEq + Clone,
{
  fn next(&mut self, value: Item) {
    if self.last.as_ref() != Some(&value) {
      self.last = Some(value.clone());
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err); }

  #[inline]
  fn complete(self) { self.observer.complete(); }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// Keyed variant: suppresses consecutive values whose extracted keys are
/// equal. Only the key needs `PartialEq`; values are moved through
/// untouched.
#[derive(Clone)]
pub struct DistinctUntilKeyChangedOp<S, F> {
  source: S,
  key: F,
}

impl<S, F> DistinctUntilKeyChangedOp<S, F> {
  pub fn new(source: S, key: F) -> Self { DistinctUntilKeyChangedOp { source, key } }
}

impl<Item, Err, Key, O, S, F> Observable<Item, Err, O> for DistinctUntilKeyChangedOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, DistinctUntilKeyChangedObserver<O, F, Key>>,
  F: FnMut(&Item) -> Key,
  Key: PartialEq,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(DistinctUntilKeyChangedObserver {
      observer,
      key: self.key,
      last: None,
    })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for DistinctUntilKeyChangedOp<S, F> where
  S: ObservableExt<Item, Err>
{
}

pub struct DistinctUntilKeyChangedObserver<O, F, Key> {
  observer: O,
  key: F,
  last: Option<Key>,
}

impl<Item, Err, Key, O, F> Observer<Item, Err> for DistinctUntilKeyChangedObserver<O, F, Key>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> Key,
  Key: PartialEq,
{
  fn next(&mut self, value: Item) {
    let key = (self.key)(&value);
    if self.last.as_ref() != Some(&key) {
      self.last = Some(key);
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err); }

  #[inline]
  fn complete(self) { self.observer.complete(); }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn consecutive_duplicates_are_dropped() {
    let mut seen = vec![];
    observable::from_iter([1, 2, 2, 1, 2, 3])
      .distinct_until_changed()
      .subscribe(|v| seen.push(v));

    assert_eq!(seen, vec![1, 2, 1, 2, 3]);
  }

  #[test]
  fn first_value_always_passes() {
    let mut seen = vec![];
    observable::from_iter([7, 7, 7]).distinct_until_changed().subscribe(|v| seen.push(v));
    assert_eq!(seen, vec![7]);
  }

  #[test]
  fn keyed_comparison() {
    let mut seen = vec![];
    observable::from_iter([(1, 'a'), (1, 'b'), (2, 'c'), (2, 'd'), (1, 'e')])
      .distinct_until_key_changed(|pair: &(i32, char)| pair.0)
      .subscribe(|v| seen.push(v));

    assert_eq!(seen, vec![(1, 'a'), (2, 'c'), (1, 'e')]);
  }
}
