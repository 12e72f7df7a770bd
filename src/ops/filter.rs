use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

#[derive(Clone)]
pub struct FilterOp<S, F> {
  source: S,
  predicate: F,
}

impl<S, F> FilterOp<S, F> {
  pub fn new(source: S, predicate: F) -> Self { FilterOp { source, predicate } }
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for FilterOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, FilterObserver<O, F>>,
  F: FnMut(&Item) -> bool,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(FilterObserver { observer, predicate: self.predicate })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for FilterOp<S, F> where
  S: ObservableExt<Item, Err>
{
}

pub struct FilterObserver<O, F> {
  observer: O,
  predicate: F,
}

impl<Item, Err, O, F> Observer<Item, Err> for FilterObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
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
  fn odd_numbers_only() {
    let mut sum = 0;
    observable::from_iter(0..10).filter(|v| v % 2 != 0).subscribe(|v| sum += v);
    assert_eq!(sum, 25);
  }

  #[test]
  fn dropped_values_produce_no_notification() {
    let mut hits = 0;
    let mut completed = false;
    observable::from_iter(0..10)
      .filter(|_| false)
      .on_complete(|| completed = true)
      .subscribe(|_| hits += 1);

    assert_eq!(hits, 0);
    assert!(completed);
  }
}
