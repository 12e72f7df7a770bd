use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

#[derive(Clone)]
pub struct OnCompleteOp<S, F> {
  source: S,
  func: F,
}

impl<S, F> OnCompleteOp<S, F> {
  pub fn new(source: S, func: F) -> Self { OnCompleteOp { source, func } }
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for OnCompleteOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, OnCompleteObserver<O, F>>,
  F: FnOnce(),
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(OnCompleteObserver { observer, func: self.func })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for OnCompleteOp<S, F> where
  S: ObservableExt<Item, Err>
{
}

pub struct OnCompleteObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, Err, O, F> Observer<Item, Err> for OnCompleteObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value); }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) {
    (self.func)();
    self.observer.complete();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn runs_on_completion_only() {
    let mut completed = 0;
    observable::from_iter(0..3).on_complete(|| completed += 1).subscribe(|_| {});
    assert_eq!(completed, 1);

    let mut on_error_path = 0;
    observable::throw::<i32, _>(())
      .on_complete(|| on_error_path += 1)
      .subscribe_err(|_| {}, |_| {});
    assert_eq!(on_error_path, 0);
  }
}
