use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

#[derive(Clone)]
pub struct TakeOp<S> {
  source: S,
  count: usize,
}

impl<S> TakeOp<S> {
  pub fn new(source: S, count: usize) -> Self { TakeOp { source, count } }
}

impl<Item, Err, O, S> Observable<Item, Err, O> for TakeOp<S>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, TakeObserver<O>>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut observer = TakeObserver { observer: Some(observer), count: self.count, hits: 0 };
    if self.count == 0 {
      // Complete before the source is handed a live observer: the source
      // sees a finished observer and never delivers a notification.
      observer.observer.take().complete();
    }
    self.source.actual_subscribe(observer)
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for TakeOp<S> where S: ObservableExt<Item, Err> {}

pub struct TakeObserver<O> {
  observer: Option<O>,
  count: usize,
  hits: usize,
}

impl<Item, Err, O> Observer<Item, Err> for TakeObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.hits >= self.count {
      return;
    }
    if let Some(observer) = self.observer.as_mut() {
      self.hits += 1;
      observer.next(value);
      if self.hits == self.count {
        self.observer.take().complete();
      }
    }
  }

  #[inline]
  fn error(mut self, err: Err) { self.observer.take().error(err); }

  #[inline]
  fn complete(mut self) { self.observer.take().complete(); }

  fn is_finished(&self) -> bool {
    self.observer.as_ref().map_or(true, |o| o.is_finished())
  }
}
