//! Interleave two sources into one stream.

use std::{cell::Cell, rc::Rc};

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::subscriber::Subscriber;
use crate::subscription::ZipSubscription;

/// Values of both sources pass through as they arrive. Completion is
/// counted: the merged stream completes once *both* sources have
/// completed. The first error terminates the merged stream; the shared
/// subscriber then absorbs whatever the other source still emits.
#[derive(Clone)]
pub struct MergeOp<S1, S2> {
  source1: S1,
  source2: S2,
}

impl<S1, S2> MergeOp<S1, S2> {
  pub fn new(source1: S1, source2: S2) -> Self { MergeOp { source1, source2 } }
}

impl<Item, Err, O, S1, S2> Observable<Item, Err, O> for MergeOp<S1, S2>
where
  O: Observer<Item, Err>,
  S1: Observable<Item, Err, MergeObserver<O>>,
  S2: Observable<Item, Err, MergeObserver<O>>,
{
  type Unsub = ZipSubscription<S1::Unsub, S2::Unsub>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let observer = MergeObserver {
      observer: Subscriber::new(observer),
      completed: Rc::new(Cell::new(0)),
    };
    let unsub1 = self.source1.actual_subscribe(observer.clone());
    let unsub2 = self.source2.actual_subscribe(observer);
    ZipSubscription::new(unsub1, unsub2)
  }
}

impl<Item, Err, S1, S2> ObservableExt<Item, Err> for MergeOp<S1, S2> where
  S1: ObservableExt<Item, Err>
{
}

pub struct MergeObserver<O> {
  observer: Subscriber<O>,
  completed: Rc<Cell<usize>>,
}

impl<O> Clone for MergeObserver<O> {
  fn clone(&self) -> Self {
    MergeObserver { observer: self.observer.clone(), completed: self.completed.clone() }
  }
}

impl<Item, Err, O> Observer<Item, Err> for MergeObserver<O>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value); }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) {
    let done = self.completed.get() + 1;
    self.completed.set(done);
    if done == 2 {
      self.observer.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
