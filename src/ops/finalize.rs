use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::rc::{MutRc, RcDeref, RcDerefMut};
use crate::subscription::Subscription;

/// Runs a callback exactly once when the stream ends for any reason:
/// error, completion, or disposal.
#[derive(Clone)]
pub struct FinalizeOp<S, F> {
  source: S,
  func: F,
}

impl<S, F> FinalizeOp<S, F> {
  pub fn new(source: S, func: F) -> Self { FinalizeOp { source, func } }
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for FinalizeOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, FinalizeObserver<O, F>>,
  F: FnOnce(),
{
  type Unsub = FinalizeSubscription<S::Unsub, F>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let func = MutRc::own(Some(self.func));
    let subscription = self
      .source
      .actual_subscribe(FinalizeObserver { observer, func: func.clone() });
    FinalizeSubscription { subscription, func }
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for FinalizeOp<S, F> where S: ObservableExt<Item, Err>
{
}

pub struct FinalizeObserver<O, F> {
  observer: O,
  func: MutRc<Option<F>>,
}

impl<Item, Err, O, F> Observer<Item, Err> for FinalizeObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value); }

  fn error(self, err: Err) {
    self.observer.error(err);
    let func = self.func.rc_deref_mut().take();
    if let Some(func) = func {
      func();
    }
  }

  fn complete(self) {
    self.observer.complete();
    let func = self.func.rc_deref_mut().take();
    if let Some(func) = func {
      func();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

pub struct FinalizeSubscription<U, F> {
  subscription: U,
  func: MutRc<Option<F>>,
}

impl<U, F> Subscription for FinalizeSubscription<U, F>
where
  U: Subscription,
  F: FnOnce(),
{
  fn unsubscribe(self) {
    self.subscription.unsubscribe();
    let func = self.func.rc_deref_mut().take();
    if let Some(func) = func {
      func();
    }
  }

  fn is_closed(&self) -> bool { self.func.rc_deref().is_none() }
}
