//! Shift values and completion forward in time.

use std::mem;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::rc::{MutRc, RcDeref, RcDerefMut};
use crate::scheduler::{Duration, Scheduler, TaskHandle, TaskState};
use crate::subscriber::Subscriber;
use crate::subscription::{Subscription, ZipSubscription};

#[derive(Clone)]
pub struct DelayOp<S, SD> {
  source: S,
  delay: Duration,
  scheduler: SD,
}

impl<S, SD> DelayOp<S, SD> {
  pub fn new(source: S, delay: Duration, scheduler: SD) -> Self {
    DelayOp { source, delay, scheduler }
  }
}

impl<Item, Err, O, S, SD> Observable<Item, Err, O> for DelayOp<S, SD>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  S: Observable<Item, Err, DelayObserver<O, SD>>,
  SD: Scheduler,
{
  type Unsub = ZipSubscription<S::Unsub, PendingDelays>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let pending = PendingDelays::default();
    let observer = DelayObserver {
      observer: Subscriber::new(observer),
      delay: self.delay,
      scheduler: self.scheduler,
      pending: pending.clone(),
    };
    let unsub = self.source.actual_subscribe(observer);
    ZipSubscription::new(unsub, pending)
  }
}

impl<Item, Err, S, SD> ObservableExt<Item, Err> for DelayOp<S, SD> where S: ObservableExt<Item, Err>
{
}

pub struct DelayObserver<O, SD> {
  observer: Subscriber<O>,
  delay: Duration,
  scheduler: SD,
  pending: PendingDelays,
}

impl<Item, Err, O, SD> Observer<Item, Err> for DelayObserver<O, SD>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  SD: Scheduler,
{
  fn next(&mut self, value: Item) {
    let mut observer = self.observer.clone();
    let mut slot = Some(value);
    let handle = self.scheduler.schedule(
      Box::new(move || {
        if let Some(value) = slot.take() {
          observer.next(value);
        }
        TaskState::Finished
      }),
      self.delay,
    );
    self.pending.push(handle);
  }

  // Errors are not delayed: the failure is already a fact.
  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) {
    let observer = self.observer.clone();
    let mut slot = Some(observer);
    let handle = self.scheduler.schedule(
      Box::new(move || {
        if let Some(observer) = slot.take() {
          observer.complete();
        }
        TaskState::Finished
      }),
      self.delay,
    );
    self.pending.push(handle);
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// Handles of the not-yet-fired emissions; disposal cancels all of them.
#[derive(Clone, Default)]
pub struct PendingDelays(MutRc<Vec<TaskHandle>>);

impl PendingDelays {
  fn push(&self, handle: TaskHandle) {
    let mut handles = self.0.rc_deref_mut();
    handles.retain(|h| !h.is_closed());
    handles.push(handle);
  }
}

impl Subscription for PendingDelays {
  fn unsubscribe(self) {
    let handles = mem::take(&mut *self.0.rc_deref_mut());
    for handle in handles {
      handle.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().iter().all(|h| h.is_closed()) }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn values_and_completion_arrive_late() {
    let scheduler = VirtualScheduler::new();
    let log = Rc::new(RefCell::new(vec![]));
    let l = log.clone();
    let done = log.clone();

    observable::from_iter([1, 2, 3])
      .delay(Duration::from_millis(10), scheduler.clone())
      .subscribe_complete(move |v| l.borrow_mut().push(v), move || done.borrow_mut().push(99));

    assert!(log.borrow().is_empty());
    scheduler.advance(Duration::from_millis(10));
    assert_eq!(*log.borrow(), vec![1, 2, 3, 99]);
  }

  #[test]
  fn disposal_cancels_pending_emissions() {
    let scheduler = VirtualScheduler::new();
    let received = Rc::new(RefCell::new(vec![]));
    let r = received.clone();

    let subscription = observable::from_iter([1, 2])
      .delay(Duration::from_millis(10), scheduler.clone())
      .subscribe(move |v| r.borrow_mut().push(v));

    subscription.unsubscribe();
    scheduler.advance(Duration::from_millis(50));
    assert!(received.borrow().is_empty());
  }
}
