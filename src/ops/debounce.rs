//! Trailing-edge debounce: only the latest value of a quiet period
//! survives.

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::rc::{MutRc, RcDeref, RcDerefMut};
use crate::scheduler::{Duration, Scheduler, TaskHandle, TaskState};
use crate::subscriber::Subscriber;
use crate::subscription::{Subscription, ZipSubscription};

#[derive(Clone)]
pub struct DebounceOp<S, SD> {
  source: S,
  duration: Duration,
  scheduler: SD,
}

impl<S, SD> DebounceOp<S, SD> {
  pub fn new(source: S, duration: Duration, scheduler: SD) -> Self {
    DebounceOp { source, duration, scheduler }
  }
}

impl<Item, Err, O, S, SD> Observable<Item, Err, O> for DebounceOp<S, SD>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  S: Observable<Item, Err, DebounceObserver<O, SD, Item>>,
  SD: Scheduler,
{
  type Unsub = ZipSubscription<S::Unsub, DebounceSubscription<Item>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let trailing = MutRc::own(None);
    let pending = MutRc::own(None);
    let observer = DebounceObserver {
      observer: Subscriber::new(observer),
      scheduler: self.scheduler,
      duration: self.duration,
      trailing: trailing.clone(),
      pending: pending.clone(),
    };
    let unsub = self.source.actual_subscribe(observer);
    ZipSubscription::new(unsub, DebounceSubscription { trailing, pending })
  }
}

impl<Item, Err, S, SD> ObservableExt<Item, Err> for DebounceOp<S, SD> where
  S: ObservableExt<Item, Err>
{
}

pub struct DebounceObserver<O, SD, Item> {
  observer: Subscriber<O>,
  scheduler: SD,
  duration: Duration,
  trailing: MutRc<Option<Item>>,
  pending: MutRc<Option<TaskHandle>>,
}

impl<Item, Err, O, SD> Observer<Item, Err> for DebounceObserver<O, SD, Item>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  SD: Scheduler,
{
  fn next(&mut self, value: Item) {
    *self.trailing.rc_deref_mut() = Some(value);
    // Every value rearms the quiet-period timer.
    let replaced = self.pending.rc_deref_mut().take();
    if let Some(handle) = replaced {
      handle.unsubscribe();
    }

    let mut observer = self.observer.clone();
    let trailing = self.trailing.clone();
    let handle = self.scheduler.schedule(
      Box::new(move || {
        let value = trailing.rc_deref_mut().take();
        if let Some(value) = value {
          observer.next(value);
        }
        TaskState::Finished
      }),
      self.duration,
    );
    *self.pending.rc_deref_mut() = Some(handle);
  }

  fn error(self, err: Err) {
    // Pending value is discarded: the error is already terminal.
    let pending = self.pending.rc_deref_mut().take();
    if let Some(handle) = pending {
      handle.unsubscribe();
    }
    self.trailing.rc_deref_mut().take();
    self.observer.error(err);
  }

  fn complete(self) {
    let pending = self.pending.rc_deref_mut().take();
    if let Some(handle) = pending {
      handle.unsubscribe();
    }
    // The quiet period is cut short: flush the trailing value.
    let trailing = self.trailing.rc_deref_mut().take();
    let mut observer = self.observer;
    if let Some(value) = trailing {
      observer.next(value);
    }
    observer.complete();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

pub struct DebounceSubscription<Item> {
  trailing: MutRc<Option<Item>>,
  pending: MutRc<Option<TaskHandle>>,
}

impl<Item> Subscription for DebounceSubscription<Item> {
  fn unsubscribe(self) {
    let pending = self.pending.rc_deref_mut().take();
    if let Some(handle) = pending {
      handle.unsubscribe();
    }
    self.trailing.rc_deref_mut().take();
  }

  fn is_closed(&self) -> bool {
    self.pending.rc_deref().as_ref().map_or(true, |h| h.is_closed())
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn only_the_last_value_of_a_burst_survives() {
    let scheduler = VirtualScheduler::new();
    let received = Rc::new(RefCell::new(vec![]));
    let r = received.clone();

    let mut subject = Subject::<i32, ()>::new();
    subject
      .clone()
      .debounce(Duration::from_millis(100), scheduler.clone())
      .subscribe(move |v| r.borrow_mut().push(v));

    subject.next(1);
    scheduler.advance(Duration::from_millis(30));
    subject.next(2);
    scheduler.advance(Duration::from_millis(30));
    subject.next(3);

    assert!(received.borrow().is_empty());
    scheduler.advance(Duration::from_millis(100));
    assert_eq!(*received.borrow(), vec![3]);
  }

  #[test]
  fn spaced_values_all_pass() {
    let scheduler = VirtualScheduler::new();
    let received = Rc::new(RefCell::new(vec![]));
    let r = received.clone();

    let mut subject = Subject::<i32, ()>::new();
    subject
      .clone()
      .debounce(Duration::from_millis(50), scheduler.clone())
      .subscribe(move |v| r.borrow_mut().push(v));

    subject.next(1);
    scheduler.advance(Duration::from_millis(60));
    subject.next(2);
    scheduler.advance(Duration::from_millis(60));

    assert_eq!(*received.borrow(), vec![1, 2]);
  }

  #[test]
  fn trailing_value_is_flushed_on_complete() {
    let scheduler = VirtualScheduler::new();
    let received = Rc::new(RefCell::new(vec![]));
    let r = received.clone();

    let mut subject = Subject::<i32, ()>::new();
    subject
      .clone()
      .debounce(Duration::from_millis(100), scheduler.clone())
      .subscribe(move |v| r.borrow_mut().push(v));

    subject.next(42);
    subject.complete();

    assert_eq!(*received.borrow(), vec![42]);
    assert_eq!(scheduler.pending(), 0);
  }

  #[test]
  fn disposal_cancels_the_quiet_period_timer() {
    let scheduler = VirtualScheduler::new();
    let received = Rc::new(RefCell::new(vec![]));
    let r = received.clone();

    let mut subject = Subject::<i32, ()>::new();
    let subscription = subject
      .clone()
      .debounce(Duration::from_millis(100), scheduler.clone())
      .subscribe(move |v| r.borrow_mut().push(v));

    subject.next(1);
    subscription.unsubscribe();
    scheduler.advance(Duration::from_millis(200));

    assert!(received.borrow().is_empty());
    assert_eq!(scheduler.pending(), 0);
  }
}
