//! Subscriber: a shared observer slot that is also a subscription.
//!
//! Operators that deliver from more than one place (timer callbacks,
//! multiple sources, replaceable inner streams) share one `Subscriber`
//! between producers and the returned subscription. The slot serializes
//! delivery (the observer is taken out for the duration of one
//! notification and restored afterwards), so disposing the chain from
//! *inside* a notification callback never dead-borrows.

use std::{cell::Cell, rc::Rc};

use crate::{
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::Subscription,
};

pub struct Subscriber<O> {
  observer: MutRc<Option<O>>,
  closed: Rc<Cell<bool>>,
}

impl<O> Subscriber<O> {
  pub fn new(observer: O) -> Self {
    Subscriber { observer: MutRc::own(Some(observer)), closed: Rc::new(Cell::new(false)) }
  }
}

impl<O> Clone for Subscriber<O> {
  fn clone(&self) -> Self {
    Subscriber { observer: self.observer.clone(), closed: self.closed.clone() }
  }
}

impl<Item, Err, O> Observer<Item, Err> for Subscriber<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    // Take the observer out so the slot is not borrowed while user code
    // runs; a self-unsubscribe inside the callback only flips `closed`.
    let taken = self.observer.rc_deref_mut().take();
    if let Some(mut observer) = taken {
      observer.next(value);
      if !self.closed.get() {
        *self.observer.rc_deref_mut() = Some(observer);
      }
    }
  }

  fn error(self, err: Err) {
    self.closed.set(true);
    let taken = self.observer.rc_deref_mut().take();
    if let Some(observer) = taken {
      observer.error(err);
    }
  }

  fn complete(self) {
    self.closed.set(true);
    let taken = self.observer.rc_deref_mut().take();
    if let Some(observer) = taken {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool {
    self.closed.get() || self.observer.rc_deref().as_ref().map_or(true, |o| o.is_finished())
  }
}

impl<O> Subscription for Subscriber<O> {
  fn unsubscribe(self) {
    self.closed.set(true);
    // Dropping the observer synchronously releases whatever it captured.
    let taken = self.observer.rc_deref_mut().take();
    drop(taken);
  }

  fn is_closed(&self) -> bool { self.closed.get() || self.observer.rc_deref().is_none() }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::observer::AllObserver;

  #[test]
  fn terminal_closes_every_clone() {
    let mut seen = vec![];
    {
      let subscriber = Subscriber::new(AllObserver::new(|v: i32| seen.push(v), |_: ()| {}, || {}));
      let mut a = subscriber.clone();
      let b = subscriber.clone();

      a.next(1);
      b.complete();
      a.next(2);
      assert!(a.is_finished());
    }
    assert_eq!(seen, vec![1]);
  }

  #[test]
  fn unsubscribe_stops_delivery() {
    let mut seen = vec![];
    {
      let subscriber = Subscriber::new(AllObserver::new(|v: i32| seen.push(v), |_: ()| {}, || {}));
      let mut producer = subscriber.clone();

      producer.next(1);
      subscriber.unsubscribe();
      producer.next(2);
      assert!(producer.is_closed());
    }
    assert_eq!(seen, vec![1]);
  }
}
