use std::collections::VecDeque;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::rc::{MutRc, RcDeref, RcDerefMut};
use crate::subject::{Subject, SubjectSubscription};

/// A subject that buffers the last `capacity` values (FIFO eviction) and
/// replays them, in emission order, to every new subscriber before live
/// emissions. Once terminated, only the stored terminal notification is
/// delivered; the buffer is not replayed.
pub struct ReplaySubject<Item, Err> {
  subject: Subject<Item, Err>,
  buffer: MutRc<VecDeque<Item>>,
  capacity: usize,
}

impl<Item, Err> ReplaySubject<Item, Err> {
  pub fn new(capacity: usize) -> Self {
    ReplaySubject {
      subject: Subject::new(),
      buffer: MutRc::own(VecDeque::new()),
      capacity,
    }
  }
}

impl<Item, Err> Clone for ReplaySubject<Item, Err> {
  fn clone(&self) -> Self {
    ReplaySubject {
      subject: self.subject.clone(),
      buffer: self.buffer.clone(),
      capacity: self.capacity,
    }
  }
}

impl<Item, Err> Observer<Item, Err> for ReplaySubject<Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  fn next(&mut self, value: Item) {
    {
      let mut buffer = self.buffer.rc_deref_mut();
      buffer.push_back(value.clone());
      if buffer.len() > self.capacity {
        buffer.pop_front();
      }
    }
    self.subject.next(value);
  }

  #[inline]
  fn error(self, err: Err) { self.subject.error(err); }

  #[inline]
  fn complete(self) { self.subject.complete(); }

  #[inline]
  fn is_finished(&self) -> bool { self.subject.is_finished() }
}

impl<Item, Err, O> Observable<Item, Err, O> for ReplaySubject<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    if self.subject.is_active() {
      // Snapshot first so replay delivery happens with the buffer
      // released.
      let replay: Vec<Item> = self.buffer.rc_deref().iter().cloned().collect();
      for value in replay {
        observer.next(value);
      }
    }
    self.subject.actual_subscribe(observer)
  }
}

impl<Item, Err> ObservableExt<Item, Err> for ReplaySubject<Item, Err> {}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn replays_the_buffered_window_in_order() {
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();
    let mut subject = ReplaySubject::<i32, ()>::new(2);

    subject.next(1);
    subject.next(2);
    subject.next(3);

    subject.clone().subscribe(move |v| s.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![2, 3]);
  }

  #[test]
  fn replay_is_followed_by_live_values() {
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();
    let mut subject = ReplaySubject::<i32, ()>::new(3);

    subject.next(1);
    subject.clone().subscribe(move |v| s.borrow_mut().push(v));
    subject.next(2);

    assert_eq!(*seen.borrow(), vec![1, 2]);
  }

  #[test]
  fn zero_capacity_buffers_nothing() {
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();
    let mut subject = ReplaySubject::<i32, ()>::new(0);

    subject.next(1);
    subject.clone().subscribe(move |v| s.borrow_mut().push(v));
    assert!(seen.borrow().is_empty());
  }

  #[test]
  fn terminal_suppresses_the_buffer() {
    let seen = Rc::new(RefCell::new(vec![]));
    let errors = Rc::new(RefCell::new(vec![]));
    let mut subject = ReplaySubject::<i32, &'static str>::new(2);

    subject.next(1);
    subject.next(2);
    subject.clone().error("gone");

    let s = seen.clone();
    let e = errors.clone();
    subject
      .clone()
      .subscribe_err(move |v| s.borrow_mut().push(v), move |err| e.borrow_mut().push(err));

    assert!(seen.borrow().is_empty());
    assert_eq!(*errors.borrow(), vec!["gone"]);
  }
}
