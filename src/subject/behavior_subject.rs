use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::rc::{MutRc, RcDeref, RcDerefMut};
use crate::subject::{Subject, SubjectSubscription};

/// A subject seeded with an initial value that always holds the latest
/// value. Every new subscriber synchronously receives the current value
/// before any live emission; once terminated, only the stored terminal
/// notification is delivered.
///
/// # Example
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use ripple::prelude::*;
///
/// let mut state = BehaviorSubject::<i32, ()>::new(0);
/// state.next(1);
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let s = seen.clone();
/// state.clone().subscribe(move |v| s.borrow_mut().push(v));
///
/// // The current value arrives immediately, later values live.
/// state.next(2);
/// assert_eq!(*seen.borrow(), vec![1, 2]);
/// ```
pub struct BehaviorSubject<Item, Err> {
  subject: Subject<Item, Err>,
  value: MutRc<Item>,
}

impl<Item, Err> BehaviorSubject<Item, Err> {
  pub fn new(value: Item) -> Self {
    BehaviorSubject { subject: Subject::new(), value: MutRc::own(value) }
  }

  /// The value a new subscriber would receive right now.
  pub fn value(&self) -> Item
  where
    Item: Clone,
  {
    self.value.rc_deref().clone()
  }
}

impl<Item, Err> Clone for BehaviorSubject<Item, Err> {
  fn clone(&self) -> Self {
    BehaviorSubject { subject: self.subject.clone(), value: self.value.clone() }
  }
}

impl<Item, Err> Observer<Item, Err> for BehaviorSubject<Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  fn next(&mut self, value: Item) {
    *self.value.rc_deref_mut() = value.clone();
    self.subject.next(value);
  }

  #[inline]
  fn error(self, err: Err) { self.subject.error(err); }

  #[inline]
  fn complete(self) { self.subject.complete(); }

  #[inline]
  fn is_finished(&self) -> bool { self.subject.is_finished() }
}

impl<Item, Err, O> Observable<Item, Err, O> for BehaviorSubject<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    if self.subject.is_active() {
      let current = self.value.rc_deref().clone();
      observer.next(current);
    }
    self.subject.actual_subscribe(observer)
  }
}

impl<Item, Err> ObservableExt<Item, Err> for BehaviorSubject<Item, Err> {}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn seed_arrives_before_any_emission() {
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();
    let subject = BehaviorSubject::<i32, ()>::new(42);

    subject.clone().subscribe(move |v| s.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![42]);
  }

  #[test]
  fn late_subscriber_gets_the_latest_value_not_the_seed() {
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();
    let mut subject = BehaviorSubject::<i32, ()>::new(0);

    subject.next(7);
    subject.clone().subscribe(move |v| s.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![7]);

    subject.next(8);
    assert_eq!(*seen.borrow(), vec![7, 8]);
  }

  #[test]
  fn every_subscriber_tracks_live_values() {
    let first = Rc::new(RefCell::new(vec![]));
    let second = Rc::new(RefCell::new(vec![]));
    let mut subject = BehaviorSubject::<i32, ()>::new(0);

    let f = first.clone();
    subject.clone().subscribe(move |v| f.borrow_mut().push(v));
    let s = second.clone();
    subject.clone().subscribe(move |v| s.borrow_mut().push(v));

    subject.next(1);
    subject.next(2);

    assert_eq!(*first.borrow(), vec![0, 1, 2]);
    assert_eq!(*second.borrow(), vec![0, 1, 2]);
  }

  #[test]
  fn no_value_replay_after_terminal() {
    let seen = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(RefCell::new(false));
    let mut subject = BehaviorSubject::<i32, ()>::new(0);

    subject.next(5);
    subject.clone().complete();

    let s = seen.clone();
    let c = completed.clone();
    subject
      .clone()
      .subscribe_complete(move |v| s.borrow_mut().push(v), move || *c.borrow_mut() = true);

    assert!(seen.borrow().is_empty());
    assert!(*completed.borrow());
  }
}
