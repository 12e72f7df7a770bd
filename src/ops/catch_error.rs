//! Recover an errored stream by switching to a fallback observable.

use std::{cell::Cell, marker::PhantomData, rc::Rc};

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::rc::{MutRc, RcDeref, RcDerefMut};
use crate::subscription::{BoxSubscription, Subscription, ZipSubscription};

/// On `error`, hands the downstream observer to the observable returned by
/// the handler, so the stream continues seamlessly. The fallback's own
/// terminal notifications are final; a second recovery needs a second
/// `catch_error`.
#[derive(Clone)]
pub struct CatchErrorOp<S, F, Err> {
  source: S,
  func: F,
  _marker: PhantomData<Err>,
}

impl<S, F, Err> CatchErrorOp<S, F, Err> {
  pub fn new(source: S, func: F) -> Self { CatchErrorOp { source, func, _marker: PhantomData } }
}

impl<Item, Err, E, O, S, F, C> Observable<Item, E, O> for CatchErrorOp<S, F, Err>
where
  O: Observer<Item, E>,
  S: Observable<Item, Err, CatchErrorObserver<O, F, E>>,
  F: FnOnce(Err) -> C,
  C: Observable<Item, E, O>,
  C::Unsub: 'static,
{
  type Unsub = ZipSubscription<S::Unsub, CatchSubscription<O>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let observer = MutRc::own(Some(observer));
    let closed = Rc::new(Cell::new(false));
    let fallback = MutRc::own(None);
    let subscription = CatchSubscription {
      observer: observer.clone(),
      closed: closed.clone(),
      fallback: fallback.clone(),
    };
    let unsub = self.source.actual_subscribe(CatchErrorObserver {
      observer,
      closed,
      func: self.func,
      fallback,
      _marker: PhantomData,
    });
    ZipSubscription::new(unsub, subscription)
  }
}

impl<Item, E, S, F, Err> ObservableExt<Item, E> for CatchErrorOp<S, F, Err> where
  S: ObservableExt<Item, Err>
{
}

pub struct CatchErrorObserver<O, F, E> {
  observer: MutRc<Option<O>>,
  closed: Rc<Cell<bool>>,
  func: F,
  fallback: MutRc<Option<BoxSubscription>>,
  _marker: PhantomData<E>,
}

impl<Item, Err, E, O, F, C> Observer<Item, Err> for CatchErrorObserver<O, F, E>
where
  O: Observer<Item, E>,
  F: FnOnce(Err) -> C,
  C: Observable<Item, E, O>,
  C::Unsub: 'static,
{
  fn next(&mut self, value: Item) {
    // Deliver with the slot released so a self-unsubscribe in the callback
    // cannot dead-borrow; `closed` records a disposal that raced with us.
    let taken = self.observer.rc_deref_mut().take();
    if let Some(mut observer) = taken {
      observer.next(value);
      if !self.closed.get() {
        *self.observer.rc_deref_mut() = Some(observer);
      }
    }
  }

  fn error(self, err: Err) {
    let taken = self.observer.rc_deref_mut().take();
    if let Some(observer) = taken {
      let unsub = (self.func)(err).actual_subscribe(observer);
      if self.closed.get() {
        unsub.unsubscribe();
      } else {
        *self.fallback.rc_deref_mut() = Some(BoxSubscription::new(unsub));
      }
    }
  }

  fn complete(self) {
    let taken = self.observer.rc_deref_mut().take();
    taken.complete();
  }

  fn is_finished(&self) -> bool {
    self.closed.get() || self.observer.rc_deref().as_ref().map_or(true, |o| o.is_finished())
  }
}

pub struct CatchSubscription<O> {
  observer: MutRc<Option<O>>,
  closed: Rc<Cell<bool>>,
  fallback: MutRc<Option<BoxSubscription>>,
}

impl<O> Subscription for CatchSubscription<O> {
  fn unsubscribe(self) {
    self.closed.set(true);
    let observer = self.observer.rc_deref_mut().take();
    drop(observer);
    let fallback = self.fallback.rc_deref_mut().take();
    if let Some(fallback) = fallback {
      fallback.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool {
    self.closed.get()
      || (self.observer.rc_deref().is_none() && self.fallback.rc_deref().is_none())
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn stream_continues_with_the_fallback() {
    let mut seen = vec![];
    let mut completed = false;

    observable::create(|emitter: &mut dyn Emitter<i32, &str>| {
      emitter.next(1);
      emitter.error("halfway");
    })
    .catch_error(|_| observable::from_iter([2, 3]))
    .subscribe_complete(|v| seen.push(v), || completed = true);

    assert_eq!(seen, vec![1, 2, 3]);
    assert!(completed);
  }

  #[test]
  fn fallback_errors_are_terminal() {
    let mut errors = vec![];

    observable::throw::<i32, _>("first")
      .catch_error(|_| observable::throw::<i32, _>("second"))
      .subscribe_err(|_| {}, |e| errors.push(e));

    assert_eq!(errors, vec!["second"]);
  }

  #[test]
  fn untouched_when_the_source_completes() {
    let called = Rc::new(RefCell::new(false));
    let c = called.clone();
    let mut seen = vec![];

    observable::from_iter([1, 2])
      .map_err(|_: NoError| "never")
      .catch_error(move |_| {
        *c.borrow_mut() = true;
        observable::of(99)
      })
      .subscribe(|v| seen.push(v));

    assert_eq!(seen, vec![1, 2]);
    assert!(!*called.borrow());
  }

  #[test]
  fn disposal_reaches_the_fallback_chain() {
    let scheduler = VirtualScheduler::new();
    let received = Rc::new(RefCell::new(vec![]));
    let r = received.clone();

    let sched = scheduler.clone();
    let subscription = observable::throw::<usize, _>(())
      .catch_error(move |_| observable::interval(Duration::from_millis(5), sched))
      .subscribe(move |v| r.borrow_mut().push(v));

    scheduler.advance(Duration::from_millis(12));
    assert_eq!(*received.borrow(), vec![0, 1]);

    subscription.unsubscribe();
    scheduler.advance(Duration::from_millis(50));
    assert_eq!(*received.borrow(), vec![0, 1]);
  }
}
