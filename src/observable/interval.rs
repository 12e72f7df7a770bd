use std::convert::Infallible;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::scheduler::{Duration, Scheduler, TaskHandle, TaskState};

/// Creates an observable that emits an increasing counter starting at 0,
/// every `period`, indefinitely, driven by `scheduler`.
///
/// Each subscribe starts its own independent counter from 0. The
/// production runs until the subscription is disposed or a downstream
/// operator (such as `take`) finishes the chain.
///
/// # Example
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use ripple::prelude::*;
///
/// let scheduler = VirtualScheduler::new();
/// let ticks = Rc::new(RefCell::new(vec![]));
/// let t = ticks.clone();
///
/// observable::interval(Duration::from_millis(10), scheduler.clone())
///   .take(3)
///   .subscribe(move |v| t.borrow_mut().push(v));
///
/// scheduler.advance(Duration::from_millis(30));
/// assert_eq!(*ticks.borrow(), vec![0, 1, 2]);
/// ```
pub fn interval<S>(period: Duration, scheduler: S) -> IntervalObservable<S>
where
  S: Scheduler,
{
  IntervalObservable { period, scheduler }
}

#[derive(Clone)]
pub struct IntervalObservable<S> {
  period: Duration,
  scheduler: S,
}

impl<S, O> Observable<usize, Infallible, O> for IntervalObservable<S>
where
  S: Scheduler,
  O: Observer<usize, Infallible> + 'static,
{
  type Unsub = TaskHandle;

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    let period = self.period;
    let mut seq = 0usize;
    self.scheduler.schedule(
      Box::new(move || {
        if observer.is_finished() {
          return TaskState::Finished;
        }
        observer.next(seq);
        seq += 1;
        TaskState::Again(period)
      }),
      period,
    )
  }
}

impl<S> ObservableExt<usize, Infallible> for IntervalObservable<S> {}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn counts_from_zero_per_subscription() {
    let scheduler = VirtualScheduler::new();
    let source = observable::interval(Duration::from_millis(10), scheduler.clone());

    let first = Rc::new(RefCell::new(vec![]));
    let f = first.clone();
    source.clone().take(3).subscribe(move |v| f.borrow_mut().push(v));

    scheduler.advance(Duration::from_millis(20));

    let second = Rc::new(RefCell::new(vec![]));
    let s = second.clone();
    source.take(2).subscribe(move |v| s.borrow_mut().push(v));

    scheduler.advance(Duration::from_millis(30));
    assert_eq!(*first.borrow(), vec![0, 1, 2]);
    assert_eq!(*second.borrow(), vec![0, 1]);
  }

  #[test]
  fn disposing_cancels_the_timer() {
    let scheduler = VirtualScheduler::new();
    let ticks = Rc::new(RefCell::new(0));
    let t = ticks.clone();

    let subscription = observable::interval(Duration::from_millis(5), scheduler.clone())
      .subscribe(move |_| *t.borrow_mut() += 1);

    scheduler.advance(Duration::from_millis(12));
    assert_eq!(*ticks.borrow(), 2);

    subscription.unsubscribe();
    scheduler.advance(Duration::from_millis(50));
    assert_eq!(*ticks.borrow(), 2);
  }
}
