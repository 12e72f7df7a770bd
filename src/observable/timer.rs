use std::convert::Infallible;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::scheduler::{Duration, Scheduler, TaskHandle, TaskState};

/// Creates an observable that waits `delay`, emits a single `0`, and
/// completes. The one-value shape mirrors a request/response collaborator:
/// exactly one `next` then `complete`, or nothing at all if disposed first.
pub fn timer<S>(delay: Duration, scheduler: S) -> TimerObservable<S>
where
  S: Scheduler,
{
  TimerObservable { delay, scheduler }
}

#[derive(Clone)]
pub struct TimerObservable<S> {
  delay: Duration,
  scheduler: S,
}

impl<S, O> Observable<usize, Infallible, O> for TimerObservable<S>
where
  S: Scheduler,
  O: Observer<usize, Infallible> + 'static,
{
  type Unsub = TaskHandle;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut slot = Some(observer);
    self.scheduler.schedule(
      Box::new(move || {
        if let Some(mut observer) = slot.take() {
          if !observer.is_finished() {
            observer.next(0);
            observer.complete();
          }
        }
        TaskState::Finished
      }),
      self.delay,
    )
  }
}

impl<S> ObservableExt<usize, Infallible> for TimerObservable<S> {}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn fires_once_after_the_delay() {
    let scheduler = VirtualScheduler::new();
    let log = Rc::new(RefCell::new(vec![]));
    let l = log.clone();

    observable::timer(Duration::from_millis(75), scheduler.clone())
      .subscribe_complete(move |v| l.borrow_mut().push(v), {
        let l = log.clone();
        move || l.borrow_mut().push(99)
      });

    scheduler.advance(Duration::from_millis(50));
    assert!(log.borrow().is_empty());

    scheduler.advance(Duration::from_millis(25));
    assert_eq!(*log.borrow(), vec![0, 99]);

    scheduler.advance(Duration::from_millis(100));
    assert_eq!(*log.borrow(), vec![0, 99]);
  }
}
