//! Real-time driver: schedules tasks on a `futures` local executor.
//!
//! `LocalSpawner` (from `futures::executor::LocalPool`) implements
//! [`Scheduler`] by spawning a local future per task that sleeps with
//! `futures-time` and fires on the pool's thread, so delivery stays on the
//! one logical thread the engine assumes.

use futures::{executor::LocalSpawner, task::LocalSpawnExt};

use super::{Duration, Scheduler, Task, TaskHandle, TaskState};
use crate::subscription::Subscription;

impl Scheduler for LocalSpawner {
  fn schedule(&self, mut task: Task, delay: Duration) -> TaskHandle {
    let handle = TaskHandle::new();
    let task_handle = handle.clone();

    let fired = async move {
      let mut wait = delay;
      loop {
        futures_time::task::sleep(wait.into()).await;
        if task_handle.is_closed() {
          return;
        }
        match task() {
          TaskState::Finished => {
            task_handle.mark_finished();
            return;
          }
          TaskState::Again(delay) => wait = delay,
        }
      }
    };

    self
      .spawn_local(fired)
      .expect("schedule on a shut down executor");
    handle
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc, time::Instant};

  use futures::executor::LocalPool;

  use super::*;
  use crate::prelude::*;

  #[test]
  fn interval_ticks_on_the_pool() {
    let mut pool = LocalPool::new();
    let stamp = Instant::now();
    let ticks = Rc::new(RefCell::new(vec![]));
    let t = ticks.clone();

    observable::interval(Duration::from_millis(1), pool.spawner())
      .take(5)
      .subscribe(move |v| t.borrow_mut().push(v));

    pool.run();
    assert_eq!(*ticks.borrow(), vec![0, 1, 2, 3, 4]);
    assert!(stamp.elapsed() >= Duration::from_millis(5));
  }

  #[test]
  fn cancelled_timer_never_fires() {
    let mut pool = LocalPool::new();
    let fired = Rc::new(RefCell::new(false));
    let f = fired.clone();

    let sub = observable::timer(Duration::from_millis(1), pool.spawner())
      .subscribe(move |_| *f.borrow_mut() = true);

    sub.unsubscribe();
    pool.run();
    assert!(!*fired.borrow());
  }
}
