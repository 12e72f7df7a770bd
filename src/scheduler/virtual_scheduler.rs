//! Virtual-time scheduler for deterministic execution of time-based code.
//!
//! Logical time only moves when [`VirtualScheduler::advance`] is called;
//! every task due inside the advanced window fires synchronously, in due
//! order, ties broken by scheduling order. Clock state lives in the
//! scheduler value itself: clones share it, separate schedulers are fully
//! independent, and nothing is stored in ambient global state.

use std::{cmp::Ordering, collections::BinaryHeap};

use super::{Duration, Scheduler, Task, TaskHandle, TaskState};
use crate::rc::{MutRc, RcDeref, RcDerefMut};

/// A scheduler whose clock is advanced explicitly.
///
/// # Example
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
///
/// use ripple::prelude::*;
///
/// let scheduler = VirtualScheduler::new();
/// let fired = Rc::new(Cell::new(false));
/// let f = fired.clone();
///
/// observable::timer(Duration::from_millis(75), scheduler.clone())
///   .subscribe(move |_| f.set(true));
///
/// scheduler.advance(Duration::from_millis(50));
/// // 50ms of logical time: nothing yet.
/// assert!(!fired.get());
/// scheduler.advance(Duration::from_millis(30));
/// assert!(fired.get());
/// ```
#[derive(Clone, Default)]
pub struct VirtualScheduler(MutRc<ClockInner>);

#[derive(Default)]
struct ClockInner {
  now: Duration,
  next_seq: usize,
  queue: BinaryHeap<ScheduledTask>,
}

struct ScheduledTask {
  due: Duration,
  seq: usize,
  task: Task,
  handle: TaskHandle,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool { self.due == other.due && self.seq == other.seq }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier due times first, FIFO by seq for equal times.
    other.due.cmp(&self.due).then_with(|| other.seq.cmp(&self.seq))
  }
}

impl VirtualScheduler {
  pub fn new() -> Self { Self::default() }

  /// Logical time elapsed since this scheduler was created.
  pub fn now(&self) -> Duration { self.0.rc_deref().now }

  /// Number of scheduled tasks that are still live (not cancelled).
  pub fn pending(&self) -> usize {
    self.0.rc_deref().queue.iter().filter(|t| !t.handle.is_cancelled()).count()
  }

  /// Advance logical time by `duration`, synchronously firing every task
  /// that falls due inside the window.
  pub fn advance(&self, duration: Duration) {
    let target = self.0.rc_deref().now + duration;
    self.run_due(Some(target));
    self.0.rc_deref_mut().now = target;
  }

  /// Fire every queued task, repeatedly, until the queue is empty.
  ///
  /// A self-rescheduling task that never finishes (an undisposed
  /// `interval`) makes this loop forever; bound such producers with `take`
  /// or cancel them first.
  pub fn flush(&self) { self.run_due(None); }

  fn run_due(&self, until: Option<Duration>) {
    loop {
      let due_task = {
        let mut inner = self.0.rc_deref_mut();
        let ready = inner
          .queue
          .peek()
          .is_some_and(|t| until.map_or(true, |limit| t.due <= limit));
        if ready {
          let task = inner.queue.pop().unwrap();
          inner.now = task.due;
          Some(task)
        } else {
          None
        }
      };

      let Some(mut scheduled) = due_task else { break };
      if scheduled.handle.is_cancelled() {
        continue;
      }

      // The queue borrow is released here: a firing task may re-enter the
      // scheduler (debounce rearming itself, an interval tick subscribing
      // something new).
      match (scheduled.task)() {
        TaskState::Finished => scheduled.handle.mark_finished(),
        TaskState::Again(delay) => {
          let mut inner = self.0.rc_deref_mut();
          let seq = inner.next_seq;
          inner.next_seq += 1;
          let due = inner.now + delay;
          inner.queue.push(ScheduledTask {
            due,
            seq,
            task: scheduled.task,
            handle: scheduled.handle,
          });
        }
      }
    }
  }
}

impl Scheduler for VirtualScheduler {
  fn schedule(&self, task: Task, delay: Duration) -> TaskHandle {
    let handle = TaskHandle::new();
    let mut inner = self.0.rc_deref_mut();
    let seq = inner.next_seq;
    inner.next_seq += 1;
    let due = inner.now + delay;
    inner.queue.push(ScheduledTask { due, seq, task, handle: handle.clone() });
    handle
  }
}
