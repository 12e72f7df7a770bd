//! Subjects: multicast hubs that are both observable and observer.
//!
//! A subject owns its subscriber list exclusively; subscriptions hold only
//! the id needed to request their own removal. Fan-out is synchronous and
//! in subscription order, over a snapshot of the list taken when the
//! emission starts:
//!
//! - subscribing from inside a callback is allowed; the new subscriber
//!   becomes active after the current emission and does not observe the
//!   in-flight value;
//! - unsubscribing from inside a callback is allowed; the leaving
//!   subscriber may still observe the in-flight value, nothing after it;
//! - emitting (`next`/`error`/`complete`) from inside a callback of the
//!   same subject is not supported and panics, which keeps delivery
//!   single-writer and ordering well-defined.
//!
//! Once a subject terminates it stores the terminal notification: current
//! subscribers receive it, later subscribe calls synchronously receive
//! exactly the stored terminal and nothing else, and further emissions are
//! no-ops.

use std::mem;

use smallvec::SmallVec;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;
use crate::rc::{MutRc, RcDeref, RcDerefMut};
use crate::subscription::Subscription;

mod behavior_subject;
mod replay_subject;
pub mod subscribers;

pub use behavior_subject::BehaviorSubject;
pub use replay_subject::ReplaySubject;

use subscribers::Subscribers;

const REENTRANT_EMISSION: &str =
  "re-entrant Subject emission (next/error/complete from inside a callback of the same Subject) \
   is not supported";

#[derive(Clone)]
enum SubjectStatus<Err> {
  Active,
  Completed,
  Errored(Err),
}

struct SubjectCore<Item, Err> {
  next_id: usize,
  observers: Subscribers<Item, Err>,
  /// Ids unsubscribed while their entry was out in a broadcast snapshot.
  detached: SmallVec<[usize; 2]>,
  broadcasting: bool,
  status: SubjectStatus<Err>,
}

impl<Item, Err> Default for SubjectCore<Item, Err> {
  fn default() -> Self {
    SubjectCore {
      next_id: 0,
      observers: Subscribers::default(),
      detached: SmallVec::new(),
      broadcasting: false,
      status: SubjectStatus::Active,
    }
  }
}

/// A plain multicast subject: no replay, late subscribers see only what is
/// emitted after they join (or the stored terminal notification).
///
/// # Example
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use ripple::prelude::*;
///
/// let mut subject = Subject::<i32, ()>::new();
/// let seen = Rc::new(RefCell::new(vec![]));
/// let s = seen.clone();
///
/// subject.clone().subscribe(move |v| s.borrow_mut().push(v));
/// subject.next(1);
/// subject.next(2);
/// assert_eq!(*seen.borrow(), vec![1, 2]);
/// ```
pub struct Subject<Item, Err> {
  core: MutRc<SubjectCore<Item, Err>>,
}

impl<Item, Err> Subject<Item, Err> {
  pub fn new() -> Self { Self::default() }

  /// `false` once the subject has completed or errored.
  pub fn is_active(&self) -> bool {
    matches!(self.core.rc_deref().status, SubjectStatus::Active)
  }

  /// Number of currently attached subscribers.
  pub fn subscriber_count(&self) -> usize { self.core.rc_deref().observers.len() }

  pub fn is_empty(&self) -> bool { self.core.rc_deref().observers.is_empty() }

  /// Take the subscriber list out for a broadcast, leaving an empty list
  /// that collects re-entrant subscribes.
  fn begin_broadcast(&self) -> Option<Subscribers<Item, Err>> {
    let mut core = self.core.rc_deref_mut();
    if !matches!(core.status, SubjectStatus::Active) {
      return None;
    }
    assert!(!core.broadcasting, "{}", REENTRANT_EMISSION);
    core.broadcasting = true;
    Some(mem::take(&mut core.observers))
  }

  /// Merge the snapshot back with whatever subscribe/unsubscribe calls
  /// happened during the broadcast.
  fn finish_broadcast(&self, mut snapshot: Subscribers<Item, Err>) {
    let mut core = self.core.rc_deref_mut();
    core.broadcasting = false;
    for id in core.detached.drain(..) {
      snapshot.remove(id);
    }
    snapshot.prune_finished();
    let added = mem::take(&mut core.observers);
    snapshot.append(added);
    core.observers = snapshot;
  }
}

impl<Item, Err> Default for Subject<Item, Err> {
  fn default() -> Self { Subject { core: MutRc::own(SubjectCore::default()) } }
}

impl<Item, Err> Clone for Subject<Item, Err> {
  fn clone(&self) -> Self { Subject { core: self.core.clone() } }
}

impl<Item, Err> Observer<Item, Err> for Subject<Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  fn next(&mut self, value: Item) {
    let Some(mut snapshot) = self.begin_broadcast() else { return };
    snapshot.broadcast_value(value);
    self.finish_broadcast(snapshot);
  }

  fn error(self, err: Err) {
    let mut snapshot = {
      let mut core = self.core.rc_deref_mut();
      if !matches!(core.status, SubjectStatus::Active) {
        return;
      }
      assert!(!core.broadcasting, "{}", REENTRANT_EMISSION);
      core.status = SubjectStatus::Errored(err.clone());
      mem::take(&mut core.observers)
    };
    snapshot.broadcast_error(err);
  }

  fn complete(self) {
    let mut snapshot = {
      let mut core = self.core.rc_deref_mut();
      if !matches!(core.status, SubjectStatus::Active) {
        return;
      }
      assert!(!core.broadcasting, "{}", REENTRANT_EMISSION);
      core.status = SubjectStatus::Completed;
      mem::take(&mut core.observers)
    };
    snapshot.broadcast_complete();
  }

  fn is_finished(&self) -> bool { !self.is_active() }
}

impl<Item, Err, O> Observable<Item, Err, O> for Subject<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  Err: Clone + 'static,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut core = self.core.rc_deref_mut();
    match core.status.clone() {
      SubjectStatus::Active => {
        let id = core.next_id;
        core.next_id += 1;
        core.observers.insert(id, Box::new(observer));
        drop(core);
        SubjectSubscription { core: self.core, id: Some(id) }
      }
      SubjectStatus::Completed => {
        drop(core);
        observer.complete();
        SubjectSubscription { core: self.core, id: None }
      }
      SubjectStatus::Errored(err) => {
        drop(core);
        observer.error(err);
        SubjectSubscription { core: self.core, id: None }
      }
    }
  }
}

impl<Item, Err> ObservableExt<Item, Err> for Subject<Item, Err> {}

/// Removes one subscriber from its subject. Holds only the subject core
/// and the subscriber's id, never the observer itself.
pub struct SubjectSubscription<Item, Err> {
  core: MutRc<SubjectCore<Item, Err>>,
  id: Option<usize>,
}

impl<Item, Err> Subscription for SubjectSubscription<Item, Err> {
  fn unsubscribe(self) {
    let Some(id) = self.id else { return };
    let removed = {
      let mut core = self.core.rc_deref_mut();
      let removed = core.observers.remove(id);
      if removed.is_none() && core.broadcasting {
        // The entry is out in a broadcast snapshot; record the removal so
        // the merge drops it.
        core.detached.push(id);
      }
      removed
    };
    // The observer is dropped outside the core borrow: its teardown may
    // reach back into this subject.
    drop(removed);
  }

  fn is_closed(&self) -> bool {
    self
      .id
      .map_or(true, |id| !self.core.rc_deref().observers.contains(id))
  }
}
