//! Insertion-ordered, id-addressed subscriber list for subjects.

use smallvec::SmallVec;

use crate::observer::Publisher;

/// The observers currently attached to a subject, in subscription order.
/// Each entry carries the id its subscription uses to remove it later.
pub struct Subscribers<Item, Err> {
  entries: SmallVec<[(usize, Box<dyn Publisher<Item, Err>>); 2]>,
}

impl<Item, Err> Default for Subscribers<Item, Err> {
  fn default() -> Self { Subscribers { entries: SmallVec::new() } }
}

impl<Item, Err> Subscribers<Item, Err> {
  pub fn insert(&mut self, id: usize, observer: Box<dyn Publisher<Item, Err>>) {
    self.entries.push((id, observer));
  }

  pub fn remove(&mut self, id: usize) -> Option<Box<dyn Publisher<Item, Err>>> {
    self
      .entries
      .iter()
      .position(|(entry_id, _)| *entry_id == id)
      .map(|pos| self.entries.remove(pos).1)
  }

  pub fn contains(&self, id: usize) -> bool {
    self.entries.iter().any(|(entry_id, _)| *entry_id == id)
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// Move every entry of `other` to the back, keeping insertion order.
  pub fn append(&mut self, other: Subscribers<Item, Err>) {
    self.entries.extend(other.entries);
  }

  /// Drop entries whose observer already finished downstream (a completed
  /// `take`, a disposed subscriber slot).
  pub fn prune_finished(&mut self) {
    self.entries.retain(|(_, observer)| !observer.p_is_finished());
  }

  /// Send a value to every entry, cloning for all but the last so the final
  /// observer receives the original.
  pub fn broadcast_value(&mut self, value: Item)
  where
    Item: Clone,
  {
    let mut iter = self.entries.iter_mut().peekable();
    while let Some((_, observer)) = iter.next() {
      if iter.peek().is_some() {
        observer.p_next(value.clone());
      } else {
        observer.p_next(value);
        break;
      }
    }
  }

  /// Send the terminal error to every entry, draining the list.
  pub fn broadcast_error(&mut self, err: Err)
  where
    Err: Clone,
  {
    let mut iter = self.entries.drain(..).peekable();
    while let Some((_, observer)) = iter.next() {
      if iter.peek().is_some() {
        observer.p_error(err.clone());
      } else {
        observer.p_error(err);
        break;
      }
    }
  }

  /// Send completion to every entry, draining the list.
  pub fn broadcast_complete(&mut self) {
    for (_, observer) in self.entries.drain(..) {
      observer.p_complete();
    }
  }
}
