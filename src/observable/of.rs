use std::convert::Infallible;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

/// Creates an observable that emits a single value, then completes.
///
/// # Example
///
/// ```rust
/// use ripple::prelude::*;
///
/// let mut received = 0;
/// observable::of(100).subscribe(|v| received = v);
/// assert_eq!(received, 100);
/// ```
pub fn of<Item>(value: Item) -> ObservableOf<Item> { ObservableOf(value) }

#[derive(Clone)]
pub struct ObservableOf<Item>(Item);

impl<Item, O> Observable<Item, Infallible, O> for ObservableOf<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    observer.next(self.0);
    observer.complete();
  }
}

impl<Item> ObservableExt<Item, Infallible> for ObservableOf<Item> {}
