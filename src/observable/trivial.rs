use std::{convert::Infallible, marker::PhantomData};

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

/// Creates an observable that produces no values and completes immediately.
pub fn empty<Item>() -> Empty<Item> { Empty(PhantomData) }

#[derive(Clone)]
pub struct Empty<Item>(PhantomData<Item>);

impl<Item, O> Observable<Item, Infallible, O> for Empty<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.complete(); }
}

impl<Item> ObservableExt<Item, Infallible> for Empty<Item> {}

/// Creates an observable that never emits anything: no value, no error, no
/// completion.
pub fn never<Item, Err>() -> Never<Item, Err> { Never(PhantomData) }

#[derive(Clone)]
pub struct Never<Item, Err>(PhantomData<(Item, Err)>);

impl<Item, Err, O> Observable<Item, Err, O> for Never<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let _ = observer;
  }
}

impl<Item, Err> ObservableExt<Item, Err> for Never<Item, Err> {}

/// Creates an observable that emits no value and terminates with an error.
///
/// # Example
///
/// ```rust
/// use ripple::prelude::*;
///
/// let mut error = String::new();
/// observable::throw::<i32, _>(String::from("boom"))
///   .subscribe_err(|_| unreachable!(), |e| error = e);
/// assert_eq!(error, "boom");
/// ```
pub fn throw<Item, Err>(err: Err) -> Throw<Item, Err> {
  Throw { err, _hint: PhantomData }
}

#[derive(Clone)]
pub struct Throw<Item, Err> {
  err: Err,
  _hint: PhantomData<Item>,
}

impl<Item, Err, O> Observable<Item, Err, O> for Throw<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.error(self.err); }
}

impl<Item, Err> ObservableExt<Item, Err> for Throw<Item, Err> {}
