//! Type erasure for heterogeneous chains.

use crate::observable::{Observable, ObservableExt};
use crate::observer::{Observer, Publisher};
use crate::subscription::BoxSubscription;

/// An observable with its concrete chain type erased. Subscribing boxes
/// the observer and the returned subscription; use it where chains built
/// from different operators must share one type (struct fields,
/// collections, branches).
pub struct BoxObservable<Item, Err> {
  subscribe: Box<dyn FnOnce(Box<dyn Publisher<Item, Err>>) -> BoxSubscription>,
}

impl<Item, Err> BoxObservable<Item, Err> {
  pub fn new<S>(source: S) -> Self
  where
    S: Observable<Item, Err, Box<dyn Publisher<Item, Err>>> + 'static,
    S::Unsub: 'static,
  {
    BoxObservable {
      subscribe: Box::new(move |observer| BoxSubscription::new(source.actual_subscribe(observer))),
    }
  }
}

impl<Item, Err, O> Observable<Item, Err, O> for BoxObservable<Item, Err>
where
  O: Observer<Item, Err> + 'static,
{
  type Unsub = BoxSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub { (self.subscribe)(Box::new(observer)) }
}

impl<Item, Err> ObservableExt<Item, Err> for BoxObservable<Item, Err> {}
