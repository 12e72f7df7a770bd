use std::convert::Infallible;

use crate::observable::{Observable, ObservableExt};
use crate::observer::Observer;

/// Creates an observable that emits every element of an iterator in order,
/// then completes. Never errors.
///
/// Emission stops early once the observer reports itself finished, so a
/// downstream `take` does not force the whole iterator to be walked.
///
/// # Example
///
/// ```rust
/// use ripple::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{}", v));
/// ```
pub fn from_iter<I>(iter: I) -> ObservableIter<I>
where
  I: IntoIterator,
{
  ObservableIter(iter)
}

#[derive(Clone)]
pub struct ObservableIter<I>(I);

impl<I, O> Observable<I::Item, Infallible, O> for ObservableIter<I>
where
  I: IntoIterator,
  O: Observer<I::Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    for value in self.0 {
      if observer.is_finished() {
        return;
      }
      observer.next(value);
    }
    observer.complete();
  }
}

impl<I> ObservableExt<I::Item, Infallible> for ObservableIter<I> where I: IntoIterator {}

#[cfg(test)]
mod test {
  use bencher::{benchmark_group, Bencher};

  use crate::prelude::*;

  #[test]
  fn from_range() {
    let mut hit_count = 0;
    let mut completed = false;
    observable::from_iter(0..100)
      .on_complete(|| completed = true)
      .subscribe(|_| hit_count += 1);

    assert_eq!(hit_count, 100);
    assert!(completed);
  }

  #[test]
  fn from_vec() {
    let mut hit_count = 0;
    let mut completed = false;
    observable::from_iter(vec![0; 100])
      .on_complete(|| completed = true)
      .subscribe(|_| hit_count += 1);

    assert_eq!(hit_count, 100);
    assert!(completed);
  }

  #[test]
  fn stops_walking_once_downstream_is_done() {
    let mut pulled = 0;
    let counting = (0..).inspect(|_| pulled += 1);
    let mut seen = 0;
    observable::from_iter(counting).take(3).subscribe(|_| seen += 1);

    assert_eq!(seen, 3);
    // Three emitted values plus the one probe that saw a finished observer.
    assert!(pulled <= 4);
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_from_iter);

  fn bench_from_iter(b: &mut Bencher) { b.iter(from_range); }
}
