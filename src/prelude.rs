//! Prelude: the imports a consumer of the engine normally needs.

pub use crate::observable;
pub use crate::observable::{Observable, ObservableExt};
pub use crate::observer::{AllObserver, Emitter, NoError, Observer, Publisher};
pub use crate::ops::box_it::BoxObservable;
pub use crate::scheduler::{Duration, Scheduler, Task, TaskHandle, TaskState, VirtualScheduler};
pub use crate::subject::{BehaviorSubject, ReplaySubject, Subject, SubjectSubscription};
pub use crate::subscriber::Subscriber;
pub use crate::subscription::{
  BoxSubscription, ClosureSubscription, Subscription, ZipSubscription,
};

#[cfg(feature = "timer")]
pub use futures::executor::{LocalPool, LocalSpawner};
