//! # ripple: push-based reactive streams
//!
//! A small reactive stream engine built around three capabilities:
//! producing values over time ([`Observable`]), consuming them
//! ([`Observer`]), and cancelling the production ([`Subscription`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use ripple::prelude::*;
//!
//! observable::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| println!("value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A lazy producer: nothing runs until `subscribe` |
//! | [`Observer`] | Consumes `next`, `error` and `complete` notifications |
//! | [`Subscription`] | Handle used to cancel an active production |
//! | [`Subject`] | Multicast hub that is both observable and observer |
//! | [`Scheduler`] | Decouples *when* work happens from *what* the work is |
//!
//! The engine is single-threaded by design: notifications for one
//! subscription are delivered strictly in order, never concurrently.
//! Time-based operators go through a [`Scheduler`], and the
//! [`VirtualScheduler`] lets tests advance logical time synchronously
//! instead of sleeping.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Subject`]: subject::Subject
//! [`Scheduler`]: scheduler::Scheduler
//! [`VirtualScheduler`]: scheduler::VirtualScheduler

pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;

pub use prelude::*;
