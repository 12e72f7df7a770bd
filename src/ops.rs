//! Operator implementations.
//!
//! Each operator is a pair of types: an `*Op` struct holding the source
//! plus configuration, and an observer wrapper that rewrites notifications
//! on their way downstream. Operators compose lazily: building a chain
//! does nothing until the outermost `subscribe`.

pub mod box_it;
pub mod catch_error;
pub mod debounce;
pub mod delay;
pub mod distinct_until_changed;
pub mod filter;
pub mod filter_map;
pub mod finalize;
pub mod map;
pub mod map_err;
pub mod merge;
pub mod on_complete;
pub mod on_error;
pub mod switch_map;
pub mod take;
pub mod tap;
