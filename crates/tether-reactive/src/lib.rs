//! Tether Reactive - Dependency-tracking Data Model
//!
//! This crate implements fine-grained change detection over plain, dynamically typed
//! data, without diffing.
//!
//! ## Architecture
//!
//! 1. **[`Value`] / [`ReactiveObject`]**: the data tree. Objects are shared handles.
//! 2. **Reactive Converter** ([`observe`], [`define_reactive`]): converts every property
//!    of every reachable object into a reactive property with its own registry.
//! 3. **Dependency Registry** ([`Dep`]): per-property list of [`Subscriber`]s, notified
//!    synchronously in registration order on change.
//! 4. **[`Watcher`]**: binds one key to one callback. It discovers its dependency by
//!    reading the key once while marked active in a [`DependencyContext`].
//!
//! Everything is single-threaded (`Rc` + `RefCell`) and synchronous: a write runs its
//! whole notification cascade before returning. There is no batching.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use serde_json::json;
//! use tether_reactive::{DependencyContext, Value, Watcher, observe};
//!
//! let data = Value::from(json!({ "count": 0 }));
//! observe(&data);
//! let data = data.as_object().unwrap().clone();
//!
//! let cx = DependencyContext::new();
//! let watcher = Watcher::new(Rc::new(data.clone()), "count", |v: &Value| {
//!     println!("count is now {v}");
//! }, &cx);
//!
//! data.set("count", Value::from(1)); // prints "count is now 1"
//! assert_eq!(watcher.old_value(), Some(Value::from(1)));
//! ```

pub mod context;
pub mod dep;
pub mod observer;
pub mod value;
pub mod watcher;

pub use context::{DependencyContext, DiscoveryScope};
pub use dep::{Dep, DepId, Subscriber};
pub use observer::{ReactiveObject, define_reactive, observe};
pub use value::{Value, strict_eq_opt};
pub use watcher::{WatchCallback, WatchSource, Watcher};
