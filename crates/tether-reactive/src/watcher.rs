//! Watcher - One Live Binding
//!
//! A [`Watcher`] ties a single key of a [`WatchSource`] to an update callback.
//!
//! Dependency discovery is a single read: construction opens a discovery scope on the
//! [`DependencyContext`], reads the key once (the reactive property registers the
//! watcher into its registry during that read), records the value as the *old value*
//! and closes the scope. A watcher knows what it depends on only because it happened to
//! read exactly that key while active.
//!
//! [`Subscriber::update`] re-reads the key untracked. A value strictly equal to the old
//! value is ignored; otherwise the callback runs with the new value and the source's
//! [`WatchSource::after_update`] hook fires.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tether_reactive::{DependencyContext, ReactiveObject, Value, Watcher, observe};
//!
//! let data = ReactiveObject::from_entries([("count", 0)]);
//! observe(&Value::from(data.clone()));
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let cx = DependencyContext::new();
//! let _watcher = Watcher::new(Rc::new(data.clone()), "count", {
//!     let seen = seen.clone();
//!     move |value: &Value| seen.borrow_mut().push(value.to_string())
//! }, &cx);
//!
//! data.set("count", Value::from(5));
//! assert_eq!(*seen.borrow(), vec!["5".to_string()]);
//! ```

use core::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::context::DependencyContext;
use crate::dep::Subscriber;
use crate::value::{Value, strict_eq_opt};

/// Something a [`Watcher`] can read keys from.
pub trait WatchSource {
	/// Reads `key`, registering the active subscriber of `cx`.
	fn read(&self, key: &str, cx: &DependencyContext) -> Option<Value>;

	/// Reads `key` without registering anything.
	fn peek(&self, key: &str) -> Option<Value>;

	/// Runs after a watcher over this source has delivered a changed value.
	fn after_update(&self) {}
}

/// Update callback receiving the new value.
pub type WatchCallback = Box<dyn Fn(&Value)>;

/// A live binding between one key and one update callback.
pub struct Watcher {
	source: Rc<dyn WatchSource>,
	key: String,
	callback: WatchCallback,
	old_value: RefCell<Option<Value>>,
}

impl Watcher {
	/// Creates a watcher and discovers its dependency.
	///
	/// The caller owns the returned watcher; registries only hold weak references, so
	/// dropping it ends the binding.
	pub fn new<F>(
		source: Rc<dyn WatchSource>,
		key: impl Into<String>,
		callback: F,
		cx: &DependencyContext,
	) -> Rc<Self>
	where
		F: Fn(&Value) + 'static,
	{
		let watcher = Rc::new(Self {
			source,
			key: key.into(),
			callback: Box::new(callback),
			old_value: RefCell::new(None),
		});

		let value = {
			let _scope = cx.enter(watcher.clone());
			watcher.source.read(&watcher.key, cx)
		};
		debug!(key = %watcher.key, found = value.is_some(), "watcher created");
		*watcher.old_value.borrow_mut() = value;
		watcher
	}

	/// The tracked key.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// The last value this watcher observed.
	pub fn old_value(&self) -> Option<Value> {
		self.old_value.borrow().clone()
	}
}

impl Subscriber for Watcher {
	fn update(&self) {
		let value = self.source.peek(&self.key);
		if strict_eq_opt(value.as_ref(), self.old_value.borrow().as_ref()) {
			return;
		}
		*self.old_value.borrow_mut() = value.clone();

		if let Some(value) = &value {
			(self.callback)(value);
		}
		self.source.after_update();
	}
}

impl core::fmt::Debug for Watcher {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Watcher")
			.field("key", &self.key)
			.field("old_value", &self.old_value.borrow())
			.finish()
	}
}
