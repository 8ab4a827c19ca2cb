//! Reactive Converter
//!
//! [`observe`] walks a data tree and turns every property of every reachable object into
//! a *reactive* property: a value paired with its own [`Dep`]. Conversion happens in
//! place on the shared [`ReactiveObject`], never by copying.
//!
//! ## Interception
//!
//! - **Read** through [`ReactiveObject::get`]: if the [`DependencyContext`] has an active
//!   subscriber, it is appended to the property's registry. The value is returned either
//!   way.
//! - **Write** through [`ReactiveObject::set`]: a value strictly equal to the current one
//!   is ignored. Otherwise the value is replaced, the new value is observed (so a freshly
//!   attached object becomes reactive too) and the registry is notified.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use tether_reactive::{DependencyContext, Value, observe};
//!
//! let data = Value::from(json!({ "user": { "name": "A" } }));
//! observe(&data);
//!
//! let root = data.as_object().unwrap();
//! assert!(root.is_reactive("user"));
//!
//! let cx = DependencyContext::new();
//! let user = root.get("user", &cx).unwrap();
//! assert!(user.as_object().unwrap().is_reactive("name"));
//! ```

use core::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::trace;

use crate::context::DependencyContext;
use crate::dep::Dep;
use crate::value::Value;
use crate::watcher::WatchSource;

#[derive(Clone)]
enum Property {
	Plain(Value),
	Reactive { value: Value, dep: Dep },
}

impl Property {
	fn value(&self) -> &Value {
		match self {
			Property::Plain(value) | Property::Reactive { value, .. } => value,
		}
	}
}

/// Shared, insertion-ordered object whose properties can be made reactive.
///
/// Cloning yields another handle to the same object; identity is compared with
/// [`ReactiveObject::ptr_eq`].
#[derive(Clone, Default)]
pub struct ReactiveObject {
	props: Rc<RefCell<IndexMap<String, Property>>>,
}

impl ReactiveObject {
	/// Creates an empty object.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an object with plain (not yet reactive) properties.
	pub fn from_entries<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		let props = entries
			.into_iter()
			.map(|(key, value)| (key.into(), Property::Plain(value.into())))
			.collect();
		Self {
			props: Rc::new(RefCell::new(props)),
		}
	}

	/// Reads a property, registering the active subscriber of `cx` if the property is
	/// reactive.
	pub fn get(&self, key: &str, cx: &DependencyContext) -> Option<Value> {
		let (value, dep) = {
			let props = self.props.borrow();
			match props.get(key)? {
				Property::Plain(value) => (value.clone(), None),
				Property::Reactive { value, dep } => (value.clone(), Some(dep.clone())),
			}
		};
		if let (Some(dep), Some(active)) = (dep, cx.active()) {
			trace!(key, dep = ?dep.id(), "tracked read");
			dep.add_sub(Rc::downgrade(&active));
		}
		Some(value)
	}

	/// Reads a property without registering anything.
	pub fn peek(&self, key: &str) -> Option<Value> {
		self.props.borrow().get(key).map(|prop| prop.value().clone())
	}

	/// Writes a property.
	///
	/// Returns `false` when the write was skipped because `value` strictly equals the
	/// current value. Writes to plain properties replace them without notification, and
	/// writes to missing keys add a plain property.
	pub fn set(&self, key: &str, value: Value) -> bool {
		let dep = {
			let mut props = self.props.borrow_mut();
			match props.get_mut(key) {
				Some(Property::Reactive { value: current, dep }) => {
					if current.strict_eq(&value) {
						return false;
					}
					*current = value.clone();
					dep.clone()
				}
				Some(Property::Plain(current)) => {
					if current.strict_eq(&value) {
						return false;
					}
					*current = value;
					return true;
				}
				None => {
					props.insert(key.to_string(), Property::Plain(value));
					return true;
				}
			}
		};
		// Borrow released: observing and notifying may read this object again
		observe(&value);
		dep.notify();
		true
	}

	/// Property names in insertion order.
	pub fn keys(&self) -> Vec<String> {
		self.props.borrow().keys().cloned().collect()
	}

	/// Snapshot of all properties, read untracked.
	pub fn entries(&self) -> Vec<(String, Value)> {
		self.props
			.borrow()
			.iter()
			.map(|(key, prop)| (key.clone(), prop.value().clone()))
			.collect()
	}

	/// Returns `true` if the object has `key`.
	pub fn contains_key(&self, key: &str) -> bool {
		self.props.borrow().contains_key(key)
	}

	/// Number of properties.
	pub fn len(&self) -> usize {
		self.props.borrow().len()
	}

	/// Returns `true` for an object without properties.
	pub fn is_empty(&self) -> bool {
		self.props.borrow().is_empty()
	}

	/// Returns `true` if `key` has been converted.
	pub fn is_reactive(&self, key: &str) -> bool {
		matches!(
			self.props.borrow().get(key),
			Some(Property::Reactive { .. })
		)
	}

	/// Number of registrations on the registry of `key` (0 for plain or missing keys).
	pub fn subscriber_count(&self, key: &str) -> usize {
		match self.props.borrow().get(key) {
			Some(Property::Reactive { dep, .. }) => dep.len(),
			_ => 0,
		}
	}

	/// Returns `true` if both handles refer to the same object.
	pub fn ptr_eq(&self, other: &ReactiveObject) -> bool {
		Rc::ptr_eq(&self.props, &other.props)
	}

	fn addr(&self) -> usize {
		Rc::as_ptr(&self.props) as *const () as usize
	}
}

impl core::fmt::Debug for ReactiveObject {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		// Keys only: objects may contain themselves
		f.debug_struct("ReactiveObject")
			.field("keys", &self.keys())
			.finish()
	}
}

impl WatchSource for ReactiveObject {
	fn read(&self, key: &str, cx: &DependencyContext) -> Option<Value> {
		self.get(key, cx)
	}

	fn peek(&self, key: &str) -> Option<Value> {
		ReactiveObject::peek(self, key)
	}
}

/// Converts every property of `value` and of every object reachable from it.
///
/// Anything other than [`Value::Object`] is left untouched. Arrays are opaque and are
/// not walked.
pub fn observe(value: &Value) {
	let mut visited = HashSet::new();
	walk(value, &mut visited);
}

/// Converts a single property of `obj` to a reactive property holding `value`.
///
/// The value is observed first, eagerly. A property that is already reactive keeps its
/// registry, so subscriptions survive repeated conversion.
pub fn define_reactive(obj: &ReactiveObject, key: &str, value: Value) {
	let mut visited = HashSet::new();
	visited.insert(obj.addr());
	define(obj, key, value, &mut visited);
}

fn walk(value: &Value, visited: &mut HashSet<usize>) {
	let Value::Object(obj) = value else {
		return;
	};
	if !visited.insert(obj.addr()) {
		return;
	}
	for (key, value) in obj.entries() {
		define(obj, &key, value, visited);
	}
}

fn define(obj: &ReactiveObject, key: &str, value: Value, visited: &mut HashSet<usize>) {
	walk(&value, visited);

	let mut props = obj.props.borrow_mut();
	match props.get_mut(key) {
		Some(Property::Reactive { value: current, .. }) => *current = value,
		Some(prop) => {
			let dep = Dep::new();
			trace!(key, dep = ?dep.id(), "property converted");
			*prop = Property::Reactive { value, dep };
		}
		None => {
			let dep = Dep::new();
			trace!(key, dep = ?dep.id(), "property defined");
			props.insert(key.to_string(), Property::Reactive { value, dep });
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dep::Subscriber;
	use core::cell::Cell;
	use proptest::prelude::*;
	use rstest::rstest;
	use serde_json::json;

	struct Counter(Cell<usize>);

	impl Subscriber for Counter {
		fn update(&self) {
			self.0.set(self.0.get() + 1);
		}
	}

	fn subscribe(obj: &ReactiveObject, key: &str) -> Rc<Counter> {
		let cx = DependencyContext::new();
		let counter = Rc::new(Counter(Cell::new(0)));
		let _scope = cx.enter(counter.clone());
		obj.get(key, &cx);
		counter
	}

	#[rstest]
	fn test_observe_ignores_non_objects() {
		observe(&Value::Null);
		observe(&Value::from(3));
		observe(&Value::array([1, 2]));
	}

	#[rstest]
	fn test_observe_converts_nested_objects_eagerly() {
		let data = Value::from(json!({ "a": 1, "b": { "c": { "d": true } } }));
		observe(&data);

		let root = data.as_object().unwrap();
		assert!(root.is_reactive("a"));
		assert!(root.is_reactive("b"));

		let b = root.peek("b").unwrap();
		let c = b.as_object().unwrap().peek("c").unwrap();
		assert!(c.as_object().unwrap().is_reactive("d"));
	}

	#[rstest]
	fn test_arrays_are_not_walked() {
		let data = Value::from(json!({ "items": [{ "x": 1 }] }));
		observe(&data);

		let Some(Value::Array(items)) = data.as_object().unwrap().peek("items") else {
			panic!("expected array");
		};
		assert!(!items[0].as_object().unwrap().is_reactive("x"));
	}

	#[rstest]
	fn test_untracked_read_registers_nothing() {
		let obj = ReactiveObject::from_entries([("n", 1)]);
		observe(&Value::from(obj.clone()));

		obj.get("n", &DependencyContext::new());
		assert_eq!(obj.subscriber_count("n"), 0);
	}

	#[rstest]
	fn test_write_notifies_and_equal_write_does_not() {
		let obj = ReactiveObject::from_entries([("n", 1)]);
		observe(&Value::from(obj.clone()));
		let counter = subscribe(&obj, "n");

		assert!(!obj.set("n", Value::from(1)));
		assert_eq!(counter.0.get(), 0);

		assert!(obj.set("n", Value::from(2)));
		assert_eq!(counter.0.get(), 1);
		assert_eq!(obj.peek("n"), Some(Value::from(2)));
	}

	#[rstest]
	fn test_assigned_object_becomes_reactive() {
		let obj = ReactiveObject::from_entries([("user", Value::Null)]);
		observe(&Value::from(obj.clone()));

		let replacement = Value::from(json!({ "name": "B" }));
		obj.set("user", replacement.clone());

		assert!(replacement.as_object().unwrap().is_reactive("name"));
	}

	#[rstest]
	fn test_reobserving_keeps_subscriptions() {
		let obj = ReactiveObject::from_entries([("n", 1)]);
		let data = Value::from(obj.clone());
		observe(&data);
		let counter = subscribe(&obj, "n");

		observe(&data);
		define_reactive(&obj, "n", Value::from(1));
		obj.set("n", Value::from(5));

		assert_eq!(counter.0.get(), 1);
	}

	#[rstest]
	fn test_self_referencing_object_terminates() {
		let obj = ReactiveObject::from_entries([("n", 1)]);
		obj.set("me", Value::from(obj.clone()));
		observe(&Value::from(obj.clone()));

		assert!(obj.is_reactive("me"));
	}

	#[rstest]
	fn test_plain_and_missing_keys_do_not_notify() {
		let obj = ReactiveObject::new();
		assert!(obj.set("fresh", Value::from("x")));
		assert!(!obj.is_reactive("fresh"));
		assert_eq!(obj.keys(), vec!["fresh".to_string()]);
	}

	proptest! {
		#[test]
		fn prop_primitive_round_trip(n in any::<f64>().prop_filter("NaN never equals itself", |n| !n.is_nan()), s in ".*") {
			let obj = ReactiveObject::from_entries([("k", 0)]);
			observe(&Value::from(obj.clone()));

			obj.set("k", Value::from(n));
			prop_assert_eq!(obj.peek("k"), Some(Value::from(n)));

			obj.set("k", Value::from(s.clone()));
			prop_assert_eq!(obj.peek("k"), Some(Value::from(s)));
		}

		#[test]
		fn prop_equal_write_is_silent(n in -1.0e9f64..1.0e9) {
			let obj = ReactiveObject::from_entries([("k", n)]);
			observe(&Value::from(obj.clone()));
			let counter = subscribe(&obj, "k");

			prop_assert!(!obj.set("k", Value::from(n)));
			prop_assert_eq!(counter.0.get(), 0);
		}
	}
}
