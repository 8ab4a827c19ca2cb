//! Value - Reactive Data Model
//!
//! [`Value`] is the dynamically typed value stored in reactive data. It mirrors the shape
//! of a JSON document, except that objects are shared [`ReactiveObject`] handles whose
//! properties can be intercepted by the converter.
//!
//! ## Equality
//!
//! Equality is *strict*: primitives compare by value, while arrays and objects compare
//! by identity. Two separately built objects with the same contents are not equal, and
//! `Value::from("9")` is not equal to `Value::from(9)`.
//!
//! ## Example
//!
//! ```
//! use tether_reactive::Value;
//!
//! let v = Value::from(5);
//! assert_eq!(v.to_string(), "5");
//! assert!(v.strict_eq(&Value::Number(5.0)));
//! assert!(!v.strict_eq(&Value::from("5")));
//! ```

use core::fmt;
use std::rc::Rc;

use crate::observer::ReactiveObject;

/// A dynamically typed reactive data value.
#[derive(Clone, Default)]
pub enum Value {
	/// Absence of a value.
	#[default]
	Null,
	/// A boolean.
	Bool(bool),
	/// A number. All numbers are double precision floats.
	Number(f64),
	/// A string.
	String(String),
	/// An opaque sequence. Arrays are never walked by the converter.
	Array(Rc<Vec<Value>>),
	/// A shared object whose properties may be reactive.
	Object(ReactiveObject),
}

impl Value {
	/// Strict equality: by value for primitives, by identity for arrays and objects.
	pub fn strict_eq(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Number(a), Value::Number(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
			(Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
			_ => false,
		}
	}

	/// Builds an array value from its elements.
	pub fn array<I>(items: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Value>,
	{
		Value::Array(Rc::new(items.into_iter().map(Into::into).collect()))
	}

	/// Returns `true` for [`Value::Object`].
	pub fn is_object(&self) -> bool {
		matches!(self, Value::Object(_))
	}

	/// Returns `true` for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Returns the object handle, if this is an object.
	pub fn as_object(&self) -> Option<&ReactiveObject> {
		match self {
			Value::Object(obj) => Some(obj),
			_ => None,
		}
	}

	/// Returns the string slice, if this is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the number, if this is a number.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Number(n) => Some(*n),
			_ => None,
		}
	}

	/// Returns the boolean, if this is a boolean.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Converts this value into a JSON document.
	///
	/// Non-finite numbers become `null`. Reads are untracked. Objects that contain
	/// themselves are not supported and will recurse without bound.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Value::Null => serde_json::Value::Null,
			Value::Bool(b) => serde_json::Value::Bool(*b),
			Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
				serde_json::Value::from(*n as i64)
			}
			Value::Number(n) => serde_json::Number::from_f64(*n)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			Value::String(s) => serde_json::Value::String(s.clone()),
			Value::Array(items) => {
				serde_json::Value::Array(items.iter().map(Value::to_json).collect())
			}
			Value::Object(obj) => serde_json::Value::Object(
				obj.entries()
					.into_iter()
					.map(|(key, value)| (key, value.to_json()))
					.collect(),
			),
		}
	}
}

/// Strict equality of two optional values; two absent values are equal.
pub fn strict_eq_opt(a: Option<&Value>, b: Option<&Value>) -> bool {
	match (a, b) {
		(None, None) => true,
		(Some(a), Some(b)) => a.strict_eq(b),
		_ => false,
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		self.strict_eq(other)
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("Null"),
			Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
			Value::String(s) => f.debug_tuple("String").field(s).finish(),
			Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
			Value::Object(obj) => f.debug_tuple("Object").field(obj).finish(),
		}
	}
}

/// Display form used when values are rendered into text.
impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(b) => write!(f, "{b}"),
			Value::Number(n) => fmt_number(*n, f),
			Value::String(s) => f.write_str(s),
			Value::Array(items) => {
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(",")?;
					}
					// Null elements render as empty between separators
					if !item.is_null() {
						write!(f, "{item}")?;
					}
				}
				Ok(())
			}
			Value::Object(_) => f.write_str("[object Object]"),
		}
	}
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	if n.is_nan() {
		f.write_str("NaN")
	} else if n.is_infinite() {
		f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
	} else if n == 0.0 {
		// Covers negative zero as well
		f.write_str("0")
	} else if n.abs() >= 1e21 || n.abs() < 1e-6 {
		// Exponent form with an explicit sign on positive exponents: 1e+21, 1.5e-7
		let formatted = format!("{n:e}");
		match formatted.split_once('e') {
			Some((mantissa, exponent)) if !exponent.starts_with('-') => {
				write!(f, "{mantissa}e+{exponent}")
			}
			_ => f.write_str(&formatted),
		}
	} else {
		write!(f, "{n}")
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl From<f64> for Value {
	fn from(n: f64) -> Self {
		Value::Number(n)
	}
}

impl From<i32> for Value {
	fn from(n: i32) -> Self {
		Value::Number(f64::from(n))
	}
}

impl From<u32> for Value {
	fn from(n: u32) -> Self {
		Value::Number(f64::from(n))
	}
}

impl From<i64> for Value {
	fn from(n: i64) -> Self {
		Value::Number(n as f64)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::String(s)
	}
}

impl From<ReactiveObject> for Value {
	fn from(obj: ReactiveObject) -> Self {
		Value::Object(obj)
	}
}

/// Builds fresh, not yet reactive, objects from JSON objects.
impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Bool(b),
			serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
			serde_json::Value::String(s) => Value::String(s),
			serde_json::Value::Array(items) => {
				Value::Array(Rc::new(items.into_iter().map(Value::from).collect()))
			}
			serde_json::Value::Object(map) => Value::Object(ReactiveObject::from_entries(
				map.into_iter().map(|(k, v)| (k, Value::from(v))),
			)),
		}
	}
}
