//! Directive dispatch.
//!
//! A directive attribute `v-<name>="key"` resolves `<name>` in a [`DirectiveTable`]
//! built once per instance. The updater runs immediately with the current value of
//! `key`. Names without an updater are ignored.
//!
//! Only `model` ships by default: a two-way binding between a form control's value and
//! a data key.

use std::collections::HashMap;
use std::rc::Rc;

use tether_reactive::Value;
use tracing::debug;

use crate::dom::{Event, Node};
use crate::error::EventError;
use crate::instance::Instance;

/// Directive updater: `(instance, node, current value of key, key)`.
pub type Updater = Rc<dyn Fn(&Instance, &Node, Option<&Value>, &str)>;

/// Directive name to updater map.
#[derive(Clone, Default)]
pub struct DirectiveTable {
	updaters: HashMap<String, Updater>,
}

impl DirectiveTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a table holding the built-in directives.
	pub fn with_defaults() -> Self {
		let mut table = Self::new();
		table.register("model", Rc::new(model_updater));
		table
	}

	/// Registers (or replaces) the updater for `name`.
	pub fn register(&mut self, name: impl Into<String>, updater: Updater) {
		self.updaters.insert(name.into(), updater);
	}

	/// Looks up the updater for `name`.
	pub fn get(&self, name: &str) -> Option<Updater> {
		self.updaters.get(name).cloned()
	}

	/// Returns `true` if `name` has an updater.
	pub fn contains(&self, name: &str) -> bool {
		self.updaters.contains_key(name)
	}

	/// Registered directive names, sorted.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.updaters.keys().cloned().collect();
		names.sort();
		names
	}
}

impl core::fmt::Debug for DirectiveTable {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("DirectiveTable")
			.field("names", &self.names())
			.finish()
	}
}

pub(super) fn apply(instance: &Instance, node: &Node, name: &str, key: &str) {
	let Some(updater) = instance.directives().get(name) else {
		debug!(directive = name, "unknown directive ignored");
		return;
	};
	let value = instance.peek(key);
	updater(instance, node, value.as_ref(), key);
}

/// Two-way value binding (`v-model`).
///
/// Sets the control's value from the data, then, on the first pass over this control,
/// attaches an `input` listener writing the control's value back verbatim as a string
/// and a watcher refreshing the control when the key changes.
pub fn model_updater(instance: &Instance, node: &Node, value: Option<&Value>, key: &str) {
	node.set_value(&value.map(ToString::to_string).unwrap_or_default());

	if !node.mark_bound(&format!("model:{key}")) {
		return;
	}

	let weak = instance.downgrade();
	let target_key = key.to_string();
	node.add_event_listener(
		"input",
		Rc::new(move |event: &Event| -> Result<(), EventError> {
			let Some(instance) = weak.upgrade() else {
				return Ok(());
			};
			let input = Value::String(event.target().value());
			if let Err(err) = instance.set(&target_key, input) {
				debug!(%err, "model write skipped");
			}
			Ok(())
		}),
	);

	let control = node.downgrade();
	let watcher = instance.watch(key, move |value: &Value| {
		if let Some(control) = control.upgrade() {
			control.set_value(&value.to_string());
		}
	});
	node.retain_binding(watcher);
}
