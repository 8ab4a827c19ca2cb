//! DOM events.

use std::rc::Rc;

use super::node::Node;
use crate::error::EventError;

/// Listener callback. An error stops propagation and is returned to the dispatcher.
pub type EventHandler = Rc<dyn Fn(&Event) -> Result<(), EventError>>;

/// An event travelling from its target up through the ancestors.
#[derive(Debug, Clone)]
pub struct Event {
	kind: String,
	target: Node,
}

impl Event {
	/// Creates an event of the given kind (`"click"`, `"input"`, ...) aimed at `target`.
	pub fn new(kind: impl Into<String>, target: &Node) -> Self {
		Self {
			kind: kind.into(),
			target: target.clone(),
		}
	}

	/// The event name.
	pub fn kind(&self) -> &str {
		&self.kind
	}

	/// The node the event was dispatched on.
	pub fn target(&self) -> &Node {
		&self.target
	}
}
