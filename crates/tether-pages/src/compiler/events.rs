//! Event attribute binding.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::dom::{Event, Node};
use crate::error::EventError;
use crate::instance::Instance;

/// Binds `@<event>="<method>"` on `node`, once per attribute.
///
/// The method is resolved when the event fires, so an undefined method surfaces as
/// [`EventError::MethodNotFound`] to the dispatcher instead of failing the compile.
pub(super) fn bind(instance: &Instance, node: &Node, attribute: &str, event: &str, method: &str) {
	if !node.mark_bound(attribute) {
		return;
	}
	if instance.method(method).is_none() {
		debug!(event, method, "event bound to undefined method");
	} else {
		trace!(event, method, "event bound");
	}

	let weak = instance.downgrade();
	let event_name = event.to_string();
	let method_name = method.to_string();
	node.add_event_listener(
		event,
		Rc::new(move |fired: &Event| -> Result<(), EventError> {
			let Some(instance) = weak.upgrade() else {
				return Ok(());
			};
			let Some(handler) = instance.method(&method_name) else {
				return Err(EventError::MethodNotFound {
					method: method_name.clone(),
					event: event_name.clone(),
				});
			};
			handler(&instance, fired);
			Ok(())
		}),
	);
}
