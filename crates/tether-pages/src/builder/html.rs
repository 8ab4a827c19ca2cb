//! HTML Element Builder
//!
//! Method chaining over a freshly created [`Node`]. Template attributes (`v-model`,
//! `@click`) are plain attributes here; they only gain meaning once an instance
//! compiles the tree.

use std::rc::Rc;

use crate::dom::{Event, Node};
use crate::error::EventError;

/// HTML element builder with fluent API
///
/// ## Example
///
/// ```
/// use tether_pages::builder::html::button;
///
/// let button = button()
///     .class("btn btn-primary")
///     .attr("@click", "increment")
///     .text("+1")
///     .build();
///
/// assert_eq!(
///     button.outer_html(),
///     r#"<button class="btn btn-primary" @click="increment">+1</button>"#
/// );
/// ```
pub struct ElementBuilder {
	element: Node,
}

impl ElementBuilder {
	/// Create a new builder around an element
	pub fn new(element: Node) -> Self {
		Self { element }
	}

	/// Set the class attribute
	///
	/// Multiple calls overwrite the previous value.
	pub fn class(self, class: &str) -> Self {
		self.element.set_attribute("class", class);
		self
	}

	/// Set the id attribute
	pub fn id(self, id: &str) -> Self {
		self.element.set_attribute("id", id);
		self
	}

	/// Set a custom attribute
	pub fn attr(self, name: &str, value: &str) -> Self {
		self.element.set_attribute(name, value);
		self
	}

	/// Set the form-control value
	pub fn value(self, value: &str) -> Self {
		self.element.set_value(value);
		self
	}

	/// Set text content
	///
	/// This replaces all children of the element.
	pub fn text(self, text: &str) -> Self {
		self.element.set_text_content(text);
		self
	}

	/// Append a child node
	pub fn child(self, child: Node) -> Self {
		self.element.append_child(&child);
		self
	}

	/// Append several child nodes
	pub fn children<I>(self, children: I) -> Self
	where
		I: IntoIterator<Item = Node>,
	{
		for child in children {
			self.element.append_child(&child);
		}
		self
	}

	/// Add an event listener for any event type
	pub fn on<F>(self, event_type: &str, callback: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		self.element.add_event_listener(
			event_type,
			Rc::new(move |event: &Event| -> Result<(), EventError> {
				callback(event);
				Ok(())
			}),
		);
		self
	}

	/// Finish building and return the element
	pub fn build(self) -> Node {
		self.element
	}
}

/// Create a builder for an arbitrary tag
pub fn element(tag: &str) -> ElementBuilder {
	ElementBuilder::new(Node::element(tag))
}

/// Create a text node
pub fn text(content: &str) -> Node {
	Node::text(content)
}

macro_rules! define_element {
	($(#[$meta:meta])* $name:ident, $tag:literal) => {
		$(#[$meta])*
		pub fn $name() -> ElementBuilder {
			element($tag)
		}
	};
}

define_element!(
	/// Create a `<div>` element
	div, "div"
);

define_element!(
	/// Create a `<span>` element
	span, "span"
);

define_element!(
	/// Create a `<p>` element (paragraph)
	p, "p"
);

define_element!(
	/// Create an `<h1>` element
	h1, "h1"
);

define_element!(
	/// Create a `<button>` element
	button, "button"
);

define_element!(
	/// Create an `<input>` element
	input, "input"
);

define_element!(
	/// Create a `<textarea>` element
	textarea, "textarea"
);

define_element!(
	/// Create a `<ul>` element
	ul, "ul"
);

define_element!(
	/// Create a `<li>` element
	li, "li"
);

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_builder_sets_attributes_in_order() {
		let node = input().id("name").attr("v-model", "name").class("field").build();
		assert_eq!(
			node.attributes(),
			vec![
				("id".to_string(), "name".to_string()),
				("v-model".to_string(), "name".to_string()),
				("class".to_string(), "field".to_string()),
			]
		);
	}

	#[rstest]
	fn test_children_and_text() {
		let list = ul()
			.children(vec![li().text("a").build(), li().text("b").build()])
			.child(text("!"))
			.build();
		assert_eq!(list.text_content(), "ab!");
		assert_eq!(list.outer_html(), "<ul><li>a</li><li>b</li>!</ul>");
	}

	#[rstest]
	fn test_on_registers_listener() {
		let hits = Rc::new(Cell::new(0));
		let counter = hits.clone();
		let node = button()
			.on("click", move |_| counter.set(counter.get() + 1))
			.build();
		node.click().unwrap();
		assert_eq!(hits.get(), 1);
	}

	#[rstest]
	fn test_value_is_not_an_attribute() {
		let node = input().value("9").build();
		assert_eq!(node.value(), "9");
		assert!(!node.has_attribute("value"));
	}
}
