//! DOM nodes.

use core::any::Any;
use core::cell::RefCell;
use core::fmt;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use tether_reactive::Watcher;

use super::document::Selector;
use super::event::{Event, EventHandler};
use crate::error::EventError;

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
	"area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "wbr",
];

/// Kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
	/// An element with a tag, attributes and children
	Element,
	/// A text node
	Text,
}

enum NodeKind {
	Element {
		tag: String,
		attributes: RefCell<Vec<(String, String)>>,
		value: RefCell<String>,
	},
	Text(RefCell<String>),
}

struct Listener {
	kind: String,
	handler: EventHandler,
}

struct NodeInner {
	kind: NodeKind,
	parent: RefCell<Weak<NodeInner>>,
	children: RefCell<Vec<Node>>,
	listeners: RefCell<Vec<Listener>>,
	/// Watchers rendering into this node; they live as long as the node does
	bindings: RefCell<Vec<Rc<Watcher>>>,
	/// Markers of listeners already attached by the compiler
	bound: RefCell<HashSet<String>>,
	/// Compiler state carried between passes (the interpolation layout of a text node)
	compiled: RefCell<Option<Rc<dyn Any>>>,
}

/// Shared handle to a DOM node.
#[derive(Clone)]
pub struct Node {
	inner: Rc<NodeInner>,
}

/// Weak handle to a DOM node.
#[derive(Clone)]
pub struct WeakNode {
	inner: Weak<NodeInner>,
}

impl WeakNode {
	/// Returns the node if it still exists.
	pub fn upgrade(&self) -> Option<Node> {
		self.inner.upgrade().map(|inner| Node { inner })
	}
}

impl Node {
	fn from_kind(kind: NodeKind) -> Self {
		Self {
			inner: Rc::new(NodeInner {
				kind,
				parent: RefCell::new(Weak::new()),
				children: RefCell::new(Vec::new()),
				listeners: RefCell::new(Vec::new()),
				bindings: RefCell::new(Vec::new()),
				bound: RefCell::new(HashSet::new()),
				compiled: RefCell::new(None),
			}),
		}
	}

	/// Creates a detached element.
	pub fn element(tag: impl Into<String>) -> Self {
		Self::from_kind(NodeKind::Element {
			tag: tag.into().to_ascii_lowercase(),
			attributes: RefCell::new(Vec::new()),
			value: RefCell::new(String::new()),
		})
	}

	/// Creates a detached text node.
	pub fn text(content: impl Into<String>) -> Self {
		Self::from_kind(NodeKind::Text(RefCell::new(content.into())))
	}

	/// Returns a weak handle to this node.
	pub fn downgrade(&self) -> WeakNode {
		WeakNode {
			inner: Rc::downgrade(&self.inner),
		}
	}

	/// Returns `true` if both handles refer to the same node.
	pub fn ptr_eq(&self, other: &Node) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// The node kind.
	pub fn node_type(&self) -> NodeType {
		match self.inner.kind {
			NodeKind::Element { .. } => NodeType::Element,
			NodeKind::Text(_) => NodeType::Text,
		}
	}

	/// Returns `true` for element nodes.
	pub fn is_element(&self) -> bool {
		self.node_type() == NodeType::Element
	}

	/// Lower-case tag name of an element.
	pub fn tag_name(&self) -> Option<&str> {
		match &self.inner.kind {
			NodeKind::Element { tag, .. } => Some(tag),
			NodeKind::Text(_) => None,
		}
	}

	// ---- tree ----

	/// Appends `child`, detaching it from its previous parent first.
	///
	/// Text nodes cannot have children; appending to one does nothing.
	pub fn append_child(&self, child: &Node) {
		if !self.is_element() || child.ptr_eq(self) {
			return;
		}
		child.detach();
		*child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
		self.inner.children.borrow_mut().push(child.clone());
	}

	/// Removes this node from its parent.
	pub fn detach(&self) {
		let Some(parent) = self.parent() else {
			return;
		};
		parent
			.inner
			.children
			.borrow_mut()
			.retain(|c| !c.ptr_eq(self));
		*self.inner.parent.borrow_mut() = Weak::new();
	}

	/// Snapshot of the child list.
	pub fn children(&self) -> Vec<Node> {
		self.inner.children.borrow().clone()
	}

	/// Returns `true` if the node has at least one child.
	pub fn has_children(&self) -> bool {
		!self.inner.children.borrow().is_empty()
	}

	/// The parent node, if attached.
	pub fn parent(&self) -> Option<Node> {
		self.inner
			.parent
			.borrow()
			.upgrade()
			.map(|inner| Node { inner })
	}

	/// First descendant (excluding this node) matching `selector`, depth-first.
	pub fn query_selector(&self, selector: &str) -> Option<Node> {
		let selector = Selector::parse(selector)?;
		self.children()
			.iter()
			.find_map(|child| child.find(&selector))
	}

	pub(crate) fn find(&self, selector: &Selector) -> Option<Node> {
		if selector.matches(self) {
			return Some(self.clone());
		}
		self.children()
			.iter()
			.find_map(|child| child.find(selector))
	}

	// ---- attributes ----

	/// Snapshot of the attributes in document order.
	pub fn attributes(&self) -> Vec<(String, String)> {
		match &self.inner.kind {
			NodeKind::Element { attributes, .. } => attributes.borrow().clone(),
			NodeKind::Text(_) => Vec::new(),
		}
	}

	/// Value of attribute `name`.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		match &self.inner.kind {
			NodeKind::Element { attributes, .. } => attributes
				.borrow()
				.iter()
				.find(|(n, _)| n == name)
				.map(|(_, v)| v.clone()),
			NodeKind::Text(_) => None,
		}
	}

	/// Returns `true` if the element has attribute `name`.
	pub fn has_attribute(&self, name: &str) -> bool {
		self.get_attribute(name).is_some()
	}

	/// Sets an attribute, keeping its position if it already exists.
	pub fn set_attribute(&self, name: &str, value: &str) {
		let NodeKind::Element { attributes, .. } = &self.inner.kind else {
			return;
		};
		let mut attributes = attributes.borrow_mut();
		match attributes.iter_mut().find(|(n, _)| n == name) {
			Some((_, current)) => *current = value.to_string(),
			None => attributes.push((name.to_string(), value.to_string())),
		}
	}

	/// Removes an attribute.
	pub fn remove_attribute(&self, name: &str) {
		if let NodeKind::Element { attributes, .. } = &self.inner.kind {
			attributes.borrow_mut().retain(|(n, _)| n != name);
		}
	}

	/// Returns `true` if the space-separated `class` attribute contains `class`.
	pub fn has_class(&self, class: &str) -> bool {
		self.get_attribute("class")
			.is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
	}

	// ---- content ----

	/// Text of a text node, or the concatenated text of an element's descendants.
	pub fn text_content(&self) -> String {
		match &self.inner.kind {
			NodeKind::Text(content) => content.borrow().clone(),
			NodeKind::Element { .. } => self
				.children()
				.iter()
				.map(Node::text_content)
				.collect(),
		}
	}

	/// Replaces a text node's content, or an element's children with one text node.
	pub fn set_text_content(&self, text: &str) {
		match &self.inner.kind {
			NodeKind::Text(content) => *content.borrow_mut() = text.to_string(),
			NodeKind::Element { .. } => {
				for child in self.children() {
					child.detach();
				}
				self.append_child(&Node::text(text));
			}
		}
	}

	/// Current value of a form control (empty for other nodes).
	pub fn value(&self) -> String {
		match &self.inner.kind {
			NodeKind::Element { value, .. } => value.borrow().clone(),
			NodeKind::Text(_) => String::new(),
		}
	}

	/// Sets the value of a form control.
	pub fn set_value(&self, new_value: &str) {
		if let NodeKind::Element { value, .. } = &self.inner.kind {
			*value.borrow_mut() = new_value.to_string();
		}
	}

	// ---- events ----

	/// Registers a listener for events of `kind`.
	pub fn add_event_listener(&self, kind: impl Into<String>, handler: EventHandler) {
		self.inner.listeners.borrow_mut().push(Listener {
			kind: kind.into(),
			handler,
		});
	}

	/// Number of listeners registered for `kind`.
	pub fn listener_count(&self, kind: &str) -> usize {
		self.inner
			.listeners
			.borrow()
			.iter()
			.filter(|l| l.kind == kind)
			.count()
	}

	/// Runs the listeners of this node, then of each ancestor.
	///
	/// The first listener error stops propagation and is returned.
	pub fn dispatch_event(&self, event: &Event) -> Result<(), EventError> {
		let mut current = Some(self.clone());
		while let Some(node) = current {
			let handlers: Vec<EventHandler> = node
				.inner
				.listeners
				.borrow()
				.iter()
				.filter(|l| l.kind == event.kind())
				.map(|l| l.handler.clone())
				.collect();
			for handler in handlers {
				handler(event)?;
			}
			current = node.parent();
		}
		Ok(())
	}

	/// Simulates a user edit: sets the control value and dispatches `input`.
	pub fn dispatch_input(&self, value: &str) -> Result<(), EventError> {
		self.set_value(value);
		self.dispatch_event(&Event::new("input", self))
	}

	/// Dispatches a `click` event on this node.
	pub fn click(&self) -> Result<(), EventError> {
		self.dispatch_event(&Event::new("click", self))
	}

	// ---- bindings ----

	/// Keeps `watcher` alive for as long as this node exists.
	pub fn retain_binding(&self, watcher: Rc<Watcher>) {
		self.inner.bindings.borrow_mut().push(watcher);
	}

	/// Number of watchers retained by this node.
	pub fn binding_count(&self) -> usize {
		self.inner.bindings.borrow().len()
	}

	/// Records `marker`; returns `false` if it was already recorded.
	pub(crate) fn mark_bound(&self, marker: &str) -> bool {
		self.inner.bound.borrow_mut().insert(marker.to_string())
	}

	/// Compiler state stored by an earlier pass, if it has type `T`.
	pub(crate) fn compiled<T: 'static>(&self) -> Option<Rc<T>> {
		let state = self.inner.compiled.borrow().clone()?;
		state.downcast::<T>().ok()
	}

	/// Stores compiler state for later passes.
	pub(crate) fn set_compiled<T: 'static>(&self, state: Rc<T>) {
		*self.inner.compiled.borrow_mut() = Some(state as Rc<dyn Any>);
	}

	// ---- serialization ----

	/// Serializes the node and its descendants as HTML.
	pub fn outer_html(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	/// Serializes the descendants as HTML.
	pub fn inner_html(&self) -> String {
		let mut out = String::new();
		for child in self.children() {
			child.write_html(&mut out);
		}
		out
	}

	fn write_html(&self, out: &mut String) {
		match &self.inner.kind {
			NodeKind::Text(content) => out.push_str(&escape_text(&content.borrow())),
			NodeKind::Element {
				tag, attributes, ..
			} => {
				out.push('<');
				out.push_str(tag);
				for (name, value) in attributes.borrow().iter() {
					out.push(' ');
					out.push_str(name);
					out.push_str("=\"");
					out.push_str(&escape_attribute(value));
					out.push('"');
				}
				out.push('>');
				if VOID_ELEMENTS.contains(&tag.as_str()) {
					return;
				}
				for child in self.children() {
					child.write_html(out);
				}
				out.push_str("</");
				out.push_str(tag);
				out.push('>');
			}
		}
	}
}

fn escape_text(text: &str) -> String {
	text.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
	escape_text(value).replace('"', "&quot;")
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.inner.kind {
			NodeKind::Element { tag, .. } => f
				.debug_struct("Element")
				.field("tag", tag)
				.field("children", &self.inner.children.borrow().len())
				.finish(),
			NodeKind::Text(content) => f.debug_tuple("Text").field(&content.borrow()).finish(),
		}
	}
}
