//! Template Compiler
//!
//! Walks a bound subtree depth-first and creates the live bindings:
//!
//! - **Element nodes**: each attribute is classified by prefix. Directive attributes
//!   (`v-<name>="key"`) dispatch to the updater registered for `<name>` in the
//!   instance's [`DirectiveTable`]; event attributes (`@<event>="method"`) bind an
//!   instance method as a listener.
//! - **Text nodes**: every `{{ key }}` naming a declared key gets a [`Watcher`] that
//!   rewrites its own segment of the text.
//!
//! Every watcher update re-runs a full pass over the bound root. Repeated passes refresh
//! directive values and bind any interpolation that appeared in rendered text, but attach
//! each listener only once per node and attribute.
//!
//! [`Watcher`]: tether_reactive::Watcher

pub mod directives;
mod events;
mod interpolation;

pub use directives::{DirectiveTable, Updater, model_updater};

use tracing::debug;

use crate::dom::{Node, NodeType};
use crate::instance::Instance;

/// A single compile pass over a subtree.
pub struct Compiler<'a> {
	instance: &'a Instance,
}

impl<'a> Compiler<'a> {
	/// Creates a compiler that binds against `instance`.
	pub fn new(instance: &'a Instance) -> Self {
		Self { instance }
	}

	/// Compiles `root` and everything below it.
	pub fn compile(&self, root: &Node) {
		debug!(root = ?root, "compile pass");
		self.compile_node(root);
	}

	fn compile_node(&self, node: &Node) {
		match node.node_type() {
			NodeType::Element => self.compile_element(node),
			NodeType::Text => interpolation::compile_text(self.instance, node),
		}
		if node.has_children() {
			for child in node.children() {
				self.compile_node(&child);
			}
		}
	}

	fn compile_element(&self, node: &Node) {
		let settings = self.instance.settings();
		for (name, value) in node.attributes() {
			if let Some(directive) = name.strip_prefix(settings.directive_prefix.as_str()) {
				directives::apply(self.instance, node, directive, &value);
			} else if let Some(event) = name.strip_prefix(settings.event_prefix.as_str()) {
				events::bind(self.instance, node, &name, event, &value);
			}
		}
	}
}
