//! Instance Facade
//!
//! An [`Instance`] ties a data object, a set of methods and a mounted DOM subtree
//! together. Construction runs in a fixed order:
//!
//! 1. resolve the mount element,
//! 2. project the top-level data keys onto the instance,
//! 3. convert the data into reactive properties,
//! 4. compile the mounted subtree.
//!
//! ## Example
//!
//! ```
//! use tether_pages::builder::html::{div, p};
//! use tether_pages::dom::Document;
//! use tether_pages::{Instance, Options};
//! use tether_reactive::Value;
//!
//! let root = div().id("app").child(p().text("Hi {{ name }}").build()).build();
//! let document = Document::new(root);
//!
//! let vm = Instance::new(
//!     &document,
//!     Options::new()
//!         .el("#app")
//!         .data(serde_json::json!({ "name": "Ada" })),
//! )
//! .unwrap();
//!
//! vm.set("name", Value::from("Grace")).unwrap();
//! assert_eq!(vm.el().text_content(), "Hi Grace");
//! ```

use core::fmt;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use regex::Regex;
use tether_reactive::{
	DependencyContext, ReactiveObject, Value, WatchSource, Watcher, observe,
};
use tracing::debug;

use crate::compiler::{Compiler, DirectiveTable};
use crate::dom::{Document, Event, Node};
use crate::error::{PagesError, PagesResult};
use crate::settings::TemplateSettings;

/// Instance method bound to event attributes.
pub type Method = Rc<dyn Fn(&Instance, &Event)>;

/// Where an instance mounts.
#[derive(Debug, Clone)]
pub enum Mount {
	/// Selector resolved against the document (`#id`, `.class` or `tag`)
	Selector(String),
	/// An element handle
	Node(Node),
}

impl From<&str> for Mount {
	fn from(selector: &str) -> Self {
		Mount::Selector(selector.to_string())
	}
}

impl From<String> for Mount {
	fn from(selector: String) -> Self {
		Mount::Selector(selector)
	}
}

impl From<Node> for Mount {
	fn from(node: Node) -> Self {
		Mount::Node(node)
	}
}

impl From<&Node> for Mount {
	fn from(node: &Node) -> Self {
		Mount::Node(node.clone())
	}
}

/// Construction options, built fluently.
pub struct Options {
	el: Option<Mount>,
	data: Value,
	methods: HashMap<String, Method>,
	directives: DirectiveTable,
	settings: TemplateSettings,
}

impl Options {
	/// Empty options with the built-in directives and default settings.
	pub fn new() -> Self {
		Self {
			el: None,
			data: Value::Object(ReactiveObject::new()),
			methods: HashMap::new(),
			directives: DirectiveTable::with_defaults(),
			settings: TemplateSettings::default(),
		}
	}

	/// Sets the mount element.
	pub fn el(mut self, el: impl Into<Mount>) -> Self {
		self.el = Some(el.into());
		self
	}

	/// Sets the data. Only an object has its keys projected onto the instance.
	pub fn data(mut self, data: impl Into<Value>) -> Self {
		self.data = data.into();
		self
	}

	/// Adds a method callable from event attributes.
	pub fn method<F>(mut self, name: impl Into<String>, method: F) -> Self
	where
		F: Fn(&Instance, &Event) + 'static,
	{
		self.methods.insert(name.into(), Rc::new(method));
		self
	}

	/// Adds (or replaces) a directive updater.
	pub fn directive<F>(mut self, name: impl Into<String>, updater: F) -> Self
	where
		F: Fn(&Instance, &Node, Option<&Value>, &str) + 'static,
	{
		self.directives.register(name, Rc::new(updater));
		self
	}

	/// Replaces the template settings.
	pub fn settings(mut self, settings: TemplateSettings) -> Self {
		self.settings = settings;
		self
	}
}

impl Default for Options {
	fn default() -> Self {
		Self::new()
	}
}

struct InstanceInner {
	el: Node,
	data: Value,
	raw: Option<ReactiveObject>,
	keys: Vec<String>,
	methods: HashMap<String, Method>,
	directives: DirectiveTable,
	settings: TemplateSettings,
	pattern: Regex,
	cx: DependencyContext,
	source: Rc<InstanceSource>,
}

/// A live view-model bound to a DOM subtree. Clones share the same instance.
#[derive(Clone)]
pub struct Instance {
	inner: Rc<InstanceInner>,
}

/// Weak handle to an [`Instance`].
#[derive(Clone)]
pub struct WeakInstance {
	inner: Weak<InstanceInner>,
}

impl WeakInstance {
	/// Returns the instance if it is still alive.
	pub fn upgrade(&self) -> Option<Instance> {
		self.inner.upgrade().map(|inner| Instance { inner })
	}
}

impl Instance {
	/// Creates an instance and compiles its mounted subtree.
	///
	/// # Errors
	///
	/// - [`PagesError::InvalidSettings`] / [`PagesError::Pattern`] for unusable settings
	/// - [`PagesError::MissingElement`] if no mount was configured
	/// - [`PagesError::ElementNotFound`] if the mount selector matches nothing
	pub fn new(document: &Document, options: Options) -> PagesResult<Self> {
		let Options {
			el,
			data,
			methods,
			directives,
			settings,
		} = options;

		settings.validate()?;
		let pattern = settings.interpolation_pattern()?;

		let el = match el.ok_or(PagesError::MissingElement)? {
			Mount::Node(node) => node,
			Mount::Selector(selector) => document
				.query_selector(&selector)
				.ok_or(PagesError::ElementNotFound(selector))?,
		};

		let raw = data.as_object().cloned();
		let keys = raw.as_ref().map(ReactiveObject::keys).unwrap_or_default();
		observe(&data);

		let inner = Rc::new_cyclic(|weak| InstanceInner {
			el,
			data,
			raw,
			keys,
			methods,
			directives,
			settings,
			pattern,
			cx: DependencyContext::new(),
			source: Rc::new(InstanceSource {
				instance: weak.clone(),
			}),
		});
		let instance = Instance { inner };
		debug!(keys = ?instance.inner.keys, el = ?instance.inner.el, "instance created");

		Compiler::new(&instance).compile(&instance.inner.el);
		Ok(instance)
	}

	/// Reads a declared key, registering the active watcher.
	pub fn get(&self, key: &str) -> Option<Value> {
		if !self.has_key(key) {
			return None;
		}
		self.inner
			.raw
			.as_ref()
			.and_then(|raw| raw.get(key, &self.inner.cx))
	}

	/// Reads a declared key without registering anything.
	pub fn peek(&self, key: &str) -> Option<Value> {
		if !self.has_key(key) {
			return None;
		}
		self.inner.raw.as_ref().and_then(|raw| raw.peek(key))
	}

	/// Writes a declared key. Returns `false` if the value was strictly equal and
	/// nothing was notified.
	///
	/// # Errors
	///
	/// [`PagesError::UndeclaredKey`] if `key` was not part of the initial data.
	pub fn set(&self, key: &str, value: impl Into<Value>) -> PagesResult<bool> {
		let raw = match &self.inner.raw {
			Some(raw) if self.has_key(key) => raw,
			_ => return Err(PagesError::UndeclaredKey(key.to_string())),
		};
		Ok(raw.set(key, value.into()))
	}

	/// Returns `true` if `key` was projected from the initial data.
	pub fn has_key(&self, key: &str) -> bool {
		self.inner.keys.iter().any(|k| k == key)
	}

	/// Projected keys in data order.
	pub fn keys(&self) -> &[String] {
		&self.inner.keys
	}

	/// The mounted element.
	pub fn el(&self) -> &Node {
		&self.inner.el
	}

	/// The data as given, after reactive conversion.
	pub fn data(&self) -> &Value {
		&self.inner.data
	}

	/// Looks up a method.
	pub fn method(&self, name: &str) -> Option<Method> {
		self.inner.methods.get(name).cloned()
	}

	/// Watches `key`; the callback runs with each new value.
	///
	/// The binding lasts as long as the returned watcher is held. Each delivered change
	/// also recompiles the mounted subtree.
	pub fn watch<F>(&self, key: &str, callback: F) -> Rc<Watcher>
	where
		F: Fn(&Value) + 'static,
	{
		let source: Rc<dyn WatchSource> = self.inner.source.clone();
		Watcher::new(source, key, callback, &self.inner.cx)
	}

	/// Template settings in use.
	pub fn settings(&self) -> &TemplateSettings {
		&self.inner.settings
	}

	/// Directive table in use.
	pub fn directives(&self) -> &DirectiveTable {
		&self.inner.directives
	}

	/// Interpolation pattern built from the delimiters.
	pub fn pattern(&self) -> &Regex {
		&self.inner.pattern
	}

	/// The dependency context watchers of this instance register through.
	pub fn context(&self) -> &DependencyContext {
		&self.inner.cx
	}

	/// Creates a weak handle.
	pub fn downgrade(&self) -> WeakInstance {
		WeakInstance {
			inner: Rc::downgrade(&self.inner),
		}
	}

	/// Returns `true` if both handles refer to the same instance.
	pub fn ptr_eq(&self, other: &Instance) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for Instance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Instance")
			.field("el", &self.inner.el)
			.field("keys", &self.inner.keys)
			.field("directives", &self.inner.directives)
			.finish_non_exhaustive()
	}
}

/// Watch source reading through the instance; delivered updates recompile the root.
struct InstanceSource {
	instance: Weak<InstanceInner>,
}

impl InstanceSource {
	fn instance(&self) -> Option<Instance> {
		self.instance.upgrade().map(|inner| Instance { inner })
	}
}

impl WatchSource for InstanceSource {
	fn read(&self, key: &str, cx: &DependencyContext) -> Option<Value> {
		let instance = self.instance()?;
		if !instance.has_key(key) {
			return None;
		}
		instance.inner.raw.as_ref().and_then(|raw| raw.get(key, cx))
	}

	fn peek(&self, key: &str) -> Option<Value> {
		self.instance()?.peek(key)
	}

	fn after_update(&self) {
		if let Some(instance) = self.instance() {
			Compiler::new(&instance).compile(instance.el());
		}
	}
}
