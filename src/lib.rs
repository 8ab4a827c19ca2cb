//! # Tether
//!
//! A minimal reactive view-binding engine.
//!
//! Tether keeps a DOM subtree in sync with a plain data object. Every property of the
//! data is converted into a reactive property with its own dependency registry; text
//! interpolations and form bindings subscribe to exactly the properties they read, so
//! a write updates only what depends on it, synchronously, without diffing.
//!
//! ## Crates
//!
//! - [`reactive`] (`tether-reactive`): values, reactive conversion, dependency
//!   registries and watchers
//! - [`pages`] (`tether-pages`): in-memory DOM, HTML builder, template compiler and
//!   the [`Instance`] facade
//!
//! ## Quick Example
//!
//! ```
//! use tether::prelude::*;
//!
//! let root = div()
//!     .id("app")
//!     .child(p().text("Hello {{ name }}").build())
//!     .child(input().attr("v-model", "name").build())
//!     .build();
//! let document = Document::new(root);
//!
//! let vm = Instance::new(
//!     &document,
//!     Options::new()
//!         .el("#app")
//!         .data(serde_json::json!({ "name": "world" })),
//! )
//! .unwrap();
//!
//! let children = vm.el().children();
//! children[1].dispatch_input("Tether").unwrap();
//! assert_eq!(children[0].text_content(), "Hello Tether");
//! assert_eq!(vm.peek("name"), Some(Value::from("Tether")));
//! ```

pub mod pages;
pub mod reactive;

pub use tether_pages::{
	EventError, Instance, Method, Mount, Options, PagesError, PagesResult, TemplateSettings,
};
pub use tether_reactive::{DependencyContext, ReactiveObject, Value, Watcher};

/// Commonly used types and builder functions
pub mod prelude {
	pub use tether_pages::builder::html::*;
	pub use tether_pages::dom::{Document, Event, Node};
	pub use tether_pages::{
		DirectiveTable, EventError, Instance, Mount, Options, PagesError, PagesResult,
		TemplateSettings,
	};
	pub use tether_reactive::{
		DependencyContext, ReactiveObject, Value, WatchSource, Watcher, observe,
	};
}
