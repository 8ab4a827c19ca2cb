//! Tether Pages - Declarative View Binding
//!
//! Binds a reactive data object to a DOM subtree using three pieces of template syntax:
//!
//! - `{{ key }}` in text: rendered from the data and re-rendered when `key` changes.
//! - `v-model="key"` on a form control: two-way binding between the control's value
//!   and `key`.
//! - `@event="method"` on an element: calls an instance method when `event` fires.
//!
//! ## Architecture
//!
//! - [`dom`]: in-memory document model the templates live in
//! - [`builder`]: fluent construction of template trees
//! - [`compiler`]: walks a subtree and creates bindings
//! - [`instance`]: the facade owning data, methods and the mounted subtree
//! - [`settings`]: template prefixes and delimiters, loadable from TOML
//!
//! Reactivity itself lives in [`tether_reactive`].
//!
//! ## Example
//!
//! ```
//! use tether_pages::builder::html::{button, div, input, p};
//! use tether_pages::dom::Document;
//! use tether_pages::{Instance, Options};
//! use tether_reactive::Value;
//!
//! let root = div()
//!     .id("app")
//!     .child(p().text("Count: {{ count }}").build())
//!     .child(input().attr("v-model", "count").build())
//!     .child(button().attr("@click", "increment").build())
//!     .build();
//! let document = Document::new(root);
//!
//! let vm = Instance::new(
//!     &document,
//!     Options::new()
//!         .el("#app")
//!         .data(serde_json::json!({ "count": 0 }))
//!         .method("increment", |vm, _| {
//!             let next = vm.peek("count").and_then(|v| v.as_f64()).unwrap_or(0.0) + 1.0;
//!             vm.set("count", next).unwrap();
//!         }),
//! )
//! .unwrap();
//!
//! let app = vm.el();
//! app.children()[2].click().unwrap();
//! assert_eq!(app.children()[0].text_content(), "Count: 1");
//! assert_eq!(app.children()[1].value(), "1");
//! ```

pub mod builder;
pub mod compiler;
pub mod dom;
pub mod error;
pub mod instance;
pub mod settings;

pub use compiler::{Compiler, DirectiveTable, Updater, model_updater};
pub use error::{EventError, PagesError, PagesResult};
pub use instance::{Instance, Method, Mount, Options, WeakInstance};
pub use settings::TemplateSettings;
