//! Declarative view binding
//!
//! This module provides access to tether-pages: the in-memory DOM, the template
//! compiler and the instance facade.
//!
//! ## Template syntax
//!
//! - `{{ key }}` in text content
//! - `v-model="key"` on form controls
//! - `@event="method"` on any element
//!
//! ## Example
//!
//! ```
//! use tether::pages::builder::html::{div, span};
//! use tether::pages::dom::Document;
//! use tether::pages::{Instance, Options};
//!
//! let document = Document::new(div().id("app").child(span().text("{{ a }}").build()).build());
//! let vm = Instance::new(
//!     &document,
//!     Options::new().el("#app").data(serde_json::json!({ "a": "ok" })),
//! )
//! .unwrap();
//! assert_eq!(vm.el().text_content(), "ok");
//! ```

// Re-export all tether-pages functionality
pub use tether_pages::*;
