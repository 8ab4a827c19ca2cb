//! HTML Builder API
//!
//! A fluent API for constructing template trees in the in-memory DOM.
//!
//! ## Example
//!
//! ```
//! use tether_pages::builder::html::{div, input, p};
//!
//! let app = div()
//!     .id("app")
//!     .child(p().text("Count: {{ count }}").build())
//!     .child(input().attr("v-model", "count").build())
//!     .build();
//!
//! assert_eq!(app.children().len(), 2);
//! ```

pub mod html;

pub use html::*;
