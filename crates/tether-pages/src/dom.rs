//! In-memory DOM
//!
//! A small, single-threaded document model that the template compiler binds to:
//! element and text nodes, ordered attributes, a form-control `value`, event listeners
//! with bubbling, and HTML serialization for inspection.
//!
//! [`Node`] is a shared handle (`Rc`); clones refer to the same node. Children are
//! owned by their parent, parents are referenced weakly.

mod document;
mod event;
mod node;

pub use document::{Document, Selector};
pub use event::{Event, EventHandler};
pub use node::{Node, NodeType, WeakNode};
