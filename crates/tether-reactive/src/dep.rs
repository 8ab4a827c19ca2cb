//! Dependency Registry
//!
//! A [`Dep`] belongs to exactly one reactive property and remembers every subscriber
//! that read the property while discovering its dependencies. Writing the property
//! calls [`Dep::notify`], which runs each subscriber's [`Subscriber::update`] in
//! registration order, synchronously.
//!
//! Registration is not de-duplicated: a subscriber that reads the same property twice
//! during one discovery pass is registered twice and updated twice.
//!
//! Subscribers are held weakly. Whoever created a subscriber owns it (for template
//! bindings, the DOM node the binding renders into), and a registry entry whose
//! subscriber is gone is skipped.

use core::cell::RefCell;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::rc::{Rc, Weak};

use tracing::trace;

/// Something that can be notified when a property it depends on changes.
pub trait Subscriber {
	/// Re-evaluates the subscriber after a dependency changed.
	fn update(&self);
}

/// Unique identifier for a dependency registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepId(usize);

impl DepId {
	fn next() -> Self {
		static COUNTER: AtomicUsize = AtomicUsize::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

/// Per-property registry of interested subscribers.
///
/// Cloning a `Dep` yields another handle to the same registry.
#[derive(Clone)]
pub struct Dep {
	id: DepId,
	subs: Rc<RefCell<Vec<Weak<dyn Subscriber>>>>,
}

impl Dep {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			id: DepId::next(),
			subs: Rc::new(RefCell::new(Vec::new())),
		}
	}

	/// Returns the registry identifier.
	pub fn id(&self) -> DepId {
		self.id
	}

	/// Appends a subscriber.
	///
	/// A reference to a subscriber that no longer exists is ignored.
	pub fn add_sub(&self, sub: Weak<dyn Subscriber>) {
		if sub.strong_count() == 0 {
			trace!(dep = ?self.id, "ignoring dead subscriber");
			return;
		}
		let mut subs = self.subs.borrow_mut();
		subs.push(sub);
		trace!(dep = ?self.id, subscribers = subs.len(), "subscriber registered");
	}

	/// Runs [`Subscriber::update`] on every live subscriber, in registration order.
	///
	/// The list is snapshotted first, so subscribers registered while the cascade runs
	/// are not visited by it.
	pub fn notify(&self) {
		let subs = self.subs.borrow().clone();
		trace!(dep = ?self.id, subscribers = subs.len(), "notify");
		for sub in subs {
			if let Some(sub) = sub.upgrade() {
				sub.update();
			}
		}
	}

	/// Number of registrations, duplicates included.
	pub fn len(&self) -> usize {
		self.subs.borrow().len()
	}

	/// Returns `true` when nothing has subscribed.
	pub fn is_empty(&self) -> bool {
		self.subs.borrow().is_empty()
	}
}

impl Default for Dep {
	fn default() -> Self {
		Self::new()
	}
}

impl core::fmt::Debug for Dep {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Dep")
			.field("id", &self.id)
			.field("subscribers", &self.len())
			.finish()
	}
}
