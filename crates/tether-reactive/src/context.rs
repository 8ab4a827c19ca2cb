//! Dependency Discovery Context
//!
//! The context holds the *active subscriber*: the one subscriber currently performing
//! its dependency-discovery read. Tracked reads ([`ReactiveObject::get`]) consult it and
//! register the active subscriber with the property they read.
//!
//! A context is passed explicitly to every tracked read instead of living in a global.
//! Each instance owns one. The slot is acquired through [`DependencyContext::enter`] and
//! released when the returned [`DiscoveryScope`] drops, so at most one subscriber is
//! active at a time and the slot is cleared even if the read unwinds.
//!
//! [`ReactiveObject::get`]: crate::ReactiveObject::get

use core::cell::RefCell;
use std::rc::Rc;

use crate::dep::Subscriber;

/// Shared handle to an active-subscriber slot.
///
/// Clones refer to the same slot.
#[derive(Clone, Default)]
pub struct DependencyContext {
	active: Rc<RefCell<Option<Rc<dyn Subscriber>>>>,
}

impl DependencyContext {
	/// Creates a context with an empty slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the subscriber currently discovering its dependencies, if any.
	pub fn active(&self) -> Option<Rc<dyn Subscriber>> {
		self.active.borrow().clone()
	}

	/// Returns `true` while a discovery scope is open.
	pub fn is_tracking(&self) -> bool {
		self.active.borrow().is_some()
	}

	/// Marks `subscriber` active until the returned scope is dropped.
	///
	/// Discovery is not re-entrant: opening a scope while another one is open corrupts
	/// dependency attribution and is rejected in debug builds.
	pub fn enter(&self, subscriber: Rc<dyn Subscriber>) -> DiscoveryScope<'_> {
		let previous = self.active.borrow_mut().replace(subscriber);
		debug_assert!(
			previous.is_none(),
			"dependency discovery entered while another subscriber is active"
		);
		DiscoveryScope { cx: self, previous }
	}
}

impl core::fmt::Debug for DependencyContext {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("DependencyContext")
			.field("tracking", &self.is_tracking())
			.finish()
	}
}

/// RAII guard releasing the active-subscriber slot.
pub struct DiscoveryScope<'a> {
	cx: &'a DependencyContext,
	previous: Option<Rc<dyn Subscriber>>,
}

impl Drop for DiscoveryScope<'_> {
	fn drop(&mut self) {
		*self.cx.active.borrow_mut() = self.previous.take();
	}
}
