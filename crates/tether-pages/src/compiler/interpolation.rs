//! Text interpolation.
//!
//! The text of a bound node is kept as a tree of pieces. Literal pieces are plain text;
//! each delimiter match naming a declared key becomes a slot owned by one watcher, which
//! replaces the slot's content with the rendered value and writes the joined text back
//! to the node.
//!
//! Every compile pass re-scans the literal pieces, rendered values included, so a value
//! that renders as `{{ other }}` is bound on the next pass. Text that is already bound is
//! never scanned twice.

use core::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::dom::Node;
use crate::instance::Instance;

enum Piece {
	Text(String),
	Slot(Rc<Slot>),
}

/// A run of pieces: the whole node text, or the rendered value of one binding.
#[derive(Default)]
struct Slot {
	pieces: RefCell<Vec<Piece>>,
}

impl Slot {
	fn literal(text: String) -> Self {
		Self {
			pieces: RefCell::new(vec![Piece::Text(text)]),
		}
	}

	fn render(&self, out: &mut String) {
		for piece in self.pieces.borrow().iter() {
			match piece {
				Piece::Text(text) => out.push_str(text),
				Piece::Slot(slot) => slot.render(out),
			}
		}
	}

	fn rendered(&self) -> String {
		let mut out = String::new();
		self.render(&mut out);
		out
	}
}

pub(super) fn compile_text(instance: &Instance, node: &Node) {
	let (root, known) = match node.compiled::<Slot>() {
		Some(root) => (root, true),
		None => {
			let text = node.text_content();
			if !instance.pattern().is_match(&text) {
				return;
			}
			(Rc::new(Slot::literal(text)), false)
		}
	};

	if !bind_slot(instance, node, &root, &root) {
		return;
	}
	if !known {
		node.set_compiled(root.clone());
	}
	node.set_text_content(&root.rendered());
}

/// Binds every unbound match below `slot`; returns `true` if anything was bound.
fn bind_slot(instance: &Instance, node: &Node, root: &Rc<Slot>, slot: &Rc<Slot>) -> bool {
	let pieces = core::mem::take(&mut *slot.pieces.borrow_mut());
	let mut bound = false;
	let mut out = Vec::with_capacity(pieces.len());
	for piece in pieces {
		match piece {
			Piece::Slot(child) => {
				bound |= bind_slot(instance, node, root, &child);
				out.push(Piece::Slot(child));
			}
			Piece::Text(text) => bound |= split_text(instance, node, root, &text, &mut out),
		}
	}
	*slot.pieces.borrow_mut() = out;
	bound
}

fn split_text(
	instance: &Instance,
	node: &Node,
	root: &Rc<Slot>,
	text: &str,
	out: &mut Vec<Piece>,
) -> bool {
	let mut last = 0;
	for captures in instance.pattern().captures_iter(text) {
		let (Some(whole), Some(expression)) = (captures.get(0), captures.get(1)) else {
			continue;
		};
		let key = expression.as_str().trim();
		if !instance.has_key(key) {
			continue;
		}
		if whole.start() > last {
			out.push(Piece::Text(text[last..whole.start()].to_string()));
		}
		out.push(Piece::Slot(bind_key(instance, node, root, key, whole.as_str())));
		last = whole.end();
	}
	if last == 0 {
		out.push(Piece::Text(text.to_string()));
		return false;
	}
	if last < text.len() {
		out.push(Piece::Text(text[last..].to_string()));
	}
	true
}

fn bind_key(instance: &Instance, node: &Node, root: &Rc<Slot>, key: &str, source: &str) -> Rc<Slot> {
	let slot = Rc::new(Slot::default());

	let own = slot.clone();
	let whole = root.clone();
	let target = node.downgrade();
	let watcher = instance.watch(key, move |value| {
		*own.pieces.borrow_mut() = vec![Piece::Text(value.to_string())];
		if let Some(target) = target.upgrade() {
			target.set_text_content(&whole.rendered());
		}
	});

	let initial = watcher
		.old_value()
		.map_or_else(|| source.to_string(), |value| value.to_string());
	*slot.pieces.borrow_mut() = vec![Piece::Text(initial)];
	trace!(key, "interpolation bound");
	node.retain_binding(watcher);
	slot
}
