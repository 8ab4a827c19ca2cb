//! Documents and selectors.

use super::node::Node;

/// Simple selector: `#id`, `.class` or a tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
	/// `#id`
	Id(String),
	/// `.class`
	Class(String),
	/// `tag`
	Tag(String),
}

impl Selector {
	/// Parses a selector. Compound and descendant selectors are not supported.
	pub fn parse(selector: &str) -> Option<Self> {
		let selector = selector.trim();
		let valid = |name: &str| {
			!name.is_empty()
				&& name
					.chars()
					.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
		};
		let parsed = if let Some(id) = selector.strip_prefix('#') {
			Selector::Id(id.to_string())
		} else if let Some(class) = selector.strip_prefix('.') {
			Selector::Class(class.to_string())
		} else {
			Selector::Tag(selector.to_ascii_lowercase())
		};
		let name = match &parsed {
			Selector::Id(name) | Selector::Class(name) | Selector::Tag(name) => name,
		};
		valid(name).then_some(parsed)
	}

	/// Returns `true` if `node` is an element matching this selector.
	pub fn matches(&self, node: &Node) -> bool {
		match self {
			Selector::Id(id) => node.get_attribute("id").as_deref() == Some(id),
			Selector::Class(class) => node.has_class(class),
			Selector::Tag(tag) => node.tag_name() == Some(tag.as_str()),
		}
	}
}

/// A document: the tree that mount selectors are resolved against.
#[derive(Debug, Clone)]
pub struct Document {
	root: Node,
}

impl Document {
	/// Creates a document around `root`.
	pub fn new(root: Node) -> Self {
		Self { root }
	}

	/// The document element.
	pub fn root(&self) -> &Node {
		&self.root
	}

	/// First element matching `selector`, the document element included.
	pub fn query_selector(&self, selector: &str) -> Option<Node> {
		let selector = Selector::parse(selector)?;
		self.root.find(&selector)
	}

	/// Element whose `id` attribute equals `id`.
	pub fn get_element_by_id(&self, id: &str) -> Option<Node> {
		self.root.find(&Selector::Id(id.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn document() -> Document {
		let html = Node::element("html");
		let body = Node::element("body");
		let app = Node::element("div");
		app.set_attribute("id", "app");
		app.set_attribute("class", "main wide");
		let span = Node::element("span");
		app.append_child(&span);
		body.append_child(&app);
		html.append_child(&body);
		Document::new(html)
	}

	#[rstest]
	#[case("#app", Some("div"))]
	#[case(".wide", Some("div"))]
	#[case("span", Some("span"))]
	#[case("HTML", Some("html"))]
	#[case("#missing", None)]
	#[case("div span", None)]
	#[case("#", None)]
	fn test_query_selector(#[case] selector: &str, #[case] tag: Option<&str>) {
		let doc = document();
		let found = doc.query_selector(selector);
		assert_eq!(found.as_ref().and_then(Node::tag_name), tag);
	}

	#[rstest]
	fn test_get_element_by_id() {
		let doc = document();
		let app = doc.get_element_by_id("app").unwrap();
		assert!(app.has_class("main"));
	}

	#[rstest]
	fn test_node_query_excludes_itself() {
		let doc = document();
		let app = doc.get_element_by_id("app").unwrap();
		assert!(app.query_selector("#app").is_none());
		assert!(app.query_selector("span").is_some());
	}
}
