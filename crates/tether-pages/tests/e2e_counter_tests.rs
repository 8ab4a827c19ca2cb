//! End-to-end counter scenario
//!
//! A counter page with a text readout, an editable field and two buttons, driven the
//! way a user would drive it.

use rstest::{fixture, rstest};
use serde_json::json;
use tether_pages::builder::html::{button, div, h1, input, p};
use tether_pages::dom::{Document, Node};
use tether_pages::{Instance, Options};
use tether_reactive::Value;

struct Counter {
	vm: Instance,
	readout: Node,
	field: Node,
	increment: Node,
	reset: Node,
}

fn step(vm: &Instance, delta: f64) {
	let current = vm.peek("count").and_then(|v| v.as_f64()).unwrap_or(0.0);
	vm.set("count", current + delta).unwrap();
}

#[fixture]
fn counter() -> Counter {
	let template = div()
		.id("counter")
		.child(h1().text("{{ title }}").build())
		.child(p().id("readout").text("Count: {{ count }}").build())
		.child(input().id("field").attr("v-model", "count").build())
		.child(button().id("inc").attr("@click", "increment").text("+1").build())
		.child(button().id("reset").attr("@click", "reset").text("reset").build())
		.build();
	let document = Document::new(div().child(template).build());

	let vm = Instance::new(
		&document,
		Options::new()
			.el("#counter")
			.data(json!({ "title": "Counter", "count": 0 }))
			.method("increment", |vm, _| step(vm, 1.0))
			.method("reset", |vm, _| {
				vm.set("count", 0).unwrap();
			}),
	)
	.unwrap();

	Counter {
		readout: document.get_element_by_id("readout").unwrap(),
		field: document.get_element_by_id("field").unwrap(),
		increment: document.get_element_by_id("inc").unwrap(),
		reset: document.get_element_by_id("reset").unwrap(),
		vm,
	}
}

#[rstest]
fn test_initial_render(counter: Counter) {
	assert_eq!(counter.vm.el().children()[0].text_content(), "Counter");
	assert_eq!(counter.readout.text_content(), "Count: 0");
	assert_eq!(counter.field.value(), "0");
}

#[rstest]
fn test_clicks_update_text_and_field(counter: Counter) {
	counter.increment.click().unwrap();
	counter.increment.click().unwrap();
	assert_eq!(counter.readout.text_content(), "Count: 2");
	assert_eq!(counter.field.value(), "2");
	assert_eq!(counter.vm.peek("count"), Some(Value::from(2)));
}

#[rstest]
fn test_typed_value_is_kept_verbatim(counter: Counter) {
	counter.increment.click().unwrap();
	counter.field.dispatch_input("9").unwrap();

	assert_eq!(counter.vm.peek("count"), Some(Value::String("9".to_string())));
	assert_eq!(counter.readout.text_content(), "Count: 9");
	assert_eq!(counter.field.value(), "9");
}

#[rstest]
fn test_reset_after_typing(counter: Counter) {
	counter.field.dispatch_input("41").unwrap();
	counter.reset.click().unwrap();
	assert_eq!(counter.readout.text_content(), "Count: 0");
	assert_eq!(counter.field.value(), "0");

	counter.reset.click().unwrap();
	assert_eq!(counter.vm.peek("count"), Some(Value::from(0)));
}

#[rstest]
fn test_title_is_independent(counter: Counter) {
	counter.vm.set("title", "Clicks").unwrap();
	counter.increment.click().unwrap();
	assert_eq!(counter.vm.el().children()[0].text_content(), "Clicks");
	assert_eq!(counter.readout.text_content(), "Count: 1");
}
