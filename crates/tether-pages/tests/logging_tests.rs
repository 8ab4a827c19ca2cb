//! Logging Tests
//!
//! Checks the debug events emitted for template problems that are otherwise silent.

use std::sync::{Arc, Mutex};

use rstest::rstest;
use serde_json::json;
use tether_pages::builder::html::{button, div, span};
use tether_pages::dom::Document;
use tether_pages::{Instance, Options};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// A tracing layer that captures log messages to a Vec<String>
struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);

		self.logs
			.lock()
			.unwrap()
			.push(format!("[{}] {}", event.metadata().level(), visitor.message));
	}
}

#[rstest]
fn test_silent_template_problems_are_logged() {
	// Arrange
	let logs = Arc::new(Mutex::new(Vec::new()));
	let capture = LogCapture { logs: logs.clone() };
	let _guard = tracing_subscriber::registry().with(capture).set_default();

	let template = div()
		.id("app")
		.child(span().attr("v-bogus", "x").build())
		.child(button().attr("@click", "missing").build())
		.build();
	let document = Document::new(template);

	// Act
	let _vm = Instance::new(&document, Options::new().el("#app").data(json!({ "x": 1 })))
		.unwrap();

	// Assert
	let captured = logs.lock().unwrap();
	assert!(captured.contains(&"[DEBUG] unknown directive ignored".to_string()));
	assert!(captured.contains(&"[DEBUG] event bound to undefined method".to_string()));
	assert!(captured.contains(&"[DEBUG] instance created".to_string()));
}
