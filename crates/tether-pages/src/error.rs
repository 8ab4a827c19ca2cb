//! Error types for tether-pages.
//!
//! Template problems never produce errors: unknown directives and undeclared keys
//! degrade to literal content. Errors come from construction, from the instance API,
//! and from event listeners that were bound to a method which does not exist.

use thiserror::Error;

/// Result type for instance and settings operations
pub type PagesResult<T> = Result<T, PagesError>;

/// Errors raised while building or using an instance.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PagesError {
	/// The mount selector matched nothing
	#[error("no element matches selector '{0}'")]
	ElementNotFound(String),

	/// No mount element was configured
	#[error("no mount element configured")]
	MissingElement,

	/// Write to a key that was not part of the initial data
	#[error("'{0}' is not a declared data key")]
	UndeclaredKey(String),

	/// Settings failed validation
	#[error("invalid template settings: {0}")]
	InvalidSettings(String),

	/// Settings file could not be parsed
	#[error("failed to parse template settings: {0}")]
	SettingsParse(#[from] toml::de::Error),

	/// The interpolation pattern built from the delimiters did not compile
	#[error("invalid interpolation pattern: {0}")]
	Pattern(#[from] regex::Error),
}

/// Errors returned to whoever dispatched an event.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
	/// An event attribute named a method that is not defined
	#[error("method '{method}' bound to '{event}' is not defined")]
	MethodNotFound {
		/// The method named by the attribute.
		method: String,
		/// The event the method was bound to.
		event: String,
	},
}
