//! Template Settings
//!
//! Prefixes and delimiters recognized by the template compiler. Defaults match the
//! conventional syntax: `v-model="key"`, `@click="method"`, `{{ key }}`.
//!
//! Settings can be loaded from TOML; omitted fields keep their defaults.
//!
//! ```
//! use tether_pages::TemplateSettings;
//!
//! let settings = TemplateSettings::from_toml_str(r#"
//!     directive_prefix = "x-"
//!     delimiters = ["[[", "]]"]
//! "#).unwrap();
//!
//! assert_eq!(settings.directive_prefix, "x-");
//! assert_eq!(settings.event_prefix, "@");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PagesError, PagesResult};

/// Template syntax configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
	/// Prefix of directive attributes (`v-`)
	pub directive_prefix: String,
	/// Prefix of event attributes (`@`)
	pub event_prefix: String,
	/// Opening and closing interpolation delimiters
	pub delimiters: (String, String),
}

impl Default for TemplateSettings {
	fn default() -> Self {
		Self {
			directive_prefix: "v-".to_string(),
			event_prefix: "@".to_string(),
			delimiters: ("{{".to_string(), "}}".to_string()),
		}
	}
}

impl TemplateSettings {
	/// Parses and validates settings from a TOML document.
	pub fn from_toml_str(source: &str) -> PagesResult<Self> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Checks that prefixes and delimiters are usable.
	pub fn validate(&self) -> PagesResult<()> {
		if self.directive_prefix.is_empty() || self.event_prefix.is_empty() {
			return Err(PagesError::InvalidSettings(
				"attribute prefixes must not be empty".to_string(),
			));
		}
		if self.directive_prefix.starts_with(&self.event_prefix)
			|| self.event_prefix.starts_with(&self.directive_prefix)
		{
			return Err(PagesError::InvalidSettings(format!(
				"directive prefix '{}' and event prefix '{}' overlap",
				self.directive_prefix, self.event_prefix
			)));
		}
		if self.delimiters.0.is_empty() || self.delimiters.1.is_empty() {
			return Err(PagesError::InvalidSettings(
				"interpolation delimiters must not be empty".to_string(),
			));
		}
		Ok(())
	}

	/// Builds the interpolation pattern; capture group 1 is the expression.
	pub fn interpolation_pattern(&self) -> PagesResult<Regex> {
		let (open, close) = &self.delimiters;
		let pattern = format!("{}(.+?){}", regex::escape(open), regex::escape(close));
		Ok(Regex::new(&pattern)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = TemplateSettings::default();
		assert_eq!(settings.directive_prefix, "v-");
		assert_eq!(settings.event_prefix, "@");
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_empty_document_yields_defaults() {
		assert_eq!(
			TemplateSettings::from_toml_str("").unwrap(),
			TemplateSettings::default()
		);
	}

	#[rstest]
	#[case("directive_prefix = \"\"")]
	#[case("event_prefix = \"v-\"")]
	#[case("directive_prefix = \"on\"\nevent_prefix = \"o\"")]
	#[case("delimiters = [\"\", \"}}\"]")]
	fn test_invalid_settings_are_rejected(#[case] source: &str) {
		assert!(matches!(
			TemplateSettings::from_toml_str(source),
			Err(PagesError::InvalidSettings(_))
		));
	}

	#[rstest]
	fn test_malformed_toml_is_a_parse_error() {
		assert!(matches!(
			TemplateSettings::from_toml_str("delimiters = 3"),
			Err(PagesError::SettingsParse(_))
		));
	}

	#[rstest]
	fn test_pattern_escapes_delimiters() {
		let settings = TemplateSettings {
			delimiters: ("[[".to_string(), "]]".to_string()),
			..TemplateSettings::default()
		};
		let pattern = settings.interpolation_pattern().unwrap();
		let caps = pattern.captures("a [[ name ]] b").unwrap();
		assert_eq!(&caps[1], " name ");
		assert!(!pattern.is_match("{{ name }}"));
	}
}
