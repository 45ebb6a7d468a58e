//! Request DTOs for the component server API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

use crate::render::DEFAULT_LANGUAGE;

/// Query string for GET /api/component/:component_type
///
/// # Fields
/// - `lang`: Language code (en, es, fr, de), defaults to `en`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

impl ComponentQuery {
    /// Requested language, or the default when missing or blank.
    pub fn lang(&self) -> &str {
        self.lang
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}
