//! Template Renderer
//!
//! Fills `{l10n.key}` placeholders with localized strings.

use crate::error::{Result, ServiceError};
use crate::render::catalog::{strings_for, ComponentTemplate, COMPONENTS};
use crate::render::{ArtifactMetadata, ArtifactRenderer, LocalizedData, RenderedArtifact};

/// Renderer backed by the built-in component catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactRenderer for TemplateRenderer {
    fn render(&self, component_type: &str, lang: &str) -> Result<RenderedArtifact> {
        let component =
            ComponentTemplate::find(component_type).ok_or_else(|| {
                ServiceError::UnknownComponentType {
                    component_type: component_type.to_string(),
                    available: self.component_types(),
                }
            })?;

        let strings = strings_for(lang);

        // Keys absent from the table render as "[key]"
        let localized_data: LocalizedData = component
            .required_keys
            .iter()
            .map(|key| {
                let value = strings
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.to_string())
                    .unwrap_or_else(|| format!("[{}]", key));
                (key.to_string(), value)
            })
            .collect();

        let template = interpolate(component.template, &localized_data);

        let component_id = format!(
            "{}_{}_{}",
            component_type,
            lang,
            chrono::Utc::now().timestamp_millis().rem_euclid(10_000)
        );

        Ok(RenderedArtifact {
            component_name: component.component_name.to_string(),
            component_type: component.component_type.to_string(),
            language: lang.to_string(),
            template,
            localized_data,
            metadata: ArtifactMetadata {
                component_id,
                last_updated: component.last_updated.to_string(),
                required_keys: component.required_keys.iter().map(|k| k.to_string()).collect(),
            },
        })
    }

    fn component_types(&self) -> Vec<String> {
        COMPONENTS.iter().map(|c| c.kind.to_string()).collect()
    }
}

// == Interpolate ==
/// Replaces each `{l10n.key}` in `template` with the quoted localized value.
///
/// Placeholders without a matching key are left untouched.
pub fn interpolate(template: &str, localized_data: &LocalizedData) -> String {
    localized_data
        .iter()
        .fold(template.to_string(), |rendered, (key, value)| {
            rendered.replace(&format!("{{l10n.{}}}", key), &format!("\"{}\"", value))
        })
}
