//! Render Module
//!
//! Produces localized component artifacts from the built-in template catalog.

mod artifact;
mod catalog;
mod template;

pub use artifact::{ArtifactMetadata, LocalizedData, RenderedArtifact};
pub use catalog::{ComponentTemplate, COMPONENTS, DEFAULT_LANGUAGE, LANGUAGES};
pub use template::{interpolate, TemplateRenderer};

use crate::error::Result;

// == Artifact Renderer ==
/// Stateless producer of rendered artifacts.
pub trait ArtifactRenderer: Send + Sync {
    /// Renders `component_type` localized for `lang`.
    ///
    /// # Errors
    /// - `UnknownComponentType` if `component_type` is not in the catalog
    fn render(&self, component_type: &str, lang: &str) -> Result<RenderedArtifact>;

    /// Component types this renderer knows about.
    fn component_types(&self) -> Vec<String>;
}
