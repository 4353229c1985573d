use super::orchestrator::DocumentGenerator;
use crate::error::PipelineError;
use shotdoc_layout::LayoutConfig;
use std::fs;
use std::io;
use std::path::Path;

/// A builder for creating a [`DocumentGenerator`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
    config: LayoutConfig,
}

impl GeneratorBuilder {
    /// Creates a builder with the default A4 layout.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the layout configuration.
    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the layout configuration from a JSON file. Missing fields keep their defaults.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read layout config from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.config = serde_json::from_str(&source)?;
        Ok(self)
    }

    /// Validates the configuration and creates the generator.
    pub fn build(self) -> Result<DocumentGenerator, PipelineError> {
        DocumentGenerator::new(self.config)
    }
}
