use api_types::PodRequirementsReport;
use error_stack::Report;
use thiserror::Error;

pub mod json;
pub mod yaml;

/// Output formats understood by [`create_encoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Single-line JSON, the shape `{"Items":[{"Pod":..., "Requirements":...}]}`
    #[default]
    Json,
    /// The same document as YAML
    Yaml,
}

#[derive(Debug, Error)]
#[error("Failed to encode report as {format:?}")]
pub struct EncodeError {
    pub format: OutputFormat,
}

/// Trait for encoding the report into different formats
pub trait ReportEncoder: Send + Sync {
    /// Encode the whole report as one document
    ///
    /// # Errors
    ///
    /// - [`EncodeError`] if the serializer rejects the report
    fn encode(&self, report: &PodRequirementsReport) -> Result<String, Report<EncodeError>>;
}

/// Factory function to create encoders based on output format
pub fn create_encoder(format: OutputFormat) -> Box<dyn ReportEncoder> {
    match format {
        OutputFormat::Json => Box::new(json::JsonEncoder::new()),
        OutputFormat::Yaml => Box::new(yaml::YamlEncoder::new()),
    }
}
