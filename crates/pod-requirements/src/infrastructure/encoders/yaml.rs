use api_types::PodRequirementsReport;
use error_stack::Report;
use error_stack::ResultExt;

use super::EncodeError;
use super::OutputFormat;
use super::ReportEncoder;

/// YAML encoder for the report
pub struct YamlEncoder;

impl YamlEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl ReportEncoder for YamlEncoder {
    fn encode(&self, report: &PodRequirementsReport) -> Result<String, Report<EncodeError>> {
        serde_yaml::to_string(report).change_context(EncodeError {
            format: OutputFormat::Yaml,
        })
    }
}
