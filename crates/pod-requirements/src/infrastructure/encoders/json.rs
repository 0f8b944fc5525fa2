use api_types::PodRequirementsReport;
use error_stack::Report;
use error_stack::ResultExt;

use super::EncodeError;
use super::OutputFormat;
use super::ReportEncoder;

/// JSON encoder for the report
pub struct JsonEncoder;

impl JsonEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl ReportEncoder for JsonEncoder {
    fn encode(&self, report: &PodRequirementsReport) -> Result<String, Report<EncodeError>> {
        serde_json::to_string(report).change_context(EncodeError {
            format: OutputFormat::Json,
        })
    }
}
