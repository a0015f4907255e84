//! assess_code_quality — structured review of a piece of code

use crate::registry::{model_arg, optional_str, required_str, CodeTool};
use codexbridge_core::{CompletionRequest, Result};
use serde_json::{json, Value};

pub struct AssessQualityTool;

impl CodeTool for AssessQualityTool {
    fn name(&self) -> &'static str {
        "assess_code_quality"
    }

    fn description(&self) -> &'static str {
        "Review the given code for correctness, readability, error handling, \
         and maintainability, optionally weighted toward given focus areas."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "The code to review"
                },
                "focus_areas": {
                    "type": "string",
                    "description": "Comma-separated aspects to emphasize"
                },
                "model": {
                    "type": "string",
                    "description": "Model override"
                }
            },
            "required": ["code"]
        })
    }

    fn prepare(&self, args: &Value, default_model: &str) -> Result<CompletionRequest> {
        let code = required_str(args, "code")?;
        let focus_areas = optional_str(args, "focus_areas", "general");

        Ok(CompletionRequest::new(self.name(), model_arg(args, default_model))
            .with_param("code", code.trim())
            .with_param("focus_areas", focus_areas))
    }
}
