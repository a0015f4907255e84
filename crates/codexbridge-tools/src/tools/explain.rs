//! explain_code / explain_code_for_audience — prose explanations

use crate::registry::{model_arg, optional_str, required_str, CodeTool};
use codexbridge_core::{CompletionRequest, Result};
use serde_json::{json, Value};

pub struct ExplainCodeTool;

impl CodeTool for ExplainCodeTool {
    fn name(&self) -> &'static str {
        "explain_code"
    }

    fn description(&self) -> &'static str {
        "Explain what the given code does, at a configurable level of detail."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "The code to explain"
                },
                "detail_level": {
                    "type": "string",
                    "description": "brief, medium, or detailed (default medium)"
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
        let detail_level = optional_str(args, "detail_level", "medium");

        Ok(CompletionRequest::new(self.name(), model_arg(args, default_model))
            .with_param("code", code.trim())
            .with_param("detail_level", detail_level))
    }
}

pub struct ExplainForAudienceTool;

impl CodeTool for ExplainForAudienceTool {
    fn name(&self) -> &'static str {
        "explain_code_for_audience"
    }

    fn description(&self) -> &'static str {
        "Explain the given code for a specific audience (developer, manager, \
         beginner, ...) at a configurable level of detail."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "The code to explain"
                },
                "audience": {
                    "type": "string",
                    "description": "Who the explanation is for (default developer)"
                },
                "detail_level": {
                    "type": "string",
                    "description": "brief, medium, or detailed (default medium)"
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
        let audience = optional_str(args, "audience", "developer");
        let detail_level = optional_str(args, "detail_level", "medium");

        Ok(CompletionRequest::new(self.name(), model_arg(args, default_model))
            .with_param("code", code.trim())
            .with_param("audience", audience)
            .with_param("detail_level", detail_level))
    }
}
