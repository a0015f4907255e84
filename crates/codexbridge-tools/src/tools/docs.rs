//! generate_docs / generate_api_docs — documentation from code

use crate::registry::{model_arg, optional_str, required_str, CodeTool};
use codexbridge_core::{CompletionRequest, Result};
use serde_json::{json, Value};

pub struct GenerateDocsTool;

impl CodeTool for GenerateDocsTool {
    fn name(&self) -> &'static str {
        "generate_docs"
    }

    fn description(&self) -> &'static str {
        "Generate documentation (docstrings, markdown, ...) for the given \
         code. Returns only the documentation."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "The code to document"
                },
                "doc_format": {
                    "type": "string",
                    "description": "docstring, markdown, or html (default docstring)"
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
        let doc_format = optional_str(args, "doc_format", "docstring");

        Ok(CompletionRequest::new(self.name(), model_arg(args, default_model))
            .with_param("code", code.trim())
            .with_param("doc_format", doc_format))
    }
}

pub struct GenerateApiDocsTool;

impl CodeTool for GenerateApiDocsTool {
    fn name(&self) -> &'static str {
        "generate_api_docs"
    }

    fn description(&self) -> &'static str {
        "Generate API documentation (OpenAPI, markdown, or client snippets) \
         for code implementing HTTP endpoints."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "The API implementation"
                },
                "framework": {
                    "type": "string",
                    "description": "Web framework hint (e.g. FastAPI, axum)"
                },
                "output_format": {
                    "type": "string",
                    "description": "openapi, markdown, or code (default openapi)"
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
        let framework = optional_str(args, "framework", "unspecified");
        let output_format = optional_str(args, "output_format", "openapi");

        Ok(CompletionRequest::new(self.name(), model_arg(args, default_model))
            .with_param("code", code.trim())
            .with_param("framework", framework)
            .with_param("output_format", output_format))
    }
}
