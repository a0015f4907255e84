//! generate_code — source code from a natural-language description

use crate::registry::{model_arg, optional_str, required_str, CodeTool};
use codexbridge_core::{CompletionRequest, Result};
use serde_json::{json, Value};

pub struct GenerateCodeTool;

impl CodeTool for GenerateCodeTool {
    fn name(&self) -> &'static str {
        "generate_code"
    }

    fn description(&self) -> &'static str {
        "Generate source code in a target language from a natural-language \
         description. Returns only the code."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "description": {
                    "type": "string",
                    "description": "What the generated code must do"
                },
                "language": {
                    "type": "string",
                    "description": "Target language (default Python)"
                },
                "model": {
                    "type": "string",
                    "description": "Model override"
                }
            },
            "required": ["description"]
        })
    }

    fn prepare(&self, args: &Value, default_model: &str) -> Result<CompletionRequest> {
        let description = required_str(args, "description")?;
        let language = optional_str(args, "language", "Python");

        Ok(CompletionRequest::new(self.name(), model_arg(args, default_model))
            .with_param("description", description)
            .with_param("language", language))
    }
}
