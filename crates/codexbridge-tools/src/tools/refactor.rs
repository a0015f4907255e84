//! refactor_code — rework existing code per an instruction

use crate::registry::{model_arg, required_str, CodeTool};
use codexbridge_core::{CompletionRequest, Result};
use serde_json::{json, Value};

pub struct RefactorCodeTool;

impl CodeTool for RefactorCodeTool {
    fn name(&self) -> &'static str {
        "refactor_code"
    }

    fn description(&self) -> &'static str {
        "Refactor the given code according to an instruction. Returns only \
         the refactored code."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "The code to refactor"
                },
                "instruction": {
                    "type": "string",
                    "description": "How the code should change"
                },
                "model": {
                    "type": "string",
                    "description": "Model override"
                }
            },
            "required": ["code", "instruction"]
        })
    }

    fn prepare(&self, args: &Value, default_model: &str) -> Result<CompletionRequest> {
        let code = required_str(args, "code")?;
        let instruction = required_str(args, "instruction")?;

        Ok(CompletionRequest::new(self.name(), model_arg(args, default_model))
            .with_param("code", code.trim())
            .with_param("instruction", instruction.trim()))
    }
}
