//! write_openai_agent — scaffold an OpenAI Agents SDK script

use crate::registry::{model_arg, optional_str, required_str, CodeTool};
use codexbridge_core::{CompletionRequest, Result};
use serde_json::{json, Value};

pub struct WriteOpenAiAgentTool;

impl CodeTool for WriteOpenAiAgentTool {
    fn name(&self) -> &'static str {
        "write_openai_agent"
    }

    fn description(&self) -> &'static str {
        "Write a complete Python script defining an OpenAI Agents SDK agent \
         with the given name, instructions, and tool functions."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Agent name"
                },
                "instructions": {
                    "type": "string",
                    "description": "System instructions for the agent"
                },
                "tool_functions": {
                    "type": "string",
                    "description": "Descriptions of tool functions the agent needs"
                },
                "description": {
                    "type": "string",
                    "description": "Additional context"
                },
                "model": {
                    "type": "string",
                    "description": "Model override"
                }
            },
            "required": ["name", "instructions"]
        })
    }

    fn prepare(&self, args: &Value, default_model: &str) -> Result<CompletionRequest> {
        let name = required_str(args, "name")?;
        let instructions = required_str(args, "instructions")?;
        let tool_functions = optional_str(args, "tool_functions", "none");
        let description = optional_str(args, "description", "");

        Ok(CompletionRequest::new(self.name(), model_arg(args, default_model))
            .with_param("name", name)
            .with_param("instructions", instructions)
            .with_param("tool_functions", tool_functions)
            .with_param("description", description))
    }
}
