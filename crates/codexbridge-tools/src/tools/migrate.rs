//! migrate_code — move code between language/framework versions

use crate::registry::{model_arg, optional_str, required_str, CodeTool};
use codexbridge_core::{CompletionRequest, Result};
use serde_json::{json, Value};

pub struct MigrateCodeTool;

impl CodeTool for MigrateCodeTool {
    fn name(&self) -> &'static str {
        "migrate_code"
    }

    fn description(&self) -> &'static str {
        "Migrate code from one language or framework version to another \
         (e.g. Python 2 to Python 3). Returns only the migrated code."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "The code to migrate"
                },
                "from_version": {
                    "type": "string",
                    "description": "Source version (e.g. \"Python 2\")"
                },
                "to_version": {
                    "type": "string",
                    "description": "Target version (e.g. \"Python 3\")"
                },
                "language": {
                    "type": "string",
                    "description": "Language hint when not implied by the versions"
                },
                "model": {
                    "type": "string",
                    "description": "Model override"
                }
            },
            "required": ["code", "from_version", "to_version"]
        })
    }

    fn prepare(&self, args: &Value, default_model: &str) -> Result<CompletionRequest> {
        let code = required_str(args, "code")?;
        let from_version = required_str(args, "from_version")?;
        let to_version = required_str(args, "to_version")?;
        let language = optional_str(args, "language", "source");

        Ok(CompletionRequest::new(self.name(), model_arg(args, default_model))
            .with_param("code", code.trim())
            .with_param("from_version", from_version)
            .with_param("to_version", to_version)
            .with_param("language", language))
    }
}
