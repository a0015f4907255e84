//! Codexbridge Tools — prompt templates and the operation façade
//!
//! Each operation is a self-contained module in src/tools/ implementing
//! the CodeTool trait. To add an operation: write the template under
//! templates/, register it in templates.rs, implement the trait, and add
//! it to create_default_registry() below.

pub mod registry;
pub mod templates;
pub mod tools;

pub use registry::{CodeTool, ToolCallError, ToolRegistry};
pub use templates::{render, template_exists, template_ids};

/// Create the registry with every builtin operation.
pub fn create_default_registry(default_model: impl Into<String>) -> ToolRegistry {
    let mut registry = ToolRegistry::new(default_model);

    registry.register(tools::generate::GenerateCodeTool);
    registry.register(tools::refactor::RefactorCodeTool);
    registry.register(tools::write_tests::WriteTestsTool);
    registry.register(tools::explain::ExplainCodeTool);
    registry.register(tools::explain::ExplainForAudienceTool);
    registry.register(tools::docs::GenerateDocsTool);
    registry.register(tools::docs::GenerateApiDocsTool);
    registry.register(tools::quality::AssessQualityTool);
    registry.register(tools::migrate::MigrateCodeTool);
    registry.register(tools::agent::WriteOpenAiAgentTool);

    registry
}
