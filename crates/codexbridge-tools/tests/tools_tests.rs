//! Tests for codexbridge-tools: template rendering, per-tool request mapping,
//! and the full façade → dispatcher path against a scripted backend

use codexbridge_core::{BackendOptions, Error};
use codexbridge_llm::{
    CacheConfig, CancellationToken, CompletionBackend, Dispatcher, ResponseCache, RetryPolicy,
};
use codexbridge_tools::{create_default_registry, render, template_exists, template_ids};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Backend that records the prompt it was handed and answers from a script.
struct RecordingBackend {
    reply: Result<String, ()>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingBackend {
    fn ok(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionBackend for RecordingBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn complete(
        &self,
        prompt: &str,
        _model: &str,
        _options: &BackendOptions,
        _cancel: Option<CancellationToken>,
    ) -> Result<String, Error> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(()) => Err(Error::InvalidResponse("scripted failure".to_string())),
        }
    }
}

fn dispatcher(backend: Arc<dyn CompletionBackend>) -> Dispatcher {
    Dispatcher::new(
        backend,
        ResponseCache::new(CacheConfig::default()),
        RetryPolicy::default(),
        Duration::from_secs(2),
    )
}

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ===========================================================================
// Template rendering
// ===========================================================================

#[test]
fn every_builtin_tool_has_a_template() {
    let registry = create_default_registry("o4-mini");
    for name in registry.list() {
        assert!(template_exists(name), "no template for tool {}", name);
    }
    assert_eq!(template_ids().len(), 10);
}

#[test]
fn render_substitutes_placeholders() {
    let rendered = render(
        "generate_code",
        &params(&[("description", "reverse a string"), ("language", "Go")]),
    )
    .unwrap();
    assert!(rendered.contains("Generate Go code"));
    assert!(rendered.contains("reverse a string"));
    assert!(!rendered.contains('{'));
}

#[test]
fn render_missing_placeholder_names_it() {
    let err = render("generate_code", &params(&[("language", "Go")])).unwrap_err();
    match err {
        Error::MissingParameter { template, names } => {
            assert_eq!(template, "generate_code");
            assert_eq!(names, vec!["description".to_string()]);
        }
        other => panic!("expected MissingParameter, got {:?}", other),
    }
}

#[test]
fn render_collects_all_missing_placeholders() {
    let err = render("migrate_code", &params(&[("code", "x")])).unwrap_err();
    match err {
        Error::MissingParameter { names, .. } => {
            assert_eq!(
                names,
                vec![
                    "from_version".to_string(),
                    "language".to_string(),
                    "to_version".to_string()
                ]
            );
        }
        other => panic!("expected MissingParameter, got {:?}", other),
    }
}

#[test]
fn render_unknown_template() {
    let err = render("no_such_template", &BTreeMap::new()).unwrap_err();
    assert_eq!(err.kind(), "unknown_template");
}

#[test]
fn render_ignores_extra_parameters() {
    let rendered = render(
        "explain_code",
        &params(&[
            ("code", "fn main() {}"),
            ("detail_level", "brief"),
            ("unused", "whatever"),
        ]),
    )
    .unwrap();
    assert!(rendered.contains("fn main() {}"));
    assert!(rendered.contains("brief"));
}

// ===========================================================================
// Registry and tool definitions
// ===========================================================================

#[test]
fn registry_lists_all_operations() {
    let registry = create_default_registry("o4-mini");
    assert_eq!(
        registry.list(),
        vec![
            "assess_code_quality",
            "explain_code",
            "explain_code_for_audience",
            "generate_api_docs",
            "generate_code",
            "generate_docs",
            "migrate_code",
            "refactor_code",
            "write_openai_agent",
            "write_tests",
        ]
    );
}

#[test]
fn definitions_carry_schema_and_description() {
    let registry = create_default_registry("o4-mini");
    let defs = registry.definitions();
    assert_eq!(defs.len(), 10);
    for def in &defs {
        assert!(def["name"].is_string());
        assert!(!def["description"].as_str().unwrap().is_empty());
        assert_eq!(def["inputSchema"]["type"], "object");
        assert!(def["inputSchema"]["properties"]["model"].is_object());
    }
}

// ===========================================================================
// Per-tool request mapping
// ===========================================================================

fn prepare(tool: &str, args: Value) -> codexbridge_core::CompletionRequest {
    let registry = create_default_registry("o4-mini");
    registry
        .get(tool)
        .unwrap()
        .prepare(&args, registry.default_model())
        .unwrap()
}

#[test]
fn generate_code_defaults() {
    let req = prepare("generate_code", json!({"description": "sort a list"}));
    assert_eq!(req.template_id, "generate_code");
    assert_eq!(req.model, "o4-mini");
    assert_eq!(req.params["description"], "sort a list");
    assert_eq!(req.params["language"], "Python");
}

#[test]
fn model_override_is_honored() {
    let req = prepare(
        "generate_code",
        json!({"description": "sort a list", "model": "gpt-4o"}),
    );
    assert_eq!(req.model, "gpt-4o");
}

#[test]
fn refactor_code_requires_instruction() {
    let registry = create_default_registry("o4-mini");
    let err = registry
        .get("refactor_code")
        .unwrap()
        .prepare(&json!({"code": "x = 1"}), "o4-mini")
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_argument");
    assert!(err.to_string().contains("instruction"));
}

#[test]
fn write_tests_context_defaults_to_empty() {
    let req = prepare("write_tests", json!({"code": "def f(): pass"}));
    assert_eq!(req.params["description"], "");
}

#[test]
fn explain_for_audience_defaults() {
    let req = prepare("explain_code_for_audience", json!({"code": "x = 1"}));
    assert_eq!(req.params["audience"], "developer");
    assert_eq!(req.params["detail_level"], "medium");
}

#[test]
fn migrate_code_mapping() {
    let req = prepare(
        "migrate_code",
        json!({
            "code": "print 'hi'",
            "from_version": "Python 2",
            "to_version": "Python 3"
        }),
    );
    assert_eq!(req.params["from_version"], "Python 2");
    assert_eq!(req.params["to_version"], "Python 3");
    assert_eq!(req.params["language"], "source");
}

#[test]
fn openai_agent_mapping() {
    let req = prepare(
        "write_openai_agent",
        json!({"name": "helper", "instructions": "be useful"}),
    );
    assert_eq!(req.params["name"], "helper");
    assert_eq!(req.params["tool_functions"], "none");
}

#[test]
fn prepared_requests_render_cleanly() {
    // Every tool's prepared request must satisfy its template's placeholders.
    let registry = create_default_registry("o4-mini");
    let args: Vec<(&str, Value)> = vec![
        ("generate_code", json!({"description": "d"})),
        ("refactor_code", json!({"code": "c", "instruction": "i"})),
        ("write_tests", json!({"code": "c"})),
        ("explain_code", json!({"code": "c"})),
        ("explain_code_for_audience", json!({"code": "c"})),
        ("generate_docs", json!({"code": "c"})),
        ("generate_api_docs", json!({"code": "c"})),
        ("assess_code_quality", json!({"code": "c"})),
        (
            "migrate_code",
            json!({"code": "c", "from_version": "a", "to_version": "b"}),
        ),
        (
            "write_openai_agent",
            json!({"name": "n", "instructions": "i"}),
        ),
    ];
    for (tool, arg) in args {
        let req = registry
            .get(tool)
            .unwrap()
            .prepare(&arg, "o4-mini")
            .unwrap();
        render(&req.template_id, &req.params)
            .unwrap_or_else(|e| panic!("{} failed to render: {}", tool, e));
    }
}

// ===========================================================================
// Façade → dispatcher
// ===========================================================================

#[tokio::test]
async fn generate_code_end_to_end() {
    let backend = RecordingBackend::ok("func Reverse(s string) string { ... }");
    let d = dispatcher(backend.clone());
    let registry = create_default_registry("o4-mini");

    let completion = registry
        .call(
            "generate_code",
            &json!({"description": "reverse a string", "language": "Go"}),
            &d,
            None,
        )
        .await
        .unwrap();

    // Backend text comes back unmodified, from a single call.
    assert_eq!(completion.text, "func Reverse(s string) string { ... }");
    assert_eq!(completion.attempts, 1);

    let prompts = backend.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Generate Go code"));
    assert!(prompts[0].contains("reverse a string"));
}

#[tokio::test]
async fn unknown_tool_is_rejected() {
    let d = dispatcher(RecordingBackend::ok("x"));
    let registry = create_default_registry("o4-mini");

    let err = registry
        .call("search_codebase", &json!({}), &d, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "unknown_tool");
}

#[tokio::test]
async fn bad_arguments_never_reach_the_backend() {
    let backend = RecordingBackend::ok("x");
    let d = dispatcher(backend.clone());
    let registry = create_default_registry("o4-mini");

    let err = registry
        .call("generate_code", &json!({"language": "Go"}), &d, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_argument");
    assert!(err.to_string().starts_with("generate_code:"));
    assert!(backend.prompts().is_empty());
}

#[tokio::test]
async fn dispatch_failure_is_annotated_with_tool_name() {
    let d = dispatcher(RecordingBackend::failing());
    let registry = create_default_registry("o4-mini");

    let err = registry
        .call("explain_code", &json!({"code": "x = 1"}), &d, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_response");
    assert_eq!(err.attempts(), 1);
    assert!(err.correlation().is_some());
    assert!(err.to_string().starts_with("explain_code:"));
}

#[tokio::test]
async fn repeated_call_hits_cache() {
    let backend = RecordingBackend::ok("answer");
    let d = dispatcher(backend.clone());
    let registry = create_default_registry("o4-mini");
    let args = json!({"code": "x = 1"});

    let first = registry.call("explain_code", &args, &d, None).await.unwrap();
    let second = registry.call("explain_code", &args, &d, None).await.unwrap();
    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(backend.prompts().len(), 1);
}
