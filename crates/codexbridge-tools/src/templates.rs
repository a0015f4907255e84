//! Prompt template store and renderer
//!
//! Template bodies are embedded at compile time and registered in a
//! process-wide table built lazily on first access. Templates are
//! immutable read-only resources with no write path, so the global is
//! safe to share across every in-flight request.
//!
//! Placeholders are `{name}` tokens, substituted exactly once. Parameter
//! content is embedded verbatim — escaping untrusted input is the
//! caller's problem, not the renderer's.

use codexbridge_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet, HashMap};

static TEMPLATES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "generate_code",
        include_str!("../templates/generate_code.txt"),
    );
    m.insert(
        "refactor_code",
        include_str!("../templates/refactor_code.txt"),
    );
    m.insert("write_tests", include_str!("../templates/write_tests.txt"));
    m.insert("explain_code", include_str!("../templates/explain_code.txt"));
    m.insert(
        "explain_code_for_audience",
        include_str!("../templates/explain_code_for_audience.txt"),
    );
    m.insert(
        "generate_docs",
        include_str!("../templates/generate_docs.txt"),
    );
    m.insert(
        "generate_api_docs",
        include_str!("../templates/generate_api_docs.txt"),
    );
    m.insert(
        "assess_code_quality",
        include_str!("../templates/assess_code_quality.txt"),
    );
    m.insert(
        "migrate_code",
        include_str!("../templates/migrate_code.txt"),
    );
    m.insert(
        "write_openai_agent",
        include_str!("../templates/write_openai_agent.txt"),
    );
    m
});

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

/// Registered template ids, sorted.
pub fn template_ids() -> Vec<&'static str> {
    let mut ids: Vec<_> = TEMPLATES.keys().copied().collect();
    ids.sort_unstable();
    ids
}

pub fn template_exists(template_id: &str) -> bool {
    TEMPLATES.contains_key(template_id)
}

/// Render a template, substituting every `{name}` placeholder from
/// `params`. All missing placeholders are collected and reported at once.
pub fn render(template_id: &str, params: &BTreeMap<String, String>) -> Result<String> {
    let body = TEMPLATES
        .get(template_id)
        .ok_or_else(|| Error::UnknownTemplate(template_id.to_string()))?;

    let mut missing: BTreeSet<String> = BTreeSet::new();
    let rendered = PLACEHOLDER_RE.replace_all(body, |caps: &Captures| {
        let name = &caps[1];
        match params.get(name) {
            Some(value) => value.clone(),
            None => {
                missing.insert(name.to_string());
                String::new()
            }
        }
    });

    if !missing.is_empty() {
        return Err(Error::missing_parameter(
            template_id,
            missing.into_iter().collect(),
        ));
    }
    Ok(rendered.into_owned())
}
