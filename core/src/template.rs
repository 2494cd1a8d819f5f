//! Default-value template bindings.
//!
//! A default-value template such as `"Report for $[title] on ${today}"` refers
//! to other properties with `$[name]` and to functions with `${name}`. The
//! bindings are extracted once at compile time so consumers do not need to
//! parse the template again. Templates are never evaluated here.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn binding_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\[([^\[\]]+)\]|\$\{([^{}]+)\}").expect("binding pattern is valid")
    })
}

/// Kind of reference found in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingKind {
    /// `$[name]` reference to another property.
    Property,
    /// `${name}` reference to a function.
    Function,
}

/// A single binding extracted from a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateBinding {
    pub kind: BindingKind,
    pub name: String,
}

impl TemplateBinding {
    pub fn property(name: impl Into<String>) -> Self {
        Self {
            kind: BindingKind::Property,
            name: name.into(),
        }
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self {
            kind: BindingKind::Function,
            name: name.into(),
        }
    }
}

/// Extract the bindings of a template in order of appearance, without duplicates.
pub fn template_bindings(template: &str) -> Vec<TemplateBinding> {
    let mut bindings: Vec<TemplateBinding> = Vec::new();
    for captures in binding_pattern().captures_iter(template) {
        let binding = if let Some(name) = captures.get(1) {
            TemplateBinding::property(name.as_str().trim())
        } else if let Some(name) = captures.get(2) {
            TemplateBinding::function(name.as_str().trim())
        } else {
            continue;
        };
        if binding.name.is_empty() || bindings.contains(&binding) {
            continue;
        }
        bindings.push(binding);
    }
    bindings
}
