//! Process-wide template-function namespace.
//!
//! Commands publish functions here when they are registered (see
//! [`Command::template_functions`](crate::Command::template_functions));
//! any command may later expand `{{ name arg "quoted arg" }}`
//! placeholders through [`render`]. Registration is fire-and-forget and
//! idempotent: re-registering a name replaces the previous function.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use tracing::debug;

/// A function callable from templates with positional string arguments.
pub type TemplateFunction = Arc<dyn Fn(&[&str]) -> Result<String, TemplateError> + Send + Sync>;

/// Functions exposed by one command, keyed by name.
pub type TemplateFunctions = HashMap<String, TemplateFunction>;

static FUNCTIONS: LazyLock<RwLock<TemplateFunctions>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Errors produced while rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A `{{` without its closing `}}`.
    #[error("unclosed placeholder at byte {0}")]
    Unclosed(usize),

    /// A placeholder with no function name, or an unterminated quote.
    #[error("malformed placeholder: `{0}`")]
    Malformed(String),

    /// The placeholder names a function nobody registered.
    #[error("unknown template function `{0}`")]
    UnknownFunction(String),

    /// The function itself rejected its arguments.
    #[error("template function `{name}` failed: {reason}")]
    Failed {
        /// Function name.
        name: String,
        /// Why it failed.
        reason: String,
    },
}

/// Wrap a closure into a [`TemplateFunction`].
pub fn function_from<F>(f: F) -> TemplateFunction
where
    F: Fn(&[&str]) -> Result<String, TemplateError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Publish functions into the namespace.
pub fn register_functions(functions: TemplateFunctions) {
    if functions.is_empty() {
        return;
    }
    let mut registry = FUNCTIONS.write();
    for (name, function) in functions {
        debug!(function = %name, "registering template function");
        registry.insert(name, function);
    }
}

/// Look up a function by name.
pub fn function(name: &str) -> Option<TemplateFunction> {
    FUNCTIONS.read().get(name).cloned()
}

/// All registered function names, sorted.
pub fn function_names() -> Vec<String> {
    let mut names: Vec<String> = FUNCTIONS.read().keys().cloned().collect();
    names.sort();
    names
}

/// Expand every `{{ ... }}` placeholder in `text`.
///
/// Text outside placeholders is copied verbatim. Inside, the first word
/// names the function and the remaining words (or double-quoted strings)
/// are its arguments.
pub fn render(text: &str) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut offset = 0;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let body_start = start + 2;
        let Some(len) = rest[body_start..].find("}}") else {
            return Err(TemplateError::Unclosed(offset + start));
        };
        let body = &rest[body_start..body_start + len];
        out.push_str(&call(body)?);

        let consumed = body_start + len + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    Ok(out)
}

fn call(body: &str) -> Result<String, TemplateError> {
    let words = split_words(body).ok_or_else(|| TemplateError::Malformed(body.trim().into()))?;
    let Some((name, args)) = words.split_first() else {
        return Err(TemplateError::Malformed(body.trim().into()));
    };
    let func = function(name).ok_or_else(|| TemplateError::UnknownFunction(name.clone()))?;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    (*func)(args.as_slice())
}

/// Split on whitespace, keeping double-quoted strings together.
///
/// Returns `None` on an unterminated quote.
fn split_words(body: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut chars = body.trim().chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '"' {
            chars.next();
            let mut word = String::new();
            loop {
                match chars.next()? {
                    '"' => break,
                    '\\' => word.push(chars.next()?),
                    other => word.push(other),
                }
            }
            words.push(word);
        } else {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                word.push(c);
                chars.next();
            }
            words.push(word);
        }
    }
    Some(words)
}
