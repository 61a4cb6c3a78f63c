use crate::domain::{next_version, IncrementMode};
use crate::error::{BumpError, Result};
use crate::rewrite::{split_bom, Rewrite, RewriteOutcome, Rewriter, SkipReason};
use serde::de::Error as _;
use serde_json::Value;

/// Rewrites a top-level string field of a JSON object
///
/// Unlike the other rewriters, a file whose version would not change is left
/// alone and contributes no version.
#[derive(Debug, Clone)]
pub struct JsonRewriter {
    field: String,
}

impl JsonRewriter {
    pub fn new(field: impl Into<String>) -> Self {
        JsonRewriter {
            field: field.into(),
        }
    }

    fn rewrite_document(&self, content: &str, mode: IncrementMode) -> Result<RewriteOutcome> {
        let (_, body) = split_bom(content);
        let mut document: Value = serde_json::from_str(body)?;
        let object = match document {
            Value::Object(ref mut map) => map,
            ref other => {
                return Err(BumpError::Json(serde_json::Error::custom(format!(
                    "expected an object at the top level, found {}",
                    kind_of(other)
                ))))
            }
        };

        let current = match object.get(&self.field) {
            None | Some(Value::Null) => {
                return Ok(RewriteOutcome::Skipped(SkipReason::NoVersionToken))
            }
            Some(Value::String(s)) if s.is_empty() => {
                return Ok(RewriteOutcome::Skipped(SkipReason::NoVersionToken))
            }
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(BumpError::version(format!(
                    "Field '{}' is {}, expected a string",
                    self.field,
                    kind_of(other)
                )))
            }
        };

        let next = next_version(&current, mode)?;
        if next == current {
            return Ok(RewriteOutcome::Skipped(SkipReason::Unchanged));
        }
        object.insert(self.field.clone(), Value::String(next.clone()));

        let pretty = serde_json::to_string_pretty(&document)?;
        let trimmed = pretty.trim_end();
        let content = if content.contains("\r\n") {
            let mut crlf = trimmed.replace('\n', "\r\n");
            crlf.push_str("\r\n");
            crlf
        } else {
            let mut lf = trimmed.to_string();
            lf.push('\n');
            lf
        };

        Ok(RewriteOutcome::Rewritten(Rewrite {
            content,
            versions: vec![next],
        }))
    }
}

impl Default for JsonRewriter {
    fn default() -> Self {
        JsonRewriter::new("version")
    }
}

impl Rewriter for JsonRewriter {
    fn rewrite(&self, content: &str, mode: IncrementMode) -> RewriteOutcome {
        self.rewrite_document(content, mode)
            .unwrap_or_else(RewriteOutcome::Failed)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
