use crate::domain::{next_version, IncrementMode, VersionSet};
use crate::error::Result;
use crate::rewrite::{Rewrite, RewriteOutcome, Rewriter};
use regex::Regex;

/// Version token between `[assembly: AssemblyVersion("` and `")]`, whitespace tolerant.
/// Group 1 is the token itself.
const ASSEMBLY_VERSION_PATTERN: &str =
    r#"\[\s*assembly\s*:\s*AssemblyVersion\s*\(\s*"([0-9]+\.[0-9]+\.[0-9]+(?:\.[0-9]+)?)"\s*\)\s*\]"#;

/// Rewrites `AssemblyVersion` attribute declarations in source files
pub struct TextRewriter {
    pattern: Regex,
}

impl TextRewriter {
    pub fn new() -> Result<Self> {
        Ok(TextRewriter {
            pattern: Regex::new(ASSEMBLY_VERSION_PATTERN)?,
        })
    }

    /// Rewrite the first version declaration in a single line
    ///
    /// Only the numeric token changes; a line without a declaration is returned
    /// unchanged. Each replacement pushes its new version onto `collected`.
    pub fn rewrite_line(
        &self,
        line: &str,
        mode: IncrementMode,
        collected: &mut Vec<String>,
    ) -> Result<String> {
        let Some(token) = self.pattern.captures(line).and_then(|caps| caps.get(1)) else {
            return Ok(line.to_string());
        };

        let new_version = next_version(token.as_str(), mode)?;
        let mut rewritten = String::with_capacity(line.len());
        rewritten.push_str(&line[..token.start()]);
        rewritten.push_str(&new_version);
        rewritten.push_str(&line[token.end()..]);

        collected.push(new_version);
        Ok(rewritten)
    }

    fn rewrite_content(&self, content: &str, mode: IncrementMode) -> Result<Option<Rewrite>> {
        let mut collected = Vec::new();
        let mut output = String::with_capacity(content.len() + 8);

        for line in content.split_inclusive('\n') {
            let (body, ending) = split_line_ending(line);
            output.push_str(&self.rewrite_line(body, mode, &mut collected)?);
            output.push_str(ending);
        }

        if collected.is_empty() {
            return Ok(None);
        }

        let versions: VersionSet = collected.into_iter().collect();
        Ok(Some(Rewrite {
            content: output,
            versions: versions.as_slice().to_vec(),
        }))
    }
}

impl Rewriter for TextRewriter {
    fn rewrite(&self, content: &str, mode: IncrementMode) -> RewriteOutcome {
        self.rewrite_content(content, mode).into()
    }
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
