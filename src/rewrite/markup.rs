use crate::domain::{next_version, IncrementMode};
use crate::error::{BumpError, Result};
use crate::rewrite::{split_bom, Rewrite, RewriteOutcome, Rewriter};
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Rewrites the text of the first matching element in an XML document
///
/// Whitespace outside the element is kept as found. The output always uses
/// CRLF line endings and declares UTF-8 if, and only if, the original had an
/// XML declaration.
#[derive(Debug, Clone)]
pub struct MarkupRewriter {
    element: String,
}

impl MarkupRewriter {
    pub fn new(element: impl Into<String>) -> Self {
        MarkupRewriter {
            element: element.into(),
        }
    }

    fn is_target(&self, name: &[u8]) -> bool {
        name == self.element.as_bytes()
    }

    fn rewrite_document(&self, content: &str, mode: IncrementMode) -> Result<Option<Rewrite>> {
        let (has_bom, body) = split_bom(content);
        let mut reader = Reader::from_str(body);
        reader.config_mut().trim_text(false);
        let mut writer = Writer::new(Vec::with_capacity(body.len()));
        let mut new_version: Option<String> = None;

        loop {
            let before = reader.buffer_position() as usize;
            match reader.read_event()? {
                Event::Eof => break,
                // The writer would normalize the whitespace inside the declaration
                Event::DocType(doctype) => {
                    let after = reader.buffer_position() as usize;
                    match body.as_bytes().get(before..after) {
                        Some(raw) => writer.get_mut().extend_from_slice(raw),
                        None => writer.write_event(Event::DocType(doctype))?,
                    }
                }
                Event::Decl(decl) => {
                    writer.write_event(Event::Decl(utf8_declaration(&decl)?))?;
                }
                Event::Start(start)
                    if new_version.is_none() && self.is_target(start.name().as_ref()) =>
                {
                    let current = read_element_text(&mut reader)?;
                    let next = next_version(&current, mode)?;
                    let end = start.to_end().into_owned();
                    writer.write_event(Event::Start(start))?;
                    writer.write_event(Event::Text(BytesText::new(&next)))?;
                    writer.write_event(Event::End(end))?;
                    new_version = Some(next);
                }
                Event::Empty(empty)
                    if new_version.is_none() && self.is_target(empty.name().as_ref()) =>
                {
                    return Err(BumpError::version(format!(
                        "Element <{}> has no version text",
                        self.element
                    )));
                }
                event => writer.write_event(event)?,
            }
        }

        let Some(version) = new_version else {
            return Ok(None);
        };

        let serialized = String::from_utf8(writer.into_inner())
            .map_err(|e| BumpError::xml(format!("Serialized document is not UTF-8: {}", e)))?;
        let mut output = String::with_capacity(serialized.len() + serialized.len() / 16 + 3);
        if has_bom {
            output.push('\u{feff}');
        }
        output.push_str(&to_crlf(&serialized));

        Ok(Some(Rewrite {
            content: output,
            versions: vec![version],
        }))
    }
}

impl Default for MarkupRewriter {
    fn default() -> Self {
        MarkupRewriter::new("Version")
    }
}

impl Rewriter for MarkupRewriter {
    fn rewrite(&self, content: &str, mode: IncrementMode) -> RewriteOutcome {
        self.rewrite_document(content, mode).into()
    }
}

/// Consume events up to the end of the current element, collecting its text
fn read_element_text(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut depth = 0usize;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(text),
            Event::End(_) => depth -= 1,
            Event::Text(t) => {
                let unescaped = t.unescape().map_err(|e| BumpError::xml(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Event::Eof => {
                return Err(BumpError::xml("Document ended inside the version element"));
            }
            _ => {}
        }
    }
}

fn utf8_declaration(decl: &BytesDecl) -> Result<BytesDecl<'static>> {
    let version = decl.version().map_err(|e| BumpError::xml(e.to_string()))?;
    let version = String::from_utf8_lossy(&version).into_owned();
    let standalone = match decl.standalone() {
        Some(Ok(value)) => Some(String::from_utf8_lossy(&value).into_owned()),
        _ => None,
    };

    Ok(BytesDecl::new(&version, Some("utf-8"), standalone.as_deref()))
}

fn to_crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}
