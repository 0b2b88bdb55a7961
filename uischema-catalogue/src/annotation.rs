//! Annotation tags trailing a field's type string.
//!
//! ```text
//! Field := Expr ('@' Key '=' Value)*
//! ```

use uischema_ir::{AnnotationSet, TypeExpression};

use crate::{SyntaxError, parse};

/// Split a raw field type into its parsed expression and annotation tags.
///
/// Unknown keys are kept opaquely; only a tag without `=` or with an empty
/// key is rejected. Offsets in errors refer to the full raw string.
pub fn extract_annotations(raw: &str) -> Result<(TypeExpression, AnnotationSet), SyntaxError> {
    let tags_start = find_tag_start(raw).unwrap_or(raw.len());
    let expr = parse(&raw[..tags_start]).map_err(|e| SyntaxError {
        raw: raw.to_string(),
        ..e
    })?;
    let annotations = parse_tags(raw, tags_start)?;
    Ok((expr, annotations))
}

/// Position of the first `@` that is not inside a quoted literal.
fn find_tag_start(raw: &str) -> Option<usize> {
    let mut quoted = false;
    for (i, c) in raw.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '@' if !quoted => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_tags(raw: &str, start: usize) -> Result<AnnotationSet, SyntaxError> {
    let mut annotations = AnnotationSet::new();
    let mut pos = start;

    while pos < raw.len() {
        let rest = &raw[pos..];
        let trimmed = rest.trim_start();
        pos += rest.len() - trimmed.len();
        if trimmed.is_empty() {
            break;
        }
        if !trimmed.starts_with('@') {
            return Err(SyntaxError::new(raw, pos, 1, "expected '@' before annotation"));
        }

        let body_start = pos + 1;
        let body_len = raw[body_start..]
            .find(|c: char| c.is_whitespace() || c == '@')
            .unwrap_or(raw.len() - body_start);
        let body = &raw[body_start..body_start + body_len];

        let Some((key, value)) = body.split_once('=') else {
            return Err(SyntaxError::new(
                raw,
                pos,
                body_len + 1,
                format!("annotation '@{}' is missing '='", body),
            ));
        };
        if key.is_empty() {
            return Err(SyntaxError::new(raw, pos, body_len + 1, "annotation key is empty"));
        }

        annotations.insert(key, value);
        pos = body_start + body_len;
    }

    Ok(annotations)
}
