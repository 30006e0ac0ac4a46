//! Wrap-spec parsing: `div(className='wrap'|hidden),MyProvider`.
//!
//! Tokens are separated by commas; each is a bare tag or a tag followed by a
//! parenthesized, `|`-separated attribute list. `name=value` renders as
//! `name={value}`, a bare `name` as a presence-only attribute.

use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Expression text, rendered inside `{}`; `None` for bare attributes.
    pub value: Option<String>,
}

impl Attribute {
    pub fn bound(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value.to_string()),
        }
    }

    pub fn bare(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
        }
    }

    /// JSX text of the attribute.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.value {
            Some(value) => format!("{}={{{value}}}", self.name),
            None => self.name.clone(),
        }
    }
}

/// One wrapper element, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapNode {
    pub tag: String,
    pub attributes: Vec<Attribute>,
}

impl WrapNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Parse a wrap spec into wrapper nodes, outermost first. An empty or
/// all-whitespace spec means no wrappers.
///
/// # Errors
/// Returns `RenderError::InvalidWrapSpec` for empty tokens, unbalanced
/// brackets, text after the attribute list, or tags that are not valid
/// element names.
pub fn parse_wrap_spec(spec: &str) -> Result<Vec<WrapNode>, RenderError> {
    let invalid = |reason: String| RenderError::InvalidWrapSpec {
        spec: spec.to_string(),
        reason,
    };
    if spec.trim().is_empty() {
        return Ok(Vec::new());
    }
    let nodes = split_top_level(spec, ',')
        .ok_or_else(|| invalid("unbalanced brackets".to_string()))?
        .into_iter()
        .map(|token| parse_token(token.trim()).map_err(&invalid))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(spec, wrappers = nodes.len(), "parsed wrap spec");
    Ok(nodes)
}

fn parse_token(token: &str) -> Result<WrapNode, String> {
    if token.is_empty() {
        return Err("empty wrapper".to_string());
    }
    let Some((tag, rest)) = token.split_once('(') else {
        return validate_tag(token).map(|()| WrapNode::new(token));
    };
    let tag = tag.trim();
    validate_tag(tag)?;
    let Some(inner) = rest.strip_suffix(')') else {
        return Err(format!("unexpected text after attributes of '{tag}'"));
    };
    let attributes = split_top_level(inner, '|')
        .ok_or_else(|| format!("unbalanced brackets in '{tag}'"))?
        .into_iter()
        .map(str::trim)
        .filter(|attr| !attr.is_empty())
        .map(|attr| match attr.split_once('=') {
            Some((name, value)) => Attribute::bound(name.trim(), value.trim()),
            None => Attribute::bare(attr),
        })
        .collect::<Vec<_>>();
    if attributes.iter().any(|attr| attr.name.is_empty()) {
        return Err(format!("attribute without a name in '{tag}'"));
    }
    Ok(WrapNode::new(tag).with_attributes(attributes))
}

/// Element names: a letter or `_`, then letters, digits, `_`, `-` or `.`
/// (`Theme.Provider`, `my-element`).
fn validate_tag(tag: &str) -> Result<(), String> {
    let mut chars = tag.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(format!("'{tag}' is not an element name"))
    }
}

/// Split on `separator` outside of `()`, `[]` and `{}`. `None` when the
/// brackets do not balance.
fn split_top_level(text: &str, separator: char) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    for (index, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.checked_sub(1)?,
            _ if c == separator && depth == 0 => {
                parts.push(&text[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    (depth == 0).then(|| {
        parts.push(&text[start..]);
        parts
    })
}
