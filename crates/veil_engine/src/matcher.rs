//! Selector-fragment compiler.
//!
//! The pattern set speaks a narrow selector vocabulary: a tag name, `.class`
//! terms, `#id`, and `[attr="v"]` / `[attr*="v"]` tests, in any combination.
//! That is everything the classification heuristics use, compiled once at
//! pattern-set construction and matched against [`crate::Element`]s.

use thiserror::Error;

use crate::dom::Element;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatcherError {
    #[error("empty selector fragment")]
    Empty,
    #[error("unterminated attribute test in `{0}`")]
    UnterminatedAttr(String),
    #[error("unsupported selector syntax in `{0}`")]
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `[attr="value"]`: exact attribute value.
    Equals,
    /// `[attr*="value"]`: substring of the attribute value.
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrTest {
    pub name: String,
    pub op: AttrOp,
    pub value: String,
}

impl AttrTest {
    fn evaluate(&self, element: &Element) -> bool {
        match element.attribute(&self.name) {
            Some(actual) => match self.op {
                AttrOp::Equals => actual == self.value,
                AttrOp::Contains => actual.contains(&self.value),
            },
            None => false,
        }
    }
}

/// A compiled selector fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    tag: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

impl Matcher {
    pub fn parse(fragment: &str) -> Result<Self, MatcherError> {
        let input = fragment.trim();
        if input.is_empty() {
            return Err(MatcherError::Empty);
        }

        let mut matcher = Matcher {
            tag: None,
            classes: Vec::new(),
            attrs: Vec::new(),
        };
        let mut rest = input;

        // Leading tag name, if any.
        let tag_len = rest
            .char_indices()
            .find(|(_, c)| matches!(c, '.' | '#' | '['))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if tag_len > 0 {
            let tag = &rest[..tag_len];
            if !tag.chars().all(is_ident_char) {
                return Err(MatcherError::Unsupported(input.to_string()));
            }
            matcher.tag = Some(tag.to_ascii_lowercase());
            rest = &rest[tag_len..];
        }

        while !rest.is_empty() {
            if let Some(tail) = rest.strip_prefix('.') {
                let (ident, tail) = split_ident(tail);
                if ident.is_empty() {
                    return Err(MatcherError::Unsupported(input.to_string()));
                }
                matcher.classes.push(ident.to_string());
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix('#') {
                let (ident, tail) = split_ident(tail);
                if ident.is_empty() {
                    return Err(MatcherError::Unsupported(input.to_string()));
                }
                matcher.attrs.push(AttrTest {
                    name: "id".to_string(),
                    op: AttrOp::Equals,
                    value: ident.to_string(),
                });
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix('[') {
                let end = tail
                    .find(']')
                    .ok_or_else(|| MatcherError::UnterminatedAttr(input.to_string()))?;
                matcher.attrs.push(parse_attr_test(&tail[..end], input)?);
                rest = &tail[end + 1..];
            } else {
                return Err(MatcherError::Unsupported(input.to_string()));
            }
        }

        Ok(matcher)
    }

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attrs.iter().all(|test| test.evaluate(element))
    }
}

fn parse_attr_test(body: &str, input: &str) -> Result<AttrTest, MatcherError> {
    let (name, op, raw_value) = if let Some((name, value)) = body.split_once("*=") {
        (name, AttrOp::Contains, value)
    } else if let Some((name, value)) = body.split_once('=') {
        (name, AttrOp::Equals, value)
    } else {
        return Err(MatcherError::Unsupported(input.to_string()));
    };

    let name = name.trim();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(MatcherError::Unsupported(input.to_string()));
    }
    let value = raw_value.trim().trim_matches('"');

    Ok(AttrTest {
        name: name.to_ascii_lowercase(),
        op,
        value: value.to_string(),
    })
}

fn split_ident(input: &str) -> (&str, &str) {
    let len = input
        .char_indices()
        .find(|(_, c)| !is_ident_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    input.split_at(len)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
