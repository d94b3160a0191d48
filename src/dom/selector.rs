//! CSS selector subset
//!
//! Supports type selectors, `*`, `#id`, `.class`, `[attr]`, `[attr="v"]`,
//! `[attr^="v"]`, the descendant combinator and comma-separated groups.
//! That is everything the page markup contract relies on.

use super::document::{Document, NodeId};
use crate::error::ShelfError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrTest {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

/// A compound chain joined by descendant combinators, stored outermost first
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex(Vec<Compound>);

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Complex>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, ShelfError> {
        let fail = |reason: &str| ShelfError::Selector {
            selector: input.to_string(),
            reason: reason.to_string(),
        };

        let mut groups = Vec::new();
        for group in input.split(',') {
            let group = group.trim();
            if group.is_empty() {
                return Err(fail("empty selector group"));
            }
            let compounds = split_compounds(group)
                .into_iter()
                .map(|part| parse_compound(part).map_err(|reason| fail(&reason)))
                .collect::<Result<Vec<_>, _>>()?;
            groups.push(Complex(compounds));
        }

        Ok(Self { groups })
    }

    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        self.groups.iter().any(|g| g.matches(doc, id))
    }
}

impl Complex {
    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some((last, rest)) = self.0.split_last() else {
            return false;
        };
        if !last.matches(doc, id) {
            return false;
        }

        // Descendant-only chains can be matched greedily against the nearest
        // ancestor satisfying each remaining compound.
        let mut ancestors = doc.ancestors(id).into_iter();
        rest.iter()
            .rev()
            .all(|compound| ancestors.any(|a| compound.matches(doc, a)))
    }
}

impl Compound {
    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        if let Some(tag) = &self.tag
            && doc.tag(id) != tag
        {
            return false;
        }
        if let Some(element_id) = &self.id
            && doc.element_id(id) != Some(element_id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|c| doc.has_class(id, c)) {
            return false;
        }
        self.attrs.iter().all(|test| {
            let value = if test.name == "class" {
                doc.has_attribute(id, "class").then(|| doc.class_name(id))
            } else {
                doc.attribute(id, &test.name).map(str::to_string)
            };
            match (&test.op, value) {
                (_, None) => false,
                (AttrOp::Exists, Some(_)) => true,
                (AttrOp::Equals(expected), Some(v)) => &v == expected,
                (AttrOp::Prefix(prefix), Some(v)) => !prefix.is_empty() && v.starts_with(prefix),
            }
        })
    }
}

/// Split on whitespace that is outside attribute brackets
fn split_compounds(group: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start: Option<usize> = None;

    for (i, ch) in group.char_indices() {
        match ch {
            '"' | '\'' if quote == Some(ch) => quote = None,
            '"' | '\'' if quote.is_none() && depth > 0 => quote = Some(ch),
            '[' if quote.is_none() => depth += 1,
            ']' if quote.is_none() => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 && quote.is_none() => {
                if let Some(s) = start.take() {
                    parts.push(&group[s..i]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        parts.push(&group[s..]);
    }
    parts
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn parse_compound(part: &str) -> Result<Compound, String> {
    let chars: Vec<char> = part.chars().collect();
    let mut pos = 0;
    let mut compound = Compound::default();

    if chars.first() == Some(&'*') {
        pos += 1;
    } else if chars.first().is_some_and(|c| is_ident_char(*c)) {
        compound.tag = Some(take_ident(&chars, &mut pos).to_ascii_lowercase());
    }

    while pos < chars.len() {
        match chars[pos] {
            '#' => {
                pos += 1;
                let ident = take_ident(&chars, &mut pos);
                if ident.is_empty() {
                    return Err("expected id after `#`".to_string());
                }
                compound.id = Some(ident);
            }
            '.' => {
                pos += 1;
                let ident = take_ident(&chars, &mut pos);
                if ident.is_empty() {
                    return Err("expected class after `.`".to_string());
                }
                compound.classes.push(ident);
            }
            '[' => {
                pos += 1;
                compound.attrs.push(parse_attr(&chars, &mut pos)?);
            }
            other => return Err(format!("unexpected `{}`", other)),
        }
    }

    Ok(compound)
}

fn parse_attr(chars: &[char], pos: &mut usize) -> Result<AttrTest, String> {
    let name = take_ident(chars, pos);
    if name.is_empty() {
        return Err("expected attribute name".to_string());
    }

    let op = match chars.get(*pos) {
        Some(']') => {
            *pos += 1;
            return Ok(AttrTest {
                name,
                op: AttrOp::Exists,
            });
        }
        Some('=') => {
            *pos += 1;
            false
        }
        Some('^') if chars.get(*pos + 1) == Some(&'=') => {
            *pos += 2;
            true
        }
        _ => return Err("malformed attribute selector".to_string()),
    };

    let value = match chars.get(*pos) {
        Some(q @ ('"' | '\'')) => {
            let q = *q;
            *pos += 1;
            let start = *pos;
            while *pos < chars.len() && chars[*pos] != q {
                *pos += 1;
            }
            if *pos >= chars.len() {
                return Err("unterminated string".to_string());
            }
            let value: String = chars[start..*pos].iter().collect();
            *pos += 1;
            value
        }
        _ => take_ident(chars, pos),
    };

    if chars.get(*pos) != Some(&']') {
        return Err("expected `]`".to_string());
    }
    *pos += 1;

    Ok(AttrTest {
        name,
        op: if op {
            AttrOp::Prefix(value)
        } else {
            AttrOp::Equals(value)
        },
    })
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod selector_tests;
