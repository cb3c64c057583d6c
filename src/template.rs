//! Template compilation and the per-bar widget registry

use std::collections::HashMap;
use std::mem;

use crate::widget::Widget;
use crate::{Error, Result};

/// A building block handed to the bar: raw template text, or a widget
/// instance placed positionally between template pieces.
#[derive(Debug, Clone)]
pub enum Part {
    Template(String),
    Widget(Widget),
}

/// One compiled piece of the bar line, immutable after compilation.
#[derive(Debug, Clone)]
pub enum Segment {
    Literal(String),
    Widget(Widget),
}

/// Maps `{tag}` names to widget instances.
///
/// Each bar owns its registry, seeded from the built-in catalog. Tags are
/// matched case-insensitively and a later registration for the same tag
/// overrides the earlier one.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: HashMap<String, Widget>,
}

impl Default for Registry {
    fn default() -> Self {
        crate::catalog::builtin_registry()
    }
}

impl Registry {
    /// A registry with no entries, not even the built-in ones.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn register(&mut self, tag: impl AsRef<str>, widget: Widget) {
        self.entries.insert(tag.as_ref().to_lowercase(), widget);
    }

    pub fn get(&self, tag: &str) -> Option<&Widget> {
        self.entries.get(&tag.to_lowercase())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(&tag.to_lowercase())
    }
}

/// Compile construction parts into the ordered segment list, preserving
/// the caller-specified interleaving of literals, explicit widgets and
/// tag-resolved widgets.
pub(crate) fn compile(parts: &[Part], registry: &Registry) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    for part in parts {
        match part {
            Part::Widget(widget) => segments.push(Segment::Widget(widget.clone())),
            Part::Template(text) => compile_template(text, registry, &mut segments)?,
        }
    }
    Ok(segments)
}

/// Left-to-right scan splitting on balanced `{` `}` delimiters.
fn compile_template(text: &str, registry: &Registry, out: &mut Vec<Segment>) -> Result<()> {
    let mut literal = String::new();
    let mut tag: Option<String> = None;
    for c in text.chars() {
        match (&mut tag, c) {
            (None, '{') => {
                if !literal.is_empty() {
                    out.push(Segment::Literal(mem::take(&mut literal)));
                }
                tag = Some(String::new());
            }
            (None, '}') => {
                return Err(Error::MalformedTemplate(format!(
                    "unmatched `}}` in `{text}`"
                )));
            }
            (None, c) => literal.push(c),
            (Some(_), '{') => {
                return Err(Error::MalformedTemplate(format!(
                    "nested `{{` in `{text}`"
                )));
            }
            (Some(name), '}') => {
                if name.is_empty() {
                    return Err(Error::MalformedTemplate(format!(
                        "empty tag in `{text}`"
                    )));
                }
                let widget = registry
                    .get(name)
                    .ok_or_else(|| Error::UnknownTag(name.clone()))?;
                out.push(Segment::Widget(widget.clone()));
                tag = None;
            }
            (Some(name), c) => name.push(c),
        }
    }
    if tag.is_some() {
        return Err(Error::MalformedTemplate(format!(
            "unterminated `{{` in `{text}`"
        )));
    }
    if !literal.is_empty() {
        out.push(Segment::Literal(literal));
    }
    Ok(())
}
