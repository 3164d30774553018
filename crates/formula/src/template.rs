//! Homebrew formula template rendering.
//!
//! Templates are plain text with `{{name}}` placeholders. Anything that is
//! not a complete placeholder token is copied through untouched.

use crate::error::RenderError;
use crate::spec::FormulaSpec;
use tracing::debug;

/// The built-in formula template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/formula.rb");

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// A parsed template, ready to render any number of specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    source: &'a str,
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    /// Splits `source` into literal text and placeholder tokens.
    ///
    /// A token is `{{`, a name made of ASCII letters, digits and `_`
    /// (optionally padded with spaces), then `}}`.
    #[must_use]
    pub fn parse(source: &'a str) -> Self {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find(OPEN) {
            let after = &rest[start + OPEN.len()..];
            if let Some((name, consumed)) = parse_token(after) {
                if start > 0 {
                    segments.push(Segment::Literal(&rest[..start]));
                }
                segments.push(Segment::Placeholder(name));
                rest = &after[consumed..];
            } else {
                // Keep one brace and rescan, so `{{{name}}` still yields a token.
                segments.push(Segment::Literal(&rest[..=start]));
                rest = &rest[start + 1..];
            }
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }

        Self { source, segments }
    }

    /// Distinct placeholder names, in order of first appearance.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(name) = *segment {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Substitutes every placeholder with its value from `spec`.
    ///
    /// The spec is validated first, then placeholders are resolved left to
    /// right. Substituted values are inserted verbatim; validation has
    /// already rejected any value holding a placeholder token, so the
    /// output contains none.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidField`] if the spec fails validation and
    /// [`RenderError::MissingField`] for the first placeholder the spec
    /// cannot resolve.
    pub fn render(&self, spec: &FormulaSpec) -> Result<String, RenderError> {
        spec.validate()?;

        let mut output = String::with_capacity(self.source.len() + 128);
        for segment in &self.segments {
            match *segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder(name) => {
                    let value = spec
                        .placeholder_value(name)
                        .ok_or_else(|| RenderError::missing_field(name))?;
                    output.push_str(&value);
                }
            }
        }

        debug!(
            binary = %spec.binary_name,
            version = %spec.version,
            placeholders = self.placeholders().len(),
            bytes = output.len(),
            "Rendered formula"
        );

        Ok(output)
    }
}

impl Template<'static> {
    /// The built-in formula template.
    #[must_use]
    pub fn default_formula() -> Self {
        Self::parse(DEFAULT_TEMPLATE)
    }
}

/// Parses and renders `template` in one step.
///
/// # Errors
///
/// See [`Template::render`].
pub fn render(template: &str, spec: &FormulaSpec) -> Result<String, RenderError> {
    Template::parse(template).render(spec)
}

/// Returns true if `text` holds at least one complete placeholder token.
pub(crate) fn contains_placeholder(text: &str) -> bool {
    text.contains(OPEN) && !Template::parse(text).placeholders().is_empty()
}

/// Parses `name }}` (with optional inner spaces) at the start of `input`.
/// Returns the name and the number of bytes consumed, including `}}`.
fn parse_token(input: &str) -> Option<(&str, usize)> {
    let leading = input.len() - input.trim_start_matches(' ').len();
    let body = &input[leading..];
    let name_len = body
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if name_len == 0 {
        return None;
    }
    let name = &body[..name_len];
    let tail = &body[name_len..];
    let trailing = tail.len() - tail.trim_start_matches(' ').len();
    if !tail[trailing..].starts_with(CLOSE) {
        return None;
    }
    Some((name, leading + name_len + trailing + CLOSE.len()))
}
