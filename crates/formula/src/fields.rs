//! Reads the top-level stanzas back out of a rendered formula.

use serde::Serialize;

/// Stanza values found in formula text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormulaFields {
    /// Class name from `class X < Formula`
    pub class_name: Option<String>,
    /// `desc` stanza
    pub desc: Option<String>,
    /// `homepage` stanza
    pub homepage: Option<String>,
    /// `url` stanza
    pub url: Option<String>,
    /// `sha256` stanza
    pub sha256: Option<String>,
    /// `version` stanza
    pub version: Option<String>,
}

impl FormulaFields {
    /// Extracts stanzas from formula text.
    ///
    /// Each stanza is a keyword followed by a single- or double-quoted
    /// literal on one line. Only the first occurrence of a keyword counts.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut fields = Self::default();

        for line in text.lines() {
            let line = line.trim();
            if let Some(decl) = line.strip_prefix("class ") {
                if fields.class_name.is_none() {
                    if let Some((name, parent)) = decl.split_once('<') {
                        if parent.trim() == "Formula" {
                            fields.class_name = Some(name.trim().to_string());
                        }
                    }
                }
                continue;
            }

            let Some((keyword, rest)) = line.split_once(char::is_whitespace) else {
                continue;
            };
            let slot = match keyword {
                "desc" => &mut fields.desc,
                "homepage" => &mut fields.homepage,
                "url" => &mut fields.url,
                "sha256" => &mut fields.sha256,
                "version" => &mut fields.version,
                _ => continue,
            };
            if slot.is_none() {
                *slot = quoted_literal(rest.trim()).map(str::to_string);
            }
        }

        fields
    }
}

fn quoted_literal(text: &str) -> Option<&str> {
    let quote = text.chars().next().filter(|c| matches!(c, '\'' | '"'))?;
    let inner = text.strip_prefix(quote)?.strip_suffix(quote)?;
    Some(inner)
}
