//! Captured wire traffic for one operation and the rules that redact it before logging.

use common_utils::consts::REDACTION_MARKER;
use regex::Regex;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Request,
    Response,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TranscriptEntry {
    pub direction: Direction,
    pub text: String,
}

/// Ordered request and response records captured while one call runs
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct WireTranscript {
    entries: Vec<TranscriptEntry>,
}

impl WireTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, direction: Direction, text: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            direction,
            text: text.into(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the transcript one line per record, prefixed `>>` for requests and `<<` for
    /// responses
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                let prefix = match entry.direction {
                    Direction::Request => ">>",
                    Direction::Response => "<<",
                };
                format!("{prefix} {}", entry.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A structural location whose value is always redacted
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SensitiveField {
    /// `Name: value` header lines
    Header(String),
    /// `"name": "value"` JSON string members
    JsonString(String),
    /// `<Name>value</Name>`, also in its `&lt;Name&gt;` escaped form
    XmlElement(String),
}

impl SensitiveField {
    fn patterns(&self) -> Vec<Regex> {
        let sources = match self {
            Self::Header(name) => {
                let name = regex::escape(name);
                vec![
                    format!(r"(?im)^(\s*{name}\s*:[ \t]*)([^\r\n]*)()"),
                    format!(r"(?i)(\\r\\n{name}:[ \t]*)([^\\\r\n]*)()"),
                ]
            }
            Self::JsonString(name) => {
                let name = regex::escape(name);
                vec![
                    format!(r#"("{name}"\s*:\s*")((?:[^"\\]|\\.)*)(")"#),
                    format!(r#"(\\"{name}\\"\s*:\s*\\")([^"\\]*)(\\")"#),
                ]
            }
            Self::XmlElement(name) => {
                let name = regex::escape(name);
                vec![
                    format!(r"(<{name}(?:\s[^>]*)?>)([^<]*)(</{name}>)"),
                    format!(r"(&lt;{name}&gt;)(.*?)(&lt;/{name}&gt;)"),
                ]
            }
        };
        sources
            .iter()
            .filter_map(|source| Regex::new(source).ok())
            .collect()
    }
}

/// Redaction rules for one call: fixed fields declared by the adapter plus the literal
/// secrets (PAN, CVV, keys) that call used.
#[derive(Clone, Debug, Default)]
pub struct ScrubRules {
    literals: Vec<String>,
    fields: Vec<SensitiveField>,
}

impl ScrubRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: impl IntoIterator<Item = SensitiveField>) -> Self {
        Self {
            literals: Vec::new(),
            fields: fields.into_iter().collect(),
        }
    }

    pub fn literal(mut self, literal: impl Into<String>) -> Self {
        self.add_literal(literal);
        self
    }

    pub fn add_literal(&mut self, literal: impl Into<String>) {
        let literal = literal.into();
        if !literal.is_empty() && !literal.contains(REDACTION_MARKER) {
            self.literals.push(literal);
        }
    }

    pub fn scrub(&self, transcript: &WireTranscript) -> WireTranscript {
        WireTranscript {
            entries: transcript
                .entries
                .iter()
                .map(|entry| TranscriptEntry {
                    direction: entry.direction,
                    text: self.scrub_text(&entry.text),
                })
                .collect(),
        }
    }

    pub fn scrub_text(&self, text: &str) -> String {
        let mut scrubbed = text.to_string();
        for field in &self.fields {
            for pattern in field.patterns() {
                scrubbed = pattern
                    .replace_all(&scrubbed, format!("${{1}}{REDACTION_MARKER}${{3}}").as_str())
                    .into_owned();
            }
        }
        self.scrub_literals(&scrubbed)
    }

    /// Replaces every literal in a single left to right pass over each stretch of text
    /// between existing markers, longest literal first.
    fn scrub_literals(&self, text: &str) -> String {
        let Some(pattern) = self.literal_pattern() else {
            return text.to_string();
        };
        text.split(REDACTION_MARKER)
            .map(|segment| pattern.replace_all(segment, REDACTION_MARKER).into_owned())
            .collect::<Vec<_>>()
            .join(REDACTION_MARKER)
    }

    fn literal_pattern(&self) -> Option<Regex> {
        if self.literals.is_empty() {
            return None;
        }
        let mut literals: Vec<&str> = self.literals.iter().map(String::as_str).collect();
        literals.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        literals.dedup();
        let alternation = literals
            .iter()
            .map(|literal| regex::escape(literal))
            .collect::<Vec<_>>()
            .join("|");
        match Regex::new(&alternation) {
            Ok(pattern) => Some(pattern),
            Err(error) => {
                tracing::warn!(?error, "failed to compile scrub literals");
                None
            }
        }
    }
}
