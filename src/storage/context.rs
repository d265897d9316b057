//! Position contexts
//!
//! A context says when a stored position may be used. On the stored side an
//! empty `app` or `title_part` is a wildcard, while `mode` always has to match
//! exactly. When several stored contexts match, the one with the highest
//! [`Context::specificity`] wins.

use std::fmt;

const APP_TAG: &str = "app:";
const TITLE_TAG: &str = "title:";
const MODE_TAG: &str = "mouse position mode:";

const APP_WEIGHT: u32 = 1;
const TITLE_WEIGHT: u32 = 1;
// Outweighs app and title together
const MODE_WEIGHT: u32 = 3;

/// Descriptor of when a stored position is eligible for use
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Context {
    pub app: String,
    pub title_part: String,
    pub mode: String,
}

/// A single context line of a record file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextField {
    App(String),
    TitlePart(String),
    Mode(String),
}

impl ContextField {
    /// Recognize a context line, or `None` if the line belongs to something else
    pub fn parse(line: &str) -> Option<Self> {
        if let Some(app) = line.strip_prefix(APP_TAG) {
            Some(Self::App(app.to_string()))
        } else if let Some(title) = line.strip_prefix(TITLE_TAG) {
            Some(Self::TitlePart(title.to_string()))
        } else {
            line.strip_prefix(MODE_TAG)
                .map(|mode| Self::Mode(mode.to_string()))
        }
    }
}

impl Context {
    pub fn new(
        app: impl Into<String>,
        title_part: impl Into<String>,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            app: app.into(),
            title_part: title_part.into(),
            mode: mode.into(),
        }
    }

    /// Whether a position stored under `self` may be used in `candidate`
    pub fn matches(&self, candidate: &Context) -> bool {
        (self.app.is_empty() || self.app == candidate.app)
            && candidate.title_part.contains(&self.title_part)
            && self.mode == candidate.mode
    }

    pub fn specificity(&self) -> u32 {
        let mut score = 0;
        if !self.app.is_empty() {
            score += APP_WEIGHT;
        }
        if !self.title_part.is_empty() {
            score += TITLE_WEIGHT;
        }
        if !self.mode.is_empty() {
            score += MODE_WEIGHT;
        }
        score
    }

    pub fn apply(&mut self, field: ContextField) {
        match field {
            ContextField::App(app) => self.app = app,
            ContextField::TitlePart(title) => self.title_part = title,
            ContextField::Mode(mode) => self.mode = mode,
        }
    }

    /// Record file lines for the non-empty fields, each ending in a newline
    pub fn encode(&self) -> String {
        let mut text = String::new();
        for (tag, value) in [
            (APP_TAG, &self.app),
            (TITLE_TAG, &self.title_part),
            (MODE_TAG, &self.mode),
        ] {
            if !value.is_empty() {
                text.push_str(tag);
                text.push_str(value);
                text.push('\n');
            }
        }
        text
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.app.is_empty() {
            parts.push(format!("app={}", self.app));
        }
        if !self.title_part.is_empty() {
            parts.push(format!("title={}", self.title_part));
        }
        if !self.mode.is_empty() {
            parts.push(format!("mode={}", self.mode));
        }
        if parts.is_empty() {
            write!(f, "(any)")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}
