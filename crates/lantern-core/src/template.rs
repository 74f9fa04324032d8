//! Prompt templates with `{{name}}` placeholders.

use crate::CoreError;
use std::collections::HashMap;
use std::fmt::Display;

/// Named values supplied to [`PromptTemplate::render`].
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    values: HashMap<String, String>,
}

impl TemplateValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to the display form of `value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// A prompt with `{{name}}` placeholders resolved at render time.
///
/// Rendering fails on any placeholder without a bound value; unused
/// values are ignored. Text outside placeholders passes through
/// unchanged, including stray braces.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Substitute every placeholder and return the rendered prompt.
    pub fn render(&self, values: &TemplateValues) -> Result<String, CoreError> {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(open) = rest.find("{{") {
            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("}}") else {
                break;
            };
            out.push_str(&rest[..open]);
            let name = after_open[..close].trim();
            match values.get(name) {
                Some(value) => out.push_str(value),
                None => return Err(CoreError::MissingTemplateValue(name.to_string())),
            }
            rest = &after_open[close + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
