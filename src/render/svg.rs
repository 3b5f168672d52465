//! In-place text replacement for SVG templates
//!
//! Elements are addressed by their `id` attribute. Only the text directly inside the
//! element changes; tags, attributes and everything else are written back verbatim.

use super::RenderError;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDocument {
    source: String,
}

impl SvgDocument {
    pub fn parse(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }

    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let source = fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        Ok(Self::parse(source))
    }

    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        fs::write(path, self.to_xml()).map_err(|e| RenderError::io(path, e))
    }

    /// Document text, with an XML declaration prepended if the template had none.
    pub fn to_xml(&self) -> String {
        if self.source.trim_start().starts_with("<?xml") {
            self.source.clone()
        } else {
            format!("{XML_DECLARATION}\n{}", self.source)
        }
    }

    /// Text of the element with the given id.
    pub fn text(&self, id: &str) -> Option<String> {
        let caps = element_pattern(id).ok()?.captures(&self.source)?;
        if caps.get(3).is_some_and(|m| !m.as_str().is_empty()) {
            return Some(String::new());
        }
        caps.get(4).map(|m| unescape(m.as_str()))
    }

    /// Replace the text of the element with the given id. Returns `false` if no such
    /// element exists.
    pub fn set_text(&mut self, id: &str, text: &str) -> Result<bool, RenderError> {
        let pattern = element_pattern(id)?;
        let Some(caps) = pattern.captures(&self.source) else {
            return Ok(false);
        };
        let (Some(whole), Some(name), Some(attrs), Some(content)) =
            (caps.get(0), caps.get(1), caps.get(2), caps.get(4))
        else {
            return Ok(false);
        };
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());
        let name = name.as_str();
        let escaped = escape(text);
        let replacement = if self_closing {
            format!("<{name}{}>{escaped}</{name}>", attrs.as_str())
        } else {
            format!("<{name}{}>{escaped}", attrs.as_str())
        };
        // A self-closing tag owns none of the text that follows it.
        let end = if self_closing { content.start() } else { whole.end() };
        self.source.replace_range(whole.start()..end, &replacement);
        Ok(true)
    }
}

fn element_pattern(id: &str) -> Result<Regex, RenderError> {
    let id = regex::escape(id);
    let pattern =
        format!(r#"<([A-Za-z_][\w:.-]*)(\s(?:[^>]*?\s)?id\s*=\s*(?:"{id}"|'{id}')[^>]*?)(/?)>([^<]*)"#);
    Regex::new(&pattern).map_err(|e| RenderError::Pattern(e.to_string()))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&")
}

/// Templates that exist on disk, in order.
pub fn existing_templates(paths: &[PathBuf]) -> Vec<&PathBuf> {
    paths.iter().filter(|p| p.is_file()).collect()
}
