//! Frontmatter extraction and render context layering.
//!
//! A page may open with a header block:
//!
//! ```text
//! ---yaml
//! title: Cookies
//! tags: [baking]
//! ---
//! Body text
//! ```
//!
//! The text after the opening `---` names the header language: nothing for
//! plain `key: value` lines, `json`, or `yaml`/`yml`. Parsed values are
//! layered over the built-in defaults and caller context.

use std::str::FromStr;

use serde_json::Value;

use crate::error::{PagesError, Result};

/// Render context handed to the template layer.
pub type Context = serde_json::Map<String, Value>;

/// Frontmatter delimiter line.
pub const DELIMITER: &str = "---";

/// Template every page extends unless told otherwise.
pub const DEFAULT_BASE_TEMPLATE: &str = "base.html";

/// Context key holding the base template.
pub const BASE_KEY: &str = "base";

/// Language of a frontmatter header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontmatterLanguage {
    /// `key: value` lines, every value a string
    Plain,
    Json,
    Yaml,
}

impl FrontmatterLanguage {
    /// Get the short name for this language.
    pub fn name(&self) -> &'static str {
        match self {
            FrontmatterLanguage::Plain => "plain",
            FrontmatterLanguage::Json => "JSON",
            FrontmatterLanguage::Yaml => "YAML",
        }
    }
}

impl FromStr for FrontmatterLanguage {
    type Err = PagesError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "" => Ok(FrontmatterLanguage::Plain),
            "json" => Ok(FrontmatterLanguage::Json),
            "yaml" | "yml" => Ok(FrontmatterLanguage::Yaml),
            other => Err(PagesError::UnsupportedLanguage {
                lang: other.to_string(),
            }),
        }
    }
}

/// A header block split off the top of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterBlock<'a> {
    /// Language tag following the opening delimiter, trimmed
    pub tag: &'a str,
    /// Lines between the delimiters
    pub header: String,
    /// Lines after the closing delimiter
    pub body: String,
}

impl FrontmatterBlock<'_> {
    /// Parse the header into key/value pairs.
    pub fn parse(&self) -> Result<Context> {
        let language: FrontmatterLanguage = self.tag.parse()?;
        log::debug!("parsing {} frontmatter", language.name());
        parse_header(language, &self.header)
    }
}

/// Split a frontmatter block off `raw`.
///
/// Returns `None` when the text does not open with `---`, or when no closing
/// `---` line follows.
pub fn split(raw: &str) -> Option<FrontmatterBlock<'_>> {
    if !raw.starts_with(DELIMITER) {
        return None;
    }

    let lines = split_lines(raw);
    let Some(end) = lines.iter().skip(1).position(|line| *line == DELIMITER) else {
        log::debug!("frontmatter opened without a closing {DELIMITER}, treating it as body");
        return None;
    };
    let end = end + 1;

    Some(FrontmatterBlock {
        tag: lines[0][DELIMITER.len()..].trim(),
        header: lines[1..end].join("\n"),
        body: lines[end + 1..].join("\n"),
    })
}

/// Split on `\n`, `\r\n` or a lone `\r`, dropping the terminators.
///
/// A trailing terminator does not start an extra empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(at) = rest.find(|c: char| c == '\n' || c == '\r') else {
            lines.push(rest);
            break;
        };
        lines.push(&rest[..at]);
        let width = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[at + width..];
    }

    lines
}

/// Build the starting context: the base template, then `extra` on top.
pub fn base_context(extra: &Context) -> Context {
    let mut context = Context::new();
    context.insert(
        BASE_KEY.to_string(),
        Value::String(DEFAULT_BASE_TEMPLATE.to_string()),
    );
    merge(&mut context, extra.clone());
    context
}

/// Overlay `layer` onto `context`, replacing keys that already exist.
pub fn merge(context: &mut Context, layer: Context) {
    for (key, value) in layer {
        context.insert(key, value);
    }
}

/// Split and parse a whole source file into `(body, context)`.
///
/// Without a well-formed header the body is `raw` untouched and the context
/// holds only the defaults and `extra`.
pub fn parse_document(raw: &str, extra: &Context) -> Result<(String, Context)> {
    let mut context = base_context(extra);

    let Some(block) = split(raw) else {
        return Ok((raw.to_string(), context));
    };

    merge(&mut context, block.parse()?);
    Ok((block.body, context))
}

/// Parse header text written in `language`.
pub fn parse_header(language: FrontmatterLanguage, header: &str) -> Result<Context> {
    match language {
        FrontmatterLanguage::Plain => Ok(parse_plain(header)),
        FrontmatterLanguage::Json => parse_json(header),
        FrontmatterLanguage::Yaml => parse_yaml(header),
    }
}

/// `key: value` per line, split at the first colon.
///
/// Empty lines are skipped. A line without a colon becomes a key, kept
/// exactly as written (surrounding whitespace included), with an empty value.
fn parse_plain(header: &str) -> Context {
    let mut context = Context::new();

    for line in header.split('\n') {
        if line.is_empty() {
            continue;
        }
        let (key, value) = match line.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (line, ""),
        };
        context.insert(key.to_string(), Value::String(value.to_string()));
    }

    context
}

fn parse_json(header: &str) -> Result<Context> {
    let value: Value = serde_json::from_str(header).map_err(|e| PagesError::InvalidJson {
        message: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(PagesError::NotAMapping {
            lang: FrontmatterLanguage::Json.name(),
            found: json_kind(&other).to_string(),
        }),
    }
}

#[cfg(feature = "yaml")]
fn parse_yaml(header: &str) -> Result<Context> {
    use serde_yaml::Value as Yaml;

    let parsed: Yaml = serde_yaml::from_str(header).map_err(|e| PagesError::InvalidYaml {
        message: e.to_string(),
    })?;

    let mapping = match parsed {
        Yaml::Mapping(mapping) => mapping,
        other => {
            return Err(PagesError::NotAMapping {
                lang: FrontmatterLanguage::Yaml.name(),
                found: yaml_kind(&other).to_string(),
            });
        }
    };

    let mut context = Context::new();
    for (key, value) in mapping {
        let key = match key {
            Yaml::String(key) => key,
            Yaml::Number(number) => number.to_string(),
            Yaml::Bool(flag) => flag.to_string(),
            other => {
                return Err(PagesError::InvalidYaml {
                    message: format!("unsupported {} key", yaml_kind(&other)),
                });
            }
        };
        let value = serde_json::to_value(value).map_err(|e| PagesError::InvalidYaml {
            message: e.to_string(),
        })?;
        context.insert(key, value);
    }

    Ok(context)
}

#[cfg(not(feature = "yaml"))]
fn parse_yaml(_header: &str) -> Result<Context> {
    Err(PagesError::YamlUnavailable)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(feature = "yaml")]
fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a list",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}
