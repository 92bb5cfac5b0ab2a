//! Positional locator templates.
//!
//! Catalog values are printf-style templates. A template is parsed into
//! segments once and rendered against an ordered list of string arguments:
//!
//! - `%s` inserts the next argument verbatim
//! - `%d` inserts the next argument, which must be a signed integer
//! - `%2$s` / `%2$d` insert argument 2 (1-based) without moving the cursor
//! - `%%` is a literal percent sign, `%n` a newline
//!
//! Supplying fewer arguments than the template consumes is an error;
//! surplus arguments are ignored.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors produced while parsing or rendering a template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Template consumes an argument that was not supplied
    #[error("missing argument {index} ({supplied} supplied)")]
    MissingArgument {
        /// 1-based index of the missing argument
        index: usize,
        /// Number of arguments supplied
        supplied: usize,
    },

    /// `%d` slot received a value that does not parse as an integer
    #[error("argument {index} ({value:?}) is not an integer")]
    NotAnInteger {
        /// 1-based index of the argument
        index: usize,
        /// Offending value
        value: String,
    },

    /// Unsupported conversion or dangling `%`
    #[error("malformed format specifier {specifier:?} at byte {offset}")]
    Malformed {
        /// Specifier text as written
        specifier: String,
        /// Byte offset of the specifier in the template
        offset: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Text,
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Next(Conversion),
    Indexed(usize, Conversion),
}

fn specifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)%(?:([0-9]+)\$)?(.?)").expect("format specifier pattern is valid")
    })
}

/// A parsed locator template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in specifier_pattern().captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Literal(source[last..whole.start()].to_string()));
            }
            let malformed = || TemplateError::Malformed {
                specifier: whole.as_str().to_string(),
                offset: whole.start(),
            };

            let conversion = match caps.get(2).map_or("", |m| m.as_str()) {
                "s" => Some(Conversion::Text),
                "d" => Some(Conversion::Integer),
                "%" | "n" if caps.get(1).is_some() => return Err(malformed()),
                "%" => None,
                "n" => {
                    segments.push(Segment::Literal("\n".to_string()));
                    last = whole.end();
                    continue;
                }
                _ => return Err(malformed()),
            };

            let segment = match (caps.get(1), conversion) {
                (_, None) => Segment::Literal("%".to_string()),
                (None, Some(conversion)) => Segment::Next(conversion),
                (Some(digits), Some(conversion)) => {
                    let index: usize = digits.as_str().parse().map_err(|_| malformed())?;
                    if index == 0 {
                        return Err(malformed());
                    }
                    Segment::Indexed(index, conversion)
                }
            };
            segments.push(segment);
            last = whole.end();
        }

        if last < source.len() {
            segments.push(Segment::Literal(source[last..].to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template as written in the catalog
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of arguments the template needs
    #[must_use]
    pub fn slot_count(&self) -> usize {
        let mut sequential = 0;
        let mut highest = 0;
        for segment in &self.segments {
            match segment {
                Segment::Next(_) => sequential += 1,
                Segment::Indexed(index, _) => highest = highest.max(*index),
                Segment::Literal(_) => {}
            }
        }
        sequential.max(highest)
    }

    /// Substitute `args` into the template left to right
    pub fn render(&self, args: &[&str]) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Next(conversion) => {
                    cursor += 1;
                    out.push_str(argument(args, cursor, *conversion)?);
                }
                Segment::Indexed(index, conversion) => {
                    out.push_str(argument(args, *index, *conversion)?);
                }
            }
        }

        Ok(out)
    }
}

fn argument<'a>(
    args: &[&'a str],
    index: usize,
    conversion: Conversion,
) -> Result<&'a str, TemplateError> {
    let value = args
        .get(index - 1)
        .copied()
        .ok_or(TemplateError::MissingArgument {
            index,
            supplied: args.len(),
        })?;
    if conversion == Conversion::Integer && value.parse::<i64>().is_err() {
        return Err(TemplateError::NotAnInteger {
            index,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Parse and render in one step
pub fn format_template(template: &str, args: &[&str]) -> Result<String, TemplateError> {
    Template::parse(template)?.render(args)
}
