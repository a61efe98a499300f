//! Pretend code execution.
//!
//! Nothing is compiled or run. The output is a canned line per language, or
//! for JavaScript and Python the string literal of the first `console.log` /
//! `print` call found in the source.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const EMPTY_SUBMISSION: &str = "Empty code submission";

static CONSOLE_LOG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"console\.log\(['"](.+)['"]\)"#).unwrap());
static PRINT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"print\(['"](.+)['"]\)"#).unwrap());

/// Languages accepted by the one-shot compile endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    Python,
    Java,
    Cpp,
}

#[derive(Debug, Error, PartialEq)]
#[error("Language '{0}' is not supported")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
        }
    }

    pub fn simulate(&self, code: &str) -> String {
        simulate_output(self.as_str(), code)
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "javascript" => Ok(Language::JavaScript),
            "python" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "cpp" => Ok(Language::Cpp),
            other => Err(UnsupportedLanguage(other.to_owned())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_empty_submission(code: &str) -> bool {
    code.trim().is_empty()
}

/// Accepts any language tag; unknown ones get a generic success line.
pub fn simulate_output(language: &str, code: &str) -> String {
    if is_empty_submission(code) {
        return format!("Error: {}", EMPTY_SUBMISSION);
    }

    match language {
        "javascript" => {
            if code.contains("console.log") {
                first_literal(&CONSOLE_LOG, code).unwrap_or_else(|| "Hello from JavaScript!".into())
            } else {
                "JavaScript code executed successfully.".into()
            }
        }
        "python" => {
            if code.contains("print") {
                first_literal(&PRINT, code).unwrap_or_else(|| "Hello from Python!".into())
            } else {
                "Python code executed successfully.".into()
            }
        }
        "java" => "Java code compiled and executed successfully.".into(),
        "cpp" => "C++ code compiled and executed successfully.".into(),
        other => format!("{} code executed successfully.", other),
    }
}

fn first_literal(pattern: &Regex, code: &str) -> Option<String> {
    pattern
        .captures(code)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_owned())
}
