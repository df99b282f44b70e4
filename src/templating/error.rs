//! Structured template errors.

use thiserror::Error;

/// Why a chapter could not be rendered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The chapter uses a variable the context does not define
    #[error("Template variable not found: '{variable}'")]
    VariableNotFound {
        /// Dotted variable name as written in the chapter
        variable: String,
        /// Up to three defined variables with similar names
        suggestions: Vec<String>,
        /// Every variable the chapter could have used
        available_variables: Vec<String>,
    },

    /// The chapter is not a valid template
    #[error("Template syntax error: {message}")]
    SyntaxError {
        /// Cleaned-up message from the template engine
        message: String,
        /// 1-based line of the error, when the engine reports one
        line: Option<usize>,
    },
}

impl TemplateError {
    /// Multi-line description for the `details:` line of an error report.
    #[must_use]
    pub fn format_with_context(&self) -> String {
        match self {
            Self::VariableNotFound {
                variable,
                suggestions,
                available_variables,
            } => {
                let mut msg = format!("Variable '{variable}' is not defined");
                if !suggestions.is_empty() {
                    msg.push_str("\nDid you mean one of these?");
                    for suggestion in suggestions {
                        msg.push_str(&format!("\n  - {suggestion}"));
                    }
                }
                if !available_variables.is_empty() {
                    msg.push_str("\nAvailable variables:");
                    for var in available_variables {
                        msg.push_str(&format!("\n  {var}"));
                    }
                }
                msg
            }
            Self::SyntaxError {
                message,
                line: Some(line),
            } => format!("Line {line}: {message}"),
            Self::SyntaxError {
                message,
                line: None,
            } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_not_found_lists_suggestions() {
        let err = TemplateError::VariableNotFound {
            variable: "folio.verison".to_string(),
            suggestions: vec!["folio.version".to_string()],
            available_variables: vec!["folio.version".to_string(), "conf.author".to_string()],
        };

        assert_eq!(err.to_string(), "Template variable not found: 'folio.verison'");
        let details = err.format_with_context();
        assert!(details.contains("Did you mean one of these?\n  - folio.version"));
        assert!(details.contains("conf.author"));
    }

    #[test]
    fn test_syntax_error_with_line() {
        let err = TemplateError::SyntaxError {
            message: "unexpected end".to_string(),
            line: Some(4),
        };
        assert_eq!(err.format_with_context(), "Line 4: unexpected end");
    }
}
