//! Operations an agent asks the gate to verify

use crate::{GatekeeperError, Result};
use serde::{Deserialize, Serialize};
use specgate_domain::{Conflict, Specification};

/// Action name for asking the user a question
pub const ACTION_GENERATE_QUESTION: &str = "generate_question";

/// Action name for generating code from the specifications
pub const ACTION_GENERATE_CODE: &str = "generate_code";

/// Loosely-typed operation payload, as received from a caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationData {
    /// Question to check (`generate_question`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,

    /// Project specifications (`generate_code`)
    pub specifications: Vec<Specification>,

    /// Stored conflict records (`generate_code`)
    pub conflicts: Vec<Conflict>,
}

impl OperationData {
    /// Payload for a question check
    pub fn question(text: impl Into<String>) -> Self {
        Self {
            question_text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Payload for a code generation check
    pub fn code_generation(specifications: Vec<Specification>, conflicts: Vec<Conflict>) -> Self {
        Self {
            question_text: None,
            specifications,
            conflicts,
        }
    }
}

/// What the gate checks, resolved once from an action name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationCheck {
    /// Run bias detection on a question
    Question {
        /// The proposed question
        question_text: String,
    },

    /// Run coverage and conflict checks
    CodeGeneration {
        /// Project specifications
        specifications: Vec<Specification>,
        /// Stored conflict records
        conflicts: Vec<Conflict>,
    },

    /// An action the gate has no checks for
    Noop {
        /// The action name as given
        action: String,
    },
}

fn is_action_identifier(action: &str) -> bool {
    let mut chars = action.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

impl OperationCheck {
    /// Resolve an action name and its payload
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed action name (anything but
    /// `[a-z][a-z0-9_]*`) or a question check without question text.
    pub fn resolve(action: &str, data: OperationData) -> Result<Self> {
        if !is_action_identifier(action) {
            return Err(GatekeeperError::validation(
                "action",
                format!("'{}' is not a valid action identifier", action),
            ));
        }

        match action {
            ACTION_GENERATE_QUESTION => {
                let question_text = data.question_text.ok_or_else(|| {
                    GatekeeperError::validation("question_text", "required for generate_question")
                })?;
                Ok(OperationCheck::Question { question_text })
            }
            ACTION_GENERATE_CODE => Ok(OperationCheck::CodeGeneration {
                specifications: data.specifications,
                conflicts: data.conflicts,
            }),
            other => Ok(OperationCheck::Noop {
                action: other.to_string(),
            }),
        }
    }

    /// Action name this check corresponds to
    pub fn action(&self) -> &str {
        match self {
            OperationCheck::Question { .. } => ACTION_GENERATE_QUESTION,
            OperationCheck::CodeGeneration { .. } => ACTION_GENERATE_CODE,
            OperationCheck::Noop { action } => action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_question() {
        let check = OperationCheck::resolve("generate_question", OperationData::question("Why?")).unwrap();
        assert_eq!(
            check,
            OperationCheck::Question {
                question_text: "Why?".to_string()
            }
        );
        assert_eq!(check.action(), ACTION_GENERATE_QUESTION);
    }

    #[test]
    fn test_question_text_required() {
        let err = OperationCheck::resolve("generate_question", OperationData::default()).unwrap_err();
        assert!(matches!(err, GatekeeperError::Validation { ref field, .. } if field == "question_text"));
    }

    #[test]
    fn test_unknown_action_is_noop() {
        let check = OperationCheck::resolve("update_readme", OperationData::default()).unwrap();
        assert_eq!(check.action(), "update_readme");
        assert!(matches!(check, OperationCheck::Noop { .. }));
    }

    #[test]
    fn test_malformed_actions_rejected() {
        for action in ["", "Generate_Code", "1st", "generate-code", "code gen"] {
            assert!(
                OperationCheck::resolve(action, OperationData::default()).is_err(),
                "{:?} should be rejected",
                action
            );
        }
    }

    #[test]
    fn test_operation_data_from_json() {
        let data: OperationData =
            serde_json::from_str(r#"{"question_text": "Should we use Redis?"}"#).unwrap();
        assert_eq!(data.question_text.as_deref(), Some("Should we use Redis?"));
        assert!(data.specifications.is_empty());
    }
}
