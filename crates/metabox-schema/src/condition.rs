use crate::types::Operator;
use serde::{Deserialize, Serialize};

///
/// VisibilityDirective
///
/// Renderer-agnostic show/hide directive attached to a field's rendered
/// wrapper. The condition expression references other field ids/values and
/// is interpreted client-side; the core only validates the operator token
/// against the whitelist and forwards both parts.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct VisibilityDirective {
    pub condition: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

impl VisibilityDirective {
    /// Encode a declared condition/operator pair. No directive without a
    /// condition; a token outside the whitelist drops only the operator.
    #[must_use]
    pub fn encode(condition: &str, operator: &str) -> Option<Self> {
        if condition.is_empty() {
            return None;
        }

        Some(Self {
            condition: condition.to_string(),
            operator: Operator::from_token(operator),
        })
    }
}

///
/// TESTS
///
