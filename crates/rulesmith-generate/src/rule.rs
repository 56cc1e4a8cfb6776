//! The structured rule shape the model is asked to produce.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A firewall rule decoded from a model reply.
///
/// Every field is optional on the wire. Models drift: a reply that omits
/// `warnings` or `needs_clarification` still decodes, with the field at its
/// zero value. Only a reply with no rule object at all is rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedRule {
    /// The firewall expression, e.g.
    /// `(ip.geoip.country eq "RU" and http.request.uri.path eq "/login")`.
    /// Empty when the model asked for clarification.
    #[serde(default)]
    pub expression: String,

    /// Structured rule object (action, expression, description). Passed
    /// through opaquely.
    #[serde(default)]
    pub json_rule: Value,

    /// Short human-readable rationale.
    #[serde(default)]
    pub explanation: String,

    /// Safety caveats the model attached, e.g. a warning that the rule
    /// blocks an entire country.
    #[serde(default)]
    pub warnings: Vec<String>,

    /// True when the request was too ambiguous to generate a rule. The
    /// expression is empty in that case.
    #[serde(default)]
    pub needs_clarification: bool,
}
