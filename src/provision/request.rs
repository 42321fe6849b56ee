use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::outcome::{ErrorCode, ProvisionFailure};

/// Repository access tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
    Internal,
}

impl Visibility {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "internal" => Some(Visibility::Internal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
        }
    }
}

/// Request body as sent by the caller; nothing is guaranteed about it yet.
///
/// Fields are kept as raw JSON so a wrongly typed field is judged on its own
/// and does not invalidate the rest of the body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProvisionRequest {
    pub organization: Option<Value>,
    pub repository_name: Option<Value>,
    pub repository_admin: Option<Value>,
    pub visibility: Option<Value>,
}

impl RawProvisionRequest {
    /// Parse a JSON body. A body that is not a JSON object is treated as
    /// empty, so it fails required-parameter validation.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(error = %e, "Unparseable provisioning request body");
                Self::default()
            }
        }
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_ref().and_then(Value::as_str)
    }

    pub fn repository_name(&self) -> Option<&str> {
        self.repository_name.as_ref().and_then(Value::as_str)
    }
}

/// A validated provisioning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub organization: String,
    pub repository_name: String,
    pub repository_admin: Option<String>,
    pub visibility: Visibility,
}

/// A non-empty JSON string, or `None` for anything else.
fn non_empty_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// `null`, `false`, `0` and `""` count as not supplied.
fn is_supplied(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Validate the caller-supplied fields. Pure: no I/O.
pub fn validate(raw: RawProvisionRequest) -> Result<ProvisionRequest, ProvisionFailure> {
    let (organization, repository_name) = match (
        non_empty_string(raw.organization),
        non_empty_string(raw.repository_name),
    ) {
        (Some(org), Some(name)) => (org, name),
        _ => {
            return Err(ProvisionFailure::new(
                ErrorCode::MissingRequiredParameters,
                "Missing required parameters: organization and repositoryName",
            ))
        }
    };

    let visibility = match raw.visibility.filter(is_supplied) {
        None => Visibility::default(),
        Some(value) => value
            .as_str()
            .and_then(Visibility::parse)
            .ok_or_else(|| {
                ProvisionFailure::new(
                    ErrorCode::InvalidVisibility,
                    "Invalid visibility parameter. Must be 'public', 'private', or 'internal'",
                )
            })?,
    };

    // Usernames are strings; any other admin value is ignored.
    let repository_admin = non_empty_string(raw.repository_admin);

    Ok(ProvisionRequest {
        organization,
        repository_name,
        repository_admin,
        visibility,
    })
}
