use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::error::AppError;

use super::request::Visibility;

/// Every way a provisioning request can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingRequiredParameters,
    InvalidVisibility,
    MissingApiKey,
    InvalidApiKey,
    AppNotInstalled,
    UserNotOrganizationMember,
    MembershipVerificationForbidden,
    MembershipVerificationFailed,
    RepositoryAlreadyExists,
    RepositoryAvailabilityCheckFailed,
    RepositoryCreationFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingRequiredParameters => "MISSING_REQUIRED_PARAMETERS",
            ErrorCode::InvalidVisibility => "INVALID_VISIBILITY",
            ErrorCode::MissingApiKey => "MISSING_API_KEY",
            ErrorCode::InvalidApiKey => "INVALID_API_KEY",
            ErrorCode::AppNotInstalled => "APP_NOT_INSTALLED",
            ErrorCode::UserNotOrganizationMember => "USER_NOT_ORGANIZATION_MEMBER",
            ErrorCode::MembershipVerificationForbidden => "MEMBERSHIP_VERIFICATION_FORBIDDEN",
            ErrorCode::MembershipVerificationFailed => "MEMBERSHIP_VERIFICATION_FAILED",
            ErrorCode::RepositoryAlreadyExists => "REPOSITORY_ALREADY_EXISTS",
            ErrorCode::RepositoryAvailabilityCheckFailed => "REPOSITORY_AVAILABILITY_CHECK_FAILED",
            ErrorCode::RepositoryCreationFailed => "REPOSITORY_CREATION_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terminal error from a gating step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ProvisionFailure {
    pub code: ErrorCode,
    pub message: String,
}

impl ProvisionFailure {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn creation_failed(upstream_message: &str) -> Self {
        Self::new(
            ErrorCode::RepositoryCreationFailed,
            format!("Failed to create repository: {upstream_message}"),
        )
    }
}

// Anything a gating step did not map explicitly ends up here.
impl From<AppError> for ProvisionFailure {
    fn from(e: AppError) -> Self {
        Self::creation_failed(&e.upstream_message())
    }
}

/// Result of one provisioning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Success {
        full_name: String,
        organization: String,
        repository_name: String,
        url: String,
        admin: Option<String>,
        visibility: Visibility,
    },
    Failure {
        error_code: ErrorCode,
        message: String,
    },
}

impl From<ProvisionFailure> for WorkflowOutcome {
    fn from(failure: ProvisionFailure) -> Self {
        WorkflowOutcome::Failure {
            error_code: failure.code,
            message: failure.message,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDescriptor {
    pub name: String,
    pub organization: String,
    pub full_name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    pub visibility: Visibility,
}

/// JSON body returned by the provisioning endpoint.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProvisionResponse {
    #[serde(rename_all = "camelCase")]
    Success {
        success: bool,
        message: String,
        timestamp: String,
        repository: RepositoryDescriptor,
    },
    #[serde(rename_all = "camelCase")]
    Failure {
        success: bool,
        error_code: ErrorCode,
        message: String,
        timestamp: String,
    },
}

/// ISO-8601 UTC timestamp with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<WorkflowOutcome> for ProvisionResponse {
    fn from(outcome: WorkflowOutcome) -> Self {
        match outcome {
            WorkflowOutcome::Success {
                full_name,
                organization,
                repository_name,
                url,
                admin,
                visibility,
            } => {
                let admin_message = admin
                    .as_deref()
                    .map(|a| format!(" with {a} as admin"))
                    .unwrap_or_default();
                ProvisionResponse::Success {
                    success: true,
                    message: format!(
                        "Repository {full_name} created successfully{admin_message}. \
                         A setup issue with best practices has been created automatically."
                    ),
                    timestamp: timestamp(),
                    repository: RepositoryDescriptor {
                        name: repository_name,
                        organization,
                        full_name,
                        url,
                        admin,
                        visibility,
                    },
                }
            }
            WorkflowOutcome::Failure {
                error_code,
                message,
            } => ProvisionResponse::Failure {
                success: false,
                error_code,
                message,
                timestamp: timestamp(),
            },
        }
    }
}
