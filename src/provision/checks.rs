use crate::error::AppError;
use crate::platform::types::InstallationContext;
use crate::platform::Platform;

use super::outcome::{ErrorCode, ProvisionFailure};

/// Find the app installation for `organization` and mint an installation token for it.
///
/// Lists every installation visible to the app, so cost grows with the
/// number of installations. Acceptable for a low-frequency operation.
pub async fn resolve_installation(
    platform: &dyn Platform,
    organization: &str,
) -> Result<InstallationContext, ProvisionFailure> {
    let installations = platform.list_installations().await?;

    let installation = installations
        .into_iter()
        .find(|i| i.account_login == organization)
        .ok_or_else(|| {
            ProvisionFailure::new(
                ErrorCode::AppNotInstalled,
                format!("GitHub App is not installed for organization: {organization}"),
            )
        })?;

    let token = platform.installation_token(installation.id).await?;

    tracing::debug!(installation_id = installation.id, "Resolved installation");

    Ok(InstallationContext {
        installation_id: installation.id,
        organization: organization.to_string(),
        token,
    })
}

/// Confirm `username` is a member of `organization`.
pub async fn check_membership(
    platform: &dyn Platform,
    ctx: &InstallationContext,
    organization: &str,
    username: &str,
) -> Result<(), ProvisionFailure> {
    platform
        .get_membership(ctx, organization, username)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => ProvisionFailure::new(
                ErrorCode::UserNotOrganizationMember,
                format!("User {username} is not a member of organization {organization}"),
            ),
            AppError::Forbidden(_) => ProvisionFailure::new(
                ErrorCode::MembershipVerificationForbidden,
                format!(
                    "Cannot verify membership for {username} in {organization} - insufficient permissions"
                ),
            ),
            other => ProvisionFailure::new(
                ErrorCode::MembershipVerificationFailed,
                format!(
                    "Failed to verify membership for {username}: {}",
                    other.upstream_message()
                ),
            ),
        })
}

/// Confirm no repository named `repository_name` exists in `organization`.
///
/// Only a 404 from the lookup lets the workflow proceed.
pub async fn check_availability(
    platform: &dyn Platform,
    ctx: &InstallationContext,
    organization: &str,
    repository_name: &str,
) -> Result<(), ProvisionFailure> {
    match platform
        .get_repository(ctx, organization, repository_name)
        .await
    {
        Ok(_) => Err(ProvisionFailure::new(
            ErrorCode::RepositoryAlreadyExists,
            format!("Repository {organization}/{repository_name} already exists"),
        )),
        Err(AppError::NotFound(_)) => Ok(()),
        Err(e) => Err(ProvisionFailure::new(
            ErrorCode::RepositoryAvailabilityCheckFailed,
            format!(
                "Failed to verify repository availability: {}",
                e.upstream_message()
            ),
        )),
    }
}
