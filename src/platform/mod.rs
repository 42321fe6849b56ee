pub mod github;
pub mod types;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::error::Result;
use types::*;

/// The GitHub operations the provisioning workflow depends on.
///
/// Errors for organization- and repository-scoped calls are classified:
/// a 404 surfaces as `AppError::NotFound`, a 403 as `AppError::Forbidden`.
#[async_trait]
pub trait Platform: Send + Sync {
    /// List all installations of this GitHub App.
    async fn list_installations(&self) -> Result<Vec<Installation>>;

    /// Exchange the app credential for an installation-scoped access token.
    async fn installation_token(&self, installation_id: u64) -> Result<String>;

    /// Fetch a user's membership in an organization.
    async fn get_membership(
        &self,
        ctx: &InstallationContext,
        org: &str,
        username: &str,
    ) -> Result<()>;

    /// Fetch a repository by owner and name.
    async fn get_repository(
        &self,
        ctx: &InstallationContext,
        owner: &str,
        repo: &str,
    ) -> Result<RepoInfo>;

    /// Create a repository in an organization.
    async fn create_repository(
        &self,
        ctx: &InstallationContext,
        org: &str,
        params: &CreateRepository,
    ) -> Result<RepoInfo>;

    /// Add (or invite) a collaborator with the given permission.
    async fn add_collaborator(
        &self,
        ctx: &InstallationContext,
        owner: &str,
        repo: &str,
        username: &str,
        permission: Permission,
    ) -> Result<()>;

    /// Create an issue with labels.
    async fn create_issue(
        &self,
        ctx: &InstallationContext,
        owner: &str,
        repo: &str,
        issue: &CreateIssue,
    ) -> Result<()>;
}
