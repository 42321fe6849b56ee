use std::path::Path;

use crate::error::{AppError, Result};
use crate::platform::types::{CreateIssue, InstallationContext, Permission, RepoInfo};
use crate::platform::Platform;

use super::template::{load_setup_issue, SetupIssueData};

pub const SETUP_ISSUE_TITLE: &str = "🎉 Repository Created Successfully - Getting Started Guide";
pub const SETUP_ISSUE_LABELS: [&str; 3] = ["documentation", "good first issue", "setup"];

fn split_full_name(repo: &RepoInfo) -> Result<(&str, &str)> {
    repo.owner_and_name()
        .ok_or_else(|| AppError::Internal(format!("Invalid repo name: {}", repo.full_name)))
}

// Both steps log their failures and never change the outcome of the request.

/// Grant `admin` administrator access on the new repository.
pub async fn assign_admin(
    platform: &dyn Platform,
    ctx: &InstallationContext,
    repo: &RepoInfo,
    admin: &str,
) {
    let result = async {
        let (owner, name) = split_full_name(repo)?;
        platform
            .add_collaborator(ctx, owner, name, admin, Permission::Admin)
            .await
    }
    .await;

    match result {
        Ok(()) => tracing::info!(
            repository = %repo.full_name,
            admin = %admin,
            "Added repository admin"
        ),
        Err(e) => tracing::warn!(
            repository = %repo.full_name,
            admin = %admin,
            error = %e,
            "Failed to add repository admin"
        ),
    }
}

/// Open the setup issue in the new repository.
pub async fn publish_setup_issue(
    platform: &dyn Platform,
    ctx: &InstallationContext,
    repo: &RepoInfo,
    data: &SetupIssueData<'_>,
    template_path: &Path,
) {
    let result = async {
        let (owner, name) = split_full_name(repo)?;
        let issue = CreateIssue {
            title: SETUP_ISSUE_TITLE.to_string(),
            body: load_setup_issue(template_path, data).await,
            labels: SETUP_ISSUE_LABELS.iter().map(|l| l.to_string()).collect(),
        };
        platform.create_issue(ctx, owner, name, &issue).await
    }
    .await;

    match result {
        Ok(()) => tracing::info!(
            repository = %repo.full_name,
            admin = ?data.repository_admin,
            "Created setup issue"
        ),
        Err(e) => tracing::warn!(
            repository = %repo.full_name,
            error = %e,
            "Failed to create setup issue"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::{FakePlatform, Reply};

    fn ctx() -> InstallationContext {
        InstallationContext {
            installation_id: 42,
            organization: "acme".to_string(),
            token: "token-42".to_string(),
        }
    }

    fn repo(full_name: &str) -> RepoInfo {
        RepoInfo {
            full_name: full_name.to_string(),
            html_url: format!("https://github.com/{full_name}"),
        }
    }

    #[tokio::test]
    async fn test_assign_admin_uses_canonical_name() {
        let platform = FakePlatform::installed_on("acme");

        assign_admin(&platform, &ctx(), &repo("Acme/Widgets"), "octocat").await;

        assert_eq!(
            platform.calls(),
            vec!["add_collaborator Acme/Widgets octocat Admin"]
        );
    }

    #[tokio::test]
    async fn test_assign_admin_failure_is_swallowed() {
        let mut platform = FakePlatform::installed_on("acme");
        platform.collaborator = Reply::Error;

        assign_admin(&platform, &ctx(), &repo("acme/widgets"), "octocat").await;
        assert!(platform.called("add_collaborator"));
    }

    #[tokio::test]
    async fn test_publish_setup_issue() {
        let platform = FakePlatform::installed_on("acme");
        let dir = tempfile::tempdir().unwrap();
        let data = SetupIssueData {
            organization: "acme",
            repository_name: "widgets",
            repository_admin: Some("octocat"),
        };

        publish_setup_issue(
            &platform,
            &ctx(),
            &repo("acme/widgets"),
            &data,
            &dir.path().join("missing.md"),
        )
        .await;

        let issues = platform.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].title, SETUP_ISSUE_TITLE);
        assert_eq!(issues[0].labels, vec!["documentation", "good first issue", "setup"]);
        assert!(issues[0].body.contains("@octocat"));
    }

    #[tokio::test]
    async fn test_publish_setup_issue_failure_is_swallowed() {
        let mut platform = FakePlatform::installed_on("acme");
        platform.issue = Reply::Forbidden;
        let data = SetupIssueData {
            organization: "acme",
            repository_name: "widgets",
            repository_admin: None,
        };

        publish_setup_issue(
            &platform,
            &ctx(),
            &repo("acme/widgets"),
            &data,
            Path::new("does/not/exist.md"),
        )
        .await;

        assert!(platform.called("create_issue"));
        assert!(platform.issues().is_empty());
    }
}
