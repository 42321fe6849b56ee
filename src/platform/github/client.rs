use async_trait::async_trait;
use jsonwebtoken::EncodingKey;
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::json;
use urlencoding::encode;

use crate::config::GitHubConfig;
use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::Platform;

use super::auth::{generate_app_jwt, load_private_key};
use super::mapper;

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    token: String,
}

/// GitHub App backed implementation of [`Platform`].
///
/// Holds only immutable app credentials. Installation tokens are minted per
/// request and handed back to the caller inside an [`InstallationContext`].
pub struct GitHubPlatform {
    app_id: u64,
    api_url: Option<String>,
    private_key: EncodingKey,
}

impl GitHubPlatform {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        if !config.private_key_path.exists() {
            return Err(AppError::Config(format!(
                "GitHub App private key not found at: {}",
                config.private_key_path.display()
            )));
        }

        Ok(Self {
            app_id: config.app_id,
            api_url: config.api_url.clone(),
            private_key: load_private_key(&config.private_key_path)?,
        })
    }

    fn client_with_token(&self, token: String) -> Result<Octocrab> {
        let mut builder = Octocrab::builder().personal_token(token);
        if let Some(url) = &self.api_url {
            builder = builder
                .base_uri(url.as_str())
                .map_err(|e| AppError::Config(format!("Invalid GitHub API URL {url}: {e}")))?;
        }
        builder
            .build()
            .map_err(|e| AppError::GitHubApi(format!("Failed to build octocrab client: {e}")))
    }

    /// Get an octocrab instance authenticated as the app itself.
    fn app_client(&self) -> Result<Octocrab> {
        let jwt = generate_app_jwt(self.app_id, &self.private_key)?;
        self.client_with_token(jwt)
    }

    /// Get an octocrab instance authenticated as an installation.
    fn installation_client(&self, ctx: &InstallationContext) -> Result<Octocrab> {
        self.client_with_token(ctx.token.clone())
    }
}

#[async_trait]
impl Platform for GitHubPlatform {
    async fn list_installations(&self) -> Result<Vec<Installation>> {
        let client = self.app_client()?;

        let first_page = client
            .apps()
            .installations()
            .per_page(100)
            .send()
            .await?;
        let installations = client.all_pages(first_page).await?;

        Ok(installations
            .into_iter()
            .map(mapper::map_installation)
            .collect())
    }

    async fn installation_token(&self, installation_id: u64) -> Result<String> {
        let client = self.app_client()?;

        let url = format!("/app/installations/{installation_id}/access_tokens");
        let response: AccessTokenResponse = client.post(&url, None::<&()>).await.map_err(|e| {
            AppError::GitHubApi(format!("Failed to create installation token: {e}"))
        })?;

        Ok(response.token)
    }

    async fn get_membership(
        &self,
        ctx: &InstallationContext,
        org: &str,
        username: &str,
    ) -> Result<()> {
        let client = self.installation_client(ctx)?;

        let url = format!("/orgs/{}/memberships/{}", encode(org), encode(username));
        let _: serde_json::Value = client.get(&url, None::<&()>).await?;

        Ok(())
    }

    async fn get_repository(
        &self,
        ctx: &InstallationContext,
        owner: &str,
        repo: &str,
    ) -> Result<RepoInfo> {
        let client = self.installation_client(ctx)?;

        let repository = client.repos(owner, repo).get().await?;

        mapper::map_repository(repository)
    }

    async fn create_repository(
        &self,
        ctx: &InstallationContext,
        org: &str,
        params: &CreateRepository,
    ) -> Result<RepoInfo> {
        let client = self.installation_client(ctx)?;

        let url = format!("/orgs/{}/repos", encode(org));
        let repository: octocrab::models::Repository = client.post(&url, Some(params)).await?;

        mapper::map_repository(repository)
    }

    async fn add_collaborator(
        &self,
        ctx: &InstallationContext,
        owner: &str,
        repo: &str,
        username: &str,
        permission: Permission,
    ) -> Result<()> {
        let client = self.installation_client(ctx)?;

        let url = format!(
            "/repos/{}/{}/collaborators/{}",
            encode(owner),
            encode(repo),
            encode(username)
        );
        let body = json!({ "permission": permission });
        match client.put::<serde_json::Value, _, _>(&url, Some(&body)).await {
            Ok(_) => Ok(()),
            // 204 No Content (already a collaborator) has an empty body
            Err(octocrab::Error::Json { .. }) | Err(octocrab::Error::Serde { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_issue(
        &self,
        ctx: &InstallationContext,
        owner: &str,
        repo: &str,
        issue: &CreateIssue,
    ) -> Result<()> {
        let client = self.installation_client(ctx)?;

        client
            .issues(owner, repo)
            .create(&issue.title)
            .body(&issue.body)
            .labels(issue.labels.clone())
            .send()
            .await?;

        Ok(())
    }
}
