use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::Platform;

/// Scripted response for calls that can fail with a classified status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Ok,
    NotFound,
    Forbidden,
    Error,
}

impl Reply {
    fn into_result(self, what: &str) -> Result<()> {
        match self {
            Reply::Ok => Ok(()),
            Reply::NotFound => Err(AppError::NotFound(format!("{what}: Not Found"))),
            Reply::Forbidden => Err(AppError::Forbidden(format!("{what}: Forbidden"))),
            Reply::Error => Err(AppError::GitHubApi(format!("{what}: Server Error"))),
        }
    }
}

/// In-memory [`Platform`] with scripted replies and a call log.
pub struct FakePlatform {
    pub installations: Vec<Installation>,
    pub list_installations: Reply,
    pub token: Reply,
    pub membership: Reply,
    /// Replies to lookups of repositories this fake has not created; `Ok` means it exists.
    pub existing_repo: Reply,
    pub create: Reply,
    pub collaborator: Reply,
    pub issue: Reply,
    /// Overrides the full name the platform reports on creation.
    pub canonical_full_name: Option<String>,
    /// Panic inside `create_repository`, after recording the call.
    pub panic_on_create: bool,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<CreateRepository>>,
    issues: Mutex<Vec<CreateIssue>>,
}

impl FakePlatform {
    /// A platform with `org` installed, where every call succeeds and no repository exists.
    pub fn installed_on(org: &str) -> Self {
        Self {
            installations: vec![
                Installation {
                    id: 7,
                    account_login: "someone-else".to_string(),
                },
                Installation {
                    id: 42,
                    account_login: org.to_string(),
                },
            ],
            list_installations: Reply::Ok,
            token: Reply::Ok,
            membership: Reply::Ok,
            existing_repo: Reply::NotFound,
            create: Reply::Ok,
            collaborator: Reply::Ok,
            issue: Reply::Ok,
            canonical_full_name: None,
            panic_on_create: false,
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            issues: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, op: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(op))
    }

    pub fn created(&self) -> Vec<CreateRepository> {
        self.created.lock().unwrap().clone()
    }

    pub fn issues(&self) -> Vec<CreateIssue> {
        self.issues.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn list_installations(&self) -> Result<Vec<Installation>> {
        self.record("list_installations".to_string());
        self.list_installations.into_result("installations")?;
        Ok(self.installations.clone())
    }

    async fn installation_token(&self, installation_id: u64) -> Result<String> {
        self.record(format!("installation_token {installation_id}"));
        self.token.into_result("token")?;
        Ok(format!("token-{installation_id}"))
    }

    async fn get_membership(
        &self,
        _ctx: &InstallationContext,
        org: &str,
        username: &str,
    ) -> Result<()> {
        self.record(format!("get_membership {org} {username}"));
        self.membership.into_result("membership")
    }

    async fn get_repository(
        &self,
        _ctx: &InstallationContext,
        owner: &str,
        repo: &str,
    ) -> Result<RepoInfo> {
        self.record(format!("get_repository {owner}/{repo}"));
        let already_created = self.created.lock().unwrap().iter().any(|r| r.name == repo);
        if !already_created {
            self.existing_repo.into_result("repository")?;
        }
        Ok(RepoInfo {
            full_name: format!("{owner}/{repo}"),
            html_url: format!("https://github.com/{owner}/{repo}"),
        })
    }

    async fn create_repository(
        &self,
        _ctx: &InstallationContext,
        org: &str,
        params: &CreateRepository,
    ) -> Result<RepoInfo> {
        self.record(format!("create_repository {org}/{}", params.name));
        if self.panic_on_create {
            panic!("create_repository blew up");
        }
        self.create.into_result("create")?;
        self.created.lock().unwrap().push(params.clone());

        let full_name = self
            .canonical_full_name
            .clone()
            .unwrap_or_else(|| format!("{org}/{}", params.name));
        Ok(RepoInfo {
            html_url: format!("https://github.com/{full_name}"),
            full_name,
        })
    }

    async fn add_collaborator(
        &self,
        _ctx: &InstallationContext,
        owner: &str,
        repo: &str,
        username: &str,
        permission: Permission,
    ) -> Result<()> {
        self.record(format!(
            "add_collaborator {owner}/{repo} {username} {permission:?}"
        ));
        self.collaborator.into_result("collaborator")
    }

    async fn create_issue(
        &self,
        _ctx: &InstallationContext,
        owner: &str,
        repo: &str,
        issue: &CreateIssue,
    ) -> Result<()> {
        self.record(format!("create_issue {owner}/{repo}"));
        self.issue.into_result("issue")?;
        self.issues.lock().unwrap().push(issue.clone());
        Ok(())
    }
}
