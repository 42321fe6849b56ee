use serde::Serialize;

/// An installation of the GitHub App.
#[derive(Debug, Clone)]
pub struct Installation {
    pub id: u64,
    /// Login of the account (organization or user) the app is installed on.
    pub account_login: String,
}

/// Installation-scoped access for one organization.
///
/// Owned by a single provisioning request; never cached or shared.
#[derive(Clone)]
pub struct InstallationContext {
    pub installation_id: u64,
    pub organization: String,
    pub token: String,
}

// Manual Debug impl to avoid leaking the installation token
impl std::fmt::Debug for InstallationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallationContext")
            .field("installation_id", &self.installation_id)
            .field("organization", &self.organization)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    pub full_name: String,
    pub html_url: String,
}

impl RepoInfo {
    /// Owner and name as reported by the platform, split from `full_name`.
    pub fn owner_and_name(&self) -> Option<(&str, &str)> {
        self.full_name.split_once('/')
    }
}

/// Body of `POST /orgs/{org}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRepository {
    pub name: String,
    pub description: String,
    pub auto_init: bool,
    pub private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

/// Collaborator permission granted by the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_and_name() {
        let repo = RepoInfo {
            full_name: "Acme/Widgets".to_string(),
            html_url: "https://github.com/Acme/Widgets".to_string(),
        };
        assert_eq!(repo.owner_and_name(), Some(("Acme", "Widgets")));

        let repo = RepoInfo {
            full_name: "widgets".to_string(),
            html_url: String::new(),
        };
        assert_eq!(repo.owner_and_name(), None);
    }

    #[test]
    fn test_permission_wire_name() {
        assert_eq!(serde_json::to_value(Permission::Admin).unwrap(), "admin");
    }
}
