use crate::error::{AppError, Result};
use crate::platform::types;

pub fn map_installation(installation: octocrab::models::Installation) -> types::Installation {
    types::Installation {
        id: installation.id.into_inner(),
        account_login: installation.account.login,
    }
}

/// Map an octocrab Repository to the canonical identifiers the workflow uses.
pub fn map_repository(repo: octocrab::models::Repository) -> Result<types::RepoInfo> {
    let full_name = repo
        .full_name
        .ok_or_else(|| AppError::GitHubApi("Repository response is missing full_name".to_string()))?;
    let html_url = repo
        .html_url
        .ok_or_else(|| AppError::GitHubApi("Repository response is missing html_url".to_string()))?;

    Ok(types::RepoInfo {
        full_name,
        html_url: html_url.to_string(),
    })
}
