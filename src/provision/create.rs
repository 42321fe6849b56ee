use crate::platform::types::{CreateRepository, InstallationContext, RepoInfo};
use crate::platform::Platform;

use super::outcome::ProvisionFailure;
use super::request::{ProvisionRequest, Visibility};

/// Build the body of the repository creation call.
///
/// `private` is always sent; `visibility` only for public and internal repositories.
pub fn repository_params(request: &ProvisionRequest) -> CreateRepository {
    let description = match &request.repository_admin {
        Some(admin) => format!("Repository created via API by {admin}"),
        None => "Repository created via API".to_string(),
    };

    let (private, visibility) = match request.visibility {
        Visibility::Private => (true, None),
        Visibility::Public | Visibility::Internal => {
            (false, Some(request.visibility.as_str().to_string()))
        }
    };

    CreateRepository {
        name: request.repository_name.clone(),
        description,
        auto_init: true,
        private,
        visibility,
    }
}

/// Create the repository and return the platform's canonical identifiers.
pub async fn create_repository(
    platform: &dyn Platform,
    ctx: &InstallationContext,
    request: &ProvisionRequest,
) -> Result<RepoInfo, ProvisionFailure> {
    let params = repository_params(request);

    platform
        .create_repository(ctx, &request.organization, &params)
        .await
        .map_err(|e| ProvisionFailure::creation_failed(&e.upstream_message()))
}
