pub mod api_key;
pub mod checks;
pub mod create;
pub mod follow_up;
pub mod outcome;
pub mod request;
pub mod template;

use tracing::Instrument;

use crate::server::AppState;

use outcome::{ProvisionFailure, WorkflowOutcome};
use request::RawProvisionRequest;
use template::SetupIssueData;

/// Run the whole workflow for one request.
///
/// Gating steps run strictly in order and the first [`ProvisionFailure`] ends
/// the request. Once the repository exists, the admin grant and the setup
/// issue are best-effort. `presented_api_key` is the credential the caller
/// sent, if any.
pub async fn provision(
    state: &AppState,
    presented_api_key: Option<&str>,
    raw: RawProvisionRequest,
) -> WorkflowOutcome {
    let span = tracing::info_span!(
        "provision",
        organization = raw.organization().unwrap_or_default(),
        repository = raw.repository_name().unwrap_or_default(),
    );

    async move {
        let outcome = match run(state, presented_api_key, raw).await {
            Ok(outcome) => outcome,
            Err(failure) => failure.into(),
        };

        match &outcome {
            WorkflowOutcome::Success { full_name, url, .. } => {
                tracing::info!(repository = %full_name, url = %url, "Repository provisioned");
            }
            WorkflowOutcome::Failure {
                error_code,
                message,
            } => {
                tracing::warn!(error_code = %error_code, message = %message, "Provisioning refused");
            }
        }

        outcome
    }
    .instrument(span)
    .await
}

async fn run(
    state: &AppState,
    presented_api_key: Option<&str>,
    raw: RawProvisionRequest,
) -> Result<WorkflowOutcome, ProvisionFailure> {
    let request = request::validate(raw)?;
    api_key::authenticate(state.config.required_api_key(), presented_api_key)?;

    let platform = state.platform.as_ref();
    let organization = request.organization.as_str();

    let ctx = checks::resolve_installation(platform, organization).await?;

    if let Some(admin) = &request.repository_admin {
        checks::check_membership(platform, &ctx, organization, admin).await?;
    }

    checks::check_availability(platform, &ctx, organization, &request.repository_name).await?;

    let repo = create::create_repository(platform, &ctx, &request).await?;

    tracing::info!(
        repository = %repo.full_name,
        visibility = request.visibility.as_str(),
        "Repository created"
    );

    let (owner, name) = repo
        .owner_and_name()
        .unwrap_or((organization, request.repository_name.as_str()));
    let issue_data = SetupIssueData {
        organization: owner,
        repository_name: name,
        repository_admin: request.repository_admin.as_deref(),
    };

    let grant_admin = async {
        if let Some(admin) = &request.repository_admin {
            follow_up::assign_admin(platform, &ctx, &repo, admin).await;
        }
    };
    let setup_issue = follow_up::publish_setup_issue(
        platform,
        &ctx,
        &repo,
        &issue_data,
        &state.config.issue.template_path,
    );
    tokio::join!(grant_admin, setup_issue);

    Ok(WorkflowOutcome::Success {
        full_name: repo.full_name,
        organization: request.organization,
        repository_name: request.repository_name,
        url: repo.html_url,
        admin: request.repository_admin,
        visibility: request.visibility,
    })
}
