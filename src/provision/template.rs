use std::path::Path;

const ADMIN_SECTION: &str = "{{#repositoryAdmin}}";
const NO_ADMIN_SECTION: &str = "{{^repositoryAdmin}}";
const SECTION_END: &str = "{{/repositoryAdmin}}";

/// Values substituted into the setup issue template.
#[derive(Debug, Clone)]
pub struct SetupIssueData<'a> {
    pub organization: &'a str,
    pub repository_name: &'a str,
    pub repository_admin: Option<&'a str>,
}

impl SetupIssueData<'_> {
    pub fn admin_mention(&self) -> String {
        match self.repository_admin {
            Some(admin) => format!("@{admin}"),
            None => "the repository admin".to_string(),
        }
    }
}

/// Render the setup issue body from the template at `path`, falling back
/// to the built-in body when the file cannot be read.
pub async fn load_setup_issue(path: &Path, data: &SetupIssueData<'_>) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(template) => render(&template, data),
        Err(e) => {
            tracing::debug!(
                path = %path.display(),
                error = %e,
                "Setup issue template unavailable, using built-in body"
            );
            default_body(data)
        }
    }
}

/// Substitute placeholders and resolve the `repositoryAdmin` sections.
///
/// `{{#repositoryAdmin}}..{{/repositoryAdmin}}` is kept only when an admin
/// was requested, `{{^repositoryAdmin}}..{{/repositoryAdmin}}` only when not.
pub fn render(template: &str, data: &SetupIssueData<'_>) -> String {
    let has_admin = data.repository_admin.is_some();

    let body = template
        .replace("{{organization}}", data.organization)
        .replace("{{repositoryName}}", data.repository_name);
    let body = resolve_sections(&body, ADMIN_SECTION, has_admin);
    let body = resolve_sections(&body, NO_ADMIN_SECTION, !has_admin);

    body.replace("{{adminMention}}", &data.admin_mention())
}

fn resolve_sections(template: &str, open_tag: &str, keep: bool) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(open_tag) {
        let after_open = &rest[start + open_tag.len()..];
        let Some(end) = after_open.find(SECTION_END) else {
            break;
        };

        out.push_str(&rest[..start]);
        if keep {
            out.push_str(&after_open[..end]);
        }
        rest = &after_open[end + SECTION_END.len()..];
    }

    out.push_str(rest);
    out
}

fn default_body(data: &SetupIssueData<'_>) -> String {
    let organization = data.organization;
    let repository_name = data.repository_name;
    let admin_mention = data.admin_mention();

    let (assigned, call_to_action) = match data.repository_admin {
        Some(_) => (
            format!(" and {admin_mention} has been assigned as the repository administrator"),
            format!("{admin_mention}, as the repository administrator, please:"),
        ),
        None => (String::new(), "Please:".to_string()),
    };

    format!(
        r#"# Welcome to {organization}/{repository_name}!

This repository has been created successfully via the repo-crafter API{assigned}.

## 📋 Repository Setup Checklist

- [ ] Review and update the repository description
- [ ] Set up branch protection rules
- [ ] Configure repository settings (Issues, Projects, Wiki, etc.)
- [ ] Add repository topics/tags for discoverability
- [ ] Set up automated workflows (if needed)

## 🚀 Next Steps

{call_to_action}

1. **Review Repository Settings** - Configure according to your team's needs
2. **Set Up Branch Protection** - Implement the security policies above
3. **Add Team Members** - Invite collaborators with appropriate permissions
4. **Create Initial Documentation** - Add README, CONTRIBUTING, and other docs
5. **Configure Integrations** - Set up any required webhooks or external services

---
*This issue was created automatically by repo-crafter. You can close it once you've completed the setup checklist.*"#
    )
}
