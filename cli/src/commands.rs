//! Subcommand implementations.
//!
//! Every command returns the text to print so it can be exercised without
//! capturing stdout.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use serde_json::Value;
use session::{AdminResource, AuthProvider, LoginForm, PasswordChangeOutcome, SubmitOutcome};

use crate::backend::ReqwestBackend;
use crate::error::CliError;
use crate::file_storage::FileStorage;

pub type CliAuth = AuthProvider<FileStorage, ReqwestBackend>;

pub async fn login(auth: &CliAuth, email: &str, password: &str) -> Result<String, CliError> {
    let mut form = LoginForm::new(email, password);
    match form.submit(auth).await {
        SubmitOutcome::HardRedirect(_) => Ok(status(auth)),
        SubmitOutcome::Stay => Err(CliError::Failed(form.error.unwrap_or_default())),
    }
}

#[must_use]
pub fn logout(auth: &CliAuth) -> String {
    auth.logout();
    "Logged out".to_owned()
}

#[must_use]
pub fn status(auth: &CliAuth) -> String {
    match auth.snapshot().admin() {
        Some(admin) => format!("Logged in as {}", admin.display_name()),
        None => "Not logged in".to_owned(),
    }
}

pub async fn change_password(auth: &CliAuth, current: &str, new: &str) -> Result<String, CliError> {
    match auth.change_password(current, new).await {
        PasswordChangeOutcome::Changed { message } => Ok(message),
        PasswordChangeOutcome::Failed { message } => Err(CliError::Failed(message)),
    }
}

/// One CRUD call against a backend collection.
#[derive(Clone, Debug, PartialEq)]
pub enum ResourceAction {
    List,
    Get { id: String },
    Create { body: Value },
    Update { id: String, body: Value },
    Delete { id: String },
}

/// Resolve a collection by its short name (`team`, `mission-vision`, ...).
pub fn parse_resource(name: &str) -> Result<AdminResource, CliError> {
    AdminResource::from_name(name).ok_or_else(|| CliError::UnknownResource(name.to_owned()))
}

pub async fn resource(auth: &CliAuth, resource: AdminResource, action: ResourceAction) -> Result<String, CliError> {
    let backend = auth.backend();
    let value = match action {
        ResourceAction::List => backend.list(resource).await?,
        ResourceAction::Get { id } => backend.get(resource, &id).await?,
        ResourceAction::Create { body } => backend.create(resource, &require_token(auth)?, &body).await?,
        ResourceAction::Update { id, body } => backend.update(resource, &id, &require_token(auth)?, &body).await?,
        ResourceAction::Delete { id } => backend.delete(resource, &id, &require_token(auth)?).await?,
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

fn require_token(auth: &CliAuth) -> Result<String, CliError> {
    auth.token().ok_or(CliError::NotLoggedIn)
}

/// Check the SSR host's health endpoint.
pub async fn ping(host_url: &str) -> Result<String, CliError> {
    let url = session::backend::endpoint(host_url, "/healthz");
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Failed(format!("health check failed: HTTP {}", status.as_u16())));
    }
    Ok("ok".to_owned())
}
