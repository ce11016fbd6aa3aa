use crate::cli::{LabelCommands, OutputFormat};
use crate::config::Config;
use crate::output::{output_request, output_response};
use anyhow::{Context, Result};
use harbor_core::{
    ApiRequest, CreateLabel, DeleteLabel, Dispatcher, GetLabel, ListLabels, Session, UpdateLabel,
};
use harbor_http::HarborClient;

/// Run one label subcommand. Returns whether the registry answered with a 2xx status.
pub fn handle_labels(config: &Config, action: &LabelCommands, format: OutputFormat) -> Result<bool> {
    let base_url = config.require_url()?;

    // Flag validation happens here, before the session file is touched
    let request = build_request(action, base_url)?;

    let session_path = config.session_path();
    let session = Session::load(&session_path)
        .with_context(|| format!("Cannot send request without a session ({})", session_path.display()))?;

    let client = HarborClient::new(session).with_language(config.language.clone());
    send(&client, &request, format)
}

/// Bind parsed flags to the matching request record and build the HTTP request.
pub fn build_request(action: &LabelCommands, base_url: &str) -> Result<ApiRequest> {
    let request = match action {
        LabelCommands::List {
            name,
            scope,
            project_id,
            page,
            page_size,
        } => ListLabels {
            scope: *scope,
            name: name.clone(),
            project_id: *project_id,
            page: *page,
            page_size: *page_size,
        }
        .to_request(base_url)
        .context("Invalid labels_list arguments")?,
        LabelCommands::Create {
            id,
            name,
            description,
            color,
            scope,
            project_id,
            creation_time,
            update_time,
            deleted,
        } => CreateLabel {
            id: *id,
            name: name.clone(),
            description: description.clone(),
            color: color.clone(),
            scope: *scope,
            project_id: *project_id,
            creation_time: creation_time.clone().unwrap_or_default(),
            update_time: update_time.clone().unwrap_or_default(),
            deleted: *deleted,
        }
        .to_request(base_url)
        .context("Invalid label_create arguments")?,
        LabelCommands::Delete { id } => DeleteLabel { id: *id }.to_request(base_url)?,
        LabelCommands::Get { id } => GetLabel { id: *id }.to_request(base_url)?,
        LabelCommands::Update {
            id,
            name,
            description,
            color,
            scope,
            project_id,
            deleted,
        } => UpdateLabel {
            id: *id,
            name: name.clone(),
            description: description.clone(),
            color: color.clone(),
            scope: *scope,
            project_id: *project_id,
            deleted: *deleted,
        }
        .to_request(base_url)
        .context("Invalid label_update arguments")?,
    };

    Ok(request)
}

/// Dispatch a built request and print what came back.
pub fn send(dispatcher: &dyn Dispatcher, request: &ApiRequest, format: OutputFormat) -> Result<bool> {
    output_request(request, format);

    let response = dispatcher
        .dispatch(request)
        .with_context(|| format!("{} {} failed", request.method, request.url))?;

    output_response(&response, format);
    Ok(response.is_success())
}
