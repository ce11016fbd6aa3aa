use crate::cli::OutputFormat;
use colored::Colorize;
use harbor_core::{ApiRequest, ApiResponse};
use serde::Serialize;
use serde_json::Value;

/// Echo the outgoing request to stderr, e.g. `==> GET https://...`, plus the JSON body if any
pub fn output_request(request: &ApiRequest, format: OutputFormat) {
    if format == OutputFormat::Text {
        eprintln!("{}", render_request(request));
    }
}

pub fn render_request(request: &ApiRequest) -> String {
    let mut out = format!(
        "{} {} {}",
        "==>".dimmed(),
        request.method.as_str().bold(),
        request.url
    );
    if let Some(body) = &request.body {
        out.push_str(&format!("\n{} {} {}", "==>".dimmed(), "body:".dimmed(), body));
    }
    out
}

/// Print the status line and body the registry answered with
pub fn output_response(response: &ApiResponse, format: OutputFormat) {
    println!("{}", render_response(response, format));
}

pub fn render_response(response: &ApiResponse, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let json = JsonResponse {
                status: response.status,
                reason: &response.reason,
                body: body_value(&response.body),
            };
            serde_json::to_string_pretty(&json)
                .unwrap_or_else(|_| format!(r#"{{"status": {}}}"#, response.status))
        }
        OutputFormat::Text => {
            let status = if response.is_success() {
                response.status_line().green().bold()
            } else {
                response.status_line().red().bold()
            };

            let body = response.body.trim();
            if body.is_empty() {
                status.to_string()
            } else {
                format!("{}\n{}", status, pretty_body(body))
            }
        }
    }
}

#[derive(Serialize)]
struct JsonResponse<'a> {
    status: u16,
    reason: &'a str,
    body: Value,
}

/// Body as JSON if it parses, a plain string otherwise, `null` when empty
fn body_value(body: &str) -> Value {
    let body = body.trim();
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

fn pretty_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| body.to_string())
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: "error".to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err).unwrap_or_else(|_| {
                format!(r#"{{"error": true, "message": "{}"}}"#, err)
            })
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}
