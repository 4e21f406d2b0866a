use chrono::{DateTime, Utc};
use greeting_artifacts_core::artifact::{ArtifactKind, GeneratedArtifact};
use greeting_artifacts_core::contract::{parse_request, GreetingRequest};
use greeting_artifacts_core::error::{GenerationError, ValidationError};
use greeting_artifacts_core::storage_keys::{artifact_file_name, artifact_object_key};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::artifact_generation::{PdfDocumentGenerator, XlsxSpreadsheetGenerator};
use crate::adapters::object_store::ArtifactStore;
use crate::config::{ConfigError, HandlerConfig};
use crate::error::HandlerError;
use crate::logging::COMPONENT;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

pub trait SpreadsheetGenerator {
    fn generate_spreadsheet(
        &self,
        request: &GreetingRequest,
    ) -> Result<GeneratedArtifact, GenerationError>;
}

pub trait DocumentGenerator {
    fn generate_document(
        &self,
        request: &GreetingRequest,
    ) -> Result<GeneratedArtifact, GenerationError>;
}

/// Handles one greeting invocation: builds both artifacts, uploads them in
/// order, and answers with the greeting.
///
/// Nothing is retried. When the document step fails the spreadsheet has
/// already been uploaded and stays in the bucket.
pub fn handle_greeting_event(
    event: Value,
    config: &HandlerConfig,
    invoked_at: DateTime<Utc>,
    spreadsheets: &impl SpreadsheetGenerator,
    documents: &impl DocumentGenerator,
    store: &impl ArtifactStore,
) -> ApiGatewayResponse {
    match process_greeting(event, config, invoked_at, spreadsheets, documents, store) {
        Ok(greeting) => {
            tracing::info!(
                component = COMPONENT,
                event = "greeting_completed",
                bucket = %config.bucket,
                "greeting artifacts uploaded"
            );
            text_response(200, greeting)
        }
        Err(error) => {
            tracing::error!(
                component = COMPONENT,
                event = "greeting_failed",
                error_code = error.error_code(),
                status_code = error.status_code(),
                error = %error,
                "greeting invocation failed"
            );
            handler_error_response(&error)
        }
    }
}

pub fn handle_greeting_event_with_default_generators(
    event: Value,
    config: &HandlerConfig,
    invoked_at: DateTime<Utc>,
    store: &impl ArtifactStore,
) -> ApiGatewayResponse {
    let spreadsheets = XlsxSpreadsheetGenerator {
        template: config.spreadsheet_template,
    };
    let documents = PdfDocumentGenerator {
        content: config.document_content,
    };
    handle_greeting_event(event, config, invoked_at, &spreadsheets, &documents, store)
}

pub fn misconfiguration_response(error: &ConfigError) -> ApiGatewayResponse {
    tracing::error!(
        component = COMPONENT,
        event = "misconfiguration",
        error = %error,
        "handler configuration is invalid"
    );
    handler_error_response(&HandlerError::Misconfiguration(error.clone()))
}

fn process_greeting(
    event: Value,
    config: &HandlerConfig,
    invoked_at: DateTime<Utc>,
    spreadsheets: &impl SpreadsheetGenerator,
    documents: &impl DocumentGenerator,
    store: &impl ArtifactStore,
) -> Result<String, HandlerError> {
    let payload = normalize_apigw_event(event)?;
    let request = parse_request(&payload)?;
    let greeting = request.greeting();

    tracing::info!(
        component = COMPONENT,
        event = "request_received",
        spreadsheet_template = config.spreadsheet_template.as_str(),
        document_content = config.document_content.as_str(),
        key_strategy = config.key_strategy.as_str(),
        "greeting request accepted"
    );

    let spreadsheet = spreadsheets
        .generate_spreadsheet(&request)
        .and_then(GeneratedArtifact::ensure_non_empty)
        .map_err(|source| HandlerError::Generation {
            kind: ArtifactKind::Spreadsheet,
            source,
        })?;
    upload_artifact(&spreadsheet, config, invoked_at, store)?;

    let document = documents
        .generate_document(&request)
        .and_then(GeneratedArtifact::ensure_non_empty)
        .map_err(|source| HandlerError::Generation {
            kind: ArtifactKind::Document,
            source,
        })?;
    upload_artifact(&document, config, invoked_at, store)?;

    Ok(greeting)
}

fn upload_artifact(
    artifact: &GeneratedArtifact,
    config: &HandlerConfig,
    invoked_at: DateTime<Utc>,
    store: &impl ArtifactStore,
) -> Result<String, HandlerError> {
    let file_name = artifact_file_name(&artifact.file_name, config.key_strategy, invoked_at);
    let key = artifact_object_key(config.prefix.as_deref(), &file_name);

    store
        .upload(&config.bucket, &key, &artifact.bytes, artifact.content_type())
        .map_err(|message| HandlerError::Upload {
            bucket: config.bucket.clone(),
            key: key.clone(),
            message,
        })?;

    tracing::info!(
        component = COMPONENT,
        event = "artifact_uploaded",
        artifact = %artifact.kind,
        bucket = %config.bucket,
        key = %key,
        bytes = artifact.len(),
        "artifact uploaded"
    );
    Ok(key)
}

/// Accepts both API Gateway proxy events (JSON text in `body`) and direct
/// invocations carrying the fields at the top level.
fn normalize_apigw_event(event: Value) -> Result<Value, ValidationError> {
    let Some(object) = event.as_object() else {
        return Err(ValidationError::MalformedPayload(
            "Request payload must be a JSON object".to_string(),
        ));
    };

    let Some(body) = object.get("body") else {
        return Ok(event);
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => serde_json::from_str(text)
            .map_err(|error| ValidationError::MalformedPayload(format!("Malformed JSON body: {error}"))),
        _ => Err(ValidationError::MalformedPayload(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

fn text_response(status_code: u16, body: String) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "text/plain"}),
        body,
    }
}

fn handler_error_response(error: &HandlerError) -> ApiGatewayResponse {
    error_response(
        error.status_code(),
        json!({
            "error": error.error_code(),
            "message": error.to_string(),
        }),
    )
}

fn error_response(status_code: u16, payload: Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: payload.to_string(),
    }
}
