// File: src/routes.rs
// Purpose: Form page, full submission, and live single-field checks

use crate::activity::{log_activity, ActivityEntry, Severity};
use crate::error::AppError;
use crate::page::{render_page, Alert, FormView};
use crate::request::{parse_form_body, submission_values, ClientInfo, FieldCheckRequest};
use crate::store::NewSubmission;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Json,
};
use intake_validation::{
    check_field, sanitize, ErrorKind, ErrorMap, Field, FieldCheck, FieldValues, SanitizedRecord,
    SuccessMessage, Validator,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// JSON shape of a full submission result
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    pub errors: ErrorMap,
    /// Sanitized record; only filled on success
    pub data: SanitizedRecord,
}

/// JSON shape of a live field check
#[derive(Debug, Clone, Serialize)]
pub struct FieldCheckResponse {
    pub valid: bool,
    pub message: String,
    pub field: String,
}

impl FieldCheckResponse {
    fn rejected(message: &str, field: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.to_string(),
            field: field.into(),
        }
    }
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&FormView::default(), &state.config.validation).into_string())
}

/// POST /submit
pub async fn submit(
    State(state): State<AppState>,
    client: ClientInfo,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let values = submission_values(parse_form_body(&headers, &body)?);
    let (response, form_values) = process_submission(&state, values, &client).await;

    if client.wants_json() {
        return Ok(Json(response).into_response());
    }

    let view = FormView {
        values: form_values,
        errors: response.errors,
        alert: Some(Alert {
            success: response.success,
            message: response.message,
        }),
    };
    Ok(Html(render_page(&view, &state.config.validation).into_string()).into_response())
}

/// Validate, persist, and log one submission.
///
/// Returns the response plus the values to redraw the form with (empty once
/// the submission is stored).
pub async fn process_submission(
    state: &AppState,
    values: FieldValues,
    client: &ClientInfo,
) -> (SubmissionResponse, SanitizedRecord) {
    let secret = values
        .get(Field::Password.as_str())
        .cloned()
        .unwrap_or_default();

    let mut validator = Validator::new(values);
    let valid = validator.validate_all();
    let sanitized = validator.sanitized_data();
    let identifier = sanitized
        .get(Field::Email.as_str())
        .filter(|email| !email.is_empty())
        .cloned()
        .unwrap_or_else(|| "unknown".to_string());

    if !valid {
        let errors = validator.into_errors();
        info!(failed = errors.len(), "submission rejected");
        record(state, client, "Form validation failed", &identifier, Severity::Warning).await;

        let response = SubmissionResponse {
            success: false,
            message: SuccessMessage::FixErrors.as_str().to_string(),
            errors,
            data: SanitizedRecord::new(),
        };
        return (response, sanitized);
    }

    let submission = NewSubmission {
        fields: sanitized.clone(),
        ip_address: client.ip.clone(),
    };

    match state.store.save(submission, &secret).await {
        Ok(id) => {
            info!(%id, "submission accepted");
            record(state, client, "Form submitted successfully", &identifier, Severity::Info).await;
            let response = SubmissionResponse {
                success: true,
                message: SuccessMessage::DataSaved.as_str().to_string(),
                errors: ErrorMap::new(),
                data: sanitized,
            };
            (response, SanitizedRecord::new())
        }
        Err(e) => {
            error!(error = %e, "failed to store valid submission");
            record(state, client, "Form data could not be saved", &identifier, Severity::Error).await;
            let response = SubmissionResponse {
                success: false,
                message: SuccessMessage::SaveFailed.as_str().to_string(),
                errors: ErrorMap::new(),
                data: sanitized.clone(),
            };
            (response, sanitized)
        }
    }
}

async fn record(state: &AppState, client: &ClientInfo, message: &str, identifier: &str, severity: Severity) {
    let entry = ActivityEntry::new(message, identifier, severity)
        .with_client(client.ip.clone(), client.user_agent.clone());
    log_activity(state.activity.as_ref(), entry).await;
}

/// POST /api/validate
pub async fn validate_field(
    State(state): State<AppState>,
    client: ClientInfo,
    body: Bytes,
) -> Json<FieldCheckResponse> {
    if !client.is_ajax {
        return Json(FieldCheckResponse::rejected("Invalid request", ""));
    }

    let request: FieldCheckRequest = serde_json::from_slice(&body).unwrap_or_default();
    let (Some(name), Some(value)) = (request.field.clone(), request.value.clone()) else {
        return Json(FieldCheckResponse::rejected("Missing required parameters", ""));
    };

    let values = request.merged_values(&name, value);
    let email = sanitize(values.get(Field::Email.as_str()).map(String::as_str).unwrap_or(""));

    let check = match check_field(&name, values) {
        FieldCheck::Valid if name == Field::Email.as_str() => email_availability(&state, &email).await,
        other => other,
    };
    debug!(field = %name, valid = check.valid(), "live field check");

    Json(FieldCheckResponse {
        valid: check.valid(),
        message: check.message().to_string(),
        field: name,
    })
}

/// A syntactically valid email is also checked against stored submissions.
/// If the lookup fails the basic result stands.
async fn email_availability(state: &AppState, email: &str) -> FieldCheck {
    match state.store.email_exists(email).await {
        Ok(true) => {
            FieldCheck::Invalid(ErrorKind::EmailTaken.message(&state.config.validation))
        }
        Ok(false) => FieldCheck::Valid,
        Err(e) => {
            warn!(error = %e, "email lookup failed, keeping basic result");
            FieldCheck::Valid
        }
    }
}
