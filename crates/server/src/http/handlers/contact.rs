use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::mail::Inquiry;
use crate::state::AppState;
use domain::is_valid_email;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub trek_interest: Option<String>,
    #[serde(default)]
    pub number_of_people: Option<String>,
    #[serde(default)]
    pub preferred_dates: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub async fn submit_inquiry(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let name = payload.name.trim();
    let email = payload.email.trim();

    if name.is_empty() || email.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Name and email are required" })),
        ));
    }
    if !is_valid_email(email) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid email format" })),
        ));
    }

    let Some(mailer) = &state.mailer else {
        tracing::error!("Mail credentials are not configured");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Email service is not configured. Please contact us directly."
            })),
        ));
    };

    let inquiry = Inquiry {
        name: name.to_string(),
        email: email.to_string(),
        phone: payload.phone,
        trek_interest: payload.trek_interest,
        number_of_people: payload.number_of_people,
        preferred_dates: payload.preferred_dates,
        message: payload.message,
    };

    if let Err(e) = mailer.send_inquiry(&inquiry).await {
        tracing::error!("Error sending inquiry email: {e:#}");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to send your inquiry. Please try again later." })),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Your inquiry has been sent successfully! We will contact you within 24 hours."
    })))
}
