use super::AppState;
use crate::domain::model::{PostcodeArea, PropertyFeatures, PropertyType};
use crate::utils::error::{RentError, Result};
use actix_multipart::Multipart;
use actix_web::http::header::ContentType;
use actix_web::web;
use actix_web::FromRequest;
use actix_web::HttpMessage;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use futures_util::StreamExt;
use serde::Deserialize;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const GENERIC_ERROR: &str = "Internal server error. Please try again.";

/// Raw form fields; absent fields fall back to a one-bed OX1 flat of 700 sq ft.
#[derive(Debug, Default, Deserialize)]
pub struct PredictForm {
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub squareft: Option<String>,
    pub property_type: Option<String>,
    pub postcode_area: Option<String>,
}

fn int_field(field: &str, value: Option<&str>, default: i64) -> Result<i64> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
            RentError::invalid_feature(field, format!("'{}' is not a whole number", raw))
        }),
    }
}

impl PredictForm {
    /// Stores a named field; unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "bedrooms" => &mut self.bedrooms,
            "bathrooms" => &mut self.bathrooms,
            "squareft" => &mut self.squareft,
            "property_type" => &mut self.property_type,
            "postcode_area" => &mut self.postcode_area,
            _ => return,
        };
        *slot = Some(value);
    }

    pub fn to_features(&self) -> Result<PropertyFeatures> {
        PropertyFeatures::new(
            int_field("bedrooms", self.bedrooms.as_deref(), 1)?,
            int_field("bathrooms", self.bathrooms.as_deref(), 1)?,
            int_field("squareft", self.squareft.as_deref(), 700)?,
            self.property_type.as_deref().unwrap_or("Flat"),
            self.postcode_area.as_deref().unwrap_or("OX1"),
        )
    }
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": GENERIC_ERROR }))
}

fn options<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels
        .map(|label| format!(r#"<option value="{0}">{0}</option>"#, label))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn home() -> impl Responder {
    let page = INDEX_TEMPLATE
        .replace(
            "{{property_type_options}}",
            &options(PropertyType::ALL.iter().map(|t| t.as_str())),
        )
        .replace(
            "{{postcode_area_options}}",
            &options(PostcodeArea::ALL.iter().map(|a| a.as_str())),
        );
    HttpResponse::Ok().content_type(ContentType::html()).body(page)
}

async fn read_multipart(req: &HttpRequest, payload: web::Payload) -> Result<PredictForm> {
    let mut multipart = Multipart::new(req.headers(), payload);
    let mut form = PredictForm::default();

    while let Some(field) = multipart.next().await {
        let mut field = field.map_err(|e| RentError::processing(format!("unreadable multipart field: {}", e)))?;
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| RentError::processing(format!("unreadable multipart field: {}", e)))?;
            bytes.extend_from_slice(&chunk);
        }
        let value = String::from_utf8(bytes)
            .map_err(|_| RentError::invalid_feature(&name, "value is not UTF-8"))?;
        form.set(&name, value);
    }
    Ok(form)
}

/// Form fields from a urlencoded or multipart body. Any other body, or none,
/// reads as an empty form so every field takes its default.
async fn read_form(req: &HttpRequest, payload: web::Payload) -> Result<PredictForm> {
    let mime = req.mime_type().ok().flatten();
    match mime.as_ref().map(|m| m.essence_str()) {
        Some("multipart/form-data") => read_multipart(req, payload).await,
        Some("application/x-www-form-urlencoded") => {
            let form = web::Form::<PredictForm>::from_request(req, &mut payload.into_inner())
                .await
                .map_err(|e| RentError::processing(format!("unreadable form: {}", e)))?;
            Ok(form.into_inner())
        }
        other => {
            tracing::debug!("No form body ({:?}), using defaults", other);
            Ok(PredictForm::default())
        }
    }
}

pub async fn predict(state: web::Data<AppState>, req: HttpRequest, payload: web::Payload) -> impl Responder {
    let response = match read_form(&req, payload).await {
        Ok(form) => state.predict(&form),
        Err(e) => Err(e),
    };

    match response {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => {
            tracing::error!("Error: {}", e);
            internal_error()
        }
    }
}

pub async fn market_stats(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&state.market)
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "Server is running",
    }))
}
