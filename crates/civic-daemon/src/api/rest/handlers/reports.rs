//! Report handlers

use crate::api::rest::auth::Admin;
use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use crate::storage::NewStoredReport;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use civic_types::{rules, Coordinates, Report, ReportId, ReportStatus, StatusFilter, StatusUpdate};
use serde::{Deserialize, Serialize};

/// List query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListReportsQuery {
    #[serde(default, alias = "estado")]
    pub status: Option<String>,
}

/// Response for create and status-change requests
#[derive(Debug, Serialize)]
pub struct ReportAckResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ReportId>,
}

/// Status change request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(alias = "estado")]
    pub status: String,
    #[serde(default, alias = "razon_rechazo")]
    pub rejection_reason: Option<String>,
}

/// List reports, newest first
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> ApiResult<Json<Vec<Report>>> {
    let filter: StatusFilter = query.status.as_deref().unwrap_or_default().parse()?;
    let reports = state.storage.list_reports(filter).await?;
    Ok(Json(reports))
}

/// Get a specific report
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Report>> {
    let report_id = ReportId::new(&id);
    let report = state
        .storage
        .get_report(&report_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Report {} not found", id)))?;

    Ok(Json(report))
}

/// Multipart fields of a submission, before validation
#[derive(Debug, Default)]
struct SubmissionForm {
    address: String,
    comment: String,
    photo: Option<(String, Vec<u8>)>,
    email: Option<String>,
    lat: Option<String>,
    lng: Option<String>,
}

impl SubmissionForm {
    async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = SubmissionForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "photo" | "foto" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    // an empty file input still arrives as a part
                    if !file_name.is_empty() || !bytes.is_empty() {
                        form.photo = Some((file_name, bytes.to_vec()));
                    }
                }
                "address" | "direccion" => form.address = field.text().await?,
                "comment" | "comentario" => form.comment = field.text().await?,
                "email" => form.email = Some(field.text().await?),
                "lat" => form.lat = Some(field.text().await?),
                "lng" => form.lng = Some(field.text().await?),
                other => tracing::debug!(field = %other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    fn coordinates(&self) -> ApiResult<Option<Coordinates>> {
        let parse = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ApiError::BadRequest(format!("Invalid coordinate: {}", raw)))
        };

        match (self.lat.as_deref(), self.lng.as_deref()) {
            (Some(lat), Some(lng)) if !lat.trim().is_empty() && !lng.trim().is_empty() => {
                Ok(Some(Coordinates::new(parse(lat)?, parse(lng)?)?))
            }
            _ => Ok(None),
        }
    }
}

/// Create a report from a multipart submission
pub async fn create_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ReportAckResponse>)> {
    let form = SubmissionForm::read(multipart).await?;

    rules::check_address(&form.address)?;
    rules::check_comment(&form.comment)?;
    let (file_name, bytes) = form
        .photo
        .as_ref()
        .ok_or(rules::RuleViolation::MissingPhoto)?;
    rules::check_photo_extension(file_name)?;
    rules::check_photo_size(bytes.len() as u64)?;
    let coordinates = form.coordinates()?;

    let photo = state
        .photos
        .save(file_name, bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("Could not store photo: {}", e)))?;

    let inserted = state
        .storage
        .insert_report(NewStoredReport {
            address: form.address.trim().to_string(),
            comment: form.comment.trim().to_string(),
            photo: photo.clone(),
            contact_email: form
                .email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            coordinates,
        })
        .await;

    let report = match inserted {
        Ok(report) => report,
        Err(e) => {
            if let Err(io) = state.photos.remove(&photo).await {
                tracing::warn!(file = %photo, error = %io, "Could not remove orphaned photo");
            }
            return Err(e.into());
        }
    };

    tracing::info!(report_id = %report.id, "Created report");

    Ok((
        StatusCode::CREATED,
        Json(ReportAckResponse {
            success: true,
            message: "Report created successfully".to_string(),
            id: Some(report.id),
        }),
    ))
}

/// Change a report's status (administrators only)
pub async fn update_report_status(
    _admin: Admin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<Json<ReportAckResponse>> {
    let status: ReportStatus = request.status.parse()?;
    let update = StatusUpdate::new(status, request.rejection_reason);
    update.validate()?;

    let report_id = ReportId::new(&id);
    if !state.storage.update_status(&report_id, &update).await? {
        return Err(ApiError::NotFound(format!("Report {} not found", id)));
    }

    tracing::info!(report_id = %id, %status, "Updated report status");

    Ok(Json(ReportAckResponse {
        success: true,
        message: format!("Status updated to {}", status),
        id: None,
    }))
}
