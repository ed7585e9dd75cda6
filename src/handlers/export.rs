// src/handlers/export.rs

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{common::error::AppError, config::AppState};

// Configura os Headers para o navegador baixar o arquivo
fn attachment_response(content_type: &str, extension: &str, bytes: Vec<u8>) -> Response {
    let filename = format!(
        "orcamento_escolar_{}.{}",
        chrono::Local::now().format("%Y%m%d"),
        extension
    );
    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    (headers, bytes).into_response()
}

// GET /api/export/csv
pub async fn export_csv(State(app_state): State<AppState>) -> Result<Response, AppError> {
    let report = app_state.budget_service.build_budget(&app_state.settings)?;
    let bytes = app_state.export_service.to_csv(&report.items)?;

    Ok(attachment_response("text/csv; charset=utf-8", "csv", bytes))
}

// GET /api/export/xlsx
pub async fn export_xlsx(State(app_state): State<AppState>) -> Result<Response, AppError> {
    let report = app_state.budget_service.build_budget(&app_state.settings)?;
    let bytes = app_state.export_service.to_xlsx(&report.items)?;

    Ok(attachment_response(
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xlsx",
        bytes,
    ))
}

// GET /api/export/pdf
pub async fn export_pdf(State(app_state): State<AppState>) -> Result<Response, AppError> {
    let report = app_state.budget_service.build_budget(&app_state.settings)?;
    let bytes = app_state.export_service.to_pdf(&report)?;

    Ok(attachment_response("application/pdf", "pdf", bytes))
}
