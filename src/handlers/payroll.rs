// src/handlers/payroll.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::payroll::PayrollTable,
};

// GET /api/payroll/table
#[utoipa::path(
    get,
    path = "/api/payroll/table",
    tag = "Folha de Pagamento",
    responses(
        (status = 200, description = "Folha resolvida: encargos por cargo, agregado e avisos", body = PayrollTable),
        (status = 422, description = "Configuração inválida")
    )
)]
pub async fn get_table(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let table = app_state
        .payroll_service
        .resolve_settings(&app_state.settings.payroll)?;

    Ok((StatusCode::OK, Json(table)))
}
