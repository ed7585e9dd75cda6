// src/handlers/budget.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    // Importamos os models para referenciar no Swagger
    models::{
        budget::{BudgetReport, BudgetSummary, ItemRecord},
        payroll::TaxRateSet,
        settings::{BudgetSettings, ItemsSettings, PayrollSettings},
    },
};

// ---
// Validação Customizada
// ---
fn validate_all_not_negative(values: &[Decimal]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.is_sign_negative()) {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("Os valores não podem ser negativos.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: Preview do orçamento (mesma forma da configuração, mas vinda
// do cliente e validada antes de calcular)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemsPayload {
    #[validate(length(min = 1, message = "Informe ao menos um item."))]
    pub descriptions: Vec<String>,

    #[validate(custom(function = "validate_all_not_negative"))]
    pub unit_costs: Vec<Decimal>,

    pub quantities: Vec<u32>,

    #[validate(custom(function = "validate_all_not_negative"))]
    pub margins: Vec<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollPayload {
    pub roles: Vec<String>,

    #[validate(custom(function = "validate_all_not_negative"))]
    pub base_salaries: Vec<Decimal>,

    pub headcounts: Vec<u32>,

    pub tax_rates: TaxRateSet,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPreviewPayload {
    #[validate(nested)]
    pub items: ItemsPayload,

    #[validate(nested)]
    pub payroll: PayrollPayload,
}

impl BudgetPreviewPayload {
    // Validação de consistência: as listas paralelas precisam andar juntas.
    fn validate_consistency(&self) -> Result<(), ValidationError> {
        let items_len = self.items.descriptions.len();
        if self.items.unit_costs.len() != items_len
            || self.items.quantities.len() != items_len
            || self.items.margins.len() != items_len
        {
            return Err(ValidationError::new("ItemListsLengthMismatch"));
        }

        let payroll_len = self.payroll.roles.len();
        if self.payroll.base_salaries.len() != payroll_len
            || self.payroll.headcounts.len() != payroll_len
        {
            return Err(ValidationError::new("PayrollListsLengthMismatch"));
        }

        Ok(())
    }

    fn into_settings(self) -> BudgetSettings {
        BudgetSettings {
            items: ItemsSettings {
                descriptions: self.items.descriptions,
                unit_costs: self.items.unit_costs,
                quantities: self.items.quantities,
                margins: self.items.margins,
            },
            payroll: PayrollSettings {
                roles: self.payroll.roles,
                base_salaries: self.payroll.base_salaries,
                headcounts: self.payroll.headcounts,
                tax_rates: self.payroll.tax_rates,
            },
        }
    }
}

// GET /api/budget/items
#[utoipa::path(
    get,
    path = "/api/budget/items",
    tag = "Orçamento",
    responses(
        (status = 200, description = "Tabela de itens com os valores derivados", body = Vec<ItemRecord>),
        (status = 422, description = "Configuração inválida")
    )
)]
pub async fn get_items(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.budget_service.build_budget(&app_state.settings)?;

    Ok((StatusCode::OK, Json(report.items)))
}

// GET /api/budget/summary
#[utoipa::path(
    get,
    path = "/api/budget/summary",
    tag = "Orçamento",
    responses(
        (status = 200, description = "Métricas de resumo do orçamento", body = BudgetSummary),
        (status = 422, description = "Configuração inválida")
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.budget_service.build_budget(&app_state.settings)?;

    Ok((StatusCode::OK, Json(report.summary)))
}

// POST /api/budget/preview
#[utoipa::path(
    post,
    path = "/api/budget/preview",
    tag = "Orçamento",
    request_body = BudgetPreviewPayload,
    responses(
        (status = 200, description = "Orçamento calculado a partir da configuração enviada", body = BudgetReport),
        (status = 400, description = "Payload inválido"),
        (status = 422, description = "Configuração inválida")
    )
)]
pub async fn preview_budget(
    State(app_state): State<AppState>,
    Json(payload): Json<BudgetPreviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    // Validação padrão do Validator
    payload.validate()?;

    // Nossa validação de consistência manual
    payload.validate_consistency().map_err(|e| {
        // Criamos um ValidationErrors manual para manter o padrão de resposta
        let mut errors = validator::ValidationErrors::new();
        errors.add("items", e);
        AppError::ValidationError(errors)
    })?;

    // O preview não toca o estado compartilhado: calcula sobre a
    // configuração enviada e descarta.
    let report = app_state
        .budget_service
        .build_budget(&payload.into_settings())?;

    Ok((StatusCode::OK, Json(report)))
}
