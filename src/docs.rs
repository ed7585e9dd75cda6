// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Orçamento ---
        handlers::budget::get_items,
        handlers::budget::get_summary,
        handlers::budget::preview_budget,

        // --- Folha de Pagamento ---
        handlers::payroll::get_table,
    ),
    components(
        schemas(
            // --- Orçamento ---
            models::budget::ItemConfig,
            models::budget::ItemRecord,
            models::budget::TopItemEntry,
            models::budget::BudgetSummary,
            models::budget::BudgetReport,

            // --- Folha de Pagamento ---
            models::payroll::TaxRateSet,
            models::payroll::RoleConfig,
            models::payroll::RoleRecord,
            models::payroll::PayrollTable,

            // --- Payloads ---
            handlers::budget::ItemsPayload,
            handlers::budget::PayrollPayload,
            handlers::budget::BudgetPreviewPayload,
        )
    ),
    tags(
        (name = "Orçamento", description = "Tabela de itens, resumo e preview"),
        (name = "Folha de Pagamento", description = "Encargos por cargo e agregado de pessoal")
    )
)]
pub struct ApiDoc;
