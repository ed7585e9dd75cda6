// src/models/budget.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Descrição do item sintético cujo custo unitário é substituído pelo
/// agregado da folha de pagamento antes do cálculo dos itens.
pub const PERSONNEL_ITEM: &str = "Salário Pessoal";

// --- Structs ---

/// Uma linha crua do orçamento, como veio da configuração.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemConfig {
    #[schema(example = "Energia")]
    pub description: String,

    #[schema(example = "800.00")]
    pub unit_cost: Decimal,

    #[schema(example = 1)]
    pub monthly_quantity: u32,

    #[schema(example = "30")]
    pub margin_percent: Decimal,
}

/// Item com os valores derivados já calculados. Os campos derivados são
/// sempre recalculados a partir dos campos de origem, nunca armazenados
/// separadamente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[schema(example = "Energia")]
    pub description: String,

    #[schema(example = "800.00")]
    pub unit_cost: Decimal,

    #[schema(example = 1)]
    pub monthly_quantity: u32,

    #[schema(example = "30")]
    pub margin_percent: Decimal,

    // unit_cost * (1 + margin_percent/100)
    #[schema(example = "1040.00")]
    pub final_unit_value: Decimal,

    // final_unit_value * monthly_quantity
    #[schema(example = "1040.00")]
    pub monthly_total: Decimal,
}

/// O item mais custoso do orçamento e sua fatia do total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopItemEntry {
    #[schema(example = "Salário Pessoal")]
    pub description: String,

    #[schema(example = "9984.00")]
    pub monthly_total: Decimal,

    #[schema(example = "56.70")]
    pub share_percent: Decimal,
}

/// Métricas de resumo (os cards do topo da tela).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    #[schema(example = "17608.00")]
    pub total: Decimal,

    #[schema(example = "1956.44")]
    pub average: Decimal,

    #[schema(example = 9)]
    pub item_count: usize,

    // Ausente quando o orçamento está vazio (total zero).
    pub top_item: Option<TopItemEntry>,

    #[schema(example = false)]
    pub is_empty: bool,
}

/// O orçamento completo: tabela de itens mais o resumo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    pub items: Vec<ItemRecord>,
    pub summary: BudgetSummary,
}
