// src/models/payroll.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Conjunto de encargos sobre a folha, endereçados por nome (ex.: "inss",
/// "fgts"). O conjunto é totalmente dirigido pelos dados: tanto o esquema
/// histórico de 4 componentes (inss/fgts/irpf/decimo) quanto o de 8
/// (com acidente/educacao/dsr/sistema_s/ferias) passam pelo mesmo código.
///
/// Contrato de consulta: componente ausente vale zero, nunca falha.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TaxRateSet(BTreeMap<String, Decimal>);

impl TaxRateSet {
    pub fn new(rates: BTreeMap<String, Decimal>) -> Self {
        Self(rates)
    }

    /// Alíquota do componente, ou zero se ele não existir no conjunto.
    pub fn rate(&self, component: &str) -> Decimal {
        self.0.get(component).copied().unwrap_or(Decimal::ZERO)
    }

    /// Componentes em ordem alfabética (a ordem do BTreeMap), para que a
    /// saída seja idêntica entre execuções.
    pub fn components(&self) -> impl Iterator<Item = (&String, &Decimal)> {
        self.0.iter()
    }

    pub fn component_names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Soma de todas as alíquotas do conjunto.
    pub fn total_rate(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    /// Componentes com alíquota fora de [0, 1). Não é rejeição: a política
    /// do empregador pode passar de 100% em casos extremos, então o cálculo
    /// segue, mas a condição precisa ficar visível para quem configura.
    pub fn out_of_range(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, rate)| rate.is_sign_negative() || **rate >= Decimal::ONE)
            .map(|(name, _)| name.clone())
            .collect()
    }

}

// --- Structs ---

/// Um cargo da folha, como veio da configuração.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleConfig {
    #[schema(example = "Professor")]
    pub title: String,

    #[schema(example = "3000.00")]
    pub base_salary: Decimal,

    #[schema(example = 2)]
    pub headcount: u32,
}

/// Cargo com o custo totalmente carregado: um encargo por componente do
/// conjunto de alíquotas, mais os totais derivados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    #[schema(example = "Professor")]
    pub title: String,

    #[schema(example = "3000.00")]
    pub base_salary: Decimal,

    #[schema(example = 2)]
    pub headcount: u32,

    // base_salary * alíquota, um valor por componente configurado
    pub charges: BTreeMap<String, Decimal>,

    #[schema(example = "840.00")]
    pub total_charges: Decimal,

    // base_salary + total_charges
    #[schema(example = "3840.00")]
    pub cost_per_employee: Decimal,

    // cost_per_employee * headcount
    #[schema(example = "7680.00")]
    pub total_monthly_cost: Decimal,
}

/// A folha resolvida: cargos, componentes ativos, o agregado que vira o
/// custo da linha "Salário Pessoal" e os avisos de configuração.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollTable {
    pub roles: Vec<RoleRecord>,

    #[schema(example = json!(["fgts", "inss"]))]
    pub components: Vec<String>,

    #[schema(example = "7680.00")]
    pub aggregate: Decimal,

    pub warnings: Vec<String>,
}
