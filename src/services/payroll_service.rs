// src/services/payroll_service.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{
        payroll::{PayrollTable, RoleConfig, RoleRecord, TaxRateSet},
        settings::PayrollSettings,
    },
};

/// Resolve a folha de pagamento: expande cada cargo nos encargos por
/// componente e produz o agregado que alimenta a linha "Salário Pessoal".
/// Função pura das entradas, sem estado entre chamadas.
#[derive(Clone)]
pub struct PayrollService;

impl PayrollService {
    pub fn new() -> Self {
        Self
    }

    fn resolve_role(
        &self,
        config: &RoleConfig,
        tax_rates: &TaxRateSet,
    ) -> Result<RoleRecord, AppError> {
        if config.base_salary.is_sign_negative() {
            return Err(AppError::NegativeValue {
                field: "base_salary",
                row: config.title.clone(),
            });
        }

        // Um encargo por componente configurado; componente ausente do
        // conjunto simplesmente não gera linha, nunca erro.
        let mut charges = BTreeMap::new();
        let mut total_charges = Decimal::ZERO;
        for (component, rate) in tax_rates.components() {
            let charge = config.base_salary * *rate;
            total_charges += charge;
            charges.insert(component.clone(), charge);
        }

        let cost_per_employee = config.base_salary + total_charges;
        let total_monthly_cost = cost_per_employee * Decimal::from(config.headcount);

        Ok(RoleRecord {
            title: config.title.clone(),
            base_salary: config.base_salary,
            headcount: config.headcount,
            charges,
            total_charges,
            cost_per_employee,
            total_monthly_cost,
        })
    }

    /// Resolve todos os cargos na ordem de entrada e soma o custo mensal
    /// em um único agregado.
    pub fn resolve(
        &self,
        roles: &[RoleConfig],
        tax_rates: &TaxRateSet,
    ) -> Result<PayrollTable, AppError> {
        // Alíquotas fora de [0,1) seguem no cálculo, mas o aviso precisa
        // chegar a quem configura.
        let warnings: Vec<String> = tax_rates
            .out_of_range()
            .into_iter()
            .map(|component| {
                format!(
                    "Alíquota de '{}' fora do intervalo [0, 1): {}",
                    component,
                    tax_rates.rate(&component)
                )
            })
            .collect();
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        let records = roles
            .iter()
            .map(|role| self.resolve_role(role, tax_rates))
            .collect::<Result<Vec<_>, _>>()?;

        let aggregate = records.iter().map(|r| r.total_monthly_cost).sum();

        Ok(PayrollTable {
            roles: records,
            components: tax_rates.component_names(),
            aggregate,
            warnings,
        })
    }

    /// Atalho a partir da seção crua da configuração.
    pub fn resolve_settings(&self, settings: &PayrollSettings) -> Result<PayrollTable, AppError> {
        let roles = settings.to_role_configs()?;
        self.resolve(&roles, &settings.tax_rates)
    }
}
