// src/models/settings.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    common::error::AppError,
    models::{
        budget::ItemConfig,
        payroll::{RoleConfig, TaxRateSet},
    },
};

/// A configuração crua do orçamento, no formato do arquivo apontado por
/// `ORCAMENTO_CONFIG`: duas seções de listas paralelas, alinhadas por
/// índice. É carregada uma vez na inicialização e tratada como imutável;
/// todo o resto é recalculado a partir dela a cada requisição.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSettings {
    pub items: ItemsSettings,
    pub payroll: PayrollSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsSettings {
    pub descriptions: Vec<String>,
    pub unit_costs: Vec<Decimal>,
    pub quantities: Vec<u32>,
    pub margins: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSettings {
    pub roles: Vec<String>,
    pub base_salaries: Vec<Decimal>,
    pub headcounts: Vec<u32>,
    pub tax_rates: TaxRateSet,
}

impl ItemsSettings {
    /// Converte as listas paralelas em linhas de item. Tamanhos diferentes
    /// são erro de configuração, nunca um default silencioso.
    pub fn to_item_configs(&self) -> Result<Vec<ItemConfig>, AppError> {
        let len = self.descriptions.len();
        if self.unit_costs.len() != len || self.quantities.len() != len || self.margins.len() != len
        {
            return Err(AppError::ConfigLengthMismatch {
                section: "items",
                detail: format!(
                    "descriptions={}, unit_costs={}, quantities={}, margins={}",
                    len,
                    self.unit_costs.len(),
                    self.quantities.len(),
                    self.margins.len()
                ),
            });
        }

        Ok((0..len)
            .map(|i| ItemConfig {
                description: self.descriptions[i].clone(),
                unit_cost: self.unit_costs[i],
                monthly_quantity: self.quantities[i],
                margin_percent: self.margins[i],
            })
            .collect())
    }
}

impl PayrollSettings {
    pub fn to_role_configs(&self) -> Result<Vec<RoleConfig>, AppError> {
        let len = self.roles.len();
        if self.base_salaries.len() != len || self.headcounts.len() != len {
            return Err(AppError::ConfigLengthMismatch {
                section: "payroll",
                detail: format!(
                    "roles={}, base_salaries={}, headcounts={}",
                    len,
                    self.base_salaries.len(),
                    self.headcounts.len()
                ),
            });
        }

        Ok((0..len)
            .map(|i| RoleConfig {
                title: self.roles[i].clone(),
                base_salary: self.base_salaries[i],
                headcount: self.headcounts[i],
            })
            .collect())
    }
}

// Dados de exemplo usados quando não há configuração externa. O custo de
// "Salário Pessoal" aqui é apenas um placeholder: ele é sempre substituído
// pelo agregado da folha antes do cálculo.
impl Default for BudgetSettings {
    fn default() -> Self {
        let dec = |s: &str| s.parse::<Decimal>().expect("literal decimal inválido");

        let descriptions = [
            "Salário Pessoal",
            "Energia",
            "Aluguel",
            "Internet",
            "Material de Limpeza",
            "Material de Apoio",
            "Marketing",
            "Franquia",
            "Sistema",
        ];
        let unit_costs = [
            "7000.00", "800.00", "2500.00", "150.00", "400.00", "600.00", "250.00", "550.00",
            "150.00",
        ];

        let mut tax_rates = BTreeMap::new();
        tax_rates.insert("inss".to_string(), dec("0.20"));
        tax_rates.insert("fgts".to_string(), dec("0.08"));
        tax_rates.insert("decimo".to_string(), dec("0.0833"));
        tax_rates.insert("ferias".to_string(), dec("0.1111"));
        tax_rates.insert("acidente".to_string(), dec("0.02"));
        tax_rates.insert("educacao".to_string(), dec("0.025"));
        tax_rates.insert("dsr".to_string(), dec("0.05"));
        tax_rates.insert("sistema_s".to_string(), dec("0.058"));

        Self {
            items: ItemsSettings {
                descriptions: descriptions.iter().map(|d| d.to_string()).collect(),
                unit_costs: unit_costs.iter().map(|c| dec(c)).collect(),
                quantities: vec![1; descriptions.len()],
                margins: vec![dec("30"); descriptions.len()],
            },
            payroll: PayrollSettings {
                roles: vec![
                    "Professor".to_string(),
                    "Coordenador".to_string(),
                    "Auxiliar de Limpeza".to_string(),
                ],
                base_salaries: vec![dec("3000.00"), dec("4500.00"), dec("1800.00")],
                headcounts: vec![2, 1, 1],
                tax_rates: TaxRateSet::new(tax_rates),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_settings_convert_cleanly() {
        let settings = BudgetSettings::default();

        let items = settings.items.to_item_configs().unwrap();
        assert_eq!(items.len(), 9);
        assert_eq!(items[0].description, "Salário Pessoal");
        assert_eq!(items[1].unit_cost, dec!(800.00));

        let roles = settings.payroll.to_role_configs().unwrap();
        assert_eq!(roles.len(), 3);
        assert_eq!(roles[0].headcount, 2);
    }

    #[test]
    fn item_length_mismatch_is_config_error() {
        let mut settings = BudgetSettings::default();
        settings.items.margins.pop();

        let err = settings.items.to_item_configs().unwrap_err();
        assert!(matches!(
            err,
            AppError::ConfigLengthMismatch { section: "items", .. }
        ));
    }

    #[test]
    fn payroll_length_mismatch_is_config_error() {
        let mut settings = BudgetSettings::default();
        settings.payroll.base_salaries.push(dec!(1000));

        let err = settings.payroll.to_role_configs().unwrap_err();
        assert!(matches!(
            err,
            AppError::ConfigLengthMismatch { section: "payroll", .. }
        ));
    }
}
