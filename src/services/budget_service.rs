// src/services/budget_service.rs

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{
        budget::{BudgetReport, BudgetSummary, ItemConfig, ItemRecord, TopItemEntry, PERSONNEL_ITEM},
        settings::BudgetSettings,
    },
    services::payroll_service::PayrollService,
};

/// Monta o orçamento completo: resolve a folha, injeta o agregado na linha
/// "Salário Pessoal", precifica os itens e calcula o resumo. Pipeline de
/// passada única, idempotente: entradas iguais produzem saídas idênticas.
#[derive(Clone)]
pub struct BudgetService {
    payroll_service: PayrollService,
}

impl BudgetService {
    pub fn new(payroll_service: PayrollService) -> Self {
        Self { payroll_service }
    }

    fn resolve_item(config: &ItemConfig) -> Result<ItemRecord, AppError> {
        if config.unit_cost.is_sign_negative() {
            return Err(AppError::NegativeValue {
                field: "unit_cost",
                row: config.description.clone(),
            });
        }
        if config.margin_percent.is_sign_negative() {
            return Err(AppError::NegativeValue {
                field: "margin_percent",
                row: config.description.clone(),
            });
        }

        let final_unit_value =
            config.unit_cost * (Decimal::ONE + config.margin_percent / Decimal::ONE_HUNDRED);
        let monthly_total = final_unit_value * Decimal::from(config.monthly_quantity);

        Ok(ItemRecord {
            description: config.description.clone(),
            unit_cost: config.unit_cost,
            monthly_quantity: config.monthly_quantity,
            margin_percent: config.margin_percent,
            final_unit_value,
            monthly_total,
        })
    }

    /// Precifica os itens preservando a ordem de entrada. Nenhuma
    /// dependência entre linhas: a substituição da linha de pessoal já
    /// aconteceu antes de chegar aqui.
    pub fn resolve_items(&self, configs: &[ItemConfig]) -> Result<Vec<ItemRecord>, AppError> {
        let mut seen = HashSet::new();
        for config in configs {
            if !seen.insert(config.description.as_str()) {
                return Err(AppError::DuplicateItem(config.description.clone()));
            }
        }

        configs.iter().map(Self::resolve_item).collect()
    }

    /// O pipeline completo da especificação: folha -> agregado -> itens
    /// ajustados -> tabela final -> resumo.
    pub fn build_budget(&self, settings: &BudgetSettings) -> Result<BudgetReport, AppError> {
        let mut items = settings.items.to_item_configs()?;
        let payroll = self.payroll_service.resolve_settings(&settings.payroll)?;

        // A linha de pessoal é obrigatória: sem ela o orçamento não tem
        // onde receber o custo da folha.
        let personnel = items
            .iter_mut()
            .find(|item| item.description == PERSONNEL_ITEM)
            .ok_or_else(|| AppError::PersonnelItemMissing(PERSONNEL_ITEM.to_string()))?;
        personnel.unit_cost = payroll.aggregate;
        personnel.monthly_quantity = 1;

        let records = self.resolve_items(&items)?;
        let summary = Self::summarize(&records);
        if summary.is_empty {
            tracing::warn!("Orçamento vazio: todos os itens têm custo mensal zero.");
        }

        Ok(BudgetReport {
            items: records,
            summary,
        })
    }

    fn summarize(items: &[ItemRecord]) -> BudgetSummary {
        let total: Decimal = items.iter().map(|item| item.monthly_total).sum();
        let item_count = items.len();

        let average = if item_count == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(item_count as u64)
        };

        // Orçamento vazio (tudo zerado): estado definido, sem divisão por
        // zero na fatia do item mais custoso.
        let top_item = if total.is_zero() {
            None
        } else {
            let mut top: Option<&ItemRecord> = None;
            for item in items {
                if top.is_none_or(|t| item.monthly_total > t.monthly_total) {
                    top = Some(item);
                }
            }
            top.map(|item| TopItemEntry {
                description: item.description.clone(),
                monthly_total: item.monthly_total,
                share_percent: (item.monthly_total / total * Decimal::ONE_HUNDRED).round_dp(2),
            })
        };

        BudgetSummary {
            total,
            average,
            item_count,
            top_item,
            is_empty: total.is_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        payroll::TaxRateSet,
        settings::{ItemsSettings, PayrollSettings},
    };
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn service() -> BudgetService {
        BudgetService::new(PayrollService::new())
    }

    fn item(description: &str, unit_cost: Decimal, quantity: u32, margin: Decimal) -> ItemConfig {
        ItemConfig {
            description: description.to_string(),
            unit_cost,
            monthly_quantity: quantity,
            margin_percent: margin,
        }
    }

    /// Professor com salário 3000, 2 pessoas, inss 20% + fgts 8%, mais a
    /// linha de pessoal com margem 30: o cenário de referência completo.
    fn reference_settings() -> BudgetSettings {
        BudgetSettings {
            items: ItemsSettings {
                descriptions: vec!["Salário Pessoal".to_string(), "Energia".to_string()],
                unit_costs: vec![dec!(0), dec!(800)],
                quantities: vec![5, 1],
                margins: vec![dec!(30), dec!(30)],
            },
            payroll: PayrollSettings {
                roles: vec!["Professor".to_string()],
                base_salaries: vec![dec!(3000)],
                headcounts: vec![2],
                tax_rates: TaxRateSet::new(
                    [
                        ("inss".to_string(), dec!(0.20)),
                        ("fgts".to_string(), dec!(0.08)),
                    ]
                    .into_iter()
                    .collect(),
                ),
            },
        }
    }

    #[test]
    fn resolves_item_with_margin() {
        let records = service()
            .resolve_items(&[item("Energia", dec!(800), 1, dec!(30))])
            .unwrap();

        assert_eq!(records[0].final_unit_value, dec!(1040.00));
        assert_eq!(records[0].monthly_total, dec!(1040.00));
    }

    #[test]
    fn zero_quantity_zeroes_total_regardless_of_cost() {
        let records = service()
            .resolve_items(&[item("Aluguel", dec!(2500), 0, dec!(45))])
            .unwrap();

        assert_eq!(records[0].final_unit_value, dec!(3625.00));
        assert_eq!(records[0].monthly_total, dec!(0));
    }

    #[test]
    fn preserves_input_order() {
        let configs = [
            item("Energia", dec!(800), 1, dec!(30)),
            item("Aluguel", dec!(2500), 1, dec!(30)),
            item("Internet", dec!(150), 1, dec!(30)),
        ];

        let records = service().resolve_items(&configs).unwrap();
        let order: Vec<&str> = records.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(order, ["Energia", "Aluguel", "Internet"]);
    }

    #[test]
    fn negative_cost_fails_fast() {
        let err = service()
            .resolve_items(&[item("Energia", dec!(-1), 1, dec!(30))])
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::NegativeValue { field: "unit_cost", .. }
        ));
    }

    #[test]
    fn negative_margin_fails_fast() {
        let err = service()
            .resolve_items(&[item("Energia", dec!(800), 1, dec!(-5))])
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::NegativeValue { field: "margin_percent", .. }
        ));
    }

    #[test]
    fn duplicate_description_fails_fast() {
        let configs = [
            item("Energia", dec!(800), 1, dec!(30)),
            item("Energia", dec!(900), 1, dec!(30)),
        ];

        let err = service().resolve_items(&configs).unwrap_err();
        assert!(matches!(err, AppError::DuplicateItem(_)));
    }

    #[test]
    fn personnel_line_receives_payroll_aggregate() {
        let report = service().build_budget(&reference_settings()).unwrap();

        // Agregado da folha: 3000 * 1.28 * 2 = 7680.
        let personnel = &report.items[0];
        assert_eq!(personnel.description, "Salário Pessoal");
        assert_eq!(personnel.unit_cost, dec!(7680));
        // Quantidade forçada para 1, mesmo configurada como 5.
        assert_eq!(personnel.monthly_quantity, 1);
        assert_eq!(personnel.final_unit_value, dec!(9984.00));
        assert_eq!(personnel.monthly_total, dec!(9984.00));
    }

    #[test]
    fn summary_metrics_from_reference_scenario() {
        let report = service().build_budget(&reference_settings()).unwrap();

        // 9984 (pessoal) + 1040 (energia)
        assert_eq!(report.summary.total, dec!(11024.00));
        assert_eq!(report.summary.average, dec!(5512.00));
        assert_eq!(report.summary.item_count, 2);
        assert!(!report.summary.is_empty);

        let top = report.summary.top_item.as_ref().unwrap();
        assert_eq!(top.description, "Salário Pessoal");
        assert_eq!(top.monthly_total, dec!(9984.00));
        assert_eq!(top.share_percent, dec!(90.57));
    }

    #[test]
    fn missing_personnel_line_is_config_error() {
        let mut settings = reference_settings();
        settings.items.descriptions[0] = "Folha".to_string();

        let err = service().build_budget(&settings).unwrap_err();
        assert!(matches!(err, AppError::PersonnelItemMissing(_)));
    }

    #[test]
    fn empty_budget_reports_defined_state() {
        let mut settings = reference_settings();
        settings.items.unit_costs = vec![dec!(0), dec!(0)];
        settings.payroll.base_salaries = vec![dec!(0)];

        let report = service().build_budget(&settings).unwrap();

        assert!(report.summary.is_empty);
        assert_eq!(report.summary.total, dec!(0));
        assert_eq!(report.summary.average, dec!(0));
        assert!(report.summary.top_item.is_none());
    }

    #[test]
    fn no_items_at_all_reports_empty_without_fault() {
        let summary = BudgetService::summarize(&[]);

        assert!(summary.is_empty);
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.average, dec!(0));
        assert!(summary.top_item.is_none());
    }

    #[test]
    fn pipeline_is_idempotent() {
        let settings = reference_settings();
        let service = service();

        let first = service.build_budget(&settings).unwrap();
        let second = service.build_budget(&settings).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn default_dataset_builds_a_budget() {
        let report = service().build_budget(&BudgetSettings::default()).unwrap();

        assert_eq!(report.summary.item_count, 9);
        assert!(!report.summary.is_empty);
        // A linha de pessoal domina o orçamento de exemplo.
        assert_eq!(
            report.summary.top_item.as_ref().unwrap().description,
            "Salário Pessoal"
        );
    }

    proptest! {
        /// final_unit_value é exatamente unit_cost * (1 + margem/100) e é
        /// monotônico não-decrescente nas duas entradas.
        #[test]
        fn final_value_formula_and_monotonicity(
            cost in 0i64..10_000_000,
            margin in 0i64..500,
        ) {
            let cost = Decimal::from(cost);
            let margin = Decimal::from(margin);

            let record = BudgetService::resolve_item(&ItemConfig {
                description: "Item".to_string(),
                unit_cost: cost,
                monthly_quantity: 1,
                margin_percent: margin,
            })
            .unwrap();

            let expected = cost * (Decimal::ONE + margin / Decimal::ONE_HUNDRED);
            prop_assert_eq!(record.final_unit_value, expected);

            let bumped = BudgetService::resolve_item(&ItemConfig {
                description: "Item".to_string(),
                unit_cost: cost + Decimal::ONE,
                monthly_quantity: 1,
                margin_percent: margin + Decimal::ONE,
            })
            .unwrap();
            prop_assert!(bumped.final_unit_value >= record.final_unit_value);
        }

        /// monthly_total == final_unit_value * quantidade, para qualquer
        /// quantidade, inclusive zero.
        #[test]
        fn monthly_total_scales_with_quantity(
            cost in 0i64..10_000_000,
            quantity in 0u32..1000,
        ) {
            let cost = Decimal::from(cost);

            let record = BudgetService::resolve_item(&ItemConfig {
                description: "Item".to_string(),
                unit_cost: cost,
                monthly_quantity: quantity,
                margin_percent: Decimal::from(30),
            })
            .unwrap();

            prop_assert_eq!(
                record.monthly_total,
                record.final_unit_value * Decimal::from(quantity)
            );
        }
    }
}
