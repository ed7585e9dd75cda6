// src/config.rs

use std::env;

use anyhow::Context;

use crate::{
    models::settings::BudgetSettings,
    services::{BudgetService, ExportService, PayrollService},
};

#[derive(Clone)]
pub struct AppState {
    // A configuração é carregada uma vez e tratada como imutável pelo
    // resto da aplicação; os serviços recalculam tudo a partir dela.
    pub settings: BudgetSettings,
    pub budget_service: BudgetService,
    pub payroll_service: PayrollService,
    pub export_service: ExportService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // ORCAMENTO_CONFIG aponta para um arquivo JSON com as seções
        // `items` e `payroll`. Sem a variável, usamos os dados de exemplo.
        let settings = match env::var("ORCAMENTO_CONFIG") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Falha ao ler o arquivo de configuração '{}'", path))?;
                let settings: BudgetSettings = serde_json::from_str(&raw)
                    .with_context(|| format!("Configuração inválida em '{}'", path))?;
                tracing::info!("✅ Configuração carregada de '{}'", path);
                settings
            }
            Err(_) => {
                tracing::info!("ORCAMENTO_CONFIG não definida, usando os dados de exemplo.");
                BudgetSettings::default()
            }
        };

        // --- Monta o gráfico de dependências ---
        let payroll_service = PayrollService::new();
        let budget_service = BudgetService::new(payroll_service.clone());
        let export_service = ExportService::new();

        // Se a configuração não fecha um orçamento válido, a aplicação não
        // deve subir. Rodar o pipeline completo aqui valida tudo de uma vez.
        let report = budget_service
            .build_budget(&settings)
            .context("Configuração do orçamento inválida")?;
        tracing::info!(
            "✅ Orçamento calculado: {} itens, custo mensal total R$ {:.2}",
            report.summary.item_count,
            report.summary.total
        );

        Ok(Self {
            settings,
            budget_service,
            payroll_service,
            export_service,
        })
    }
}
