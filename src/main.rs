//src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    // Rotas do orçamento (tabela, resumo e preview ad-hoc)
    let budget_routes = Router::new()
        .route("/items", get(handlers::budget::get_items))
        .route("/summary", get(handlers::budget::get_summary))
        .route("/preview", post(handlers::budget::preview_budget));

    // Rotas da folha de pagamento
    let payroll_routes = Router::new().route("/table", get(handlers::payroll::get_table));

    // Rotas de exportação (CSV, planilha e PDF)
    let export_routes = Router::new()
        .route("/csv", get(handlers::export::export_csv))
        .route("/xlsx", get(handlers::export::export_xlsx))
        .route("/pdf", get(handlers::export::export_pdf));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/budget", budget_routes)
        .nest("/api/payroll", payroll_routes)
        .nest("/api/export", export_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
