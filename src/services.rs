pub mod budget_service;
pub use budget_service::BudgetService;
pub mod payroll_service;
pub use payroll_service::PayrollService;
pub mod export_service;
pub use export_service::ExportService;
