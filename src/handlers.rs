pub mod budget;
pub mod export;
pub mod payroll;
