// src/services/export_service.rs

use genpdf::{elements, style, Element};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};

use crate::{
    common::error::AppError,
    models::budget::{BudgetReport, ItemRecord},
};

// Mesmas colunas, na mesma ordem, nos três formatos.
const COLUMNS: [&str; 6] = [
    "Descrição do Item",
    "Custo Unitário (R$)",
    "Quantidade Mensal",
    "Margem de Lucro (%)",
    "Valor Unitário Final (R$)",
    "Custo Mensal Total (R$)",
];

/// Gera os bytes dos arquivos exportados (CSV, planilha e PDF) a partir
/// das tabelas já calculadas. Não recalcula nada: só formata.
#[derive(Clone)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// CSV com cabeçalho em português e valores numéricos crus.
    pub fn to_csv(&self, items: &[ItemRecord]) -> Result<Vec<u8>, AppError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(COLUMNS)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        for item in items {
            writer
                .write_record(&[
                    item.description.clone(),
                    item.unit_cost.to_string(),
                    item.monthly_quantity.to_string(),
                    item.margin_percent.to_string(),
                    item.final_unit_value.to_string(),
                    item.monthly_total.to_string(),
                ])
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))
    }

    /// Planilha com uma aba "Orçamento", cabeçalho em negrito e células
    /// numéricas de verdade (não texto).
    pub fn to_xlsx(&self, items: &[ItemRecord]) -> Result<Vec<u8>, AppError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Orçamento")
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let bold = Format::new().set_bold();
        for (col, header) in COLUMNS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &bold)
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }

        for (index, item) in items.iter().enumerate() {
            let row = index as u32 + 1;
            worksheet
                .write_string(row, 0, &item.description)
                .and_then(|ws| ws.write_number(row, 1, item.unit_cost.to_f64().unwrap_or_default()))
                .and_then(|ws| ws.write_number(row, 2, f64::from(item.monthly_quantity)))
                .and_then(|ws| {
                    ws.write_number(row, 3, item.margin_percent.to_f64().unwrap_or_default())
                })
                .and_then(|ws| {
                    ws.write_number(row, 4, item.final_unit_value.to_f64().unwrap_or_default())
                })
                .and_then(|ws| {
                    ws.write_number(row, 5, item.monthly_total.to_f64().unwrap_or_default())
                })
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))
    }

    /// PDF paginado com a tabela completa e o total geral, no layout do
    /// relatório impresso da escola.
    pub fn to_pdf(&self, report: &BudgetReport) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title("Orçamento Escolar MDC");
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new("Orçamento Escolar MDC")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Break::new(1.5));

        // --- TABELA DE ITENS ---
        // Pesos das colunas: Descrição (4), Custo (2), Qtd (1), Margem (2),
        // Valor Final (2), Total (2)
        let mut table = elements::TableLayout::new(vec![4, 2, 1, 2, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        // Header da Tabela
        let style_bold = style::Style::new().bold();
        let mut header = table.row();
        for column in COLUMNS {
            header = header.element(elements::Paragraph::new(column).styled(style_bold));
        }
        header.push().expect("Table error");

        // Linhas
        for item in &report.items {
            table
                .row()
                .element(elements::Paragraph::new(item.description.clone()))
                .element(elements::Paragraph::new(format!("R$ {:.2}", item.unit_cost)))
                .element(elements::Paragraph::new(format!("{}", item.monthly_quantity)))
                .element(elements::Paragraph::new(format!(
                    "{}%",
                    item.margin_percent.normalize()
                )))
                .element(elements::Paragraph::new(format!(
                    "R$ {:.2}",
                    item.final_unit_value
                )))
                .element(elements::Paragraph::new(format!(
                    "R$ {:.2}",
                    item.monthly_total
                )))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAIS ---
        let mut total_paragraph = elements::Paragraph::new(format!(
            "CUSTO MENSAL TOTAL: R$ {:.2}",
            report.summary.total
        ));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        doc.push(elements::Break::new(2));

        // --- RODAPÉ ---
        doc.push(
            elements::Paragraph::new(format!(
                "Gerado em: {}",
                chrono::Local::now().format("%d/%m/%Y %H:%M")
            ))
            .styled(style::Style::new().with_font_size(8)),
        );

        // Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn energia() -> ItemRecord {
        ItemRecord {
            description: "Energia".to_string(),
            unit_cost: dec!(800.00),
            monthly_quantity: 1,
            margin_percent: dec!(30),
            final_unit_value: dec!(1040.00),
            monthly_total: dec!(1040.00),
        }
    }

    #[test]
    fn csv_round_trips_the_table() {
        let bytes = ExportService::new().to_csv(&[energia()]).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            COLUMNS.to_vec()
        );

        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "Energia");
        assert_eq!(row[1].parse::<Decimal>().unwrap(), dec!(800.00));
        assert_eq!(&row[2], "1");
        assert_eq!(row[5].parse::<Decimal>().unwrap(), dec!(1040.00));
    }

    #[test]
    fn xlsx_produces_a_zip_container() {
        let bytes = ExportService::new().to_xlsx(&[energia()]).unwrap();

        // Arquivos xlsx são containers zip.
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn pdf_fails_with_specific_error_without_fonts() {
        // Sem a pasta ./fonts no ambiente de teste, o erro precisa ser o
        // de fonte ausente, não um pânico.
        let report = BudgetReport {
            items: vec![energia()],
            summary: crate::models::budget::BudgetSummary {
                total: dec!(1040.00),
                average: dec!(1040.00),
                item_count: 1,
                top_item: None,
                is_empty: false,
            },
        };

        match ExportService::new().to_pdf(&report) {
            Err(AppError::FontNotFound(_)) => {}
            Ok(bytes) => assert!(!bytes.is_empty()),
            Err(other) => panic!("erro inesperado: {other}"),
        }
    }
}
