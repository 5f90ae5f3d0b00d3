//! Analysis workbook export.
//!
//! The workbook is described first as plain [`SheetLayout`] values so the
//! content can be checked without parsing xlsx, then rendered with
//! `rust_xlsxwriter`.

use chrono::NaiveDate;
use opticast_core::analysis::{AnalysisReport, AnalysisType, Frequency};
use opticast_core::waterfall::{BarKind, WaterfallBar};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use thiserror::Error;
use tracing::debug;

/// Executive summary sheet.
pub const SUMMARY_SHEET: &str = "Resumen_Gerencial";
/// Per-category detail sheet.
pub const DETAIL_SHEET: &str = "Matriz_Detalle";
/// Long-term plan sheet.
pub const PLAN_SHEET: &str = "Plan_Largo_Plazo";
/// Assumptions sheet.
pub const ASSUMPTIONS_SHEET: &str = "Supuestos";

const DEFAULT_HISTORICAL_PERIODS: i64 = 12;
const DEFAULT_FORECAST_PERIODS: i64 = 12;
const DEFAULT_BUDGET_PERIODS: i64 = 4;
const DEFAULT_FREQUENCY_LABEL: &str = "Mensual/Anual";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failure inside the xlsx writer.
    #[error("Failed to create Excel: {0}")]
    Xlsx(#[from] XlsxError),

    /// Layout does not fit a worksheet.
    #[error("Layout exceeds worksheet bounds: {0}")]
    Bounds(String),
}

/// One worksheet cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Plain text.
    Text(String),
    /// Bold text (titles and column headers).
    Heading(String),
    /// Numeric value.
    Number(Decimal),
    /// Fraction shown as a percentage (0.042 -> 4.20%).
    Percent(Decimal),
    /// Nothing written.
    Empty,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    fn heading(value: impl Into<String>) -> Self {
        Self::Heading(value.into())
    }

    fn integer(value: impl Into<i64>) -> Self {
        Self::Number(Decimal::from(value.into()))
    }
}

/// Content of one worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    /// Worksheet name.
    pub name: &'static str,
    /// Column widths in characters, from column A.
    pub column_widths: Vec<u16>,
    /// Rows from row 1. An empty row leaves a gap.
    pub rows: Vec<Vec<Cell>>,
}

impl SheetLayout {
    /// Returns the first row whose leading cell reads `label`.
    pub fn row_labelled(&self, label: &str) -> Option<&[Cell]> {
        self.rows
            .iter()
            .find(|row| match row.first() {
                Some(Cell::Text(text) | Cell::Heading(text)) => text == label,
                _ => false,
            })
            .map(Vec::as_slice)
    }
}

/// Download name for an export generated on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("OptiCast_Analysis_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Describes the four export sheets for a report.
pub fn workbook_layout(report: &AnalysisReport) -> Vec<SheetLayout> {
    vec![
        summary_sheet(report),
        detail_sheet(report),
        plan_sheet(report),
        assumptions_sheet(report),
    ]
}

/// Renders a report as xlsx bytes.
///
/// # Errors
///
/// Returns `ExportError` if the writer rejects the workbook.
pub fn render_xlsx(report: &AnalysisReport) -> Result<Vec<u8>, ExportError> {
    let formats = CellFormats::new();
    let mut workbook = Workbook::new();

    for layout in workbook_layout(report) {
        let sheet = workbook.add_worksheet();
        write_sheet(sheet, &layout, &formats)?;
    }

    let buffer = workbook.save_to_buffer()?;

    debug!(
        analysis_id = %report.analysis_id,
        bytes = buffer.len(),
        "Rendered analysis workbook"
    );

    Ok(buffer)
}

fn summary_sheet(report: &AnalysisReport) -> SheetLayout {
    let kpis = &report.kpis;
    let forecast_year = report.trend.first().map(|p| p.year);
    let budget_year = report.trend.get(1).map(|p| p.year);

    let analysis_label = match report.analysis_type {
        AnalysisType::Standard => "Estándar (Automático)",
        AnalysisType::Custom => "Personalizado",
    };
    let variance_status = if kpis.variance > Decimal::ZERO {
        "Incremento Costo"
    } else {
        "Ahorro"
    };
    let variance_pct = kpis
        .variance_pct
        .map_or_else(|| Cell::text("N/A"), |pct| Cell::Percent(pct / Decimal::ONE_HUNDRED));

    let mut rows = vec![
        vec![Cell::heading("REPORTE FINANCIERO - OPTICAST MINING")],
        vec![
            Cell::text("Fecha de Generación"),
            Cell::Text(report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ],
        vec![Cell::text("Tipo de Análisis"), Cell::text(analysis_label)],
        vec![],
        vec![Cell::heading("KPIs PRINCIPALES (USD M)")],
        vec![Cell::heading("Concepto"), Cell::heading("Monto"), Cell::heading("Estado")],
        vec![
            Cell::Text(with_year("Forecast", forecast_year, "(Cierre)")),
            Cell::Number(kpis.forecast_total),
            Cell::text("Base"),
        ],
        vec![
            Cell::Text(with_year("Budget", budget_year, "(Target)")),
            Cell::Number(kpis.budget_total),
            Cell::text("Meta"),
        ],
        vec![
            Cell::text("Variación YoY"),
            Cell::Number(kpis.variance),
            Cell::text(variance_status),
        ],
        vec![Cell::text("Variación %"), variance_pct],
        vec![],
        vec![Cell::heading("--- DATA PARA GRÁFICO CASCADA (BRIDGE) ---")],
        vec![Cell::text(
            "La siguiente tabla contiene los datos calculados para generar el gráfico de cascada en Excel.",
        )],
        vec![],
        vec![
            Cell::heading("Categoría / Paso"),
            Cell::heading("Valor Absoluto"),
            Cell::heading("Acumulado Inicio"),
            Cell::heading("Tipo de Movimiento"),
        ],
    ];

    rows.extend(report.waterfall.iter().map(bridge_row));

    SheetLayout {
        name: SUMMARY_SHEET,
        column_widths: vec![30, 20, 20, 20],
        rows,
    }
}

fn bridge_row(bar: &WaterfallBar) -> Vec<Cell> {
    let movement = match bar.kind {
        BarKind::Total => "Total",
        BarKind::Increase => "Incremento",
        BarKind::Decrease => "Disminución",
    };

    vec![
        Cell::Text(bar.label.clone()),
        Cell::Number(bar.signed_value.unwrap_or(bar.magnitude)),
        Cell::Number(bar.base_offset),
        Cell::text(movement),
    ]
}

fn detail_sheet(report: &AnalysisReport) -> SheetLayout {
    let forecast_year = report.trend.first().map(|p| p.year);
    let budget_year = report.trend.get(1).map(|p| p.year);

    let mut rows = vec![vec![
        Cell::heading("Categoría Driver"),
        Cell::heading("Ítem Detalle"),
        Cell::Heading(with_year("Forecast", forecast_year, "(M$)")),
        Cell::Heading(with_year("Budget", budget_year, "(M$)")),
        Cell::heading("Factor Aplicado"),
        Cell::heading("Variación %"),
        Cell::heading("Variación Abs (M$)"),
    ]];

    rows.extend(report.results.iter().map(|result| {
        vec![
            Cell::Text(result.category.clone()),
            Cell::Text(result.detail_label.clone()),
            Cell::Number(result.forecast_value),
            Cell::Number(result.budget_value),
            Cell::Number(result.factor),
            result.variance_ratio().map_or(Cell::Empty, Cell::Percent),
            Cell::Number(result.delta),
        ]
    }));

    SheetLayout {
        name: DETAIL_SHEET,
        column_widths: vec![20, 25, 18, 18, 15, 14, 18],
        rows,
    }
}

fn plan_sheet(report: &AnalysisReport) -> SheetLayout {
    let mut rows = vec![vec![Cell::heading("Año"), Cell::heading("Proyección Total (M$)")]];

    rows.extend(
        report
            .trend
            .iter()
            .map(|point| vec![Cell::integer(point.year), Cell::Number(point.value)]),
    );

    SheetLayout {
        name: PLAN_SHEET,
        column_widths: vec![10, 24],
        rows,
    }
}

fn assumptions_sheet(report: &AnalysisReport) -> SheetLayout {
    let (historical, forecast, budget, frequency) = match report.params {
        Some(params) => (
            i64::from(params.historical_periods),
            i64::from(params.forecast_periods),
            i64::from(params.budget_periods),
            frequency_label(params.frequency),
        ),
        None => (
            DEFAULT_HISTORICAL_PERIODS,
            DEFAULT_FORECAST_PERIODS,
            DEFAULT_BUDGET_PERIODS,
            DEFAULT_FREQUENCY_LABEL,
        ),
    };

    let mut rows = vec![
        vec![Cell::heading("CONFIGURACIÓN DE PROYECCIÓN")],
        vec![Cell::heading("Parámetro"), Cell::heading("Valor Seleccionado")],
        vec![Cell::text("Periodos Históricos"), Cell::integer(historical)],
        vec![Cell::text("Periodos Forecast"), Cell::integer(forecast)],
        vec![Cell::text("Periodos Budget"), Cell::integer(budget)],
        vec![Cell::text("Frecuencia"), Cell::text(frequency)],
        vec![],
        vec![Cell::heading("DRIVERS ESTRATÉGICOS APLICADOS")],
        vec![
            Cell::heading("Item / Driver"),
            Cell::heading("Factor"),
            Cell::heading("Justificación"),
        ],
    ];

    rows.extend(report.drivers.drivers().iter().map(|driver| {
        vec![
            Cell::Text(driver.item.clone()),
            Cell::Number(driver.factor),
            Cell::Text(driver.justification.clone()),
        ]
    }));

    SheetLayout {
        name: ASSUMPTIONS_SHEET,
        column_widths: vec![30, 20, 60],
        rows,
    }
}

fn frequency_label(frequency: Frequency) -> &'static str {
    match frequency {
        Frequency::Weekly => "Semanal",
        Frequency::Monthly => "Mensual",
        Frequency::Annual => "Anual",
    }
}

fn with_year(prefix: &str, year: Option<i32>, suffix: &str) -> String {
    match year {
        Some(year) => format!("{prefix} {year} {suffix}"),
        None => format!("{prefix} {suffix}"),
    }
}

struct CellFormats {
    heading: Format,
    number: Format,
    percent: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            heading: Format::new().set_bold(),
            number: Format::new().set_num_format("#,##0.00###"),
            percent: Format::new().set_num_format("0.00%"),
        }
    }
}

fn write_sheet(sheet: &mut Worksheet, layout: &SheetLayout, formats: &CellFormats) -> Result<(), ExportError> {
    sheet.set_name(layout.name)?;

    for (col, width) in layout.column_widths.iter().enumerate() {
        sheet.set_column_width(column_index(col)?, *width)?;
    }

    for (row_idx, row) in layout.rows.iter().enumerate() {
        let row_num = u32::try_from(row_idx).map_err(|_| ExportError::Bounds(format!("row {row_idx}")))?;

        for (col_idx, cell) in row.iter().enumerate() {
            let col = column_index(col_idx)?;
            match cell {
                Cell::Text(text) => {
                    sheet.write_string(row_num, col, text)?;
                }
                Cell::Heading(text) => {
                    sheet.write_string_with_format(row_num, col, text, &formats.heading)?;
                }
                Cell::Number(value) => {
                    sheet.write_number_with_format(row_num, col, to_f64(*value)?, &formats.number)?;
                }
                Cell::Percent(value) => {
                    sheet.write_number_with_format(row_num, col, to_f64(*value)?, &formats.percent)?;
                }
                Cell::Empty => {}
            }
        }
    }

    Ok(())
}

fn column_index(col: usize) -> Result<u16, ExportError> {
    u16::try_from(col).map_err(|_| ExportError::Bounds(format!("column {col}")))
}

fn to_f64(value: Decimal) -> Result<f64, ExportError> {
    value
        .to_f64()
        .ok_or_else(|| ExportError::Bounds(format!("value {value} not representable")))
}
