//! CSV upload parsing.
//!
//! Accepts any CSV with a category column and an amount column, in any
//! order and letter case. Extra columns are ignored.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::str::FromStr;

use csv::StringRecord;
use opticast_core::forecast::{CategoryRecord, MAX_BASE_AMOUNT};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

const CATEGORY_HEADERS: &[&str] = &["category", "categoria", "categoría", "item"];
const AMOUNT_HEADERS: &[&str] = &["amount", "base_amount", "monto", "forecast"];

/// Errors raised while reading an upload.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required column not present in the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// Amount could not be parsed as a decimal number.
    #[error("Line {line}: invalid amount '{value}'")]
    InvalidAmount {
        /// 1-based line number.
        line: usize,
        /// Raw field value.
        value: String,
    },

    /// Amount below zero.
    #[error("Line {line}: negative amount for '{category}'")]
    NegativeAmount {
        /// 1-based line number.
        line: usize,
        /// Category key.
        category: String,
    },

    /// Amount above the per-category ceiling.
    #[error("Line {line}: amount for '{category}' exceeds the maximum of {max}", max = MAX_BASE_AMOUNT)]
    AmountOutOfRange {
        /// 1-based line number.
        line: usize,
        /// Category key.
        category: String,
    },

    /// Category cell empty on a non-blank row.
    #[error("Line {line}: category is empty")]
    EmptyCategory {
        /// 1-based line number.
        line: usize,
    },

    /// Category key already seen.
    #[error("Line {line}: duplicate category '{category}'")]
    DuplicateCategory {
        /// 1-based line number.
        line: usize,
        /// Category key.
        category: String,
    },
}

/// Parses category records from CSV.
///
/// # Errors
///
/// Returns an `IngestError` on the first malformed row or missing column.
pub fn parse_categories<R: Read>(reader: R) -> Result<Vec<CategoryRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = build_header_map(reader.headers()?);
    let category_col = find_column(&headers, CATEGORY_HEADERS).ok_or(IngestError::MissingColumn("category"))?;
    let amount_col = find_column(&headers, AMOUNT_HEADERS).ok_or(IngestError::MissingColumn("amount"))?;

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1; the reader skips empty lines, so prefer its own position
        let line = record
            .position()
            .and_then(|pos| usize::try_from(pos.line()).ok())
            .unwrap_or(idx + 2);

        if record.iter().all(str::is_empty) {
            continue;
        }

        let category = record.get(category_col).unwrap_or_default();
        if category.is_empty() {
            return Err(IngestError::EmptyCategory { line });
        }

        let raw_amount = record.get(amount_col).unwrap_or_default();
        let amount = parse_amount(raw_amount).ok_or_else(|| IngestError::InvalidAmount {
            line,
            value: raw_amount.to_string(),
        })?;

        if amount < Decimal::ZERO {
            return Err(IngestError::NegativeAmount {
                line,
                category: category.to_string(),
            });
        }
        if amount > MAX_BASE_AMOUNT {
            return Err(IngestError::AmountOutOfRange {
                line,
                category: category.to_string(),
            });
        }
        if !seen.insert(category.to_string()) {
            return Err(IngestError::DuplicateCategory {
                line,
                category: category.to_string(),
            });
        }

        records.push(CategoryRecord::new(category, amount));
    }

    debug!(rows = records.len(), "Parsed category upload");

    Ok(records)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header(name), idx))
        .collect()
}

fn normalize_header(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a BOM
    name.trim().trim_start_matches('\u{feff}').to_lowercase()
}

fn find_column(headers: &HashMap<String, usize>, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|name| headers.get(*name).copied())
}

/// Parses an amount, tolerating currency signs and thousands separators.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_parses_basic_upload() {
        let csv = "category,amount\nLabor,450\nFuel,300\n";

        let records = parse_categories(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                CategoryRecord::new("Labor", dec!(450)),
                CategoryRecord::new("Fuel", dec!(300)),
            ]
        );
    }

    #[rstest]
    #[case("Category,Amount")]
    #[case("CATEGORIA,MONTO")]
    #[case("Categoría,Forecast")]
    #[case("item,base_amount")]
    #[case("\u{feff}category,amount")]
    fn test_header_aliases(#[case] header: &str) {
        let csv = format!("{header}\nPower,200\n");

        let records = parse_categories(csv.as_bytes()).unwrap();

        assert_eq!(records, vec![CategoryRecord::new("Power", dec!(200))]);
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let csv = "notes,amount,unit,category\nq4 close,120.5,MUSD,Contractors\n";

        let records = parse_categories(csv.as_bytes()).unwrap();

        assert_eq!(records, vec![CategoryRecord::new("Contractors", dec!(120.5))]);
    }

    #[test]
    fn test_trims_fields_and_skips_blank_rows() {
        let csv = "category,amount\n  Labor , 450 \n,\n\nFuel,\"1,300.25\"\n";

        let records = parse_categories(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                CategoryRecord::new("Labor", dec!(450)),
                CategoryRecord::new("Fuel", dec!(1300.25)),
            ]
        );
    }

    #[test]
    fn test_currency_sign_is_stripped() {
        let records = parse_categories("category,amount\nPower,$200\n".as_bytes()).unwrap();
        assert_eq!(records[0].base_amount, dec!(200));
    }

    #[test]
    fn test_header_only_is_empty() {
        let records = parse_categories("category,amount\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_amount_column() {
        let result = parse_categories("category,notes\nLabor,x\n".as_bytes());
        assert!(matches!(result, Err(IngestError::MissingColumn("amount"))));
    }

    #[test]
    fn test_missing_category_column() {
        let result = parse_categories("name,amount\nLabor,1\n".as_bytes());
        assert!(matches!(result, Err(IngestError::MissingColumn("category"))));
    }

    #[test]
    fn test_invalid_amount_reports_line() {
        let result = parse_categories("category,amount\nLabor,450\nFuel,abc\n".as_bytes());

        match result {
            Err(IngestError::InvalidAmount { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_amount_value_is_invalid() {
        let result = parse_categories("category,amount\nLabor\n".as_bytes());
        assert!(matches!(result, Err(IngestError::InvalidAmount { line: 2, .. })));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = parse_categories("category,amount\nFuel,-5\n".as_bytes());
        assert!(matches!(
            result,
            Err(IngestError::NegativeAmount { line: 2, ref category }) if category == "Fuel"
        ));
    }

    #[test]
    fn test_amount_above_ceiling_rejected() {
        let csv = "category,amount\nLabor,1000000000000000\nFuel,70000000000000000000000000000\n";

        let result = parse_categories(csv.as_bytes());

        assert!(matches!(
            result,
            Err(IngestError::AmountOutOfRange { line: 3, ref category }) if category == "Fuel"
        ));
    }

    #[test]
    fn test_empty_category_rejected() {
        let result = parse_categories("category,amount\n,5\n".as_bytes());
        assert!(matches!(result, Err(IngestError::EmptyCategory { line: 2 })));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let result = parse_categories("category,amount\nFuel,1\nFuel,2\n".as_bytes());
        assert!(matches!(
            result,
            Err(IngestError::DuplicateCategory { line: 3, ref category }) if category == "Fuel"
        ));
    }

    #[test]
    fn test_error_messages_name_the_line() {
        let err = parse_categories("category,amount\nFuel,abc\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Line 2: invalid amount 'abc'");
    }
}
