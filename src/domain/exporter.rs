//! Spreadsheet serialization of the shopping list.
//!
//! The workbook layout is left to `rust_xlsxwriter`: one sheet, a header row taken
//! from the record field names, then one row per record.

use super::models::ItemRecord;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Turns a sequence of records into the bytes of a spreadsheet document.
pub trait SpreadsheetExporter {
    fn export(&self, records: &[ItemRecord]) -> Result<Vec<u8>, XlsxError>;
}

/// Writes `.xlsx` workbooks with a single named sheet.
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    sheet_name: String,
}

impl XlsxExporter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self { sheet_name: sheet_name.into() }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

impl Default for XlsxExporter {
    fn default() -> Self {
        Self::new("Produtos")
    }
}

impl SpreadsheetExporter for XlsxExporter {
    fn export(&self, records: &[ItemRecord]) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let price_format = Format::new().set_num_format("#,##0.00");

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, header) in ItemRecord::HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }
        worksheet.set_column_width(0, 30)?;
        worksheet.set_column_width(1, 12)?;
        worksheet.set_column_width(2, 12)?;

        for (i, record) in records.iter().enumerate() {
            let row = i as u32 + 1;
            worksheet.write_string(row, 0, &record.nome)?;
            worksheet.write_number(row, 1, record.quantidade)?;
            worksheet.write_number_with_format(row, 2, record.valor, &price_format)?;
        }

        workbook.save_to_buffer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
    use std::io::Cursor;

    const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

    /// Sheet names and the rows of the first sheet, as a spreadsheet reader sees them.
    fn read_back(bytes: Vec<u8>) -> (Vec<String>, Vec<Vec<Data>>) {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let names = workbook.sheet_names();
        let range = workbook.worksheet_range(&names[0]).unwrap();
        (names, range.rows().map(|row| row.to_vec()).collect())
    }

    fn header_row() -> Vec<Data> {
        ItemRecord::HEADERS.iter().map(|h| Data::String(h.to_string())).collect()
    }

    #[test]
    fn test_export_empty_list() {
        let bytes = XlsxExporter::default().export(&[]).unwrap();
        assert!(bytes.starts_with(ZIP_MAGIC));
    }

    #[test]
    fn test_export_with_records() {
        let records = vec![
            ItemRecord { nome: "Leite".to_string(), quantidade: 2.0, valor: 3.5 },
            ItemRecord { nome: "Pão".to_string(), quantidade: 1.0, valor: 5.0 },
        ];
        let empty = XlsxExporter::default().export(&[]).unwrap();
        let bytes = XlsxExporter::default().export(&records).unwrap();
        assert!(bytes.starts_with(ZIP_MAGIC));
        assert_ne!(bytes, empty);
    }

    #[test]
    fn test_workbook_contents() {
        let records = vec![
            ItemRecord { nome: "Leite".to_string(), quantidade: 2.0, valor: 3.5 },
            ItemRecord { nome: "Pão".to_string(), quantidade: 1.5, valor: 5.0 },
        ];
        let (names, rows) = read_back(XlsxExporter::default().export(&records).unwrap());

        assert_eq!(names, vec!["Produtos"]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], header_row());
        assert_eq!(
            rows[1],
            vec![Data::String("Leite".to_string()), Data::Float(2.0), Data::Float(3.5)]
        );
        assert_eq!(
            rows[2],
            vec![Data::String("Pão".to_string()), Data::Float(1.5), Data::Float(5.0)]
        );
    }

    #[test]
    fn test_empty_workbook_has_header_only() {
        let (names, rows) = read_back(XlsxExporter::default().export(&[]).unwrap());
        assert_eq!(names, vec!["Produtos"]);
        assert_eq!(rows, vec![header_row()]);
    }

    #[test]
    fn test_custom_sheet_name() {
        let (names, _) = read_back(XlsxExporter::new("Feira").export(&[]).unwrap());
        assert_eq!(names, vec!["Feira"]);
    }

    #[test]
    fn test_default_sheet_name() {
        assert_eq!(XlsxExporter::default().sheet_name(), "Produtos");
    }

    #[test]
    fn test_invalid_sheet_name_is_reported() {
        // Excel forbids '[' and ']' in sheet names.
        let exporter = XlsxExporter::new("[compras]");
        assert!(exporter.export(&[]).is_err());
    }
}
