use crate::core::headers::HeaderCache;
use crate::core::report::charts::{aggregate, draw_statistics_charts, CHART_DATA_SHEET};
use crate::domain::model::{value_text, ExtractedRecord};
use crate::utils::error::Result;
use rust_xlsxwriter::{
    Color, ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet,
};
use serde_json::{Map, Value};

const MAX_SHEET_NAME_LEN: usize = 31;
const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
const COLUMN_PADDING: usize = 2;
const CHART_GAP_COLUMNS: ColNum = 3;

/// Presentation settings for the main sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub header_color: u32,
    pub odd_row_color: u32,
}

impl SheetLayout {
    /// Excel caps sheet names at 31 characters and rejects `[]:*?/\` in them;
    /// those are replaced with `-`.
    pub fn new(sheet_name: &str, header_color: u32, odd_row_color: u32) -> Self {
        Self {
            sheet_name: sheet_name
                .chars()
                .map(|c| if FORBIDDEN_SHEET_NAME_CHARS.contains(&c) { '-' } else { c })
                .take(MAX_SHEET_NAME_LEN)
                .collect(),
            header_color,
            odd_row_color,
        }
    }
}

/// One spreadsheet row: pretty headers and display values, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub cells: Vec<(String, Value)>,
}

/// Renames every key (nested prize keys too) and flattens list values into a
/// single multi-line cell.
pub fn shape_rows(records: &[ExtractedRecord], headers: &mut HeaderCache) -> Vec<SheetRow> {
    records
        .iter()
        .map(|record| SheetRow {
            cells: record
                .data
                .iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::Array(entries) => Value::String(flatten_entries(entries, headers)),
                        other => other.clone(),
                    };
                    (headers.header(key), value)
                })
                .collect(),
        })
        .collect()
}

/// `KEY: value, KEY: value` per entry, one entry per line.
fn flatten_entries(entries: &[Value], headers: &mut HeaderCache) -> String {
    entries
        .iter()
        .map(|entry| match entry {
            Value::Object(fields) => flatten_fields(fields, headers),
            other => cell_text(other),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn flatten_fields(fields: &Map<String, Value>, headers: &mut HeaderCache) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}: {}", headers.header(key), cell_text(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn cell_text(value: &Value) -> String {
    value_text(value)
}

/// Builds the workbook in memory: laureate table, chart data sheet and charts.
pub fn render_spreadsheet(records: &[ExtractedRecord], layout: &SheetLayout) -> Result<Vec<u8>> {
    let mut headers = HeaderCache::new();
    let rows = shape_rows(records, &mut headers);
    let aggregates = aggregate(records)?;

    let mut main_sheet = Worksheet::new();
    main_sheet.set_name(&layout.sheet_name)?;

    let header_format = Format::new()
        .set_align(FormatAlign::VerticalCenter)
        .set_background_color(Color::RGB(layout.header_color))
        .set_border(FormatBorder::Thin)
        .set_font_color(Color::White)
        .set_bold();
    let cell_format = Format::new().set_align(FormatAlign::Top).set_text_wrap();
    let odd_cell_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_background_color(Color::RGB(layout.odd_row_color));

    let column_names: Vec<String> = rows
        .first()
        .map(|row| row.cells.iter().map(|(name, _)| name.clone()).collect())
        .unwrap_or_default();

    for (col, name) in column_names.iter().enumerate() {
        main_sheet.write_string_with_format(0, col as ColNum, name, &header_format)?;
    }

    let mut widths = vec![0usize; column_names.len()];
    for (index, row) in rows.iter().enumerate() {
        let row_num = (index + 1) as RowNum;
        let format = if row_num % 2 == 0 {
            &cell_format
        } else {
            &odd_cell_format
        };

        for (col, (_, value)) in row.cells.iter().enumerate() {
            write_cell(&mut main_sheet, row_num, col as ColNum, value, format)?;

            let width = cell_text(value).chars().count();
            if col >= widths.len() {
                widths.resize(col + 1, 0);
            }
            widths[col] = widths[col].max(width);
        }
    }

    for (col, width) in widths.iter().enumerate() {
        main_sheet.set_column_width(col as ColNum, (width + COLUMN_PADDING) as f64)?;
    }

    let mut data_sheet = Worksheet::new();
    data_sheet.set_name(CHART_DATA_SHEET)?.set_hidden(true);

    let first_chart_column = widths.len() as ColNum + CHART_GAP_COLUMNS;
    draw_statistics_charts(&aggregates, &mut data_sheet, &mut main_sheet, first_chart_column)?;

    let mut workbook = Workbook::new();
    workbook.push_worksheet(main_sheet);
    workbook.push_worksheet(data_sheet);

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    sheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: &Value,
    format: &Format,
) -> Result<()> {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(number) => sheet.write_number_with_format(row, col, number, format)?,
            None => sheet.write_string_with_format(row, col, n.to_string(), format)?,
        },
        Value::Bool(b) => sheet.write_boolean_with_format(row, col, *b, format)?,
        Value::Null => sheet.write_blank(row, col, format)?,
        other => sheet.write_string_with_format(row, col, cell_text(other), format)?,
    };
    Ok(())
}
