use crate::domain::model::{value_text, ExtractedRecord, GENDER_FIELD, PRIZES_FIELD, UNKNOWN};
use crate::utils::error::{EtlError, Result};
use rust_xlsxwriter::{Chart, ChartDataLabel, ChartType, ColNum, Worksheet};
use serde_json::Value;
use std::collections::BTreeMap;

pub const CHART_DATA_SHEET: &str = "Charts Data";

const CHART_WIDTH: u32 = 500;
const CHART_HEIGHT: u32 = 300;
const CHART_COLUMN_STEP: ColNum = 10;
const DATA_COLUMN_STEP: ColNum = 3;

/// Distinct values of one prize attribute and how often each occurs.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCounts {
    pub label: &'static str,
    pub title: &'static str,
    pub counts: BTreeMap<String, u32>,
}

/// (label, title, field looked up on each prize)
const CATEGORIES: [(&str, &str, &str); 3] = [
    ("GENDER", "Gender distribution of Nobel Prize winners", GENDER_FIELD),
    ("AWARD YEAR", "Nobel Prizes won in given years", "awardYear"),
    ("CATEGORY", "Nobel Prizes won for a given categories", "category"),
];

/// Counts gender, award year and category over every prize of every record.
///
/// Gender belongs to the laureate, so it is copied onto each of that laureate's
/// prizes before counting.
pub fn aggregate(records: &[ExtractedRecord]) -> Result<Vec<CategoryCounts>> {
    let mut aggregates: Vec<CategoryCounts> = CATEGORIES
        .iter()
        .map(|&(label, title, _)| CategoryCounts {
            label,
            title,
            counts: BTreeMap::new(),
        })
        .collect();

    for record in records {
        let gender = record.get(GENDER_FIELD);

        for prize in prizes_of(record)? {
            for (aggregate, (_, _, field)) in aggregates.iter_mut().zip(CATEGORIES.iter()) {
                let value = if *field == GENDER_FIELD {
                    gender
                } else {
                    prize.get(*field)
                };
                if let Some(value) = value.filter(|v| !v.is_null()) {
                    *aggregate.counts.entry(value_text(value)).or_insert(0) += 1;
                }
            }
        }
    }

    Ok(aggregates)
}

fn prizes_of(record: &ExtractedRecord) -> Result<Vec<&serde_json::Map<String, Value>>> {
    match record.get(PRIZES_FIELD) {
        None => Ok(Vec::new()),
        Some(Value::String(s)) if s == UNKNOWN => Ok(Vec::new()),
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| {
                entry.as_object().ok_or_else(|| EtlError::DataShape {
                    field: PRIZES_FIELD.to_string(),
                    message: format!("prize entry is not an object: {}", entry),
                })
            })
            .collect(),
        Some(other) => Err(EtlError::DataShape {
            field: PRIZES_FIELD.to_string(),
            message: format!("expected a list of prizes, got {}", other),
        }),
    }
}

/// Writes each aggregate into `data_sheet` and places one pie chart per
/// non-empty aggregate on `main_sheet`, starting at `first_chart_column`.
pub fn draw_statistics_charts(
    aggregates: &[CategoryCounts],
    data_sheet: &mut Worksheet,
    main_sheet: &mut Worksheet,
    first_chart_column: ColNum,
) -> Result<()> {
    let mut data_column: ColNum = 0;
    let mut chart_column = first_chart_column;

    for aggregate in aggregates {
        for (row, (value, count)) in aggregate.counts.iter().enumerate() {
            data_sheet.write_string(row as u32, data_column, value)?;
            data_sheet.write_number(row as u32, data_column + 1, *count)?;
        }

        if aggregate.counts.is_empty() {
            tracing::warn!("No data for chart '{}', skipping it", aggregate.title);
        } else {
            let last_row = aggregate.counts.len() as u32 - 1;
            let mut chart = Chart::new(ChartType::Pie);
            chart.title().set_name(aggregate.title);
            chart
                .add_series()
                .set_categories((CHART_DATA_SHEET, 0, data_column, last_row, data_column))
                .set_values((CHART_DATA_SHEET, 0, data_column + 1, last_row, data_column + 1))
                .set_data_label(ChartDataLabel::new().show_value());
            chart.set_width(CHART_WIDTH).set_height(CHART_HEIGHT);

            main_sheet.insert_chart(0, chart_column, &chart)?;
            chart_column += CHART_COLUMN_STEP;
        }

        data_column += DATA_COLUMN_STEP;
    }

    Ok(())
}
