//! Text and JSON rendering of ledger views.

use clap::ValueEnum;
use serde_json::{json, Value};

use wagebook_core::{format_amount, Currency, DailyRecord, DateKey, Editor, MonthView, SalaryInputs};

/// Output format for views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL: usize = 9;

/// Sunday-first month grid with each day's pay under its number.
pub fn month_table(view: &MonthView, currency: Currency) -> String {
    let mut out = format!("{}  ({currency})\n", view.cursor);
    for name in WEEKDAYS {
        out.push_str(&format!("{name:>CELL$}"));
    }
    out.push('\n');

    for week in view.weeks() {
        let mut days = String::new();
        let mut pay = String::new();
        for cell in week {
            match cell {
                Some(cell) => {
                    days.push_str(&format!("{:>CELL$}", cell.day));
                    let amount = match cell.record {
                        Some(r) if cell.is_highlighted() => format!("+{}", format_amount(r.total)),
                        _ => String::new(),
                    };
                    pay.push_str(&format!("{amount:>CELL$}"));
                }
                None => {
                    days.push_str(&" ".repeat(CELL));
                    pay.push_str(&" ".repeat(CELL));
                }
            }
        }
        out.push_str(days.trim_end());
        out.push('\n');
        if !pay.trim().is_empty() {
            out.push_str(pay.trim_end());
            out.push('\n');
        }
    }

    out.push_str(&format!(
        "\nMonthly total: {currency} {}\n",
        format_amount(view.total)
    ));
    out
}

pub fn month_json(view: &MonthView, currency: Currency) -> Value {
    let days: Vec<Value> = view
        .days
        .iter()
        .filter_map(|cell| cell.record.map(|r| record_json(&cell.date, &r)))
        .collect();
    json!({
        "month": view.cursor.to_string(),
        "currency": currency,
        "total": view.total,
        "records": days,
    })
}

pub fn record_json(date: &DateKey, record: &DailyRecord) -> Value {
    json!({
        "date": date.to_string(),
        "hourlyRate": record.hourly_rate,
        "workHours": record.work_hours,
        "total": record.total,
    })
}

pub fn record_line(date: &DateKey, record: &DailyRecord, currency: Currency) -> String {
    format!(
        "{date}: {} x {} h = {currency} {}",
        record.hourly_rate,
        record.work_hours,
        format_amount(record.total)
    )
}

pub fn editor_block(editor: &Editor, currency: Currency) -> String {
    format!(
        "Editing {}\n  rate:  {} {currency}\n  hours: {}\n  total: {currency} {}\n",
        editor.date,
        editor.buffer.hourly_rate,
        editor.buffer.work_hours,
        format_amount(editor.preview_total())
    )
}

pub fn quick_block(inputs: &SalaryInputs, currency: Currency) -> String {
    format!(
        "Quick calculator\n  rate:  {} {currency}\n  hours: {}\n  total: {currency} {}\n",
        inputs.hourly_rate,
        inputs.work_hours,
        format_amount(inputs.total())
    )
}
