//! Console table rendering for person records.
//!
//! # Responsibility
//! - Render an aligned text table of records with a derived age column.
//!
//! # Invariants
//! - Age is derived at render time and never stored.

use chrono::{Local, NaiveDate};
use roster_core::Person;

const HEADERS: [&str; 4] = ["FULL NAME", "BIRTH DATE", "GENDER", "AGE"];

/// Renders records as an aligned text table, ages relative to today.
pub fn render(people: &[Person]) -> String {
    render_with_today(people, Local::now().date_naive())
}

fn render_with_today(people: &[Person], today: NaiveDate) -> String {
    let rows: Vec<[String; 4]> = people
        .iter()
        .map(|person| {
            [
                person.full_name.clone(),
                person.birth_date.format("%Y-%m-%d").to_string(),
                person.gender.to_string(),
                age_in_years(person.birth_date, today).to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_row(&mut output, &HEADERS.map(String::from), &widths);
    push_separator(&mut output, &widths);
    for row in &rows {
        push_row(&mut output, row, &widths);
    }
    output
}

/// Whole years between birth date and today, truncated over 365.25-day
/// years.
fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    let days = today.signed_duration_since(birth_date).num_days();
    (days as f64 / 365.25).trunc() as i64
}

fn push_row(output: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    for (index, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if index > 0 {
            output.push_str(" | ");
        }
        output.push_str(cell);
        for _ in cell.chars().count()..*width {
            output.push(' ');
        }
    }
    // Trailing alignment spaces on the last column are noise.
    while output.ends_with(' ') {
        output.pop();
    }
    output.push('\n');
}

fn push_separator(output: &mut String, widths: &[usize; 4]) {
    for (index, width) in widths.iter().enumerate() {
        if index > 0 {
            output.push_str("-+-");
        }
        for _ in 0..*width {
            output.push('-');
        }
    }
    output.push('\n');
}
