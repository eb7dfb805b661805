//! CSV output for schedule views.

use std::io::Write;

use csv::WriterBuilder;

use super::views::{GradeGrid, ScheduleRow, STUDY_YEARS};
use crate::error::Result;

/// Writes rows with a header taken from the [`ScheduleRow`] field names.
pub fn write_rows_csv<W: Write>(writer: W, rows: &[ScheduleRow]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes an instructor's week as `Day, Code, Name, Time, Classroom,
/// Departments`, in the order given.
pub fn write_instructor_csv<W: Write>(writer: W, rows: &[ScheduleRow]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(["Day", "Code", "Name", "Time", "Classroom", "Departments"])?;
    for row in rows {
        wtr.write_record([
            row.day.name(),
            row.course_code.as_str(),
            row.course_name.as_str(),
            row.time_range().as_str(),
            row.classroom_code.as_str(),
            row.departments.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a grade grid: a `Day` column, then one column per study year.
/// Entries within a cell are separated by a blank line.
pub fn write_grade_grid_csv<W: Write>(writer: W, grid: &GradeGrid) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut header = vec!["Day".to_string()];
    header.extend((1..=STUDY_YEARS).map(|year| format!("Year {year}")));
    wtr.write_record(&header)?;

    for &day in &grid.days {
        let mut record = vec![day.name().to_string()];
        for year in 1..=STUDY_YEARS {
            let text = grid
                .cell(day, year)
                .iter()
                .map(ScheduleRow::cell_text)
                .collect::<Vec<_>>()
                .join("\n\n");
            record.push(text);
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
