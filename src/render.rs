//! Plain-text tables for the command-line front-end.

use crate::models::{Lecturer, Semester};
use crate::views::{CourseRow, DashboardData, Notice, ProgressRow};

pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.to_vec()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

pub fn lecturers(lecturers: &[Lecturer]) -> String {
    let rows: Vec<Vec<String>> = lecturers
        .iter()
        .map(|l| vec![l.id.clone(), l.name.clone(), l.email.clone(), l.department.clone()])
        .collect();
    table(&["ID", "Name", "Email", "Department"], &rows)
}

pub fn semesters(semesters: &[Semester]) -> String {
    let rows: Vec<Vec<String>> = semesters
        .iter()
        .map(|s| vec![s.id.clone(), s.name.clone()])
        .collect();
    table(&["ID", "Name"], &rows)
}

pub fn courses(rows: &[CourseRow]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.name.clone(),
                c.code.clone(),
                c.lecturer.clone(),
                c.semester.clone(),
            ]
        })
        .collect();
    table(&["ID", "Name", "Code", "Lecturer", "Semester"], &rows)
}

pub fn progress_updates(rows: &[ProgressRow]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.course.clone(),
                r.lecturer.clone(),
                r.grading_status.clone(),
                r.grading_completion_date.clone(),
                r.marksheet_status.clone(),
                r.marksheet_completion_date.clone(),
                r.marksheet_submitted.clone(),
                r.marksheet_submission_date.clone(),
            ]
        })
        .collect();
    table(
        &[
            "ID",
            "Course",
            "Lecturer",
            "Grading Status",
            "Grading Completion Date",
            "Marksheet Status",
            "Marksheet Completion Date",
            "Marksheet Submitted",
            "Marksheet Submission Date",
        ],
        &rows,
    )
}

pub fn dashboard(data: &DashboardData) -> String {
    let mut out = vec![
        format!("Courses:   {}", data.courses_count),
        format!("Lecturers: {}", data.lecturers_count),
        String::new(),
        "Recent Progress Updates".to_string(),
    ];
    if data.recent_updates.is_empty() {
        out.push("  (none)".to_string());
    }
    for update in &data.recent_updates {
        out.push(format!(
            "  [{}] {} - {} (Updated on: {})",
            update.badge(),
            update.course,
            update.grading_status,
            update.updated_on
        ));
    }
    out.join("\n")
}

pub fn notice(notice: &Notice) -> String {
    match notice {
        Notice::Error(message) => format!("error: {}", message),
        Notice::Success(message) => message.clone(),
    }
}
