mod args;

pub use args::{
    Cli, Commands, CourseCommand, LecturerCommand, ProgressCommand, ProgressDates,
    SemesterCommand,
};

use tracing::debug;

use crate::error::AppError;
use crate::models::{FieldValue, ProgressField};
use crate::render;
use crate::state::AppState;
use crate::views::{DashboardState, Notice, ProgressUpdatesView};

pub async fn run(command: Commands, state: &AppState) -> Result<(), AppError> {
    match command {
        Commands::Dashboard => dashboard(state).await,
        Commands::Lecturers(command) => lecturers(command, state).await,
        Commands::Courses(command) => courses(command, state).await,
        Commands::Semesters(SemesterCommand::List) => {
            let semesters = state.semesters().list().await?;
            println!("{}", render::semesters(&semesters.records));
            Ok(())
        }
        Commands::Progress(command) => progress(command, state).await,
    }
}

async fn dashboard(state: &AppState) -> Result<(), AppError> {
    let mut dashboard = state.dashboard();
    dashboard.load().await;
    match dashboard.state() {
        DashboardState::Ready(data) => {
            println!("{}", render::dashboard(data));
            Ok(())
        }
        DashboardState::Failed(message) => Err(AppError::Reported(message.clone())),
        DashboardState::Loading => Err(AppError::Reported("Dashboard did not load".to_string())),
    }
}

async fn lecturers(command: LecturerCommand, state: &AppState) -> Result<(), AppError> {
    let mut view = state.lecturer_list();
    view.mount().await;

    match command {
        LecturerCommand::List => {}
        LecturerCommand::Add {
            name,
            email,
            department,
        } => {
            let list = view.list_mut();
            list.begin_create();
            if let Some(draft) = list.draft_mut() {
                draft.name = name;
                draft.email = email;
                draft.department = department;
            }
            list.submit_create().await;
        }
        LecturerCommand::Edit {
            id,
            name,
            email,
            department,
        } => {
            let list = view.list_mut();
            if list.begin_edit_by_id(&id).await {
                if let Some(form) = list.edit_form_mut() {
                    overwrite(&mut form.name, name);
                    overwrite(&mut form.email, email);
                    overwrite(&mut form.department, department);
                }
                list.submit_update().await;
            }
        }
        LecturerCommand::Delete { id } => {
            view.list_mut().delete(&id).await;
        }
    }

    let list = view.list();
    finish(render::lecturers(list.items()), list.notice())
}

async fn courses(command: CourseCommand, state: &AppState) -> Result<(), AppError> {
    let mut view = state.course_list();
    view.mount().await;

    match command {
        CourseCommand::List => {}
        CourseCommand::Add {
            name,
            code,
            lecturer,
            semester,
        } => {
            let list = view.list_mut();
            list.begin_create();
            if let Some(draft) = list.draft_mut() {
                draft.name = name;
                draft.code = code;
                draft.lecturer = lecturer;
                draft.semester = semester;
            }
            list.submit_create().await;
        }
        CourseCommand::Edit {
            id,
            name,
            code,
            lecturer,
            semester,
        } => {
            let list = view.list_mut();
            if list.begin_edit_by_id(&id).await {
                if let Some(form) = list.edit_form_mut() {
                    overwrite(&mut form.name, name);
                    overwrite(&mut form.code, code);
                    overwrite(&mut form.lecturer, lecturer);
                    overwrite(&mut form.semester, semester);
                }
                list.submit_update().await;
            }
        }
        CourseCommand::Delete { id } => {
            view.list_mut().delete(&id).await;
        }
    }

    finish(render::courses(&view.rows()), view.list().notice())
}

async fn progress(command: ProgressCommand, state: &AppState) -> Result<(), AppError> {
    let mut view = state.progress_updates();
    view.mount().await;

    match command {
        ProgressCommand::List => {}
        ProgressCommand::Add {
            course,
            lecturer,
            grading_status,
            marksheet_status,
            marksheet_submitted,
            dates,
        } => {
            view.begin_create();
            let mut changes = vec![
                (ProgressField::Course, FieldValue::Text(course)),
                (ProgressField::Lecturer, FieldValue::Text(lecturer)),
                (ProgressField::GradingStatus, FieldValue::Text(grading_status)),
                (ProgressField::MarksheetStatus, FieldValue::Text(marksheet_status)),
                (ProgressField::MarksheetSubmitted, FieldValue::Checked(marksheet_submitted)),
            ];
            changes.extend(date_changes(dates));
            if apply_changes(&mut view, changes, ProgressUpdatesView::change_draft) {
                view.submit_create().await;
            }
        }
        ProgressCommand::Edit {
            id,
            course,
            lecturer,
            grading_status,
            marksheet_status,
            marksheet_submitted,
            dates,
        } => {
            if view.begin_edit(&id).await {
                let mut changes: Vec<(ProgressField, FieldValue)> = [
                    (ProgressField::Course, course),
                    (ProgressField::Lecturer, lecturer),
                    (ProgressField::GradingStatus, grading_status),
                    (ProgressField::MarksheetStatus, marksheet_status),
                ]
                .into_iter()
                .filter_map(|(field, value)| value.map(|v| (field, FieldValue::Text(v))))
                .collect();
                if let Some(checked) = marksheet_submitted {
                    changes.push((ProgressField::MarksheetSubmitted, FieldValue::Checked(checked)));
                }
                changes.extend(date_changes(dates));
                if apply_changes(&mut view, changes, ProgressUpdatesView::change_edit) {
                    view.submit_update().await;
                }
            }
        }
        ProgressCommand::Delete { id } => {
            view.delete(&id).await;
        }
    }

    finish(render::progress_updates(&view.rows()), view.notice())
}

fn date_changes(dates: ProgressDates) -> Vec<(ProgressField, FieldValue)> {
    [
        (ProgressField::GradingCompletionDate, dates.grading_completion_date),
        (ProgressField::MarksheetCompletionDate, dates.marksheet_completion_date),
        (ProgressField::MarksheetSubmissionDate, dates.marksheet_submission_date),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| (field, FieldValue::Text(v))))
    .collect()
}

/// Feeds each change to the form, stopping at the first one the form rejects.
fn apply_changes(
    view: &mut ProgressUpdatesView,
    changes: Vec<(ProgressField, FieldValue)>,
    change: fn(&mut ProgressUpdatesView, ProgressField, FieldValue) -> bool,
) -> bool {
    for (field, value) in changes {
        debug!("setting {} = {:?}", field, value);
        if !change(view, field, value) {
            return false;
        }
    }
    true
}

fn overwrite(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn finish(table: String, notice: Option<&Notice>) -> Result<(), AppError> {
    println!("{}", table);
    match notice {
        Some(Notice::Error(message)) => Err(AppError::Reported(message.clone())),
        Some(notice) => {
            println!();
            println!("{}", render::notice(notice));
            Ok(())
        }
        None => Ok(()),
    }
}
