use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "course-admin")]
#[command(about = "Administer courses, lecturers and grading progress", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base address; overrides COURSE_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Course and lecturer counts with the latest progress updates
    Dashboard,

    #[command(subcommand)]
    Lecturers(LecturerCommand),

    #[command(subcommand)]
    Courses(CourseCommand),

    #[command(subcommand)]
    Semesters(SemesterCommand),

    #[command(subcommand)]
    Progress(ProgressCommand),
}

#[derive(Subcommand)]
pub enum LecturerCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        department: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum CourseCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        /// Lecturer id
        #[arg(long)]
        lecturer: String,
        /// Semester id
        #[arg(long)]
        semester: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        lecturer: Option<String>,
        #[arg(long)]
        semester: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum SemesterCommand {
    List,
}

#[derive(Subcommand)]
pub enum ProgressCommand {
    List,
    Add {
        /// Course id
        #[arg(long)]
        course: String,
        /// Lecturer id
        #[arg(long)]
        lecturer: String,
        #[arg(long)]
        grading_status: String,
        #[arg(long)]
        marksheet_status: String,
        #[arg(long)]
        marksheet_submitted: bool,
        #[command(flatten)]
        dates: ProgressDates,
    },
    Edit {
        id: String,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        lecturer: Option<String>,
        #[arg(long)]
        grading_status: Option<String>,
        #[arg(long)]
        marksheet_status: Option<String>,
        #[arg(long)]
        marksheet_submitted: Option<bool>,
        #[command(flatten)]
        dates: ProgressDates,
    },
    Delete {
        id: String,
    },
}

/// Date flags take YYYY-MM-DD; an empty value clears the date.
#[derive(Args, Default)]
pub struct ProgressDates {
    #[arg(long)]
    pub grading_completion_date: Option<String>,
    #[arg(long)]
    pub marksheet_completion_date: Option<String>,
    #[arg(long)]
    pub marksheet_submission_date: Option<String>,
}
