use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use helpfreshers::models::{Role, RolePreference, SessionStatus, VolunteerStatus};
use helpfreshers::utils::MeetLinkPolicy;

#[derive(Parser, Debug)]
#[command(name = "helpfreshers", version, about = "HelpFreshers career guidance client")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the values read from the environment.
#[derive(Args, Debug, Default)]
pub struct GlobalOpts {
    /// Base URL of the REST API (HELPFRESHERS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Where the login is persisted (HELPFRESHERS_AUTH_FILE)
    #[arg(long, global = true)]
    pub auth_file: Option<PathBuf>,

    /// Request timeout in seconds (HELPFRESHERS_API_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Meeting links accepted when accepting a session: strict or any
    #[arg(long, global = true)]
    pub meet_link_policy: Option<MeetLinkPolicy>,

    /// Print raw JSON instead of tables
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in as an admin or a volunteer
    Login {
        #[arg(long)]
        role: Role,

        #[arg(long)]
        email: String,

        #[arg(long, env = "HELPFRESHERS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved login
    Logout,
    /// Show the saved login
    Whoami,
    /// Set a volunteer password from a reset link token
    SetPassword {
        #[arg(long)]
        token: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm: String,
    },
    /// Submit a volunteer application from a JSON file
    Register {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Admin volunteer management
    Volunteers {
        #[command(subcommand)]
        command: VolunteerCommand,
    },
    /// Browse approved mentors
    Mentors {
        /// Matches name, profession, organization and expertise
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(short, long)]
        expertise: Option<String>,

        #[arg(short, long)]
        role: Option<RolePreference>,
    },
    /// Request a session with an approved mentor
    Book {
        #[arg(long)]
        volunteer: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        background: Option<String>,

        #[arg(long)]
        topic: String,

        /// RFC 3339, or "YYYY-MM-DD HH:MM" in local time
        #[arg(long, value_parser = parse_when)]
        at: DateTime<Utc>,
    },
    /// Volunteer session management
    Sessions {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum VolunteerCommand {
    /// List every application
    List {
        #[arg(short, long)]
        status: Option<VolunteerStatus>,
    },
    /// Counts by status
    Stats,
    /// Set an application's status
    Status { id: String, status: VolunteerStatus },
    Approve { id: String },
    Reject { id: String },
    Delete { id: String },
    /// The signed-in volunteer's own record
    Profile,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// List your sessions
    List {
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long)]
        status: Option<SessionStatus>,
    },
    /// Sessions grouped into pending, upcoming, completed and rejected
    Buckets,
    Accept {
        id: String,

        #[arg(long)]
        link: String,
    },
    Reject { id: String },
    /// Replace the meeting link of an accepted session
    UpdateLink {
        id: String,

        #[arg(long)]
        link: String,
    },
    /// Sessions of a volunteer by id
    ByVolunteer { volunteer_id: String },
}

pub fn parse_when(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| format!("'{}' is not a date and time (try 2026-10-19 10:00)", raw))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(|| format!("'{}' does not exist in the local time zone", raw))
}
