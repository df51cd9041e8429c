mod cli;

use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use dotenv::dotenv;
use serde::Serialize;

use helpfreshers::api::ApiClient;
use helpfreshers::config::ClientConfig;
use helpfreshers::models::{
    BookingRequest, Credentials, Requester, Session, Volunteer, VolunteerRegistration,
    VolunteerStatus,
};
use helpfreshers::services::{
    session_service, volunteer_service, AdminDashboard, AuthContext, MentorDirectory, MentorFilter,
    SessionDashboard,
};
use helpfreshers::storage::FileAuthStore;
use helpfreshers::utils::{AppError, AppResult};

use cli::{Cli, Commands, GlobalOpts, SessionCommand, VolunteerCommand};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        log::error!("❌ {}", e);
        eprintln!("Error: {}", e.user_message());
        process::exit(1);
    }
}

fn load_config(global: &GlobalOpts) -> AppResult<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = &global.api_url {
        config.api_url = helpfreshers::config::normalize_base_url(api_url);
    }
    if let Some(auth_file) = &global.auth_file {
        config.auth_file = auth_file.clone();
    }
    if let Some(secs) = global.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(policy) = global.meet_link_policy {
        config.meet_link_policy = policy;
    }
    Ok(config)
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = load_config(&cli.global)?;
    let json = cli.global.json;

    log::debug!("🌐 API: {}", config.api_url);
    log::debug!("💾 Auth file: {}", config.auth_file.display());

    let client = Arc::new(ApiClient::new(&config)?);
    let mut auth = AuthContext::restore(Box::new(FileAuthStore::new(config.auth_file.clone())))?;

    match cli.command {
        Commands::Login { role, email, password } => {
            let credentials = Credentials { email, password };
            let session = auth.login(client.as_ref(), role, &credentials).await?;
            println!(
                "Logged in as {}. Dashboard: {}",
                session.role,
                session.role.dashboard_route()
            );
        }
        Commands::Logout => {
            auth.logout()?;
            println!("Logged out.");
        }
        Commands::Whoami => match auth.session() {
            Some(session) => println!("Logged in as {}", session.role),
            None => println!("Not logged in."),
        },
        Commands::SetPassword { token, password, confirm } => {
            AuthContext::set_password(client.as_ref(), &token, &password, &confirm).await?;
            println!("Password set. You can now log in as a volunteer.");
        }
        Commands::Register { file } => {
            let registration = read_registration(&file)?;
            let message = volunteer_service::register(client.as_ref(), &registration).await?;
            println!("{}", message);
        }
        Commands::Volunteers { command } => volunteers(client, &auth, command, json).await?,
        Commands::Mentors { search, expertise, role } => {
            let directory = MentorDirectory::load(client.as_ref()).await?;
            let filter = MentorFilter { term: search, expertise, role };
            let found = directory.filter(&filter);
            if json {
                print_json(&found)?;
            } else if found.is_empty() {
                println!("No mentors match.");
            } else {
                for mentor in found {
                    print_volunteer(mentor);
                }
            }
        }
        Commands::Book { volunteer, name, email, phone, background, topic, at } => {
            let now = Utc::now();
            let directory = MentorDirectory::load(client.as_ref()).await?;
            let request = BookingRequest {
                volunteer_id: volunteer,
                requester: Requester { name, email, phone, background },
                scheduled_for: at,
                topic,
            };
            match session_service::book_session(client.as_ref(), &directory, &request, now).await? {
                Some(session) => {
                    println!("Session {} requested; status {}.", session.id, session.status)
                }
                None => println!("Session requested. The mentor will confirm by email."),
            }
        }
        Commands::Sessions { command } => {
            sessions(client, &auth, config.meet_link_policy, command, json).await?
        }
    }

    Ok(())
}

async fn volunteers(
    client: Arc<ApiClient>,
    auth: &AuthContext,
    command: VolunteerCommand,
    json: bool,
) -> AppResult<()> {
    if let VolunteerCommand::Profile = command {
        let me = volunteer_service::profile(client.as_ref(), auth).await?;
        if json {
            print_json(&me)?;
        } else {
            print_volunteer(&me);
        }
        return Ok(());
    }

    let mut dashboard = AdminDashboard::open(client, auth).await?;
    dashboard.state().ready()?;

    match command {
        VolunteerCommand::List { status } => {
            let list: Vec<&Volunteer> = match status {
                Some(status) => dashboard.by_status(status),
                None => dashboard.volunteers().iter().collect(),
            };
            if json {
                print_json(&list)?;
            } else if list.is_empty() {
                println!("No volunteers yet.");
            } else {
                for volunteer in list {
                    print_volunteer(volunteer);
                }
            }
        }
        VolunteerCommand::Stats => {
            let stats = dashboard.stats();
            if json {
                print_json(&stats)?;
            } else {
                println!(
                    "total {}  pending {}  approved {}  rejected {}",
                    stats.total, stats.pending, stats.approved, stats.rejected
                );
            }
        }
        VolunteerCommand::Status { id, status } => {
            dashboard.update_status(&id, status).await?;
            println!("Volunteer {} is now {}.", id, status);
        }
        VolunteerCommand::Approve { id } => {
            dashboard.update_status(&id, VolunteerStatus::Approved).await?;
            println!("Volunteer {} approved.", id);
        }
        VolunteerCommand::Reject { id } => {
            dashboard.update_status(&id, VolunteerStatus::Rejected).await?;
            println!("Volunteer {} rejected.", id);
        }
        VolunteerCommand::Delete { id } => {
            dashboard.delete(&id).await?;
            println!("Volunteer {} deleted.", id);
        }
        VolunteerCommand::Profile => {}
    }
    Ok(())
}

async fn sessions(
    client: Arc<ApiClient>,
    auth: &AuthContext,
    policy: helpfreshers::utils::MeetLinkPolicy,
    command: SessionCommand,
    json: bool,
) -> AppResult<()> {
    if let SessionCommand::ByVolunteer { volunteer_id } = &command {
        let list =
            session_service::list_sessions_by_volunteer(client.as_ref(), auth, volunteer_id)
                .await?;
        return print_sessions(&list.iter().collect::<Vec<_>>(), json);
    }

    let mut dashboard = SessionDashboard::open(client, auth, policy).await?;
    dashboard.state().ready()?;

    match command {
        SessionCommand::List { search, status } => {
            print_sessions(&dashboard.search(&search, status), json)?;
        }
        SessionCommand::Buckets => {
            let buckets = dashboard.buckets(Utc::now());
            for (label, list) in [
                ("Pending", &buckets.pending),
                ("Upcoming", &buckets.upcoming),
                ("Completed", &buckets.completed),
                ("Rejected", &buckets.rejected),
            ] {
                println!("== {} ({}) ==", label, list.len());
                print_sessions(&list.iter().collect::<Vec<_>>(), json)?;
            }
        }
        SessionCommand::Accept { id, link } => {
            dashboard.accept(&id, &link).await?;
            println!("Session {} accepted.", id);
        }
        SessionCommand::Reject { id } => {
            dashboard.reject(&id).await?;
            println!("Session {} rejected.", id);
        }
        SessionCommand::UpdateLink { id, link } => {
            dashboard.update_meeting_link(&id, &link).await?;
            println!("Meeting link for session {} updated.", id);
        }
        SessionCommand::ByVolunteer { .. } => {}
    }
    Ok(())
}

/// Loads a registration form from JSON. A missing or malformed file is bad input.
fn read_registration(file: &Path) -> AppResult<VolunteerRegistration> {
    let raw = fs::read(file)
        .map_err(|e| AppError::Validation(format!("Cannot read {}: {}", file.display(), e)))?;
    serde_json::from_slice(&raw)
        .map_err(|e| AppError::Validation(format!("{}: {}", file.display(), e)))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_volunteer(volunteer: &Volunteer) {
    println!(
        "{:<26} {:<24} {:<16} {:<9} {}",
        volunteer.id,
        volunteer.full_name(),
        volunteer.role_preference,
        volunteer.status,
        volunteer.areas_of_expertise.join(", ")
    );
}

fn print_sessions(list: &[&Session], json: bool) -> AppResult<()> {
    if json {
        return print_json(list);
    }
    if list.is_empty() {
        println!("No sessions.");
    }
    for session in list {
        println!(
            "{:<26} {:<9} {} {:>3}m {:<20} {}{}",
            session.id,
            session.status,
            session.scheduled_for.format("%Y-%m-%d %H:%M UTC"),
            session.duration,
            session.requester.name,
            session.topic,
            session
                .meet_link
                .as_deref()
                .map(|link| format!("  [{}]", link))
                .unwrap_or_default()
        );
    }
    Ok(())
}
