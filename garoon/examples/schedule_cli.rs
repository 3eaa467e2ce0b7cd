// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Garoon client validation tool.
//!
//! This is a standalone CLI example for testing the schedule client
//! implementation against real Garoon instances. It serves as both a
//! validation tool and example code for using the ScheduleClient API.

use std::error::Error;

use clap::{Parser, Subcommand};
use colored::Colorize as _;
use garoon_rest::{
    AuthMethod, EventDateTime, EventDraft, EventType, GaroonConfig, GaroonHttpClient,
    GetEventsParams, GetFacilitiesParams, PageParams, ScheduleClient,
};

/// Garoon client validation tool.
#[derive(Parser)]
#[command(name = "schedule_cli")]
#[command(about = "Garoon schedule client validation tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Garoon base URL (e.g. <https://example.cybozu.com/g>)
    #[arg(long)]
    base_url: Option<String>,
    /// Username for password auth
    #[arg(long)]
    username: Option<String>,
    /// Password for password auth
    #[arg(long)]
    password: Option<String>,
    /// OAuth bearer token
    #[arg(long)]
    token: Option<String>,
    /// Pre-issued session CSRF token
    #[arg(long)]
    session_token: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List events in a time range
    Events {
        /// Range start (RFC 3339)
        #[arg(long)]
        from: Option<String>,
        /// Range end (RFC 3339)
        #[arg(long)]
        to: Option<String>,
        /// Maximum number of events
        #[arg(long, default_value = "25")]
        limit: u64,
    },
    /// Get a single event
    Get {
        /// Event identifier
        id: u64,
    },
    /// Add a simple event
    Add {
        /// Event subject
        subject: String,
        /// Event start (RFC 3339)
        #[arg(long)]
        start: String,
        /// Event end (RFC 3339)
        #[arg(long)]
        end: String,
        /// IANA time zone for start and end
        #[arg(long, default_value = "UTC")]
        time_zone: String,
    },
    /// Delete an event
    Delete {
        /// Event identifier
        id: u64,
    },
    /// List facilities
    Facilities {
        /// Facility name to match
        #[arg(long)]
        name: Option<String>,
    },
    /// List facility groups
    FacilityGroups,
}

impl Cli {
    fn build_config(&self) -> Result<GaroonConfig, Box<dyn Error>> {
        let base_url = self
            .base_url
            .clone()
            .or_else(|| std::env::var("GAROON_BASE_URL").ok())
            .ok_or("base URL required: pass --base-url or set GAROON_BASE_URL")?;

        let auth = if let Some(token) = self
            .token
            .clone()
            .or_else(|| std::env::var("GAROON_OAUTH_TOKEN").ok())
        {
            AuthMethod::OAuth { token }
        } else if let Some(token) = self.session_token.clone() {
            AuthMethod::Session { token: Some(token) }
        } else {
            let username = self
                .username
                .clone()
                .or_else(|| std::env::var("GAROON_USERNAME").ok())
                .ok_or("username required: pass --username or set GAROON_USERNAME")?;
            let password = self
                .password
                .clone()
                .or_else(|| std::env::var("GAROON_PASSWORD").ok())
                .ok_or("password required: pass --password or set GAROON_PASSWORD")?;
            AuthMethod::Password { username, password }
        };

        Ok(GaroonConfig::new(base_url, auth))
    }
}

async fn cmd_events(
    schedule: &ScheduleClient<GaroonHttpClient>,
    from: Option<String>,
    to: Option<String>,
    limit: u64,
) -> Result<(), Box<dyn Error>> {
    let response = schedule
        .get_events(GetEventsParams {
            limit: Some(limit),
            range_start: from,
            range_end: to,
            ..Default::default()
        })
        .await?;

    for event in &response.events {
        let id = event.id.as_deref().unwrap_or("-");
        let subject = event.subject.as_deref().unwrap_or("(no subject)");
        let start = event
            .start
            .as_ref()
            .map_or("-", |start| start.date_time.as_str());
        println!("{} {} {}", id.dimmed(), start, subject.bold());
    }
    if response.has_next == Some(true) {
        println!("{}", "(more events available)".dimmed());
    }
    Ok(())
}

async fn cmd_get(
    schedule: &ScheduleClient<GaroonHttpClient>,
    id: u64,
) -> Result<(), Box<dyn Error>> {
    let event = schedule.get_event(id).await?;
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}

async fn cmd_add(
    schedule: &ScheduleClient<GaroonHttpClient>,
    subject: String,
    start: String,
    end: String,
    time_zone: String,
) -> Result<(), Box<dyn Error>> {
    let event = schedule
        .add_event(EventDraft {
            event_type: Some(EventType::Regular),
            subject: Some(subject),
            start: Some(EventDateTime::new(start, time_zone.clone())),
            end: Some(EventDateTime::new(end, time_zone)),
            ..Default::default()
        })
        .await?;
    println!(
        "{} event {}",
        "Created".green().bold(),
        event.id.as_deref().unwrap_or("-")
    );
    Ok(())
}

async fn cmd_delete(
    schedule: &ScheduleClient<GaroonHttpClient>,
    id: u64,
) -> Result<(), Box<dyn Error>> {
    schedule.delete_event(id).await?;
    println!("{} event {id}", "Deleted".green().bold());
    Ok(())
}

async fn cmd_facilities(
    schedule: &ScheduleClient<GaroonHttpClient>,
    name: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let response = schedule
        .get_facilities(GetFacilitiesParams {
            name,
            ..Default::default()
        })
        .await?;
    for facility in &response.facilities {
        println!(
            "{} {}",
            facility.id.as_deref().unwrap_or("-").dimmed(),
            facility.name.as_deref().unwrap_or("(no name)")
        );
    }
    Ok(())
}

async fn cmd_facility_groups(
    schedule: &ScheduleClient<GaroonHttpClient>,
) -> Result<(), Box<dyn Error>> {
    let response = schedule.get_facility_groups(PageParams::default()).await?;
    for group in &response.facility_groups {
        println!(
            "{} {}",
            group.id.as_deref().unwrap_or("-").dimmed(),
            group.name.as_deref().unwrap_or("(no name)")
        );
    }
    Ok(())
}

fn format_error(err: &dyn Error) -> String {
    format!("{} {err}", "Error:".red().bold())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env files (if they exist)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.build_config()?;
    let client = GaroonHttpClient::new(config)?;
    let schedule = ScheduleClient::new(client);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        match cli.command {
            Commands::Events { from, to, limit } => cmd_events(&schedule, from, to, limit).await,
            Commands::Get { id } => cmd_get(&schedule, id).await,
            Commands::Add {
                subject,
                start,
                end,
                time_zone,
            } => cmd_add(&schedule, subject, start, end, time_zone).await,
            Commands::Delete { id } => cmd_delete(&schedule, id).await,
            Commands::Facilities { name } => cmd_facilities(&schedule, name).await,
            Commands::FacilityGroups => cmd_facility_groups(&schedule).await,
        }
    });

    if let Err(e) = result {
        eprintln!("{}", format_error(e.as_ref()));
        std::process::exit(1);
    }

    Ok(())
}
