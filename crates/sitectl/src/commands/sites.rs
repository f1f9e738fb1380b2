//! Site command handlers.

use std::time::Duration;

use serde::Serialize;
use tabled::Tabled;

use sitectl_core::{
    ControlAction, MetabaseClient, PropertySet, Site, SiteDirectory, TaskAction, TaskOutcome,
    TaskRequest,
};

use crate::cli::{ControlArgs, GlobalOpts, RunArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Properties")]
    properties: usize,
}

impl From<&Site> for SiteRow {
    fn from(s: &Site) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            properties: s.properties.len(),
        }
    }
}

#[derive(Serialize)]
struct ExistsReport {
    name: String,
    exists: bool,
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(client: MetabaseClient, global: &GlobalOpts) -> Result<(), CliError> {
    let directory = SiteDirectory::new(client);
    let sites = directory.list().await?;
    let out = output::render_list(&global.output, &sites, |s| SiteRow::from(s), |s| s.id.to_string());
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn exists(
    client: MetabaseClient,
    name: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let directory = SiteDirectory::new(client);
    let exists = directory.exists(name).await?;
    print_exists_report(name, exists, global);
    Ok(())
}

pub async fn create(
    client: MetabaseClient,
    name: &str,
    force: bool,
    properties: Option<&str>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let parsed = PropertySet::parse(properties.unwrap_or_default())
        .map_err(CliError::from)?;
    let directory = SiteDirectory::new(client);
    let site = directory.create(name, force, &parsed).await?;
    if !global.quiet {
        eprintln!("Site '{}' created with identifier {}", site.name, site.id);
    }
    Ok(())
}

pub async fn delete(
    client: MetabaseClient,
    name: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !util::confirm(
        &format!("Delete site '{name}'? This is destructive."),
        global.yes,
    )? {
        return Ok(());
    }
    let directory = SiteDirectory::new(client);
    directory.delete(name).await?;
    if !global.quiet {
        eprintln!("Site deleted");
    }
    Ok(())
}

pub async fn control(
    client: MetabaseClient,
    args: &ControlArgs,
    action: ControlAction,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let directory =
        SiteDirectory::new(client).with_control_delay(Duration::from_millis(args.sleep));
    directory.control(&args.name, action).await?;
    if !global.quiet {
        eprintln!("Site '{}': {action} issued", args.name);
    }
    Ok(())
}

/// Pipeline entry point: the action arrives as a raw string and anything
/// outside the vocabulary is a usage error.
pub async fn run(
    client: MetabaseClient,
    args: RunArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let action = TaskAction::parse(&args.action).map_err(CliError::from)?;
    let directory =
        SiteDirectory::new(client).with_control_delay(Duration::from_millis(args.sleep));

    let request = TaskRequest {
        action,
        name: args.name,
        force: args.force,
        properties: args.properties,
    };

    match directory.run_task(&request).await? {
        TaskOutcome::Exists { exists } => print_exists_report(&request.name, exists, global),
        TaskOutcome::Created { site } => {
            if !global.quiet {
                eprintln!("Site '{}' created with identifier {}", site.name, site.id);
            }
        }
        TaskOutcome::Done => {
            if !global.quiet {
                eprintln!("{action}: done");
            }
        }
    }
    Ok(())
}

// ── Shared rendering ────────────────────────────────────────────────

fn print_exists_report(name: &str, exists: bool, global: &GlobalOpts) {
    let report = ExistsReport {
        name: name.to_owned(),
        exists,
    };
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &report,
        |r| {
            format!(
                "Site '{}' exists: {}",
                r.name,
                output::status_word(r.exists, color)
            )
        },
        |r| r.exists.to_string(),
    );
    output::print_output(&out, global.quiet);
}
