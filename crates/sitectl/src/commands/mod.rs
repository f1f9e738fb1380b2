//! Command dispatch: bridges CLI args -> site directory calls -> output.

pub mod config_cmd;
pub mod sites;
pub mod util;

use sitectl_core::{ControlAction, MetabaseClient};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: MetabaseClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::List => sites::list(client, global).await,
        Command::Exists { name } => sites::exists(client, &name, global).await,
        Command::Create {
            name,
            force,
            properties,
        } => sites::create(client, &name, force, properties.as_deref(), global).await,
        Command::Delete { name } => sites::delete(client, &name, global).await,
        Command::Start(args) => sites::control(client, &args, ControlAction::Start, global).await,
        Command::Stop(args) => sites::control(client, &args, ControlAction::Stop, global).await,
        Command::Pause(args) => sites::control(client, &args, ControlAction::Pause, global).await,
        Command::Continue(args) => {
            sites::control(client, &args, ControlAction::Continue, global).await
        }
        Command::Run(args) => sites::run(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
