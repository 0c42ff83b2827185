use perfil_client::commands;
use perfil_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, ContractsCommand, EdgeCommand, RenderCommand, TimeCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Time { command } => match command {
            TimeCommand::Format { timestamp, now, .. } => {
                commands::time::format(timestamp, now.as_deref())
            }
        },
        Commands::Contracts { command } => match command {
            ContractsCommand::Check { kind, path, .. } => {
                commands::contracts::check(kind, path.clone())
            }
            ContractsCommand::Fields { kind, .. } => commands::contracts::fields(kind),
        },
        Commands::Render { command } => match command {
            RenderCommand::Footer {
                brand,
                tagline,
                year,
            } => commands::render::footer(brand.as_deref(), tagline.as_deref(), *year),
            RenderCommand::Plans { plans } => commands::render::plans(plans.clone()),
        },
        Commands::Edge { command } => match command {
            EdgeCommand::Serve { addr } => commands::edge::serve(addr.as_deref()),
            EdgeCommand::Handle { path, .. } => commands::edge::handle(path.clone()),
        },
    }
}
