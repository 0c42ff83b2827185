use crate::cli::{Commands, ContractsCommand, EdgeCommand, TimeCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Time {
            command: TimeCommand::Format { json, .. },
        }
        | Commands::Contracts {
            command: ContractsCommand::Check { json, .. } | ContractsCommand::Fields { json, .. },
        }
        | Commands::Edge {
            command: EdgeCommand::Handle { json, .. },
        } => *json,
        Commands::Render { .. } | Commands::Edge { .. } => false,
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, mode_for_command};
    use crate::cli::parse_from;

    #[test]
    fn mode_uses_json_when_flag_is_present() {
        let cases: [&[&str]; 4] = [
            &["perfil", "time", "format", "2025-01-01", "--json"],
            &["perfil", "contracts", "check", "analysis", "rows.json", "--json"],
            &["perfil", "contracts", "fields", "extraction", "--json"],
            &["perfil", "edge", "handle", "request.txt", "--json"],
        ];
        for args in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
            }
        }
    }

    #[test]
    fn mode_uses_text_without_json_flag() {
        let cases: [&[&str]; 4] = [
            &["perfil", "time", "format", "2025-01-01"],
            &["perfil", "contracts", "fields", "analysis"],
            &["perfil", "render", "footer"],
            &["perfil", "edge", "serve"],
        ];
        for args in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
            }
        }
    }
}
