use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Daily activity tracker API server and deployment helpers
#[derive(Parser, Debug)]
#[command(name = "daily-tracker", version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Run the HTTP API (default when no subcommand is given)")]
    Serve,

    #[command(
        about = "Validate a deployment blueprint",
        long_about = "Parses the blueprint and checks that it declares exactly one database, \
                      exactly one web service and binds every environment key the server \
                      reads.\n\n\
                      Examples:\n  \
                      daily-tracker check-manifest\n  \
                      daily-tracker check-manifest deploy/render.yaml"
    )]
    CheckManifest {
        #[arg(value_name = "PATH", default_value = "render.yaml")]
        path: PathBuf,
    },

    #[command(about = "Create the static asset directory if it does not exist")]
    PrepareStatic {
        #[arg(value_name = "DIR", default_value = "static")]
        dir: PathBuf,
    },
}

impl CliArgs {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
