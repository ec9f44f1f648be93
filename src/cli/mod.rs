//! CLI module for PMP Blog
//!
//! Provides subcommands:
//! - `serve`: run the HTTP server
//! - `migrate`: apply the PostgreSQL schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// PMP Blog - multi-user blogging service
#[derive(Parser)]
#[command(name = "pmp-blog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the blog HTTP server
    Serve,

    /// Apply, revert or inspect PostgreSQL migrations
    Migrate(migrate::MigrateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["pmp-blog", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_migrate_flags() {
        let cli = Cli::try_parse_from(["pmp-blog", "migrate", "--revert"]).unwrap();

        match cli.command {
            Command::Migrate(args) => {
                assert!(args.revert);
                assert!(!args.status);
            }
            Command::Serve => panic!("expected migrate"),
        }

        assert!(Cli::try_parse_from(["pmp-blog", "migrate", "--revert", "--status"]).is_err());
    }
}
