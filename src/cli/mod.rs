//! CLI module for the registration service

pub mod serve;

use clap::{Parser, Subcommand};

/// Registration Service - user sign-up over HTTP
#[derive(Parser)]
#[command(name = "registration-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(serve::ServeArgs),
}
