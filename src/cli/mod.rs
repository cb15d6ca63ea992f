//! CLI module - Command-line interface for Marquee
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Marquee - Cinema schedule manager
/// Movies, halls and conflict-free show booking over a REST API
#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config.toml (defaults to the standard search locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    #[command(alias = "daemon")]
    Serve,

    /// Write a default config.toml if none exists
    Init,

    /// Apply database migrations and exit
    Migrate,

    /// List all genres
    Genres,

    /// List all halls
    Halls,

    /// List all movies
    #[command(alias = "ls")]
    Movies,

    /// Print the show schedule
    Shows {
        /// Case-sensitive fragment of the movie title
        #[arg(long)]
        title: Option<String>,

        /// Case-sensitive fragment of the genre name
        #[arg(long)]
        genre: Option<String>,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// First day to exclude (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}
