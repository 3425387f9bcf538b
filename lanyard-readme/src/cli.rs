// ABOUTME: CLI argument definitions for the lanyard-readme application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use crate::embed::EmbedFormat;
use card_transcoder::constants::limits::MAX_WEBP_DIMENSION;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lanyard-readme")]
#[command(about = "Discord presence cards for your GitHub README", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a README snippet that shows a user's presence card
    Embed {
        /// Discord user ID (a 17-20 digit snowflake)
        user_id: String,

        /// Snippet flavor
        #[arg(long, short, value_enum)]
        format: Option<EmbedFormat>,

        /// Card host to link to
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },
    /// Fetch an image and re-encode it as base64 lossy WebP
    Transcode {
        /// Absolute URL of the source image
        url: String,

        /// Bounding edge in pixels for the output
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..=MAX_WEBP_DIMENSION as i64))]
        size: Option<i64>,

        /// Write the decoded WebP to FILE instead of printing base64
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print a data: URI instead of bare base64
        #[arg(long, conflicts_with = "output")]
        data_uri: bool,

        /// Give up on the fetch after this many seconds
        #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Reject source images larger than this (e.g. 10MB, 512KB)
        #[arg(long, value_name = "SIZE")]
        max_size: Option<String>,
    },
}
