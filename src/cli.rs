//! Command-line interface definitions for jaundice_rate.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option can also be provided through an environment variable.

use crate::analyzer::{
    AnalyzerConfig, DEFAULT_CHARGED_WORDS_PATH, DEFAULT_FETCH_TIMEOUT, DEFAULT_PROCESSING_TIMEOUT,
};
use crate::error::Result;
use crate::server::MAX_LIMIT_URLS;
use crate::utils::seconds;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command-line arguments for the jaundice_rate application.
///
/// # Examples
///
/// ```sh
/// # Rate the built-in test articles
/// jaundice_rate analyze
///
/// # Rate specific articles with a tighter fetch budget
/// jaundice_rate --fetch-timeout 2.5 analyze https://inosmi.ru/politic/20211105/250848301.html
///
/// # Serve the HTTP endpoint
/// jaundice_rate serve --addr 0.0.0.0:8080
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Line-delimited file with charged words
    #[arg(long, env = "CHARGED_WORDS_PATH", default_value = DEFAULT_CHARGED_WORDS_PATH, global = true)]
    pub charged_words: PathBuf,

    /// Seconds allowed for downloading one article
    #[arg(long, env = "FETCH_TIMEOUT", default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs_f64(), global = true)]
    pub fetch_timeout: f64,

    /// Seconds allowed for tokenizing and scoring one article
    #[arg(long, env = "PROCESSING_TIMEOUT", default_value_t = DEFAULT_PROCESSING_TIMEOUT.as_secs_f64(), global = true)]
    pub processing_timeout: f64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Rate the given articles once and print the results as JSON
    Analyze {
        /// Article URLs; the built-in test articles are used when omitted
        urls: Vec<String>,
    },
    /// Serve the analyzer over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:8080")]
        addr: SocketAddr,

        /// Largest number of URLs accepted per request
        #[arg(long, env = "MAX_URLS", default_value_t = MAX_LIMIT_URLS)]
        max_urls: usize,
    },
}

impl Cli {
    /// Collect the analyzer settings, validating the timeouts.
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        Ok(AnalyzerConfig {
            charged_words_path: self.charged_words.clone(),
            fetch_timeout: seconds(self.fetch_timeout)?,
            processing_timeout: seconds(self.processing_timeout)?,
        })
    }
}
