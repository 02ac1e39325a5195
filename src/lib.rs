//! # rustcolleagues
//!
//! Find the Google Scholar co-authors of a researcher who work at
//! institutions in a given region, and append them to a CSV file.
//!
//! ## Modules
//!
//! - [`profile`] - Scholar author search scraping (name to profile id)
//! - [`serpapi`] - SerpAPI co-author listing client
//! - [`filter`] - Region affiliation filter
//! - [`export`] - Append-only CSV export
//! - [`pipeline`] - The stages wired together
//! - [`config`] - Environment-backed settings
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rustcolleagues::{config::Settings, pipeline::Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = Pipeline::new(Settings::from_env())?;
//!     let report = pipeline.run("Jane Doe").await?;
//!     println!("Found {} connections", report.connections.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod profile;
pub mod serpapi;

pub use error::{ColleagueError, Result};
