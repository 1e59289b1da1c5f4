//! Command-line surface over the domain services.
//!
//! Each subcommand maps onto one service operation; [`CliRunner`] performs
//! it and `render` turns the result into the text printed on stdout.

mod render;
mod runner;

use clap::{Args, Parser, Subcommand};
use pagination::PageRequest;

use crate::config::ClientSettings;
use crate::domain::{Identity, IdValidationError, ManagerId, UserId};

pub use runner::{CliRunner, FranchiseBackend};

/// `franchise` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "franchise",
    about = "Browse franchise brands, keep a saved list and negotiate consultations",
    version
)]
pub struct Cli {
    /// Franchise backend URL. Falls back to `FRANCHISE_BASE_URL`.
    #[arg(long = "base-url", value_name = "url", global = true)]
    pub base_url: Option<String>,
    /// Act as this end user.
    #[arg(long = "as-user", value_name = "id", global = true, conflicts_with = "as_manager")]
    pub as_user: Option<i64>,
    /// Act as this brand manager.
    #[arg(long = "as-manager", value_name = "id", global = true)]
    pub as_manager: Option<i64>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Public brand listings.
    #[command(subcommand)]
    Brands(BrandsCommand),
    /// Brands saved by the current user.
    #[command(subcommand)]
    Saved(SavedCommand),
    /// The current user's consultations.
    #[command(subcommand)]
    Consult(ConsultCommand),
    /// Consultations addressed to the current manager's brands.
    #[command(subcommand)]
    Manager(ManagerCommand),
}

/// Paging flags shared by every listing.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct PageArgs {
    /// Zero-based page index.
    #[arg(long, value_name = "n")]
    pub page: Option<u32>,
    /// Elements per page.
    #[arg(long, value_name = "n")]
    pub size: Option<u32>,
}

impl PageArgs {
    /// Overlay the flags on `default`, clamping an oversized page size.
    pub fn request(self, default: PageRequest) -> PageRequest {
        let size = self.size.unwrap_or(default.size());
        let first = PageRequest::first(size);
        PageRequest::new(self.page.unwrap_or(default.page()), first.size()).unwrap_or(first)
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum BrandsCommand {
    /// List all brands.
    List(PageArgs),
    /// Search brands by keyword.
    Search {
        keyword: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// List the brands in one category.
    Category {
        category_id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one brand.
    Show { brand_id: i64 },
    /// List brand categories.
    Categories,
}

#[derive(Debug, Clone, Subcommand)]
pub enum SavedCommand {
    /// List saved brands.
    List(PageArgs),
    /// Show the saved flag of each brand.
    Status {
        #[arg(required = true)]
        brand_ids: Vec<i64>,
    },
    /// Save or unsave a brand.
    Toggle {
        brand_id: i64,
        /// Print the brand detail with the updated save count.
        #[arg(long)]
        detail: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConsultCommand {
    /// Request a consultation with a brand.
    Request {
        brand_id: i64,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: String,
        #[arg(long, value_name = "HH:MM")]
        time: String,
        #[arg(long, value_name = "text")]
        message: String,
    },
    /// List your consultations.
    List(PageArgs),
    /// Show one consultation.
    Show { id: i64 },
    /// Accept the proposed slot.
    Accept { id: i64 },
    /// Reject the proposed slot, cancelling the consultation.
    Reject { id: i64 },
    /// Cancel a consultation.
    Cancel { id: i64 },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ManagerCommand {
    /// List consultations with per-status counts.
    List(PageArgs),
    /// Show one consultation from the listing.
    Show { id: i64 },
    /// Confirm a pending consultation.
    Confirm { id: i64 },
    /// Propose another slot for a pending consultation.
    Reschedule {
        id: i64,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: String,
        #[arg(long, value_name = "HH:MM")]
        time: String,
        #[arg(long, value_name = "text")]
        reason: Option<String>,
        #[arg(long, value_name = "text")]
        note: Option<String>,
    },
    /// Cancel a consultation.
    Cancel { id: i64 },
}

/// Identity to act as: flags first, then settings. A manager flag or
/// setting only applies when no user was chosen at the same level.
///
/// # Errors
///
/// Returns [`IdValidationError`] when the chosen id is not positive.
pub fn resolve_identity(
    cli: &Cli,
    settings: &ClientSettings,
) -> Result<Option<Identity>, IdValidationError> {
    let (user, manager) = if cli.as_user.is_some() || cli.as_manager.is_some() {
        (cli.as_user, cli.as_manager)
    } else {
        (settings.user_id, settings.manager_id)
    };
    match (user, manager) {
        (Some(user), _) => UserId::new(user).map(|id| Some(Identity::User(id))),
        (None, Some(manager)) => ManagerId::new(manager).map(|id| Some(Identity::Manager(id))),
        (None, None) => Ok(None),
    }
}
