//! Repository constants and environment-driven settings
//!
//! Settings are read once from the environment by the binary and handed to the
//! `Repository` handle, so library code never consults the environment itself.
//!
//! | Variable           | Effect                                                   |
//! |--------------------|----------------------------------------------------------|
//! | `TWIG_COMMIT_DATE` | Fixed timestamp for new commits (tests, reproducible runs) |
//! | `NO_PAGER`         | Disable the pager for `log` and `global-log`             |
//! | `TWIG_LOG`         | `tracing` filter directive, defaults to `warn`           |

use anyhow::Context;
use chrono::{DateTime, FixedOffset, SubsecRound};
use derive_new::new;
use is_terminal::IsTerminal;

/// Name of the repository metadata directory inside the working tree
pub const REPOSITORY_DIR: &str = ".twig";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Message of the root commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";
pub const NO_PAGER_ENV: &str = "NO_PAGER";
pub const LOG_FILTER_ENV: &str = "TWIG_LOG";

/// Default `tracing` filter when `TWIG_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings threaded through every repository operation
#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct RepositoryConfig {
    /// Timestamp stamped on new commits; the current local time is used when unset
    pub commit_date: Option<DateTime<FixedOffset>>,
}

impl RepositoryConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        let commit_date = match std::env::var(COMMIT_DATE_ENV) {
            Ok(raw) => Some(
                parse_commit_date(&raw)
                    .with_context(|| format!("invalid {COMMIT_DATE_ENV} value: {raw}"))?,
            ),
            Err(_) => None,
        };

        Ok(Self { commit_date })
    }

    /// The timestamp for a commit created right now, truncated to whole seconds
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
            .trunc_subsecs(0)
    }
}

/// Accepts `%Y-%m-%d %H:%M:%S %z`, RFC 3339 and RFC 2822 timestamps
pub fn parse_commit_date(raw: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map_err(|_| anyhow::anyhow!("unrecognised date format"))
}

/// Whether long output should go through the pager
pub fn pager_enabled() -> bool {
    std::env::var_os(NO_PAGER_ENV).is_none() && std::io::stdout().is_terminal()
}
