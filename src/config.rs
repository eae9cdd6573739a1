// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::PathBuf;
use std::time::Duration;

use crate::client::DEFAULT_API_URL;
use crate::store::{FileStorage, WriteDurability};

pub const DEFAULT_POLL_MS: u64 = 250;
pub const MIN_POLL_MS: u64 = 10;
const APP_DIR: &str = "adopta";
const LOG_FILE: &str = "adopta.log";

/// Options shared by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct GlobalArgs {
    /// Catalog collection URL.
    #[arg(long, env = "ADOPTA_API_URL", global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory holding persisted favorites (defaults to the platform data dir).
    #[arg(long, env = "ADOPTA_STORAGE_DIR", global = true, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Serve the built-in demo catalog in-process and browse it instead of the remote one.
    #[arg(long, global = true)]
    pub demo: bool,

    /// How often to check the favorites file for changes made by other sessions.
    #[arg(long, global = true, value_name = "MS")]
    pub poll_ms: Option<u64>,

    /// fsync favorites writes (slower, survives power loss).
    #[arg(long, global = true)]
    pub durable_writes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no data directory available on this platform; pass --storage-dir")]
    NoDataDir,
    #[error("poll interval must be at least {MIN_POLL_MS} ms, got {0} ms")]
    PollTooShort(u64),
    #[error("api url {url:?} must start with http:// or https://")]
    InvalidApiUrl { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Remote(String),
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog: CatalogSource,
    pub storage_dir: PathBuf,
    pub poll_interval: Duration,
    pub durability: WriteDurability,
}

impl Config {
    pub fn resolve(args: &GlobalArgs) -> Result<Self, ConfigError> {
        Self::resolve_with(args, dirs::data_dir())
    }

    /// Like [`Config::resolve`] with an explicit platform data directory.
    pub fn resolve_with(args: &GlobalArgs, data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let catalog = if args.demo {
            CatalogSource::Demo
        } else {
            let url = args.api_url.clone().unwrap_or_else(|| DEFAULT_API_URL.to_owned());
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidApiUrl { url });
            }
            CatalogSource::Remote(url)
        };

        let storage_dir = match &args.storage_dir {
            Some(dir) => dir.clone(),
            None => data_dir.ok_or(ConfigError::NoDataDir)?.join(APP_DIR),
        };

        let poll_ms = args.poll_ms.unwrap_or(DEFAULT_POLL_MS);
        if poll_ms < MIN_POLL_MS {
            return Err(ConfigError::PollTooShort(poll_ms));
        }

        let durability = if args.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        };

        Ok(Self {
            catalog,
            storage_dir,
            poll_interval: Duration::from_millis(poll_ms),
            durability,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.storage_dir.join(LOG_FILE)
    }

    pub fn open_storage(&self) -> FileStorage {
        FileStorage::with_durability(&self.storage_dir, self.durability)
    }
}
