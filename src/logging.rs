// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Subscriber setup. Filter directives come from `ADOPTA_LOG` (same syntax as `RUST_LOG`).

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "ADOPTA_LOG";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to install log subscriber: {message}")]
    Install { message: String },
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Logs to stderr. Used by one-shot CLI commands.
pub fn init_stderr(default_directive: &str) -> Result<(), LoggingError> {
    fmt()
        .with_env_filter(env_filter(default_directive))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| LoggingError::Install {
            message: err.to_string(),
        })
}

/// Appends logs to `path`. Used while the terminal UI owns the screen.
pub fn init_file(path: &Path, default_directive: &str) -> Result<(), LoggingError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| LoggingError::Open {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    fmt()
        .with_env_filter(env_filter(default_directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| LoggingError::Install {
            message: err.to_string(),
        })
}
