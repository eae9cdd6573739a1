// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Adoption request form.
//!
//! Submission is simulated: a valid request produces a confirmation message and a log line, and
//! nothing leaves the process.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::CatalogEntry;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdoptionError {
    #[error("name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("email {email:?} is not a valid address")]
    InvalidEmail { email: String },
    #[error("phone is required")]
    MissingPhone,
}

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdoptionRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
}

impl AdoptionRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.message = (!message.trim().is_empty()).then_some(message);
        self
    }

    /// Checks required fields in form order and reports the first problem.
    pub fn validate(&self) -> Result<(), AdoptionError> {
        if self.name.trim().is_empty() {
            return Err(AdoptionError::MissingName);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(AdoptionError::MissingEmail);
        }
        if !is_valid_email(email) {
            return Err(AdoptionError::InvalidEmail {
                email: email.to_owned(),
            });
        }
        if self.phone.trim().is_empty() {
            return Err(AdoptionError::MissingPhone);
        }
        Ok(())
    }

    /// Confirmation text shown after a simulated submission.
    pub fn acknowledge(&self, entry: &CatalogEntry) -> String {
        format!(
            "Thank you {}! Your request to adopt {} has been sent. \
             We will contact you to continue the adoption process.",
            self.name.trim(),
            entry.name()
        )
    }

    /// Validates the request and returns the confirmation text.
    pub fn submit(&self, entry: &CatalogEntry) -> Result<String, AdoptionError> {
        self.validate()?;
        tracing::info!(
            entry = %entry.id(),
            has_message = self.message.is_some(),
            "adoption request submitted"
        );
        Ok(self.acknowledge(entry))
    }
}
