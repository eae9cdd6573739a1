// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Identifier assigned to a catalog entry by the remote service.
///
/// The service is loosely typed and sometimes encodes ids as strings (`"12"`), so deserialization
/// accepts both forms. Serialization always produces a JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(i64);

impl EntryId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntryId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid entry id {value:?}: expected an integer")]
pub struct ParseEntryIdError {
    value: String,
}

impl FromStr for EntryId {
    type Err = ParseEntryIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self).map_err(|_| ParseEntryIdError { value: s.to_owned() })
    }
}

impl Serialize for EntryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match LooseScalar::deserialize(deserializer)? {
            LooseScalar::Int(value) => Ok(Self(value)),
            LooseScalar::Str(raw) => raw.parse().map_err(de::Error::custom),
            other => Err(de::Error::custom(format!("invalid entry id: {other}"))),
        }
    }
}

/// One adoptable animal as published by the remote catalog.
///
/// Wire names follow the service (`nombre`, `ciudad`, ...). Entries are never mutated on the
/// client; a refetch replaces the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    id: EntryId,
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "ciudad")]
    city: String,
    #[serde(rename = "tamano", default)]
    size: String,
    #[serde(rename = "edad", default, deserialize_with = "de_age")]
    age: u32,
    #[serde(rename = "imagen", default)]
    image: String,
    #[serde(rename = "descripcion", default)]
    description: String,
    #[serde(rename = "vacunado", default, with = "flag")]
    vaccinated: bool,
    #[serde(rename = "esterilizado", default, with = "flag")]
    sterilized: bool,
    #[serde(rename = "discapacidad", default, with = "flag")]
    special_needs: bool,
}

impl CatalogEntry {
    pub fn new(id: EntryId, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            size: String::new(),
            age: 0,
            image: String::new(),
            description: String::new(),
            vaccinated: false,
            sterilized: false,
            special_needs: false,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_flags(mut self, vaccinated: bool, sterilized: bool, special_needs: bool) -> Self {
        self.vaccinated = vaccinated;
        self.sterilized = sterilized;
        self.special_needs = special_needs;
        self
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn vaccinated(&self) -> bool {
        self.vaccinated
    }

    pub fn sterilized(&self) -> bool {
        self.sterilized
    }

    pub fn special_needs(&self) -> bool {
        self.special_needs
    }

    /// Human-readable labels for the set flags, in display order.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if self.vaccinated {
            tags.push("Vaccinated");
        }
        if self.sterilized {
            tags.push("Sterilized");
        }
        if self.special_needs {
            tags.push("Special care");
        }
        tags
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseScalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Null(()),
}

impl fmt::Display for LooseScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value:?}"),
            Self::Null(()) => f.write_str("null"),
        }
    }
}

fn de_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    match LooseScalar::deserialize(deserializer)? {
        LooseScalar::Int(value) => u32::try_from(value).map_err(de::Error::custom),
        LooseScalar::Float(value) if value.is_finite() && value >= 0.0 => Ok(value as u32),
        LooseScalar::Str(raw) => {
            let raw = raw.trim();
            if let Ok(value) = raw.parse::<u32>() {
                return Ok(value);
            }
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => Ok(value as u32),
                _ => Err(de::Error::custom(format!("invalid age: {raw:?}"))),
            }
        }
        LooseScalar::Null(()) => Ok(0),
        other => Err(de::Error::custom(format!("invalid age: {other}"))),
    }
}

/// 0/1 flags. The service sends integers, numeric strings, or occasionally booleans.
mod flag {
    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::Serializer;

    use super::LooseScalar;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match LooseScalar::deserialize(deserializer)? {
            LooseScalar::Int(0) => Ok(false),
            LooseScalar::Int(1) => Ok(true),
            LooseScalar::Bool(value) => Ok(value),
            LooseScalar::Null(()) => Ok(false),
            LooseScalar::Str(raw) => match raw.trim() {
                "0" | "" | "false" => Ok(false),
                "1" | "true" => Ok(true),
                other => Err(de::Error::custom(format!("invalid flag: {other:?}"))),
            },
            other => Err(de::Error::custom(format!("invalid flag: {other}"))),
        }
    }
}
