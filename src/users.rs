//! User records and the derived "adults by age" view

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Minimum age for a user to appear in the derived view
pub const ADULT_AGE: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub age: u32,
}

impl User {
    pub fn new(id: u32, name: impl Into<String>, age: u32) -> Self {
        Self { id, name: name.into(), age }
    }

    pub fn is_adult(&self) -> bool {
        self.age >= ADULT_AGE
    }
}

/// The built-in record set
pub fn builtin() -> Vec<User> {
    vec![
        User::new(1, "Alice", 22),
        User::new(2, "Bob", 17),
        User::new(3, "Charlie", 25),
    ]
}

/// Positions of adult users, ordered by age ascending.
/// Equal ages keep their input order.
pub fn adult_indices_by_age(users: &[User]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..users.len()).filter(|&i| users[i].is_adult()).collect();
    // sort_by_key is stable
    indices.sort_by_key(|&i| users[i].age);
    indices
}

/// Adult users ordered by age ascending
pub fn adults_by_age(users: &[User]) -> Vec<&User> {
    adult_indices_by_age(users).into_iter().map(|i| &users[i]).collect()
}

/// Names of adult users ordered by age ascending
pub fn adult_names_by_age(users: &[User]) -> Vec<String> {
    adults_by_age(users).into_iter().map(|u| u.name.clone()).collect()
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("failed to read user file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse user file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize)]
struct UserFile {
    // Kept as raw values so one badly typed record can't fail the whole file
    #[serde(default)]
    users: Vec<toml::Value>,
}

/// Load user records from a TOML file.
///
/// Malformed records (missing fields, negative numbers, blank names,
/// duplicate ids) are skipped with a warning rather than failing the load.
pub fn load(path: &Path) -> Result<Vec<User>, UserError> {
    let content = std::fs::read_to_string(path).map_err(|source| UserError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let users = parse(&content).map_err(|source| UserError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Loaded {} user records from {}", users.len(), path.display());
    Ok(users)
}

fn parse(content: &str) -> Result<Vec<User>, toml::de::Error> {
    let file: UserFile = toml::from_str(content)?;

    let mut seen = HashSet::new();
    let mut users = Vec::with_capacity(file.users.len());

    for (index, raw) in file.users.iter().enumerate() {
        match validate(raw) {
            Some(user) if !seen.insert(user.id) => {
                tracing::warn!("Skipping user #{}: duplicate id {}", index, user.id);
            }
            Some(user) => users.push(user),
            None => tracing::warn!("Skipping malformed user record #{}", index),
        }
    }

    Ok(users)
}

fn validate(raw: &toml::Value) -> Option<User> {
    let record = raw.as_table()?;

    let id = u32::try_from(record.get("id")?.as_integer()?).ok()?;
    let age = u32::try_from(record.get("age")?.as_integer()?).ok()?;
    let name = record.get("name")?.as_str()?.trim().to_string();

    if name.is_empty() {
        return None;
    }

    Some(User { id, name, age })
}
