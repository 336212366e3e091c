//! Configuration management for the booking system.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::model::LessonCreate;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read seed catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Seed catalog {} is not a valid lesson list: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Runtime settings loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Channel capacity of the lesson store (`BOOKING_LESSON_BUFFER`, default 100)
    pub lesson_buffer: usize,
    /// Channel capacity of the order ledger (`BOOKING_ORDER_BUFFER`, default 100)
    pub order_buffer: usize,
    /// JSON file with the lessons to load at start-up (`BOOKING_SEED_CATALOG`)
    pub seed_catalog: Option<PathBuf>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            lesson_buffer: 100,
            order_buffer: 100,
            seed_catalog: None,
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to [`BookingConfig::default`].
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lesson_buffer: env::var("BOOKING_LESSON_BUFFER")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.lesson_buffer),
            order_buffer: env::var("BOOKING_ORDER_BUFFER")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.order_buffer),
            seed_catalog: env::var("BOOKING_SEED_CATALOG")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Lessons to create when the system starts.
    ///
    /// # Errors
    ///
    /// Fails if `seed_catalog` is set but cannot be read or parsed.
    pub fn seed_catalog(&self) -> Result<Vec<LessonCreate>, ConfigError> {
        match &self.seed_catalog {
            Some(path) => load_catalog(path),
            None => Ok(default_catalog()),
        }
    }
}

fn load_catalog(path: &Path) -> Result<Vec<LessonCreate>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The catalog used when no seed file is configured.
pub fn default_catalog() -> Vec<LessonCreate> {
    [
        ("Mathematics", "Hendon", 100, 5, "math.png"),
        ("Mathematics", "Colindale", 80, 5, "math.png"),
        ("English", "Brent Cross", 90, 5, "english.png"),
        ("English", "Golders Green", 95, 5, "english.png"),
        ("Music", "Hendon", 120, 5, "music.png"),
        ("Music", "Mill Hill", 110, 5, "music.png"),
        ("Art", "Barnet", 70, 5, "art.png"),
        ("Science", "Edgware", 130, 5, "science.png"),
        ("History", "Finchley", 85, 5, "history.png"),
        ("Coding", "Camden", 150, 5, "coding.png"),
    ]
    .into_iter()
    .map(|(subject, location, price, space, image)| LessonCreate {
        subject: subject.to_string(),
        location: location.to_string(),
        price,
        space,
        image: image.to_string(),
    })
    .collect()
}
