// productvault/src/models/timestamp.rs

//! The single readable timestamp format used in responses and metadata sidecars.

use chrono::{Local, NaiveDateTime, SubsecRound};

pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Local wall-clock time, truncated to what `FORMAT` can represent.
pub fn now() -> NaiveDateTime {
  Local::now().naive_local().trunc_subsecs(3)
}

pub fn format(ts: &NaiveDateTime) -> String {
  ts.format(FORMAT).to_string()
}

/// `#[serde(with = "timestamp::serde_format")]`
pub mod serde_format {
  use chrono::NaiveDateTime;
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&super::format(ts))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, super::FORMAT).map_err(serde::de::Error::custom)
  }
}
