//! HTTP request handlers for the Stock Room Inventory service

pub mod checkout;
pub mod choices;
pub mod health;
pub mod inventory;
pub mod reporting;
pub mod transfer;

pub use checkout::*;
pub use choices::*;
pub use health::*;
pub use inventory::*;
pub use reporting::*;
pub use transfer::*;

use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Treat an empty query value (`?center=`) as absent
pub(crate) fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => T::from_str(s).map(Some).map_err(serde::de::Error::custom),
    }
}
