//! Domain models for the leveling engine.
//!
//! These types make up the persisted settings document (`Db`, `GuildSettings`,
//! `Profile`) and the values passed between engine components (activity events,
//! awards, level transitions, role plans). Persisted types derive serde and
//! validate their invariants while deserializing, so an invalid document is
//! rejected at load time instead of surfacing mid-operation.

pub mod activity;
pub mod algorithm;
pub mod db;
pub mod emoji;
pub mod notification;
pub mod profile;
pub mod role;
pub mod settings;
pub mod xp_range;

#[cfg(test)]
mod test;
