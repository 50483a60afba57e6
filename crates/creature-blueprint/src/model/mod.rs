//! Data model types for creature blueprints.
//!
//! - [`Blueprint`]: the decoded record
//! - [`SchemaVersion`]: which wire layout a blueprint uses
//! - [`MorphReference`], [`Stat`], [`SlotOverride`]: record components

pub mod blueprint;

pub use blueprint::{Blueprint, MorphReference, SchemaVersion, SlotOverride, Stat};
