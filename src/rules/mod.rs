//! Validation rules module
//!
//! - `fields` - Field rule library: inclusion of entry fields per (category, SEC code)
//! - `policy` - SEC-code policy table: forbidden codes and addenda limits per SEC code

pub mod fields;
pub mod policy;

pub use fields::{field_is_required_for, field_must_be_blank_for, Field, Inclusion};
pub use policy::{policy_for, SecPolicy};
