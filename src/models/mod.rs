// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod category;
pub mod grounding;
pub mod place;
pub mod search;

pub use category::*;
pub use grounding::*;
pub use place::*;
pub use search::*;
