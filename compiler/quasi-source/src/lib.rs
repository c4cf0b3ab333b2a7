//! Quasi source utilities: interned names, host identifiers and source
//! locations.
pub mod identifier;
pub mod location;
