//! The CONFIG.DAT record: layout, types, codec, flags, and defaults.
//!
//! WWIV 4.x keeps its entire system configuration in one 6228-byte packed
//! record. [`layout`] pins every width and offset, [`record`] holds the
//! decoded types and the single field table they share, [`codec`] decodes
//! and encodes through that table, [`restrict`] handles the 16-bit user
//! restriction mask, and a factory-default constructor builds the record a
//! fresh install starts from.

pub mod codec;
pub mod layout;
pub mod record;
pub mod restrict;

mod defaults;

pub use codec::CodecError;
pub use layout::CONFIG_RECORD_LEN;
pub use record::{ArchiverRecord, ConfigRecord, FieldVisitor, SecurityLevel, ValidationRecord};
pub use restrict::RestrictionFlags;
