// Dashboard records and the server's wire format

mod record;
mod wire;

pub use record::{DatabaseRecord, NO_USER};
pub use wire::{Ack, ApiResponse, DatabaseEntry, DropRequest, StatePayload};
