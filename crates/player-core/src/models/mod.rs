//! Data models for the application
//!
//! Each sub-module represents a specific entity: the user-visible video and
//! session, the read-permission state, and the persisted handle records.

mod handle_record;
mod permission;
mod session;
mod video;

pub use handle_record::*;
pub use permission::*;
pub use session::*;
pub use video::*;
