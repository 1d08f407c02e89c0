//! Auth-domain identifiers, profile claims, and signed credentials.

pub mod claims;
pub mod credential;
pub mod id;

pub use claims::*;
pub use credential::*;
pub use id::*;
