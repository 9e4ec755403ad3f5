/*
[INPUT]:  Submodule declarations
[OUTPUT]: HTTP layer public surface
[POS]:    Module organization for the transport layer
[UPDATE]: When adding new transport modules
*/

pub mod client;
pub mod dates;
pub mod error;
pub(crate) mod params;

pub use client::{AbcpClient, ClientConfig, UploadFile};
pub use dates::{DateArg, DateTimeArg};
pub use error::{AbcpError, Result};
