/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public ABCP adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod cp;
pub mod http;
pub mod ts;
pub mod types;

// Re-export commonly used types from auth
pub use auth::Credentials;

// Re-export commonly used types from http
pub use http::{
    AbcpClient,
    AbcpError,
    ClientConfig,
    DateArg,
    DateTimeArg,
    Result,
    UploadFile,
};
