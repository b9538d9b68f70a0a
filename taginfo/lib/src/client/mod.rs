//! HTTP client and session handling.

mod executor;
mod session;

pub use executor::{TaginfoClient, TaginfoClientBuilder, DEFAULT_BASE_URL};
pub use session::{Session, SessionBuilder, DEFAULT_USER_AGENT};
