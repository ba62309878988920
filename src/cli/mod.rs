//! Interactive command-line session

pub mod session;

pub use session::{MenuChoice, Session, SessionState};
