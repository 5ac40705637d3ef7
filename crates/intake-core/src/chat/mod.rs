//! Session-level pieces: the append-only transcript, the session value a
//! host owns, and the controller that advances it.

pub mod controller;
pub mod session;
pub mod transcript;
