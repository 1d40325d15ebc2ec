pub mod proto {
    include!(concat!(env!("OUT_DIR"), "/odd_scoring.rs"));
}

pub mod config;
pub mod error;
pub mod games;
pub mod id_generator;
pub mod identifiers;
pub mod lobby;
pub mod logger;
pub mod persistence;
pub mod protocol;
pub mod session;

pub use error::SessionError;
pub use identifiers::*;
