pub mod config;
pub mod engine_types;
pub mod sieve;
pub mod verify;
pub mod bench;
pub mod output;
