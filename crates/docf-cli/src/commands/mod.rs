pub mod clean;
pub mod config;
pub mod inspect;
pub mod manifest_args;
pub mod open;
pub mod pack;
pub mod unpack;
pub mod validate;
