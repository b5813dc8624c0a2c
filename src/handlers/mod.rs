pub mod activities;
pub mod auth;
pub mod meta;
