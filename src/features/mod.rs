pub mod billing;
pub mod users;
pub mod webhook;
