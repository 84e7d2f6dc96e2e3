pub mod auth;
pub mod break_record;
pub mod group;
pub mod organisation;
pub mod replacement;
pub mod status;
pub mod user;
