pub mod check;
pub mod get;
pub mod rules;
pub mod show;
pub mod watch;
