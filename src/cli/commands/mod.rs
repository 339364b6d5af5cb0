pub mod add;
pub mod audit_cmd;
pub mod auth;
pub mod code;
pub mod completions;
pub mod export;
pub mod init;
pub mod list;
pub mod uri;
pub mod watch;
