pub mod auth;
pub mod entrance;
pub mod errors;
pub mod session;
pub mod transport;
pub mod webdav;
