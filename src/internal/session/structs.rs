pub mod remote_reader;
pub mod session;
pub mod session_config;

pub use remote_reader::RemoteReader;
pub use session::Session;
pub use session_config::SessionConfig;
