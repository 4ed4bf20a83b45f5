pub mod digest_transport;
pub mod plain_transport;

pub use digest_transport::DigestTransport;
pub use plain_transport::PlainTransport;
