pub mod auth_scheme;
pub mod digest_challenge;
pub mod webdav_auth;

pub use auth_scheme::AuthScheme;
pub use digest_challenge::{DigestAlgorithm, DigestChallenge};
pub use webdav_auth::WebdavAuth;
