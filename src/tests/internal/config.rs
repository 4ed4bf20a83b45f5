//! 会话配置与认证方式选择。

use std::collections::HashMap;
use std::time::Duration;

use crate::auth::{AuthScheme, WebdavAuth};
use crate::config::env_var_names;
use crate::tests::mock_server::{MockResponse, MockServer};
use crate::{SessionConfig, WebdavError, connect};

#[test]
fn auth_scheme_defaults_follow_username() {
    assert_eq!(SessionConfig::new("http://h/").auth_scheme(), AuthScheme::None);
    assert_eq!(
        SessionConfig::new("http://h/").with_credentials("u", "p").auth_scheme(),
        AuthScheme::Basic
    );
    assert_eq!(
        SessionConfig::new("http://h/")
            .with_credentials("u", "p")
            .with_auth_scheme(AuthScheme::Digest)
            .auth_scheme(),
        AuthScheme::Digest
    );
}

#[test]
fn auth_scheme_parses_from_text() {
    assert_eq!("Digest".parse::<AuthScheme>().unwrap(), AuthScheme::Digest);
    assert_eq!(" basic ".parse::<AuthScheme>().unwrap(), AuthScheme::Basic);
    assert_eq!("".parse::<AuthScheme>().unwrap(), AuthScheme::None);
    assert!(matches!("ntlm".parse::<AuthScheme>(), Err(WebdavError::Config(_))));
}

#[test]
fn reads_variables_through_lookup() {
    let vars: HashMap<&str, &str> = HashMap::from([
        (env_var_names::WEBDAV_URL, "https://dav.example.com/files"),
        (env_var_names::WEBDAV_USERNAME, "dave"),
        (env_var_names::WEBDAV_PASSWORD, "pw"),
        (env_var_names::WEBDAV_AUTH, "digest"),
        (env_var_names::WEBDAV_TIMEOUT_SECS, " 30 "),
    ]);
    let config =
        SessionConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

    assert_eq!(config.url, "https://dav.example.com/files");
    assert_eq!(config.username.as_deref(), Some("dave"));
    assert_eq!(config.auth_scheme(), AuthScheme::Digest);
    assert_eq!(config.timeout(), Some(Duration::from_secs(30)));

    let missing_url = SessionConfig::from_lookup(|_| None);
    assert!(matches!(missing_url, Err(WebdavError::Config(_))));

    let bad_timeout = SessionConfig::from_lookup(|key| match key {
        env_var_names::WEBDAV_URL => Some("http://h/".to_string()),
        env_var_names::WEBDAV_TIMEOUT_SECS => Some("soon".to_string()),
        _ => None,
    });
    assert!(matches!(bad_timeout, Err(WebdavError::Config(_))));
}

#[test]
fn config_debug_hides_password() {
    let config = SessionConfig::new("http://h/").with_credentials("bob", "hunter2");
    assert!(!format!("{config:?}").contains("hunter2"));
}

#[test]
fn auth_equality_uses_hashed_token() {
    let a = WebdavAuth::basic("u", "p");
    let b = WebdavAuth::digest("u", "p");
    assert!(a.eq_only_token(&b));
    assert_ne!(a, b);
    assert_eq!(a, WebdavAuth::basic("u", "p"));
    assert!(WebdavAuth::new("u", "p", AuthScheme::None).is_anonymous());
}

#[tokio::test]
async fn connect_applies_credentials_and_timeout() {
    let server = MockServer::always(MockResponse::new(201)).await;
    let config = SessionConfig::new(&server.url_for("dav"))
        .with_credentials("carol", "pw")
        .with_timeout(Duration::from_secs(5));
    assert_eq!(config.timeout(), Some(Duration::from_secs(5)));

    let session = connect(&config).unwrap();
    assert_eq!(session.base().path(), "/dav/");
    assert_eq!(session.auth().scheme, AuthScheme::Basic);

    session.mkdir("x/").await.unwrap();
    let header = server.last_request().header("authorization").map(str::to_string);
    assert!(header.unwrap().starts_with("Basic "));
}
