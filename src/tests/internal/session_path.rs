//! 会话路径解析：abs 与 chdir。

use crate::{Session, WebdavError};

fn session() -> Session {
    Session::new("http://example.com/dav").unwrap()
}

#[test]
fn root_url_gets_trailing_slash() {
    assert_eq!(session().base().as_str(), "http://example.com/dav/");
}

#[test]
fn abs_joins_onto_base_path() {
    let s = session();
    assert_eq!(s.abs("file.txt"), "http://example.com/dav/file.txt");
    assert_eq!(s.abs("/file.txt"), "http://example.com/dav/file.txt");
    assert_eq!(s.abs("a/./b/../c.txt"), "http://example.com/dav/a/c.txt");
    assert_eq!(s.abs("../outside"), "http://example.com/outside");
}

#[test]
fn abs_keeps_trailing_slash_only_when_requested() {
    let s = session();
    assert_eq!(s.abs("docs/"), "http://example.com/dav/docs/");
    assert_eq!(s.abs("docs"), "http://example.com/dav/docs");
    assert_eq!(s.abs("./"), "http://example.com/dav/");

    for name in ["a", "a/b", "a//b", "x.txt", "deep/er/path", "a/.."] {
        assert!(!s.abs(name).ends_with('/'), "{name} -> {}", s.abs(name));
    }
    for name in ["a/", "a/b/", "a//b//", "x.txt/", "./", "a/../"] {
        assert!(s.abs(name).ends_with('/'), "{name} -> {}", s.abs(name));
    }
}

#[test]
fn abs_percent_encodes_names() {
    let s = session();
    assert_eq!(s.abs("my file.txt"), "http://example.com/dav/my%20file.txt");
    assert_eq!(s.abs("a%20b"), "http://example.com/dav/a%20b");
}

#[test]
fn abs_keeps_port() {
    let s = Session::new("http://127.0.0.1:8008/go").unwrap();
    assert_eq!(s.abs("src/test"), "http://127.0.0.1:8008/go/src/test");
}

#[test]
fn chdir_resolves_like_a_url_reference() {
    let mut s = session();

    s.chdir("sub/").unwrap();
    assert_eq!(s.base().as_str(), "http://example.com/dav/sub/");
    assert_eq!(s.abs("f.txt"), "http://example.com/dav/sub/f.txt");

    s.chdir("../").unwrap();
    assert_eq!(s.base().as_str(), "http://example.com/dav/");

    s.chdir("/other/").unwrap();
    assert_eq!(s.base().as_str(), "http://example.com/other/");

    s.chdir("https://mirror.example.org/root/").unwrap();
    assert_eq!(s.abs("x"), "https://mirror.example.org/root/x");
}

#[test]
fn rejects_unusable_root_urls() {
    assert!(matches!(Session::new(""), Err(WebdavError::Config(_))));
    assert!(matches!(Session::new("not a url"), Err(WebdavError::InvalidUrl(_))));
    assert!(matches!(Session::new("mailto:someone@example.com"), Err(WebdavError::Config(_))));
}

#[test]
fn debug_hides_credentials() {
    let mut s = session();
    s.set_basic_auth("alice", "secret-password");
    let printed = format!("{s:?}");
    assert!(!printed.contains("secret-password"));
    assert!(!printed.contains("alice"));
}
