//! 入口函数：递归遍历与并发查询。

use crate::tests::mock_server::{MockResponse, MockServer};
use crate::tests::{multistatus_xml, response_xml};
use crate::{Session, WebdavError, stat_many, walk_dir};

/// 模拟一棵目录树：/dav/root/{a.txt, sub/{b.txt, deeper/{c.txt}}}
fn tree_handler(req: &crate::tests::mock_server::RecordedRequest) -> MockResponse {
    let body = match req.path.as_str() {
        "/dav/root/" => multistatus_xml(&[
            response_xml("/dav/root/", Some(0), true, None),
            response_xml("/dav/root/a.txt", Some(1), false, None),
            response_xml("/dav/root/sub/", Some(0), true, None),
        ]),
        "/dav/root/sub/" => multistatus_xml(&[
            response_xml("/dav/root/sub/", Some(0), true, None),
            response_xml("/dav/root/sub/b.txt", Some(2), false, None),
            response_xml("/dav/root/sub/deeper/", Some(0), true, None),
        ]),
        "/dav/root/sub/deeper/" => multistatus_xml(&[
            response_xml("/dav/root/sub/deeper/", Some(0), true, None),
            response_xml("/dav/root/sub/deeper/c.txt", Some(3), false, None),
        ]),
        _ => return MockResponse::new(404),
    };
    MockResponse::multistatus(&body)
}

#[tokio::test]
async fn walk_dir_lists_whole_tree() {
    let server = MockServer::start(tree_handler).await;
    let session = Session::new(&server.url_for("dav/")).unwrap();

    let entries = walk_dir(&session, "root").await.unwrap();
    let hrefs: Vec<&str> = entries.iter().map(|e| e.href.as_str()).collect();

    assert_eq!(
        hrefs,
        ["a.txt", "sub", "sub/b.txt", "sub/deeper", "sub/deeper/c.txt"]
    );
    assert_eq!(entries.iter().filter(|e| e.is_dir).count(), 2);
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn walk_dir_descends_into_escaped_directories() {
    let server = MockServer::start(|req| {
        let body = match req.path.as_str() {
            "/dav/album/" => multistatus_xml(&[
                response_xml("/dav/album/", Some(0), true, None),
                response_xml("/dav/album/2024%20%28summer%29/", Some(0), true, None),
            ]),
            "/dav/album/2024%20%28summer%29/" => multistatus_xml(&[
                response_xml("/dav/album/2024%20%28summer%29/", Some(0), true, None),
                response_xml("/dav/album/2024%20%28summer%29/beach.jpg", Some(5), false, None),
            ]),
            _ => return MockResponse::new(404),
        };
        MockResponse::multistatus(&body)
    })
    .await;
    let session = Session::new(&server.url_for("dav/")).unwrap();

    let entries = walk_dir(&session, "album").await.unwrap();
    let hrefs: Vec<&str> = entries.iter().map(|e| e.href.as_str()).collect();

    assert_eq!(hrefs, ["2024%20%28summer%29", "2024%20%28summer%29/beach.jpg"]);
    assert_eq!(entries[1].name(), "beach.jpg");
}

#[tokio::test]
async fn walk_dir_propagates_errors() {
    let server = MockServer::start(tree_handler).await;
    let session = Session::new(&server.url_for("dav/")).unwrap();

    let err = walk_dir(&session, "missing").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn stat_many_keeps_input_order() {
    let server = MockServer::start(|req| match req.path.as_str() {
        "/dav/one" => MockResponse::multistatus(&multistatus_xml(&[response_xml(
            "/dav/one",
            Some(1),
            false,
            None,
        )])),
        "/dav/empty" => MockResponse::multistatus(&multistatus_xml(&[])),
        _ => MockResponse::new(404),
    })
    .await;
    let session = Session::new(&server.url_for("dav/")).unwrap();

    let results = stat_many(&session, &["one", "empty", "nothing"]).await;
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().size, Some(1));
    assert!(matches!(results[1], Err(WebdavError::NotFound { .. })));
    assert_eq!(results[2].as_ref().unwrap_err().status_code(), Some(404));
}
