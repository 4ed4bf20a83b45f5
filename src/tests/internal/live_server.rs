//! 真实服务器测试：`src/tests/env/webdav.env` 不存在时直接跳过。

use rand::Rng;

use crate::tests::load_account_optional;

#[tokio::test]
async fn round_trip_against_live_server() {
    let Some(account) = load_account_optional() else {
        eprintln!("未配置真实服务器，跳过");
        return;
    };
    let session = account.to_session().unwrap();

    let dir = format!("webdav-session-{:08x}/", rand::thread_rng().r#gen::<u32>());
    let payload: Vec<u8> = (0..256).map(|_| rand::random::<u8>()).collect();

    session.mkdir(&dir).await.unwrap();
    let file = format!("{dir}blob.bin");
    session.put(&file, payload.clone()).await.unwrap();

    let info = session.stat(&file).await.unwrap();
    assert!(!info.is_dir);
    assert_eq!(info.size, Some(payload.len() as u64));

    let copy = format!("{dir}copy.bin");
    session.copy(&file, &copy).await.unwrap();
    let reader = session.get(&copy).await.unwrap();
    assert_eq!(reader.bytes().await.unwrap().to_vec(), payload);

    let entries = session.listdir(&dir).await.unwrap();
    println!("listdir: {entries:#?}");

    session.remove_all(&dir).await.unwrap();
}
