use std::collections::VecDeque;

use futures_util::future::join_all;

use crate::internal::errors::WebdavResult;
use crate::internal::session::structs::{Session, SessionConfig};
use crate::internal::webdav::functions::path_utils::join_path;
use crate::internal::webdav::structs::FileInfo;

/// 按配置创建会话
pub fn connect(config: &SessionConfig) -> WebdavResult<Session> {
    Session::from_config(config)
}

/// 并发查询多个资源的元数据，结果顺序与 `names` 一致
///
/// - 注意：names是基于会话当前目录的，所以不建议以"/"开头
pub async fn stat_many(
    session: &Session,
    names: &[&str],
) -> Vec<WebdavResult<FileInfo>> {
    let tasks = names.iter().map(|name| session.stat(name));
    join_all(tasks).await
}

/// 递归列出 `name` 下的所有资源，href 为相对 `name` 的路径
///
/// 逐层发送 Depth:1 的 PROPFIND，不使用 Depth:infinity（很多服务器禁用它）
pub async fn walk_dir(
    session: &Session,
    name: &str,
) -> WebdavResult<Vec<FileInfo>> {
    let mut found = Vec::new();
    let mut pending: VecDeque<String> = VecDeque::from([String::new()]);

    while let Some(prefix) = pending.pop_front() {
        let dir = match (name.trim_end_matches('/'), prefix.as_str()) {
            ("", "") => String::from("./"),
            (root, "") => format!("{root}/"),
            (root, sub) => format!("{}/", join_path(root, sub)),
        };

        for mut entry in session.listdir(&dir).await? {
            // 自身以及无法相对化的记录不再向下展开，避免重复遍历
            if entry.href == "."
                || entry.href.starts_with("..")
                || entry.href.starts_with('/')
            {
                continue;
            }

            let relative = if prefix.is_empty() {
                entry.href.clone()
            } else {
                join_path(&prefix, &entry.href)
            };

            if entry.is_dir {
                pending.push_back(relative.clone());
            }
            entry.href = relative;
            found.push(entry);
        }
    }

    Ok(found)
}
