use url::Url;

use crate::internal::errors::{WebdavError, WebdavResult};
use crate::internal::session::structs::Session;
use crate::internal::webdav::enums::{
    Depth, HEADER_DEPTH, HEADER_TRANSLATE, WebDavMethod,
};
use crate::internal::webdav::functions::path_utils::normalize_encoding;
use crate::internal::webdav::raw_xml::prop_find_result::PropFindResult;
use crate::internal::webdav::structs::FileInfo;

/// PROPFIND 可接受的状态码，207 Multi-Status 是 RFC 4918 的标准响应
const PROPFIND_ACCEPTED: &[u16] = &[200, 207];

impl Session {
    /// 发送 PROPFIND 并原样返回解析结果（href 未改写，可能为空）
    pub async fn propfind(
        &self,
        name: &str,
        depth: Depth,
    ) -> WebdavResult<PropFindResult> {
        let builder = self
            .new_request(WebDavMethod::PROPFIND.to_head_method()?, name)?
            .header(HEADER_DEPTH, depth.as_str())
            .header(HEADER_TRANSLATE, "f");

        let response =
            Self::check_status(self.do_request(builder).await?, PROPFIND_ACCEPTED)?;
        let body = response.bytes().await?;

        PropFindResult::parse(&body)
    }

    /// 列出集合内容，href 改写为相对被查询目录的路径。
    ///
    /// 被查询的目录本身通常作为第一条出现，相对路径为 `.`。
    /// 接受 200 和 207 (Multi-Status)；返回的 href 统一成相同的百分号编码形式。
    pub async fn listdir(&self, name: &str) -> WebdavResult<Vec<FileInfo>> {
        let mut result = self.propfind(name, Depth::One).await?;

        let queried = Url::parse(&self.abs(name))?;
        normalize_hrefs(&mut result);
        result.to_relative(&normalize_encoding(queried.path()));

        Ok(result.into_files())
    }

    /// 查询单个资源，服务器没有返回任何记录时视为不存在。
    ///
    /// 接受 200 和 207 (Multi-Status)，href 保持服务器原样。
    pub async fn stat(&self, name: &str) -> WebdavResult<FileInfo> {
        self.propfind(name, Depth::Zero)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WebdavError::NotFound { url: self.abs(name) })
    }

    pub async fn exists(&self, name: &str) -> WebdavResult<bool> {
        match self.stat(name).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// 部分服务器的 href 是完整 URL，这里只保留路径部分；
/// 各家对 `(`、`)` 等字符的编码也不一样，统一编码后才能和请求路径比较
fn normalize_hrefs(result: &mut PropFindResult) {
    for file in &mut result.files {
        if let Ok(url) = Url::parse(&file.href) {
            if url.has_host() {
                file.href = url.path().to_string();
            }
        }
        file.href = normalize_encoding(&file.href);
    }
}
