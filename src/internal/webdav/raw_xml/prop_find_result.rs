//! PROPFIND 多状态响应 → FileInfo 列表。
//!
//! 单条 `<response>` 有问题时只丢弃这一条，不会让整个解析失败；
//! 只有文档本身不是合法 XML 时才返回错误。

use chrono::DateTime;

use crate::internal::errors::WebdavResult;
use crate::internal::webdav::functions::path_utils::relative_path;
use crate::internal::webdav::raw_xml::xml_node::XmlNode;
use crate::internal::webdav::structs::FileInfo;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropFindResult {
    /// 按文档顺序排列，一条 `<response>` 对应一条记录
    pub files: Vec<FileInfo>,
}

impl PropFindResult {
    /// 解析多状态响应体，空响应体视为零条记录
    pub fn parse(body: &[u8]) -> WebdavResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let root = XmlNode::parse(body)?;
        let responses = if root.name == "response" {
            vec![&root]
        } else {
            root.descendants("response")
        };

        let total = responses.len();
        let files: Vec<FileInfo> =
            responses.into_iter().filter_map(parse_response).collect();

        tracing::trace!(total, kept = files.len(), "解析 PROPFIND 响应");

        Ok(Self { files })
    }

    /// 把每条记录的 href 改写成相对 `base` 的路径（纯字符串计算，不做 URL 解析）。
    ///
    /// 无法计算相对路径的记录保持原样。
    pub fn to_relative(&mut self, base: &str) {
        for file in &mut self.files {
            match relative_path(base, &file.href) {
                Some(relative) => file.href = relative,
                None => tracing::debug!(
                    base,
                    href = %file.href,
                    "href 与基准路径形式不一致，保留原值"
                ),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_files(self) -> Vec<FileInfo> {
        self.files
    }
}

impl IntoIterator for PropFindResult {
    type Item = FileInfo;
    type IntoIter = std::vec::IntoIter<FileInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

fn parse_response(response: &XmlNode) -> Option<FileInfo> {
    let Some(href) = response.child("href") else {
        tracing::debug!("response 缺少 href，已丢弃");
        return None;
    };
    let href = href.text().to_string();

    let Some(length) = response.find("propstat/prop/getcontentlength") else {
        tracing::debug!(%href, "response 缺少 getcontentlength，已丢弃");
        return None;
    };
    let size = length.text().parse::<u64>().ok();

    let is_dir = response
        .find("propstat/prop/resourcetype/collection")
        .is_some();

    let modified_at = prop_text(response, "creationdate")
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok());

    let last_modified = prop_text(response, "getlastmodified")
        .and_then(|raw| DateTime::parse_from_rfc2822(raw).ok());

    Some(FileInfo {
        href,
        size,
        is_dir,
        modified_at,
        last_modified,
        content_type: prop_text(response, "getcontenttype").map(str::to_string),
        etag: clean_etag(prop_text(response, "getetag")),
        display_name: prop_text(response, "displayname")
            .filter(|name| !name.is_empty())
            .map(str::to_string),
    })
}

fn prop_text<'a>(response: &'a XmlNode, name: &str) -> Option<&'a str> {
    response
        .find(&format!("propstat/prop/{name}"))
        .map(XmlNode::text)
}

fn clean_etag(raw: Option<&str>) -> Option<String> {
    // 去掉 ETag 的首尾引号以及多余空格
    raw.map(|s| s.trim().trim_matches('"').to_string())
        .filter(|s| !s.is_empty())
}

