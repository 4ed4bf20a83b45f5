use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// 一条 PROPFIND 记录对应的远程资源元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// 服务器给出的 href（URL 编码）；经过 to_relative 后是相对路径
    pub href: String,
    /// 文件大小（字节），目录时无意义
    pub size: Option<u64>,
    pub is_dir: bool,
    /// 来自 `<creationdate>`（RFC 3339）
    pub modified_at: Option<DateTime<FixedOffset>>,
    /// 来自 `<getlastmodified>`（HTTP-date）
    pub last_modified: Option<DateTime<FixedOffset>>,
    pub content_type: Option<String>,
    /// 去掉引号后的 ETag
    pub etag: Option<String>,
    pub display_name: Option<String>,
}

impl FileInfo {
    /// 友好化的名称：优先使用 displayname，否则取 href 最后一段并做 URL 解码
    pub fn name(&self) -> String {
        if let Some(display_name) = &self.display_name {
            return display_name.clone();
        }
        percent_encoding::percent_decode_str(
            self.href.trim_end_matches('/').rsplit('/').next().unwrap_or(""),
        )
        .decode_utf8_lossy()
        .to_string()
    }

    /// 普通文件的大小，目录返回 None
    pub fn file_size(&self) -> Option<u64> {
        if self.is_dir { None } else { self.size }
    }
}
