//! 会话层统一错误类型。

use thiserror::Error;

pub type WebdavResult<T> = Result<T, WebdavError>;

#[derive(Debug, Error)]
pub enum WebdavError {
    /// 请求未能发出或未收到响应（网络、DNS、TLS 等），不会重试
    #[error("HTTP 请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    /// 收到响应，但状态码不在当前操作的可接受集合内
    #[error("服务器返回异常状态 {code} {reason}")]
    Status { code: u16, reason: String },

    /// PROPFIND 成功但没有任何记录，视为资源不存在
    #[error("资源不存在: {url}")]
    NotFound { url: String },

    #[error("URL 格式错误: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("请求头无效: {0}")]
    InvalidHeader(String),

    #[error("无法表示的写入范围: {0}")]
    InvalidRange(String),

    #[error("XML 解析失败: {0}")]
    Xml(String),

    #[error("本地文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置错误: {0}")]
    Config(String),
}

impl WebdavError {
    /// 由响应状态构造协议错误
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        }
    }

    /// 协议错误时返回状态码
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// 资源不存在：空的 PROPFIND 结果，或服务器直接返回 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || self.status_code() == Some(404)
    }
}
