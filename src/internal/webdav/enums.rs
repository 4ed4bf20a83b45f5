use reqwest::Method;

use crate::internal::errors::{WebdavError, WebdavResult};

/// RFC 4918 10.2
pub const HEADER_DEPTH: &str = "Depth";
/// RFC 4918 10.3，必须是绝对 URI
pub const HEADER_DESTINATION: &str = "Destination";
/// IIS 等服务器需要 `Translate: f` 才会返回原始资源而不是执行脚本
pub const HEADER_TRANSLATE: &str = "Translate";

/// RFC 4918 在 HTTP 之外新增的请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebDavMethod {
    PROPFIND,
    MKCOL,
    COPY,
    MOVE,
    LOCK,
    UNLOCK,
}

impl WebDavMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebDavMethod::PROPFIND => "PROPFIND",
            WebDavMethod::MKCOL => "MKCOL",
            WebDavMethod::COPY => "COPY",
            WebDavMethod::MOVE => "MOVE",
            WebDavMethod::LOCK => "LOCK",
            WebDavMethod::UNLOCK => "UNLOCK",
        }
    }

    pub fn to_head_method(&self) -> WebdavResult<Method> {
        Method::from_bytes(self.as_str().as_bytes())
            .map_err(|e| WebdavError::InvalidHeader(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// 仅返回当前资源
    Zero,
    /// 返回当前资源及直接子资源
    One,
    /// 返回当前资源及所有子资源（谨慎使用）
    Infinity,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Zero => "0",
            Depth::One => "1",
            Depth::Infinity => "infinity",
        }
    }
}
