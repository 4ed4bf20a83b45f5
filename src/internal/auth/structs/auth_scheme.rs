use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::internal::errors::WebdavError;

/// 认证方式选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// 匿名访问，不附带任何认证信息
    #[default]
    None,
    /// 每个请求都带上 `Authorization: Basic ...`
    Basic,
    /// 由摘要认证传输层完成质询/应答
    Digest,
}

impl FromStr for AuthScheme {
    type Err = WebdavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "basic" => Ok(Self::Basic),
            "digest" => Ok(Self::Digest),
            other => Err(WebdavError::Config(format!("未知的认证方式: {other}"))),
        }
    }
}
