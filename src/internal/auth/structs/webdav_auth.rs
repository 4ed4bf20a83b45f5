use core::fmt;
use std::sync::Arc;

use base64::Engine;
use reqwest::header::HeaderValue;
use sha2::{Digest, Sha256};

use crate::internal::auth::structs::AuthScheme;
use crate::internal::errors::{WebdavError, WebdavResult};

/// 认证结构体
///
/// 该结构体定位
/// - 存储会话使用的账号、密码以及认证方式
/// - Basic 时由会话在每个请求上附带认证头，Digest 时交给摘要传输层处理
///
/// 默认Eq时会匹配认证方式和token，如果需要单独比较token，需使用eq_only_token方法
#[derive(Clone, Default)]
pub struct WebdavAuth {
    pub scheme: AuthScheme,
    pub username: String,
    pub(crate) password: Arc<String>, // 对外导出时，不允许直接访问
    pub(crate) encrypted_token: Arc<String>,
}

impl WebdavAuth {
    /// 创建新的认证结构体
    pub fn new(username: &str, password: &str, scheme: AuthScheme) -> Self {
        if scheme == AuthScheme::None {
            return Self::anonymous();
        }

        Self {
            scheme,
            username: username.to_string(),
            password: Arc::new(password.to_string()),
            encrypted_token: Arc::new(_encrypt_str(&format!(
                "{username}:{password}"
            ))),
        }
    }

    /// 匿名访问
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn basic(username: &str, password: &str) -> Self {
        Self::new(username, password, AuthScheme::Basic)
    }

    pub fn digest(username: &str, password: &str) -> Self {
        Self::new(username, password, AuthScheme::Digest)
    }

    pub fn is_anonymous(&self) -> bool {
        self.scheme == AuthScheme::None
    }

    /// 仅比较token是否相等
    pub fn eq_only_token(&self, other: &Self) -> bool {
        self.encrypted_token == other.encrypted_token
    }

    /// Basic 认证时生成请求头，其他认证方式返回 None
    pub(crate) fn basic_header(&self) -> WebdavResult<Option<HeaderValue>> {
        if self.scheme != AuthScheme::Basic {
            return Ok(None);
        }

        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.username, self.password));

        let mut value = HeaderValue::from_str(&format!("Basic {token}"))
            .map_err(|e| WebdavError::InvalidHeader(e.to_string()))?;
        value.set_sensitive(true);

        Ok(Some(value))
    }
}

/// 用于比较认证结构体是否相等
impl PartialEq for WebdavAuth {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.encrypted_token == other.encrypted_token
    }
}

/// 防止debug泄漏账号
impl fmt::Debug for WebdavAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebdavAuth")
            .field("scheme", &self.scheme)
            .field("credentials", &"<hidden>")
            .finish()
    }
}

fn _encrypt_str(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}
