use core::fmt;
use std::env;
use std::time::Duration;

use serde::Deserialize;

use crate::internal::auth::structs::{AuthScheme, WebdavAuth};
use crate::internal::errors::{WebdavError, WebdavResult};

/// 配置中使用的环境变量名
pub mod env_var_names {
    /// WebDAV 根 URL（与 base_url 一致，建议以 / 结尾）
    pub const WEBDAV_URL: &str = "WEBDAV_URL";
    /// 用户名
    pub const WEBDAV_USERNAME: &str = "WEBDAV_USERNAME";
    /// 密码
    pub const WEBDAV_PASSWORD: &str = "WEBDAV_PASSWORD";
    /// none / basic / digest，未设置时有用户名则为 basic
    pub const WEBDAV_AUTH: &str = "WEBDAV_AUTH";
    /// 整个请求的超时秒数
    pub const WEBDAV_TIMEOUT_SECS: &str = "WEBDAV_TIMEOUT_SECS";
}

/// 会话配置，可以从 serde 支持的任意格式或环境变量加载
#[derive(Clone, Default, Deserialize)]
pub struct SessionConfig {
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub auth: Option<AuthScheme>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl SessionConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
        self
    }

    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth = Some(scheme);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// 从进程环境变量读取，变量名见 [`env_var_names`]
    pub fn from_env() -> WebdavResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 按变量名逐个查询，`lookup` 返回 None 表示未设置
    pub fn from_lookup<F>(lookup: F) -> WebdavResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(env_var_names::WEBDAV_URL).ok_or_else(|| {
            WebdavError::Config(format!("缺少 {}", env_var_names::WEBDAV_URL))
        })?;

        let auth = match lookup(env_var_names::WEBDAV_AUTH) {
            Some(raw) => Some(raw.parse::<AuthScheme>()?),
            None => None,
        };

        let timeout_secs = match lookup(env_var_names::WEBDAV_TIMEOUT_SECS) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                WebdavError::Config(format!(
                    "{} 不是合法的秒数: {e}",
                    env_var_names::WEBDAV_TIMEOUT_SECS
                ))
            })?),
            None => None,
        };

        Ok(Self {
            url,
            username: lookup(env_var_names::WEBDAV_USERNAME),
            password: lookup(env_var_names::WEBDAV_PASSWORD),
            auth,
            timeout_secs,
            user_agent: None,
        })
    }

    /// 实际生效的认证方式：显式配置优先，否则有用户名时使用 Basic
    pub fn auth_scheme(&self) -> AuthScheme {
        match (self.auth, &self.username) {
            (Some(scheme), _) => scheme,
            (None, Some(username)) if !username.is_empty() => AuthScheme::Basic,
            _ => AuthScheme::None,
        }
    }

    pub fn to_auth(&self) -> WebdavAuth {
        WebdavAuth::new(
            self.username.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
            self.auth_scheme(),
        )
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// 防止debug泄漏账号
impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("auth", &self.auth_scheme())
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
