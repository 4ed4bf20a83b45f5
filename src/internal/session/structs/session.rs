//! WebDAV 会话：绑定一个根 URL、一套认证信息和一个带 Cookie 的 HTTP 客户端。
//!
//! 路径相关的状态（`base`）只能通过 `&mut self` 修改，所有请求操作都只借用 `&self`，
//! 因此 `chdir` 与进行中的请求不可能同时发生；需要并发访问不同目录时，每个目录各建一个会话。

use core::fmt;
use std::sync::Arc;

use reqwest::header::{HOST, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use url::Url;

use crate::internal::auth::structs::{AuthScheme, WebdavAuth};
use crate::internal::errors::{WebdavError, WebdavResult};
use crate::internal::session::structs::SessionConfig;
use crate::internal::transport::structs::{DigestTransport, PlainTransport};
use crate::internal::transport::traits::HttpTransport;
use crate::internal::webdav::functions::path_utils::join_path;

pub struct Session {
    base: Url,
    auth: WebdavAuth,
    client: Client, // 内部是Arc，Cookie 在所有请求间共享
    transport: Arc<dyn HttpTransport>,
}

impl Session {
    /// 匿名会话
    pub fn new(root_url: &str) -> WebdavResult<Self> {
        Self::with_auth(root_url, WebdavAuth::anonymous())
    }

    pub fn with_auth(root_url: &str, auth: WebdavAuth) -> WebdavResult<Self> {
        let client = default_client_builder().build()?;
        Self::with_client(root_url, client, auth)
    }

    /// 使用调用方自己配置好的客户端（超时、代理、TLS 等都由调用方决定）
    pub fn with_client(
        root_url: &str,
        client: Client,
        auth: WebdavAuth,
    ) -> WebdavResult<Self> {
        let base = _format_base_url(root_url)?;
        let transport = build_transport(&client, &auth);

        Ok(Self { base, auth, client, transport })
    }

    pub fn from_config(config: &SessionConfig) -> WebdavResult<Self> {
        let mut builder = default_client_builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        Self::with_client(&config.url, builder.build()?, config.to_auth())
    }

    /// 当前工作目录
    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn auth(&self) -> &WebdavAuth {
        &self.auth
    }

    /// 替换认证信息，摘要认证的质询状态随之重置
    pub fn set_auth(&mut self, auth: WebdavAuth) {
        self.transport = build_transport(&self.client, &auth);
        self.auth = auth;
    }

    pub fn set_basic_auth(&mut self, username: &str, password: &str) {
        self.set_auth(WebdavAuth::basic(username, password));
    }

    pub fn set_digest_auth(&mut self, username: &str, password: &str) {
        self.set_auth(WebdavAuth::digest(username, password));
    }

    /// 按 URL 引用解析规则切换工作目录，解析失败时保持原目录
    pub fn chdir(&mut self, name: &str) -> WebdavResult<()> {
        let next = self.base.join(name)?;
        tracing::debug!(from = %self.base, to = %next, "切换工作目录");
        self.base = next;
        Ok(())
    }

    /// 把 `name` 拼到当前目录的路径上，返回绝对 URL。
    ///
    /// 以 `/` 结尾的 `name` 结果也以 `/` 结尾，用来区分「集合」和「资源」。
    pub fn abs(&self, name: &str) -> String {
        let mut url = self.base.clone();
        let mut path = join_path(self.base.path(), name);
        if path.is_empty() {
            path.push('/');
        }
        if name.ends_with('/') && !path.ends_with('/') {
            path.push('/');
        }
        url.set_path(&path);
        url.to_string()
    }

    /// 构造请求：解析 URL、设置 Host、附带 Basic 认证
    pub fn new_request(
        &self,
        method: Method,
        name: &str,
    ) -> WebdavResult<RequestBuilder> {
        let mut builder = self.client.request(method, self.abs(name));

        if let Some(host) = self.host_header() {
            builder = builder.header(HOST, host);
        }
        if let Some(authorization) = self.auth.basic_header()? {
            builder = builder.header(reqwest::header::AUTHORIZATION, authorization);
        }

        Ok(builder)
    }

    /// 通过传输层发送请求，不检查状态码
    pub async fn do_request(
        &self,
        builder: RequestBuilder,
    ) -> WebdavResult<Response> {
        let request = builder.build()?;
        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            "发送 WebDAV 请求"
        );

        let response = self.transport.execute(request).await?;
        tracing::debug!(status = response.status().as_u16(), "收到响应");

        Ok(response)
    }

    /// 状态码不在可接受集合内时转换成协议错误，不读取响应体
    pub fn check_status(
        response: Response,
        accepted: &[u16],
    ) -> WebdavResult<Response> {
        let status = response.status();
        if accepted.contains(&status.as_u16()) {
            return Ok(response);
        }

        tracing::debug!(
            status = status.as_u16(),
            url = %response.url(),
            ?accepted,
            "响应状态不在可接受范围内"
        );
        Err(WebdavError::from_status(status))
    }

    fn host_header(&self) -> Option<HeaderValue> {
        let host = self.base.host_str()?;
        let value = match self.base.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        HeaderValue::from_str(&value).ok()
    }
}

/// 防止debug泄漏账号
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base", &self.base.as_str())
            .field("auth", &self.auth)
            .finish()
    }
}

pub(crate) fn default_client_builder() -> reqwest::ClientBuilder {
    Client::builder().http1_only().cookie_store(true)
}

fn build_transport(
    client: &Client,
    auth: &WebdavAuth,
) -> Arc<dyn HttpTransport> {
    let plain: Arc<dyn HttpTransport> =
        Arc::new(PlainTransport::new(client.clone()));

    match auth.scheme {
        AuthScheme::Digest => {
            Arc::new(DigestTransport::new(plain, auth.clone()))
        }
        AuthScheme::None | AuthScheme::Basic => plain,
    }
}

/// 根 URL 统一补上结尾的 `/`，这样 chdir 的相对解析会落在根目录之下
fn _format_base_url(url: &str) -> WebdavResult<Url> {
    if url.trim().is_empty() {
        return Err(WebdavError::Config("根 URL 为空".to_string()));
    }

    let mut base_url = Url::parse(url.trim())?;
    if base_url.cannot_be_a_base() || base_url.host_str().is_none() {
        return Err(WebdavError::Config(format!("根 URL 不可用: {url}")));
    }

    if !base_url.path().ends_with('/') {
        let new_path = format!("{}/", base_url.path());
        base_url.set_path(&new_path);
    }

    Ok(base_url)
}
