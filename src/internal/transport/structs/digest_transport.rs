//! 摘要认证传输层：包在普通传输层外面，透明完成质询/应答。
//!
//! 第一次请求不带认证，收到 `401 + WWW-Authenticate: Digest` 后记住质询并重发一次；
//! 之后的请求直接用已保存的质询预先计算 `Authorization`，nonce 计数递增。
//! 服务器再次下发质询（nonce 过期等）时替换保存的质询并重置计数。

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue, WWW_AUTHENTICATE};
use reqwest::{Request, Response, StatusCode};
use sha2::{Digest, Sha256};

use crate::internal::auth::structs::digest_challenge::DigestRequestParts;
use crate::internal::auth::structs::{DigestChallenge, WebdavAuth};
use crate::internal::errors::WebdavResult;
use crate::internal::transport::traits::HttpTransport;

pub struct DigestTransport {
    inner: Arc<dyn HttpTransport>,
    auth: WebdavAuth,
    challenge: Mutex<Option<DigestChallenge>>,
    nonce_count: AtomicU32,
    cnonce_seed: AtomicU64,
}

impl DigestTransport {
    pub fn new(inner: Arc<dyn HttpTransport>, auth: WebdavAuth) -> Self {
        Self {
            inner,
            auth,
            challenge: Mutex::new(None),
            nonce_count: AtomicU32::new(0),
            cnonce_seed: AtomicU64::new(0),
        }
    }

    /// 当前保存的质询（主要用于测试与诊断）
    pub fn current_challenge(&self) -> Option<DigestChallenge> {
        self.challenge
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_challenge(&self, challenge: DigestChallenge) {
        *self.challenge.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(challenge);
        self.nonce_count.store(0, Ordering::SeqCst);
    }

    fn next_cnonce(&self) -> String {
        let seq = self.cnonce_seed.fetch_add(1, Ordering::Relaxed);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let hash = format!("{:x}", Sha256::digest(format!("{nanos}:{seq}").as_bytes()));
        hash[..16].to_string()
    }

    /// 用已保存的质询给请求加上认证头，没有质询时原样返回
    fn authorize(&self, request: &mut Request) {
        let Some(challenge) = self.current_challenge() else {
            return;
        };

        let url = request.url();
        let uri = match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        };
        let nonce_count = self.nonce_count.fetch_add(1, Ordering::SeqCst) + 1;
        let cnonce = self.next_cnonce();

        let header = challenge.authorization(&DigestRequestParts {
            method: request.method().as_str(),
            uri: &uri,
            username: &self.auth.username,
            password: &self.auth.password,
            nonce_count,
            cnonce: &cnonce,
        });

        match HeaderValue::from_str(&header) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(e) => tracing::warn!("摘要认证头无法编码，按匿名请求发送: {e}"),
        }
    }
}

#[async_trait]
impl HttpTransport for DigestTransport {
    async fn execute(&self, mut request: Request) -> WebdavResult<Response> {
        // 请求体是内存中的字节，可以 clone 出一份留作重发
        let retry = request.try_clone();

        self.authorize(&mut request);
        let response = self.inner.execute(request).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let challenge = response
            .headers()
            .get_all(WWW_AUTHENTICATE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(DigestChallenge::parse);

        let (Some(challenge), Some(mut retry)) = (challenge, retry) else {
            return Ok(response);
        };

        tracing::trace!(
            realm = %challenge.realm,
            stale = challenge.stale,
            "收到摘要认证质询，重发请求"
        );
        self.store_challenge(challenge);
        self.authorize(&mut retry);

        self.inner.execute(retry).await
    }
}
