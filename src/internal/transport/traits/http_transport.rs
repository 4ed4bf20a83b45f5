//! 传输层抽象：会话只依赖这个 trait，不关心底层是否带摘要认证。

use async_trait::async_trait;
use reqwest::{Request, Response};

use crate::internal::errors::WebdavResult;

/// 发送一个已构造好的请求并返回响应。
///
/// 实现可以是直接调用 `reqwest::Client`，也可以是在其外层做质询/应答的装饰器。
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: Request) -> WebdavResult<Response>;
}
