use async_trait::async_trait;
use reqwest::{Client, Request, Response};

use crate::internal::errors::WebdavResult;
use crate::internal::transport::traits::HttpTransport;

/// 直接使用 reqwest 客户端发送请求（Client 内部是 Arc，可随意 clone）
#[derive(Debug, Clone)]
pub struct PlainTransport {
    client: Client,
}

impl PlainTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for PlainTransport {
    async fn execute(&self, request: Request) -> WebdavResult<Response> {
        Ok(self.client.execute(request).await?)
    }
}
