//! GET 返回的读取器：持有活动的响应体，由调用方负责读完。
//!
//! 丢弃读取器即关闭连接；没有读完就丢弃时连接不会回到连接池。

use bytes::Bytes;
use futures_util::Stream;
use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};

use crate::internal::errors::WebdavResult;

#[derive(Debug)]
pub struct RemoteReader {
    response: Response,
}

impl RemoteReader {
    pub(crate) fn new(response: Response) -> Self {
        Self { response }
    }

    /// GET 不检查状态码，由调用方自行判断
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// 读取下一段数据，读完返回 None
    pub async fn chunk(&mut self) -> WebdavResult<Option<Bytes>> {
        Ok(self.response.chunk().await?)
    }

    /// 一次性读完剩余内容
    pub async fn bytes(self) -> WebdavResult<Bytes> {
        Ok(self.response.bytes().await?)
    }

    /// 转成字节流，适合配合 `StreamExt` 边读边处理
    pub fn into_stream(self) -> impl Stream<Item = reqwest::Result<Bytes>> {
        self.response.bytes_stream()
    }

    pub fn into_response(self) -> Response {
        self.response
    }
}
