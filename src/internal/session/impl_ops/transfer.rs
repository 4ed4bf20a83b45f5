//! 上传与下载：GET 返回活动读取器，PUT 一次性发送内存中的完整数据。

use std::path::Path;

use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::{Method, Response};
use reqwest::header::{CONTENT_LENGTH, CONTENT_RANGE};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::internal::errors::{WebdavError, WebdavResult};
use crate::internal::session::structs::{RemoteReader, Session};

const PUT_ACCEPTED: &[u16] = &[201, 204];

impl Session {
    /// GET，不检查状态码，读取器由调用方读完并丢弃
    pub async fn get(&self, name: &str) -> WebdavResult<RemoteReader> {
        let builder = self.new_request(Method::GET, name)?;
        Ok(RemoteReader::new(self.do_request(builder).await?))
    }

    /// PUT 整个文件，新建（201）或覆盖（204）都算成功
    pub async fn put(
        &self,
        name: &str,
        data: impl Into<Bytes>,
    ) -> WebdavResult<()> {
        let data: Bytes = data.into();
        let builder = self
            .new_request(Method::PUT, name)?
            .header(CONTENT_LENGTH, data.len())
            .body(data);

        Self::check_status(self.do_request(builder).await?, PUT_ACCEPTED)?;
        Ok(())
    }

    /// 从 `offset` 开始写入一段数据，总长度按 `offset + data.len()` 计算
    pub async fn put_range(
        &self,
        name: &str,
        offset: u64,
        data: impl Into<Bytes>,
    ) -> WebdavResult<()> {
        let data: Bytes = data.into();
        let total = offset.checked_add(data.len() as u64);
        if total.is_none() {
            return Err(WebdavError::InvalidRange(format!(
                "offset {offset} + {} 溢出",
                data.len()
            )));
        }
        self.put_range_with_total(name, offset, data, total).await
    }

    /// 从 `offset` 开始写入一段数据，`total` 为资源完整大小，未知时发送 `*`
    pub async fn put_range_with_total(
        &self,
        name: &str,
        offset: u64,
        data: impl Into<Bytes>,
        total: Option<u64>,
    ) -> WebdavResult<()> {
        let data: Bytes = data.into();
        let range = content_range(offset, data.len() as u64, total)?;

        let builder = self
            .new_request(Method::PUT, name)?
            .header(CONTENT_RANGE, range)
            .header(CONTENT_LENGTH, data.len())
            .body(data);

        Self::check_status(self.do_request(builder).await?, PUT_ACCEPTED)?;
        Ok(())
    }

    /// 把远程文件流式写入本地路径，返回写入的字节数。
    ///
    /// 传输或写入中途失败时删除已写入的部分文件。
    pub async fn download_to(
        &self,
        name: &str,
        save_path: impl AsRef<Path>,
    ) -> WebdavResult<u64> {
        let save_path = save_path.as_ref();
        let builder = self.new_request(Method::GET, name)?;
        let resp = Self::check_status(self.do_request(builder).await?, &[200])?;

        let file = File::create(save_path).await?;
        let bytes_done = match write_body(resp, file).await {
            Ok(n) => n,
            Err(e) => {
                if let Err(remove_err) = tokio::fs::remove_file(save_path).await {
                    tracing::warn!(
                        path = %save_path.display(),
                        error = %remove_err,
                        "清理未完成的下载文件失败"
                    );
                }
                return Err(e);
            }
        };

        tracing::debug!(
            name,
            bytes_done,
            path = %save_path.display(),
            "下载完成"
        );
        Ok(bytes_done)
    }

    /// 读取本地文件全部内容后 PUT 上去
    pub async fn upload_from(
        &self,
        local_path: impl AsRef<Path>,
        name: &str,
    ) -> WebdavResult<()> {
        let data = tokio::fs::read(local_path.as_ref()).await?;
        self.put(name, data).await
    }
}

async fn write_body(resp: Response, mut file: File) -> WebdavResult<u64> {
    let mut stream = resp.bytes_stream();
    let mut bytes_done: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        bytes_done += chunk.len() as u64;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(bytes_done)
}

/// 生成 `Content-Range` 头：`bytes {start}-{end}/{total}`，`end` 为包含在内的最后一个字节。
///
/// 空数据无法表示包含式的结束位置，`total` 小于写入范围时同样报错。
pub fn content_range(
    offset: u64,
    len: u64,
    total: Option<u64>,
) -> WebdavResult<String> {
    if len == 0 {
        return Err(WebdavError::InvalidRange("写入数据为空".to_string()));
    }

    let end = offset.checked_add(len - 1).ok_or_else(|| {
        WebdavError::InvalidRange(format!("offset {offset} + {len} 溢出"))
    })?;

    match total {
        Some(total) if total <= end => Err(WebdavError::InvalidRange(format!(
            "总长度 {total} 小于写入范围 {offset}-{end}"
        ))),
        Some(total) => Ok(format!("bytes {offset}-{end}/{total}")),
        None => Ok(format!("bytes {offset}-{end}/*")),
    }
}
