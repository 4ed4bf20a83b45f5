use reqwest::Method;

use crate::internal::errors::WebdavResult;
use crate::internal::session::structs::Session;
use crate::internal::webdav::enums::{
    Depth, HEADER_DEPTH, HEADER_DESTINATION, WebDavMethod,
};

impl Session {
    /// MOVE，目标已存在时服务器返回 204，这里只接受 201
    pub async fn rename(&self, name: &str, dest: &str) -> WebdavResult<()> {
        self.move_or_copy(WebDavMethod::MOVE, name, dest, &[201]).await
    }

    /// COPY，新建（201）或覆盖（204）都算成功
    pub async fn copy(&self, name: &str, dest: &str) -> WebdavResult<()> {
        self.move_or_copy(WebDavMethod::COPY, name, dest, &[201, 204]).await
    }

    pub async fn mkdir(&self, name: &str) -> WebdavResult<()> {
        let builder =
            self.new_request(WebDavMethod::MKCOL.to_head_method()?, name)?;
        Self::check_status(self.do_request(builder).await?, &[201])?;
        Ok(())
    }

    /// 删除单个文件
    pub async fn remove(&self, name: &str) -> WebdavResult<()> {
        self.delete_with_depth(name, Depth::Zero).await
    }

    /// 删除集合（仅一层）
    pub async fn rmdir(&self, name: &str) -> WebdavResult<()> {
        self.delete_with_depth(name, Depth::One).await
    }

    /// 递归删除整个子树
    pub async fn remove_all(&self, name: &str) -> WebdavResult<()> {
        self.delete_with_depth(name, Depth::Infinity).await
    }

    async fn delete_with_depth(
        &self,
        name: &str,
        depth: Depth,
    ) -> WebdavResult<()> {
        let builder = self
            .new_request(Method::DELETE, name)?
            .header(HEADER_DEPTH, depth.as_str());
        Self::check_status(self.do_request(builder).await?, &[204])?;
        Ok(())
    }

    /// MOVE / COPY 共用：Destination 必须是绝对 URL
    async fn move_or_copy(
        &self,
        method: WebDavMethod,
        name: &str,
        dest: &str,
        accepted: &[u16],
    ) -> WebdavResult<()> {
        let builder = self
            .new_request(method.to_head_method()?, name)?
            .header(HEADER_DESTINATION, self.abs(dest));
        Self::check_status(self.do_request(builder).await?, accepted)?;
        Ok(())
    }
}
