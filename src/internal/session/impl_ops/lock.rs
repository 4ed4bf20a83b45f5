use crate::internal::errors::WebdavResult;
use crate::internal::session::structs::Session;
use crate::internal::webdav::structs::LockOutcome;

impl Session {
    /// 不发送 LOCK 请求，直接返回 `NotImplemented`
    pub async fn lock(&self, name: &str) -> WebdavResult<LockOutcome> {
        tracing::debug!(url = %self.abs(name), "LOCK 尚未实现，未发送请求");
        Ok(LockOutcome::NotImplemented)
    }

    /// 不发送 UNLOCK 请求，直接返回 `NotImplemented`
    pub async fn unlock(
        &self,
        name: &str,
        _token: &str,
    ) -> WebdavResult<LockOutcome> {
        tracing::debug!(url = %self.abs(name), "UNLOCK 尚未实现，未发送请求");
        Ok(LockOutcome::NotImplemented)
    }
}
