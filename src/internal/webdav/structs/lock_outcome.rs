/// LOCK / UNLOCK 的结果
///
/// 目前不会发出任何锁请求，两个操作都返回 `NotImplemented`，
/// 调用方据此得知锁并未真正生效。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// 成功加锁，携带锁令牌
    Acquired(String),
    /// 成功解锁
    Released,
    NotImplemented,
}

impl LockOutcome {
    pub fn is_implemented(&self) -> bool {
        !matches!(self, Self::NotImplemented)
    }
}
