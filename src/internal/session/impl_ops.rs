//! Session 上的 WebDAV 操作，按职责拆到不同文件里，各自 `impl Session`。

mod lock;
mod manage;
mod propfind;
mod transfer;

pub use transfer::content_range;
