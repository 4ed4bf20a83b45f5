//! 测试模块入口：公共逻辑在 `lib` 子模块，Mock 服务器在 `mock_server`，用例在 `internal`。

pub use lib::*;
