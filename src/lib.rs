/// 内部实现模块
mod internal;

#[cfg(test)]
mod tests;

/// 导出核心入口
pub use internal::entrance::remote::*;
pub use internal::errors::{WebdavError, WebdavResult};
pub use internal::session::structs::{RemoteReader, Session, SessionConfig};

pub mod auth {
    use crate::internal;
    pub use internal::auth::structs::*;
}

pub mod config {
    use crate::internal;
    pub use internal::session::structs::SessionConfig;
    pub use internal::session::structs::session_config::env_var_names;
}

/// 传输层单独导出，方便调用方自己包装（例如加日志、限流）
pub mod transport {
    use crate::internal;
    pub use internal::transport::structs::*;
    pub use internal::transport::traits::*;
}

/// 对外提供webdav基础能力，不限制在 Session 里，以防有人自己要用
pub mod webdav {
    pub mod functions {
        use crate::internal;
        pub use internal::session::impl_ops::content_range;
        pub use internal::webdav::functions::path_utils::*;
    }

    pub mod enums {
        use crate::internal;
        pub use internal::webdav::enums::*;
    }

    pub mod raw_xml {
        use crate::internal;
        pub use internal::webdav::raw_xml::prop_find_result::PropFindResult;
        pub use internal::webdav::raw_xml::xml_node::XmlNode;
    }

    pub mod structs {
        use crate::internal;
        pub use internal::webdav::structs::*;
    }
}
