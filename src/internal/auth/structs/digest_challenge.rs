//! HTTP 摘要认证（RFC 2617 / RFC 7616）的质询解析与应答计算。

use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Md5,
    Md5Sess,
    Sha256,
    Sha256Sess,
}

impl DigestAlgorithm {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "MD5" => Some(Self::Md5),
            "MD5-SESS" => Some(Self::Md5Sess),
            "SHA-256" => Some(Self::Sha256),
            "SHA-256-SESS" => Some(Self::Sha256Sess),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Md5Sess => "MD5-sess",
            Self::Sha256 => "SHA-256",
            Self::Sha256Sess => "SHA-256-sess",
        }
    }

    fn is_session(&self) -> bool {
        matches!(self, Self::Md5Sess | Self::Sha256Sess)
    }

    fn hash(&self, data: &str) -> String {
        match self {
            Self::Md5 | Self::Md5Sess => format!("{:x}", md5::compute(data)),
            Self::Sha256 | Self::Sha256Sess => {
                format!("{:x}", Sha256::digest(data.as_bytes()))
            }
        }
    }
}

/// 服务器在 `WWW-Authenticate: Digest ...` 中下发的质询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestChallenge {
    pub realm: String,
    pub nonce: String,
    pub opaque: Option<String>,
    /// 仅支持 `auth`；服务器未给出 qop 时为 None（RFC 2069 兼容模式）
    pub qop: Option<String>,
    pub algorithm: DigestAlgorithm,
    pub stale: bool,
}

/// 计算一次应答所需的请求信息
pub struct DigestRequestParts<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub nonce_count: u32,
    pub cnonce: &'a str,
}

impl DigestChallenge {
    /// 解析单个 `WWW-Authenticate` 头，非 Digest 或不支持的参数返回 None
    pub fn parse(header: &str) -> Option<Self> {
        let header = header.trim();
        let (scheme, rest) = header.split_once(char::is_whitespace)?;
        if !scheme.eq_ignore_ascii_case("digest") {
            return None;
        }

        let mut realm = None;
        let mut nonce = None;
        let mut opaque = None;
        let mut qop_offered = None;
        let mut algorithm = DigestAlgorithm::Md5;
        let mut stale = false;

        for (key, value) in split_params(rest) {
            match key.to_ascii_lowercase().as_str() {
                "realm" => realm = Some(value),
                "nonce" => nonce = Some(value),
                "opaque" => opaque = Some(value),
                "qop" => qop_offered = Some(value),
                "algorithm" => algorithm = DigestAlgorithm::parse(&value)?,
                "stale" => stale = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }

        // qop=auth-int 需要对请求体做摘要，这里不支持
        let qop = match qop_offered {
            Some(offered) => {
                if offered.split(',').any(|q| q.trim().eq_ignore_ascii_case("auth")) {
                    Some("auth".to_string())
                } else {
                    return None;
                }
            }
            None => None,
        };

        Some(Self {
            realm: realm.unwrap_or_default(),
            nonce: nonce?,
            opaque,
            qop,
            algorithm,
            stale,
        })
    }

    /// 计算 `response` 摘要值
    pub fn response_digest(&self, parts: &DigestRequestParts<'_>) -> String {
        let algo = self.algorithm;
        let mut ha1 = algo.hash(&format!(
            "{}:{}:{}",
            parts.username, self.realm, parts.password
        ));
        if algo.is_session() {
            ha1 = algo.hash(&format!("{ha1}:{}:{}", self.nonce, parts.cnonce));
        }
        let ha2 = algo.hash(&format!("{}:{}", parts.method, parts.uri));

        match &self.qop {
            Some(qop) => algo.hash(&format!(
                "{ha1}:{}:{:08x}:{}:{qop}:{ha2}",
                self.nonce, parts.nonce_count, parts.cnonce
            )),
            None => algo.hash(&format!("{ha1}:{}:{ha2}", self.nonce)),
        }
    }

    /// 生成完整的 `Authorization` 头值
    pub fn authorization(&self, parts: &DigestRequestParts<'_>) -> String {
        let response = self.response_digest(parts);
        let mut value = format!(
            "Digest username=\"{}\", realm=\"{}\", nonce=\"{}\", uri=\"{}\", algorithm={}, response=\"{}\"",
            escape_quoted(parts.username),
            escape_quoted(&self.realm),
            escape_quoted(&self.nonce),
            escape_quoted(parts.uri),
            self.algorithm.as_str(),
            response,
        );
        if let Some(opaque) = &self.opaque {
            value.push_str(&format!(", opaque=\"{}\"", escape_quoted(opaque)));
        }
        if let Some(qop) = &self.qop {
            value.push_str(&format!(
                ", qop={qop}, nc={:08x}, cnonce=\"{}\"",
                parts.nonce_count,
                escape_quoted(parts.cnonce)
            ));
        }
        value
    }
}

/// 拆分 `key=value, key="quoted, value"` 形式的参数列表
fn split_params(input: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace() || *c == ',') {
            chars.next();
        }

        let mut key = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c == ',' {
                break;
            }
            key.push(c);
            chars.next();
        }
        let key = key.trim().to_string();
        if key.is_empty() {
            break;
        }

        let mut value = String::new();
        if chars.peek() == Some(&'=') {
            chars.next();
            while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
                chars.next();
            }
            if chars.peek() == Some(&'"') {
                chars.next();
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                value.push(escaped);
                            }
                        }
                        '"' => break,
                        _ => value.push(c),
                    }
                }
            } else {
                while let Some(&c) = chars.peek() {
                    if c == ',' {
                        break;
                    }
                    value.push(c);
                    chars.next();
                }
                value = value.trim().to_string();
            }
        }

        params.push((key, value));
    }

    params
}

fn escape_quoted(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
