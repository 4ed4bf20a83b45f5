//! 纯字符串层面的路径处理，只认 `/` 分隔符，不做任何 URL 解析。

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};

/// 路径段中保留原样的字符只有 RFC 3986 的 unreserved，其余一律编码
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// 规范化路径：合并重复的 `/`，去掉 `.`，按字面消解 `..`，去掉结尾的 `/`。
///
/// 以 `/` 开头的路径不会越过根目录，空结果返回 `.`（根路径返回 `/`）。
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// 拼接路径片段后规范化，空片段被忽略；后面的片段以 `/` 开头也不会重置到根。
pub fn join_path(base: &str, name: &str) -> String {
    let joined = [base, name]
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        return String::new();
    }
    clean_path(&joined)
}

/// 计算 `target` 相对于 `base` 的字面相对路径。
///
/// 一个以 `/` 开头而另一个不是，或者 `base` 中剩余部分含 `..` 时无法计算，返回 None。
pub fn relative_path(base: &str, target: &str) -> Option<String> {
    let base = clean_path(base);
    let target = clean_path(target);

    if base == target {
        return Some(".".to_string());
    }

    let base = if base == "." { String::new() } else { base };
    if base.starts_with('/') != target.starts_with('/') {
        return None;
    }

    let base_parts: Vec<&str> =
        base.split('/').filter(|s| !s.is_empty()).collect();
    let target_parts: Vec<&str> =
        target.split('/').filter(|s| !s.is_empty() && *s != ".").collect();

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let rest_base = &base_parts[common..];
    if rest_base.contains(&"..") {
        return None;
    }

    let mut result: Vec<&str> = vec![".."; rest_base.len()];
    result.extend_from_slice(&target_parts[common..]);

    if result.is_empty() {
        Some(".".to_string())
    } else {
        Some(result.join("/"))
    }
}

/// 把路径统一成同一种百分号编码形式，逐段先解码再编码。
///
/// `(2024)`、`%282024%29` 这类等价写法得到相同结果；段内编码过的 `%2F` 仍保留为 `%2F`。
pub fn normalize_encoding(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            let raw: Vec<u8> = percent_decode_str(segment).collect();
            percent_encode(&raw, SEGMENT_ENCODE_SET).to_string()
        })
        .collect::<Vec<_>>()
        .join("/")
}
