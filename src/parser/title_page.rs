use crate::models::TitlePageEntry;
use crate::utils::fountain_constants::TITLE_PAGE_KEY;
use crate::utils::{is_blank, FountainConstants};

/// 单数 key 归并到复数形式
const KEY_ALIASES: &[(&str, &str)] = &[("author", "authors")];

/// 提取文档开头的标题页
///
/// 没有标题页时返回空列表。
pub fn extract_title_page(text: &str) -> Vec<TitlePageEntry> {
    let lines: Vec<&str> = text.lines().collect();
    extract_title_page_lines(&lines).0
}

/// 从开头的行中提取标题页，返回条目以及被标题页占用的行数
///
/// 标题页在空行处结束，除非空行之后紧接着又是 `Key:` 行。
/// 返回的行数停在结束标题页的空行上，所以正文总是从空行开始。
pub fn extract_title_page_lines<S: AsRef<str>>(lines: &[S]) -> (Vec<TitlePageEntry>, usize) {
    let mut entries: Vec<TitlePageEntry> = Vec::new();

    let mut i = 0;
    while i < lines.len() && is_blank(lines[i].as_ref()) {
        i += 1;
    }
    if i >= lines.len() || parse_key_line(lines[i].as_ref()).is_none() {
        return (entries, 0);
    }

    while i < lines.len() {
        let line = lines[i].as_ref();

        if is_blank(line) {
            let next = (i..lines.len()).find(|&j| !is_blank(lines[j].as_ref()));
            match next {
                Some(j) if parse_key_line(lines[j].as_ref()).is_some() => {
                    i = j;
                    continue;
                }
                _ => break,
            }
        }

        if let Some((key, value)) = parse_key_line(line) {
            let values = if value.is_empty() { Vec::new() } else { vec![value] };
            entries.push(TitlePageEntry::new(key, values));
        } else if let Some(entry) = entries.last_mut() {
            // 缩进的延续行，或块内的其他文本，都作为当前 key 的下一个值
            let value = line.trim();
            if !value.is_empty() {
                entry.values.push(value.to_string());
            }
        }
        i += 1;
    }

    tracing::debug!("标题页: {} 个条目, 占用 {} 行", entries.len(), i);
    (entries, i)
}

/// 解析 `Key: value` 行，返回规范化的 key 和去掉首尾空白的值
pub fn parse_key_line(line: &str) -> Option<(String, String)> {
    let caps = TITLE_PAGE_KEY.captures(line)?;
    let raw_key = caps.get(1)?.as_str().trim();
    let value = caps.get(2).map_or("", |m| m.as_str()).trim();

    let lowered = normalize_key(raw_key);
    let known = FountainConstants::title_page_keys().contains(&lowered.as_str());
    // 全大写的未知 key 更像是 "FADE IN:" 这类正文
    if !known && !raw_key.chars().any(char::is_lowercase) {
        return None;
    }

    Some((canonical_key(&lowered), value.to_string()))
}

fn normalize_key(key: &str) -> String {
    key.split(|c: char| c.is_whitespace() || c == '_')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// 小写 key → 规范大小写，别名只归并一次
fn canonical_key(lowered: &str) -> String {
    let key = KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map_or(lowered, |(_, target)| *target);

    if FountainConstants::title_page_position_keys().contains(&key) {
        return key.to_uppercase();
    }

    key.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
