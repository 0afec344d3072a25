use serde::{Deserialize, Serialize};

/// 标题页条目，例如 `Title: Foo`
///
/// 条目顺序和值的顺序都会影响回写结果，必须保持。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePageEntry {
    pub key: String,
    pub values: Vec<String>,
}

impl TitlePageEntry {
    pub fn new(key: impl Into<String>, values: Vec<String>) -> Self {
        TitlePageEntry {
            key: key.into(),
            values,
        }
    }

    /// 所有值用空格连接
    pub fn joined(&self) -> String {
        self.values.join(" ")
    }

    pub fn is_key(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}

/// 查找第一个指定 key 的条目
pub fn find_entry<'a>(entries: &'a [TitlePageEntry], key: &str) -> Option<&'a TitlePageEntry> {
    entries.iter().find(|entry| entry.is_key(key))
}

/// 标题页中的剧本标题
pub fn title_value(entries: &[TitlePageEntry]) -> Option<String> {
    find_entry(entries, "title")
        .map(TitlePageEntry::joined)
        .filter(|title| !title.trim().is_empty())
}
