use std::collections::HashSet;
use lazy_static::lazy_static;
use crate::models::{Lighting, SceneLocation};
use crate::utils::fountain_constants::{LIGHTING, MODIFIER};
use crate::utils::FountainConstants;

/// 场景标题中地点、子地点、时间之间的分隔符，必须逐字匹配
pub const SEGMENT_DELIMITER: &str = " - ";

lazy_static! {
    static ref DEFAULT_ANALYZER: LocationAnalyzer = LocationAnalyzer::default();
}

/// 场景标题 → 地点信息的纯函数分析器
///
/// 只持有时间词表，分析过程没有任何状态，可以跨线程共享。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationAnalyzer {
    times_of_day: HashSet<String>,
}

impl Default for LocationAnalyzer {
    fn default() -> Self {
        LocationAnalyzer {
            times_of_day: FountainConstants::times_of_day()
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl LocationAnalyzer {
    /// 使用默认词表的共享实例
    pub fn shared() -> &'static LocationAnalyzer {
        &DEFAULT_ANALYZER
    }

    /// 在默认词表基础上追加时间词
    pub fn with_times_of_day<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for time in extra {
            let normalized = normalize_segment(time.as_ref());
            if !normalized.is_empty() {
                self.times_of_day.insert(normalized);
            }
        }
        self
    }

    pub fn is_time_of_day(&self, segment: &str) -> bool {
        self.times_of_day.contains(&normalize_segment(segment))
    }

    /// 分析场景标题文本，永远不会失败
    ///
    /// 没有内外景前缀时 lighting 为 Unknown，place 为尽力保留的剩余文本。
    /// 只要输入含有非空白字符，place 就不为空；空白输入（例如只有 `.` 的强制场景标题）
    /// 得到空的 place。
    pub fn analyze(&self, text: &str) -> SceneLocation {
        // 括号修饰可以出现在任何位置，先取出再分段
        let modifiers: Vec<String> = MODIFIER
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        let stripped = MODIFIER.replace_all(text, "");
        let stripped = stripped.trim();

        let (lighting, remainder) = match LIGHTING.captures(stripped) {
            Some(caps) => {
                let token = caps.get(1).map_or("", |m| m.as_str()).to_uppercase();
                let lighting = if token.contains('/') {
                    Lighting::Both
                } else if token.starts_with("INT") {
                    Lighting::Interior
                } else {
                    Lighting::Exterior
                };
                let end = caps.get(0).map_or(0, |m| m.end());
                (lighting, &stripped[end..])
            }
            None => (Lighting::Unknown, stripped),
        };

        let segments: Vec<&str> = remainder
            .split(SEGMENT_DELIMITER)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect();

        let Some((place, rest)) = segments.split_first() else {
            return SceneLocation::new(
                lighting,
                fallback_place(remainder, stripped, text),
                None,
                None,
                modifiers,
            );
        };

        let (sub_place, time_of_day) = match rest.iter().position(|s| self.is_time_of_day(s)) {
            Some(idx) => (join_segments(&rest[..idx]), join_segments(&rest[idx..])),
            None => (join_segments(rest), None),
        };

        SceneLocation::new(lighting, place.to_string(), sub_place, time_of_day, modifiers)
    }
}

/// 使用默认词表分析
pub fn analyze_location(text: &str) -> SceneLocation {
    LocationAnalyzer::shared().analyze(text)
}

fn normalize_segment(segment: &str) -> String {
    segment
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn join_segments(segments: &[&str]) -> Option<String> {
    if segments.is_empty() {
        None
    } else {
        Some(segments.join(SEGMENT_DELIMITER))
    }
}

fn fallback_place(remainder: &str, stripped: &str, original: &str) -> String {
    [remainder, stripped, original]
        .iter()
        .map(|candidate| candidate.trim())
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_default()
        .to_string()
}
