use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{FountainError, FountainResult};
use crate::models::title_page::{find_entry, TitlePageEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// 是否识别 `^` 双对话
    pub use_dual_dialogue: bool,
    /// 追加到默认时间词表的词，例如 "GOLDEN HOUR"
    pub extra_times_of_day: Vec<String>,
    /// 回写时不生成新的场景编号
    pub suppress_scene_numbers: bool,
    /// 回写时用地点信息重新拼接场景标题
    pub normalize_scene_headings: bool,
    /// 对白中每字符耗时预估(不含标点)
    pub dial_sec_per_char: f64,
    /// 对白中每个短标点耗时预估(逗号顿号等)
    pub dial_sec_per_punc_short: f64,
    /// 对白中每个长标点耗时预估(句号问号等)
    pub dial_sec_per_punc_long: f64,
    /// action文本中每字符转化成影片时长预估(不含标点)
    pub action_sec_per_char: f64,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            use_dual_dialogue: true,
            extra_times_of_day: Vec::new(),
            suppress_scene_numbers: false,
            normalize_scene_headings: false,
            dial_sec_per_char: 0.3,
            dial_sec_per_punc_short: 0.3,
            dial_sec_per_punc_long: 0.75,
            action_sec_per_char: 0.4,
        }
    }
}

impl Conf {
    pub fn from_json_str(json: &str) -> FountainResult<Self> {
        let conf: Conf = serde_json::from_str(json)?;
        conf.validate()?;
        Ok(conf)
    }

    /// 从 JSON 文件加载配置，缺省字段使用默认值
    pub fn load(path: impl AsRef<Path>) -> FountainResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> FountainResult<()> {
        let timings = [
            ("dial_sec_per_char", self.dial_sec_per_char),
            ("dial_sec_per_punc_short", self.dial_sec_per_punc_short),
            ("dial_sec_per_punc_long", self.dial_sec_per_punc_long),
            ("action_sec_per_char", self.action_sec_per_char),
        ];
        for (name, value) in timings {
            if !value.is_finite() || value < 0.0 {
                return Err(FountainError::InvalidConfig(format!(
                    "{} 必须是非负数，实际为 {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// 用标题页 `Metadata:` 中的 JSON 覆盖时长预估参数
    ///
    /// 无法解析的元数据直接忽略，保持当前配置。
    pub fn with_title_page_metadata(&self, title_page: &[TitlePageEntry]) -> Self {
        let mut conf = self.clone();
        let Some(entry) = find_entry(title_page, "metadata") else {
            return conf;
        };
        let metadata = match serde_json::from_str::<serde_json::Value>(&entry.joined()) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!("忽略无法解析的 Metadata: {}", e);
                return conf;
            }
        };

        if let Some(v) = metadata.get("dial_sec_per_char").and_then(|v| v.as_f64()) {
            conf.dial_sec_per_char = v;
        }
        if let Some(v) = metadata.get("dial_sec_per_punc_short").and_then(|v| v.as_f64()) {
            conf.dial_sec_per_punc_short = v;
        }
        if let Some(v) = metadata.get("dial_sec_per_punc_long").and_then(|v| v.as_f64()) {
            conf.dial_sec_per_punc_long = v;
        }
        if let Some(v) = metadata.get("action_sec_per_char").and_then(|v| v.as_f64()) {
            conf.action_sec_per_char = v;
        }

        if conf.validate().is_err() {
            tracing::debug!("Metadata 中的时长参数无效，保持原配置");
            return self.clone();
        }
        conf
    }
}
