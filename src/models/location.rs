use serde::{Deserialize, Serialize};

/// 场景的内外景属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lighting {
    Interior,
    Exterior,
    /// 内外景 (INT./EXT. 或 I/E.)
    Both,
    /// 没有可识别的内外景前缀
    Unknown,
}

impl Lighting {
    /// 规范化的场景标题前缀，Unknown 没有前缀
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Lighting::Interior => Some("INT."),
            Lighting::Exterior => Some("EXT."),
            Lighting::Both => Some("INT./EXT."),
            Lighting::Unknown => None,
        }
    }
}

/// 从场景标题中解析出的地点信息
///
/// 只能由 `LocationAnalyzer` 根据标题文本生成，不单独构造。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneLocation {
    pub lighting: Lighting,
    pub place: String,
    pub sub_place: Option<String>,
    pub time_of_day: Option<String>,
    pub modifiers: Vec<String>,
}

impl SceneLocation {
    pub(crate) fn new(
        lighting: Lighting,
        place: String,
        sub_place: Option<String>,
        time_of_day: Option<String>,
        modifiers: Vec<String>,
    ) -> Self {
        SceneLocation {
            lighting,
            place,
            sub_place,
            time_of_day,
            modifiers,
        }
    }

    pub fn interior(&self) -> bool {
        matches!(self.lighting, Lighting::Interior | Lighting::Both)
    }

    pub fn exterior(&self) -> bool {
        matches!(self.lighting, Lighting::Exterior | Lighting::Both)
    }

    /// 用 " - " 重新拼接出规范化的场景标题
    ///
    /// 例如 `INT./EXT. CAR - DAY (1995)`。修饰括号统一放在末尾，
    /// 所以结果不一定与原始文本逐字相同，但再次解析得到的地点信息相同。
    pub fn heading_text(&self) -> String {
        let mut segments = vec![self.place.as_str()];
        if let Some(sub_place) = &self.sub_place {
            segments.push(sub_place);
        }
        if let Some(time_of_day) = &self.time_of_day {
            segments.push(time_of_day);
        }

        let mut heading = segments.join(" - ");
        if let Some(prefix) = self.lighting.prefix() {
            heading = format!("{} {}", prefix, heading);
        }
        for modifier in &self.modifiers {
            heading.push_str(&format!(" ({})", modifier));
        }
        heading
    }
}
