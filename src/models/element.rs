use serde::{Deserialize, Serialize};
use crate::models::location::SceneLocation;
use crate::parser::location_analyzer::LocationAnalyzer;

/// 剧本元素类型（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
    SectionHeading,
    Synopsis,
    PageBreak,
    Lyrics,
    Centered,
    Boneyard,
}

impl ElementType {
    /// 属于对白块的类型（角色名及其后的对白、括号提示）
    pub fn is_dialogue_family(&self) -> bool {
        matches!(
            self,
            ElementType::Character | ElementType::Dialogue | ElementType::Parenthetical
        )
    }
}

/// 一个剧本单元
///
/// 构造后不可变。场景标题的地点缓存在构造时由 `LocationAnalyzer` 计算，
/// 因此永远与 `text` 一致；需要修改文本时应构造新的 `Element`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredElement")]
pub struct Element {
    element_type: ElementType,
    text: String,
    is_centered: bool,
    is_dual_dialogue: bool,
    scene_number: Option<String>,
    section_depth: usize,
    location: Option<SceneLocation>,
}

/// 外部存储中的元素形态，反序列化时重新计算地点缓存
#[derive(Deserialize)]
struct StoredElement {
    element_type: ElementType,
    text: String,
    #[serde(default)]
    is_dual_dialogue: bool,
    #[serde(default)]
    scene_number: Option<String>,
    #[serde(default)]
    section_depth: usize,
}

impl From<StoredElement> for Element {
    fn from(stored: StoredElement) -> Self {
        let element = match stored.element_type {
            ElementType::SectionHeading => Element::section(stored.section_depth, stored.text),
            other => Element::new(other, stored.text),
        };
        element
            .with_scene_number(stored.scene_number)
            .with_dual_dialogue(stored.is_dual_dialogue)
    }
}

impl Element {
    pub fn new(element_type: ElementType, text: impl Into<String>) -> Self {
        Self::with_analyzer(element_type, text, LocationAnalyzer::shared())
    }

    /// 使用指定的地点分析器构造（用于扩展了时间词表的解析器）
    pub fn with_analyzer(
        element_type: ElementType,
        text: impl Into<String>,
        analyzer: &LocationAnalyzer,
    ) -> Self {
        let text = text.into();
        let location = match element_type {
            ElementType::SceneHeading => Some(analyzer.analyze(&text)),
            _ => None,
        };
        let section_depth = match element_type {
            ElementType::SectionHeading => 1,
            _ => 0,
        };

        Element {
            element_type,
            text,
            is_centered: element_type == ElementType::Centered,
            is_dual_dialogue: false,
            scene_number: None,
            section_depth,
            location,
        }
    }

    /// 章节标题，depth 为 `#` 的个数，最小为 1
    pub fn section(depth: usize, text: impl Into<String>) -> Self {
        let mut element = Self::new(ElementType::SectionHeading, text);
        element.section_depth = depth.max(1);
        element
    }

    /// 场景编号只对场景标题有效
    pub fn with_scene_number(mut self, number: Option<String>) -> Self {
        if self.element_type == ElementType::SceneHeading {
            self.scene_number = number;
        }
        self
    }

    /// 双对话标记只对角色、对白、括号提示有效
    pub fn with_dual_dialogue(mut self, dual: bool) -> Self {
        if self.element_type.is_dialogue_family() {
            self.is_dual_dialogue = dual;
        }
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_centered(&self) -> bool {
        self.is_centered
    }

    pub fn is_dual_dialogue(&self) -> bool {
        self.is_dual_dialogue
    }

    pub fn scene_number(&self) -> Option<&str> {
        self.scene_number.as_deref()
    }

    pub fn section_depth(&self) -> usize {
        self.section_depth
    }

    pub fn location(&self) -> Option<&SceneLocation> {
        self.location.as_ref()
    }

    // 检查类型是否匹配
    pub fn is_type(&self, types: &[ElementType]) -> bool {
        types.contains(&self.element_type)
    }

    /// 幂等比较用的签名：(类型, 文本, 居中, 双对话, 章节深度)
    pub fn signature(&self) -> (ElementType, &str, bool, bool, usize) {
        (
            self.element_type,
            self.text.as_str(),
            self.is_centered,
            self.is_dual_dialogue,
            self.section_depth,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::Lighting;

    #[test]
    fn scene_heading_carries_location_cache() {
        let element = Element::new(ElementType::SceneHeading, "INT. COFFEE SHOP - DAY");
        let location = element.location().expect("场景标题应该有地点缓存");
        assert_eq!(location.lighting, Lighting::Interior);
        assert_eq!(location.place, "COFFEE SHOP");

        let action = Element::new(ElementType::Action, "INT. COFFEE SHOP - DAY");
        assert!(action.location().is_none());
    }

    #[test]
    fn flags_only_apply_to_matching_types() {
        let action = Element::new(ElementType::Action, "He runs.")
            .with_dual_dialogue(true)
            .with_scene_number(Some("4".to_string()));
        assert!(!action.is_dual_dialogue());
        assert_eq!(action.scene_number(), None);

        let centered = Element::new(ElementType::Centered, "THE END");
        assert!(centered.is_centered());

        assert_eq!(Element::section(0, "Act").section_depth(), 1);
        assert_eq!(Element::section(3, "Group").section_depth(), 3);
        assert_eq!(Element::new(ElementType::Action, "x").section_depth(), 0);
    }
}
