use serde::{Deserialize, Serialize};
use crate::models::element::{Element, ElementType};
use crate::models::outline_node::OutlineNode;
use crate::models::title_page::{self, TitlePageEntry};
use crate::outline::extract_outline;

/// 完整的剧本值
///
/// 构造后不提供任何修改方法，编辑意味着构造一个新的 `Screenplay`。
/// 内部只有自有数据，可以在线程间共享读取。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Screenplay {
    filename: Option<String>,
    elements: Vec<Element>,
    title_page: Vec<TitlePageEntry>,
    suppress_scene_numbers: bool,
}

impl Screenplay {
    pub fn new(
        filename: Option<String>,
        elements: Vec<Element>,
        title_page: Vec<TitlePageEntry>,
        suppress_scene_numbers: bool,
    ) -> Self {
        Screenplay {
            filename,
            elements,
            title_page,
            suppress_scene_numbers,
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn title_page(&self) -> &[TitlePageEntry] {
        &self.title_page
    }

    pub fn suppress_scene_numbers(&self) -> bool {
        self.suppress_scene_numbers
    }

    pub fn title(&self) -> Option<String> {
        title_page::title_value(&self.title_page)
    }

    /// 替换元素列表，得到新的剧本
    pub fn with_elements(&self, elements: Vec<Element>) -> Self {
        Screenplay {
            filename: self.filename.clone(),
            elements,
            title_page: self.title_page.clone(),
            suppress_scene_numbers: self.suppress_scene_numbers,
        }
    }

    pub fn with_filename(&self, filename: Option<String>) -> Self {
        Screenplay {
            filename,
            ..self.clone()
        }
    }

    pub fn with_suppress_scene_numbers(&self, suppress: bool) -> Self {
        Screenplay {
            suppress_scene_numbers: suppress,
            ..self.clone()
        }
    }

    /// 章、场景组、场的大纲树
    pub fn outline(&self) -> OutlineNode {
        extract_outline(&self.elements, &self.title_page)
    }

    pub fn scene_headings(&self) -> impl Iterator<Item = (usize, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.element_type() == ElementType::SceneHeading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn screenplay_is_shareable() {
        assert_send_sync::<Screenplay>();
    }

    #[test]
    fn with_elements_keeps_header() {
        let screenplay = Screenplay::new(
            Some("a.fountain".to_string()),
            vec![Element::new(ElementType::Action, "One")],
            vec![TitlePageEntry::new("Title", vec!["Foo".to_string()])],
            true,
        );
        let edited = screenplay.with_elements(vec![Element::new(ElementType::Action, "Two")]);

        assert_eq!(edited.filename(), Some("a.fountain"));
        assert_eq!(edited.title(), Some("Foo".to_string()));
        assert!(edited.suppress_scene_numbers());
        assert_eq!(edited.elements()[0].text(), "Two");
        assert_eq!(screenplay.elements()[0].text(), "One");
    }
}
