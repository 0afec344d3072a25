//! 从扁平的元素序列重建大纲树
//!
//! 用三个"打开"的槽位（章、场景组、场）代替显式的栈：新的标题先关闭同级及以下的节点，
//! 再打开自己。缺少的上级节点（例如没有 `##` 就出现的 `###`）会被隐式创建，
//! 这种情况从不报错。
//!
//! * `##` 打开章 (Chapter)
//! * `###` 打开场景组 (SceneGroup)，需要时隐式创建章
//! * 场景标题打开场 (Scene)，需要时隐式创建场景组和章；场延续到下一个场景标题或任意章节标题之前
//! * `#` 和四级以上的章节标题只是内容，但会结束当前的场
//! * 第一个章之前的元素组成一个 PreScene 节点

use crate::models::title_page::title_value;
use crate::models::{Element, ElementType, OutlineKind, OutlineNode, TitlePageEntry};

/// 提取大纲，根节点是覆盖全部元素的 Title 节点
pub fn extract_outline(elements: &[Element], title_page: &[TitlePageEntry]) -> OutlineNode {
    let mut builder = OutlineBuilder::new(outline_title(elements, title_page));

    for (index, element) in elements.iter().enumerate() {
        match element.element_type() {
            ElementType::SectionHeading => builder.section(index, element),
            ElementType::SceneHeading => builder.scene(index, element),
            _ => {}
        }
    }

    let root = builder.finish(elements.len());
    tracing::debug!(
        "大纲: {} 章, {} 场景组, {} 场",
        root.count(OutlineKind::Chapter),
        root.count(OutlineKind::SceneGroup),
        root.count(OutlineKind::Scene)
    );
    root
}

/// 标题页的 Title，没有时使用第一个一级章节标题
fn outline_title(elements: &[Element], title_page: &[TitlePageEntry]) -> Option<String> {
    title_value(title_page).or_else(|| {
        elements
            .iter()
            .find(|e| e.element_type() == ElementType::SectionHeading && e.section_depth() == 1)
            .and_then(|e| non_empty_label(e.text()))
    })
}

fn non_empty_label(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

struct OutlineBuilder {
    root: OutlineNode,
    chapter: Option<OutlineNode>,
    group: Option<OutlineNode>,
    scene: Option<OutlineNode>,
    /// 第一个章的起点，同时表示 PreScene 是否已经处理
    first_chapter: Option<usize>,
}

impl OutlineBuilder {
    fn new(title: Option<String>) -> Self {
        OutlineBuilder {
            root: OutlineNode::new(OutlineKind::Title, 0, title),
            chapter: None,
            group: None,
            scene: None,
            first_chapter: None,
        }
    }

    fn section(&mut self, index: usize, element: &Element) {
        self.close_scene(index);
        let label = non_empty_label(element.text());

        match element.section_depth() {
            2 => {
                self.close_group(index);
                self.close_chapter(index);
                self.mark_chapter_start(index);
                self.chapter = Some(OutlineNode::new(OutlineKind::Chapter, index, label));
            }
            3 => {
                self.close_group(index);
                self.ensure_chapter(index);
                self.group = Some(OutlineNode::new(OutlineKind::SceneGroup, index, label));
            }
            _ => {}
        }
    }

    fn scene(&mut self, index: usize, element: &Element) {
        self.close_scene(index);
        self.ensure_group(index);
        let label = Some(element.text().to_string());
        self.scene = Some(OutlineNode::new(OutlineKind::Scene, index, label));
    }

    fn ensure_chapter(&mut self, index: usize) {
        if self.chapter.is_none() {
            self.mark_chapter_start(index);
            self.chapter = Some(OutlineNode::new(OutlineKind::Chapter, index, None));
        }
    }

    fn ensure_group(&mut self, index: usize) {
        self.ensure_chapter(index);
        if self.group.is_none() {
            self.group = Some(OutlineNode::new(OutlineKind::SceneGroup, index, None));
        }
    }

    fn mark_chapter_start(&mut self, index: usize) {
        if self.first_chapter.is_some() {
            return;
        }
        self.first_chapter = Some(index);
        self.push_pre_scene(index);
    }

    fn push_pre_scene(&mut self, end: usize) {
        if end > 0 {
            let mut pre_scene = OutlineNode::new(OutlineKind::PreScene, 0, None);
            pre_scene.range.end = end;
            self.root.children.push(pre_scene);
        }
    }

    fn close_scene(&mut self, end: usize) {
        if let Some(mut scene) = self.scene.take() {
            scene.range.end = end;
            if let Some(group) = self.group.as_mut() {
                group.children.push(scene);
            }
        }
    }

    fn close_group(&mut self, end: usize) {
        if let Some(mut group) = self.group.take() {
            group.range.end = end;
            if let Some(chapter) = self.chapter.as_mut() {
                chapter.children.push(group);
            }
        }
    }

    fn close_chapter(&mut self, end: usize) {
        if let Some(mut chapter) = self.chapter.take() {
            chapter.range.end = end;
            self.root.children.push(chapter);
        }
    }

    fn finish(mut self, len: usize) -> OutlineNode {
        self.close_scene(len);
        self.close_group(len);
        self.close_chapter(len);
        if self.first_chapter.is_none() {
            // 没有任何章，全部元素都在第一个章之前
            self.push_pre_scene(len);
        }
        self.root.range.end = len;
        self.root
    }
}

/// 缩进文本形式的大纲，每个节点一行
pub fn format_outline(root: &OutlineNode) -> String {
    let mut out = String::new();
    root.walk(&mut |node, depth| {
        let label = node.label.as_deref().unwrap_or("-");
        out.push_str(&format!(
            "{}{:?} [{}..{}) {}\n",
            "  ".repeat(depth),
            node.kind,
            node.range.start,
            node.range.end,
            label
        ));
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(text: &str) -> Element {
        Element::new(ElementType::SceneHeading, text)
    }

    fn action(text: &str) -> Element {
        Element::new(ElementType::Action, text)
    }

    #[test]
    fn empty_document() {
        let root = extract_outline(&[], &[]);
        assert_eq!(root.kind, OutlineKind::Title);
        assert_eq!(root.range, 0..0);
        assert!(root.children.is_empty());
    }

    #[test]
    fn scenes_only_get_implicit_parents() {
        let elements = vec![heading("INT. A - DAY"), action("One."), heading("EXT. B - NIGHT")];
        let root = extract_outline(&elements, &[]);

        assert_eq!(root.children.len(), 1);
        let chapter = &root.children[0];
        assert_eq!(chapter.kind, OutlineKind::Chapter);
        assert_eq!(chapter.label, None);
        let group = &chapter.children[0];
        assert_eq!(group.kind, OutlineKind::SceneGroup);
        assert_eq!(group.children.len(), 2);
        assert_eq!(group.children[0].range, 0..2);
        assert_eq!(group.children[1].range, 2..3);
        assert_eq!(group.children[1].label.as_deref(), Some("EXT. B - NIGHT"));
    }

    #[test]
    fn content_before_first_chapter_is_pre_scene() {
        let elements = vec![
            action("Cold open."),
            Element::section(2, "Act One"),
            heading("INT. A - DAY"),
        ];
        let root = extract_outline(&elements, &[]);

        assert_eq!(root.children[0].kind, OutlineKind::PreScene);
        assert_eq!(root.children[0].range, 0..1);
        assert_eq!(root.children[1].kind, OutlineKind::Chapter);
        assert_eq!(root.children[1].label.as_deref(), Some("Act One"));
        assert_eq!(root.children[1].range, 1..3);
    }

    #[test]
    fn no_headings_at_all() {
        let root = extract_outline(&[action("Just words.")], &[]);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].kind, OutlineKind::PreScene);
        assert_eq!(root.children[0].range, 0..1);
    }

    #[test]
    fn title_falls_back_to_first_top_section() {
        let elements = vec![Element::section(1, "My Film"), heading("INT. A - DAY")];
        assert_eq!(extract_outline(&elements, &[]).label.as_deref(), Some("My Film"));

        let title_page = vec![TitlePageEntry::new("Title", vec!["Real Title".to_string()])];
        assert_eq!(
            extract_outline(&elements, &title_page).label.as_deref(),
            Some("Real Title")
        );
    }

    #[test]
    fn deep_section_ends_scene() {
        let elements = vec![
            heading("INT. A - DAY"),
            action("One."),
            Element::section(4, "beat"),
            action("Loose."),
        ];
        let root = extract_outline(&elements, &[]);
        let scene = &root.children[0].children[0].children[0];
        assert_eq!(scene.range, 0..2);
        assert_eq!(root.children[0].range, 0..4);
    }

    #[test]
    fn formatted_outline_is_indented() {
        let elements = vec![Element::section(2, "Act"), heading("INT. A - DAY")];
        let text = format_outline(&extract_outline(&elements, &[]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Title [0..2) -");
        assert_eq!(lines[1], "  Chapter [0..2) Act");
        assert_eq!(lines[2], "    SceneGroup [1..2) -");
        assert_eq!(lines[3], "      Scene [1..2) INT. A - DAY");
    }
}
