use std::ops::Range;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlineKind {
    Title,
    Chapter,
    SceneGroup,
    Scene,
    /// 第一个章节之前的内容
    PreScene,
}

/// 大纲树节点
///
/// `range` 是元素列表中的半开区间 `[start, end)`。子节点按值持有，没有父引用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub kind: OutlineKind,
    pub range: Range<usize>,
    pub label: Option<String>,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(kind: OutlineKind, start: usize, label: Option<String>) -> Self {
        OutlineNode {
            kind,
            range: start..start,
            label,
            children: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// 按深度优先顺序统计某种节点的个数（包含自身）
    pub fn count(&self, kind: OutlineKind) -> usize {
        let own = usize::from(self.kind == kind);
        own + self.children.iter().map(|child| child.count(kind)).sum::<usize>()
    }

    /// 深度优先遍历，回调参数为 (节点, 深度)
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a OutlineNode, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a OutlineNode, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }
}
