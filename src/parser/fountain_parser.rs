use crate::models::{Conf, Element, ElementType, Screenplay, TitlePageEntry};
use crate::parser::location_analyzer::LocationAnalyzer;
use crate::parser::note_scanner::{scan_notes, RawLine};
use crate::parser::title_page::extract_title_page_lines;
use crate::utils::fountain_constants::{FORCED_SCENE_HEADING, PAGE_BREAK, SCENE_NUMBER};
use crate::utils::{
    has_scene_heading_prefix, is_blank, is_intentional_blank, is_transition_shape, is_upper_name,
};

/// Fountain 文本解析器
///
/// 解析是宽松且完整的：任何输入都会得到一个元素序列，无法识别的行归为 Action。
/// 解析器本身只持有配置，`parse` 不修改自身，可以在多个线程中同时使用。
#[derive(Debug, Clone)]
pub struct FountainParser {
    conf: Conf,
    analyzer: LocationAnalyzer,
}

impl Default for FountainParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FountainParser {
    pub fn new() -> Self {
        Self::with_conf(Conf::default())
    }

    pub fn with_conf(conf: Conf) -> Self {
        let analyzer = LocationAnalyzer::default().with_times_of_day(&conf.extra_times_of_day);
        FountainParser { conf, analyzer }
    }

    pub fn conf(&self) -> &Conf {
        &self.conf
    }

    pub fn analyzer(&self) -> &LocationAnalyzer {
        &self.analyzer
    }

    /// 解析Fountain格式文本
    ///
    /// # Arguments
    ///
    /// * `script` - Fountain格式的剧本文本
    ///
    /// # Returns
    ///
    /// 不可变的剧本值，`filename` 为空
    pub fn parse(&self, script: &str) -> Screenplay {
        let (elements, title_page) = self.parse_elements(script);
        Screenplay::new(None, elements, title_page, self.conf.suppress_scene_numbers)
    }

    /// 解析出元素序列和标题页
    pub fn parse_elements(&self, script: &str) -> (Vec<Element>, Vec<TitlePageEntry>) {
        // 处理换行符差异
        let normalized = script.replace("\r\n", "\n").replace('\r', "\n");
        let lines = scan_notes(normalized.split('\n'));

        // 标题页只可能出现在开头，且不能被 boneyard 打断
        let leading: Vec<&str> = lines.iter().map_while(RawLine::as_text).collect();
        let (title_page, consumed) = extract_title_page_lines(&leading);

        let elements = LineClassifier::new(self, &lines[consumed..]).run();
        tracing::debug!(
            "解析完成: {} 行, {} 个元素, {} 个标题页条目",
            lines.len(),
            elements.len(),
            title_page.len()
        );
        (elements, title_page)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Normal,
    Dialogue,
}

/// 还在续行的 Action 或 Dialogue，块结束时才生成元素
struct OpenText {
    element_type: ElementType,
    lines: Vec<String>,
    dual: bool,
}

/// 单次解析的状态，按行扫描并生成元素
struct LineClassifier<'a> {
    parser: &'a FountainParser,
    lines: &'a [RawLine],
    elements: Vec<Element>,
    state: BlockState,
    open: Option<OpenText>,
    /// 当前对白块是否为双对话
    dual: bool,
}

impl<'a> LineClassifier<'a> {
    fn new(parser: &'a FountainParser, lines: &'a [RawLine]) -> Self {
        LineClassifier {
            parser,
            lines,
            elements: Vec::new(),
            state: BlockState::Normal,
            open: None,
            dual: false,
        }
    }

    fn run(mut self) -> Vec<Element> {
        let lines = self.lines;
        for (i, line) in lines.iter().enumerate() {
            match line {
                RawLine::Boneyard(text) => {
                    self.end_block();
                    self.push(Element::new(ElementType::Boneyard, text.as_str()));
                }
                RawLine::Text(text) => self.classify_line(i, text),
            }
        }
        self.close_text();
        self.elements
    }

    // 前一行是空行、boneyard 或文档开头
    fn begins_block(&self, i: usize) -> bool {
        i == 0 || self.lines[i - 1].is_block_boundary()
    }

    // 后一行是空行、boneyard 或文档结尾
    fn ends_block(&self, i: usize) -> bool {
        i + 1 >= self.lines.len() || self.lines[i + 1].is_block_boundary()
    }

    fn classify_line(&mut self, i: usize, line: &str) {
        if is_blank(line) {
            if self.state == BlockState::Dialogue && is_intentional_blank(line) {
                // 对白中的双空格行是段落间隔，不结束对白块
                self.append_dialogue("");
            } else {
                self.end_block();
            }
            return;
        }

        let text = line.trim();
        if self.state == BlockState::Dialogue {
            self.classify_dialogue_line(text);
            return;
        }

        let begins_block = self.begins_block(i);
        let ends_block = self.ends_block(i);

        if PAGE_BREAK.is_match(text) {
            self.push(Element::new(ElementType::PageBreak, ""));
        } else if text.starts_with('=') && !text.starts_with("==") {
            self.push(Element::new(ElementType::Synopsis, text[1..].trim()));
        } else if text.starts_with('#') {
            let depth = text.chars().take_while(|c| *c == '#').count();
            self.push(Element::section(depth, text[depth..].trim()));
        } else if text.len() >= 2 && text.starts_with('>') && text.ends_with('<') {
            self.push(Element::new(ElementType::Centered, text[1..text.len() - 1].trim()));
        } else if let Some(rest) = text.strip_prefix('>') {
            self.push(Element::new(ElementType::Transition, rest.trim()));
        } else if let Some(rest) = text.strip_prefix('~') {
            self.push(Element::new(ElementType::Lyrics, rest.trim()));
        } else if let Some(rest) = text.strip_prefix('!') {
            self.push_action(rest.trim());
        } else if begins_block && ends_block && is_scene_heading(text) {
            self.push_scene_heading(text);
        } else if begins_block && ends_block && is_transition_shape(text) {
            self.push(Element::new(ElementType::Transition, text));
        } else if begins_block && !ends_block && is_character(text) {
            self.push_character(text);
        } else {
            self.push_action(text);
        }
    }

    fn classify_dialogue_line(&mut self, text: &str) {
        let wrapped = (text.starts_with('(') && text.ends_with(')'))
            || (text.starts_with('（') && text.ends_with('）'));

        if wrapped && text.chars().count() >= 2 {
            let inner: String = {
                let mut chars = text.chars();
                chars.next();
                chars.next_back();
                chars.as_str().trim().to_string()
            };
            let element = Element::new(ElementType::Parenthetical, inner);
            self.push(element.with_dual_dialogue(self.dual));
        } else {
            self.append_dialogue(text);
        }
    }

    fn push_scene_heading(&mut self, text: &str) {
        let mut heading = if FORCED_SCENE_HEADING.is_match(text) {
            text[1..].trim().to_string()
        } else {
            text.to_string()
        };

        let number = SCENE_NUMBER
            .captures(&heading)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
        if number.is_some() {
            heading = SCENE_NUMBER.replace(&heading, "").trim_end().to_string();
        }

        let element = Element::with_analyzer(ElementType::SceneHeading, heading, &self.parser.analyzer);
        self.push(element.with_scene_number(number));
    }

    fn push_character(&mut self, text: &str) {
        let mut name = text;
        let mut dual = false;
        if let Some(stripped) = name.strip_suffix('^') {
            name = stripped.trim_end();
            dual = self.parser.conf.use_dual_dialogue;
        }
        let name = name.strip_prefix('@').unwrap_or(name).trim();

        self.close_text();
        if dual {
            self.mark_previous_block_dual();
        }

        self.push(Element::new(ElementType::Character, name).with_dual_dialogue(dual));
        self.state = BlockState::Dialogue;
        self.dual = dual;
    }

    /// 把紧挨着的上一个对白块（角色及其对白、括号提示）标记为双对话
    fn mark_previous_block_dual(&mut self) {
        let mut start = self.elements.len();
        while start > 0
            && self.elements[start - 1].is_type(&[ElementType::Dialogue, ElementType::Parenthetical])
        {
            start -= 1;
        }
        if start == 0 || self.elements[start - 1].element_type() != ElementType::Character {
            return;
        }
        for element in &mut self.elements[start - 1..] {
            *element = element.clone().with_dual_dialogue(true);
        }
    }

    fn append_dialogue(&mut self, text: &str) {
        let dual = self.dual;
        self.append_text(ElementType::Dialogue, text, dual);
    }

    fn push_action(&mut self, text: &str) {
        self.append_text(ElementType::Action, text, false);
    }

    /// 同类型的连续行并入当前打开的文本，否则先结束它再开新的
    fn append_text(&mut self, element_type: ElementType, text: &str, dual: bool) {
        if let Some(open) = self.open.as_mut() {
            if open.element_type == element_type {
                open.lines.push(text.to_string());
                return;
            }
        }
        self.close_text();
        self.open = Some(OpenText {
            element_type,
            lines: vec![text.to_string()],
            dual,
        });
    }

    fn close_text(&mut self) {
        if let Some(open) = self.open.take() {
            let element = Element::new(open.element_type, open.lines.join("\n"))
                .with_dual_dialogue(open.dual);
            self.push_element(element);
        }
    }

    fn push(&mut self, element: Element) {
        self.close_text();
        self.push_element(element);
    }

    fn push_element(&mut self, element: Element) {
        tracing::trace!(kind = ?element.element_type(), text = element.text(), "元素");
        self.elements.push(element);
    }

    fn end_block(&mut self) {
        self.close_text();
        self.state = BlockState::Normal;
        self.dual = false;
    }
}

/// INT. / EXT. 等前缀，或者单个点号强制
fn is_scene_heading(text: &str) -> bool {
    FORCED_SCENE_HEADING.is_match(text) || has_scene_heading_prefix(text)
}

/// 全大写或 @ 强制的角色名；形似场景标题或转场的行不算
fn is_character(text: &str) -> bool {
    let name = text.strip_suffix('^').map_or(text, str::trim_end);
    if name.starts_with('@') {
        return true;
    }
    !has_scene_heading_prefix(name) && !is_transition_shape(name) && is_upper_name(name)
}
