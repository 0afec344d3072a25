//! 把 `Screenplay` 写回 Fountain 文本
//!
//! 对解析器能产生的元素序列，重新解析写出的文本会得到同样的
//! (类型, 文本, 居中, 双对话, 章节深度)。场景编号可能被重新编号。
//!
//! 已知限制（解析器不会产生这些形态，手工构造时可能无法往返）：
//! * 注释 `[[ ]]` 不在元素模型中，不会写出
//! * 对白行本身形如 `(...)` 时会被读成括号提示
//! * 文本中包含 `[[`、`/*`、`*/` 时会被当作注释或 boneyard
//! * 以 `<` 结尾的转场、多行的歌词/概要/章节标题
//! * 分页符的文本总是为空

use crate::models::{Conf, Element, ElementType, Screenplay, SceneLocation, TitlePageEntry};
use crate::parser::title_page::parse_key_line;
use crate::utils::{has_scene_heading_prefix, is_transition_shape, is_upper_name};

/// 写出时在行首需要强制标记的字符
const MARKER_PREFIXES: [char; 7] = ['!', '@', '~', '=', '#', '>', '.'];

/// 对白中的空行写成两个空格，保持对白块不断开
const DIALOGUE_BLANK_LINE: &str = "  ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// 没有记录编号的场景标题不生成新编号
    pub suppress_scene_numbers: bool,
    /// 用地点信息重新拼接场景标题
    pub normalize_scene_headings: bool,
}

impl WriterOptions {
    pub fn from_conf(conf: &Conf) -> Self {
        WriterOptions {
            suppress_scene_numbers: conf.suppress_scene_numbers,
            normalize_scene_headings: conf.normalize_scene_headings,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkupWriter {
    options: WriterOptions,
}

/// 单次写出过程中的计数状态
#[derive(Default)]
struct WriteState {
    scene_number: usize,
    /// 上一个块是尚未配对的双对话左侧
    dual_left_open: bool,
}

impl MarkupWriter {
    pub fn new(options: WriterOptions) -> Self {
        MarkupWriter { options }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    pub fn write(&self, screenplay: &Screenplay) -> String {
        let suppress = self.options.suppress_scene_numbers || screenplay.suppress_scene_numbers();
        let mut chunks: Vec<String> = Vec::new();

        if !screenplay.title_page().is_empty() {
            chunks.push(write_title_page(screenplay.title_page()));
        }

        let blocks = split_blocks(screenplay.elements());
        let mut state = WriteState::default();
        for (index, block) in blocks.iter().enumerate() {
            let first = &block[0];
            let chunk = match first.element_type() {
                ElementType::Character => {
                    let next_is_dual = blocks
                        .get(index + 1)
                        .map_or(false, |next| is_dual_character_block(next));
                    let caret = dual_caret(&mut state, first.is_dual_dialogue(), next_is_dual);
                    write_dialogue_block(block, caret, index == 0)
                }
                _ => {
                    state.dual_left_open = false;
                    self.write_element(first, index == 0, suppress, &mut state)
                }
            };
            chunks.push(chunk);
        }

        tracing::debug!("写出 {} 个块, {} 个场景标题", blocks.len(), state.scene_number);

        let mut out = chunks.join("\n\n");
        out.push('\n');
        out
    }

    fn write_element(
        &self,
        element: &Element,
        document_start: bool,
        suppress: bool,
        state: &mut WriteState,
    ) -> String {
        let text = element.text();
        match element.element_type() {
            ElementType::SceneHeading => {
                state.scene_number += 1;
                self.write_scene_heading(element, suppress, state.scene_number)
            }
            ElementType::Action => write_action(text, document_start),
            ElementType::Transition => {
                if is_transition_shape(text) && is_upper_name(text) && !has_scene_heading_prefix(text) {
                    text.to_string()
                } else {
                    format!("> {}", text).trim_end().to_string()
                }
            }
            ElementType::SectionHeading => {
                format!("{} {}", "#".repeat(element.section_depth()), text)
                    .trim_end()
                    .to_string()
            }
            ElementType::Synopsis => format!("= {}", text).trim_end().to_string(),
            ElementType::PageBreak => "===".to_string(),
            ElementType::Lyrics => format!("~{}", text),
            ElementType::Centered => format!("> {} <", text),
            ElementType::Boneyard => {
                if text.contains('\n') {
                    format!("/*\n{}\n*/", text)
                } else {
                    format!("/* {} */", text)
                }
            }
            // 不跟在角色后面的对白成员，单独成块
            ElementType::Character | ElementType::Dialogue | ElementType::Parenthetical => {
                write_dialogue_line(element)
            }
        }
    }

    fn write_scene_heading(&self, element: &Element, suppress: bool, sequence: usize) -> String {
        let base = if self.options.normalize_scene_headings {
            element
                .location()
                .map(SceneLocation::heading_text)
                .unwrap_or_else(|| element.text().to_string())
        } else {
            element.text().to_string()
        };

        let mut line = if has_scene_heading_prefix(&base) {
            base
        } else if base.starts_with('.') {
            format!(". {}", base)
        } else {
            format!(".{}", base)
        };

        // 已记录的编号总是保留
        match element.scene_number() {
            Some(number) => line.push_str(&format!(" #{}#", number)),
            None if !suppress => line.push_str(&format!(" #{}#", sequence)),
            None => {}
        }
        line
    }
}

/// 使用剧本自身的 `suppress_scene_numbers` 写出
pub fn write_screenplay(screenplay: &Screenplay) -> String {
    MarkupWriter::default().write(screenplay)
}

fn write_title_page(entries: &[TitlePageEntry]) -> String {
    entries
        .iter()
        .map(|entry| match entry.values.as_slice() {
            [] => format!("{}:", entry.key),
            [value] => format!("{}: {}", entry.key, value),
            values => {
                let mut lines = vec![format!("{}:", entry.key)];
                lines.extend(values.iter().map(|value| format!("    {}", value)));
                lines.join("\n")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 角色及其后的对白、括号提示是一个块，其他元素各自成块
fn split_blocks(elements: &[Element]) -> Vec<&[Element]> {
    let mut blocks = Vec::new();
    let mut i = 0;
    while i < elements.len() {
        let start = i;
        i += 1;
        if elements[start].element_type() == ElementType::Character {
            while i < elements.len()
                && elements[i].is_type(&[ElementType::Dialogue, ElementType::Parenthetical])
            {
                i += 1;
            }
        }
        blocks.push(&elements[start..i]);
    }
    blocks
}

fn is_dual_character_block(block: &[Element]) -> bool {
    block[0].element_type() == ElementType::Character && block[0].is_dual_dialogue()
}

/// 决定角色名后是否写 `^`
///
/// 双对话的第二块写 `^`；后面紧跟双对话块的是左侧，不写；
/// 孤立的双对话块写 `^`，重新解析时只标记它自己。
fn dual_caret(state: &mut WriteState, dual: bool, next_is_dual: bool) -> bool {
    if !dual {
        state.dual_left_open = false;
        false
    } else if state.dual_left_open {
        state.dual_left_open = false;
        true
    } else if next_is_dual {
        state.dual_left_open = true;
        false
    } else {
        true
    }
}

fn write_dialogue_block(block: &[Element], caret: bool, document_start: bool) -> String {
    let name = block[0].text();
    // 文档开头的 `Key: value` 形角色名同样会被当成标题页
    let plain = is_plain_character(name) && !(document_start && parse_key_line(name).is_some());
    let mut character = if plain {
        name.to_string()
    } else {
        format!("@{}", name)
    };
    if caret {
        character.push_str(" ^");
    }

    let mut lines = vec![character];
    lines.extend(block[1..].iter().map(write_dialogue_line));
    lines.join("\n")
}

fn write_dialogue_line(element: &Element) -> String {
    match element.element_type() {
        ElementType::Parenthetical => format!("({})", element.text()),
        _ => element
            .text()
            .split('\n')
            .map(|line| if line.is_empty() { DIALOGUE_BLANK_LINE } else { line })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn is_plain_character(name: &str) -> bool {
    is_upper_name(name)
        && !has_scene_heading_prefix(name)
        && !is_transition_shape(name)
        && !name.ends_with('^')
}

fn write_action(text: &str, document_start: bool) -> String {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if needs_forced_action(line, document_start && i == 0) {
                format!("!{}", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 会被读成其他类型的动作行需要 `!`
fn needs_forced_action(line: &str, document_start: bool) -> bool {
    line.trim().is_empty()
        || line.starts_with(&MARKER_PREFIXES[..])
        || is_upper_name(line)
        || has_scene_heading_prefix(line)
        || is_transition_shape(line)
        // 文档开头的 `Key: value` 会被当成标题页
        || (document_start && parse_key_line(line).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screenplay(elements: Vec<Element>) -> Screenplay {
        Screenplay::new(None, elements, Vec::new(), false)
    }

    #[test]
    fn scene_heading_gets_sequential_numbers() {
        let s = screenplay(vec![
            Element::new(ElementType::SceneHeading, "INT. A - DAY"),
            Element::new(ElementType::SceneHeading, "OVER BLACK"),
            Element::new(ElementType::SceneHeading, "EXT. B - NIGHT")
                .with_scene_number(Some("7A".to_string())),
        ]);
        assert_eq!(
            write_screenplay(&s),
            "INT. A - DAY #1#\n\n.OVER BLACK #2#\n\nEXT. B - NIGHT #7A#\n"
        );
    }

    #[test]
    fn suppressed_numbers_keep_recorded_ones() {
        let s = screenplay(vec![
            Element::new(ElementType::SceneHeading, "INT. A - DAY"),
            Element::new(ElementType::SceneHeading, "INT. B - DAY").with_scene_number(Some("2".to_string())),
        ])
        .with_suppress_scene_numbers(true);
        assert_eq!(write_screenplay(&s), "INT. A - DAY\n\nINT. B - DAY #2#\n");
    }

    #[test]
    fn normalized_heading_uses_location() {
        let s = screenplay(vec![Element::new(ElementType::SceneHeading, "int  house - day")]);
        let writer = MarkupWriter::new(WriterOptions {
            suppress_scene_numbers: true,
            normalize_scene_headings: true,
        });
        assert_eq!(writer.write(&s), "INT. house - day\n");
    }

    #[test]
    fn dialogue_block_is_written_together() {
        let s = screenplay(vec![
            Element::new(ElementType::Character, "JOHN"),
            Element::new(ElementType::Parenthetical, "softly"),
            Element::new(ElementType::Dialogue, "Hi.\n\nBye."),
            Element::new(ElementType::Action, "He goes."),
        ]);
        assert_eq!(write_screenplay(&s), "JOHN\n(softly)\nHi.\n  \nBye.\n\nHe goes.\n");
    }

    #[test]
    fn dual_pair_gets_one_caret() {
        let s = screenplay(vec![
            Element::new(ElementType::Character, "A").with_dual_dialogue(true),
            Element::new(ElementType::Dialogue, "One.").with_dual_dialogue(true),
            Element::new(ElementType::Character, "B").with_dual_dialogue(true),
            Element::new(ElementType::Dialogue, "Two.").with_dual_dialogue(true),
        ]);
        assert_eq!(write_screenplay(&s), "A\nOne.\n\nB ^\nTwo.\n");
    }

    #[test]
    fn mixed_case_character_is_forced() {
        let s = screenplay(vec![
            Element::new(ElementType::Character, "McCLANE"),
            Element::new(ElementType::Dialogue, "Yippee."),
        ]);
        assert_eq!(write_screenplay(&s), "@McCLANE\nYippee.\n");
    }

    #[test]
    fn key_shaped_character_at_start_is_forced() {
        let elements = vec![
            Element::new(ElementType::Character, "TITLE: BOB"),
            Element::new(ElementType::Dialogue, "Hello there."),
        ];
        assert_eq!(write_screenplay(&screenplay(elements.clone())), "@TITLE: BOB\nHello there.\n");

        // 不在开头时不会被读成标题页
        let mut later = vec![Element::new(ElementType::Action, "Wait.")];
        later.extend(elements);
        assert_eq!(
            write_screenplay(&screenplay(later)),
            "Wait.\n\nTITLE: BOB\nHello there.\n"
        );
    }

    #[test]
    fn ambiguous_action_lines_are_forced() {
        let s = screenplay(vec![
            Element::new(ElementType::Action, "Title: not a title page"),
            Element::new(ElementType::Action, "He reads.\nBANG\n\n# not a section"),
        ]);
        assert_eq!(
            write_screenplay(&s),
            "!Title: not a title page\n\nHe reads.\n!BANG\n!\n!# not a section\n"
        );
    }

    #[test]
    fn markers_for_other_types() {
        let s = screenplay(vec![
            Element::section(2, "Act"),
            Element::new(ElementType::Synopsis, "Things happen"),
            Element::new(ElementType::Centered, "THE END"),
            Element::new(ElementType::Transition, "CUT TO:"),
            Element::new(ElementType::Transition, "Fade out."),
            Element::new(ElementType::Lyrics, "la la"),
            Element::new(ElementType::PageBreak, ""),
            Element::new(ElementType::Boneyard, "old\nstuff"),
        ]);
        assert_eq!(
            write_screenplay(&s),
            "## Act\n\n= Things happen\n\n> THE END <\n\nCUT TO:\n\n> Fade out.\n\n~la la\n\n===\n\n/*\nold\nstuff\n*/\n"
        );
    }

    #[test]
    fn title_page_forms() {
        let s = Screenplay::new(
            None,
            vec![Element::new(ElementType::Action, "Go.")],
            vec![
                TitlePageEntry::new("Title", vec!["Foo".to_string()]),
                TitlePageEntry::new("Contact", vec!["Jane".to_string(), "555".to_string()]),
                TitlePageEntry::new("Notes", Vec::new()),
            ],
            false,
        );
        assert_eq!(
            write_screenplay(&s),
            "Title: Foo\nContact:\n    Jane\n    555\nNotes:\n\nGo.\n"
        );
    }
}
