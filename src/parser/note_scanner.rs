//! 注释 `[[ ]]` 与 boneyard `/* */` 的预处理
//!
//! 注释直接丢弃；行首开始的 boneyard 被提取成独立的行，之后成为 Boneyard 元素；
//! 行中间开始的 boneyard 与注释一样被丢弃。两者都可以跨行，未闭合时一直延续到文末。
//! boneyard 闭合后同一行剩下的文本作为下一行保留，boneyard 本身算作块边界。

/// 预处理后的行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine {
    Text(String),
    Boneyard(String),
}

impl RawLine {
    /// 空行和 boneyard 都是块的边界
    pub fn is_block_boundary(&self) -> bool {
        match self {
            RawLine::Text(text) => text.trim().is_empty(),
            RawLine::Boneyard(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawLine::Text(text) => Some(text),
            RawLine::Boneyard(_) => None,
        }
    }
}

enum ScanState {
    Normal,
    Comment,
    InlineBoneyard,
    Boneyard(String),
}

const NOTE_BEGIN: &str = "[[";
const NOTE_END: &str = "]]";
const BONEYARD_BEGIN: &str = "/*";
const BONEYARD_END: &str = "*/";

/// 逐行扫描，去掉注释并提取 boneyard
pub fn scan_notes<'a, I>(lines: I) -> Vec<RawLine>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = Vec::new();
    let mut state = ScanState::Normal;

    for line in lines {
        let mut kept = String::new();
        // 本行是否有内容被注释或 boneyard 吃掉
        let mut consumed = !matches!(state, ScanState::Normal);
        let mut rest = line;

        loop {
            match &mut state {
                ScanState::Normal => {
                    let Some((idx, marker)) = next_marker(rest) else {
                        kept.push_str(rest);
                        break;
                    };
                    kept.push_str(&rest[..idx]);
                    rest = &rest[idx + marker.len()..];
                    consumed = true;

                    state = if marker == NOTE_BEGIN {
                        ScanState::Comment
                    } else if kept.trim().is_empty() {
                        kept.clear();
                        ScanState::Boneyard(String::new())
                    } else {
                        ScanState::InlineBoneyard
                    };
                }
                ScanState::Comment => match rest.find(NOTE_END) {
                    Some(idx) => {
                        rest = &rest[idx + NOTE_END.len()..];
                        state = ScanState::Normal;
                    }
                    None => break,
                },
                ScanState::InlineBoneyard => match rest.find(BONEYARD_END) {
                    Some(idx) => {
                        rest = &rest[idx + BONEYARD_END.len()..];
                        state = ScanState::Normal;
                    }
                    None => break,
                },
                ScanState::Boneyard(buffer) => match rest.find(BONEYARD_END) {
                    Some(idx) => {
                        buffer.push_str(&rest[..idx]);
                        out.push(RawLine::Boneyard(buffer.trim().to_string()));
                        rest = &rest[idx + BONEYARD_END.len()..];
                        state = ScanState::Normal;
                    }
                    None => {
                        buffer.push_str(rest);
                        buffer.push('\n');
                        break;
                    }
                },
            }
        }

        if !consumed {
            out.push(RawLine::Text(kept));
        } else if !kept.trim().is_empty() {
            // 被注释掉一部分的行保留剩余内容；整行都是注释的行直接消失，不算空行
            out.push(RawLine::Text(kept.trim_end().to_string()));
        }
    }

    if let ScanState::Boneyard(buffer) = state {
        out.push(RawLine::Boneyard(buffer.trim().to_string()));
    }

    out
}

fn next_marker(text: &str) -> Option<(usize, &'static str)> {
    let note = text.find(NOTE_BEGIN).map(|idx| (idx, NOTE_BEGIN));
    let bone = text.find(BONEYARD_BEGIN).map(|idx| (idx, BONEYARD_BEGIN));
    match (note, bone) {
        (Some(n), Some(b)) => Some(if n.0 <= b.0 { n } else { b }),
        (n, b) => n.or(b),
    }
}
