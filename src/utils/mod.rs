pub mod fountain_constants;

pub use fountain_constants::FountainConstants;
use fountain_constants::{CHARACTER_EXTENSION, SCENE_HEADING_PREFIX};

/// 只包含空白字符的行
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// 对白中的两个以上空格的行表示保留空行，不结束对白块
pub fn is_intentional_blank(text: &str) -> bool {
    is_blank(text) && text.chars().count() > 1
}

/// 去掉角色名后面的 (V.O.) (CONT'D) 之类的扩展
pub fn trim_character_extension(text: &str) -> String {
    CHARACTER_EXTENSION.replace(text, "").trim().to_string()
}

/// 以大写字母开头且不含小写字母（忽略末尾括号扩展）
pub fn is_upper_name(text: &str) -> bool {
    let name = trim_character_extension(text);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => !name.chars().any(char::is_lowercase),
        _ => false,
    }
}

/// 形如 CUT TO: 的自然转场
pub fn is_transition_shape(text: &str) -> bool {
    text.ends_with("TO:") && !text.chars().any(char::is_lowercase)
}

pub fn has_scene_heading_prefix(text: &str) -> bool {
    SCENE_HEADING_PREFIX.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_names_ignore_extension() {
        assert!(is_upper_name("JOHN"));
        assert!(is_upper_name("JOHN (cont'd)"));
        assert!(is_upper_name("DR. O'MALLEY (V.O.)"));
        assert!(!is_upper_name("John"));
        assert!(!is_upper_name("123"));
        assert!(!is_upper_name("(V.O.)"));
    }

    #[test]
    fn intentional_blank_needs_two_spaces() {
        assert!(is_intentional_blank("  "));
        assert!(!is_intentional_blank(" "));
        assert!(!is_intentional_blank(""));
        assert!(!is_intentional_blank("  x"));
    }

    #[test]
    fn transition_shape() {
        assert!(is_transition_shape("CUT TO:"));
        assert!(!is_transition_shape("Cut to:"));
        assert!(!is_transition_shape("FADE OUT."));
    }
}
