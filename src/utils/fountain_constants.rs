use lazy_static::lazy_static;
use regex::Regex;

pub struct FountainConstants;

impl FountainConstants {
    /// 默认的时间词表（大写比较）
    pub fn times_of_day() -> &'static [&'static str] {
        &[
            "DAY",
            "NIGHT",
            "MORNING",
            "AFTERNOON",
            "EVENING",
            "DAWN",
            "DUSK",
            "SUNRISE",
            "SUNSET",
            "NOON",
            "MIDNIGHT",
            "TWILIGHT",
            "DAYBREAK",
            "NIGHTFALL",
            "MAGIC HOUR",
            "EARLY MORNING",
            "LATE NIGHT",
            "LATER",
            "MOMENTS LATER",
            "LATER THAT DAY",
            "LATER THAT NIGHT",
            "CONTINUOUS",
            "SAME",
            "SAME TIME",
            "SIMULTANEOUS",
            "日",
            "夜",
            "晨",
            "清晨",
            "黄昏",
            "傍晚",
            "深夜",
        ]
    }

    /// 已知的标题页 key（小写比较）
    pub fn title_page_keys() -> &'static [&'static str] {
        &[
            "title",
            "credit",
            "author",
            "authors",
            "source",
            "notes",
            "draft date",
            "date",
            "watermark",
            "contact",
            "contact info",
            "revision",
            "copyright",
            "font",
            "font italic",
            "font bold",
            "font bold italic",
            "metadata",
            "tl",
            "tc",
            "tr",
            "cc",
            "br",
            "bl",
            "header",
            "footer",
        ]
    }

    /// 标题页位置 key 保持全大写
    pub fn title_page_position_keys() -> &'static [&'static str] {
        &["tl", "tc", "tr", "cc", "br", "bl"]
    }
}

lazy_static! {
    // 场景标题前缀：INT. EXT. INT./EXT. INT/EXT. I/E.，句点也可以是空格
    pub static ref SCENE_HEADING_PREFIX: Regex =
        Regex::new(r"(?i)^(?:int\.?/ext|i/e|int|ext)[. ]").unwrap();

    // 强制场景标题：开头的单个点号，不能是 ".."
    pub static ref FORCED_SCENE_HEADING: Regex = Regex::new(r"^\.(?:[^.]|$)").unwrap();

    // 行尾的场景编号 #12A#
    pub static ref SCENE_NUMBER: Regex = Regex::new(r"\s*#([^#\s]+)#$").unwrap();

    // 地点分析用的内外景前缀，group 1 是前缀本身
    pub static ref LIGHTING: Regex =
        Regex::new(r"(?i)^(int\.?/ext|i/e|int|ext)(?:\.|\s|$)\s*").unwrap();

    // 括号修饰，例如 (1995) (FLASHBACK)
    pub static ref MODIFIER: Regex = Regex::new(r"\(([^()]*)\)").unwrap();

    // 角色名后的扩展，例如 (V.O.) (CONT'D)，兼容全角括号
    pub static ref CHARACTER_EXTENSION: Regex =
        Regex::new(r"(?:\s*(?:\([^()]*\)|（[^（）]*）))+\s*$").unwrap();

    // 分页符
    pub static ref PAGE_BREAK: Regex = Regex::new(r"^={3,}$").unwrap();

    // 标题页 key 行，key 必须顶格
    pub static ref TITLE_PAGE_KEY: Regex =
        Regex::new(r"^(\p{L}[\p{L}\p{N} _]*?)[ \t]*:(.*)$").unwrap();

    // 空白、标点和符号，不计入朗读字数
    pub static ref NON_SPOKEN: Regex = Regex::new(r"\s|\p{P}|\p{S}").unwrap();

    // 长标点（句号问号等）和短标点（逗号顿号等）
    pub static ref PAUSE_PUNCTUATION: Regex =
        Regex::new(r"([.?!:。？！：])|([,，;；、])").unwrap();
}
