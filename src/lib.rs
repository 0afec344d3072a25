pub mod models;
pub mod utils;
pub mod parser;
pub mod outline;
pub mod writer;
pub mod error;
pub mod api;

pub use models::{
    Conf,
    Element,
    ElementType,
    Lighting,
    OutlineKind,
    OutlineNode,
    SceneLocation,
    SceneProperties,
    Screenplay,
    ScreenplayProperties,
    TitlePageEntry
};

pub use parser::{
    analyze_location,
    extract_title_page,
    FountainParser,
    LocationAnalyzer
};

pub use outline::{extract_outline, format_outline};
pub use writer::{write_screenplay, MarkupWriter, WriterOptions};
pub use error::{FountainError, FountainResult};

/// 使用默认配置解析Fountain格式文本
///
/// # Arguments
///
/// * `script` - Fountain格式的剧本文本
///
/// # Returns
///
/// 剧本对象，解析不会失败
pub fn parse(script: &str) -> Screenplay {
    FountainParser::new().parse(script)
}

/// 使用指定配置解析
pub fn parse_with(script: &str, config: &Conf) -> Screenplay {
    FountainParser::with_conf(config.clone()).parse(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let result = parse("INT. ROOM - DAY\n\nHello, world!");
        assert_eq!(result.elements().len(), 2);
        assert_eq!(result.elements()[0].element_type(), ElementType::SceneHeading);
    }

    #[test]
    fn parse_with_extra_times() {
        let config = Conf {
            extra_times_of_day: vec!["GOLDEN HOUR".to_string()],
            ..Conf::default()
        };
        let result = parse_with("EXT. FIELD - GOLDEN HOUR\n\nWind.", &config);
        let time = result.elements()[0]
            .location()
            .and_then(|location| location.time_of_day.clone());
        assert_eq!(time.as_deref(), Some("GOLDEN HOUR"));
    }
}
