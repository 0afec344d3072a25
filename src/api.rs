//! 文件级 API
//!
//! 解析和回写本身是纯函数，这里只负责读写文件和 JSON 输出。

use std::fs;
use std::path::Path;
use crate::error::FountainResult;
use crate::models::{Conf, OutlineNode, Screenplay, ScreenplayProperties};
use crate::parser::FountainParser;
use crate::writer::{MarkupWriter, WriterOptions};

/// 读取并解析 Fountain 文件，`filename` 取文件名
pub fn parse_file(path: impl AsRef<Path>, conf: &Conf) -> FountainResult<Screenplay> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    tracing::info!("解析文件: {}", path.display());

    let screenplay = FountainParser::with_conf(conf.clone()).parse(&content);
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    Ok(screenplay.with_filename(filename))
}

/// 把剧本写回 Fountain 文件
pub fn write_file(
    path: impl AsRef<Path>,
    screenplay: &Screenplay,
    options: WriterOptions,
) -> FountainResult<()> {
    let text = MarkupWriter::new(options).write(screenplay);
    fs::write(path, text)?;
    Ok(())
}

pub fn elements_json(screenplay: &Screenplay) -> FountainResult<String> {
    Ok(serde_json::to_string_pretty(screenplay)?)
}

pub fn outline_json(outline: &OutlineNode) -> FountainResult<String> {
    Ok(serde_json::to_string_pretty(outline)?)
}

pub fn properties_json(screenplay: &Screenplay, conf: &Conf) -> FountainResult<String> {
    let props = ScreenplayProperties::from_screenplay(screenplay, conf);
    Ok(serde_json::to_string_pretty(&props)?)
}

/// 从 JSON 恢复剧本；场景标题的地点信息会重新计算
pub fn screenplay_from_json(json: &str) -> FountainResult<Screenplay> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementType;

    #[test]
    fn json_round_trip_recomputes_location() {
        let screenplay = FountainParser::new().parse("INT. HOUSE - DAY\n\nHe waits.");
        let json = elements_json(&screenplay).unwrap();
        let restored = screenplay_from_json(&json).unwrap();

        assert_eq!(restored, screenplay);
        let heading = &restored.elements()[0];
        assert_eq!(heading.element_type(), ElementType::SceneHeading);
        assert_eq!(heading.location().map(|l| l.place.as_str()), Some("HOUSE"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = parse_file("/definitely/not/here.fountain", &Conf::default()).unwrap_err();
        assert!(matches!(err, crate::error::FountainError::IoError(_)));
    }
}
