use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::models::conf::Conf;
use crate::models::element::ElementType;
use crate::models::location::SceneLocation;
use crate::models::screenplay::Screenplay;
use crate::utils::fountain_constants::{NON_SPOKEN, PAUSE_PUNCTUATION};
use crate::utils::trim_character_extension;

/// 单场统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneProperties {
    /// 场景标题在元素列表中的下标
    pub index: usize,
    /// 记录的场景编号，没有时为顺序编号
    pub number: String,
    pub heading: String,
    pub location: Option<SceneLocation>,
    pub action_seconds: f64,
    pub dialogue_seconds: f64,
}

impl SceneProperties {
    pub fn total_seconds(&self) -> f64 {
        self.action_seconds + self.dialogue_seconds
    }
}

/// 剧本统计：场景、角色出场、地点以及时长预估
///
/// 角色和地点映射到场次序号，0 表示第一场之前。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenplayProperties {
    pub scenes: Vec<SceneProperties>,
    pub characters: BTreeMap<String, Vec<usize>>,
    pub locations: BTreeMap<String, Vec<usize>>,
    pub length_action: f64,
    pub length_dialogue: f64,
}

impl ScreenplayProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// 统计剧本，标题页 `Metadata:` 中的时长参数优先于 `conf`
    pub fn from_screenplay(screenplay: &Screenplay, conf: &Conf) -> Self {
        let conf = conf.with_title_page_metadata(screenplay.title_page());
        let mut props = Self::new();
        let mut ordinal = 0;

        for (index, element) in screenplay.elements().iter().enumerate() {
            match element.element_type() {
                ElementType::SceneHeading => {
                    ordinal += 1;
                    let location = element.location().cloned();
                    if let Some(location) = &location {
                        let place = location.place.to_uppercase();
                        if !place.is_empty() {
                            push_ordinal(props.locations.entry(place).or_default(), ordinal);
                        }
                    }
                    props.scenes.push(SceneProperties {
                        index,
                        number: element
                            .scene_number()
                            .map_or_else(|| ordinal.to_string(), str::to_string),
                        heading: element.text().to_string(),
                        location,
                        action_seconds: 0.0,
                        dialogue_seconds: 0.0,
                    });
                }
                ElementType::Character => {
                    let name = trim_character_extension(element.text());
                    if !name.is_empty() {
                        push_ordinal(props.characters.entry(name).or_default(), ordinal);
                    }
                }
                ElementType::Action => {
                    // 第一场之前的内容不计时
                    if let Some(scene) = props.scenes.last_mut() {
                        let seconds = action_duration(element.text(), conf.action_sec_per_char);
                        scene.action_seconds += seconds;
                        props.length_action += seconds;
                    }
                }
                ElementType::Dialogue => {
                    if let Some(scene) = props.scenes.last_mut() {
                        let seconds = dialogue_duration(element.text(), &conf);
                        scene.dialogue_seconds += seconds;
                        props.length_dialogue += seconds;
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(
            "统计: {} 场, {} 个角色, {} 个地点",
            props.scenes.len(),
            props.characters.len(),
            props.locations.len()
        );
        props
    }
}

fn push_ordinal(ordinals: &mut Vec<usize>, ordinal: usize) {
    if ordinals.last() != Some(&ordinal) {
        ordinals.push(ordinal);
    }
}

// 去除空格、标点和特殊字符后的字数
fn spoken_chars(text: &str) -> usize {
    NON_SPOKEN.replace_all(text, "").chars().count()
}

/// 动作描述时长：每字符固定秒数
pub fn action_duration(text: &str, sec_per_char: f64) -> f64 {
    spoken_chars(text) as f64 * sec_per_char
}

/// 对白时长：每字符秒数，再加上长短标点的停顿
pub fn dialogue_duration(text: &str, conf: &Conf) -> f64 {
    let mut duration = spoken_chars(text) as f64 * conf.dial_sec_per_char;

    for caps in PAUSE_PUNCTUATION.captures_iter(text) {
        if caps.get(1).is_some() {
            duration += conf.dial_sec_per_punc_long;
        } else if caps.get(2).is_some() {
            duration += conf.dial_sec_per_punc_short;
        }
    }

    duration
}
