use thiserror::Error;

/// 解析本身不会失败；错误只出现在文件读写、JSON 和配置这些边界上
#[derive(Error, Debug)]
pub enum FountainError {
    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("无效的配置: {0}")]
    InvalidConfig(String),
}

pub type FountainResult<T> = Result<T, FountainError>;
