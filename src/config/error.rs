// ==========================================
// 护理排班系统 - 配置层错误类型
// ==========================================
// 红线: 配置错误在装载时报出, 引擎内部不再抛错
// ==========================================

use thiserror::Error;

/// 配置层错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 护病比区间非法 (min > max 或含 0)
    #[error("护病比区间非法: {0}")]
    InvalidRatioBand(String),

    /// 假日系数非法 (必须 >= 1.0)
    #[error("假日系数非法: {0}")]
    InvalidHolidayFactor(f64),

    /// 床位数非法
    #[error("床位数非法: {0}")]
    InvalidBedCount(String),

    /// 规则参数非法
    #[error("规则参数非法: {0}")]
    InvalidRule(String),

    /// JSON 序列化/反序列化失败
    #[error("配置序列化失败: {0}")]
    Serde(#[from] serde_json::Error),

    /// IO 错误
    #[error("配置文件 IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 配置层统一 Result 类型
pub type ConfigResult<T> = Result<T, ConfigError>;
