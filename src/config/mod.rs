// ==========================================
// 护理排班系统 - 配置层
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 11. 配置项全集
// ==========================================
// 职责: 排班规则与人力需求参数的装载/快照
// 存储: JSON 文件 (config.json)
// ==========================================

pub mod demand_config;
pub mod error;
pub mod rule_config;

pub use demand_config::{DemandConfig, ExtraUnitRow, RatioBand};
pub use error::{ConfigError, ConfigResult};
pub use rule_config::RuleConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 配置快照: 一次排班运行使用的全部参数
///
/// 随结果一并导出, 让任何一份班表都能追溯到生成时的参数。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSnapshot {
    pub rules: RuleConfig,
    pub demand: DemandConfig,
}

impl ConfigSnapshot {
    /// 从 JSON 文件装载并校验
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: ConfigSnapshot = serde_json::from_str(&raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// 写出 JSON 快照
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.rules.validate()?;
        self.demand.validate()?;
        Ok(())
    }
}
