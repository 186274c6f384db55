// ==========================================
// 护理排班系统 - 排班规则配置
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 11. 配置项全集
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// 排班规则参数
///
/// 控制修复管线的目标值与开关。最低月休为尽力而为:
/// 当需求吃紧导致无可行转换时, 管线就地停止,
/// 缺口透过个人汇总报表呈现, 不视为错误。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// 每人每月最低休假天数
    pub min_monthly_off: u32,
    /// 每人每月目标休假天数
    pub target_monthly_off: u32,
    /// 是否执行休假天数平衡 (最多与最少差距压到 1 以内)
    pub balance_off_days: bool,
    /// 是否允许跨班别支援调度
    pub allow_cross_shift: bool,
    /// 是否优先在假日安排休假
    pub prefer_off_on_holiday: bool,
    /// 最短连续工作天数 (过短工作段会被平滑)
    pub min_work_stretch: u32,
    /// 最长连续工作天数
    pub max_work_streak: u32,
    /// 最长连续休假天数
    pub max_off_streak: u32,
    /// 上半月 (1-15 日) 最低休假天数
    pub first_half_off_floor: u32,
    /// 下半月 (16 日以后) 最低休假天数
    pub second_half_off_floor: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            min_monthly_off: 8,
            target_monthly_off: 10,
            balance_off_days: true,
            allow_cross_shift: true,
            prefer_off_on_holiday: true,
            min_work_stretch: 3,
            max_work_streak: 5,
            max_off_streak: 2,
            first_half_off_floor: 5,
            second_half_off_floor: 3,
        }
    }
}

impl RuleConfig {
    /// 装载时校验
    pub fn validate(&self) -> ConfigResult<()> {
        if self.target_monthly_off < self.min_monthly_off {
            return Err(ConfigError::InvalidRule(format!(
                "target_monthly_off ({}) 小于 min_monthly_off ({})",
                self.target_monthly_off, self.min_monthly_off
            )));
        }
        if self.max_work_streak == 0 {
            return Err(ConfigError::InvalidRule(
                "max_work_streak 不得为 0".to_string(),
            ));
        }
        if self.max_off_streak == 0 {
            return Err(ConfigError::InvalidRule(
                "max_off_streak 不得为 0".to_string(),
            ));
        }
        Ok(())
    }
}
