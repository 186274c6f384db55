// ==========================================
// 护理排班系统 - 人力需求配置
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 4. Demand 模型
// 红线: 比值必须为正, min <= max
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{FacilityTier, Shift};
use serde::{Deserialize, Serialize};

/// 护病比区间 (病人数/护理人员, min 为配置上最宽松的一端)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioBand {
    pub min: u32,
    pub max: u32,
}

impl RatioBand {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// 区间中点 (人力单位折算用)
    pub fn midpoint(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }
}

/// 单日手动加派人力 (同时加到 min 与 max)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtraUnitRow {
    pub day: u32,
    pub day_shift: u32,
    pub evening_shift: u32,
    pub night_shift: u32,
}

impl ExtraUnitRow {
    pub fn for_shift(&self, shift: Shift) -> u32 {
        match shift {
            Shift::Day => self.day_shift,
            Shift::Evening => self.evening_shift,
            Shift::Night => self.night_shift,
        }
    }
}

/// 人力需求参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandConfig {
    /// 病床总数
    pub beds: u32,
    /// 各班别护病比区间
    pub day_ratio: RatioBand,
    pub evening_ratio: RatioBand,
    pub night_ratio: RatioBand,
    /// 新进人员护病比区间 (折算人力单位的分子)
    pub junior_ratio: RatioBand,
    /// 假日人力放大系数 (>= 1.0, None 表示不放大)
    pub holiday_factor: Option<f64>,
    /// 手动加派表
    pub extra_units: Vec<ExtraUnitRow>,
    /// 评鉴层级 (选定法定护病比下限表, None 表示不启用)
    pub facility_tier: Option<FacilityTier>,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            beds: 120,
            day_ratio: RatioBand::new(6, 7),
            evening_ratio: RatioBand::new(9, 11),
            night_ratio: RatioBand::new(11, 13),
            junior_ratio: RatioBand::new(4, 5),
            holiday_factor: None,
            extra_units: Vec::new(),
            facility_tier: None,
        }
    }
}

impl DemandConfig {
    pub fn ratio_band(&self, shift: Shift) -> &RatioBand {
        match shift {
            Shift::Day => &self.day_ratio,
            Shift::Evening => &self.evening_ratio,
            Shift::Night => &self.night_ratio,
        }
    }

    /// 某日的手动加派 (无配置视为 0)
    pub fn extra_for(&self, day: u32, shift: Shift) -> u32 {
        self.extra_units
            .iter()
            .filter(|row| row.day == day)
            .map(|row| row.for_shift(shift))
            .sum()
    }

    /// 装载时校验
    pub fn validate(&self) -> ConfigResult<()> {
        if self.beds == 0 {
            return Err(ConfigError::InvalidBedCount("床位数不得为 0".to_string()));
        }
        for (name, band) in [
            ("day_ratio", &self.day_ratio),
            ("evening_ratio", &self.evening_ratio),
            ("night_ratio", &self.night_ratio),
            ("junior_ratio", &self.junior_ratio),
        ] {
            if band.min == 0 || band.max == 0 {
                return Err(ConfigError::InvalidRatioBand(format!(
                    "{} 含 0: {}-{}",
                    name, band.min, band.max
                )));
            }
            if band.min > band.max {
                return Err(ConfigError::InvalidRatioBand(format!(
                    "{} min > max: {}-{}",
                    name, band.min, band.max
                )));
            }
        }
        if let Some(factor) = self.holiday_factor {
            if !(factor >= 1.0) {
                return Err(ConfigError::InvalidHolidayFactor(factor));
            }
        }
        Ok(())
    }
}
