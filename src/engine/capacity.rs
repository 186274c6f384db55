// ==========================================
// 护理排班系统 - 人力单位折算引擎
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 6. 人力单位折算
// 红线: 新进人员按护病比折算, 不得折算为 0 或负值
// ==========================================
// 职责: 把一次排班折算为对需求的人力单位贡献
// 输入: 花名册行 + 班别
// 输出: 人力单位 (标准 1.0, 新进为比值商)
// ==========================================

use crate::config::demand_config::DemandConfig;
use crate::domain::nurse::Nurse;
use crate::domain::types::Shift;

/// 折算下限, 挡掉比值配置异常导致的 0/负贡献
const UNIT_FLOOR: f64 = 1e-6;

/// 人力单位折算引擎
#[derive(Debug, Clone)]
pub struct CapacityModel {
    junior_ratio_avg: f64,
    shift_ratio_avg: [f64; 3],
}

impl CapacityModel {
    /// 从需求配置预计算各班别比值中点
    pub fn from_config(cfg: &DemandConfig) -> Self {
        Self {
            junior_ratio_avg: cfg.junior_ratio.midpoint(),
            shift_ratio_avg: [
                cfg.day_ratio.midpoint(),
                cfg.evening_ratio.midpoint(),
                cfg.night_ratio.midpoint(),
            ],
        }
    }

    /// 某人在某班别的人力单位贡献
    ///
    /// 标准人员恒为 1.0; 新进人员为
    /// `junior_ratio_avg / shift_ratio_avg`, 并以下限截断。
    pub fn unit(&self, nurse: &Nurse, shift: Shift) -> f64 {
        if !nurse.is_junior {
            return 1.0;
        }
        let avg = self.shift_ratio_avg[shift.index()];
        if avg <= 0.0 {
            return UNIT_FLOOR;
        }
        (self.junior_ratio_avg / avg).max(UNIT_FLOOR)
    }
}

impl Default for CapacityModel {
    fn default() -> Self {
        Self::from_config(&DemandConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::demand_config::RatioBand;

    fn create_test_nurse(is_junior: bool) -> Nurse {
        let mut nurse = Nurse::new("N001", "测试", Shift::Day);
        nurse.is_junior = is_junior;
        nurse
    }

    #[test]
    fn test_standard_nurse_is_one_unit() {
        let model = CapacityModel::default();
        let nurse = create_test_nurse(false);
        for shift in Shift::ALL {
            assert_eq!(model.unit(&nurse, shift), 1.0);
        }
    }

    #[test]
    fn test_junior_unit_day_shift() {
        // 新进比值带 4-5 (中点 4.5), 白班比值带 6-7 (中点 6.5)
        let model = CapacityModel::default();
        let nurse = create_test_nurse(true);
        let unit = model.unit(&nurse, Shift::Day);
        assert!((unit - 4.5 / 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_junior_unit_varies_by_shift() {
        let model = CapacityModel::default();
        let nurse = create_test_nurse(true);
        // 大夜比值带 11-13 (中点 12.0)
        let unit = model.unit(&nurse, Shift::Night);
        assert!((unit - 4.5 / 12.0).abs() < 1e-9);
        assert!(model.unit(&nurse, Shift::Day) > unit);
    }

    #[test]
    fn test_unit_floor_guards_degenerate_ratio() {
        let cfg = DemandConfig {
            junior_ratio: RatioBand::new(1, 1),
            day_ratio: RatioBand::new(1000000, 1000000),
            ..DemandConfig::default()
        };
        let model = CapacityModel::from_config(&cfg);
        let nurse = create_test_nurse(true);
        assert!(model.unit(&nurse, Shift::Day) >= UNIT_FLOOR);
    }
}
