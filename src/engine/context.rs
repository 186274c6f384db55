// ==========================================
// 护理排班系统 - 运行上下文
// ==========================================
// 依据: Nursing_Roster_Master_Spec.md - PART B 运行模型
// 红线: 引擎不得依赖环境全局状态, 输入全部显式传入
// ==========================================

use crate::calendar::MonthCalendar;
use crate::config::demand_config::DemandConfig;
use crate::config::rule_config::RuleConfig;
use crate::domain::demand::DemandTable;
use crate::domain::nurse::Nurse;
use crate::domain::preference::PreferenceStore;
use crate::engine::capacity::CapacityModel;
use crate::engine::demand_builder::DemandBuilder;
use std::collections::BTreeSet;
use tracing::info;

/// 一次排班运行的全部输入
///
/// 装配后各引擎只读共享; 唯一的可变状态是班表网格,
/// 由当次运行独占。
#[derive(Debug, Clone)]
pub struct RunContext {
    pub calendar: MonthCalendar,
    pub roster: Vec<Nurse>,
    pub preferences: PreferenceStore,
    pub demand: DemandTable,
    pub capacity: CapacityModel,
    pub rules: RuleConfig,
}

impl RunContext {
    /// 从输入数据装配运行上下文
    ///
    /// # 参数
    /// - `year`/`month`: 目标月份
    /// - `roster`: 花名册 (已由导入层校验)
    /// - `preferences`: 当月休假申请
    /// - `holidays`: 国定假日 (当月第几天)
    /// - `demand_cfg`: 人力需求参数
    /// - `rules`: 排班规则参数
    pub fn assemble(
        year: i32,
        month: u32,
        roster: Vec<Nurse>,
        preferences: PreferenceStore,
        holidays: BTreeSet<u32>,
        demand_cfg: &DemandConfig,
        rules: RuleConfig,
    ) -> Self {
        let calendar = MonthCalendar::new(year, month, holidays);
        let demand = DemandBuilder::new().build(demand_cfg, &calendar);
        let capacity = CapacityModel::from_config(demand_cfg);

        info!(
            year,
            month,
            days = calendar.days(),
            nurses = roster.len(),
            preferences = preferences.len(),
            "运行上下文装配完成"
        );

        Self {
            calendar,
            roster,
            preferences,
            demand,
            capacity,
            rules,
        }
    }

    /// 某人是否指定休某日
    pub fn is_must_off(&self, nurse_idx: usize, day: u32) -> bool {
        self.preferences
            .is_must_off(&self.roster[nurse_idx].nurse_id, day)
    }

    /// 某人是否希望休某日
    pub fn is_wish_off(&self, nurse_idx: usize, day: u32) -> bool {
        self.preferences
            .is_wish_off(&self.roster[nurse_idx].nurse_id, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preference::PreferenceEntry;
    use crate::domain::types::{PrefKind, Shift};

    #[test]
    fn test_assemble_builds_demand_and_calendar() {
        let roster = vec![Nurse::new("N001", "甲", Shift::Day)];
        let mut prefs = PreferenceStore::new();
        prefs.add(PreferenceEntry {
            nurse_id: "N001".to_string(),
            day: 5,
            kind: PrefKind::Must,
        });

        let ctx = RunContext::assemble(
            2025,
            6,
            roster,
            prefs,
            BTreeSet::new(),
            &DemandConfig::default(),
            RuleConfig::default(),
        );

        assert_eq!(ctx.calendar.days(), 30);
        assert_eq!(ctx.demand.days(), 30);
        assert!(ctx.is_must_off(0, 5));
        assert!(!ctx.is_wish_off(0, 5));
    }
}
