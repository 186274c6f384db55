// ==========================================
// 护理排班系统 - 约束修复管线
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 8. 修复管线
// 职责: 在初排网格上按固定顺序执行各修复环节
// 红线: 每个环节必须守住 指定休 / 班距 / 资深占比 三条硬规则
// ==========================================

pub mod cross_shift;
pub mod guards;
pub mod halfmonth;
pub mod holiday_off;
pub mod monthly_off;
pub mod streaks;
pub mod weekly_rest;
pub mod work_stretch;

use crate::domain::schedule::ScheduleGrid;
use crate::engine::context::RunContext;
use serde::Serialize;
use tracing::{info, instrument};

/// 单个修复环节的执行结果
#[derive(Debug, Clone, Serialize)]
pub struct PassOutcome {
    pub pass_name: String,
    pub changes: usize,
}

/// 约束修复管线
///
/// 环节顺序固定, 不可重排: 先补人力缺口, 再安排休假,
/// 最后整形连续段。开关类环节按规则配置跳过。
#[derive(Debug, Default)]
pub struct RepairPipeline;

impl RepairPipeline {
    pub fn new() -> Self {
        Self
    }

    /// 执行全部修复环节, 返回各环节的变更数
    #[instrument(skip_all)]
    pub fn run(&self, ctx: &RunContext, grid: &mut ScheduleGrid) -> Vec<PassOutcome> {
        let mut outcomes = Vec::new();

        if ctx.rules.allow_cross_shift {
            Self::record(&mut outcomes, "cross_shift", cross_shift::apply(ctx, grid));
        }
        if ctx.rules.prefer_off_on_holiday {
            Self::record(&mut outcomes, "holiday_off", holiday_off::apply(ctx, grid));
        }
        Self::record(&mut outcomes, "weekly_rest", weekly_rest::apply(ctx, grid));
        Self::record(&mut outcomes, "monthly_off", monthly_off::apply(ctx, grid));
        Self::record(&mut outcomes, "halfmonth", halfmonth::apply(ctx, grid));
        Self::record(&mut outcomes, "work_stretch", work_stretch::apply(ctx, grid));
        Self::record(&mut outcomes, "streaks", streaks::apply(ctx, grid));
        Self::record(&mut outcomes, "hard_break", streaks::hard_break(ctx, grid));
        Self::record(&mut outcomes, "smoothing", work_stretch::smooth(ctx, grid));

        outcomes
    }

    fn record(outcomes: &mut Vec<PassOutcome>, pass_name: &str, changes: usize) {
        info!(pass = pass_name, changes, "修复环节完成");
        outcomes.push(PassOutcome {
            pass_name: pass_name.to_string(),
            changes,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::demand_config::DemandConfig;
    use crate::config::rule_config::RuleConfig;
    use crate::domain::nurse::Nurse;
    use crate::domain::preference::PreferenceStore;
    use crate::domain::types::Shift;
    use crate::engine::assigner::InitialAssignmentEngine;
    use std::collections::BTreeSet;

    fn create_test_context() -> RunContext {
        let mut roster = Vec::new();
        for i in 1..=8 {
            let mut nurse = Nurse::new(format!("D{:03}", i), format!("白{}", i), Shift::Day);
            nurse.is_senior = i <= 3;
            roster.push(nurse);
        }
        for i in 1..=6 {
            roster.push(Nurse::new(format!("E{:03}", i), format!("小{}", i), Shift::Evening));
        }
        for i in 1..=6 {
            roster.push(Nurse::new(format!("N{:03}", i), format!("大{}", i), Shift::Night));
        }

        let demand_cfg = DemandConfig {
            beds: 24,
            ..DemandConfig::default()
        };
        RunContext::assemble(
            2025,
            6,
            roster,
            PreferenceStore::new(),
            BTreeSet::new(),
            &demand_cfg,
            RuleConfig::default(),
        )
    }

    #[test]
    fn test_pipeline_runs_all_passes_in_order() {
        let ctx = create_test_context();
        let mut grid = InitialAssignmentEngine::new().assign(&ctx);

        let outcomes = RepairPipeline::new().run(&ctx, &mut grid);
        let names: Vec<&str> = outcomes.iter().map(|o| o.pass_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "cross_shift",
                "holiday_off",
                "weekly_rest",
                "monthly_off",
                "halfmonth",
                "work_stretch",
                "streaks",
                "hard_break",
                "smoothing",
            ]
        );
    }

    #[test]
    fn test_pipeline_skips_disabled_passes() {
        let mut ctx = create_test_context();
        ctx.rules.allow_cross_shift = false;
        ctx.rules.prefer_off_on_holiday = false;
        let mut grid = InitialAssignmentEngine::new().assign(&ctx);

        let outcomes = RepairPipeline::new().run(&ctx, &mut grid);
        assert!(!outcomes.iter().any(|o| o.pass_name == "cross_shift"));
        assert!(!outcomes.iter().any(|o| o.pass_name == "holiday_off"));
        assert_eq!(outcomes.len(), 7);
    }

    #[test]
    fn test_pipeline_preserves_must_off_pins() {
        let mut roster = Vec::new();
        for i in 1..=8 {
            let mut nurse = Nurse::new(format!("D{:03}", i), format!("白{}", i), Shift::Day);
            nurse.is_senior = i <= 3;
            roster.push(nurse);
        }
        let mut prefs = PreferenceStore::new();
        prefs.add(crate::domain::preference::PreferenceEntry {
            nurse_id: "D005".to_string(),
            day: 10,
            kind: crate::domain::types::PrefKind::Must,
        });

        let demand_cfg = DemandConfig {
            beds: 24,
            ..DemandConfig::default()
        };
        let ctx = RunContext::assemble(
            2025,
            6,
            roster,
            prefs,
            BTreeSet::new(),
            &demand_cfg,
            RuleConfig::default(),
        );
        let mut grid = InitialAssignmentEngine::new().assign(&ctx);
        RepairPipeline::new().run(&ctx, &mut grid);

        assert_eq!(
            grid.get_by_id("D005", 10),
            Some(crate::domain::types::ShiftCode::O)
        );
    }
}
