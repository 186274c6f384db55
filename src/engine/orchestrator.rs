// ==========================================
// 护理排班系统 - 引擎编排器
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 2. 计算主流程
// 用途: 协调初排 / 修复 / 报表三个阶段的执行顺序
// ==========================================

use crate::domain::schedule::ScheduleGrid;
use crate::engine::assigner::InitialAssignmentEngine;
use crate::engine::context::RunContext;
use crate::engine::repair::{PassOutcome, RepairPipeline};
use crate::report::{ComplianceRow, NurseSummary, ReportBuilder, RosterRow};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// ScheduleResult - 排班结果
// ==========================================

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleResult {
    pub run_id: String,
    pub year: i32,
    pub month: u32,

    // 网格本体
    #[serde(skip)]
    pub grid: ScheduleGrid,

    // 报表输出
    pub roster_rows: Vec<RosterRow>,
    pub summaries: Vec<NurseSummary>,
    pub compliance: Vec<ComplianceRow>,

    // 修复环节明细
    pub pass_outcomes: Vec<PassOutcome>,
}

// ==========================================
// ScheduleOrchestrator - 引擎编排器
// ==========================================

pub struct ScheduleOrchestrator {
    assigner: InitialAssignmentEngine,
    pipeline: RepairPipeline,
    reporter: ReportBuilder,
}

impl ScheduleOrchestrator {
    pub fn new() -> Self {
        Self {
            assigner: InitialAssignmentEngine::new(),
            pipeline: RepairPipeline::new(),
            reporter: ReportBuilder::new(),
        }
    }

    /// 执行完整排班流程 (单月单病房)
    pub fn run(&self, ctx: &RunContext) -> ScheduleResult {
        let run_id = Uuid::new_v4().to_string();
        info!(
            %run_id,
            year = ctx.calendar.year(),
            month = ctx.calendar.month(),
            nurses = ctx.roster.len(),
            "开始执行排班流程"
        );

        // ==========================================
        // 步骤1: 初排 - 逐日逐班贪心填充
        // ==========================================
        debug!("步骤1: 执行初排");
        let mut grid = self.assigner.assign(ctx);

        // ==========================================
        // 步骤2: 修复管线 - 固定顺序执行各环节
        // ==========================================
        debug!("步骤2: 执行修复管线");
        let pass_outcomes = self.pipeline.run(ctx, &mut grid);
        let total_changes: usize = pass_outcomes.iter().map(|o| o.changes).sum();
        info!(total_changes, "修复管线完成");

        // ==========================================
        // 步骤3: 报表 - 花名册行 / 个人汇总 / 达标明细
        // ==========================================
        debug!("步骤3: 生成报表");
        let roster_rows = self.reporter.roster_rows(ctx, &grid);
        let summaries = self.reporter.nurse_summaries(ctx, &grid);
        let compliance = self.reporter.compliance(ctx, &grid);

        let under_count = compliance
            .iter()
            .filter(|row| row.status == crate::domain::types::ComplianceStatus::Under)
            .count();
        info!(%run_id, under_count, "排班流程完成");

        ScheduleResult {
            run_id,
            year: ctx.calendar.year(),
            month: ctx.calendar.month(),
            grid,
            roster_rows,
            summaries,
            compliance,
            pass_outcomes,
        }
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
    fn test_run_produces_full_result() {
        let ctx = create_test_context();
        let result = ScheduleOrchestrator::new().run(&ctx);

        assert!(!result.run_id.is_empty());
        assert_eq!(result.year, 2025);
        assert_eq!(result.month, 6);
        assert_eq!(result.roster_rows.len(), 20);
        assert_eq!(result.summaries.len(), 20);
        assert_eq!(result.compliance.len(), 30 * 3);
        assert!(!result.pass_outcomes.is_empty());
    }

    #[test]
    fn test_run_ids_are_unique() {
        let ctx = create_test_context();
        let orchestrator = ScheduleOrchestrator::new();
        let a = orchestrator.run(&ctx);
        let b = orchestrator.run(&ctx);
        assert_ne!(a.run_id, b.run_id);
    }
}
