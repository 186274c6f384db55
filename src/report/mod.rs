// ==========================================
// 护理排班系统 - 结果报表
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 9. 输出报表
// 职责: 把班表网格整理成花名册行 / 个人汇总 / 达标明细
// 红线: 报表只读网格, 不得回写
// ==========================================

use crate::domain::schedule::ScheduleGrid;
use crate::domain::types::{ComplianceStatus, Shift, ShiftCode};
use crate::engine::context::RunContext;
use crate::engine::repair::guards;
use serde::Serialize;
use tracing::instrument;

/// 单班时数 (三班制均为 8 小时)
const HOURS_PER_SHIFT: u32 = 8;

/// 班表行 (一人一行, 按日展开)
#[derive(Debug, Clone, Serialize)]
pub struct RosterRow {
    pub nurse_id: String,
    pub name: String,
    pub shift: Shift,
    pub is_senior: bool,
    pub is_junior: bool,
    /// 下标 0 即当月 1 日
    pub codes: Vec<ShiftCode>,
}

/// 个人月度汇总
#[derive(Debug, Clone, Serialize)]
pub struct NurseSummary {
    pub nurse_id: String,
    pub name: String,
    pub work_days: u32,
    pub off_days: u32,
    pub work_hours: u32,
    pub holiday_off_days: u32,
}

/// 单日单班的人力达标明细
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceRow {
    pub day: u32,
    pub shift: Shift,
    pub actual_units: f64,
    pub min_units: f64,
    pub max_units: f64,
    pub status: ComplianceStatus,
}

/// 结果报表生成器
#[derive(Debug, Default)]
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 班表行: 班别升序, 资深在前, 新进在后, 编号保序
    #[instrument(skip_all)]
    pub fn roster_rows(&self, ctx: &RunContext, grid: &ScheduleGrid) -> Vec<RosterRow> {
        let days = ctx.calendar.days();
        let mut rows: Vec<RosterRow> = ctx
            .roster
            .iter()
            .enumerate()
            .map(|(idx, nurse)| RosterRow {
                nurse_id: nurse.nurse_id.clone(),
                name: nurse.name.clone(),
                shift: nurse.shift,
                is_senior: nurse.is_senior,
                is_junior: nurse.is_junior,
                codes: (1..=days)
                    .map(|day| grid.get(idx, day).unwrap_or(ShiftCode::O))
                    .collect(),
            })
            .collect();

        rows.sort_by(|a, b| {
            a.shift
                .cmp(&b.shift)
                .then_with(|| b.is_senior.cmp(&a.is_senior))
                .then_with(|| a.is_junior.cmp(&b.is_junior))
                .then_with(|| a.nurse_id.cmp(&b.nurse_id))
        });
        rows
    }

    /// 个人汇总: 工作/休假天数, 时数, 假日休假数
    #[instrument(skip_all)]
    pub fn nurse_summaries(&self, ctx: &RunContext, grid: &ScheduleGrid) -> Vec<NurseSummary> {
        let days = ctx.calendar.days();
        ctx.roster
            .iter()
            .enumerate()
            .map(|(idx, nurse)| {
                let off_days = grid.count_code(idx, ShiftCode::O);
                let work_days = days - off_days;
                let holiday_off_days = ctx
                    .calendar
                    .holiday_days()
                    .into_iter()
                    .filter(|&day| grid.get(idx, day) == Some(ShiftCode::O))
                    .count() as u32;

                NurseSummary {
                    nurse_id: nurse.nurse_id.clone(),
                    name: nurse.name.clone(),
                    work_days,
                    off_days,
                    work_hours: work_days * HOURS_PER_SHIFT,
                    holiday_off_days,
                }
            })
            .collect()
    }

    /// 达标明细: 每日每班的实际人力对照需求区间
    #[instrument(skip_all)]
    pub fn compliance(&self, ctx: &RunContext, grid: &ScheduleGrid) -> Vec<ComplianceRow> {
        let mut rows = Vec::new();

        for day in 1..=ctx.calendar.days() {
            for shift in Shift::ALL {
                let cell = ctx.demand.cell(day, shift);
                let actual = round2(guards::shift_units(ctx, grid, day, shift));

                let status = if actual < cell.min_units - guards::EPS {
                    ComplianceStatus::Under
                } else if actual > cell.max_units + guards::EPS {
                    ComplianceStatus::Over
                } else {
                    ComplianceStatus::Met
                };

                rows.push(ComplianceRow {
                    day,
                    shift,
                    actual_units: actual,
                    min_units: cell.min_units,
                    max_units: cell.max_units,
                    status,
                });
            }
        }

        rows
    }
}

/// 保留两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
