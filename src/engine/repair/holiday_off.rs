// ==========================================
// 护理排班系统 - 假日优先休假
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 8.3 假日偏好
// 红线: 减员不得跌破当班下限, 不得破坏资深占比
// ==========================================
// 假日各班只保留到下限, 多余人力转休;
// 先转单位贡献低者, 同值先转新进
// ==========================================

use crate::domain::schedule::ScheduleGrid;
use crate::domain::types::{Shift, ShiftCode};
use crate::engine::context::RunContext;
use crate::engine::repair::guards;
use tracing::{debug, instrument};

/// 假日优先休假
#[instrument(skip_all)]
pub fn apply(ctx: &RunContext, grid: &mut ScheduleGrid) -> usize {
    let mut changes = 0usize;

    for day in ctx.calendar.holiday_days() {
        for shift in Shift::ALL {
            let cell = ctx.demand.cell(day, shift);
            let mut units = guards::shift_units(ctx, grid, day, shift);

            // 单位贡献低者先转休, 同值新进优先
            let mut candidates = guards::shift_members(ctx, grid, day, shift);
            candidates.sort_by(|&a, &b| {
                let unit_a = ctx.capacity.unit(&ctx.roster[a], shift);
                let unit_b = ctx.capacity.unit(&ctx.roster[b], shift);
                unit_a
                    .total_cmp(&unit_b)
                    .then_with(|| ctx.roster[b].is_junior.cmp(&ctx.roster[a].is_junior))
                    .then_with(|| ctx.roster[a].nurse_id.cmp(&ctx.roster[b].nurse_id))
            });

            for idx in candidates {
                let unit = ctx.capacity.unit(&ctx.roster[idx], shift);
                if units - unit < cell.min_units - guards::EPS {
                    continue;
                }
                if !guards::senior_ok_if_remove(ctx, grid, day, shift, idx) {
                    continue;
                }

                grid.set(idx, day, ShiftCode::O);
                units -= unit;
                changes += 1;
                debug!(day, nurse = %ctx.roster[idx].nurse_id, %shift, "假日转休");
            }
        }
    }

    changes
}
