// ==========================================
// 护理排班系统 - 周休保障
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 8.4 周休规则
// 红线: 转休不得跌破当班下限, 不得破坏资深占比
// ==========================================
// 每人每周 (七日桶) 至少一天休假;
// 候选日假日优先, 其余按日期升序, 取第一个可行者
// ==========================================

use crate::domain::schedule::ScheduleGrid;
use crate::domain::types::ShiftCode;
use crate::engine::context::RunContext;
use crate::engine::repair::guards;
use tracing::{debug, instrument};

/// 周休保障
#[instrument(skip_all)]
pub fn apply(ctx: &RunContext, grid: &mut ScheduleGrid) -> usize {
    let mut changes = 0usize;

    for nurse_idx in 0..ctx.roster.len() {
        for week in 1..=ctx.calendar.week_count() {
            let (from, to) = ctx.calendar.week_days(week);
            let has_off = (from..=to).any(|day| grid.get(nurse_idx, day) == Some(ShiftCode::O));
            if has_off {
                continue;
            }

            // 假日优先, 其余日期升序
            let mut candidates: Vec<u32> = (from..=to)
                .filter(|&day| ctx.calendar.is_holiday(day))
                .collect();
            candidates.extend((from..=to).filter(|&day| !ctx.calendar.is_holiday(day)));

            for day in candidates {
                let code = match grid.get(nurse_idx, day) {
                    Some(code) if code.is_work() => code,
                    _ => continue,
                };
                let shift = match code.as_shift() {
                    Some(shift) => shift,
                    None => continue,
                };

                let cell = ctx.demand.cell(day, shift);
                let units = guards::shift_units(ctx, grid, day, shift);
                let unit = ctx.capacity.unit(&ctx.roster[nurse_idx], shift);
                if units - unit < cell.min_units - guards::EPS {
                    continue;
                }
                if !guards::senior_ok_if_remove(ctx, grid, day, shift, nurse_idx) {
                    continue;
                }

                grid.set(nurse_idx, day, ShiftCode::O);
                changes += 1;
                debug!(
                    week,
                    day,
                    nurse = %ctx.roster[nurse_idx].nurse_id,
                    "周休转换"
                );
                break;
            }
        }
    }

    changes
}
