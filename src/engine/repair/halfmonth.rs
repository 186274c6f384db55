// ==========================================
// 护理排班系统 - 半月休假下限
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 8.6 半月分布
// 红线: 补休不得跌破当班下限, 不得破坏资深占比
// ==========================================
// 上半月 (1-15) 与下半月各有休假下限;
// 补休限定在欠缺的半月内, 且全月不超过月休目标
// ==========================================

use crate::domain::schedule::ScheduleGrid;
use crate::domain::types::ShiftCode;
use crate::engine::context::RunContext;
use crate::engine::repair::guards;
use tracing::{debug, instrument};

/// 单人单半月的补休上限, 防御退化输入
const MAX_FILLS_PER_HALF: u32 = 50;

/// 半月休假下限
#[instrument(skip_all)]
pub fn apply(ctx: &RunContext, grid: &mut ScheduleGrid) -> usize {
    let mut changes = 0usize;
    let days = ctx.calendar.days();

    let halves = [
        (1u32, 15u32, ctx.rules.first_half_off_floor),
        (16u32, days, ctx.rules.second_half_off_floor),
    ];

    for nurse_idx in 0..ctx.roster.len() {
        for &(from, to, floor) in &halves {
            let mut guard = 0u32;
            loop {
                guard += 1;
                if guard > MAX_FILLS_PER_HALF {
                    break;
                }
                if grid.count_off_in(nurse_idx, from, to) >= floor {
                    break;
                }
                if guards::off_total(grid, nurse_idx) >= ctx.rules.target_monthly_off {
                    break;
                }
                if !try_add_off_in(ctx, grid, nurse_idx, from, to) {
                    break;
                }
                changes += 1;
            }
        }
    }

    changes
}

/// 在指定日期区间内为某人补一天休假
fn try_add_off_in(
    ctx: &RunContext,
    grid: &mut ScheduleGrid,
    nurse_idx: usize,
    from: u32,
    to: u32,
) -> bool {
    let mut best: Option<(u32, f64, u32)> = None;

    for day in from..=to {
        let code = match grid.get(nurse_idx, day) {
            Some(code) if code.is_work() => code,
            _ => continue,
        };
        let Some(shift) = code.as_shift() else {
            continue;
        };

        let cell = ctx.demand.cell(day, shift);
        let units = guards::shift_units(ctx, grid, day, shift);
        let unit = ctx.capacity.unit(&ctx.roster[nurse_idx], shift);
        let slack = units - cell.min_units;
        if slack < unit - guards::EPS {
            continue;
        }
        if !guards::senior_ok_if_remove(ctx, grid, day, shift, nurse_idx) {
            continue;
        }

        let holiday_rank = if ctx.calendar.is_holiday(day) { 1 } else { 2 };
        let better = match best {
            None => true,
            Some((rank, best_slack, best_day)) => {
                (holiday_rank, -slack, day) < (rank, -best_slack, best_day)
            }
        };
        if better {
            best = Some((holiday_rank, slack, day));
        }
    }

    if let Some((_, _, day)) = best {
        grid.set(nurse_idx, day, ShiftCode::O);
        debug!(day, nurse = %ctx.roster[nurse_idx].nurse_id, "半月补休");
        true
    } else {
        false
    }
}
