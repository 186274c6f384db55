// ==========================================
// 护理排班系统 - 月休补足与均衡
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 8.5 月休规则
// 红线: 补休不得跌破当班下限, 不得破坏资深占比
// ==========================================
// 第一轮: 低于月休下限者逐一补休, 直到无人可补;
// 第二轮 (可选): 月休天数最多与最少差距收敛到 1 以内
// ==========================================

use crate::domain::schedule::ScheduleGrid;
use crate::domain::types::ShiftCode;
use crate::engine::context::RunContext;
use crate::engine::repair::guards;
use tracing::{debug, instrument};

/// 均衡轮的迭代上限, 防御退化输入
const MAX_BALANCE_ROUNDS: u32 = 200;

/// 月休补足与均衡
#[instrument(skip_all)]
pub fn apply(ctx: &RunContext, grid: &mut ScheduleGrid) -> usize {
    let mut changes = 0usize;

    // 第一轮: 补足月休下限
    loop {
        let mut progressed = false;
        for nurse_idx in 0..ctx.roster.len() {
            if guards::off_total(grid, nurse_idx) >= ctx.rules.min_monthly_off {
                continue;
            }
            if try_add_one_off(ctx, grid, nurse_idx) {
                changes += 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    // 第二轮: 休假天数均衡
    if ctx.rules.balance_off_days {
        for _ in 0..MAX_BALANCE_ROUNDS {
            let totals: Vec<u32> = (0..ctx.roster.len())
                .map(|idx| guards::off_total(grid, idx))
                .collect();
            let (Some(&max), Some(&min)) = (totals.iter().max(), totals.iter().min()) else {
                break;
            };
            if max - min <= 1 {
                break;
            }

            // 休假最少者优先补, 同值按编号
            let Some(target) = (0..ctx.roster.len())
                .filter(|&idx| totals[idx] == min)
                .min_by(|&a, &b| ctx.roster[a].nurse_id.cmp(&ctx.roster[b].nurse_id))
            else {
                break;
            };

            if try_add_one_off(ctx, grid, target) {
                changes += 1;
            } else {
                break;
            }
        }
    }

    changes
}

/// 为某人补一天休假, 选余裕最大的工作日转休
fn try_add_one_off(ctx: &RunContext, grid: &mut ScheduleGrid, nurse_idx: usize) -> bool {
    let mut best: Option<(u32, f64, u32)> = None;

    for day in 1..=ctx.calendar.days() {
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

        // 假日优先, 其次余裕大者, 再按日期
        let holiday_rank = if ctx.calendar.is_holiday(day) { 1 } else { 2 };
        let better = match best {
            None => true,
            Some((rank, best_slack, best_day)) => (holiday_rank, -slack, day)
                < (rank, -best_slack, best_day),
        };
        if better {
            best = Some((holiday_rank, slack, day));
        }
    }

    if let Some((_, _, day)) = best {
        grid.set(nurse_idx, day, ShiftCode::O);
        debug!(day, nurse = %ctx.roster[nurse_idx].nurse_id, "月休补休");
        true
    } else {
        false
    }
}
