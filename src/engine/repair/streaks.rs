// ==========================================
// 护理排班系统 - 连班与连休上限
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 8.8 连续上限
// 红线: 断开动作不得跌破当班下限 / 突破上限, 不得破坏资深占比与班距
// ==========================================
// 常规断开: 超长工作段在中点附近插休, 超长休假段在中点附近插班;
// 强制断开: 仍超长的工作段按需插入多个休假日, 取余裕最大处
// ==========================================

use crate::domain::schedule::ScheduleGrid;
use crate::domain::types::ShiftCode;
use crate::engine::context::RunContext;
use crate::engine::repair::guards;
use tracing::{debug, instrument};

/// 连班与连休上限的常规断开
#[instrument(skip_all)]
pub fn apply(ctx: &RunContext, grid: &mut ScheduleGrid) -> usize {
    let mut changes = 0usize;

    for nurse_idx in 0..ctx.roster.len() {
        changes += break_long_work_runs(ctx, grid, nurse_idx);
        changes += break_long_off_runs(ctx, grid, nurse_idx);
    }

    changes
}

/// 强制断开: 对仍超过上限的工作段插入足额休假
#[instrument(skip_all)]
pub fn hard_break(ctx: &RunContext, grid: &mut ScheduleGrid) -> usize {
    let mut changes = 0usize;
    let max_streak = ctx.rules.max_work_streak;

    for nurse_idx in 0..ctx.roster.len() {
        for (start, end) in work_runs(grid, nurse_idx, ctx.calendar.days()) {
            let len = end - start + 1;
            if len <= max_streak {
                continue;
            }

            // ceil(len/max) 段需要 段数-1 个断点
            let needed = (len + max_streak - 1) / max_streak - 1;
            for _ in 0..needed {
                if try_break_at_best_slack(ctx, grid, nurse_idx, start, end) {
                    changes += 1;
                } else {
                    break;
                }
            }
        }
    }

    changes
}

fn is_work(grid: &ScheduleGrid, nurse_idx: usize, day: u32) -> bool {
    grid.get(nurse_idx, day).is_some_and(|c| c.is_work())
}

/// 某人全月的极大工作段 (闭区间)
fn work_runs(grid: &ScheduleGrid, nurse_idx: usize, days: u32) -> Vec<(u32, u32)> {
    let mut runs = Vec::new();
    let mut day = 1u32;
    while day <= days {
        if !is_work(grid, nurse_idx, day) {
            day += 1;
            continue;
        }
        let start = day;
        while day < days && is_work(grid, nurse_idx, day + 1) {
            day += 1;
        }
        runs.push((start, day));
        day += 1;
    }
    runs
}

/// 段内候选日: 中点优先, 向两侧扩散
fn midpoint_order(start: u32, end: u32) -> Vec<u32> {
    let mid = (start + end) / 2;
    let mut order = vec![mid];
    let mut step = 1u32;
    loop {
        let mut pushed = false;
        if mid + step <= end {
            order.push(mid + step);
            pushed = true;
        }
        if mid >= start + step {
            order.push(mid - step);
            pushed = true;
        }
        if !pushed {
            break;
        }
        step += 1;
    }
    order
}

fn break_long_work_runs(ctx: &RunContext, grid: &mut ScheduleGrid, nurse_idx: usize) -> usize {
    let mut changes = 0usize;
    let max_streak = ctx.rules.max_work_streak;

    loop {
        let Some((start, end)) = work_runs(grid, nurse_idx, ctx.calendar.days())
            .into_iter()
            .find(|&(s, e)| e - s + 1 > max_streak)
        else {
            break;
        };

        let mut broken = false;
        for day in midpoint_order(start, end) {
            let code = match grid.get(nurse_idx, day) {
                Some(c) if c.is_work() => c,
                _ => continue,
            };
            let Some(shift) = code.as_shift() else {
                continue;
            };

            if guards::off_total(grid, nurse_idx) + 1 > ctx.rules.target_monthly_off + 2 {
                break;
            }
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
            broken = true;
            debug!(day, nurse = %ctx.roster[nurse_idx].nurse_id, "连班断开");
            break;
        }

        if !broken {
            break;
        }
    }

    changes
}

fn break_long_off_runs(ctx: &RunContext, grid: &mut ScheduleGrid, nurse_idx: usize) -> usize {
    let mut changes = 0usize;
    let days = ctx.calendar.days();
    let max_off = ctx.rules.max_off_streak;
    let nurse = &ctx.roster[nurse_idx];
    let shift = nurse.shift;
    let code = shift.code();

    loop {
        // 找第一段超长连休
        let mut found: Option<(u32, u32)> = None;
        let mut day = 1u32;
        while day <= days {
            if grid.get(nurse_idx, day) != Some(ShiftCode::O) {
                day += 1;
                continue;
            }
            let start = day;
            while day < days && grid.get(nurse_idx, day + 1) == Some(ShiftCode::O) {
                day += 1;
            }
            if day - start + 1 > max_off {
                found = Some((start, day));
                break;
            }
            day += 1;
        }
        let Some((start, end)) = found else {
            break;
        };

        let mut broken = false;
        for day in midpoint_order(start, end) {
            if ctx.is_must_off(nurse_idx, day) {
                continue;
            }
            if guards::off_total(grid, nurse_idx) <= ctx.rules.min_monthly_off {
                break;
            }
            if !guards::half_floor_ok_if_work(ctx, grid, nurse_idx, day) {
                continue;
            }
            let cell = ctx.demand.cell(day, shift);
            let units = guards::shift_units(ctx, grid, day, shift);
            let unit = ctx.capacity.unit(nurse, shift);
            if units + unit > cell.max_units + guards::EPS {
                continue;
            }
            if !guards::senior_ok_if_add(ctx, grid, day, shift, nurse_idx) {
                continue;
            }
            if !guards::rest_ok_with(ctx, grid, nurse_idx, day, code) {
                continue;
            }

            grid.set(nurse_idx, day, code);
            changes += 1;
            broken = true;
            debug!(day, nurse = %nurse.nurse_id, "连休断开");
            break;
        }

        if !broken {
            break;
        }
    }

    changes
}

/// 在段内找余裕最大的一天转休
fn try_break_at_best_slack(
    ctx: &RunContext,
    grid: &mut ScheduleGrid,
    nurse_idx: usize,
    start: u32,
    end: u32,
) -> bool {
    let mut best: Option<(f64, u32)> = None;

    for day in start..=end {
        let code = match grid.get(nurse_idx, day) {
            Some(c) if c.is_work() => c,
            _ => continue,
        };
        let Some(shift) = code.as_shift() else {
            continue;
        };

        let cell = ctx.demand.cell(day, shift);
        let units = guards::shift_units(ctx, grid, day, shift);
        let unit = ctx.capacity.unit(&ctx.roster[nurse_idx], shift);
        let slack = units - unit - cell.min_units;
        if slack < -guards::EPS {
            continue;
        }
        if !guards::senior_ok_if_remove(ctx, grid, day, shift, nurse_idx) {
            continue;
        }

        let better = match best {
            None => true,
            Some((best_slack, _)) => slack > best_slack + guards::EPS,
        };
        if better {
            best = Some((slack, day));
        }
    }

    if let Some((_, day)) = best {
        grid.set(nurse_idx, day, ShiftCode::O);
        debug!(day, nurse = %ctx.roster[nurse_idx].nurse_id, "强制断开");
        true
    } else {
        false
    }
}
