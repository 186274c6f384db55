// ==========================================
// 护理排班系统 - 连续工作段修整
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 8.7 工作段长度
// 红线: 调整不得跌破当班下限 / 突破上限, 不得破坏资深占比与班距
// ==========================================
// 主修整: 过短工作段后的休假日改回工作, 并在后方等量转休,
// 全月休假天数保持不变;
// 平滑: 仍过短的工作段向相邻休假日延伸, 消耗休假余量
// ==========================================

use crate::domain::schedule::ScheduleGrid;
use crate::domain::types::ShiftCode;
use crate::engine::context::RunContext;
use crate::engine::repair::guards;
use tracing::{debug, instrument};

/// 全表扫描轮数上限
const MAX_SWEEPS: u32 = 3;

/// 过短工作段修整: 以后移休假的方式拉长工作段
#[instrument(skip_all)]
pub fn apply(ctx: &RunContext, grid: &mut ScheduleGrid) -> usize {
    let mut changes = 0usize;

    for _ in 0..MAX_SWEEPS {
        let mut progressed = false;

        for nurse_idx in 0..ctx.roster.len() {
            for day in 2..=ctx.calendar.days() {
                if grid.get(nurse_idx, day) != Some(ShiftCode::O) {
                    continue;
                }
                if ctx.is_must_off(nurse_idx, day) {
                    continue;
                }

                let run = work_run_before(grid, nurse_idx, day);
                if run == 0 || run >= ctx.rules.min_work_stretch {
                    continue;
                }

                if try_swap_off_later(ctx, grid, nurse_idx, day) {
                    changes += 1;
                    progressed = true;
                }
            }
        }

        if !progressed {
            break;
        }
    }

    changes
}

/// 工作段平滑: 过短的段向相邻休假日延伸
#[instrument(skip_all)]
pub fn smooth(ctx: &RunContext, grid: &mut ScheduleGrid) -> usize {
    let mut changes = 0usize;
    let days = ctx.calendar.days();

    for nurse_idx in 0..ctx.roster.len() {
        let mut day = 1u32;
        while day <= days {
            if !is_work(grid, nurse_idx, day) {
                day += 1;
                continue;
            }
            let start = day;
            let mut end = day;
            while end < days && is_work(grid, nurse_idx, end + 1) {
                end += 1;
            }

            let mut seg_start = start;
            let mut seg_end = end;
            while seg_end - seg_start + 1 < ctx.rules.min_work_stretch {
                if seg_end < days && try_extend(ctx, grid, nurse_idx, seg_end + 1) {
                    seg_end += 1;
                    changes += 1;
                } else if seg_start > 1 && try_extend(ctx, grid, nurse_idx, seg_start - 1) {
                    seg_start -= 1;
                    changes += 1;
                } else {
                    break;
                }
            }

            day = seg_end + 1;
        }
    }

    changes
}

fn is_work(grid: &ScheduleGrid, nurse_idx: usize, day: u32) -> bool {
    grid.get(nurse_idx, day).is_some_and(|c| c.is_work())
}

/// 紧邻某日之前的连续工作天数
fn work_run_before(grid: &ScheduleGrid, nurse_idx: usize, day: u32) -> u32 {
    let mut run = 0u32;
    let mut d = day;
    while d > 1 {
        d -= 1;
        if is_work(grid, nurse_idx, d) {
            run += 1;
        } else {
            break;
        }
    }
    run
}

/// 某日转回固定班, 并在其后找一工作日等量转休
fn try_swap_off_later(
    ctx: &RunContext,
    grid: &mut ScheduleGrid,
    nurse_idx: usize,
    day: u32,
) -> bool {
    let nurse = &ctx.roster[nurse_idx];
    let shift = nurse.shift;
    let code = shift.code();

    let cell = ctx.demand.cell(day, shift);
    let units = guards::shift_units(ctx, grid, day, shift);
    let unit = ctx.capacity.unit(nurse, shift);
    if units + unit > cell.max_units + guards::EPS {
        return false;
    }
    if !guards::senior_ok_if_add(ctx, grid, day, shift, nurse_idx) {
        return false;
    }
    if !guards::rest_ok_with(ctx, grid, nurse_idx, day, code) {
        return false;
    }

    // 后方找可转休的工作日, 保持全月休假总数不变
    for later in (day + 1)..=ctx.calendar.days() {
        let later_code = match grid.get(nurse_idx, later) {
            Some(c) if c.is_work() => c,
            _ => continue,
        };
        let Some(later_shift) = later_code.as_shift() else {
            continue;
        };

        let later_cell = ctx.demand.cell(later, later_shift);
        let later_units = guards::shift_units(ctx, grid, later, later_shift);
        let later_unit = ctx.capacity.unit(nurse, later_shift);
        if later_units - later_unit < later_cell.min_units - guards::EPS {
            continue;
        }
        if !guards::senior_ok_if_remove(ctx, grid, later, later_shift, nurse_idx) {
            continue;
        }

        grid.set(nurse_idx, day, code);
        grid.set(nurse_idx, later, ShiftCode::O);
        debug!(
            day,
            moved_off_to = later,
            nurse = %nurse.nurse_id,
            "短工作段修整"
        );
        return true;
    }

    false
}

/// 把相邻的一个休假日改回固定班以延伸工作段
fn try_extend(ctx: &RunContext, grid: &mut ScheduleGrid, nurse_idx: usize, day: u32) -> bool {
    if grid.get(nurse_idx, day) != Some(ShiftCode::O) {
        return false;
    }
    if ctx.is_must_off(nurse_idx, day) {
        return false;
    }
    if guards::off_total(grid, nurse_idx) <= ctx.rules.min_monthly_off {
        return false;
    }
    if !guards::half_floor_ok_if_work(ctx, grid, nurse_idx, day) {
        return false;
    }

    let nurse = &ctx.roster[nurse_idx];
    let shift = nurse.shift;
    let cell = ctx.demand.cell(day, shift);
    let units = guards::shift_units(ctx, grid, day, shift);
    let unit = ctx.capacity.unit(nurse, shift);
    if units + unit > cell.max_units + guards::EPS {
        return false;
    }
    if !guards::senior_ok_if_add(ctx, grid, day, shift, nurse_idx) {
        return false;
    }
    if !guards::rest_ok_with(ctx, grid, nurse_idx, day, shift.code()) {
        return false;
    }

    grid.set(nurse_idx, day, shift.code());
    debug!(day, nurse = %nurse.nurse_id, "工作段延伸");
    true
}
