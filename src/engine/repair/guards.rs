// ==========================================
// 护理排班系统 - 修复环节共享守卫
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 8.1 修复不变量
// 红线: 任何修复动作必须同时通过 人力下限 / 资深占比 / 班距 三道守卫
// ==========================================

use crate::domain::schedule::ScheduleGrid;
use crate::domain::types::{Shift, ShiftCode};
use crate::engine::context::RunContext;
use crate::engine::rest_rule::rest_ok_opt;

/// 浮点比较容差
pub const EPS: f64 = 1e-9;

/// 某日某班的实际人力单位
pub fn shift_units(ctx: &RunContext, grid: &ScheduleGrid, day: u32, shift: Shift) -> f64 {
    let code = shift.code();
    ctx.roster
        .iter()
        .enumerate()
        .filter(|(idx, _)| grid.get(*idx, day) == Some(code))
        .map(|(_, nurse)| ctx.capacity.unit(nurse, shift))
        .sum()
}

/// 某日某班的成员行下标
pub fn shift_members(ctx: &RunContext, grid: &ScheduleGrid, day: u32, shift: Shift) -> Vec<usize> {
    let code = shift.code();
    (0..ctx.roster.len())
        .filter(|&idx| grid.get(idx, day) == Some(code))
        .collect()
}

/// 白班资深红线: senior >= ceil(count/3); 空班视为满足
fn senior_ratio_holds(ctx: &RunContext, members: &[usize], removed: Option<usize>, added: Option<usize>) -> bool {
    let mut count = 0u32;
    let mut seniors = 0u32;
    for &idx in members.iter().filter(|&&idx| Some(idx) != removed) {
        count += 1;
        if ctx.roster[idx].is_senior {
            seniors += 1;
        }
    }
    if let Some(idx) = added {
        count += 1;
        if ctx.roster[idx].is_senior {
            seniors += 1;
        }
    }
    count == 0 || seniors * 3 >= count
}

/// 移出一人后资深占比是否仍达标 (仅白班受限)
pub fn senior_ok_if_remove(
    ctx: &RunContext,
    grid: &ScheduleGrid,
    day: u32,
    shift: Shift,
    nurse_idx: usize,
) -> bool {
    if shift != Shift::Day {
        return true;
    }
    let members = shift_members(ctx, grid, day, shift);
    senior_ratio_holds(ctx, &members, Some(nurse_idx), None)
}

/// 加入一人后资深占比是否仍达标 (仅白班受限)
pub fn senior_ok_if_add(
    ctx: &RunContext,
    grid: &ScheduleGrid,
    day: u32,
    shift: Shift,
    nurse_idx: usize,
) -> bool {
    if shift != Shift::Day {
        return true;
    }
    let members = shift_members(ctx, grid, day, shift);
    senior_ratio_holds(ctx, &members, None, Some(nurse_idx))
}

/// 改写某格为指定代码后, 与前后两日的班距是否可行
pub fn rest_ok_with(
    ctx: &RunContext,
    grid: &ScheduleGrid,
    nurse_idx: usize,
    day: u32,
    code: ShiftCode,
) -> bool {
    let prev = if day > 1 { grid.get(nurse_idx, day - 1) } else { None };
    let next = if day < ctx.calendar.days() {
        grid.get(nurse_idx, day + 1)
    } else {
        None
    };
    rest_ok_opt(prev, Some(code)) && rest_ok_opt(Some(code), next)
}

/// 全月休假天数
pub fn off_total(grid: &ScheduleGrid, nurse_idx: usize) -> u32 {
    grid.count_code(nurse_idx, ShiftCode::O)
}

/// 某日所在半月 (1-15 / 16-月底) 的休假天数
pub fn off_in_half(grid: &ScheduleGrid, nurse_idx: usize, day: u32) -> u32 {
    if day <= 15 {
        grid.count_off_in(nurse_idx, 1, 15)
    } else {
        grid.count_off_in(nurse_idx, 16, grid.days())
    }
}

/// 某日所在半月的休假下限
pub fn half_floor(ctx: &RunContext, day: u32) -> u32 {
    if day <= 15 {
        ctx.rules.first_half_off_floor
    } else {
        ctx.rules.second_half_off_floor
    }
}

/// 把某格从 O 改回工作班是否仍守住该半月休假下限
pub fn half_floor_ok_if_work(ctx: &RunContext, grid: &ScheduleGrid, nurse_idx: usize, day: u32) -> bool {
    off_in_half(grid, nurse_idx, day) > half_floor(ctx, day)
}
