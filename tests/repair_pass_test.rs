// ==========================================
// 修复环节单项测试
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 8. 修复管线
// 职责: 在手工构造的网格上逐项验证各修复环节的行为
// 场景: 24 床, 比值区间 4-6, 每班 min=4 / max=6
// ==========================================


use nurse_roster::domain::types::ShiftCode;
use nurse_roster::domain::{PreferenceStore, ScheduleGrid};
use nurse_roster::engine::repair::{
    cross_shift, halfmonth, holiday_off, monthly_off, streaks, weekly_rest, work_stretch,
};
use nurse_roster::engine::RunContext;
use std::collections::BTreeSet;
use test_helpers::create_context;

fn standard_context() -> RunContext {
    create_context(PreferenceStore::new(), BTreeSet::new())
}

fn empty_grid(ctx: &RunContext) -> ScheduleGrid {
    ScheduleGrid::new(&ctx.roster, ctx.calendar.days())
}

fn row(grid: &ScheduleGrid, nurse_id: &str) -> usize {
    grid.row_of(nurse_id)
        .unwrap_or_else(|| panic!("花名册缺 {}", nurse_id))
}

fn fill(grid: &mut ScheduleGrid, idx: usize, from: u32, to: u32, code: ShiftCode) {
    for day in from..=to {
        grid.set(idx, day, code);
    }
}

fn day_workers(ctx: &RunContext, grid: &ScheduleGrid, day: u32) -> Vec<String> {
    ctx.roster
        .iter()
        .enumerate()
        .filter(|(idx, _)| grid.get(*idx, day) == Some(ShiftCode::D))
        .map(|(_, n)| n.nurse_id.clone())
        .collect()
}

// ==========================================
// 假日优先休假
// ==========================================

#[test]
fn test_holiday_off_trims_to_min_junior_first() {
    let ctx = standard_context();
    let mut grid = empty_grid(&ctx);
    // 6 月 1 日为周日; 白班 9 人全上
    for i in 1..=9 {
        let idx = row(&grid, &format!("D{:03}", i));
        grid.set(idx, 1, ShiftCode::D);
    }

    let changes = holiday_off::apply(&ctx, &mut grid);

    // 新进 D009 先转, 其后按编号转到贴近下限为止;
    // D003/D004 被资深占比挡下, D007/D008 被下限挡下
    assert_eq!(changes, 5);
    assert_eq!(day_workers(&ctx, &grid, 1), vec!["D003", "D004", "D007", "D008"]);
    assert_eq!(grid.get_by_id("D009", 1), Some(ShiftCode::O));
    assert_eq!(grid.get_by_id("D001", 1), Some(ShiftCode::O));
}

// ==========================================
// 跨班支援调度
// ==========================================

#[test]
fn test_cross_shift_moves_standard_nurse_into_gap() {
    let ctx = standard_context();
    let mut grid = empty_grid(&ctx);
    // 第 2 天: 白班 6 人有余, 小夜 3 人缺 1, 大夜恰在下限
    for i in 1..=6 {
        grid.set(row(&grid, &format!("D{:03}", i)), 2, ShiftCode::D);
    }
    for i in 1..=3 {
        grid.set(row(&grid, &format!("E{:03}", i)), 2, ShiftCode::E);
    }
    for i in 1..=4 {
        grid.set(row(&grid, &format!("N{:03}", i)), 2, ShiftCode::N);
    }

    let changes = cross_shift::apply(&ctx, &mut grid);

    assert_eq!(changes, 1);
    assert_eq!(grid.get_by_id("D001", 2), Some(ShiftCode::E));
    for i in 2..=6 {
        assert_eq!(
            grid.get_by_id(&format!("D{:03}", i), 2),
            Some(ShiftCode::D)
        );
    }
}

#[test]
fn test_cross_shift_refuses_to_break_donor_min() {
    let ctx = standard_context();
    let mut grid = empty_grid(&ctx);
    // 白班恰在下限: 不得调出支援小夜
    for i in 1..=4 {
        grid.set(row(&grid, &format!("D{:03}", i)), 2, ShiftCode::D);
    }
    for i in 1..=3 {
        grid.set(row(&grid, &format!("E{:03}", i)), 2, ShiftCode::E);
    }
    for i in 1..=4 {
        grid.set(row(&grid, &format!("N{:03}", i)), 2, ShiftCode::N);
    }

    let changes = cross_shift::apply(&ctx, &mut grid);

    assert_eq!(changes, 0);
    assert_eq!(grid.get_by_id("D001", 2), Some(ShiftCode::D));
}

// ==========================================
// 周休保障
// ==========================================

#[test]
fn test_weekly_rest_gives_everyone_one_off_per_week() {
    let ctx = standard_context();
    let mut grid = empty_grid(&ctx);
    // 第一周 (1-7) 白班 8 人连上七天
    for i in 1..=8 {
        let idx = row(&grid, &format!("D{:03}", i));
        fill(&mut grid, idx, 1, 7, ShiftCode::D);
    }

    let changes = weekly_rest::apply(&ctx, &mut grid);

    assert_eq!(changes, 8);
    for i in 1..=8 {
        let idx = row(&grid, &format!("D{:03}", i));
        assert!(
            grid.count_off_in(idx, 1, 7) >= 1,
            "D{:03} 第一周无休",
            i
        );
    }
    // 假日 (1 日周日) 优先转休, 转到贴近下限为止
    assert_eq!(day_workers(&ctx, &grid, 1), vec!["D003", "D004", "D007", "D008"]);
}

// ==========================================
// 月休补足
// ==========================================

#[test]
fn test_monthly_off_lifts_everyone_to_floor() {
    let ctx = standard_context();
    let mut grid = empty_grid(&ctx);
    for i in 1..=8 {
        let idx = row(&grid, &format!("D{:03}", i));
        fill(&mut grid, idx, 1, 30, ShiftCode::D);
    }

    let changes = monthly_off::apply(&ctx, &mut grid);

    assert!(changes > 0);
    for i in 1..=8 {
        let idx = row(&grid, &format!("D{:03}", i));
        let offs = grid.count_code(idx, ShiftCode::O);
        assert!(
            offs >= ctx.rules.min_monthly_off,
            "D{:03} 月休不足: {}",
            i,
            offs
        );
    }
}

// ==========================================
// 半月休假下限
// ==========================================

#[test]
fn test_halfmonth_floors_filled_exactly() {
    let ctx = standard_context();
    let mut grid = empty_grid(&ctx);
    for i in 1..=8 {
        let idx = row(&grid, &format!("D{:03}", i));
        fill(&mut grid, idx, 1, 30, ShiftCode::D);
    }

    let changes = halfmonth::apply(&ctx, &mut grid);

    // 每人上半月补到 5, 下半月补到 3, 补够即停
    assert_eq!(changes, 8 * 8);
    for i in 1..=8 {
        let idx = row(&grid, &format!("D{:03}", i));
        assert_eq!(grid.count_off_in(idx, 1, 15), ctx.rules.first_half_off_floor);
        assert_eq!(grid.count_off_in(idx, 16, 30), ctx.rules.second_half_off_floor);
    }
}

// ==========================================
// 连班与连休上限
// ==========================================

#[test]
fn test_streaks_break_long_work_runs_near_midpoint() {
    let ctx = standard_context();
    let mut grid = empty_grid(&ctx);
    // 8 人连上十天, 上限 5
    for i in 1..=8 {
        let idx = row(&grid, &format!("D{:03}", i));
        fill(&mut grid, idx, 1, 10, ShiftCode::D);
    }

    let changes = streaks::apply(&ctx, &mut grid);

    assert_eq!(changes, 8);
    // 中点优先: D001 在第 5 天断开; D003 被资深占比挤到第 6 天
    assert_eq!(grid.get_by_id("D001", 5), Some(ShiftCode::O));
    assert_eq!(grid.get_by_id("D003", 6), Some(ShiftCode::O));
    for i in 1..=8 {
        let idx = row(&grid, &format!("D{:03}", i));
        let mut run = 0u32;
        for day in 1..=10 {
            if grid.get(idx, day) == Some(ShiftCode::D) {
                run += 1;
                assert!(run <= ctx.rules.max_work_streak, "D{:03} 连班超限", i);
            } else {
                run = 0;
            }
        }
    }
}

#[test]
fn test_hard_break_inserts_required_count() {
    let ctx = standard_context();
    let mut grid = empty_grid(&ctx);
    for i in 1..=8 {
        let idx = row(&grid, &format!("D{:03}", i));
        fill(&mut grid, idx, 1, 10, ShiftCode::D);
    }

    // 十天段按上限 5 拆两段, 需 1 个断点
    let changes = streaks::hard_break(&ctx, &mut grid);

    assert_eq!(changes, 8);
    for i in 1..=8 {
        let idx = row(&grid, &format!("D{:03}", i));
        assert_eq!(grid.count_off_in(idx, 1, 10), 1);
    }
}

// ==========================================
// 连续工作段修整
// ==========================================

#[test]
fn test_work_stretch_swaps_short_run_off_later() {
    let ctx = standard_context();
    let mut grid = empty_grid(&ctx);
    // D005 上 2 休 1 再连上: 段长 2 低于下限 3
    let d5 = row(&grid, "D005");
    fill(&mut grid, d5, 1, 2, ShiftCode::D);
    grid.set(d5, 3, ShiftCode::O);
    fill(&mut grid, d5, 4, 30, ShiftCode::D);
    for id in ["D001", "D002", "D006", "D007"] {
        let idx = row(&grid, id);
        fill(&mut grid, idx, 1, 30, ShiftCode::D);
    }

    let changes = work_stretch::apply(&ctx, &mut grid);

    // 休假后移: 第 3 天改回白班, 第 4 天转休, 全月休假总数不变
    assert_eq!(changes, 1);
    assert_eq!(grid.get(d5, 3), Some(ShiftCode::D));
    assert_eq!(grid.get(d5, 4), Some(ShiftCode::O));
    assert_eq!(grid.count_code(d5, ShiftCode::O), 1);
}

#[test]
fn test_smooth_extends_short_segment_into_off_days() {
    let ctx = standard_context();
    let mut grid = empty_grid(&ctx);
    // D001 只上 1-2 两天, 其余全休: 段长 2 延伸到 3
    let d1 = row(&grid, "D001");
    fill(&mut grid, d1, 1, 2, ShiftCode::D);
    fill(&mut grid, d1, 3, 30, ShiftCode::O);

    let changes = work_stretch::smooth(&ctx, &mut grid);

    assert_eq!(changes, 1);
    assert_eq!(grid.get(d1, 3), Some(ShiftCode::D));
}
