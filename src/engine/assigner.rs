// ==========================================
// 护理排班系统 - 初排引擎
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 7. 初排引擎
// 红线: 指定休先行预置, 候选池永不回收已排格
// 红线: 白班资深占比逐步保证 senior >= ceil(count/3)
// ==========================================
// 职责: 按日序/班序贪婪填充至需求区间
// 输入: RunContext
// 输出: 全格有码的班表网格 (缺口留给合规报表呈现)
// ==========================================

use crate::domain::schedule::ScheduleGrid;
use crate::domain::types::{Shift, ShiftCode};
use crate::engine::context::RunContext;
use crate::engine::rest_rule::rest_ok_opt;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// 初排引擎
pub struct InitialAssignmentEngine {
    // 无状态引擎
}

/// 单班填充过程的累计量
struct FillState {
    units: f64,
    count: u32,
    seniors: u32,
    non_juniors: u32,
}

impl InitialAssignmentEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成初排班表
    ///
    /// 逐日按 D → E → N 填充:
    /// 1) 候选池 = 班别相符 + 当日未排 + 与前一日班距可行 + 周上限未满
    /// 2) 池内优先序: 非希望休 → 累计已排天数少 → 员工编号
    /// 3) 填到 min 后若有余量继续填到 max; 池空即停
    /// 4) 三班处理完后当日剩余人员一律休假
    #[instrument(skip(self, ctx), fields(
        nurses = ctx.roster.len(),
        days = ctx.calendar.days()
    ))]
    pub fn assign(&self, ctx: &RunContext) -> ScheduleGrid {
        let days = ctx.calendar.days();
        let mut grid = ScheduleGrid::new(&ctx.roster, days);

        // 指定休预置为 O, 之后任何环节不再触碰
        let mut pinned = 0u32;
        for (idx, nurse) in ctx.roster.iter().enumerate() {
            if let Some(must_days) = ctx.preferences.must_off_days(&nurse.nurse_id) {
                for &day in must_days {
                    if (1..=days).contains(&day) {
                        grid.set(idx, day, ShiftCode::O);
                        pinned += 1;
                    }
                }
            }
        }
        debug!(pinned, "指定休预置完成");

        let mut assigned_days = vec![0u32; ctx.roster.len()];
        let mut week_assigned = vec![[0u32; 5]; ctx.roster.len()];

        for day in 1..=days {
            let week = (ctx.calendar.week_of(day) - 1) as usize;
            for shift in Shift::ALL {
                self.fill_shift(
                    ctx,
                    &mut grid,
                    day,
                    shift,
                    week,
                    &mut assigned_days,
                    &mut week_assigned,
                );
            }
            for idx in 0..ctx.roster.len() {
                if grid.get(idx, day).is_none() {
                    grid.set(idx, day, ShiftCode::O);
                }
            }
        }

        grid
    }

    /// 填充单日单班
    #[allow(clippy::too_many_arguments)]
    fn fill_shift(
        &self,
        ctx: &RunContext,
        grid: &mut ScheduleGrid,
        day: u32,
        shift: Shift,
        week: usize,
        assigned_days: &mut [u32],
        week_assigned: &mut [[u32; 5]],
    ) {
        let cell = ctx.demand.cell(day, shift);
        let code = shift.code();

        // 候选池只建一次; 同班填充期间其余成员的可行性不变,
        // 每轮只做视图限缩与最小键选取
        let mut pool: Vec<usize> = (0..ctx.roster.len())
            .filter(|&i| {
                let nurse = &ctx.roster[i];
                if nurse.shift != shift || grid.get(i, day).is_some() {
                    return false;
                }
                let prev = if day > 1 { grid.get(i, day - 1) } else { None };
                if !rest_ok_opt(prev, Some(code)) {
                    return false;
                }
                match nurse.weekly_cap {
                    Some(cap) => week_assigned[i][week] < cap,
                    None => true,
                }
            })
            .collect();

        let mut state = FillState {
            units: 0.0,
            count: 0,
            seniors: 0,
            non_juniors: 0,
        };

        while state.units < cell.max_units && !pool.is_empty() {
            let Some(pick) = self.pick_candidate(ctx, &pool, day, shift, &state, assigned_days)
            else {
                break;
            };

            grid.set(pick, day, code);
            state.units += ctx.capacity.unit(&ctx.roster[pick], shift);
            state.count += 1;
            if ctx.roster[pick].is_senior {
                state.seniors += 1;
            }
            if !ctx.roster[pick].is_junior {
                state.non_juniors += 1;
            }
            assigned_days[pick] += 1;
            week_assigned[pick][week] += 1;
            pool.retain(|&i| i != pick);
        }

        if state.units < cell.min_units {
            debug!(
                day,
                %shift,
                units = state.units,
                min_units = cell.min_units,
                "候选池耗尽, 当班人力不足"
            );
        }
    }

    /// 在候选池上套用限缩规则后取最小键成员
    fn pick_candidate(
        &self,
        ctx: &RunContext,
        pool: &[usize],
        day: u32,
        shift: Shift,
        state: &FillState,
        assigned_days: &[u32],
    ) -> Option<usize> {
        let mut view: Vec<usize> = pool.to_vec();

        // 尚无标准人员时优先标准人员, 避免整班皆新进
        if state.non_juniors == 0 {
            let standard: Vec<usize> = view
                .iter()
                .copied()
                .filter(|&i| !ctx.roster[i].is_junior)
                .collect();
            if !standard.is_empty() {
                view = standard;
            }
        }

        // 白班资深红线: ceil((count+1)/3)
        if shift == Shift::Day {
            let need_seniors = (state.count + 1 + 2) / 3;
            if state.seniors < need_seniors {
                let seniors: Vec<usize> = view
                    .iter()
                    .copied()
                    .filter(|&i| ctx.roster[i].is_senior)
                    .collect();
                if !seniors.is_empty() {
                    view = seniors;
                }
            }
        }

        view.into_iter().min_by(|&a, &b| {
            let key_a = (
                ctx.is_wish_off(a, day),
                assigned_days[a],
                &ctx.roster[a].nurse_id,
            );
            let key_b = (
                ctx.is_wish_off(b, day),
                assigned_days[b],
                &ctx.roster[b].nurse_id,
            );
            key_a.cmp(&key_b).then(Ordering::Equal)
        })
    }
}

impl Default for InitialAssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}
