// ==========================================
// 护理排班系统 - 跨班支援调度
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 8.2 跨班调度
// 红线: 捐出班不得因调出而跌破自身下限
// ==========================================
// 逐日处理: 只要有班别低于下限且存在可行调度就继续;
// 调度对象限标准人员, 优先调出单位贡献高者
// ==========================================

use crate::domain::schedule::ScheduleGrid;
use crate::domain::types::Shift;
use crate::engine::context::RunContext;
use crate::engine::repair::guards;
use tracing::{debug, instrument};

/// 单日调度的迭代上限, 防御退化输入
const MAX_MOVES_PER_DAY: u32 = 50;

/// 跨班支援调度
#[instrument(skip_all)]
pub fn apply(ctx: &RunContext, grid: &mut ScheduleGrid) -> usize {
    let mut changes = 0usize;

    for day in 1..=ctx.calendar.days() {
        let mut guard = 0u32;
        loop {
            guard += 1;
            if guard > MAX_MOVES_PER_DAY {
                break;
            }

            // 缺口最大的班别优先
            let mut shortages: Vec<(Shift, f64)> = Shift::ALL
                .iter()
                .filter_map(|&shift| {
                    let cell = ctx.demand.cell(day, shift);
                    let units = guards::shift_units(ctx, grid, day, shift);
                    let gap = cell.min_units - units;
                    (gap > guards::EPS).then_some((shift, gap))
                })
                .collect();
            shortages.sort_by(|a, b| b.1.total_cmp(&a.1));

            if shortages.is_empty() {
                break;
            }

            let mut moved = false;
            for (target, _) in shortages {
                if try_move_into(ctx, grid, day, target) {
                    changes += 1;
                    moved = true;
                    break;
                }
            }
            if !moved {
                break;
            }
        }
    }

    changes
}

/// 从人力有余的班别调一人支援目标班
fn try_move_into(ctx: &RunContext, grid: &mut ScheduleGrid, day: u32, target: Shift) -> bool {
    let target_code = target.code();

    for donor in Shift::ALL {
        if donor == target {
            continue;
        }
        let donor_cell = ctx.demand.cell(day, donor);
        let donor_units = guards::shift_units(ctx, grid, day, donor);
        if donor_units - donor_cell.min_units <= guards::EPS {
            continue;
        }

        // 调度对象限标准人员, 单位贡献高者优先, 编号保证确定性
        let mut candidates: Vec<usize> = guards::shift_members(ctx, grid, day, donor)
            .into_iter()
            .filter(|&idx| !ctx.roster[idx].is_junior)
            .collect();
        candidates.sort_by(|&a, &b| {
            let unit_a = ctx.capacity.unit(&ctx.roster[a], donor);
            let unit_b = ctx.capacity.unit(&ctx.roster[b], donor);
            unit_b
                .total_cmp(&unit_a)
                .then_with(|| ctx.roster[a].nurse_id.cmp(&ctx.roster[b].nurse_id))
        });

        for idx in candidates {
            let unit_out = ctx.capacity.unit(&ctx.roster[idx], donor);
            if donor_units - unit_out < donor_cell.min_units - guards::EPS {
                continue;
            }
            if !guards::senior_ok_if_remove(ctx, grid, day, donor, idx) {
                continue;
            }
            if !guards::senior_ok_if_add(ctx, grid, day, target, idx) {
                continue;
            }
            if !guards::rest_ok_with(ctx, grid, idx, day, target_code) {
                continue;
            }

            grid.set(idx, day, target_code);
            debug!(
                day,
                nurse = %ctx.roster[idx].nurse_id,
                from = %donor,
                to = %target,
                "跨班支援调度"
            );
            return true;
        }
    }

    false
}
