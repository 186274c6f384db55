// ==========================================
// 护理排班系统 - 班距规则
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 5. 班距规则
// 红线: 相邻两个工作班之间至少间隔 11 小时
// ==========================================
// 班别时段固定: D=[8,16) E=[16,24) N=[0,8)
// 大夜跨日由 +24 归一化处理
// ==========================================

use crate::domain::types::ShiftCode;

/// 法定最短班距 (小时)
pub const MIN_REST_HOURS: i32 = 11;

/// 工作班的起讫时刻 (O 无时段约束)
fn shift_window(code: ShiftCode) -> Option<(i32, i32)> {
    match code {
        ShiftCode::D => Some((8, 16)),
        ShiftCode::E => Some((16, 24)),
        ShiftCode::N => Some((0, 8)),
        ShiftCode::O => None,
    }
}

/// 相邻两日代码是否满足班距
///
/// 任一侧为休假即视为满足; 否则取次日班起点减前日班终点,
/// 负值加 24 归一化后要求 >= 11。
pub fn rest_ok(prev: ShiftCode, next: ShiftCode) -> bool {
    let (Some((_, prev_end)), Some((next_start, _))) = (shift_window(prev), shift_window(next))
    else {
        return true;
    };
    let mut rest = next_start - prev_end;
    if rest < 0 {
        rest += 24;
    }
    rest >= MIN_REST_HOURS
}

/// 任一侧尚未排班时视为满足 (初排逐日推进用)
pub fn rest_ok_opt(prev: Option<ShiftCode>, next: Option<ShiftCode>) -> bool {
    match (prev, next) {
        (Some(p), Some(n)) => rest_ok(p, n),
        _ => true,
    }
}
