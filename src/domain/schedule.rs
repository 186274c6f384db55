// ==========================================
// 护理排班系统 - 班表网格
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 2. 班表数据结构
// 红线: 每人每天恰好一个代码; 指定休格不得被覆盖
// ==========================================

use crate::domain::nurse::Nurse;
use crate::domain::types::ShiftCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 当月班表: (护理人员 × 日) -> 班表代码
///
/// 行序与花名册一致, 引擎各环节以行下标互操作。
/// 初排前所有格为空; 初排结束后所有格必有代码,
/// 修复环节只做就地改写。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleGrid {
    days: u32,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Option<ShiftCode>>>,
}

impl ScheduleGrid {
    /// 依花名册行序创建空网格
    pub fn new(roster: &[Nurse], days: u32) -> Self {
        let index = roster
            .iter()
            .enumerate()
            .map(|(i, n)| (n.nurse_id.clone(), i))
            .collect();
        Self {
            days,
            index,
            rows: vec![vec![None; days as usize]; roster.len()],
        }
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn nurse_count(&self) -> usize {
        self.rows.len()
    }

    /// 读取代码 (day 为 1 起算)
    pub fn get(&self, nurse_idx: usize, day: u32) -> Option<ShiftCode> {
        self.rows[nurse_idx][(day - 1) as usize]
    }

    pub fn set(&mut self, nurse_idx: usize, day: u32, code: ShiftCode) {
        self.rows[nurse_idx][(day - 1) as usize] = Some(code);
    }

    /// 按员工编号读取 (报表与测试用)
    pub fn get_by_id(&self, nurse_id: &str, day: u32) -> Option<ShiftCode> {
        self.index
            .get(nurse_id)
            .and_then(|&idx| self.get(idx, day))
    }

    pub fn row_of(&self, nurse_id: &str) -> Option<usize> {
        self.index.get(nurse_id).copied()
    }

    /// 统计某人全月某代码的天数
    pub fn count_code(&self, nurse_idx: usize, code: ShiftCode) -> u32 {
        self.rows[nurse_idx]
            .iter()
            .filter(|c| **c == Some(code))
            .count() as u32
    }

    /// 统计某人某日区间内 (含两端) 的休假天数
    pub fn count_off_in(&self, nurse_idx: usize, from_day: u32, to_day: u32) -> u32 {
        (from_day..=to_day.min(self.days))
            .filter(|&d| self.get(nurse_idx, d) == Some(ShiftCode::O))
            .count() as u32
    }
}
