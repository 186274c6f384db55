// ==========================================
// 护理排班系统 - 人力需求表
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 4. Demand 模型
// 红线: 需求表一旦生成即不可变, min <= max
// ==========================================

use crate::domain::types::Shift;
use serde::{Deserialize, Serialize};

/// 单日单班别的人力单位需求区间
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DemandCell {
    pub min_units: f64,
    pub max_units: f64,
}

/// 当月人力需求表: (日, 班别) -> [min, max]
///
/// 由 DemandBuilder 一次性生成, 引擎各环节只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandTable {
    days: u32,
    cells: Vec<[DemandCell; 3]>,
}

impl DemandTable {
    /// 以零需求初始化 (由 DemandBuilder 填充)
    pub fn new(days: u32) -> Self {
        Self {
            days,
            cells: vec![[DemandCell::default(); 3]; days as usize],
        }
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn cell(&self, day: u32, shift: Shift) -> &DemandCell {
        &self.cells[(day - 1) as usize][shift.index()]
    }

    pub fn set_cell(&mut self, day: u32, shift: Shift, cell: DemandCell) {
        self.cells[(day - 1) as usize][shift.index()] = cell;
    }
}
