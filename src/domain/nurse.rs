// ==========================================
// 护理排班系统 - 护理人员实体
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 1.1 花名册
// ==========================================

use crate::domain::types::Shift;
use serde::{Deserialize, Serialize};

/// 护理人员 (花名册行)
///
/// 由管理端维护的花名册导入, 引擎内只读。
/// 班别固定 (不轮班); 资深与新进为独立布尔标记,
/// 原始数据中允许同时为真, 引擎按各自语义分别使用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nurse {
    /// 员工编号 (唯一, 非空)
    pub nurse_id: String,
    /// 姓名
    pub name: String,
    /// 固定班别
    pub shift: Shift,
    /// 每周工作天数上限 (可选)
    pub weekly_cap: Option<u32>,
    /// 资深标记 (白班三分之一资深红线的分子)
    pub is_senior: bool,
    /// 新进标记 (折算人力单位)
    pub is_junior: bool,
}

impl Nurse {
    pub fn new(nurse_id: impl Into<String>, name: impl Into<String>, shift: Shift) -> Self {
        Self {
            nurse_id: nurse_id.into(),
            name: name.into(),
            shift,
            weekly_cap: None,
            is_senior: false,
            is_junior: false,
        }
    }
}
