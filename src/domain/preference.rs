// ==========================================
// 护理排班系统 - 休假申请存储
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 1.2 休假申请
// 红线: 同人同日 MUST 与 WISH 互斥, MUST 优先
// ==========================================

use crate::domain::types::PrefKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// 单条休假申请 (已折算为当月第几天)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub nurse_id: String,
    pub day: u32,
    pub kind: PrefKind,
}

/// 当月休假申请集合
///
/// 按人员分别保存指定休 (硬约束) 与希望休 (软偏好) 的日期集合。
/// 写入时维护互斥规则: 指定休覆盖同日的希望休, 反向则忽略。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceStore {
    must_off: HashMap<String, BTreeSet<u32>>,
    wish_off: HashMap<String, BTreeSet<u32>>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一条申请, 维护 MUST 优先的互斥规则
    pub fn add(&mut self, entry: PreferenceEntry) {
        match entry.kind {
            PrefKind::Must => {
                if let Some(days) = self.wish_off.get_mut(&entry.nurse_id) {
                    days.remove(&entry.day);
                }
                self.must_off
                    .entry(entry.nurse_id)
                    .or_default()
                    .insert(entry.day);
            }
            PrefKind::Wish => {
                let already_must = self
                    .must_off
                    .get(&entry.nurse_id)
                    .is_some_and(|days| days.contains(&entry.day));
                if !already_must {
                    self.wish_off
                        .entry(entry.nurse_id)
                        .or_default()
                        .insert(entry.day);
                }
            }
        }
    }

    pub fn is_must_off(&self, nurse_id: &str, day: u32) -> bool {
        self.must_off
            .get(nurse_id)
            .is_some_and(|days| days.contains(&day))
    }

    pub fn is_wish_off(&self, nurse_id: &str, day: u32) -> bool {
        self.wish_off
            .get(nurse_id)
            .is_some_and(|days| days.contains(&day))
    }

    /// 指定休日期集合 (初排用于预置 O)
    pub fn must_off_days(&self, nurse_id: &str) -> Option<&BTreeSet<u32>> {
        self.must_off.get(nurse_id)
    }

    /// 申请总数 (导入日志用)
    pub fn len(&self) -> usize {
        self.must_off.values().map(BTreeSet::len).sum::<usize>()
            + self.wish_off.values().map(BTreeSet::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
