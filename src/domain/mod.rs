// ==========================================
// 护理排班系统 - 领域模型层
// ==========================================
// 依据: Nursing_Roster_Master_Spec.md - PART A 领域模型
// 依据: Roster_Engine_Specs_v1.2.md - 主实体定义
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含引擎逻辑, 不含文件访问逻辑
// ==========================================

pub mod demand;
pub mod nurse;
pub mod preference;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use demand::{DemandCell, DemandTable};
pub use nurse::Nurse;
pub use preference::{PreferenceEntry, PreferenceStore};
pub use schedule::ScheduleGrid;
pub use types::{ComplianceStatus, FacilityTier, PrefKind, Shift, ShiftCode};
