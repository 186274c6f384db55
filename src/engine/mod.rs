// ==========================================
// 护理排班系统 - 引擎层
// ==========================================
// 依据: Nursing_Roster_Master_Spec.md - PART D 引擎体系
// 依据: Roster_Engine_Specs_v1.2.md - 1.2 模块拆分
// ==========================================
// 职责: 实现排班业务规则引擎
// 红线: 引擎不做 IO, 输入输出全部走内存结构
// ==========================================

pub mod assigner;
pub mod capacity;
pub mod context;
pub mod demand_builder;
pub mod orchestrator;
pub mod repair;
pub mod rest_rule;

// 重导出核心引擎
pub use assigner::InitialAssignmentEngine;
pub use capacity::CapacityModel;
pub use context::RunContext;
pub use demand_builder::DemandBuilder;
pub use orchestrator::{ScheduleOrchestrator, ScheduleResult};
pub use repair::{PassOutcome, RepairPipeline};
