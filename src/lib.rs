// ==========================================
// 护理排班系统 - 核心库
// ==========================================
// 依据: Nursing_Roster_Master_Spec.md - 系统宪法
// 技术栈: Rust + CSV 数据交换
// 系统定位: 决策支持系统 (排班结果由护理长最终确认)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 月历 - 周桶与假日判定
pub mod calendar;

// 引擎层 - 业务规则
pub mod engine;

// 导入导出层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 报表层 - 结果整理
pub mod report;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ComplianceStatus, FacilityTier, PrefKind, Shift, ShiftCode};

// 领域实体
pub use domain::{DemandCell, DemandTable, Nurse, PreferenceEntry, PreferenceStore, ScheduleGrid};

// 月历
pub use calendar::MonthCalendar;

// 引擎
pub use engine::{
    CapacityModel, DemandBuilder, InitialAssignmentEngine, PassOutcome, RepairPipeline,
    RunContext, ScheduleOrchestrator, ScheduleResult,
};

// 报表
pub use report::{ComplianceRow, NurseSummary, ReportBuilder, RosterRow};

// 配置
pub use config::{ConfigSnapshot, DemandConfig, RuleConfig};

// 导入导出
pub use importer::{CsvExporter, ImportError, ImportResult, PreferenceLoader, RosterLoader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "护理排班系统";

// ==========================================
// 预编译检查
// ==========================================
