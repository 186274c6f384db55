// ==========================================
// 护理排班系统 - 导入导出层
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 10. 数据交换
// ==========================================
// 职责: 外部数据导入与结果导出, 生成内部数据
// 支持: CSV
// ==========================================

// 模块声明
pub mod csv_export;
pub mod csv_loader;
pub mod error;

// 重导出核心类型
pub use csv_export::CsvExporter;
pub use csv_loader::{PreferenceLoader, RosterLoader};
pub use error::{ImportError, ImportResult};
