// ==========================================
// 护理排班系统 - CSV 导出
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 10.2 导出档格式
// 红线: 导出不改动结果本体
// ==========================================

use crate::engine::orchestrator::ScheduleResult;
use crate::importer::error::ImportResult;
use csv::Writer;
use std::path::Path;
use tracing::info;

/// 排班结果 CSV 导出器
#[derive(Debug, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// 班表: 一人一行, 逐日一列
    pub fn export_roster(&self, result: &ScheduleResult, path: &Path) -> ImportResult<()> {
        let days = result.grid.days();
        let mut writer = Writer::from_path(path)?;

        let mut header = vec![
            "nurse_id".to_string(),
            "name".to_string(),
            "shift".to_string(),
            "is_senior".to_string(),
            "is_junior".to_string(),
        ];
        header.extend((1..=days).map(|day| day.to_string()));
        writer.write_record(&header)?;

        for row in &result.roster_rows {
            let mut record = vec![
                row.nurse_id.clone(),
                row.name.clone(),
                row.shift.letter().to_string(),
                if row.is_senior { "1" } else { "0" }.to_string(),
                if row.is_junior { "1" } else { "0" }.to_string(),
            ];
            record.extend(row.codes.iter().map(|code| code.as_str().to_string()));
            writer.write_record(&record)?;
        }

        writer.flush()?;
        info!(path = %path.display(), rows = result.roster_rows.len(), "班表导出完成");
        Ok(())
    }

    /// 个人汇总: 工作/休假天数, 时数, 假日休假数
    pub fn export_summaries(&self, result: &ScheduleResult, path: &Path) -> ImportResult<()> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record([
            "nurse_id",
            "name",
            "work_days",
            "off_days",
            "work_hours",
            "holiday_off_days",
        ])?;

        for row in &result.summaries {
            writer.write_record([
                row.nurse_id.as_str(),
                row.name.as_str(),
                &row.work_days.to_string(),
                &row.off_days.to_string(),
                &row.work_hours.to_string(),
                &row.holiday_off_days.to_string(),
            ])?;
        }

        writer.flush()?;
        info!(path = %path.display(), rows = result.summaries.len(), "个人汇总导出完成");
        Ok(())
    }

    /// 达标明细: 每日每班的实际人力对照需求区间
    pub fn export_compliance(&self, result: &ScheduleResult, path: &Path) -> ImportResult<()> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["day", "shift", "actual_units", "min_units", "max_units", "status"])?;

        for row in &result.compliance {
            writer.write_record([
                &row.day.to_string(),
                row.shift.letter(),
                &format!("{:.2}", row.actual_units),
                &format!("{:.2}", row.min_units),
                &format!("{:.2}", row.max_units),
                &row.status.to_string(),
            ])?;
        }

        writer.flush()?;
        info!(path = %path.display(), rows = result.compliance.len(), "达标明细导出完成");
        Ok(())
    }

    /// 结果全量 JSON: 执行编号 + 三份报表 + 修复环节明细
    pub fn export_result_json(&self, result: &ScheduleResult, path: &Path) -> ImportResult<()> {
        let json = serde_json::to_string_pretty(result)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), run_id = %result.run_id, "结果 JSON 导出完成");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::demand_config::DemandConfig;
    use crate::config::rule_config::RuleConfig;
    use crate::domain::nurse::Nurse;
    use crate::domain::preference::PreferenceStore;
    use crate::domain::types::Shift;
    use crate::engine::context::RunContext;
    use crate::engine::orchestrator::ScheduleOrchestrator;
    use std::collections::BTreeSet;

    fn create_test_result() -> ScheduleResult {
        let mut roster = Vec::new();
        for i in 1..=6 {
            let mut nurse = Nurse::new(format!("D{:03}", i), format!("白{}", i), Shift::Day);
            nurse.is_senior = i <= 2;
            roster.push(nurse);
        }
        let demand_cfg = DemandConfig {
            beds: 12,
            ..DemandConfig::default()
        };
        let ctx = RunContext::assemble(
            2025,
            6,
            roster,
            PreferenceStore::new(),
            BTreeSet::new(),
            &demand_cfg,
            RuleConfig::default(),
        );
        ScheduleOrchestrator::new().run(&ctx)
    }

    #[test]
    fn test_export_roster_writes_all_rows() {
        let result = create_test_result();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");

        CsvExporter::new().export_roster(&result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1 + 6);
        assert!(lines[0].starts_with("nurse_id,name,shift"));
        assert!(lines[0].ends_with(",30"));
    }

    #[test]
    fn test_export_result_json_carries_run_id_and_reports() {
        let result = create_test_result();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");

        CsvExporter::new().export_result_json(&result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["run_id"], result.run_id.as_str());
        assert_eq!(value["year"], 2025);
        assert_eq!(value["summaries"].as_array().unwrap().len(), 6);
        assert_eq!(value["compliance"].as_array().unwrap().len(), 30 * 3);
    }

    #[test]
    fn test_export_compliance_has_three_rows_per_day() {
        let result = create_test_result();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compliance.csv");

        CsvExporter::new().export_compliance(&result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1 + 30 * 3);
    }
}
