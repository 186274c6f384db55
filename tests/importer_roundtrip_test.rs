// ==========================================
// 导入导出端到端测试
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 10. 数据交换
// 职责: 验证 CSV 导入 → 排班 → 三份报表导出的完整链路
// ==========================================


use nurse_roster::engine::{RunContext, ScheduleOrchestrator};
use nurse_roster::importer::{CsvExporter, PreferenceLoader, RosterLoader};
use nurse_roster::RuleConfig;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use test_helpers::flat_demand_config;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

/// 与 test_helpers::standard_roster 同构的花名册 CSV
fn roster_csv() -> String {
    let mut content = String::from("nurse_id,name,shift,weekly_cap,is_senior,is_junior\n");
    for (prefix, shift, label) in [("D", "D", "白"), ("E", "E", "小"), ("N", "N", "大")] {
        for i in 1..=9u32 {
            let is_senior = prefix == "D" && i <= 4;
            let is_junior = i == 9;
            content.push_str(&format!(
                "{}{:03},{}{},{},,{},{}\n",
                prefix,
                i,
                label,
                i,
                shift,
                if is_senior { 1 } else { 0 },
                if is_junior { 1 } else { 0 },
            ));
        }
    }
    content
}

#[test]
fn test_csv_import_schedule_export_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let roster_path = write_file(&dir, "roster.csv", &roster_csv());
    // 第 3 行为坏行, 应跳过不中断
    let prefs_path = write_file(
        &dir,
        "prefs.csv",
        "nurse_id,day,kind\n\
         E005,3,MUST\n\
         E005,99,MUST\n\
         D001,2,WISH\n",
    );

    let roster = RosterLoader::new().load(&roster_path).unwrap();
    assert_eq!(roster.len(), 27);

    let preferences = PreferenceLoader::new().load(&prefs_path).unwrap();
    assert_eq!(preferences.len(), 2);
    assert!(preferences.is_must_off("E005", 3));

    let ctx = RunContext::assemble(
        2025,
        6,
        roster,
        preferences,
        BTreeSet::from([6]),
        &flat_demand_config(),
        RuleConfig::default(),
    );
    let result = ScheduleOrchestrator::new().run(&ctx);

    let exporter = CsvExporter::new();
    let roster_out = dir.path().join("roster_202506.csv");
    let summary_out = dir.path().join("summary_202506.csv");
    let compliance_out = dir.path().join("compliance_202506.csv");
    exporter.export_roster(&result, &roster_out).unwrap();
    exporter.export_summaries(&result, &summary_out).unwrap();
    exporter.export_compliance(&result, &compliance_out).unwrap();

    // 班表: 27 人一行, 表头后第 5 列起为逐日代码
    let roster_text = std::fs::read_to_string(&roster_out).unwrap();
    let lines: Vec<&str> = roster_text.lines().collect();
    assert_eq!(lines.len(), 1 + 27);
    let e005_line = lines
        .iter()
        .find(|line| line.starts_with("E005,"))
        .expect("班表缺 E005");
    let columns: Vec<&str> = e005_line.split(',').collect();
    assert_eq!(columns[4 + 3], "O", "指定休未反映在导出班表");

    let summary_text = std::fs::read_to_string(&summary_out).unwrap();
    assert_eq!(summary_text.lines().count(), 1 + 27);

    let compliance_text = std::fs::read_to_string(&compliance_out).unwrap();
    assert_eq!(compliance_text.lines().count(), 1 + 30 * 3);
}
