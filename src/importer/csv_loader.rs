// ==========================================
// 护理排班系统 - CSV 导入
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 10.1 导入档格式
// 红线: 员工编号唯一; 休假申请中的坏行跳过并告警, 不中断导入
// ==========================================

use crate::domain::nurse::Nurse;
use crate::domain::preference::{PreferenceEntry, PreferenceStore};
use crate::domain::types::{PrefKind, Shift};
use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

/// 读取 CSV 为按表头索引的行记录
fn read_records(path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    if let Some(ext) = path.extension() {
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(
                ext.to_string_lossy().to_string(),
            ));
        }
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row_map = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.clone(), value.trim().to_string());
            }
        }
        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }
        records.push(row_map);
    }

    Ok(records)
}

fn field<'a>(row: &'a HashMap<String, String>, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or("")
}

/// 布尔列: 接受 1/0, TRUE/FALSE, Y/N, 空白视为否
fn parse_bool(value: &str, row: usize, name: &str) -> ImportResult<bool> {
    match value.to_uppercase().as_str() {
        "" | "0" | "FALSE" | "N" | "NO" => Ok(false),
        "1" | "TRUE" | "Y" | "YES" => Ok(true),
        _ => Err(ImportError::InvalidValue {
            row,
            field: name.to_string(),
            value: value.to_string(),
        }),
    }
}

// ==========================================
// RosterLoader - 花名册导入
// ==========================================

/// 花名册导入器
///
/// 期望表头: nurse_id, name, shift, weekly_cap, is_senior, is_junior
/// (weekly_cap 及两个标记列可缺省)
#[derive(Debug, Default)]
pub struct RosterLoader;

impl RosterLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> ImportResult<Vec<Nurse>> {
        let records = read_records(path)?;
        let mut roster = Vec::with_capacity(records.len());
        let mut seen = HashSet::new();

        for (idx, row) in records.iter().enumerate() {
            let row_no = idx + 2; // 表头占第 1 行

            let nurse_id = field(row, "nurse_id");
            if nurse_id.is_empty() {
                return Err(ImportError::MissingField {
                    row: row_no,
                    field: "nurse_id".to_string(),
                });
            }
            if !seen.insert(nurse_id.to_string()) {
                return Err(ImportError::DuplicateNurseId(nurse_id.to_string()));
            }

            let shift_raw = field(row, "shift");
            let shift = Shift::parse_code(shift_raw).ok_or_else(|| ImportError::InvalidValue {
                row: row_no,
                field: "shift".to_string(),
                value: shift_raw.to_string(),
            })?;

            let weekly_cap = match field(row, "weekly_cap") {
                "" => None,
                raw => Some(raw.parse::<u32>().map_err(|_| ImportError::InvalidValue {
                    row: row_no,
                    field: "weekly_cap".to_string(),
                    value: raw.to_string(),
                })?),
            };

            let mut nurse = Nurse::new(nurse_id, field(row, "name"), shift);
            nurse.weekly_cap = weekly_cap;
            nurse.is_senior = parse_bool(field(row, "is_senior"), row_no, "is_senior")?;
            nurse.is_junior = parse_bool(field(row, "is_junior"), row_no, "is_junior")?;
            roster.push(nurse);
        }

        if roster.is_empty() {
            return Err(ImportError::EmptyRoster(path.display().to_string()));
        }

        info!(count = roster.len(), "花名册导入完成");
        Ok(roster)
    }
}

// ==========================================
// PreferenceLoader - 休假申请导入
// ==========================================

/// 休假申请导入器
///
/// 期望表头: nurse_id, day, kind (MUST/WISH)。
/// 坏行跳过并告警, 不中断导入。
#[derive(Debug, Default)]
pub struct PreferenceLoader;

impl PreferenceLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> ImportResult<PreferenceStore> {
        let records = read_records(path)?;
        let mut store = PreferenceStore::new();
        let mut skipped = 0usize;

        for (idx, row) in records.iter().enumerate() {
            let row_no = idx + 2;

            let nurse_id = field(row, "nurse_id");
            if nurse_id.is_empty() {
                warn!(row = row_no, "休假申请缺员工编号, 跳过");
                skipped += 1;
                continue;
            }

            let day_raw = field(row, "day");
            let day = match day_raw.parse::<u32>() {
                Ok(day) if (1..=31).contains(&day) => day,
                _ => {
                    warn!(row = row_no, value = day_raw, "休假申请日期非法, 跳过");
                    skipped += 1;
                    continue;
                }
            };

            let kind_raw = field(row, "kind");
            let Some(kind) = PrefKind::parse(kind_raw) else {
                warn!(row = row_no, value = kind_raw, "休假申请类型非法, 跳过");
                skipped += 1;
                continue;
            };

            store.add(PreferenceEntry {
                nurse_id: nurse_id.to_string(),
                day,
                kind,
            });
        }

        info!(count = store.len(), skipped, "休假申请导入完成");
        Ok(store)
    }
}
