// ==========================================
// 护理排班系统 - 领域类型定义
// ==========================================
// 依据: Nursing_Roster_Master_Spec.md - PART A 领域模型
// 依据: Roster_Engine_Specs_v1.2.md - 0.2 班别体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 班别 (Shift)
// ==========================================
// 红线: 护理人员班别固定, 不做轮班
// 顺序: Day < Evening < Night (报表排序依据)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shift {
    Day,     // 白班 08:00-16:00
    Evening, // 小夜 16:00-24:00
    Night,   // 大夜 00:00-08:00
}

impl Shift {
    /// 全部班别, 按固定处理顺序 (白班 → 小夜 → 大夜)
    pub const ALL: [Shift; 3] = [Shift::Day, Shift::Evening, Shift::Night];

    /// 需求表/产能表的数组下标
    pub fn index(&self) -> usize {
        match self {
            Shift::Day => 0,
            Shift::Evening => 1,
            Shift::Night => 2,
        }
    }

    /// 单字母代码 (花名册/班表的存储格式)
    pub fn letter(&self) -> &'static str {
        match self {
            Shift::Day => "D",
            Shift::Evening => "E",
            Shift::Night => "N",
        }
    }

    /// 对应的班表代码
    pub fn code(&self) -> ShiftCode {
        match self {
            Shift::Day => ShiftCode::D,
            Shift::Evening => ShiftCode::E,
            Shift::Night => ShiftCode::N,
        }
    }

    /// 从单字母代码解析班别
    pub fn parse_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "D" => Some(Shift::Day),
            "E" => Some(Shift::Evening),
            "N" => Some(Shift::Night),
            _ => None,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Day => write!(f, "DAY"),
            Shift::Evening => write!(f, "EVENING"),
            Shift::Night => write!(f, "NIGHT"),
        }
    }
}

// ==========================================
// 班表代码 (Shift Code)
// ==========================================
// 红线: 每人每天恰好一个代码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftCode {
    D, // 白班
    E, // 小夜
    N, // 大夜
    O, // 休假
}

impl ShiftCode {
    /// 是否为工作班代码 (O 视为休假)
    pub fn is_work(&self) -> bool {
        !matches!(self, ShiftCode::O)
    }

    /// 工作班代码对应的班别
    pub fn as_shift(&self) -> Option<Shift> {
        match self {
            ShiftCode::D => Some(Shift::Day),
            ShiftCode::E => Some(Shift::Evening),
            ShiftCode::N => Some(Shift::Night),
            ShiftCode::O => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftCode::D => "D",
            ShiftCode::E => "E",
            ShiftCode::N => "N",
            ShiftCode::O => "O",
        }
    }

    /// 从字符串解析班表代码
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "D" => Some(ShiftCode::D),
            "E" => Some(ShiftCode::E),
            "N" => Some(ShiftCode::N),
            "O" => Some(ShiftCode::O),
            _ => None,
        }
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 休假申请类型 (Preference Kind)
// ==========================================
// 红线: MUST 为硬约束, 任何修复环节不得覆盖
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrefKind {
    Must, // 指定休 (硬约束)
    Wish, // 希望休 (软偏好, 仅影响初排顺序)
}

impl PrefKind {
    /// 从字符串解析申请类型
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "MUST" => Some(PrefKind::Must),
            "WISH" => Some(PrefKind::Wish),
            _ => None,
        }
    }
}

impl fmt::Display for PrefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefKind::Must => write!(f, "MUST"),
            PrefKind::Wish => write!(f, "WISH"),
        }
    }
}

// ==========================================
// 人力达标状态 (Compliance Status)
// ==========================================
// 依据: Roster_Engine_Specs 9. 合规报表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Under, // 不足
    Met,   // 达标
    Over,  // 超编
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Under => write!(f, "UNDER"),
            ComplianceStatus::Met => write!(f, "MET"),
            ComplianceStatus::Over => write!(f, "OVER"),
        }
    }
}

// ==========================================
// 医院评鉴层级 (Facility Tier)
// ==========================================
// 依据: Roster_Engine_Specs 4.4 法定护病比下限表
// 法定比值为每位护理人员照护的最大病人数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityTier {
    MedicalCenter, // 医学中心
    Regional,      // 区域医院
    District,      // 地区医院
}

impl FacilityTier {
    /// 指定班别的法定护病比 (病人数/护理人员)
    pub fn legal_ratio(&self, shift: Shift) -> u32 {
        match (self, shift) {
            (FacilityTier::MedicalCenter, Shift::Day) => 9,
            (FacilityTier::MedicalCenter, Shift::Evening) => 12,
            (FacilityTier::MedicalCenter, Shift::Night) => 15,
            (FacilityTier::Regional, Shift::Day) => 12,
            (FacilityTier::Regional, Shift::Evening) => 15,
            (FacilityTier::Regional, Shift::Night) => 18,
            (FacilityTier::District, Shift::Day) => 15,
            (FacilityTier::District, Shift::Evening) => 18,
            (FacilityTier::District, Shift::Night) => 23,
        }
    }

    /// 从字符串解析评鉴层级
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "MEDICAL_CENTER" => Some(FacilityTier::MedicalCenter),
            "REGIONAL" => Some(FacilityTier::Regional),
            "DISTRICT" => Some(FacilityTier::District),
            _ => None,
        }
    }
}

impl fmt::Display for FacilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityTier::MedicalCenter => write!(f, "MEDICAL_CENTER"),
            FacilityTier::Regional => write!(f, "REGIONAL"),
            FacilityTier::District => write!(f, "DISTRICT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_parse_code() {
        assert_eq!(Shift::parse_code("d"), Some(Shift::Day));
        assert_eq!(Shift::parse_code(" N "), Some(Shift::Night));
        assert_eq!(Shift::parse_code("X"), None);
        assert_eq!(Shift::parse_code(""), None);
    }

    #[test]
    fn test_shift_code_roundtrip() {
        for shift in Shift::ALL {
            assert_eq!(shift.code().as_shift(), Some(shift));
        }
        assert_eq!(ShiftCode::O.as_shift(), None);
        assert!(!ShiftCode::O.is_work());
        assert!(ShiftCode::N.is_work());
    }

    #[test]
    fn test_shift_order_for_reports() {
        // 报表排序依赖 Day < Evening < Night
        assert!(Shift::Day < Shift::Evening);
        assert!(Shift::Evening < Shift::Night);
    }

    #[test]
    fn test_facility_tier_legal_ratios() {
        assert_eq!(FacilityTier::MedicalCenter.legal_ratio(Shift::Day), 9);
        assert_eq!(FacilityTier::Regional.legal_ratio(Shift::Evening), 15);
        assert_eq!(FacilityTier::District.legal_ratio(Shift::Night), 23);
    }

    #[test]
    fn test_pref_kind_parse() {
        assert_eq!(PrefKind::parse("must"), Some(PrefKind::Must));
        assert_eq!(PrefKind::parse("WISH"), Some(PrefKind::Wish));
        assert_eq!(PrefKind::parse("other"), None);
    }
}
