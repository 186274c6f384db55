// ==========================================
// 护理排班系统 - 月历模型
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 3. 月历模型
// 周分桶: 1-7 为第1周, 8-14 第2周, 15-21 第3周,
//         22-28 第4周, 29 日以后并入第5周
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 当月日历: 天数、星期、假日分类、周分桶
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthCalendar {
    year: i32,
    month: u32,
    days: u32,
    /// 管理端维护的国定假日 (当月第几天)
    extra_holidays: BTreeSet<u32>,
}

/// 当月天数 (非法月份返回 0, 由调用端校验)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(0)
}

impl MonthCalendar {
    pub fn new(year: i32, month: u32, extra_holidays: BTreeSet<u32>) -> Self {
        let days = days_in_month(year, month);
        let extra_holidays = extra_holidays.into_iter().filter(|&d| d >= 1 && d <= days).collect();
        Self {
            year,
            month,
            days,
            extra_holidays,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn is_sunday(&self, day: u32) -> bool {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
            .map(|d| d.weekday() == Weekday::Sun)
            .unwrap_or(false)
    }

    /// 假日 = 星期日或国定假日
    pub fn is_holiday(&self, day: u32) -> bool {
        self.is_sunday(day) || self.extra_holidays.contains(&day)
    }

    /// 周分桶 (1..=5)
    pub fn week_of(&self, day: u32) -> u32 {
        ((day - 1) / 7 + 1).min(5)
    }

    /// 某周桶覆盖的日区间 (含两端)
    pub fn week_days(&self, week: u32) -> (u32, u32) {
        let from = (week - 1) * 7 + 1;
        let to = if week >= 5 { self.days } else { (week * 7).min(self.days) };
        (from, to)
    }

    /// 当月包含日的周桶数
    pub fn week_count(&self) -> u32 {
        self.week_of(self.days)
    }

    /// 假日日列表 (假日偏好与周休候选扫描用)
    pub fn holiday_days(&self) -> Vec<u32> {
        (1..=self.days).filter(|&d| self.is_holiday(d)).collect()
    }
}
