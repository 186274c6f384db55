// ==========================================
// 护理排班系统 - 人力需求生成引擎
// ==========================================
// 依据: Roster_Engine_Specs_v1.2.md - 4. Demand 模型
// 红线: 生成时必须保证 max >= min (夹取为防御性不变量)
// ==========================================
// 职责: 由床位数与护病比推导逐日逐班的 [min, max] 人力单位
// 输入: DemandConfig + MonthCalendar
// 输出: DemandTable (生成后只读)
// ==========================================

use crate::calendar::MonthCalendar;
use crate::config::demand_config::DemandConfig;
use crate::domain::demand::{DemandCell, DemandTable};
use crate::domain::types::Shift;
use tracing::{debug, instrument};

/// 人力需求生成引擎
pub struct DemandBuilder {
    // 无状态引擎
}

impl DemandBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成当月人力需求表
    ///
    /// 逐日逐班计算:
    /// 1) min = ceil(beds / ratio_max), max = ceil(beds / ratio_min)
    /// 2) 假日 (星期日或国定假日) 两端乘假日系数后再取 ceil
    /// 3) 手动加派同时加到两端
    /// 4) 法定护病比下限只抬高 min, 不动 max
    /// 5) 夹取 max = max(max, min)
    #[instrument(skip(self, cfg, calendar), fields(
        beds = cfg.beds,
        days = calendar.days(),
        holiday_factor = ?cfg.holiday_factor,
        facility_tier = ?cfg.facility_tier,
    ))]
    pub fn build(&self, cfg: &DemandConfig, calendar: &MonthCalendar) -> DemandTable {
        let mut table = DemandTable::new(calendar.days());
        let beds = cfg.beds as f64;

        for day in 1..=calendar.days() {
            let is_holiday = calendar.is_holiday(day);
            for shift in Shift::ALL {
                let band = cfg.ratio_band(shift);
                let mut min_units = (beds / band.max as f64).ceil();
                let mut max_units = (beds / band.min as f64).ceil();

                if is_holiday {
                    if let Some(factor) = cfg.holiday_factor {
                        min_units = (min_units * factor).ceil();
                        max_units = (max_units * factor).ceil();
                    }
                }

                let extra = cfg.extra_for(day, shift) as f64;
                min_units += extra;
                max_units += extra;

                if let Some(tier) = cfg.facility_tier {
                    let legal_min = (beds / tier.legal_ratio(shift) as f64).ceil();
                    if legal_min > min_units {
                        debug!(day, %shift, legal_min, "法定下限抬高最低人力");
                        min_units = legal_min;
                    }
                }

                max_units = max_units.max(min_units);

                table.set_cell(
                    day,
                    shift,
                    DemandCell {
                        min_units,
                        max_units,
                    },
                );
            }
        }

        table
    }
}

impl Default for DemandBuilder {
    fn default() -> Self {
        Self::new()
    }
}
