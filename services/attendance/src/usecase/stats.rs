//! Dashboard series: distinct attendees on each of the last four Sundays.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use chapel_domain::calendar::{last_four_sundays, month_day_label};

use crate::domain::repository::AttendanceRepository;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SundayCount {
    pub date: NaiveDate,
    /// `M/D`, e.g. `10/18`.
    pub label: String,
    pub count: usize,
}

pub struct SundayStatsUseCase<R: AttendanceRepository> {
    pub attendance: R,
}

impl<R: AttendanceRepository> SundayStatsUseCase<R> {
    /// Always four points, oldest first. A date whose read fails is reported as 0.
    pub async fn execute(&self, today: NaiveDate) -> Vec<SundayCount> {
        let mut series = Vec::with_capacity(4);
        for date in last_four_sundays(today) {
            let count = match self.attendance.member_ids_on(date).await {
                Ok(ids) => ids.into_iter().collect::<HashSet<_>>().len(),
                Err(e) => {
                    tracing::warn!(%date, error = %e, "sunday attendance read failed");
                    0
                }
            };
            series.push(SundayCount {
                date,
                label: month_day_label(date),
                count,
            });
        }
        series
    }
}
