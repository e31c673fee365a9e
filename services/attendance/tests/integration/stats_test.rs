use uuid::Uuid;

use chapel_attendance::usecase::stats::SundayStatsUseCase;
use chapel_domain::service::ServiceType;

use crate::helpers::{MockAttendanceRepo, Row, date, slot};

fn row(member_id: Uuid, y: i32, m: u32, d: u32, service_type: ServiceType, dept: &str) -> Row {
    Row {
        member_id,
        slot: slot(date(y, m, d), service_type, dept),
    }
}

#[tokio::test]
async fn should_count_distinct_members_per_sunday() {
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();
    let repo = MockAttendanceRepo::new(vec![
        // `a` attends two services on 10/4 and counts once.
        row(a, 2026, 10, 4, ServiceType::SundayFirst, "청년부"),
        row(a, 2026, 10, 4, ServiceType::SundayThird, "청년부"),
        row(b, 2026, 10, 4, ServiceType::SundayFirst, "장년부"),
        row(a, 2026, 10, 18, ServiceType::SundaySecond, "청년부"),
        // Weekday services never enter the series.
        row(b, 2026, 10, 14, ServiceType::Wednesday, "장년부"),
    ]);

    let series = SundayStatsUseCase { attendance: repo }
        .execute(date(2026, 10, 18))
        .await;

    let points: Vec<_> = series
        .iter()
        .map(|p| (p.label.as_str(), p.count))
        .collect();
    assert_eq!(
        points,
        vec![("9/27", 0), ("10/4", 2), ("10/11", 0), ("10/18", 1)]
    );
}

#[tokio::test]
async fn should_anchor_on_previous_sunday_midweek() {
    let series = SundayStatsUseCase {
        attendance: MockAttendanceRepo::default(),
    }
    .execute(date(2026, 10, 21))
    .await;

    let dates: Vec<_> = series.iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2026, 9, 27),
            date(2026, 10, 4),
            date(2026, 10, 11),
            date(2026, 10, 18)
        ]
    );
}

#[tokio::test]
async fn should_report_zero_for_failed_read() {
    let a = Uuid::now_v7();
    let mut repo = MockAttendanceRepo::new(vec![
        row(a, 2026, 10, 11, ServiceType::SundayFirst, "청년부"),
        row(a, 2026, 10, 18, ServiceType::SundayFirst, "청년부"),
    ]);
    repo.failing_dates.insert(date(2026, 10, 11));

    let series = SundayStatsUseCase { attendance: repo }
        .execute(date(2026, 10, 18))
        .await;

    assert_eq!(series.len(), 4);
    assert_eq!(series[2].label, "10/11");
    assert_eq!(series[2].count, 0);
    assert_eq!(series[3].count, 1);
}
