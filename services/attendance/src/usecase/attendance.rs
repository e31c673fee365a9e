//! Attendance sheet save and load.

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use chapel_domain::service::ServiceType;

use crate::domain::repository::AttendanceRepository;
use crate::domain::types::AttendanceSlot;
use crate::error::{AttendanceServiceError, ValidationError};

/// Slot fields as received; any may be missing.
#[derive(Debug, Default, Clone)]
pub struct SlotInput {
    pub date: Option<String>,
    pub service_type: Option<String>,
    pub department: Option<String>,
}

impl SlotInput {
    /// Presence check, in order: date, service type, department.
    fn fields(&self) -> Result<(&str, &str, &str), ValidationError> {
        let date = present(self.date.as_deref()).ok_or(ValidationError::MissingDate)?;
        let service_type =
            present(self.service_type.as_deref()).ok_or(ValidationError::MissingServiceType)?;
        let department =
            present(self.department.as_deref()).ok_or(ValidationError::MissingDepartment)?;
        Ok((date, service_type, department))
    }

    pub fn parse(&self) -> Result<AttendanceSlot, ValidationError> {
        let (date, service_type, department) = self.fields()?;
        parse_slot(date, service_type, department)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_slot(
    date: &str,
    service_type: &str,
    department: &str,
) -> Result<AttendanceSlot, ValidationError> {
    let date =
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)?;
    let service_type =
        ServiceType::from_label(service_type).ok_or(ValidationError::UnknownServiceType)?;
    Ok(AttendanceSlot {
        date,
        service_type,
        department: department.to_owned(),
    })
}

/// A validated save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveAttendance {
    pub slot: AttendanceSlot,
    /// De-duplicated, first occurrence order.
    pub member_ids: Vec<Uuid>,
}

/// Validate a save request without touching the store. `member_ids` may be empty
/// but must be present.
pub fn validate_save(
    slot: &SlotInput,
    member_ids: Option<Vec<Uuid>>,
) -> Result<SaveAttendance, ValidationError> {
    let (date, service_type, department) = slot.fields()?;
    let member_ids = member_ids.ok_or(ValidationError::MissingMemberIds)?;
    let slot = parse_slot(date, service_type, department)?;

    let mut seen = HashSet::with_capacity(member_ids.len());
    let member_ids = member_ids.into_iter().filter(|id| seen.insert(*id)).collect();
    Ok(SaveAttendance { slot, member_ids })
}

pub struct SaveAttendanceUseCase<R: AttendanceRepository> {
    pub attendance: R,
}

impl<R: AttendanceRepository> SaveAttendanceUseCase<R> {
    /// Replace the slot's rows with exactly `member_ids`. Replaying is idempotent.
    pub async fn execute(&self, save: &SaveAttendance) -> Result<(), AttendanceServiceError> {
        self.attendance
            .replace_slot(&save.slot, &save.member_ids)
            .await?;
        tracing::info!(
            date = %save.slot.date,
            service_type = save.slot.service_type.label(),
            department = %save.slot.department,
            present = save.member_ids.len(),
            "attendance saved"
        );
        Ok(())
    }
}

pub struct LoadAttendanceUseCase<R: AttendanceRepository> {
    pub attendance: R,
}

impl<R: AttendanceRepository> LoadAttendanceUseCase<R> {
    /// Distinct member ids recorded for the slot, in stored order.
    pub async fn execute(&self, slot: &AttendanceSlot) -> Result<Vec<Uuid>, AttendanceServiceError> {
        let ids = self.attendance.member_ids_in_slot(slot).await?;
        let mut seen = HashSet::with_capacity(ids.len());
        Ok(ids.into_iter().filter(|id| seen.insert(*id)).collect())
    }
}
