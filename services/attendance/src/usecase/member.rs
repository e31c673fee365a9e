use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::MemberRepository;
use crate::domain::types::Member;
use crate::error::{AttendanceServiceError, ValidationError};

pub struct ListMembersUseCase<M: MemberRepository> {
    pub members: M,
}

impl<M: MemberRepository> ListMembersUseCase<M> {
    /// Every member, or only those of `department`.
    pub async fn execute(&self, department: Option<&str>) -> Result<Vec<Member>, AttendanceServiceError> {
        match department {
            Some(department) => self.members.list_by_department(department).await,
            None => self.members.list().await,
        }
    }
}

pub struct CreateMemberInput {
    pub name: String,
    pub department: String,
}

pub struct CreateMemberUseCase<M: MemberRepository> {
    pub members: M,
}

impl<M: MemberRepository> CreateMemberUseCase<M> {
    pub async fn execute(&self, input: CreateMemberInput) -> Result<Member, AttendanceServiceError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingMemberName.into());
        }
        let department = input.department.trim();
        if department.is_empty() {
            return Err(ValidationError::MissingDepartment.into());
        }
        let member = Member {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            department: department.to_owned(),
            created_at: Utc::now(),
        };
        self.members.create(&member).await?;
        Ok(member)
    }
}

pub struct DeleteMemberUseCase<M: MemberRepository> {
    pub members: M,
}

impl<M: MemberRepository> DeleteMemberUseCase<M> {
    pub async fn execute(&self, id: Uuid) -> Result<(), AttendanceServiceError> {
        if !self.members.delete(id).await? {
            return Err(AttendanceServiceError::MemberNotFound);
        }
        tracing::info!(member_id = %id, "member deleted");
        Ok(())
    }
}
