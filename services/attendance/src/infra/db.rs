use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use chapel_attendance_schema::{accounts, attendance, members, profiles};
use chapel_core::sea_ext::OrderByNullsLast;
use chapel_domain::role::{Position, Role};

use crate::domain::repository::{
    AccountRepository, AttendanceRepository, MemberRepository, ProfileRepository,
};
use crate::domain::types::{Account, AttendanceSlot, Member, Profile};
use crate::error::AttendanceServiceError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AttendanceServiceError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AttendanceServiceError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model.map(account_from_model))
    }

    async fn create(&self, account: &Account) -> Result<(), AttendanceServiceError> {
        let result = accounts::Entity::insert(accounts::ActiveModel {
            id: Set(account.id),
            email: Set(account.email.clone()),
            password_hash: Set(account.password_hash.clone()),
            created_at: Set(account.created_at),
        })
        .exec(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AttendanceServiceError::AlreadyRegistered),
            Err(e) => Err(anyhow::Error::new(e).context("create account").into()),
        }
    }
}

fn account_from_model(model: accounts::Model) -> Account {
    Account {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AttendanceServiceError> {
        let model = profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        Ok(model.map(profile_from_model))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Profile>, AttendanceServiceError> {
        let model = profiles::Entity::find()
            .filter(profiles::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find profile by username")?;
        Ok(model.map(profile_from_model))
    }

    async fn list(&self) -> Result<Vec<Profile>, AttendanceServiceError> {
        let models = profiles::Entity::find()
            .order_by_asc_nulls_last(profiles::Column::FullName)
            .order_by_asc(profiles::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list profiles")?;
        Ok(models.into_iter().map(profile_from_model).collect())
    }

    async fn save(&self, profile: &Profile) -> Result<(), AttendanceServiceError> {
        let result = profiles::Entity::insert(profile_to_active(profile))
            .on_conflict(
                OnConflict::column(profiles::Column::Id)
                    .update_columns([
                        profiles::Column::Username,
                        profiles::Column::FullName,
                        profiles::Column::Email,
                        profiles::Column::Position,
                        profiles::Column::Role,
                        profiles::Column::Departments,
                        profiles::Column::Approved,
                        profiles::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AttendanceServiceError::AlreadyRegistered),
            Err(e) => Err(anyhow::Error::new(e).context("save profile").into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AttendanceServiceError> {
        let result = profiles::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete profile")?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, AttendanceServiceError> {
        let count = profiles::Entity::find()
            .count(&self.db)
            .await
            .context("count profiles")?;
        Ok(count)
    }
}

fn profile_from_model(model: profiles::Model) -> Profile {
    Profile {
        id: model.id,
        username: model.username,
        full_name: model.full_name,
        email: model.email,
        position: Position::parse_lossy(&model.position),
        role: Role::parse_lossy(&model.role),
        departments: model.departments,
        approved: model.approved,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn profile_to_active(profile: &Profile) -> profiles::ActiveModel {
    profiles::ActiveModel {
        id: Set(profile.id),
        username: Set(profile.username.clone()),
        full_name: Set(profile.full_name.clone()),
        email: Set(profile.email.clone()),
        position: Set(profile.position.as_str().to_owned()),
        role: Set(profile.role.as_str().to_owned()),
        departments: Set(profile.departments.clone()),
        approved: Set(profile.approved),
        created_at: Set(profile.created_at),
        updated_at: Set(profile.updated_at),
    }
}

// ── Member repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMemberRepository {
    pub db: DatabaseConnection,
}

impl MemberRepository for DbMemberRepository {
    async fn list(&self) -> Result<Vec<Member>, AttendanceServiceError> {
        let models = members::Entity::find()
            .order_by_asc(members::Column::Name)
            .all(&self.db)
            .await
            .context("list members")?;
        Ok(models.into_iter().map(member_from_model).collect())
    }

    async fn list_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<Member>, AttendanceServiceError> {
        let models = members::Entity::find()
            .filter(members::Column::Department.eq(department))
            .order_by_asc(members::Column::Name)
            .all(&self.db)
            .await
            .context("list members by department")?;
        Ok(models.into_iter().map(member_from_model).collect())
    }

    async fn create(&self, member: &Member) -> Result<(), AttendanceServiceError> {
        members::Entity::insert(members::ActiveModel {
            id: Set(member.id),
            name: Set(member.name.clone()),
            department: Set(member.department.clone()),
            created_at: Set(member.created_at),
        })
        .exec(&self.db)
        .await
        .context("create member")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AttendanceServiceError> {
        let result = members::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete member")?;
        Ok(result.rows_affected > 0)
    }
}

fn member_from_model(model: members::Model) -> Member {
    Member {
        id: model.id,
        name: model.name,
        department: model.department,
        created_at: model.created_at,
    }
}

// ── Attendance repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAttendanceRepository {
    pub db: DatabaseConnection,
}

impl AttendanceRepository for DbAttendanceRepository {
    async fn replace_slot(
        &self,
        slot: &AttendanceSlot,
        member_ids: &[Uuid],
    ) -> Result<(), AttendanceServiceError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let slot = slot.clone();
                let member_ids = member_ids.to_vec();
                Box::pin(async move {
                    delete_slot(txn, &slot).await?;
                    insert_slot(txn, &slot, &member_ids).await?;
                    Ok(())
                })
            })
            .await
            .context("replace attendance slot")?;
        Ok(())
    }

    async fn member_ids_in_slot(
        &self,
        slot: &AttendanceSlot,
    ) -> Result<Vec<Uuid>, AttendanceServiceError> {
        let ids = attendance::Entity::find()
            .select_only()
            .column(attendance::Column::MemberId)
            .filter(attendance::Column::Date.eq(slot.date))
            .filter(attendance::Column::ServiceType.eq(slot.service_type.label()))
            .filter(attendance::Column::Department.eq(slot.department.as_str()))
            .order_by_asc(attendance::Column::CreatedAt)
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("load attendance slot")?;
        Ok(ids)
    }

    async fn member_ids_on(&self, date: NaiveDate) -> Result<Vec<Uuid>, AttendanceServiceError> {
        let ids = attendance::Entity::find()
            .select_only()
            .column(attendance::Column::MemberId)
            .filter(attendance::Column::Date.eq(date))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("load attendance by date")?;
        Ok(ids)
    }

    async fn count(&self) -> Result<u64, AttendanceServiceError> {
        let count = attendance::Entity::find()
            .count(&self.db)
            .await
            .context("count attendance")?;
        Ok(count)
    }

    async fn count_on(&self, date: NaiveDate) -> Result<u64, AttendanceServiceError> {
        let count = attendance::Entity::find()
            .filter(attendance::Column::Date.eq(date))
            .count(&self.db)
            .await
            .context("count attendance by date")?;
        Ok(count)
    }
}

async fn delete_slot(txn: &DatabaseTransaction, slot: &AttendanceSlot) -> Result<(), DbErr> {
    attendance::Entity::delete_many()
        .filter(attendance::Column::Date.eq(slot.date))
        .filter(attendance::Column::ServiceType.eq(slot.service_type.label()))
        .filter(attendance::Column::Department.eq(slot.department.as_str()))
        .exec(txn)
        .await?;
    Ok(())
}

async fn insert_slot(
    txn: &DatabaseTransaction,
    slot: &AttendanceSlot,
    member_ids: &[Uuid],
) -> Result<(), DbErr> {
    if member_ids.is_empty() {
        return Ok(());
    }
    let now = Utc::now();
    let rows = member_ids.iter().map(|member_id| attendance::ActiveModel {
        id: Set(Uuid::now_v7()),
        member_id: Set(*member_id),
        date: Set(slot.date),
        service_type: Set(slot.service_type.label().to_owned()),
        department: Set(slot.department.clone()),
        created_at: Set(now),
    });
    attendance::Entity::insert_many(rows).exec(txn).await?;
    Ok(())
}
