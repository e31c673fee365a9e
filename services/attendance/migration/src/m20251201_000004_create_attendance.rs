use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::MemberId).uuid().not_null())
                    .col(ColumnDef::new(Attendance::Date).date().not_null())
                    .col(ColumnDef::new(Attendance::ServiceType).text().not_null())
                    .col(ColumnDef::new(Attendance::Department).text().not_null())
                    .col(
                        ColumnDef::new(Attendance::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Slot lookups: replace-all and the selection query.
        manager
            .create_index(
                Index::create()
                    .table(Attendance::Table)
                    .col(Attendance::Date)
                    .col(Attendance::ServiceType)
                    .col(Attendance::Department)
                    .name("idx_attendance_slot")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Attendance::Table)
                    .col(Attendance::MemberId)
                    .col(Attendance::Date)
                    .col(Attendance::ServiceType)
                    .col(Attendance::Department)
                    .name("uq_attendance_member_slot")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Attendance {
    Table,
    Id,
    MemberId,
    Date,
    ServiceType,
    Department,
    CreatedAt,
}

#[derive(Iden)]
enum Members {
    Table,
    Id,
}
