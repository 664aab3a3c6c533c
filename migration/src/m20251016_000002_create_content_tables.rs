use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 学校公告
        manager
            .create_table(
                Table::create()
                    .table(SchoolUpdates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolUpdates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SchoolUpdates::Title).string().not_null())
                    .col(ColumnDef::new(SchoolUpdates::Summary).text().not_null())
                    .col(ColumnDef::new(SchoolUpdates::Content).text().not_null())
                    .col(ColumnDef::new(SchoolUpdates::Category).string().not_null())
                    .col(ColumnDef::new(SchoolUpdates::PostedOn).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 相册
        manager
            .create_table(
                Table::create()
                    .table(GalleryItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GalleryItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GalleryItems::Title).string().not_null())
                    .col(ColumnDef::new(GalleryItems::Description).text().null())
                    .col(ColumnDef::new(GalleryItems::ImageUrl).string().null())
                    .col(ColumnDef::new(GalleryItems::VideoUrl).string().null())
                    .col(ColumnDef::new(GalleryItems::DateAdded).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 校园生活
        manager
            .create_table(
                Table::create()
                    .table(StudentLifeItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentLifeItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentLifeItems::Title).string().not_null())
                    .col(ColumnDef::new(StudentLifeItems::Description).text().not_null())
                    .col(ColumnDef::new(StudentLifeItems::ImageUrl).string().not_null())
                    .col(ColumnDef::new(StudentLifeItems::Category).string().not_null())
                    .col(
                        ColumnDef::new(StudentLifeItems::DateAdded)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 领导团队
        manager
            .create_table(
                Table::create()
                    .table(LeadershipProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeadershipProfiles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LeadershipProfiles::Name).string().not_null())
                    .col(ColumnDef::new(LeadershipProfiles::Position).string().not_null())
                    .col(ColumnDef::new(LeadershipProfiles::Bio).text().null())
                    .col(ColumnDef::new(LeadershipProfiles::ImageUrl).string().not_null())
                    .col(
                        ColumnDef::new(LeadershipProfiles::PassportPhotoUrl)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(LeadershipProfiles::Category).string().not_null())
                    .col(
                        ColumnDef::new(LeadershipProfiles::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_school_updates_posted_on")
                    .table(SchoolUpdates::Table)
                    .col(SchoolUpdates::PostedOn)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeadershipProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentLifeItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalleryItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SchoolUpdates::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum SchoolUpdates {
    #[sea_orm(iden = "school_updates")]
    Table,
    Id,
    Title,
    Summary,
    Content,
    Category,
    PostedOn,
}

#[derive(DeriveIden)]
enum GalleryItems {
    #[sea_orm(iden = "gallery_items")]
    Table,
    Id,
    Title,
    Description,
    ImageUrl,
    VideoUrl,
    DateAdded,
}

#[derive(DeriveIden)]
enum StudentLifeItems {
    #[sea_orm(iden = "student_life_items")]
    Table,
    Id,
    Title,
    Description,
    ImageUrl,
    Category,
    DateAdded,
}

#[derive(DeriveIden)]
enum LeadershipProfiles {
    #[sea_orm(iden = "leadership_profiles")]
    Table,
    Id,
    Name,
    Position,
    Bio,
    ImageUrl,
    PassportPhotoUrl,
    Category,
    DisplayOrder,
}
