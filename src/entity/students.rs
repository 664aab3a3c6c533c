//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub date_of_birth: String,
    pub phone_number: String,
    pub photo_url: Option<String>,
    #[sea_orm(unique)]
    pub registration_number: String,
    pub class_id: Option<i64>,
    pub status: String,
    pub applied_at: i64,
    pub last_login: Option<i64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::marks::Entity")]
    Marks,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::marks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::applications::entities::AdmissionStatus;
        use crate::models::students::entities::Student;
        use crate::models::timestamp_to_datetime;

        Student {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            date_of_birth: self.date_of_birth,
            phone_number: self.phone_number,
            photo_url: self.photo_url,
            registration_number: self.registration_number,
            class_id: self.class_id,
            status: self
                .status
                .parse::<AdmissionStatus>()
                .unwrap_or(AdmissionStatus::Pending),
            applied_at: timestamp_to_datetime(self.applied_at),
            last_login: self.last_login.map(timestamp_to_datetime),
        }
    }
}
