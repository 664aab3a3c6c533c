//! 入学申请实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_name: String,
    pub email: String,
    #[sea_orm(unique)]
    pub registration_number: String,
    pub applied_class_id: Option<i64>,
    pub previous_grade_level: String,
    #[sea_orm(column_type = "Text")]
    pub previous_grade_results: String,
    pub status: String,
    pub is_registered: bool,
    pub submitted_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::AppliedClassId",
        to = "super::classes::Column::Id"
    )]
    AppliedClass,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppliedClass.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_application(self) -> crate::models::applications::entities::StudentApplication {
        use crate::models::applications::entities::{AdmissionStatus, StudentApplication};
        use crate::models::timestamp_to_datetime;

        StudentApplication {
            id: self.id,
            student_name: self.student_name,
            email: self.email,
            registration_number: self.registration_number,
            applied_class_id: self.applied_class_id,
            previous_grade_level: self.previous_grade_level,
            previous_grade_results: self.previous_grade_results,
            status: self
                .status
                .parse::<AdmissionStatus>()
                .unwrap_or(AdmissionStatus::Pending),
            is_registered: self.is_registered,
            submitted_at: timestamp_to_datetime(self.submitted_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
