//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod classes;
pub mod gallery_items;
pub mod leadership_profiles;
pub mod marks;
pub mod school_updates;
pub mod staff_users;
pub mod student_applications;
pub mod student_life_items;
pub mod students;
pub mod subjects;
pub mod teacher_classes;
pub mod teacher_subjects;
pub mod teachers;
pub mod terms;
