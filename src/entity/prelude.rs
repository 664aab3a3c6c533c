//! 预导入模块，方便使用

pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::gallery_items::{
    ActiveModel as GalleryItemActiveModel, Entity as GalleryItems, Model as GalleryItemModel,
};
pub use super::leadership_profiles::{
    ActiveModel as LeadershipProfileActiveModel, Entity as LeadershipProfiles,
    Model as LeadershipProfileModel,
};
pub use super::marks::{ActiveModel as MarkActiveModel, Entity as Marks, Model as MarkModel};
pub use super::school_updates::{
    ActiveModel as SchoolUpdateActiveModel, Entity as SchoolUpdates, Model as SchoolUpdateModel,
};
pub use super::staff_users::{
    ActiveModel as StaffUserActiveModel, Entity as StaffUsers, Model as StaffUserModel,
};
pub use super::student_applications::{
    ActiveModel as StudentApplicationActiveModel, Entity as StudentApplications,
    Model as StudentApplicationModel,
};
pub use super::student_life_items::{
    ActiveModel as StudentLifeItemActiveModel, Entity as StudentLifeItems,
    Model as StudentLifeItemModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teacher_classes::{
    ActiveModel as TeacherClassActiveModel, Entity as TeacherClasses, Model as TeacherClassModel,
};
pub use super::teacher_subjects::{
    ActiveModel as TeacherSubjectActiveModel, Entity as TeacherSubjects,
    Model as TeacherSubjectModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::terms::{ActiveModel as TermActiveModel, Entity as Terms, Model as TermModel};
