use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{LeadershipProfile, StudentLifeItem};

// 按分类分组的校园生活条目
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct StudentLifeGroups {
    pub sports: Vec<StudentLifeItem>,
    pub clubs: Vec<StudentLifeItem>,
    pub boarding: Vec<StudentLifeItem>,
}

// 按分类分组的领导团队，组内按 display_order 升序
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct LeadershipGroups {
    pub admins: Vec<LeadershipProfile>,
    pub teachers: Vec<LeadershipProfile>,
    pub prefects: Vec<LeadershipProfile>,
    pub support: Vec<LeadershipProfile>,
}

// 联系表单结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct ContactResponse {
    pub delivered: bool,
}
