use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 为内容分类枚举生成 Display / FromStr，字符串即数据库中的存储值
macro_rules! string_enum {
    ($name:ident { $($variant:ident => $value:literal),* $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)*
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }
    };
}

// 公告分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "content.ts")]
pub enum UpdateCategory {
    Events,
    Academics,
    Notices,
}

string_enum!(UpdateCategory {
    Events => "events",
    Academics => "academics",
    Notices => "notices",
});

// 校园生活分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "content.ts")]
pub enum StudentLifeCategory {
    Sport,
    Club,
    Boarding,
}

string_enum!(StudentLifeCategory {
    Sport => "sport",
    Club => "club",
    Boarding => "boarding",
});

// 领导团队分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "content.ts")]
pub enum LeadershipCategory {
    Admin,
    Teacher,
    Support,
    Prefect,
}

string_enum!(LeadershipCategory {
    Admin => "admin",
    Teacher => "teacher",
    Support => "support",
    Prefect => "prefect",
});

// 学校公告
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct SchoolUpdate {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: UpdateCategory,
    pub posted_on: chrono::DateTime<chrono::Utc>,
}

// 相册条目，媒体以 URL 引用
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct GalleryItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub date_added: chrono::DateTime<chrono::Utc>,
}

// 校园生活条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct StudentLifeItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: StudentLifeCategory,
    pub date_added: chrono::DateTime<chrono::Utc>,
}

// 领导团队成员
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct LeadershipProfile {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub bio: Option<String>,
    pub image_url: String,
    pub passport_photo_url: Option<String>,
    pub category: LeadershipCategory,
    pub display_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_strings() {
        assert_eq!(UpdateCategory::Notices.to_string(), "notices");
        assert_eq!("club".parse::<StudentLifeCategory>(), Ok(StudentLifeCategory::Club));
        assert_eq!(
            "prefect".parse::<LeadershipCategory>(),
            Ok(LeadershipCategory::Prefect)
        );
        assert!("principal".parse::<LeadershipCategory>().is_err());
    }
}
