use serde::Deserialize;
use ts_rs::TS;

use super::entities::{LeadershipCategory, StudentLifeCategory, UpdateCategory};
use crate::models::common::validation::optional_text;
use crate::models::common::{FieldError, FieldErrors};
use crate::utils::validate::validate_media_url;

/// 媒体 URL 校验，返回去空白后的值
fn media_url(errors: &mut FieldErrors, field: &str, value: Option<String>) -> Option<String> {
    let url = optional_text(value)?;
    match validate_media_url(&url) {
        Ok(()) => Some(url),
        Err(msg) => {
            errors.push(field, msg);
            None
        }
    }
}

fn required_media_url(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    if optional_text(value.clone()).is_none() {
        errors.push(field, "This field is required");
        return None;
    }
    media_url(errors, field, value)
}

fn required_category<T: Copy>(errors: &mut FieldErrors, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.push("category", "This field is required");
    }
    value
}

// 发布学校公告
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct CreateSchoolUpdateRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category: Option<UpdateCategory>,
}

#[derive(Debug, Clone)]
pub struct NewSchoolUpdate {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: UpdateCategory,
}

impl CreateSchoolUpdateRequest {
    pub fn validate(self) -> Result<NewSchoolUpdate, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let title = errors.required("title", self.title.as_deref());
        let summary = errors.required("summary", self.summary.as_deref());
        let content = errors.required("content", self.content.as_deref());
        let category = required_category(&mut errors, self.category);
        errors.finish(|| {
            Some(NewSchoolUpdate {
                title: title?,
                summary: summary?,
                content: content?,
                category: category?,
            })
        })
    }
}

// 新增相册条目，图片和视频至少提供一个
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct CreateGalleryItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGalleryItem {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

impl CreateGalleryItemRequest {
    pub fn validate(self) -> Result<NewGalleryItem, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let title = errors.required("title", self.title.as_deref());
        let image_url = media_url(&mut errors, "image_url", self.image_url);
        let video_url = media_url(&mut errors, "video_url", self.video_url);
        if errors.is_empty() && image_url.is_none() && video_url.is_none() {
            errors.push("image_url", "Either an image or a video URL is required");
        }
        let description = optional_text(self.description);
        errors.finish(|| {
            Some(NewGalleryItem {
                title: title?,
                description,
                image_url,
                video_url,
            })
        })
    }
}

// 新增校园生活条目
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct CreateStudentLifeItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<StudentLifeCategory>,
}

#[derive(Debug, Clone)]
pub struct NewStudentLifeItem {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: StudentLifeCategory,
}

impl CreateStudentLifeItemRequest {
    pub fn validate(self) -> Result<NewStudentLifeItem, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let title = errors.required("title", self.title.as_deref());
        let description = errors.required("description", self.description.as_deref());
        let image_url = required_media_url(&mut errors, "image_url", self.image_url);
        let category = required_category(&mut errors, self.category);
        errors.finish(|| {
            Some(NewStudentLifeItem {
                title: title?,
                description: description?,
                image_url: image_url?,
                category: category?,
            })
        })
    }
}

// 新增领导团队成员
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct CreateLeadershipProfileRequest {
    pub name: Option<String>,
    pub position: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub passport_photo_url: Option<String>,
    pub category: Option<LeadershipCategory>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewLeadershipProfile {
    pub name: String,
    pub position: String,
    pub bio: Option<String>,
    pub image_url: String,
    pub passport_photo_url: Option<String>,
    pub category: LeadershipCategory,
    pub display_order: i32,
}

impl CreateLeadershipProfileRequest {
    pub fn validate(self) -> Result<NewLeadershipProfile, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", self.name.as_deref());
        let position = errors.required("position", self.position.as_deref());
        let image_url = required_media_url(&mut errors, "image_url", self.image_url);
        let passport_photo_url =
            media_url(&mut errors, "passport_photo_url", self.passport_photo_url);
        let category = required_category(&mut errors, self.category);
        let bio = optional_text(self.bio);
        let display_order = self.display_order.unwrap_or(0);
        errors.finish(|| {
            Some(NewLeadershipProfile {
                name: name?,
                position: position?,
                bio,
                image_url: image_url?,
                passport_photo_url,
                category: category?,
                display_order,
            })
        })
    }
}

// 联系表单
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "content.ts")]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(self) -> Result<ContactMessage, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let name = errors.required("name", self.name.as_deref());
        let email = errors.required_email("email", self.email.as_deref());
        let message = errors.required("message", self.message.as_deref());
        errors.finish(|| {
            Some(ContactMessage {
                name: name?,
                email: email?,
                message: message?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gallery_requires_some_media() {
        let errors = CreateGalleryItemRequest {
            title: Some("Sports day".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].field, "image_url");

        let item = CreateGalleryItemRequest {
            title: Some("Sports day".to_string()),
            video_url: Some("https://cdn.example.com/sports.mp4".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert!(item.image_url.is_none());
    }

    #[test]
    fn test_leadership_rejects_bad_url() {
        let errors = CreateLeadershipProfileRequest {
            name: Some("N. Mangena".to_string()),
            position: Some("Headmaster".to_string()),
            image_url: Some("ftp://files/mangena.png".to_string()),
            category: Some(LeadershipCategory::Admin),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].field, "image_url");
    }

    #[test]
    fn test_student_life_requires_category() {
        let errors = CreateStudentLifeItemRequest {
            title: Some("Debate Club".to_string()),
            description: Some("Provincial champions".to_string()),
            image_url: Some("/media/debate.jpg".to_string()),
            category: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].field, "category");
    }

    #[test]
    fn test_update_category_from_json() {
        let req: CreateSchoolUpdateRequest = serde_json::from_str(
            r#"{"title":"Open day","summary":"s","content":"c","category":"events"}"#,
        )
        .unwrap();
        assert_eq!(req.validate().unwrap().category, UpdateCategory::Events);
    }
}
