use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContentService;
use crate::models::ApiResponse;
use crate::models::content::entities::{
    LeadershipCategory, LeadershipProfile, StudentLifeCategory, StudentLifeItem,
};
use crate::models::content::responses::{LeadershipGroups, StudentLifeGroups};
use crate::services::error_response;

/// 首页展示的公告条数
pub const LATEST_UPDATES_LIMIT: u64 = 6;

/// 按分类拆分校园生活条目，保持输入顺序
pub fn group_student_life(items: Vec<StudentLifeItem>) -> StudentLifeGroups {
    let mut groups = StudentLifeGroups::default();
    for item in items {
        match item.category {
            StudentLifeCategory::Sport => groups.sports.push(item),
            StudentLifeCategory::Club => groups.clubs.push(item),
            StudentLifeCategory::Boarding => groups.boarding.push(item),
        }
    }
    groups
}

/// 按分类拆分领导团队，组内按 display_order 升序
pub fn group_leadership(mut profiles: Vec<LeadershipProfile>) -> LeadershipGroups {
    profiles.sort_by_key(|p| (p.display_order, p.id));
    let mut groups = LeadershipGroups::default();
    for profile in profiles {
        match profile.category {
            LeadershipCategory::Admin => groups.admins.push(profile),
            LeadershipCategory::Teacher => groups.teachers.push(profile),
            LeadershipCategory::Prefect => groups.prefects.push(profile),
            LeadershipCategory::Support => groups.support.push(profile),
        }
    }
    groups
}

pub async fn handle_latest_updates(
    service: &ContentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_school_updates(Some(LATEST_UPDATES_LIMIT)).await {
        Ok(updates) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updates,
            "Updates retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn handle_gallery(
    service: &ContentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_gallery_items().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Gallery retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn handle_student_life(
    service: &ContentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_student_life_items().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            group_student_life(items),
            "Student life retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn handle_leadership(
    service: &ContentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_leadership_profiles().await {
        Ok(profiles) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            group_leadership(profiles),
            "Leadership retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: i64, category: LeadershipCategory, display_order: i32) -> LeadershipProfile {
        LeadershipProfile {
            id,
            name: format!("Member {id}"),
            position: "Position".to_string(),
            bio: None,
            image_url: format!("/media/leadership/{id}.jpg"),
            passport_photo_url: None,
            category,
            display_order,
        }
    }

    fn life_item(id: i64, category: StudentLifeCategory) -> StudentLifeItem {
        StudentLifeItem {
            id,
            title: format!("Item {id}"),
            description: "Description".to_string(),
            image_url: format!("/media/life/{id}.jpg"),
            category,
            date_added: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_leadership_groups_are_ordered() {
        let groups = group_leadership(vec![
            profile(1, LeadershipCategory::Admin, 2),
            profile(2, LeadershipCategory::Prefect, 1),
            profile(3, LeadershipCategory::Admin, 1),
            profile(4, LeadershipCategory::Support, 0),
        ]);
        let admins: Vec<i64> = groups.admins.iter().map(|p| p.id).collect();
        assert_eq!(admins, vec![3, 1]);
        assert_eq!(groups.prefects.len(), 1);
        assert_eq!(groups.support.len(), 1);
        assert!(groups.teachers.is_empty());
    }

    #[test]
    fn test_student_life_groups() {
        let groups = group_student_life(vec![
            life_item(1, StudentLifeCategory::Club),
            life_item(2, StudentLifeCategory::Sport),
            life_item(3, StudentLifeCategory::Club),
        ]);
        assert_eq!(groups.sports.len(), 1);
        let clubs: Vec<i64> = groups.clubs.iter().map(|i| i.id).collect();
        assert_eq!(clubs, vec![1, 3]);
        assert!(groups.boarding.is_empty());
    }
}
