use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::content::requests::{ContactMessage, ContactRequest};
use crate::models::content::responses::ContactResponse;
use crate::notifier::{Notifier, OutboundMessage};
use crate::services::{notifier_from_request, validation_error_response};

/// 把联系表单转发给学校管理员邮箱，投递失败只报告不报错
pub async fn forward_contact_message(notifier: &dyn Notifier, contact: ContactMessage) -> bool {
    let message = OutboundMessage::new(
        AppConfig::get().app.admin_email.clone(),
        format!("New contact message from {}", contact.name),
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            contact.name, contact.email, contact.message
        ),
    );

    match notifier.send(message).await {
        Ok(()) => {
            info!("Contact message from {} forwarded", contact.email);
            true
        }
        Err(e) => {
            warn!("Failed to forward contact message: {}", e);
            false
        }
    }
}

pub async fn handle_contact(
    request: &HttpRequest,
    body: ContactRequest,
) -> ActixResult<HttpResponse> {
    let contact = match body.validate() {
        Ok(contact) => contact,
        Err(errors) => return Ok(validation_error_response(errors)),
    };

    let notifier = notifier_from_request(request);
    let delivered = forward_contact_message(notifier.as_ref(), contact).await;
    let message = if delivered {
        "Your message has been sent"
    } else {
        "Your message could not be delivered, please try again later"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(ContactResponse { delivered }, message)))
}
