/*!
 * 主体类型访问控制中间件
 *
 * 必须在 RequireSession 之后使用。
 *
 * ```rust,ignore
 * web::scope("/api/v1/staff")
 *     .wrap(RequirePrincipal::new(PrincipalKind::Staff))
 *     .wrap(RequireSession)
 * ```
 *
 * actix 中后注册的 wrap 先执行，所以 RequireSession 要写在后面。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    auth::entities::{PrincipalKind, Session},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequirePrincipal {
    allowed: Vec<PrincipalKind>,
}

impl RequirePrincipal {
    pub fn new(kind: PrincipalKind) -> Self {
        Self {
            allowed: vec![kind],
        }
    }

    /// 任一主体类型即可
    pub fn new_any(kinds: &[PrincipalKind]) -> Self {
        Self {
            allowed: kinds.to_vec(),
        }
    }

    fn permits(allowed: &[PrincipalKind], kind: PrincipalKind) -> bool {
        allowed.contains(&kind)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePrincipal
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePrincipalMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePrincipalMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequirePrincipalMiddleware<S> {
    service: Rc<S>,
    allowed: Vec<PrincipalKind>,
}

impl<S, B> Service<ServiceRequest> for RequirePrincipalMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let principal = req
                .extensions()
                .get::<Session>()
                .map(|session| session.principal.clone());

            match principal {
                Some(principal) if RequirePrincipal::permits(&allowed, principal.kind) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(principal) => {
                    info!(
                        "Access denied for {} {}. Allowed: {:?}",
                        principal.kind, principal.id, allowed
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied.",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Principal check failed: no session in request. Make sure RequireSession is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permits() {
        let staff_only = RequirePrincipal::new(PrincipalKind::Staff);
        assert!(RequirePrincipal::permits(
            &staff_only.allowed,
            PrincipalKind::Staff
        ));
        assert!(!RequirePrincipal::permits(
            &staff_only.allowed,
            PrincipalKind::Teacher
        ));

        let any = RequirePrincipal::new_any(&[PrincipalKind::Teacher, PrincipalKind::Staff]);
        assert!(RequirePrincipal::permits(&any.allowed, PrincipalKind::Teacher));
        assert!(!RequirePrincipal::permits(&any.allowed, PrincipalKind::Student));
    }
}
