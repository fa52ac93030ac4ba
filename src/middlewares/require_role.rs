/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequireSession 中间件之后使用，角色判定交给 [`crate::policy::authorize`]。
 * 角色不符时重定向到首页。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::{RequireRole, RequireSession};
 * use crate::models::users::entities::UserRole;
 *
 * cfg.service(
 *     web::resource("/teacher/dashboard")
 *         .wrap(RequireRole::new(UserRole::Teacher))  // 后验证角色
 *         .wrap(RequireSession)                       // 先验证会话
 *         .route(web::get().to(teacher_dashboard)),
 * );
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{info, warn};

use crate::{
    middlewares::RequireSession,
    models::users::entities::UserRole,
    policy::{Access, Requirement, authorize},
    utils::redirect,
};

#[derive(Clone)]
pub struct RequireRole {
    requirement: Requirement,
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: UserRole) -> Self {
        Self {
            requirement: Requirement::Role(role),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            requirement: self.requirement.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    requirement: Requirement,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let requirement = self.requirement.clone();

        Box::pin(async move {
            let Some(session) = RequireSession::extract_session(req.request()) else {
                info!(
                    "Role check failed: no session in request. Make sure RequireSession middleware is applied first."
                );
                return Ok(req.into_response(redirect("/").map_into_right_body()));
            };

            match authorize(&session, None, &requirement) {
                Access::Allow => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Access::Deny(reason) => {
                    warn!(
                        "Access denied for user {} (role: {}) on {}: {:?}",
                        session.user_id,
                        session.role,
                        req.path(),
                        reason
                    );
                    Ok(req.into_response(redirect("/").map_into_right_body()))
                }
            }
        })
    }
}
