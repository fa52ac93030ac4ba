/*!
 * 会话认证中间件
 *
 * 从签名的会话 Cookie 中解析 [`SessionContext`]，放入请求扩展后交给后续处理程序。
 * 没有有效会话的请求直接重定向到首页。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireSession;
 * use crate::models::SessionContext;
 *
 * cfg.service(
 *     web::resource("/schedule")
 *         .wrap(RequireSession)
 *         .route(web::get().to(schedule)),
 * );
 *
 * async fn schedule(session: SessionContext) -> HttpResponse {
 *     // session.user_id / session.role
 * }
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    error::InternalError,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::debug;

use crate::models::SessionContext;
use crate::utils::{SessionToken, redirect};

#[derive(Clone)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
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
        Box::pin(async move {
            match SessionToken::from_request(req.request()) {
                Some(session) => {
                    debug!(
                        "Session accepted for user {} ({})",
                        session.user_id, session.role
                    );
                    req.extensions_mut().insert(session);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                None => {
                    debug!("No valid session for request to {}", req.path());
                    Ok(req.into_response(redirect("/").map_into_right_body()))
                }
            }
        })
    }
}

impl RequireSession {
    /// 从请求扩展中提取会话上下文
    /// 此函数应该在应用了 RequireSession 中间件的路由处理程序中使用
    pub fn extract_session(req: &HttpRequest) -> Option<SessionContext> {
        req.extensions().get::<SessionContext>().cloned()
    }
}

// 处理程序直接以 SessionContext 作为参数
impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = RequireSession::extract_session(req)
            .or_else(|| SessionToken::from_request(req))
            .ok_or_else(|| InternalError::from_response("Login required", redirect("/")).into());
        ready(result)
    }
}
