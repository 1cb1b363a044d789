use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use crate::error::AppError;
use crate::utils::jwt::{Claims, JwtService};

/// Authenticated caller identity extracted from a validated JWT.
///
/// Carries only the stable user id; role resolution goes through the
/// AccessGuard profile lookup so every endpoint shares one authorization
/// path.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: uuid::Uuid,
    pub email: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        let user_id = uuid::Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Internal("Invalid user ID in claims".to_string()))?;

        Ok(Self {
            user_id,
            email: claims.email.clone(),
        })
    }
}

impl actix_web::FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let claims = req
                .extensions()
                .get::<Claims>()
                .cloned()
                .ok_or_else(|| AppError::Internal("Claims not found in request".to_string()))?;

            AuthenticatedUser::from_claims(&claims)
        })
    }
}

pub struct AuthMiddleware {
    jwt_service: Rc<JwtService>,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self {
            jwt_service: Rc::new(jwt_service),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            jwt_service: self.jwt_service.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    jwt_service: Rc<JwtService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let jwt_service = self.jwt_service.clone();
        let service = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "));

            let token = match auth_header {
                Some(token) => token,
                None => {
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({
                            "error": "missing_token",
                            "message": "Authorization token is required"
                        }))
                        .map_into_right_body();
                    return Ok(req.into_response(response));
                }
            };

            let claims = match jwt_service.validate_token(token) {
                Ok(claims) => claims,
                Err(_) => {
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({
                            "error": "invalid_token",
                            "message": "Token is invalid or expired"
                        }))
                        .map_into_right_body();
                    return Ok(req.into_response(response));
                }
            };

            if claims.token_type != "access" {
                let response = HttpResponse::Unauthorized()
                    .json(serde_json::json!({
                        "error": "invalid_token_type",
                        "message": "Access token required"
                    }))
                    .map_into_right_body();
                return Ok(req.into_response(response));
            }

            req.extensions_mut().insert(claims);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use uuid::Uuid;

    const TEST_SECRET: &str = "test-secret-key-that-is-long-enough-for-hs256";

    async fn test_handler(user: AuthenticatedUser) -> Result<HttpResponse, Error> {
        Ok(HttpResponse::Ok().json(serde_json::json!({ "user_id": user.user_id })))
    }

    #[actix_web::test]
    async fn rejects_missing_token() {
        let jwt_service = JwtService::new(TEST_SECRET).unwrap();
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service))
                .route("/test", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/test").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn rejects_invalid_token() {
        let jwt_service = JwtService::new(TEST_SECRET).unwrap();
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service))
                .route("/test", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn accepts_valid_token() {
        let jwt_service = JwtService::new(TEST_SECRET).unwrap();
        let token = jwt_service
            .generate_access_token(Uuid::new_v4(), "student@example.com".to_string())
            .unwrap();

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service))
                .route("/test", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
    }
}
