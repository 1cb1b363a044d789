use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use residency_platform_backend::config::AppConfig;
use residency_platform_backend::database::{Database, DatabaseConfig};
use residency_platform_backend::error::AppError;
use residency_platform_backend::middleware::auth::AuthMiddleware;
use residency_platform_backend::services::{
    AccessGuard, AnalyticsService, BookingService, PaymentService,
};
use residency_platform_backend::utils::jwt::JwtService;
use residency_platform_backend::handlers;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    info!(
        "Starting Residency Platform Backend on {}:{}",
        config.host, config.port
    );

    let database = Database::new(DatabaseConfig::new(&config.database_url)).await?;
    database.migrate().await?;

    let jwt_service = JwtService::new(&config.jwt_secret)?;

    let access_guard = AccessGuard::new(database.pool().clone());
    let booking_service = BookingService::new(database.pool().clone());
    let payment_service = PaymentService::new(database.pool().clone());
    let analytics_service = AnalyticsService::new(database.pool().clone());

    let bind_addr = format!("{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(database.clone()))
            .app_data(web::Data::new(access_guard.clone()))
            .app_data(web::Data::new(booking_service.clone()))
            .app_data(web::Data::new(payment_service.clone()))
            .app_data(web::Data::new(analytics_service.clone()))
            .service(
                web::scope("/api/v1")
                    .service(handlers::health::health_check)
                    .service(
                        web::scope("/bookings")
                            .wrap(AuthMiddleware::new(jwt_service.clone()))
                            .route("", web::post().to(handlers::bookings::create_booking))
                            .route(
                                "/{booking_id}",
                                web::get().to(handlers::bookings::get_booking),
                            )
                            .route(
                                "/{booking_id}/check-in",
                                web::post().to(handlers::bookings::check_in),
                            )
                            .route(
                                "/{booking_id}/check-out",
                                web::post().to(handlers::bookings::check_out),
                            )
                            .route(
                                "/{booking_id}/cancel",
                                web::post().to(handlers::bookings::cancel),
                            )
                            .route(
                                "/{booking_id}/maintenance",
                                web::post().to(handlers::bookings::set_maintenance),
                            ),
                    )
                    .service(
                        web::scope("/payments")
                            .wrap(AuthMiddleware::new(jwt_service.clone()))
                            .route(
                                "/{payment_id}/verify",
                                web::post().to(handlers::payments::verify_bank_transfer),
                            ),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(AuthMiddleware::new(jwt_service.clone()))
                            .route(
                                "/analytics",
                                web::get().to(handlers::analytics::admin_analytics),
                            ),
                    ),
            )
            // Gateway webhooks carry their own signature; no bearer auth.
            .service(web::scope("/webhooks").service(handlers::webhooks::payment_webhook))
    })
    .bind(bind_addr)?
    .run()
    .await
    .map_err(AppError::from)
}
