use std::net::TcpListener;

use actix_files::Files;
use actix_web::dev::Server;
use actix_web::error::InternalError;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::mail::Mailer;
use crate::routes::health::health_check;
use crate::routes::legacy::{legacy_audit, legacy_demo};
use crate::routes::send_audit::send_audit;
use crate::routes::send_demo::send_demo;

pub fn run(
    listener: TcpListener,
    mailer: Mailer,
    static_dir: String,
) -> Result<Server, std::io::Error> {
    let mailer = web::Data::new(mailer);
    Ok(HttpServer::new(move || {
        // malformed or incomplete JSON must come back in the same shape as
        // handler-level validation failures
        let api_json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(serde_json::json!({ "ok": false, "error": "payload" }));
            InternalError::from_response(err, response).into()
        });
        let legacy_json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "message": "Некорректный формат заявки.",
            }));
            InternalError::from_response(err, response).into()
        });

        App::new()
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .app_data(api_json_config)
                    .route("/send-demo", web::post().to(send_demo))
                    .route("/send-audit", web::post().to(send_audit)),
            )
            .service(
                web::resource("/demo-request")
                    .app_data(legacy_json_config.clone())
                    .route(web::post().to(legacy_demo)),
            )
            .service(
                web::resource("/audit-request")
                    .app_data(legacy_json_config)
                    .route(web::post().to(legacy_audit)),
            )
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
            .app_data(mailer.clone())
    })
    .listen(listener)?
    .run())
}
