use actix_web::{web, HttpResponse, Responder};

/// Largest body `/data` accepts; larger requests are answered with 413.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

const ACK_PREFIX: &[u8] = b"Received: ";

/// Mounts the mock traffic intake under `/data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/data")
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .route(web::post().to(receive_data))
            .default_service(web::route().to(method_not_allowed)),
    );
}

// The body is echoed byte for byte, whatever its encoding.
async fn receive_data(body: web::Bytes) -> impl Responder {
    let mut ack = Vec::with_capacity(ACK_PREFIX.len() + body.len());
    ack.extend_from_slice(ACK_PREFIX);
    ack.extend_from_slice(&body);
    HttpResponse::Ok().body(ack)
}

async fn method_not_allowed() -> impl Responder {
    HttpResponse::MethodNotAllowed().body("Invalid request method")
}
