//! Cross-origin policy for the browser frontend.

use actix_cors::Cors;
use actix_web::http::header;

const ALLOWED_METHODS: [&str; 7] = ["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];

/// Credentialed requests are accepted only from `frontend_url`, compared
/// verbatim with the `Origin` header, and may only carry `Content-Type`.
/// Without a frontend URL every cross-origin request is refused.
pub fn cors(frontend_url: Option<&str>) -> Cors {
    let allowed_origin = frontend_url.map(str::to_owned);

    Cors::default()
        .allowed_origin_fn(move |origin, _| {
            allowed_origin
                .as_deref()
                .is_some_and(|allowed| origin.as_bytes() == allowed.as_bytes())
        })
        .allowed_methods(ALLOWED_METHODS)
        .allowed_header(header::CONTENT_TYPE)
        .supports_credentials()
}
