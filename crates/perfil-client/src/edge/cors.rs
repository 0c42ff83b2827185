use super::request::EdgeResponse;

pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "authorization, x-client-info, apikey, content-type, x-api-key",
    ),
    (
        "Access-Control-Allow-Methods",
        "GET, POST, PUT, DELETE, OPTIONS",
    ),
    ("Access-Control-Max-Age", "86400"),
];

pub fn apply_cors(mut response: EdgeResponse) -> EdgeResponse {
    for (name, value) in CORS_HEADERS {
        response.set_header(name, value);
    }
    response
}

pub fn preflight_response() -> EdgeResponse {
    apply_cors(EdgeResponse::text(200, "ok"))
}
