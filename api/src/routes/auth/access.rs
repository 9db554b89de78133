use actix_web::HttpResponse;

use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/user-auth
///
/// Session probe used by the storefront router before rendering
/// protected pages. The session guard has already verified the token;
/// reaching this handler means the caller is authenticated.
pub async fn user_auth(_auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

/// Handler for GET /api/v1/auth/admin-auth
///
/// Role probe for the back-office dashboard. The admin guard has
/// already checked the stored role for this request.
pub async fn admin_auth(_auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}
