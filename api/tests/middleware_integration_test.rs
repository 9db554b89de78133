//! Integration tests for the session and admin guards, the health
//! probe, and the fallback route, over the fully assembled app.

mod common;

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use bv_api::app::create_app;
    use bv_core::domain::entities::user::UserRole;
    use bv_core::repositories::UserRepository;
    use bv_core::services::token::{TokenService, TokenServiceConfig};

    use super::common::{register_payload, test_state, TEST_JWT_SECRET};

    const EMAIL: &str = "jordan@bookverse.io";

    #[actix_web::test]
    async fn test_health_endpoint() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::get().uri("/health").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["status"], json!("healthy"));
        assert_eq!(body["service"], json!("bookverse-api"));
    }

    #[actix_web::test]
    async fn test_unknown_route_gets_error_envelope() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::get()
            .uri("/api/v1/auth/nonexistent")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("NOT_FOUND"));
    }

    #[actix_web::test]
    async fn test_user_auth_requires_bearer_token() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::get()
            .uri("/api/v1/auth/user-auth")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("UNAUTHORIZED"));

        // Wrong scheme
        let request = test::TestRequest::get()
            .uri("/api/v1/auth/user-auth")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Bearer, but not a token
        let request = test::TestRequest::get()
            .uri("/api/v1/auth/user-auth")
            .insert_header(("Authorization", "Bearer not-a-real-token"))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], json!("TOKEN_INVALID"));
    }

    #[actix_web::test]
    async fn test_user_auth_accepts_session_token() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload(EMAIL))
            .to_request();
        test::call_service(&app, request).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": EMAIL, "password": "turning-pages" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        let body: Value = test::read_body_json(response).await;
        let token = body["token"].as_str().unwrap().to_string();

        let request = test::TestRequest::get()
            .uri("/api/v1/auth/user-auth")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["ok"], json!(true));
    }

    #[actix_web::test]
    async fn test_expired_token_is_rejected() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        // Same secret, expiry already in the past
        let expired_issuer = TokenService::new(TokenServiceConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            session_token_expiry_days: -1,
        });
        let token = expired_issuer
            .issue_session_token(Uuid::new_v4())
            .unwrap()
            .token;

        let request = test::TestRequest::get()
            .uri("/api/v1/auth/user-auth")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], json!("TOKEN_EXPIRED"));
    }

    #[actix_web::test]
    async fn test_token_signed_with_other_secret_is_rejected() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let foreign_issuer =
            TokenService::new(TokenServiceConfig::new("some-other-secret"));
        let token = foreign_issuer
            .issue_session_token(Uuid::new_v4())
            .unwrap()
            .token;

        let request = test::TestRequest::get()
            .uri("/api/v1/auth/user-auth")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], json!("TOKEN_INVALID"));
    }

    #[actix_web::test]
    async fn test_admin_auth_rejects_ordinary_users() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload(EMAIL))
            .to_request();
        test::call_service(&app, request).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": EMAIL, "password": "turning-pages" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        let body: Value = test::read_body_json(response).await;
        let token = body["token"].as_str().unwrap().to_string();

        let request = test::TestRequest::get()
            .uri("/api/v1/auth/admin-auth")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], json!("FORBIDDEN"));
        assert_eq!(body["message"], json!("Insufficient permissions"));
    }

    #[actix_web::test]
    async fn test_admin_auth_reads_role_per_request() {
        let context = test_state();
        let app = test::init_service(create_app(context.state.clone())).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload(EMAIL))
            .to_request();
        test::call_service(&app, request).await;

        // Token issued while the account is still ordinary
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": EMAIL, "password": "turning-pages" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        let body: Value = test::read_body_json(response).await;
        let token = body["token"].as_str().unwrap().to_string();

        let request = test::TestRequest::get()
            .uri("/api/v1/auth/admin-auth")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let mut user = context
            .users
            .find_by_email(EMAIL)
            .await
            .unwrap()
            .expect("registered user");
        user.set_role(UserRole::Administrative);
        context.users.update(user).await.unwrap();

        // The guard reads the stored role, so the same token now passes
        let request = test::TestRequest::get()
            .uri("/api/v1/auth/admin-auth")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_admin_auth_without_session_is_unauthorized() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        // The session guard answers before the role check
        let request = test::TestRequest::get()
            .uri("/api/v1/auth/admin-auth")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_admin_auth_for_unknown_user_is_unauthorized() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        // Valid signature, but no account behind the id
        let issuer = TokenService::new(TokenServiceConfig::new(TEST_JWT_SECRET));
        let token = issuer.issue_session_token(Uuid::new_v4()).unwrap().token;

        let request = test::TestRequest::get()
            .uri("/api/v1/auth/admin-auth")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
