//! HTTP tests for registration, login, answer-based password recovery,
//! and profile updates, running the full app over in-memory fixtures.

mod common;

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use bv_api::app::create_app;

    use super::common::{register_payload, test_state};

    #[actix_web::test]
    async fn test_register_creates_user() {
        let context = test_state();
        let app = test::init_service(create_app(context.state.clone())).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload("jordan@bookverse.io"))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["user"]["email"], json!("jordan@bookverse.io"));
        assert_eq!(body["user"]["role"], json!("ordinary"));
        assert!(body["user"].get("passwordHash").is_none());
        assert_eq!(context.users.count().await, 1);
    }

    #[actix_web::test]
    async fn test_register_normalizes_email_and_rejects_duplicates() {
        let context = test_state();
        let app = test::init_service(create_app(context.state.clone())).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload("Reader@BookVerse.io"))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["user"]["email"], json!("reader@bookverse.io"));

        // Same address, different casing
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload("reader@bookverse.io"))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("CONFLICT"));
        assert_eq!(
            body["message"],
            json!("Email already registered, please login")
        );
        assert_eq!(context.users.count().await, 1);
    }

    #[actix_web::test]
    async fn test_register_requires_name() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let mut payload = register_payload("jordan@bookverse.io");
        payload["name"] = json!("");
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(payload)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Required field: name"));
    }

    #[actix_web::test]
    async fn test_register_rejects_short_password() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let mut payload = register_payload("jordan@bookverse.io");
        payload["password"] = json!("ab");
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(payload)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body["message"],
            json!("Password is required and must be at least 3 characters long")
        );
    }

    #[actix_web::test]
    async fn test_login_returns_verifiable_session_token() {
        let context = test_state();
        let app = test::init_service(create_app(context.state.clone())).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload("jordan@bookverse.io"))
            .to_request();
        test::call_service(&app, request).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "password": "turning-pages"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["user"]["email"], json!("jordan@bookverse.io"));

        // The issued token decodes back to the logged-in user
        let token = body["token"].as_str().unwrap();
        let claims = context
            .state
            .token_service
            .verify_session_token(token)
            .unwrap();
        let user_id = Uuid::parse_str(body["user"]["id"].as_str().unwrap()).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[actix_web::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload("jordan@bookverse.io"))
            .to_request();
        test::call_service(&app, request).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "password": "not-the-password"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert!(body.get("token").is_none());
    }

    #[actix_web::test]
    async fn test_login_unknown_email_is_not_found() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "email": "nobody@bookverse.io",
                "password": "whatever"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], json!("NOT_FOUND"));
    }

    #[actix_web::test]
    async fn test_password_reset_with_security_answer() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload("jordan@bookverse.io"))
            .to_request();
        test::call_service(&app, request).await;

        // Sanity check: the original password logs in
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "password": "turning-pages"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/forgot-password")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "answer": "cycling",
                "newPassword": "chapter-two"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], json!("Password reset successfully"));

        // The old password no longer works
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "password": "turning-pages"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // The new one does
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "password": "chapter-two"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_reset_with_wrong_answer_leaves_password_unchanged() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload("jordan@bookverse.io"))
            .to_request();
        test::call_service(&app, request).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/forgot-password")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "answer": "swimming",
                "newPassword": "chapter-two"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["error"], json!("IDENTITY_MISMATCH"));
        assert_eq!(
            body["message"],
            json!("Identity details do not match our records")
        );

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "password": "turning-pages"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_forgot_password_unknown_email_is_not_found() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/forgot-password")
            .set_json(json!({
                "email": "nobody@bookverse.io",
                "answer": "cycling",
                "newPassword": "chapter-two"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_profile_update_requires_session() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::put()
            .uri("/api/v1/auth/profile")
            .set_json(json!({ "name": "Casey Morgan" }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("UNAUTHORIZED"));
    }

    #[actix_web::test]
    async fn test_profile_update_changes_fields() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload("jordan@bookverse.io"))
            .to_request();
        test::call_service(&app, request).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "password": "turning-pages"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        let body: Value = test::read_body_json(response).await;
        let token = body["token"].as_str().unwrap().to_string();

        let request = test::TestRequest::put()
            .uri("/api/v1/auth/profile")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({
                "name": "Casey Morgan",
                "address": "9 Annex Road"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["updatedUser"]["name"], json!("Casey Morgan"));
        assert_eq!(body["updatedUser"]["address"], json!("9 Annex Road"));
        assert_eq!(body["updatedUser"]["email"], json!("jordan@bookverse.io"));
    }

    #[actix_web::test]
    async fn test_profile_update_rotates_password() {
        let context = test_state();
        let app = test::init_service(create_app(context.state)).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_payload("jordan@bookverse.io"))
            .to_request();
        test::call_service(&app, request).await;

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "password": "turning-pages"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        let body: Value = test::read_body_json(response).await;
        let token = body["token"].as_str().unwrap().to_string();

        // Too short is rejected before anything changes
        let request = test::TestRequest::put()
            .uri("/api/v1/auth/profile")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "password": "xy" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = test::TestRequest::put()
            .uri("/api/v1/auth/profile")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "password": "new-chapter" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "password": "turning-pages"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({
                "email": "jordan@bookverse.io",
                "password": "new-chapter"
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
