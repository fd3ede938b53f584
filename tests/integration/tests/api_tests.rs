//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, cookie_header, cookie_values, fixtures::*,
    set_cookie_lines, TestServer, API_KEY_HEADER,
};
use reqwest::{header::COOKIE, Method, StatusCode};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_signup_sets_session_cookies() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    let response = server.post("/api/auth/signup", &request).await.unwrap();

    let lines = set_cookie_lines(&response);
    let token_line = lines
        .iter()
        .find(|line| line.starts_with("token="))
        .expect("access cookie missing");
    let refresh_line = lines
        .iter()
        .find(|line| line.starts_with("refresh_token="))
        .expect("refresh cookie missing");

    for line in [token_line, refresh_line] {
        assert!(line.contains("HttpOnly"), "not HttpOnly: {line}");
        assert!(line.contains("Secure"), "not Secure: {line}");
        assert!(line.contains("SameSite=Strict"), "wrong SameSite: {line}");
        assert!(line.contains("Path=/"), "wrong Path: {line}");
    }
    assert!(token_line.contains("Max-Age=900"));
    assert!(refresh_line.contains("Max-Age=604800"));

    let cookies = cookie_values(&response);
    let body: SignupResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(!body.token.is_empty());
    assert_eq!(cookies.get("token"), Some(&body.token));
    assert!(!cookies["refresh_token"].is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    // First signup
    let response = server.post("/api/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Second signup with same email
    let response = server.post("/api/auth/signup", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "EMAIL_TAKEN");
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest {
        email: "not-an-email".to_string(),
        password: "p1".to_string(),
    };

    let response = server.post("/api/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_returns_success_and_cookies() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup = SignupRequest::unique();
    server.post("/api/auth/signup", &signup).await.unwrap();

    let login = LoginRequest::from_signup(&signup);
    let response = server.post("/api/auth/login", &login).await.unwrap();

    let cookies = cookie_values(&response);
    let body: SuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(body.success);
    assert!(!cookies["token"].is_empty());
    assert!(!cookies["refresh_token"].is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup = SignupRequest::unique();
    server.post("/api/auth/signup", &signup).await.unwrap();

    // Unknown account
    let unknown = LoginRequest {
        email: format!("missing-{}@example.com", uuid::Uuid::new_v4()),
        password: "p1".to_string(),
    };
    let response = server.post("/api/auth/login", &unknown).await.unwrap();
    let unknown_status = response.status();
    let unknown_body = response.text().await.unwrap();

    // Known account, wrong password
    let wrong = LoginRequest {
        email: signup.email.clone(),
        password: "wrong".to_string(),
    };
    let response = server.post("/api/auth/login", &wrong).await.unwrap();
    let wrong_status = response.status();
    let wrong_body = response.text().await.unwrap();

    // Same status and byte-identical body either way
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn test_me_accepts_bearer_and_cookie() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup).await.unwrap();
    let auth: SignupResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Bearer header
    let response = server.get_auth("/api/auth/me", &auth.token).await.unwrap();
    let me: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, signup.email);

    // Session cookie
    let cookies = cookie_header(&[("token", &auth.token)]);
    let response = server.get_with_cookies("/api/auth/me", &cookies).await.unwrap();
    let me: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, signup.email);

    // No credentials at all
    let response = server.get("/api/auth/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rotates_the_cookie_secret() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup).await.unwrap();
    let first_secret = cookie_values(&response)["refresh_token"].clone();

    // Redeem the secret
    let cookies = cookie_header(&[("refresh_token", &first_secret)]);
    let response = server
        .post_with_cookies("/api/auth/refresh", &cookies)
        .await
        .unwrap();
    let rotated = cookie_values(&response);
    let body: SuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);

    let second_secret = rotated["refresh_token"].clone();
    assert!(!rotated["token"].is_empty());
    assert_ne!(second_secret, first_secret);

    // The spent secret no longer works
    let response = server
        .post_with_cookies("/api/auth/refresh", &cookies)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Its replacement does
    let cookies = cookie_header(&[("refresh_token", &second_secret)]);
    let response = server
        .post_with_cookies("/api/auth/refresh", &cookies)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rejects_unfamiliar_client() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup).await.unwrap();
    let secret = cookie_values(&response)["refresh_token"].clone();
    let cookies = cookie_header(&[("refresh_token", &secret)]);

    // Same secret from a different network address
    let response = server
        .request(Method::POST, "/api/auth/refresh")
        .header(COOKIE, &cookies)
        .header("cf-connecting-ip", "198.51.100.9")
        .send()
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "SUSPICIOUS_CLIENT");

    // The rejection did not burn the secret; its owner can still rotate
    let response = server
        .post_with_cookies("/api/auth/refresh", &cookies)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_refresh_without_cookie_is_unauthorized() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .request(Method::POST, "/api/auth/refresh")
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_clears_cookies_and_revokes() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup).await.unwrap();
    let secret = cookie_values(&response)["refresh_token"].clone();
    let cookies = cookie_header(&[("refresh_token", &secret)]);

    // Logout clears both cookies
    let response = server
        .post_with_cookies("/api/auth/logout", &cookies)
        .await
        .unwrap();
    let lines = set_cookie_lines(&response);
    assert!(lines
        .iter()
        .any(|line| line.starts_with("token=;") && line.contains("Max-Age=0")));
    assert!(lines
        .iter()
        .any(|line| line.starts_with("refresh_token=;") && line.contains("Max-Age=0")));
    let body: LogoutResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.ok);

    // The revoked secret is dead
    let response = server
        .post_with_cookies("/api/auth/refresh", &cookies)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Logging out again without any cookie still succeeds
    let response = server
        .request(Method::POST, "/api/auth/logout")
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// API Key Tests
// ============================================================================

#[tokio::test]
async fn test_api_key_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup).await.unwrap();
    let auth: SignupResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Issue a labeled key
    let request = CreateApiKeyRequest {
        label: Some("CI probe".to_string()),
    };
    let response = server
        .post_auth("/api/api-keys", &auth.token, &request)
        .await
        .unwrap();
    let created: ApiKeyCreatedResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(!created.api_key.is_empty());

    // The listing shows it, without the secret
    let response = server.get_auth("/api/api-keys", &auth.token).await.unwrap();
    let keys: Vec<ApiKeyResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let listed = keys.iter().find(|k| k.id == created.id).expect("key not listed");
    assert_eq!(listed.label.as_deref(), Some("CI probe"));

    // Relabel
    let request = UpdateApiKeyRequest {
        label: Some("renamed".to_string()),
    };
    let response = server
        .patch_auth(&format!("/api/api-keys/{}", created.id), &auth.token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/api-keys", &auth.token).await.unwrap();
    let keys: Vec<ApiKeyResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let listed = keys.iter().find(|k| k.id == created.id).expect("key not listed");
    assert_eq!(listed.label.as_deref(), Some("renamed"));

    // Revoke
    let response = server
        .delete_auth(&format!("/api/api-keys/{}", created.id), &auth.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/api-keys", &auth.token).await.unwrap();
    let keys: Vec<ApiKeyResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!keys.iter().any(|k| k.id == created.id));
}

#[tokio::test]
async fn test_api_key_without_body_is_unlabeled() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let signup = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &signup).await.unwrap();
    let auth: SignupResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // POST with no body at all
    let response = server
        .request(Method::POST, "/api/api-keys")
        .bearer_auth(&auth.token)
        .send()
        .await
        .unwrap();
    let created: ApiKeyCreatedResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get_auth("/api/api-keys", &auth.token).await.unwrap();
    let keys: Vec<ApiKeyResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let listed = keys.iter().find(|k| k.id == created.id).expect("key not listed");
    assert!(listed.label.is_none());
}

// ============================================================================
// Device Tests
// ============================================================================

/// Signup and return the access token
async fn signup(server: &TestServer) -> SignupResponse {
    let request = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

/// Register a fresh device and return its uuid
async fn register_device(server: &TestServer, token: &str) -> String {
    let request = RegisterDeviceRequest::unique();
    let response = server.post_auth("/api/devices", token, &request).await.unwrap();
    let registered: DeviceRegisteredResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(registered.success);
    registered.device.uuid
}

/// Issue an API key for the session
async fn issue_key(server: &TestServer, token: &str) -> ApiKeyCreatedResponse {
    let request = CreateApiKeyRequest { label: None };
    let response = server.post_auth("/api/api-keys", token, &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

#[tokio::test]
async fn test_device_register_and_list() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;

    let request = RegisterDeviceRequest::unique();
    let response = server
        .post_auth("/api/devices", &auth.token, &request)
        .await
        .unwrap();
    let registered: DeviceRegisteredResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(registered.device.uuid, request.uuid);
    assert_eq!(registered.device.battery_level, Some(87));

    // The listing is fresh, never cached
    let response = server.get_auth("/api/devices", &auth.token).await.unwrap();
    let cache_control = response
        .headers()
        .get("cache-control")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(cache_control.contains("no-store"), "got: {cache_control}");

    let devices: Vec<DeviceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(devices.iter().any(|d| d.uuid == request.uuid));
}

#[tokio::test]
async fn test_duplicate_device_uuid_conflicts() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;

    let request = RegisterDeviceRequest::unique();
    let response = server
        .post_auth("/api/devices", &auth.token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth("/api/devices", &auth.token, &request)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "DEVICE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_telemetry_update_via_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let uuid = register_device(&server, &auth.token).await;

    let update = UpdateTelemetryRequest {
        battery_level: Some(54),
        is_charging: Some(true),
        temperature: Some(33.8),
        voltage: None,
        os_version: None,
    };
    let response = server
        .put_auth(&format!("/api/devices/{uuid}"), &auth.token, &update)
        .await
        .unwrap();
    let body: SuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);

    // The battery endpoint reflects the report; unmentioned readings clear
    let response = server
        .get_auth(&format!("/api/battery/{uuid}"), &auth.token)
        .await
        .unwrap();
    let battery: BatteryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(battery.data.battery_level, Some(54));
    assert!(battery.data.is_charging);
    assert_eq!(battery.data.temperature, Some(33.8));
    assert!(battery.data.voltage.is_none());
}

#[tokio::test]
async fn test_telemetry_update_via_api_key() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let uuid = register_device(&server, &auth.token).await;
    let key = issue_key(&server, &auth.token).await;

    // Key alone, no session anywhere
    let update = UpdateTelemetryRequest {
        battery_level: Some(12),
        is_charging: Some(false),
        temperature: None,
        voltage: None,
        os_version: None,
    };
    let response = server
        .put_with_key(&format!("/api/devices/{uuid}"), &key.api_key, &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // An expired or garbage session token degrades to the key
    let response = server
        .request(Method::PUT, &format!("/api/devices/{uuid}"))
        .bearer_auth("not.a.token")
        .header(API_KEY_HEADER, &key.api_key)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/battery/{uuid}"), &auth.token)
        .await
        .unwrap();
    let battery: BatteryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(battery.data.battery_level, Some(12));
}

#[tokio::test]
async fn test_api_key_cannot_touch_foreign_device() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Owner registers a device
    let owner = signup(&server).await;
    let uuid = register_device(&server, &owner.token).await;

    // A different account issues its own key
    let stranger = signup(&server).await;
    let stranger_key = issue_key(&server, &stranger.token).await;

    let update = UpdateTelemetryRequest {
        battery_level: Some(1),
        is_charging: None,
        temperature: None,
        voltage: None,
        os_version: None,
    };
    let response = server
        .put_with_key(&format!("/api/devices/{uuid}"), &stranger_key.api_key, &update)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "NOT_DEVICE_OWNER");

    // A key nobody issued is rejected outright
    let response = server
        .put_with_key(&format!("/api/devices/{uuid}"), "fabricated-key", &update)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "FORBIDDEN");
}

#[tokio::test]
async fn test_revoked_key_is_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let uuid = register_device(&server, &auth.token).await;
    let key = issue_key(&server, &auth.token).await;

    let update = UpdateTelemetryRequest {
        battery_level: Some(40),
        is_charging: None,
        temperature: None,
        voltage: None,
        os_version: None,
    };

    // Works before revocation
    let response = server
        .put_with_key(&format!("/api/devices/{uuid}"), &key.api_key, &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/api-keys/{}", key.id), &auth.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Dead afterwards
    let response = server
        .put_with_key(&format!("/api/devices/{uuid}"), &key.api_key, &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_device_delete_via_api_key() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let uuid = register_device(&server, &auth.token).await;
    let key = issue_key(&server, &auth.token).await;

    let response = server
        .delete_with_key(&format!("/api/devices/{uuid}"), &key.api_key)
        .await
        .unwrap();
    let body: SuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);

    // Gone for the session as well
    let response = server
        .get_auth(&format!("/api/battery/{uuid}"), &auth.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_metadata_patch_requires_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let uuid = register_device(&server, &auth.token).await;
    let key = issue_key(&server, &auth.token).await;

    let update = UpdateDeviceRequest {
        name: Some("Kitchen tablet".to_string()),
        brand: None,
        model: None,
        model_number: None,
    };

    // An API key is not enough for metadata edits
    let response = server
        .request(Method::PATCH, &format!("/api/devices/{uuid}"))
        .header(API_KEY_HEADER, &key.api_key)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // A session is
    let response = server
        .patch_auth(&format!("/api/devices/{uuid}"), &auth.token, &update)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/devices", &auth.token).await.unwrap();
    let devices: Vec<DeviceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let device = devices.iter().find(|d| d.uuid == uuid).expect("device not listed");
    assert_eq!(device.name, "Kitchen tablet");
    assert_eq!(device.brand.as_deref(), Some("Google"));
}

#[tokio::test]
async fn test_invalid_bearer_alone_is_unauthorized() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let uuid = register_device(&server, &auth.token).await;

    let update = UpdateTelemetryRequest {
        battery_level: Some(5),
        is_charging: None,
        temperature: None,
        voltage: None,
        os_version: None,
    };
    let response = server
        .put_auth(&format!("/api/devices/{uuid}"), "not.a.token", &update)
        .await
        .unwrap();

    // Every token failure renders the same body
    let status = response.status();
    let error: ErrorResponse = response.json().await.unwrap();
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error.error.code, "UNAUTHORIZED");
    assert_eq!(error.error.message, "Invalid or expired token");
}
