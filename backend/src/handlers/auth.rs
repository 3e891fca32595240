use crate::{
    auth::{encode_jwt, hash_password, verify_password},
    config::Config,
    database::{repository::UserRepository, DbPool},
};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use shared::{ErrorResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use tracing::{debug, error, info, warn};

/// Register handler - creates a new user account
pub async fn register(
    State(pool): State<DbPool>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), (StatusCode, Json<ErrorResponse>)> {
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("[REGISTER] 🔐 NEW USER REGISTRATION REQUEST");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    debug!("   Username: {}", req.username);
    debug!("   Email: {}", req.email);

    // Validate input
    if req.username.len() < 3 {
        warn!("[REGISTER] ❌ Username too short");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Username must be at least 3 characters".to_string(),
            }),
        ));
    }

    if !req.email.contains('@') {
        warn!("[REGISTER] ❌ Invalid email format");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid email format".to_string(),
            }),
        ));
    }

    // Check if username already exists
    match UserRepository::find_by_username(&pool, &req.username).await {
        Ok(Some(_)) => {
            warn!("[REGISTER] ❌ Username already taken: {}", req.username);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Username already exists".to_string(),
                }),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            error!("[REGISTER] ❌ Database error checking username: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database error".to_string(),
                }),
            ));
        }
    }

    // Check if email already exists
    match UserRepository::find_by_email(&pool, &req.email).await {
        Ok(Some(_)) => {
            warn!("[REGISTER] ❌ Email already registered: {}", req.email);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Email already exists".to_string(),
                }),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            error!("[REGISTER] ❌ Database error checking email: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database error".to_string(),
                }),
            ));
        }
    }

    // Hash password
    debug!("[REGISTER] Hashing password...");
    let password_hash = match hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("[REGISTER] ❌ Password hashing failed: {}", e);
            return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })));
        }
    };

    // Create user
    debug!("[REGISTER] Creating user in database...");
    let user = match UserRepository::create(&pool, &req.username, &req.email, &password_hash).await
    {
        Ok(user) => user,
        Err(e) => {
            error!("[REGISTER] ❌ Failed to create user: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create user".to_string(),
                }),
            ));
        }
    };

    info!("[REGISTER] ✅ User created!");
    info!("   User ID: {}", user.id);
    info!("   Username: {}", user.username);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
        }),
    ))
}

/// Login handler - authenticates existing user
pub async fn login(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), (StatusCode, Json<ErrorResponse>)> {
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("[LOGIN] 🔓 LOGIN ATTEMPT");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    debug!("   Username: {}", req.username);

    let user = match UserRepository::find_by_username(&pool, &req.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("[LOGIN] ❌ User not found: {}", req.username);
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid username or password".to_string(),
                }),
            ));
        }
        Err(e) => {
            error!("[LOGIN] ❌ Database error: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database error".to_string(),
                }),
            ));
        }
    };

    // Verify password
    debug!("[LOGIN] Verifying password...");
    let is_valid = match verify_password(&req.password, &user.password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            error!("[LOGIN] ❌ Password verification error: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Authentication error".to_string(),
                }),
            ));
        }
    };

    if !is_valid {
        warn!("[LOGIN] ❌ Invalid password for user: {}", user.username);
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid username or password".to_string(),
            }),
        ));
    }

    // Generate JWT
    debug!("[LOGIN] Generating JWT token...");
    let token = match encode_jwt(
        user.id,
        user.username.clone(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    ) {
        Ok(token) => token,
        Err(e) => {
            error!("[LOGIN] ❌ JWT encoding failed: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to generate token".to_string(),
                }),
            ));
        }
    };

    info!("[LOGIN] ✅ User authenticated successfully!");
    info!("   User ID: {}", user.id);
    info!("   Username: {}", user.username);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token,
            username: user.username,
            email: user.email,
            balance: user.balance,
        }),
    ))
}
