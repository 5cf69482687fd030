use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use models::{entrepreneur, organization};
use service::auth::domain::{LoginInput, Principal, RegisterInput};
use service::{entrepreneur_service, organization_service};

use crate::errors::ApiError;
use crate::state::ServerState;

use super::entrepreneurs::EntrepreneurPayload;
use super::organizations::OrganizationPayload;

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Registration may carry the owner's business records in the same request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub organization: Option<OrganizationPayload>,
    pub entrepreneur: Option<EntrepreneurPayload>,
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub owner: Principal,
    pub organization: Option<organization::Model>,
    pub entrepreneur: Option<entrepreneur::Model>,
}

/// Form body for login; `username` carries the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

fn auth_cookie(name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::seconds(max_age.as_secs() as i64));
    cookie
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie
}

#[utoipa::path(post, path = "/api/register", tag = "auth",
    request_body = crate::openapi::RegisterRequestDoc,
    responses(
        (status = 200, description = "Registered"),
        (status = 400, description = "Bad Request"),
        (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterRequest>,
) -> Result<Json<RegisterOutput>, ApiError> {
    let owner = state
        .auth
        .register(RegisterInput {
            name: input.name,
            email: input.email,
            phone: input.phone,
            password: input.password,
        })
        .await?;

    // Optional business records ride in the same request. A failure here
    // leaves the already-created owner in place; the client can retry the
    // record through its own endpoint.
    let mut org_out = None;
    if let Some(org) = input.organization {
        let created =
            organization_service::create_organization(&state.db, owner.id, org.into_new()).await?;
        org_out = Some(created);
    }

    let mut ie_out = None;
    if let Some(ie) = input.entrepreneur {
        let created = entrepreneur_service::create_entrepreneur(
            &state.db,
            owner.id,
            &ie.inn,
            &ie.ogrnip,
            ie.phone.as_deref(),
        )
        .await?;
        ie_out = Some(created);
    }

    Ok(Json(RegisterOutput { owner, organization: org_out, entrepreneur: ie_out }))
}

#[utoipa::path(post, path = "/api/login", tag = "auth",
    request_body(content = crate::openapi::LoginFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Logged in, cookies set"),
        (status = 400, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Json<Principal>), ApiError> {
    let session = state
        .auth
        .login(LoginInput { email: form.username, password: form.password })
        .await?;

    let issuer = state.auth.issuer();
    let jar = jar
        .add(auth_cookie(ACCESS_COOKIE, session.access_token, issuer.access_ttl()))
        .add(auth_cookie(REFRESH_COOKIE, session.refresh_token, issuer.refresh_ttl()));
    Ok((jar, Json(session.owner)))
}

/// Exchange the refresh cookie for a fresh access cookie.
#[utoipa::path(post, path = "/api/refresh", tag = "auth",
    responses(
        (status = 200, description = "New access cookie set"),
        (status = 401, description = "Refresh token missing or rejected")))]
pub async fn refresh(
    State(state): State<ServerState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), ApiError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Unauthenticated)?;
    let access = state.auth.refresh(&token).await?;
    let jar = jar.add(auth_cookie(ACCESS_COOKIE, access, state.auth.issuer().access_ttl()));
    Ok((jar, StatusCode::OK))
}

/// Clears both cookies; safe to call without a session.
#[utoipa::path(post, path = "/api/logout", tag = "auth",
    responses((status = 204, description = "Cookies cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar
        .remove(removal_cookie(ACCESS_COOKIE))
        .remove(removal_cookie(REFRESH_COOKIE));
    (jar, StatusCode::NO_CONTENT)
}

/// 全局中间件：除白名单外的所有路由都要求持有效 access token。
/// 校验通过后把 Principal 注入 request 扩展，供各 handler 做属主判断。
pub async fn require_owner(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path();
    let method = req.method();

    // 白名单:健康检查、登录注册与令牌刷新、指标、Swagger 文档、CORS 预检
    if path == "/"
        || path == "/health"
        || path == "/metrics"
        || path == "/api/login"
        || path == "/api/register"
        || path == "/api/refresh"
        || path == "/api/logout"
        || path.starts_with("/docs")
        || path.starts_with("/api-docs")
        || method == axum::http::Method::OPTIONS
    {
        return Ok(next.run(req).await);
    }

    // 读取 Authorization 头;如缺失则回退从 Cookie 中解析 access_token
    let token = bearer_token(&req).or_else(|| cookie_token(&req));

    let principal = state.auth.resolve_bearer(token.as_deref()).await?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<String> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    header.strip_prefix("Bearer ").map(|t| t.to_string())
}

fn cookie_token(req: &Request) -> Option<String> {
    let cookie_header = req
        .headers()
        .get(axum::http::header::COOKIE)?
        .to_str()
        .ok()?;
    for part in cookie_header.split(';') {
        if let Some(rest) = part.trim().strip_prefix("access_token=") {
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}
