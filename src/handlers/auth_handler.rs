use axum::{extract::State, response::IntoResponse, Extension};

use crate::config::AppState;
use crate::models::auth_model::{
    CurrentUser, LoginRequest, RegisterRequest, ResetPasswordRequest, SendOtpRequest, SignupWithOtpRequest,
    UpdateInterestsRequest, VerifyOtpRequest,
};
use crate::utils::api_response::ResponseBuilder;
use crate::utils::app_error::AppResult;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn register_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let auth = state.auth_service.register(payload).await?;
    Ok(ResponseBuilder::created("AUTH_REGISTER_SUCCESS", "User registered successfully", auth))
}

pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let auth = state.auth_service.login(payload).await?;
    Ok(ResponseBuilder::success("AUTH_LOGIN_SUCCESS", "Login successful", auth))
}

pub async fn send_otp_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SendOtpRequest>,
) -> AppResult<impl IntoResponse> {
    state.otp_service.issue(&payload.email, payload.purpose).await?;
    Ok(ResponseBuilder::message("OTP_SENT", "Verification code sent to your email"))
}

pub async fn verify_otp_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyOtpRequest>,
) -> AppResult<impl IntoResponse> {
    state.otp_service.verify(&payload.email, &payload.code).await?;
    Ok(ResponseBuilder::message("OTP_VERIFIED", "Email verified successfully"))
}

pub async fn signup_with_otp_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupWithOtpRequest>,
) -> AppResult<impl IntoResponse> {
    let auth = state.otp_service.signup(payload).await?;
    Ok(ResponseBuilder::created("AUTH_SIGNUP_SUCCESS", "Account created successfully", auth))
}

pub async fn reset_password_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<impl IntoResponse> {
    state.otp_service.reset_password(payload).await?;
    Ok(ResponseBuilder::message("PASSWORD_RESET_SUCCESS", "Password updated successfully"))
}

pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let profile = state.auth_service.profile(&user.caller()).await?;
    Ok(ResponseBuilder::success("PROFILE_FETCHED", "Profile fetched successfully", profile))
}

pub async fn update_interests_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateInterestsRequest>,
) -> AppResult<impl IntoResponse> {
    let profile = state
        .auth_service
        .update_interests(&user.caller(), payload.interests)
        .await?;
    Ok(ResponseBuilder::success("INTERESTS_UPDATED", "Interests updated successfully", profile))
}
