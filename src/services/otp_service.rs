use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::{rngs::OsRng, Rng};

use crate::entities::{otp::OtpPurpose, user::UserRole};
use crate::models::auth_model::{AuthResponse, ResetPasswordRequest, SignupWithOtpRequest};
use crate::repositories::{NewOtp, NewUser, OtpStore, UserStore};
use crate::services::auth_service::{ensure_identity_available, token_for, IDENTITY_TAKEN, IDENTITY_TAKEN_MESSAGE};
use crate::services::email_service::otp_email;
use crate::services::{dependency_error, CredentialIssuer, EmailSender};
use crate::utils::app_error::{AppError, AppResult};

pub const OTP_TTL_MINUTES: i64 = 10;

/// Uniform over 000000..=999999, zero padded.
pub fn generate_code() -> String {
    format!("{:06}", OsRng.gen_range(0..1_000_000u32))
}

/// One-time codes gating signup and password reset.
///
/// Per (email, purpose) a code moves `issued -> verified -> consumed`;
/// expiry is checked lazily whenever a record is looked up.
pub struct OtpService {
    users: Arc<dyn UserStore>,
    otps: Arc<dyn OtpStore>,
    mailer: Arc<dyn EmailSender>,
    credentials: Arc<dyn CredentialIssuer>,
    ttl: Duration,
}

impl OtpService {
    pub fn new(
        users: Arc<dyn UserStore>,
        otps: Arc<dyn OtpStore>,
        mailer: Arc<dyn EmailSender>,
        credentials: Arc<dyn CredentialIssuer>,
    ) -> Self {
        Self {
            users,
            otps,
            mailer,
            credentials,
            ttl: Duration::minutes(OTP_TTL_MINUTES),
        }
    }

    pub async fn issue(&self, email: &str, purpose: OtpPurpose) -> AppResult<()> {
        let existing = self.users.find_by_email(email).await?;
        match purpose {
            OtpPurpose::Signup => {
                if existing.is_some_and(|u| u.is_active) {
                    return Err(AppError::conflict("EMAIL_TAKEN", "Email is already registered"));
                }
            }
            OtpPurpose::ForgotPassword => {
                if existing.is_none() {
                    return Err(AppError::not_found("USER_NOT_FOUND", "No account uses this email"));
                }
            }
        }

        let superseded = self.otps.delete_unverified(email, purpose).await?;
        let code = generate_code();
        self.otps
            .insert(NewOtp {
                email: email.to_string(),
                code: code.clone(),
                purpose,
                expires_at: Utc::now() + self.ttl,
            })
            .await?;

        // A failed send leaves the record in place; the next issue replaces it.
        let (subject, html) = otp_email(&code, purpose, self.ttl.num_minutes());
        self.mailer
            .send(email, &subject, &html)
            .await
            .map_err(dependency_error("EMAIL_SEND_FAILED", "Failed to send verification email"))?;

        tracing::info!(email, ?purpose, superseded, "OTP issued");
        Ok(())
    }

    /// Marks the newest matching unverified code as verified. Does not
    /// consume it.
    pub async fn verify(&self, email: &str, code: &str) -> AppResult<()> {
        let record = self
            .otps
            .latest_unverified(email, code)
            .await?
            .ok_or_else(|| AppError::unauthorized("OTP_INVALID", "Invalid or already used code"))?;

        if record.is_expired_at(Utc::now()) {
            return Err(AppError::unauthorized("OTP_EXPIRED", "Code has expired"));
        }

        self.otps.mark_verified(record.id).await?;
        tracing::info!(email, purpose = ?record.purpose, "OTP verified");
        Ok(())
    }

    async fn consumable(&self, email: &str, code: &str, purpose: OtpPurpose) -> AppResult<i64> {
        let record = self
            .otps
            .latest_verified(email, code, purpose)
            .await?
            .ok_or_else(|| AppError::unauthorized("OTP_NOT_VERIFIED", "Code has not been verified"))?;

        if record.is_expired_at(Utc::now()) {
            return Err(AppError::unauthorized("OTP_EXPIRED", "Code has expired"));
        }
        Ok(record.id)
    }

    pub async fn signup(&self, req: SignupWithOtpRequest) -> AppResult<AuthResponse> {
        let otp_id = self.consumable(&req.email, &req.code, OtpPurpose::Signup).await?;
        ensure_identity_available(self.users.as_ref(), &req.username, &req.email).await?;

        let password_hash = self
            .credentials
            .hash(&req.password)
            .map_err(dependency_error("HASH_ERR", "Failed to hash password"))?;

        let user = self
            .users
            .create(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
                full_name: req.full_name,
                role: UserRole::User,
                email_verified: true,
            })
            .await
            .map_err(AppError::on_duplicate(IDENTITY_TAKEN, IDENTITY_TAKEN_MESSAGE))?;

        self.otps.delete(otp_id).await?;
        tracing::info!(user_id = user.id, email = %user.email, "account created via OTP");

        let token = token_for(self.credentials.as_ref(), &user)?;
        Ok(AuthResponse { token, user })
    }

    pub async fn reset_password(&self, req: ResetPasswordRequest) -> AppResult<()> {
        let otp_id = self.consumable(&req.email, &req.code, OtpPurpose::ForgotPassword).await?;

        let mut user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", "No account uses this email"))?;

        user.password_hash = self
            .credentials
            .hash(&req.new_password)
            .map_err(dependency_error("HASH_ERR", "Failed to hash password"))?;
        self.users.update(user).await?;

        self.otps.delete(otp_id).await?;
        tracing::info!(email = %req.email, "password reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CapturingMailer, FakeCredentials, InMemoryStore};

    struct Harness {
        store: InMemoryStore,
        mailer: CapturingMailer,
        service: OtpService,
    }

    fn harness() -> Harness {
        let store = InMemoryStore::new();
        let mailer = CapturingMailer::new();
        let service = OtpService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(mailer.clone()),
            Arc::new(FakeCredentials),
        );
        Harness { store, mailer, service }
    }

    fn signup_request(email: &str, code: &str) -> SignupWithOtpRequest {
        SignupWithOtpRequest {
            email: email.into(),
            code: code.into(),
            username: "bob".into(),
            password: "secret123".into(),
            full_name: Some("Bob".into()),
        }
    }

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn issue_leaves_exactly_one_live_code() {
        let h = harness();
        h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap();
        h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap();

        let live = h.store.otps_for("bob@x.com");
        assert_eq!(live.iter().filter(|o| !o.verified).count(), 1);
        let sent = h.mailer.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|m| m.to == "bob@x.com" && !m.subject.is_empty()));
    }

    #[tokio::test]
    async fn reissue_invalidates_the_first_code() {
        let h = harness();
        h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap();
        let first = h.mailer.last_code().unwrap();
        h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap();
        let second = h.mailer.last_code().unwrap();

        if first != second {
            let err = h.service.verify("bob@x.com", &first).await.unwrap_err();
            assert!(matches!(err, AppError::Unauthorized { .. }));
        }
        h.service.verify("bob@x.com", &second).await.unwrap();
    }

    #[tokio::test]
    async fn reverifying_fails() {
        let h = harness();
        h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap();
        let code = h.mailer.last_code().unwrap();

        h.service.verify("bob@x.com", &code).await.unwrap();
        let err = h.service.verify("bob@x.com", &code).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { code: "OTP_INVALID", .. }));
    }

    #[tokio::test]
    async fn expired_code_cannot_be_verified() {
        let h = harness();
        h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap();
        let code = h.mailer.last_code().unwrap();
        h.store.expire_otps("bob@x.com");

        let err = h.service.verify("bob@x.com", &code).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { code: "OTP_EXPIRED", .. }));
    }

    #[tokio::test]
    async fn signup_issue_conflicts_with_active_account() {
        let h = harness();
        h.store.seed_user("alice", "alice@x.com", UserRole::User);

        let err = h.service.issue("alice@x.com", OtpPurpose::Signup).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn reset_issue_requires_existing_account() {
        let h = harness();
        let err = h.service.issue("ghost@x.com", OtpPurpose::ForgotPassword).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn mail_failure_fails_issue_but_keeps_the_record() {
        let h = harness();
        h.mailer.fail(true);

        let err = h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap_err();
        assert!(matches!(err, AppError::Internal { code: "EMAIL_SEND_FAILED", .. }));
        assert_eq!(h.store.otps_for("bob@x.com").len(), 1);
    }

    #[tokio::test]
    async fn signup_requires_a_verified_code() {
        let h = harness();
        h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap();
        let code = h.mailer.last_code().unwrap();

        let err = h.service.signup(signup_request("bob@x.com", &code)).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { code: "OTP_NOT_VERIFIED", .. }));
    }

    #[tokio::test]
    async fn signup_rejects_expired_verified_code() {
        let h = harness();
        h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap();
        let code = h.mailer.last_code().unwrap();
        h.service.verify("bob@x.com", &code).await.unwrap();
        h.store.expire_otps("bob@x.com");

        let err = h.service.signup(signup_request("bob@x.com", &code)).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { code: "OTP_EXPIRED", .. }));
    }

    #[tokio::test]
    async fn signup_creates_verified_user_and_consumes_code() {
        let h = harness();
        h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap();
        let code = h.mailer.last_code().unwrap();
        h.service.verify("bob@x.com", &code).await.unwrap();

        let auth = h.service.signup(signup_request("bob@x.com", &code)).await.unwrap();
        assert_eq!(auth.user.username, "bob");
        assert!(auth.user.email_verified);
        assert!(auth.user.is_active);
        assert_eq!(auth.user.role, UserRole::User);
        assert_eq!(auth.token, format!("token:{}", auth.user.id));
        assert!(h.store.otps_for("bob@x.com").is_empty());

        // Consumed: the same code cannot finish a second signup.
        let err = h.service.signup(signup_request("bob@x.com", &code)).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn signup_rechecks_username() {
        let h = harness();
        h.store.seed_user("bob", "other@x.com", UserRole::User);
        h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap();
        let code = h.mailer.last_code().unwrap();
        h.service.verify("bob@x.com", &code).await.unwrap();

        let err = h.service.signup(signup_request("bob@x.com", &code)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { code: "USERNAME_TAKEN", .. }));
    }

    #[tokio::test]
    async fn signup_insert_race_conflicts_and_keeps_the_code() {
        let h = harness();
        h.service.issue("bob@x.com", OtpPurpose::Signup).await.unwrap();
        let code = h.mailer.last_code().unwrap();
        h.service.verify("bob@x.com", &code).await.unwrap();
        h.store.seed_user("bob", "bob@elsewhere.com", UserRole::User);
        h.store.stale_lookups();

        let err = h.service.signup(signup_request("bob@x.com", &code)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { code: "USERNAME_OR_EMAIL_TAKEN", .. }));
        assert_eq!(h.store.otps_for("bob@x.com").len(), 1);
    }

    #[tokio::test]
    async fn reset_password_replaces_hash_and_consumes_code() {
        let h = harness();
        let user = h.store.seed_user("alice", "alice@x.com", UserRole::User);
        h.service.issue("alice@x.com", OtpPurpose::ForgotPassword).await.unwrap();
        let code = h.mailer.last_code().unwrap();
        h.service.verify("alice@x.com", &code).await.unwrap();

        h.service
            .reset_password(ResetPasswordRequest {
                email: "alice@x.com".into(),
                code: code.clone(),
                new_password: "brand-new".into(),
            })
            .await
            .unwrap();

        let stored = h.store.user(user.id).unwrap();
        assert_eq!(stored.password_hash, "hashed:brand-new");
        assert!(h.store.otps_for("alice@x.com").is_empty());
    }

    #[tokio::test]
    async fn signup_code_cannot_reset_a_password() {
        let h = harness();
        h.service.issue("carol@x.com", OtpPurpose::Signup).await.unwrap();
        let code = h.mailer.last_code().unwrap();
        h.service.verify("carol@x.com", &code).await.unwrap();

        let err = h
            .service
            .reset_password(ResetPasswordRequest {
                email: "carol@x.com".into(),
                code,
                new_password: "whatever1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }
}
