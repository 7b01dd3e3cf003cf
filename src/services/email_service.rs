use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::Config;
use crate::entities::otp::OtpPurpose;
use crate::services::{BoxError, EmailSender};

const BREVO_ENDPOINT: &str = "https://api.brevo.com/v3/smtp/email";
const SENDER_NAME: &str = "Prompt Gallery";

#[derive(Serialize)]
struct MailpitContact {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
}

#[derive(Serialize)]
struct MailpitPayload {
    #[serde(rename = "From")]
    from: MailpitContact,
    #[serde(rename = "To")]
    to: Vec<MailpitContact>,
    #[serde(rename = "Subject")]
    subject: String,
    #[serde(rename = "HTML")]
    html: String,
}

#[derive(Serialize)]
struct BrevoContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    email: String,
}

#[derive(Serialize)]
struct BrevoPayload {
    sender: BrevoContact,
    to: Vec<BrevoContact>,
    subject: String,
    #[serde(rename = "htmlContent")]
    html_content: String,
}

/// Transactional mail: Brevo when an API key is configured, otherwise a
/// local Mailpit instance.
#[derive(Clone)]
pub struct EmailService {
    client: Client,
    api_key: String,
    from_email: String,
    mailpit_url: String,
}

impl EmailService {
    pub fn new(config: &Config) -> Self {
        if config.brevo_api_key.is_empty() {
            tracing::warn!(mailpit = %config.mailpit_url, "BREVO_API_KEY not set; mail goes to Mailpit");
        }
        Self {
            client: Client::new(),
            api_key: config.brevo_api_key.clone(),
            from_email: config.smtp_from.clone(),
            mailpit_url: config.mailpit_url.clone(),
        }
    }

    fn uses_brevo(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn send_via_brevo(&self, to: &str, subject: &str, html: &str) -> Result<(), BoxError> {
        let payload = BrevoPayload {
            sender: BrevoContact { name: Some(SENDER_NAME.to_string()), email: self.from_email.clone() },
            to: vec![BrevoContact { name: None, email: to.to_string() }],
            subject: subject.to_string(),
            html_content: html.to_string(),
        };

        let response = self
            .client
            .post(BREVO_ENDPOINT)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(format!("Brevo API error: {}", error_text).into())
        }
    }

    async fn send_via_mailpit(&self, to: &str, subject: &str, html: &str) -> Result<(), BoxError> {
        let payload = MailpitPayload {
            from: MailpitContact { name: SENDER_NAME.into(), email: self.from_email.clone() },
            to: vec![MailpitContact { name: String::new(), email: to.to_string() }],
            subject: subject.to_string(),
            html: html.to_string(),
        };

        let response = self.client.post(&self.mailpit_url).json(&payload).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(format!("Mailpit error: {}", error_text).into())
        }
    }
}

#[async_trait]
impl EmailSender for EmailService {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), BoxError> {
        if self.uses_brevo() {
            self.send_via_brevo(to, subject, html_body).await
        } else {
            self.send_via_mailpit(to, subject, html_body).await
        }
    }
}

/// Subject and HTML body for an OTP message.
pub fn otp_email(code: &str, purpose: OtpPurpose, ttl_minutes: i64) -> (String, String) {
    let (subject, intro) = match purpose {
        OtpPurpose::Signup => ("Verify your email", "Use this code to finish creating your account:"),
        OtpPurpose::ForgotPassword => ("Reset your password", "Use this code to reset your password:"),
    };
    let html = format!(
        "<h3>{subject}</h3>\
         <p>{intro}</p>\
         <p style=\"font-size:24px;letter-spacing:4px\"><strong>{code}</strong></p>\
         <p>The code expires in {ttl_minutes} minutes. If you didn't request it, ignore this email.</p>"
    );
    (subject.to_string(), html)
}
