use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::models::EmailMessage;
use crate::domain::notification::ports::Mailer;

/// Mailgun HTTP API client.
pub struct MailgunMailer {
    client: Client,
    api_url: String,
    domain: String,
    api_key: String,
}

impl MailgunMailer {
    /// # Arguments
    /// * `api_url` - API base, e.g. `https://api.mailgun.net/v3`
    /// * `domain` - Sending domain
    /// * `api_key` - Private API key
    pub fn new(
        api_url: String,
        domain: String,
        api_key: String,
    ) -> Result<Self, NotificationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            domain,
            api_key,
        })
    }
}

#[async_trait]
impl Mailer for MailgunMailer {
    async fn send_email(&self, message: EmailMessage) -> Result<(), NotificationError> {
        let to = message.to.as_str();
        tracing::debug!(
            to = %message.to.masked(),
            subject = %message.subject.chars().take(20).collect::<String>(),
            "Sending email"
        );

        let from = format!("Social Media App <postmaster@{}>", self.domain);
        let recipient = format!("{} <{}>", to, to);
        let form = [
            ("from", from.as_str()),
            ("to", recipient.as_str()),
            ("subject", message.subject.as_str()),
            ("text", message.body.as_str()),
        ];

        let response = self
            .client
            .post(format!("{}/{}/messages", self.api_url, self.domain))
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::ApiResponse(format!(
                "API request failed with status code of {}",
                status.as_u16()
            )));
        }

        tracing::debug!(to = %message.to.masked(), "Email accepted");
        Ok(())
    }
}
