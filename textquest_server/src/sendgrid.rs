//! SendGrid v3 mailer.

use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::{error, info};
use reqwest::blocking::Client;
use serde_json::{Value, json};
use textquest_engine::{Letter, MailConfig, Mailer};

pub const API_KEY_VAR: &str = "SENDGRID_API_KEY";
const SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

pub struct SendGridMailer {
    client: Client,
    api_key: String,
    mail: MailConfig,
}

impl SendGridMailer {
    /// # Errors
    /// - if the HTTP client cannot be built
    pub fn new(api_key: &str, mail: MailConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("while building the SendGrid HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            mail,
        })
    }

    /// Build a mailer from the `SENDGRID_API_KEY` environment variable.
    ///
    /// # Errors
    /// - if the variable is unset or empty
    pub fn from_env(mail: MailConfig) -> Result<Self> {
        let api_key = env::var(API_KEY_VAR).unwrap_or_default();
        if api_key.trim().is_empty() {
            bail!("{API_KEY_VAR} is not set; export it or pass --no-email");
        }
        Self::new(&api_key, mail)
    }

    /// The JSON body for a v3 `mail/send` request.
    pub fn payload(&self, letter: &Letter) -> Value {
        let headers: BTreeMap<&str, &str> = letter
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        json!({
            "personalizations": [{
                "to": [{ "email": letter.to, "name": "Text Quest Player" }],
            }],
            "from": { "email": self.mail.from_address, "name": self.mail.from_name },
            "subject": letter.subject,
            "content": [
                { "type": "text/plain", "value": letter.body },
                { "type": "text/html", "value": letter.body.replace('\n', "<br/>\n") },
            ],
            "headers": headers,
        })
    }
}

impl Mailer for SendGridMailer {
    fn send(&self, letter: &Letter) -> bool {
        let result = self
            .client
            .post(SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&self.payload(letter))
            .send();
        match result {
            Ok(response) if response.status().is_success() => {
                info!("sent '{}' to {}", letter.subject, letter.to);
                true
            },
            Ok(response) => {
                error!("sendgrid rejected mail to {}: {}", letter.to, response.status());
                false
            },
            Err(err) => {
                error!("sendgrid request for {} failed: {err}", letter.to);
                false
            },
        }
    }
}
