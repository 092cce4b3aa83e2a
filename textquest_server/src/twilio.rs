//! Twilio SMS webhook shapes.

use serde::Deserialize;

/// Form fields Twilio posts for an inbound SMS. Only `from` and `body` drive the game; the
/// rest are kept for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SmsReceived {
    pub sms_status: String,
    pub from_city: String,
    pub to_country: String,
    pub sms_message_sid: String,
    pub to_city: String,
    pub sms_sid: String,
    pub account_sid: String,
    pub from_zip: String,
    pub body: String,
    pub to: String,
    pub message_sid: String,
    pub from: String,
    pub api_version: String,
    pub num_media: String,
    pub from_country: String,
    pub to_zip: String,
    pub num_segments: String,
    pub to_state: String,
    pub from_state: String,
}

impl SmsReceived {
    /// Sender and body, or `None` if either is missing.
    pub fn sender_and_body(&self) -> Option<(&str, &str)> {
        let from = self.from.trim();
        if from.is_empty() || self.body.trim().is_empty() {
            return None;
        }
        Some((from, &self.body))
    }
}

/// Wrap `text` in a minimal TwiML message document.
pub fn simple_twiml(text: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response>\n<Message>{}</Message>\n</Response>",
        escape_xml(text)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twiml_escapes_markup() {
        let xml = simple_twiml("say 'mellon' & <wait>");
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<Message>say &apos;mellon&apos; &amp; &lt;wait&gt;</Message>"));
    }

    #[test]
    fn blank_sender_or_body_is_ignored() {
        let mut sms = SmsReceived {
            from: "+15550100".into(),
            ..SmsReceived::default()
        };
        assert_eq!(sms.sender_and_body(), None);
        sms.body = "look".into();
        assert_eq!(sms.sender_and_body(), Some(("+15550100", "look")));
    }
}
