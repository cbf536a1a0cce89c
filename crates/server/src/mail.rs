use anyhow::{anyhow, Context, Result};
use std::time::Duration;

const SEND_URL: &str = "https://api.resend.com/emails";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub from_address: String,
    pub contact_email: String,
}

/// 询价表单的出站邮件：走 HTTP 邮件 API，reply_to 指回访客
pub struct Mailer {
    config: MailConfig,
    http: reqwest::Client,
}

#[derive(Debug, Clone, Default)]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub trek_interest: Option<String>,
    pub number_of_people: Option<String>,
    pub preferred_dates: Option<String>,
    pub message: Option<String>,
}

impl Mailer {
    pub fn new(config: MailConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("Failed to build mail HTTP client")?;
        Ok(Self { config, http })
    }

    pub async fn send_inquiry(&self, inquiry: &Inquiry) -> Result<()> {
        let subject = match inquiry.trek_interest.as_deref() {
            Some(trek) => format!("New Trek Inquiry from {} - {}", inquiry.name, trek),
            None => format!("New Trek Inquiry from {}", inquiry.name),
        };

        let body = serde_json::json!({
            "from": self.config.from_address,
            "to": [self.config.contact_email],
            "reply_to": inquiry.email,
            "subject": subject,
            "html": render_html(inquiry),
            "text": render_text(inquiry),
        });

        let resp = self
            .http
            .post(SEND_URL)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("Mail API request failed")?;

        if !resp.status().is_success() {
            return Err(anyhow!("Mail API error: {}", resp.status()));
        }
        Ok(())
    }
}

fn render_html(i: &Inquiry) -> String {
    let mut html = String::new();
    html.push_str("<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">");
    html.push_str("<h2>New Trek Inquiry from Wander Warriors Website</h2>");

    html.push_str("<h3>Contact Information</h3>");
    html.push_str(&format!("<p><strong>Name:</strong> {}</p>", i.name));
    html.push_str(&format!(
        "<p><strong>Email:</strong> <a href=\"mailto:{0}\">{0}</a></p>",
        i.email
    ));
    if let Some(phone) = &i.phone {
        html.push_str(&format!("<p><strong>Phone/WhatsApp:</strong> {}</p>", phone));
    }

    html.push_str("<h3>Trek Details</h3>");
    if let Some(trek) = &i.trek_interest {
        html.push_str(&format!("<p><strong>Trek Interest:</strong> {}</p>", trek));
    }
    if let Some(n) = &i.number_of_people {
        html.push_str(&format!("<p><strong>Number of People:</strong> {}</p>", n));
    }
    if let Some(dates) = &i.preferred_dates {
        html.push_str(&format!("<p><strong>Preferred Dates:</strong> {}</p>", dates));
    }

    if let Some(message) = &i.message {
        html.push_str("<h3>Message</h3>");
        html.push_str(&format!(
            "<p style=\"white-space: pre-wrap;\">{}</p>",
            message
        ));
    }

    html.push_str("<p>This inquiry was submitted through the Wander Warriors contact form. Please respond within 24 hours.</p>");
    html.push_str("</div>");
    html
}

fn render_text(i: &Inquiry) -> String {
    let mut text = String::from("New Trek Inquiry from Wander Warriors Website\n\n");

    text.push_str("CONTACT INFORMATION:\n");
    text.push_str(&format!("Name: {}\n", i.name));
    text.push_str(&format!("Email: {}\n", i.email));
    if let Some(phone) = &i.phone {
        text.push_str(&format!("Phone/WhatsApp: {}\n", phone));
    }

    text.push_str("\nTREK DETAILS:\n");
    text.push_str(&format!(
        "Trek Interest: {}\n",
        i.trek_interest.as_deref().unwrap_or("Not specified")
    ));
    text.push_str(&format!(
        "Number of People: {}\n",
        i.number_of_people.as_deref().unwrap_or("Not specified")
    ));
    text.push_str(&format!(
        "Preferred Dates: {}\n",
        i.preferred_dates.as_deref().unwrap_or("Not specified")
    ));

    match i.message.as_deref() {
        Some(message) => text.push_str(&format!("\nMESSAGE:\n{}\n", message)),
        None => text.push_str("\nNo message provided\n"),
    }

    text.push_str("\n---\nThis inquiry was submitted through the Wander Warriors contact form.\nPlease respond within 24 hours.\n");
    text
}
