//! Campaign dispatch: resolving one outbound message for one recipient.
//!
//! Stateless by design. The dispatcher resolves template content (or falls
//! back to the fixed default body), runs it through the link builder, and
//! hands the composed message to the mail transport. Transport failures
//! propagate to the operator; nothing is retried or queued.

use std::sync::Arc;

use url::Url;
use uuid::Uuid;

use crate::domain::ports::{Mailer, OutboundEmail, TemplateRepository};
use crate::domain::tracking_link::{TrackingLinkBuilder, substitute_link};
use crate::domain::{Error, RecipientEmail};

/// Subject used when no template is selected.
pub const DEFAULT_SUBJECT: &str = "Important Security Alert";

/// One dispatch request as accepted from the operator.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub recipient_email: Option<String>,
    pub template_id: Option<Uuid>,
    pub login_page_id: Option<Uuid>,
}

/// Resolves and sends one campaign email per call.
pub struct CampaignDispatcher {
    templates: Arc<dyn TemplateRepository>,
    mailer: Arc<dyn Mailer>,
    links: TrackingLinkBuilder,
}

impl CampaignDispatcher {
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        mailer: Arc<dyn Mailer>,
        links: TrackingLinkBuilder,
    ) -> Self {
        Self {
            templates,
            mailer,
            links,
        }
    }

    /// Compose and send one message.
    ///
    /// # Errors
    /// - `InvalidRequest` when the recipient is absent or blank.
    /// - `NotFound` when a supplied template id does not resolve.
    /// - `InternalError` when the store or transport fails.
    pub async fn dispatch(&self, request: DispatchRequest) -> Result<(), Error> {
        let recipient = request
            .recipient_email
            .as_deref()
            .map(RecipientEmail::new)
            .transpose()
            .ok()
            .flatten()
            .ok_or_else(|| Error::invalid_request("Recipient email is required"))?;

        let link = self.links.build(&recipient, request.login_page_id);
        let (subject, html) = match request.template_id {
            Some(id) => {
                let template = self
                    .templates
                    .find(id)
                    .await
                    .map_err(Error::from)?
                    .ok_or_else(|| Error::not_found("Template not found"))?;
                (
                    template.subject,
                    substitute_link(&template.content, &link),
                )
            }
            None => (DEFAULT_SUBJECT.to_owned(), default_body(&link)),
        };

        let email = OutboundEmail {
            to: recipient.clone(),
            subject,
            html,
        };
        self.mailer.send(&email).await.map_err(|error| {
            tracing::error!(email = %recipient, %error, "mail transport rejected send");
            Error::internal("Failed to send email")
        })?;

        tracing::info!(email = %recipient, template = ?request.template_id, "campaign email dispatched");
        Ok(())
    }
}

/// Fixed body used when the operator selects no template. The banner keeps
/// the simulation honest for anyone who inspects the raw message.
fn default_body(link: &Url) -> String {
    format!(
        r#"<div style="background: #fff3cd; color: #856404; text-align: center; padding: 10px; font-size: 14px; font-weight: 500; border-bottom: 1px solid #ffeeba;">
  This email is part of a <strong>simulated phishing campaign for educational purposes only</strong>. No real credentials are being collected.
</div>
<p>Hello,</p>
<p>We detected unusual login activity in your account. Please <a href="{link}">click here to verify</a>.</p>
<p>Thank you,<br/>Security Team</p>"#
    )
}
