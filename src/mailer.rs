use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

/// Delivers offer emails. Demo deployments only log what would be sent;
/// live deployments relay through an authenticated SMTP server.
#[derive(Clone)]
pub enum OfferMailer {
    Demo,
    Smtp {
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: Mailbox,
    },
}

impl OfferMailer {
    /// STARTTLS transport on the submission port, authenticated against
    /// the relay with an app password.
    pub fn smtp(
        relay: &str,
        username: String,
        password: String,
        from: Mailbox,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(relay)?
            .credentials(Credentials::new(username, password))
            .build();
        Ok(OfferMailer::Smtp { transport, from })
    }

    /// Sends `body` to every recipient, one message each. Delivery
    /// problems are logged and never fail the caller.
    pub async fn broadcast(&self, subject: &str, body: &str, recipients: &[String]) {
        match self {
            OfferMailer::Demo => {
                for recipient in recipients {
                    info!("[DEMO MODE] Would send email to {recipient} with message: {body}");
                }
            }
            OfferMailer::Smtp { transport, from } => {
                let mut delivered = 0usize;
                for recipient in recipients {
                    let mailbox: Mailbox = match recipient.parse() {
                        Ok(mailbox) => mailbox,
                        Err(err) => {
                            warn!("skipping invalid recipient address {recipient}: {err}");
                            continue;
                        }
                    };
                    let email = match Message::builder()
                        .from(from.clone())
                        .to(mailbox)
                        .subject(subject)
                        .header(ContentType::TEXT_PLAIN)
                        .body(body.to_string())
                    {
                        Ok(email) => email,
                        Err(err) => {
                            warn!("failed to build offer email for {recipient}: {err}");
                            continue;
                        }
                    };
                    match transport.send(email).await {
                        Ok(_) => delivered += 1,
                        Err(err) => warn!("failed to send offer email to {recipient}: {err}"),
                    }
                }
                info!("Offer emails sent to {delivered} diners.");
            }
        }
    }
}
