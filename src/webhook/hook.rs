//! Typed webhook operations over the delivery engine.

use crate::payload::{Message, WebhookProfile};
use crate::time::Sleeper;

use super::{
    DeliveryEngine, DeliveryError, DeliveryMethod, DeliveryOutcome, HttpClient, Jitter,
    RequestOptions,
};

/// A webhook endpoint with one method per supported verb.
///
/// # Example
///
/// ```no_run
/// use webhook_courier::payload::Message;
/// use webhook_courier::webhook::{DeliveryEngine, ReqwestClient, Webhook};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = Url::parse("https://hooks.example.com/api/webhooks/1/token")?;
/// let webhook = Webhook::new(DeliveryEngine::new(ReqwestClient::new(), url));
///
/// let outcome = webhook.execute(&Message::text("build #42 passed")).await?;
/// outcome.error_for_status()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Webhook<H, S, J> {
    engine: DeliveryEngine<H, S, J>,
}

impl<H, S, J> Webhook<H, S, J> {
    /// Wraps a configured engine.
    #[must_use]
    pub const fn new(engine: DeliveryEngine<H, S, J>) -> Self {
        Self { engine }
    }

    /// Returns the underlying engine.
    #[must_use]
    pub const fn engine(&self) -> &DeliveryEngine<H, S, J> {
        &self.engine
    }
}

impl<H: HttpClient, S: Sleeper, J: Jitter> Webhook<H, S, J> {
    /// Posts a message.
    ///
    /// # Errors
    ///
    /// See [`DeliveryEngine::send`].
    pub async fn execute(&self, message: &Message) -> Result<DeliveryOutcome, DeliveryError> {
        self.execute_with(message, &RequestOptions::default()).await
    }

    /// Posts a message with per-call options.
    ///
    /// # Errors
    ///
    /// See [`DeliveryEngine::send`].
    pub async fn execute_with(
        &self,
        message: &Message,
        options: &RequestOptions,
    ) -> Result<DeliveryOutcome, DeliveryError> {
        self.engine
            .send(DeliveryMethod::Post, message, options)
            .await
    }

    /// Fetches the webhook resource; the JSON is in the outcome body.
    ///
    /// # Errors
    ///
    /// See [`DeliveryEngine::send`].
    pub async fn fetch(&self) -> Result<DeliveryOutcome, DeliveryError> {
        self.fetch_with(&RequestOptions::default()).await
    }

    /// Fetches the webhook resource with per-call options.
    ///
    /// # Errors
    ///
    /// See [`DeliveryEngine::send`].
    pub async fn fetch_with(
        &self,
        options: &RequestOptions,
    ) -> Result<DeliveryOutcome, DeliveryError> {
        self.engine.send(DeliveryMethod::Get, &(), options).await
    }

    /// Updates the webhook's default name or avatar.
    ///
    /// # Errors
    ///
    /// See [`DeliveryEngine::send`].
    pub async fn modify(&self, profile: &WebhookProfile) -> Result<DeliveryOutcome, DeliveryError> {
        self.modify_with(profile, &RequestOptions::default()).await
    }

    /// Updates the webhook's profile with per-call options.
    ///
    /// # Errors
    ///
    /// See [`DeliveryEngine::send`].
    pub async fn modify_with(
        &self,
        profile: &WebhookProfile,
        options: &RequestOptions,
    ) -> Result<DeliveryOutcome, DeliveryError> {
        self.engine
            .send(DeliveryMethod::Patch, profile, options)
            .await
    }
}
