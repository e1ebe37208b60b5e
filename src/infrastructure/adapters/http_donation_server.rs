use crate::domain::errors::{DomainError, DomainResult};
use crate::infrastructure::config::FlowConfig;
use crate::ports::donation_server_port::*;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

/// Origin server adapter over form-encoded HTTP
#[derive(Clone)]
pub struct HttpDonationServer {
    config: Arc<FlowConfig>,
    client: Client,
}

impl HttpDonationServer {
    pub fn new(config: Arc<FlowConfig>) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn with_client(config: Arc<FlowConfig>, client: Client) -> Self {
        Self { config, client }
    }

    async fn post_form<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> DomainResult<Response> {
        let url = self.config.url(path);
        debug!("POST {}", url);

        let response = self.client.post(&url).form(form).send().await?;
        Ok(response)
    }

    async fn into_reply(response: Response) -> DomainResult<ServerReply> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ServerReply { status, body })
    }
}

#[async_trait]
impl DonationServerPort for HttpDonationServer {
    async fn initiate_once(&self, form: &InitiateOnceForm) -> DomainResult<InitiateResponse> {
        let response = self.post_form("/donation/once/initiate", form).await?;

        if !response.status().is_success() {
            let reply = Self::into_reply(response).await?;
            error!("Initiate rejected: {} - {}", reply.status, reply.body);
            if let Some(field_errors) = reply.field_errors() {
                return Err(DomainError::Validation(field_errors));
            }
            return Err(DomainError::ServerRejection {
                status: reply.status,
                body: reply.body,
            });
        }

        let initiated: InitiateResponse = serde_json::from_str(&response.text().await?)?;
        Ok(initiated)
    }

    async fn complete_once(&self, form: &CompleteOnceForm) -> DomainResult<ServerReply> {
        let response = self.post_form("/donation/once/complete", form).await?;
        Self::into_reply(response).await
    }

    async fn complete_plan(&self, form: &CompletePlanForm) -> DomainResult<ServerReply> {
        let response = self
            .post_form(&self.config.plan_complete_path, form)
            .await?;
        Self::into_reply(response).await
    }

    async fn report_error(&self, error: &str) -> DomainResult<String> {
        let url = self.config.url("/error");
        let form = ErrorReportForm {
            error: error.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .header("HX-Request", "true")
            .form(&form)
            .send()
            .await?;

        let reply = Self::into_reply(response).await?;
        if !reply.is_success() {
            return Err(DomainError::ServerRejection {
                status: reply.status,
                body: reply.body,
            });
        }
        Ok(reply.body)
    }
}
