use donation_flow::domain::{DonationIntent, DonationKind};
use donation_flow::infrastructure::{EmbeddedPageConfig, FlowConfig, HttpDonationServer};
use donation_flow::ports::DonationServerPort;
use donation_flow::ports::donation_server_port::InitiateOnceForm;
use donation_flow::ports::payment_provider_port::SubscriptionRequest;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Contract probe: loads a widget's page configuration and exercises the
/// first step of its donation flow against the configured origin.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = FlowConfig::from_env()?;
    info!("Origin: {}", config.origin_url);

    let page_path = std::env::var("DONATION_PAGE_CONFIG")
        .map_err(|_| anyhow::anyhow!("DONATION_PAGE_CONFIG must be set"))?;
    let page = EmbeddedPageConfig::from_file(&page_path)?;

    let kind = match std::env::var("DONATION_KIND").as_deref() {
        Ok("plan") => DonationKind::Recurring,
        Ok("once") | Err(_) => DonationKind::OneTime,
        Ok(other) => anyhow::bail!("DONATION_KIND must be `once` or `plan`, got `{}`", other),
    };

    let intent = DonationIntent::load(kind, &page)?;
    info!("Loaded {} intent for fund {}", intent.kind, intent.fund_id);

    match intent.kind {
        DonationKind::OneTime => {
            let server = HttpDonationServer::new(config.clone());
            let form = InitiateOnceForm {
                fund_id: intent.fund_id.clone(),
                amount_cents: intent.amount.map(|a| a.to_cents()).unwrap_or_default(),
            };
            let initiated = server.initiate_once(&form).await?;
            info!("Origin issued order {}", initiated.order_id);
        }
        DonationKind::Recurring => {
            let plan_id = intent.provider_plan_id.clone().unwrap_or_default();
            let request = SubscriptionRequest::for_plan(plan_id);
            info!(
                "Subscription request for provider: {}",
                serde_json::to_string(&request)?
            );
        }
    }

    Ok(())
}
