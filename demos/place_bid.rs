use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use auction_bid_client::{
    BidClient, BidForm, ClientConfig, Indicator, PageParams, PlayerStatus, SubmitStatus,
};

/// Open a bid page, type a bid into it, and press Enter.
#[derive(Parser)]
#[command(name = "place-bid")]
struct Cli {
    /// Auction API base URL
    #[arg(long, env = "BID_API_BASE_URL", default_value = auction_bid_client::DEFAULT_BASE_URL)]
    base_url: String,

    /// Bid page link (or just its query string) carrying playerId, auctionId and senderPsId
    #[arg(long)]
    page: String,

    /// Bid text, typed one character at a time
    #[arg(long, allow_hyphen_values = true)]
    bid: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("auction_bid_client=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let client = BidClient::with_config(ClientConfig {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout),
        ..ClientConfig::default()
    })
    .context("failed to build client")?;

    let params = PageParams::from_query(&cli.page);
    info!(?params, "opening bid page");
    let mut form = BidForm::new(client, params);

    if let Err(e) = form.load_player().await {
        eprintln!("could not load player: {e}");
    }
    if let PlayerStatus::Loaded(player) = form.player() {
        println!("{}", player.name);
        println!("{}", player.subtitle());
        println!("{}", player.image_url);
    }

    let mut typed = String::new();
    for c in cli.bid.chars() {
        typed.push(c);
        form.on_input(&typed);
        let warnings: Vec<String> = [Indicator::InvalidBidNotInteger, Indicator::InvalidBidNegative]
            .into_iter()
            .filter(|i| form.is_visible(*i))
            .map(|i| i.to_string())
            .collect();
        println!(
            "{typed:>12}  submit {}  {}",
            if form.submit_enabled() { "enabled " } else { "disabled" },
            warnings.join(" ")
        );
    }

    if !form.submit_enabled() {
        bail!("bid {:?} cannot be submitted", form.input());
    }

    if !form.on_key_press("Enter").await.context("failed to place bid")? {
        bail!("Enter did not trigger a bid");
    }
    if let SubmitStatus::Placed(submission) = form.submit_status() {
        println!("bid of {} placed", submission.bid());
    }
    Ok(())
}
