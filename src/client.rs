use std::time::Duration;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::error::{BidError, Result};
use crate::model::{BidSubmission, PlayerSummary};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const PLAYER_PATH: &str = "api/player";
const BID_PATH: &str = "api/auction/bid";

/// Settings for a [`BidClient`] talking to the auction API over HTTP.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// The main entry point for loading a player and placing bids.
///
/// `BidClient` wraps a [`Transport`] (by default a [`reqwest::Client`]) and
/// a base URL that the API paths are resolved against.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> auction_bid_client::Result<()> {
/// use auction_bid_client::BidClient;
///
/// let client = BidClient::new();
/// let player = client.fetch_player("7").await?;
/// println!("Bidding on {}", player.name);
///
/// let placed = client.submit_bid("auction-1", "sender-1", &player.id, "42").await?;
/// println!("Placed bid of {}", placed.bid());
/// # Ok(())
/// # }
/// ```
pub struct BidClient<T = ReqwestTransport> {
    transport: T,
    base_url: String,
}

impl BidClient {
    /// Create a new client with [`ClientConfig::default`] settings.
    pub fn new() -> Self {
        Self {
            transport: ReqwestTransport::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client whose HTTP settings and base URL come from `config`.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self {
            transport,
            base_url: config.base_url,
        })
    }
}

impl Default for BidClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> BidClient<T> {
    /// Create a client that sends its requests through `transport`.
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Base URL the API paths are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the display data for a player.
    #[instrument(skip(self))]
    pub async fn fetch_player(&self, player_id: &str) -> Result<PlayerSummary> {
        let mut url = endpoint(&self.base_url, PLAYER_PATH)?;
        url.query_pairs_mut().append_pair("playerId", player_id);

        let response = self.execute(Method::GET, url.clone(), None).await?;
        let player: PlayerSummary = decode(&url, &response)?;
        debug!(id = %player.id, name = %player.name, "decoded player");
        Ok(player)
    }

    /// Validate `raw_bid` and post it for the given player in the given auction.
    ///
    /// Nothing is sent unless the text is a non-empty, non-negative integer.
    /// Returns the submission that the server accepted.
    #[instrument(skip(self))]
    pub async fn submit_bid(
        &self,
        auction_id: &str,
        sender_id: &str,
        player_id: &str,
        raw_bid: &str,
    ) -> Result<BidSubmission> {
        let submission = BidSubmission::new(auction_id, sender_id, player_id, raw_bid)
            .inspect_err(|rejection| warn!(%rejection, "bid rejected before sending"))?;
        self.send_bid(&submission).await?;
        Ok(submission)
    }

    /// Post an already validated submission.
    #[instrument(skip(self))]
    pub async fn send_bid(&self, submission: &BidSubmission) -> Result<()> {
        let url = endpoint(&self.base_url, BID_PATH)?;
        let body = serde_json::to_vec(submission).map_err(BidError::Encode)?;

        debug!(bid = submission.bid(), "sending bid");
        self.execute(Method::POST, url, Some(body)).await?;
        info!(
            auction_id = submission.auction_id(),
            player_id = submission.player_id(),
            bid = submission.bid(),
            "bid placed"
        );
        Ok(())
    }

    async fn execute(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<HttpResponse> {
        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: url.clone(),
                body,
            })
            .await
            .inspect_err(|e| warn!(error = %e, "request failed"))?;

        if !response.status.is_success() {
            warn!(url = %url, status = %response.status, "unexpected status");
            return Err(BidError::UnexpectedStatus {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(response)
    }
}

/// Resolve `path` relative to `base_url`, keeping any path prefix the base has.
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let invalid = |reason: String| BidError::InvalidUrl {
        url: base_url.to_owned(),
        reason,
    };

    let mut base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("url cannot be a base".to_owned()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(path).map_err(|e| invalid(e.to_string()))
}

fn decode<D: DeserializeOwned>(url: &Url, response: &HttpResponse) -> Result<D> {
    serde_json::from_slice(&response.body).map_err(|e| BidError::Decode {
        url: url.to_string(),
        source: e,
    })
}
