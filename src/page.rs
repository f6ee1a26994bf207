//! Headless state of the bid page.
//!
//! [`BidForm`] owns everything the page shows and reacts to the same events
//! the page does: typing into the bid input, pressing a key in it, clicking
//! the bid button, and the one-off player load. A renderer only has to read
//! the accessors after each event.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::client::BidClient;
use crate::error::{BidError, Result};
use crate::model::{BidSubmission, PageParams, PlayerSummary};
use crate::transport::{ReqwestTransport, Transport};
use crate::validation::{can_submit, is_invalid_bid_negative, is_invalid_bid_not_integer, BidRejection};

/// Indicators on the page that are either shown or hidden.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Indicator {
    InvalidBidNotInteger,
    InvalidBidNegative,
    BidPlacedSuccess,
}

/// Progress of the player load started when the page opens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum PlayerStatus {
    #[default]
    Pending,
    Loaded(PlayerSummary),
    Failed { reason: String },
}

/// Outcome of the most recent attempt to place a bid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Rejected(BidRejection),
    Placed(BidSubmission),
    Failed { reason: String },
}

/// Everything the bid page displays, driven by the page's events.
pub struct BidForm<T = ReqwestTransport> {
    client: BidClient<T>,
    params: PageParams,
    input: String,
    visible: HashSet<Indicator>,
    submit_enabled: bool,
    player: PlayerStatus,
    submit: SubmitStatus,
}

impl<T: Transport> BidForm<T> {
    /// A fresh form: empty input, no indicators, submit disabled.
    pub fn new(client: BidClient<T>, params: PageParams) -> Self {
        Self {
            client,
            params,
            input: String::new(),
            visible: HashSet::new(),
            submit_enabled: false,
            player: PlayerStatus::Pending,
            submit: SubmitStatus::Idle,
        }
    }

    /// Identifiers the page was opened with.
    pub fn params(&self) -> &PageParams {
        &self.params
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_visible(&self, indicator: Indicator) -> bool {
        self.visible.contains(&indicator)
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn player(&self) -> &PlayerStatus {
        &self.player
    }

    pub fn submit_status(&self) -> &SubmitStatus {
        &self.submit
    }

    /// Load the player named in the page parameters into the player card.
    #[instrument(skip(self), fields(player_id = %self.params.player_id))]
    pub async fn load_player(&mut self) -> Result<()> {
        match self.client.fetch_player(&self.params.player_id).await {
            Ok(player) => {
                self.player = PlayerStatus::Loaded(player);
                Ok(())
            }
            Err(e) => {
                self.player = PlayerStatus::Failed {
                    reason: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// The bid input changed. Every indicator and the submit control are
    /// recomputed from scratch.
    pub fn on_input(&mut self, value: &str) {
        value.clone_into(&mut self.input);
        self.set_visible(Indicator::InvalidBidNotInteger, is_invalid_bid_not_integer(value));
        self.set_visible(Indicator::InvalidBidNegative, is_invalid_bid_negative(value));
        self.submit_enabled = can_submit(value);
        debug!(input = value, submit_enabled = self.submit_enabled, "bid input changed");
    }

    /// A key was pressed in the bid input. Enter places the bid; returns
    /// whether a bid attempt was made.
    pub async fn on_key_press(&mut self, key: &str) -> Result<bool> {
        if !is_submit_key(key) {
            return Ok(false);
        }
        self.place_bid().await?;
        Ok(true)
    }

    /// Try to place the current input as a bid.
    ///
    /// The success indicator reflects only the latest attempt.
    #[instrument(skip(self), fields(input = %self.input))]
    pub async fn place_bid(&mut self) -> Result<()> {
        let result = self
            .client
            .submit_bid(
                &self.params.auction_id,
                &self.params.sender_ps_id,
                &self.params.player_id,
                &self.input,
            )
            .await;

        let outcome = match result {
            Ok(submission) => {
                self.submit = SubmitStatus::Placed(submission);
                Ok(())
            }
            Err(BidError::Rejected(rejection)) => {
                self.submit = SubmitStatus::Rejected(rejection);
                Err(rejection.into())
            }
            Err(e) => {
                self.submit = SubmitStatus::Failed {
                    reason: e.to_string(),
                };
                Err(e)
            }
        };
        self.set_visible(
            Indicator::BidPlacedSuccess,
            matches!(self.submit, SubmitStatus::Placed(_)),
        );
        outcome
    }

    fn set_visible(&mut self, indicator: Indicator, visible: bool) {
        if visible {
            self.visible.insert(indicator);
        } else {
            self.visible.remove(&indicator);
        }
    }
}

/// Accepts both the DOM key name and the legacy key code.
pub fn is_submit_key(key: &str) -> bool {
    matches!(key, "Enter" | "13")
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::client::DEFAULT_BASE_URL;
    use crate::transport::fake::FakeTransport;

    fn params() -> PageParams {
        PageParams::from_query("?playerId=7&auctionId=a-1&senderPsId=s-1")
    }

    fn form(transport: Arc<FakeTransport>) -> BidForm<Arc<FakeTransport>> {
        BidForm::new(BidClient::with_transport(transport, DEFAULT_BASE_URL), params())
    }

    #[test]
    fn test_indicator_ids() {
        let ids: Vec<String> = Indicator::iter().map(|i| i.to_string()).collect();
        assert_eq!(
            ids,
            ["invalid-bid-not-integer", "invalid-bid-negative", "bid-placed-success"]
        );
        assert_eq!(
            Indicator::from_str("bid-placed-success").unwrap(),
            Indicator::BidPlacedSuccess
        );
    }

    #[test]
    fn test_input_updates_every_indicator() {
        let mut form = form(Arc::new(FakeTransport::new()));
        assert!(!form.submit_enabled());

        form.on_input("12");
        assert!(form.submit_enabled());
        assert!(!form.is_visible(Indicator::InvalidBidNotInteger));
        assert!(!form.is_visible(Indicator::InvalidBidNegative));

        form.on_input("-12");
        assert!(!form.submit_enabled());
        assert!(form.is_visible(Indicator::InvalidBidNotInteger));
        assert!(form.is_visible(Indicator::InvalidBidNegative));

        form.on_input("1.5");
        assert!(form.is_visible(Indicator::InvalidBidNotInteger));
        assert!(!form.is_visible(Indicator::InvalidBidNegative));

        form.on_input("");
        assert!(!form.submit_enabled());
        assert!(!form.is_visible(Indicator::InvalidBidNotInteger));
        assert!(!form.is_visible(Indicator::InvalidBidNegative));
        assert_eq!(form.input(), "");
    }

    #[tokio::test]
    async fn test_load_player_populates_card() {
        let transport = Arc::new(FakeTransport::new().respond(
            200,
            r#"{"name":"A","position":"F","team":"X","id":7,"image":"u"}"#,
        ));
        let mut form = form(transport.clone());
        assert_eq!(form.player(), &PlayerStatus::Pending);

        form.load_player().await.unwrap();
        let PlayerStatus::Loaded(player) = form.player() else {
            panic!("player not loaded: {:?}", form.player());
        };
        assert_eq!(player.name, "A");
        assert_eq!(player.position, "F");
        assert_eq!(player.team, "X");
        assert_eq!(player.image_url, "u");
        assert!(transport.requests()[0].url.as_str().ends_with("playerId=7"));
    }

    #[tokio::test]
    async fn test_load_player_failure_is_recorded() {
        let mut form = form(Arc::new(FakeTransport::new().respond(500, "")));
        assert!(form.load_player().await.is_err());
        assert!(matches!(form.player(), PlayerStatus::Failed { .. }));
    }

    #[tokio::test]
    async fn test_enter_places_bid() {
        let transport = Arc::new(FakeTransport::new().respond(200, "\"ok\""));
        let mut form = form(transport.clone());

        form.on_input("42");
        assert!(!form.on_key_press("a").await.unwrap());
        assert!(transport.requests().is_empty());

        assert!(form.on_key_press("Enter").await.unwrap());
        assert!(form.is_visible(Indicator::BidPlacedSuccess));
        assert_eq!(
            form.submit_status(),
            &SubmitStatus::Placed(BidSubmission::with_amount("a-1", "s-1", "7", 42).unwrap())
        );
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_bid_is_not_sent() {
        let transport = Arc::new(FakeTransport::new());
        let mut form = form(transport.clone());

        let err = form.place_bid().await.unwrap_err();
        assert!(matches!(err, BidError::Rejected(BidRejection::Empty)));
        assert_eq!(
            form.submit_status(),
            &SubmitStatus::Rejected(BidRejection::Empty)
        );
        assert!(!form.is_visible(Indicator::BidPlacedSuccess));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_failed_submit_hides_success() {
        let transport = Arc::new(
            FakeTransport::new()
                .respond(200, "\"ok\"")
                .respond(400, "\"failed to make bid\""),
        );
        let mut form = form(transport);

        form.on_input("5");
        form.place_bid().await.unwrap();
        assert!(form.is_visible(Indicator::BidPlacedSuccess));

        form.on_input("6");
        assert!(form.place_bid().await.is_err());
        assert!(!form.is_visible(Indicator::BidPlacedSuccess));
        assert!(matches!(form.submit_status(), SubmitStatus::Failed { .. }));
    }
}
