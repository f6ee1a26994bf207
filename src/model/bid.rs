use serde::Serialize;

use crate::validation::{parse_bid, BidRejection, MAX_BID};

/// The payload posted to `/api/auction/bid`.
///
/// Only constructible from a bid that passes validation, so holding one
/// means the amount is a non-negative integer that was actually typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidSubmission {
    auction_id: String,
    #[serde(rename = "sender_ps_id")]
    sender_id: String,
    player_id: String,
    bid: u64,
}

impl BidSubmission {
    pub fn new(
        auction_id: impl Into<String>,
        sender_id: impl Into<String>,
        player_id: impl Into<String>,
        raw_bid: &str,
    ) -> Result<Self, BidRejection> {
        let bid = parse_bid(raw_bid)?;
        Self::with_amount(auction_id, sender_id, player_id, bid)
    }

    /// Build a submission from an amount that is already numeric.
    pub fn with_amount(
        auction_id: impl Into<String>,
        sender_id: impl Into<String>,
        player_id: impl Into<String>,
        bid: u64,
    ) -> Result<Self, BidRejection> {
        if bid > MAX_BID {
            return Err(BidRejection::OutOfRange);
        }
        Ok(Self {
            auction_id: auction_id.into(),
            sender_id: sender_id.into(),
            player_id: player_id.into(),
            bid,
        })
    }

    pub fn auction_id(&self) -> &str {
        &self.auction_id
    }

    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn bid(&self) -> u64 {
        self.bid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let submission = BidSubmission::new("a-1", "s-1", "p-1", "42").unwrap();
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "auction_id": "a-1",
                "sender_ps_id": "s-1",
                "player_id": "p-1",
                "bid": 42,
            })
        );
    }

    #[test]
    fn test_rejects_invalid_text() {
        assert_eq!(
            BidSubmission::new("a", "s", "p", ""),
            Err(BidRejection::Empty)
        );
        assert_eq!(
            BidSubmission::new("a", "s", "p", "-3"),
            Err(BidRejection::NotInteger)
        );
    }

    #[test]
    fn test_with_amount_bounds() {
        assert!(BidSubmission::with_amount("a", "s", "p", MAX_BID).is_ok());
        assert_eq!(
            BidSubmission::with_amount("a", "s", "p", MAX_BID + 1),
            Err(BidRejection::OutOfRange)
        );
    }
}
