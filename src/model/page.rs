use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Identifiers the bid page is opened with.
///
/// Every field defaults to an empty string when the parameter is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub player_id: String,
    pub auction_id: String,
    pub sender_ps_id: String,
}

impl PageParams {
    /// Read the parameters from a full URL or a bare query string
    /// (with or without the leading `?`).
    ///
    /// The camelCase keys (`playerId`, `auctionId`, `senderPsId`) take
    /// precedence; the snake_case spellings used by older links are accepted
    /// as a fallback.
    pub fn from_query(input: &str) -> Self {
        let url = Url::parse(input).or_else(|_| {
            let query = input.split_once('?').map_or(input, |(_, q)| q);
            Url::parse(&format!("http://localhost/?{query}"))
        });
        let Ok(url) = url else {
            return Self::default();
        };

        let lookup = |camel: &str, snake: &str| {
            let find = |key: &str| {
                url.query_pairs()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.into_owned())
            };
            find(camel).or_else(|| find(snake)).unwrap_or_default()
        };

        Self {
            player_id: lookup("playerId", "player_id"),
            auction_id: lookup("auctionId", "auction_id"),
            sender_ps_id: lookup("senderPsId", "sender_ps_id"),
        }
    }

    /// Build the link to the bid page hosted under `base_url`.
    pub fn bid_page_url(&self, base_url: &str) -> Result<Url> {
        let mut url = crate::client::endpoint(base_url, "webview/bid/")?;
        url.query_pairs_mut()
            .append_pair("auctionId", &self.auction_id)
            .append_pair("playerId", &self.player_id)
            .append_pair("senderPsId", &self.sender_ps_id);
        Ok(url)
    }
}

impl std::str::FromStr for PageParams {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_query(s))
    }
}
