//! Client-side logic of the auction bid page: bid validation, the player
//! card, and bid submission against the auction API.

pub use client::{BidClient, ClientConfig, DEFAULT_BASE_URL};
pub use error::{BidError, Result};
pub use model::*;
pub use page::{is_submit_key, BidForm, Indicator, PlayerStatus, SubmitStatus};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use validation::{
    can_submit, classify, is_invalid_bid, is_invalid_bid_negative, is_invalid_bid_not_integer,
    parse_bid, BidRejection, BidValidation, MAX_BID,
};

mod client;
mod error;
pub mod model;
pub mod page;
mod transport;
pub mod validation;
