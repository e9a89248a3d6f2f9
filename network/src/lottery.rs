use errors::position::PositionError;
use intl::BigUint;
use proto::{address::Address, payload::nft_identifier};
use serde_json::Value;

use crate::{
    earnings::win_probability,
    stake_parse::{field, parse_biguint, parse_u64, parse_u64_list},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotteryPhase {
    /// Tickets can be bought.
    Live,
    /// Deadline passed, no winner ticket drawn yet.
    AwaitingDraw,
    Finished,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LotteryState {
    pub address: Option<Address>,
    pub ticket_token: Option<String>,
    pub ticket_price: BigUint,
    pub prize_amount: BigUint,
    pub prize_token: Option<String>,
    pub prize_nonce: u64,
    pub prize_description: Option<String>,
    pub deadline: u64,
    pub last_ticket_id: u64,
    /// `0` until drawn.
    pub winner_ticket: u64,
    pub user_tickets: Vec<u64>,
}

impl LotteryState {
    pub fn phase(&self, now: u64) -> LotteryPhase {
        if self.winner_ticket > 0 {
            LotteryPhase::Finished
        } else if now < self.deadline {
            LotteryPhase::Live
        } else {
            LotteryPhase::AwaitingDraw
        }
    }

    pub fn user_won(&self) -> bool {
        self.winner_ticket > 0 && self.user_tickets.contains(&self.winner_ticket)
    }

    pub fn win_probability(&self) -> f64 {
        win_probability(self.user_tickets.len() as u64, self.last_ticket_id)
    }

    pub fn tickets_cost(&self, count: u64) -> BigUint {
        &self.ticket_price * BigUint::from(count)
    }

    /// Identifier of an NFT prize, `None` for fungible prizes.
    pub fn prize_nft(&self) -> Option<String> {
        match (&self.prize_token, self.prize_nonce) {
            (Some(token), nonce) if nonce > 0 => Some(nft_identifier(token, nonce)),
            _ => None,
        }
    }
}

fn text(raw: &Value, name: &str) -> Result<Option<String>, PositionError> {
    match field(raw, name) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(PositionError::MalformedPosition {
            field: name.to_string(),
            expected: "string",
        }),
    }
}

/// Accepts a bare bech32 string or the `{ address }` object of the aggregate.
fn address(raw: &Value, name: &str) -> Result<Option<Address>, PositionError> {
    let malformed = || PositionError::MalformedPosition {
        field: name.to_string(),
        expected: "bech32 address",
    };
    let value = match field(raw, name) {
        Some(Value::Object(obj)) => obj.get("address").filter(|v| !v.is_null()),
        other => other,
    };

    match value {
        None => Ok(None),
        Some(Value::String(s)) => Address::from_bech32(s).map(Some).map_err(|_| malformed()),
        Some(_) => Err(malformed()),
    }
}

/// `Ok(None)` when the aggregate carries no lottery.
pub fn normalize_lottery(raw: &Value) -> Result<Option<LotteryState>, PositionError> {
    if raw.is_null() {
        return Ok(None);
    }
    if !raw.is_object() {
        return Err(PositionError::MalformedPosition {
            field: "lottery".to_string(),
            expected: "object",
        });
    }

    Ok(Some(LotteryState {
        address: address(raw, "_address")?,
        ticket_token: text(raw, "ticketToken")?,
        ticket_price: parse_biguint(field(raw, "ticketPrice"), "ticketPrice")?,
        prize_amount: parse_biguint(field(raw, "prizeAmount"), "prizeAmount")?,
        prize_token: text(raw, "prizeToken")?,
        prize_nonce: parse_u64(field(raw, "prizeNonce"), "prizeNonce")?,
        prize_description: text(raw, "prizeDescription")?,
        deadline: parse_u64(field(raw, "deadline"), "deadline")?,
        last_ticket_id: parse_u64(field(raw, "lastTicketId"), "lastTicketId")?,
        winner_ticket: parse_u64(field(raw, "winnerTicket"), "winnerTicket")?,
        user_tickets: parse_u64_list(field(raw, "userTickets"), "userTickets")?,
    }))
}
