//! Intent types for message building
//!
//! An intent is the caller's raw description of one operation, typically
//! deserialized from JSON/JS. Required fields are `Option`s here so that a
//! missing field is reported by `build_message` as a validation error naming
//! the field, rather than as an opaque deserialization failure.

use super::deployment::GroupSpec;
use serde::{de, Deserialize, Deserializer, Serialize};

struct U64Visitor;

impl<'de> de::Visitor<'de> for U64Visitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a non-negative integer as number or string")
    }

    fn visit_u64<E>(self, value: u64) -> Result<u64, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    fn visit_i64<E>(self, value: i64) -> Result<u64, E>
    where
        E: de::Error,
    {
        u64::try_from(value).map_err(|_| E::custom("negative values not allowed"))
    }

    fn visit_f64<E>(self, value: f64) -> Result<u64, E>
    where
        E: de::Error,
    {
        // JS numbers arrive as f64
        if value < 0.0 {
            Err(E::custom("negative values not allowed"))
        } else if value.fract() != 0.0 || value >= u64::MAX as f64 {
            Err(E::custom("expected an integer"))
        } else {
            Ok(value as u64)
        }
    }

    fn visit_str<E>(self, value: &str) -> Result<u64, E>
    where
        E: de::Error,
    {
        if value.trim_start().starts_with('-') {
            return Err(E::custom("negative values not allowed"));
        }
        value.trim().parse().map_err(E::custom)
    }
}

/// Deserialize u64 from either a number or a string
pub(crate) fn deserialize_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(U64Visitor)
}

struct FlexU64(u64);

impl<'de> Deserialize<'de> for FlexU64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_u64(deserializer).map(FlexU64)
    }
}

pub(crate) fn deserialize_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FlexU64>::deserialize(deserializer)?.map(|v| v.0))
}

/// Message intent - which operation to build
///
/// Closed set: adding a kind means adding a variant, and every `match` over
/// intents and messages has to handle it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageIntent {
    /// Create a deployment and fund its escrow account
    #[serde(rename_all = "camelCase")]
    CreateDeployment {
        /// Deployment owner (akash1...)
        owner: Option<String>,
        /// Deployment sequence, usually the current block height
        #[serde(default, deserialize_with = "deserialize_opt_u64")]
        dseq: Option<u64>,
        /// Placement groups
        #[serde(default)]
        groups: Vec<GroupSpec>,
        /// Escrow deposit (e.g., "5000000uakt")
        deposit: Option<String>,
        /// Account funding the deposit (default: owner)
        depositor: Option<String>,
        /// Hex SHA-256 of the manifest (default: hash of the groups)
        version: Option<String>,
    },
    /// Provider bid on an open order
    #[serde(rename_all = "camelCase")]
    CreateBid {
        /// Order being bid on
        order: Option<OrderRef>,
        /// Bidding provider (akash1...)
        provider: Option<String>,
        /// Price per block (e.g., "1000uakt", "0.5uakt")
        price: Option<String>,
        /// Bid deposit (default: 5000000uakt)
        deposit: Option<String>,
    },
    /// Tenant accepts a bid
    #[serde(rename_all = "camelCase")]
    CreateLease {
        /// Bid being accepted
        bid_id: Option<BidRef>,
    },
}

/// Raw order identifier
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRef {
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_u64")]
    pub dseq: Option<u64>,
    pub gseq: Option<u32>,
    pub oseq: Option<u32>,
}

/// Raw bid identifier (order + provider)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRef {
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_u64")]
    pub dseq: Option<u64>,
    pub gseq: Option<u32>,
    pub oseq: Option<u32>,
    pub provider: Option<String>,
}
