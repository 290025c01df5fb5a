//! Typed, validated Akash messages
//!
//! `build_message` turns a raw `MessageIntent` into an `UnsignedMessage`.
//! Every check happens here, so an `UnsignedMessage` that exists is always
//! encodable.

pub mod deployment;
pub mod types;

pub use deployment::{
    deployment_version, EndpointKind, EndpointSpec, GroupSpec, PlacementSpec, ResourceSpec,
    StorageSpec,
};
pub use types::{BidRef, MessageIntent, OrderRef};

use crate::address::require_account_address;
use crate::coin::{Coin, DecCoin};
use crate::error::WasmAkashError;
use crate::proto::{akash, Any};

/// Deposit attached to a bid when the intent does not set one
pub const DEFAULT_BID_DEPOSIT: &str = "5000000uakt";

/// Supported message kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    CreateDeployment,
    CreateBid,
    CreateLease,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::CreateDeployment => "createDeployment",
            MessageKind::CreateBid => "createBid",
            MessageKind::CreateLease => "createLease",
        }
    }

    /// Fully-qualified protobuf type URL
    pub fn type_url(self) -> &'static str {
        match self {
            MessageKind::CreateDeployment => akash::MSG_CREATE_DEPLOYMENT_TYPE_URL,
            MessageKind::CreateBid => akash::MSG_CREATE_BID_TYPE_URL,
            MessageKind::CreateLease => akash::MSG_CREATE_LEASE_TYPE_URL,
        }
    }
}

/// Order identifier: deployment owner plus deployment, group and order sequences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderId {
    owner: String,
    dseq: u64,
    gseq: u32,
    oseq: u32,
}

impl OrderId {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn dseq(&self) -> u64 {
        self.dseq
    }

    pub fn gseq(&self) -> u32 {
        self.gseq
    }

    pub fn oseq(&self) -> u32 {
        self.oseq
    }

    fn to_proto(&self) -> akash::OrderId {
        akash::OrderId {
            owner: self.owner.clone(),
            dseq: self.dseq,
            gseq: self.gseq,
            oseq: self.oseq,
        }
    }
}

/// Bid identifier: an order plus the bidding provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidId {
    order: OrderId,
    provider: String,
}

impl BidId {
    pub fn order(&self) -> &OrderId {
        &self.order
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    fn to_proto(&self) -> akash::BidId {
        akash::BidId {
            owner: self.order.owner.clone(),
            dseq: self.order.dseq,
            gseq: self.order.gseq,
            oseq: self.order.oseq,
            provider: self.provider.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDeployment {
    owner: String,
    dseq: u64,
    groups: Vec<GroupSpec>,
    version: [u8; 32],
    deposit: Coin,
    depositor: String,
}

impl CreateDeployment {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn dseq(&self) -> u64 {
        self.dseq
    }

    pub fn groups(&self) -> &[GroupSpec] {
        &self.groups
    }

    pub fn version(&self) -> &[u8; 32] {
        &self.version
    }

    pub fn deposit(&self) -> &Coin {
        &self.deposit
    }

    pub fn depositor(&self) -> &str {
        &self.depositor
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBid {
    order: OrderId,
    provider: String,
    price: DecCoin,
    deposit: Coin,
}

impl CreateBid {
    pub fn order(&self) -> &OrderId {
        &self.order
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn price(&self) -> &DecCoin {
        &self.price
    }

    pub fn deposit(&self) -> &Coin {
        &self.deposit
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLease {
    bid_id: BidId,
}

impl CreateLease {
    pub fn bid_id(&self) -> &BidId {
        &self.bid_id
    }
}

/// A validated message, ready to be placed in a transaction body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsignedMessage {
    CreateDeployment(CreateDeployment),
    CreateBid(CreateBid),
    CreateLease(CreateLease),
}

impl UnsignedMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            UnsignedMessage::CreateDeployment(_) => MessageKind::CreateDeployment,
            UnsignedMessage::CreateBid(_) => MessageKind::CreateBid,
            UnsignedMessage::CreateLease(_) => MessageKind::CreateLease,
        }
    }

    pub fn type_url(&self) -> &'static str {
        self.kind().type_url()
    }

    /// Address whose signature the chain expects for this message
    pub fn signer(&self) -> &str {
        match self {
            UnsignedMessage::CreateDeployment(msg) => &msg.owner,
            UnsignedMessage::CreateBid(msg) => &msg.provider,
            UnsignedMessage::CreateLease(msg) => &msg.bid_id.order.owner,
        }
    }

    /// Protobuf message packed into `Any`
    pub fn to_any(&self) -> Any {
        let type_url = self.type_url();
        match self {
            UnsignedMessage::CreateDeployment(msg) => Any::pack(
                type_url,
                &akash::MsgCreateDeployment {
                    id: Some(akash::DeploymentId {
                        owner: msg.owner.clone(),
                        dseq: msg.dseq,
                    }),
                    groups: msg.groups.iter().map(GroupSpec::to_proto).collect(),
                    version: msg.version.to_vec(),
                    deposit: Some(msg.deposit.to_proto()),
                    depositor: msg.depositor.clone(),
                },
            ),
            UnsignedMessage::CreateBid(msg) => Any::pack(
                type_url,
                &akash::MsgCreateBid {
                    order: Some(msg.order.to_proto()),
                    provider: msg.provider.clone(),
                    price: Some(msg.price.to_proto()),
                    deposit: Some(msg.deposit.to_proto()),
                },
            ),
            UnsignedMessage::CreateLease(msg) => Any::pack(
                type_url,
                &akash::MsgCreateLease {
                    bid_id: Some(msg.bid_id.to_proto()),
                },
            ),
        }
    }
}

/// Validate an intent and build the typed message
///
/// # Errors
/// `WasmAkashError::Validation` for missing or empty fields, malformed
/// addresses, non-positive amounts and unrecognized denominations.
pub fn build_message(intent: MessageIntent) -> Result<UnsignedMessage, WasmAkashError> {
    let message = match intent {
        MessageIntent::CreateDeployment {
            owner,
            dseq,
            groups,
            deposit,
            depositor,
            version,
        } => {
            let owner = required_address("owner", owner)?;
            let dseq = positive("dseq", dseq)?;

            if groups.is_empty() {
                return Err(WasmAkashError::validation(
                    "Deployment must have at least one group",
                ));
            }
            for group in &groups {
                group.validate()?;
            }

            let deposit: Coin = required("deposit", deposit)?.parse()?;
            let depositor = match depositor.filter(|d| !d.trim().is_empty()) {
                Some(depositor) => {
                    require_account_address("depositor", &depositor)?;
                    depositor
                }
                None => owner.clone(),
            };
            let version = match version.filter(|v| !v.trim().is_empty()) {
                Some(hex_str) => parse_version(&hex_str)?,
                None => deployment_version(&groups)?,
            };

            UnsignedMessage::CreateDeployment(CreateDeployment {
                owner,
                dseq,
                groups,
                version,
                deposit,
                depositor,
            })
        }
        MessageIntent::CreateBid {
            order,
            provider,
            price,
            deposit,
        } => {
            let order = order.ok_or_else(|| missing("order"))?;
            let order = order_id(order.owner, order.dseq, order.gseq, order.oseq)?;
            let provider = required_address("provider", provider)?;
            let price: DecCoin = required("price", price)?.parse()?;
            let deposit: Coin = deposit
                .filter(|d| !d.trim().is_empty())
                .as_deref()
                .unwrap_or(DEFAULT_BID_DEPOSIT)
                .parse()?;

            UnsignedMessage::CreateBid(CreateBid {
                order,
                provider,
                price,
                deposit,
            })
        }
        MessageIntent::CreateLease { bid_id } => {
            let bid = bid_id.ok_or_else(|| missing("bidId"))?;
            let order = order_id(bid.owner, bid.dseq, bid.gseq, bid.oseq)?;
            let provider = required_address("provider", bid.provider)?;

            UnsignedMessage::CreateLease(CreateLease {
                bid_id: BidId { order, provider },
            })
        }
    };

    tracing::debug!(
        kind = message.kind().as_str(),
        signer = message.signer(),
        "built message"
    );
    Ok(message)
}

fn missing(field: &str) -> WasmAkashError {
    WasmAkashError::validation(format!("Missing required field: {}", field))
}

fn required(field: &str, value: Option<String>) -> Result<String, WasmAkashError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(missing(field)),
    }
}

fn required_address(field: &str, value: Option<String>) -> Result<String, WasmAkashError> {
    let address = required(field, value)?;
    require_account_address(field, &address)?;
    Ok(address)
}

fn positive<T>(field: &str, value: Option<T>) -> Result<T, WasmAkashError>
where
    T: Copy + PartialEq + Default,
{
    match value {
        None => Err(missing(field)),
        Some(v) if v == T::default() => Err(WasmAkashError::validation(format!(
            "{} must be positive",
            field
        ))),
        Some(v) => Ok(v),
    }
}

fn order_id(
    owner: Option<String>,
    dseq: Option<u64>,
    gseq: Option<u32>,
    oseq: Option<u32>,
) -> Result<OrderId, WasmAkashError> {
    Ok(OrderId {
        owner: required_address("owner", owner)?,
        dseq: positive("dseq", dseq)?,
        gseq: positive("gseq", gseq)?,
        oseq: positive("oseq", oseq)?,
    })
}

fn parse_version(hex_str: &str) -> Result<[u8; 32], WasmAkashError> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let bytes = hex::decode(hex_str)
        .map_err(|e| WasmAkashError::validation(format!("Invalid version hex: {}", e)))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        WasmAkashError::validation(format!("Version must be 32 bytes, got {}", bytes.len()))
    })
}
