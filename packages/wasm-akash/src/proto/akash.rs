//! akash messages (`akash.base.v1beta3`, `akash.deployment.v1beta3`, `akash.market.v1beta4`)

use super::cosmos::{Coin, DecCoin};

pub const MSG_CREATE_DEPLOYMENT_TYPE_URL: &str = "/akash.deployment.v1beta3.MsgCreateDeployment";
pub const MSG_CREATE_BID_TYPE_URL: &str = "/akash.market.v1beta4.MsgCreateBid";
pub const MSG_CREATE_LEASE_TYPE_URL: &str = "/akash.market.v1beta4.MsgCreateLease";

// =============================================================================
// akash.base.v1beta3
// =============================================================================

/// Quantity encoded as the decimal string of an `sdk.Int`
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct ResourceValue {
    #[prost(bytes = "vec", tag = "1")]
    pub val: Vec<u8>,
}

impl ResourceValue {
    pub fn from_u64(value: u64) -> Self {
        ResourceValue {
            val: value.to_string().into_bytes(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Attribute {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct SignedBy {
    #[prost(string, repeated, tag = "1")]
    pub all_of: Vec<String>,
    #[prost(string, repeated, tag = "2")]
    pub any_of: Vec<String>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct PlacementRequirements {
    #[prost(message, optional, tag = "1")]
    pub signed_by: Option<SignedBy>,
    #[prost(message, repeated, tag = "2")]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Cpu {
    #[prost(message, optional, tag = "1")]
    pub units: Option<ResourceValue>,
    #[prost(message, repeated, tag = "2")]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Memory {
    #[prost(message, optional, tag = "1")]
    pub quantity: Option<ResourceValue>,
    #[prost(message, repeated, tag = "2")]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Storage {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub quantity: Option<ResourceValue>,
    #[prost(message, repeated, tag = "3")]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Gpu {
    #[prost(message, optional, tag = "1")]
    pub units: Option<ResourceValue>,
    #[prost(message, repeated, tag = "2")]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum EndpointKind {
    SharedHttp = 0,
    RandomPort = 1,
    LeasedIp = 2,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Endpoint {
    #[prost(enumeration = "EndpointKind", tag = "1")]
    pub kind: i32,
    #[prost(uint32, tag = "2")]
    pub sequence_number: u32,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Resources {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(message, optional, tag = "2")]
    pub cpu: Option<Cpu>,
    #[prost(message, optional, tag = "3")]
    pub memory: Option<Memory>,
    #[prost(message, repeated, tag = "4")]
    pub storage: Vec<Storage>,
    #[prost(message, optional, tag = "5")]
    pub gpu: Option<Gpu>,
    #[prost(message, repeated, tag = "6")]
    pub endpoints: Vec<Endpoint>,
}

// =============================================================================
// akash.deployment.v1beta3
// =============================================================================

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct DeploymentId {
    #[prost(string, tag = "1")]
    pub owner: String,
    #[prost(uint64, tag = "2")]
    pub dseq: u64,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct ResourceUnit {
    #[prost(message, optional, tag = "1")]
    pub resource: Option<Resources>,
    #[prost(uint32, tag = "2")]
    pub count: u32,
    #[prost(message, optional, tag = "3")]
    pub price: Option<DecCoin>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct GroupSpec {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub requirements: Option<PlacementRequirements>,
    #[prost(message, repeated, tag = "3")]
    pub resources: Vec<ResourceUnit>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgCreateDeployment {
    #[prost(message, optional, tag = "1")]
    pub id: Option<DeploymentId>,
    #[prost(message, repeated, tag = "2")]
    pub groups: Vec<GroupSpec>,
    #[prost(bytes = "vec", tag = "3")]
    pub version: Vec<u8>,
    #[prost(message, optional, tag = "4")]
    pub deposit: Option<Coin>,
    #[prost(string, tag = "5")]
    pub depositor: String,
}

// =============================================================================
// akash.market.v1beta4
// =============================================================================

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct OrderId {
    #[prost(string, tag = "1")]
    pub owner: String,
    #[prost(uint64, tag = "2")]
    pub dseq: u64,
    #[prost(uint32, tag = "3")]
    pub gseq: u32,
    #[prost(uint32, tag = "4")]
    pub oseq: u32,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct BidId {
    #[prost(string, tag = "1")]
    pub owner: String,
    #[prost(uint64, tag = "2")]
    pub dseq: u64,
    #[prost(uint32, tag = "3")]
    pub gseq: u32,
    #[prost(uint32, tag = "4")]
    pub oseq: u32,
    #[prost(string, tag = "5")]
    pub provider: String,
}

/// `resources_offer` (field 5) is left empty; providers that offer specific
/// resources need to extend this message.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgCreateBid {
    #[prost(message, optional, tag = "1")]
    pub order: Option<OrderId>,
    #[prost(string, tag = "2")]
    pub provider: String,
    #[prost(message, optional, tag = "3")]
    pub price: Option<DecCoin>,
    #[prost(message, optional, tag = "4")]
    pub deposit: Option<Coin>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct MsgCreateLease {
    #[prost(message, optional, tag = "1")]
    pub bid_id: Option<BidId>,
}
