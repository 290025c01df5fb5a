//! Protobuf wire types
//!
//! Hand-declared `prost` messages mirroring the cosmos-sdk and akash `.proto`
//! definitions. Field numbers must match the upstream files exactly; prost
//! encodes fields in tag order and omits proto3 defaults, which is what makes
//! the SignDoc bytes canonical.

pub mod akash;
pub mod cosmos;

/// `google.protobuf.Any`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Any {
    #[prost(string, tag = "1")]
    pub type_url: String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

impl Any {
    /// Pack a message under its fully-qualified type URL
    pub fn pack<M: ::prost::Message>(type_url: &str, msg: &M) -> Self {
        Any {
            type_url: type_url.to_string(),
            value: msg.encode_to_vec(),
        }
    }
}
