//! Structured deployment description (the groups of a `MsgCreateDeployment`)
//!
//! This is the already-parsed form of an SDL file: one entry per placement
//! group with the compute units it asks for and the maximum price per block.

use crate::coin::DecCoin;
use crate::error::WasmAkashError;
use crate::proto::akash;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Placement group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    /// Group name (e.g., "westcoast")
    pub name: String,
    /// Provider placement constraints
    #[serde(default)]
    pub requirements: PlacementSpec,
    /// Compute units requested by this group
    pub resources: Vec<ResourceSpec>,
}

/// Provider attributes and auditor signatures a provider must carry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementSpec {
    /// Provider attributes; a sorted map so the encoded order is fixed
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Auditors that must all have signed the provider
    #[serde(default)]
    pub signed_by_all_of: Vec<String>,
    /// Auditors of which at least one must have signed the provider
    #[serde(default)]
    pub signed_by_any_of: Vec<String>,
}

/// One compute unit profile, replicated `count` times
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    /// CPU in thousandths of a core (1000 = 1 vCPU)
    pub cpu_millis: u64,
    /// Memory in bytes
    pub memory_bytes: u64,
    /// Storage volumes (at least one, usually "default")
    pub storage: Vec<StorageSpec>,
    /// GPU units
    #[serde(default)]
    pub gpu: u64,
    /// Exposed endpoints
    #[serde(default)]
    pub endpoints: Vec<EndpointSpec>,
    /// Number of replicas
    pub count: u32,
    /// Maximum price per block per replica (e.g., "1000uakt")
    pub price: DecCoin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    pub name: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Storage class attributes (e.g., "class" => "beta2", "persistent" => "true")
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSpec {
    pub kind: EndpointKind,
    #[serde(default)]
    pub sequence_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndpointKind {
    SharedHttp,
    RandomPort,
    LeasedIp,
}

impl GroupSpec {
    pub(crate) fn validate(&self) -> Result<(), WasmAkashError> {
        if self.name.trim().is_empty() {
            return Err(WasmAkashError::validation("Group name cannot be empty"));
        }
        if self.resources.is_empty() {
            return Err(WasmAkashError::validation(format!(
                "Group {} has no resources",
                self.name
            )));
        }
        for resource in &self.resources {
            resource.validate(&self.name)?;
        }
        Ok(())
    }

    pub(crate) fn to_proto(&self) -> akash::GroupSpec {
        akash::GroupSpec {
            name: self.name.clone(),
            requirements: Some(self.requirements.to_proto()),
            resources: self
                .resources
                .iter()
                .enumerate()
                .map(|(i, r)| r.to_proto(i as u32 + 1))
                .collect(),
        }
    }
}

impl PlacementSpec {
    fn to_proto(&self) -> akash::PlacementRequirements {
        akash::PlacementRequirements {
            signed_by: Some(akash::SignedBy {
                all_of: self.signed_by_all_of.clone(),
                any_of: self.signed_by_any_of.clone(),
            }),
            attributes: attributes(&self.attributes),
        }
    }
}

impl ResourceSpec {
    fn validate(&self, group: &str) -> Result<(), WasmAkashError> {
        let fail = |what: &str| {
            Err(WasmAkashError::validation(format!(
                "Group {}: {}",
                group, what
            )))
        };
        if self.count == 0 {
            return fail("resource count must be positive");
        }
        if self.cpu_millis == 0 {
            return fail("cpu must be positive");
        }
        if self.memory_bytes == 0 {
            return fail("memory must be positive");
        }
        if self.storage.is_empty() {
            return fail("at least one storage volume is required");
        }
        if self
            .storage
            .iter()
            .any(|s| s.name.trim().is_empty() || s.size_bytes == 0)
        {
            return fail("storage volumes need a name and a positive size");
        }
        Ok(())
    }

    fn to_proto(&self, id: u32) -> akash::ResourceUnit {
        akash::ResourceUnit {
            resource: Some(akash::Resources {
                id,
                cpu: Some(akash::Cpu {
                    units: Some(akash::ResourceValue::from_u64(self.cpu_millis)),
                    attributes: vec![],
                }),
                memory: Some(akash::Memory {
                    quantity: Some(akash::ResourceValue::from_u64(self.memory_bytes)),
                    attributes: vec![],
                }),
                storage: self
                    .storage
                    .iter()
                    .map(|s| akash::Storage {
                        name: s.name.clone(),
                        quantity: Some(akash::ResourceValue::from_u64(s.size_bytes)),
                        attributes: attributes(&s.attributes),
                    })
                    .collect(),
                gpu: Some(akash::Gpu {
                    units: Some(akash::ResourceValue::from_u64(self.gpu)),
                    attributes: vec![],
                }),
                endpoints: self
                    .endpoints
                    .iter()
                    .map(|e| akash::Endpoint {
                        kind: e.kind.to_proto() as i32,
                        sequence_number: e.sequence_number,
                    })
                    .collect(),
            }),
            count: self.count,
            price: Some(self.price.to_proto()),
        }
    }
}

impl EndpointKind {
    fn to_proto(self) -> akash::EndpointKind {
        match self {
            EndpointKind::SharedHttp => akash::EndpointKind::SharedHttp,
            EndpointKind::RandomPort => akash::EndpointKind::RandomPort,
            EndpointKind::LeasedIp => akash::EndpointKind::LeasedIp,
        }
    }
}

fn attributes(map: &BTreeMap<String, String>) -> Vec<akash::Attribute> {
    map.iter()
        .map(|(key, value)| akash::Attribute {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

/// SHA-256 over the sorted-key JSON of the groups
///
/// Used as the deployment version when the caller does not supply the
/// manifest hash.
pub fn deployment_version(groups: &[GroupSpec]) -> Result<[u8; 32], WasmAkashError> {
    // serde_json::Value objects are BTreeMap-backed, so keys come out sorted
    let value = serde_json::to_value(groups)
        .map_err(|e| WasmAkashError::encoding(format!("Failed to serialize groups: {}", e)))?;
    let canonical = serde_json::to_vec(&value)
        .map_err(|e| WasmAkashError::encoding(format!("Failed to serialize groups: {}", e)))?;
    let mut version = [0u8; 32];
    version.copy_from_slice(&Sha256::digest(&canonical));
    Ok(version)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_group() -> GroupSpec {
        serde_json::from_str(
            r#"{
                "name": "akash",
                "requirements": {
                    "attributes": { "region": "us-west", "host": "akash" },
                    "signedByAnyOf": ["akash1365yvmc4s7awdyj3n2sav7xfx76adc6dnmlx63"]
                },
                "resources": [{
                    "cpuMillis": 1000,
                    "memoryBytes": 1073741824,
                    "storage": [{ "name": "default", "sizeBytes": 1073741824 }],
                    "endpoints": [{ "kind": "sharedHttp" }],
                    "count": 1,
                    "price": "1000uakt"
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_group_to_proto() {
        let proto = sample_group().to_proto();
        assert_eq!(proto.name, "akash");

        let requirements = proto.requirements.unwrap();
        // BTreeMap ordering: "host" before "region"
        assert_eq!(requirements.attributes[0].key, "host");
        assert_eq!(requirements.attributes[1].key, "region");

        let unit = &proto.resources[0];
        assert_eq!(unit.count, 1);
        let resources = unit.resource.as_ref().unwrap();
        assert_eq!(resources.id, 1);
        assert_eq!(
            resources.cpu.as_ref().unwrap().units.as_ref().unwrap().val,
            b"1000".to_vec()
        );
        assert_eq!(
            resources.gpu.as_ref().unwrap().units.as_ref().unwrap().val,
            b"0".to_vec()
        );
        assert_eq!(
            unit.price.as_ref().unwrap().amount,
            "1000000000000000000000"
        );
    }

    #[test]
    fn test_validate_group() {
        assert!(sample_group().validate().is_ok());

        let mut group = sample_group();
        group.name = " ".to_string();
        assert!(group.validate().is_err());

        let mut group = sample_group();
        group.resources[0].count = 0;
        assert!(group.validate().is_err());

        let mut group = sample_group();
        group.resources[0].storage.clear();
        assert!(group.validate().is_err());

        let mut group = sample_group();
        group.resources.clear();
        assert!(group.validate().is_err());
    }

    #[test]
    fn test_version_is_order_independent() {
        let a = sample_group();
        let mut b = sample_group();
        // Rebuild the attribute map in the opposite insertion order
        b.requirements.attributes = [("region", "us-west"), ("host", "akash")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert_eq!(
            deployment_version(&[a.clone()]).unwrap(),
            deployment_version(&[b]).unwrap()
        );

        let mut c = a.clone();
        c.resources[0].count = 2;
        assert_ne!(
            deployment_version(&[a]).unwrap(),
            deployment_version(&[c]).unwrap()
        );
    }
}
