// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! IAM policy for instances and databases.

use std::collections::BTreeMap;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use spanner_protocol::iam_proto;

/// An IAM policy: a set of roles, each granted to a list of members.
///
/// The `etag` guards against concurrent modification. Get the policy,
/// change it and set it back; the service rejects the update if the
/// policy changed in between.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(serialize_with = "etag_to_base64", deserialize_with = "etag_from_base64")]
    etag: Vec<u8>,
    #[serde(default)]
    version: i32,
    #[serde(default)]
    roles: BTreeMap<String, Vec<String>>,
}

impl Policy {
    pub fn new(etag: Vec<u8>, roles: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            etag,
            version: 0,
            roles,
        }
    }

    pub fn etag(&self) -> &[u8] {
        &self.etag
    }

    /// The etag as it appears in JSON, base64 encoded.
    pub fn etag_base64(&self) -> String {
        STANDARD.encode(&self.etag)
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn roles(&self) -> &BTreeMap<String, Vec<String>> {
        &self.roles
    }

    pub fn roles_mut(&mut self) -> &mut BTreeMap<String, Vec<String>> {
        &mut self.roles
    }

    /// Members granted `role`; empty if the role is absent.
    pub fn role(&self, role: &str) -> &[String] {
        self.roles.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Grant `role` to `member`. Adding an existing member is a no-op.
    pub fn add(&mut self, role: impl Into<String>, member: impl Into<String>) {
        let member = member.into();
        let members = self.roles.entry(role.into()).or_default();
        if !members.contains(&member) {
            members.push(member);
        }
    }

    /// Revoke `role` from `member`. Returns true if the member was present.
    pub fn remove(&mut self, role: &str, member: &str) -> bool {
        let Some(members) = self.roles.get_mut(role) else {
            return false;
        };
        let before = members.len();
        members.retain(|m| m != member);
        before != members.len()
    }

    /// Remove the role and all its members.
    pub fn remove_role(&mut self, role: &str) -> Option<Vec<String>> {
        self.roles.remove(role)
    }

    pub fn from_proto(proto: iam_proto::Policy) -> Self {
        let mut roles: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for binding in proto.bindings {
            roles.entry(binding.role).or_default().extend(binding.members);
        }
        Self {
            etag: proto.etag,
            version: proto.version,
            roles,
        }
    }

    /// Convert to the wire message. Roles without members are dropped.
    pub fn to_proto(&self) -> iam_proto::Policy {
        iam_proto::Policy {
            version: self.version,
            etag: self.etag.clone(),
            bindings: self
                .roles
                .iter()
                .filter(|(_, members)| !members.is_empty())
                .map(|(role, members)| iam_proto::Binding {
                    role: role.clone(),
                    members: members.clone(),
                })
                .collect(),
        }
    }
}

impl From<iam_proto::Policy> for Policy {
    fn from(proto: iam_proto::Policy) -> Self {
        Self::from_proto(proto)
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("etag", &self.etag_base64())
            .field("version", &self.version)
            .field("roles", &self.roles)
            .finish()
    }
}

fn etag_to_base64<S: Serializer>(etag: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(etag))
}

fn etag_from_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer_policy() -> Policy {
        Policy::from_proto(iam_proto::Policy {
            version: 1,
            etag: vec![0x08, 0x01],
            bindings: vec![iam_proto::Binding {
                role: "roles/viewer".into(),
                members: vec![
                    "user:viewer@example.com".into(),
                    "serviceAccount:1234567890@developer.gserviceaccount.com".into(),
                ],
            }],
        })
    }

    #[test]
    fn test_from_proto() {
        let policy = viewer_policy();
        assert_eq!(policy.etag_base64(), "CAE=");
        assert_eq!(policy.roles().len(), 1);
        assert_eq!(policy.role("roles/viewer")[0], "user:viewer@example.com");
        assert!(policy.role("roles/owner").is_empty());
    }

    #[test]
    fn test_add_skips_duplicates() {
        let mut policy = viewer_policy();
        policy.add("roles/viewer", "user:viewer@example.com");
        policy.add("roles/viewer", "user:new@example.com");
        assert_eq!(policy.role("roles/viewer").len(), 3);
        assert_eq!(policy.role("roles/viewer")[2], "user:new@example.com");
    }

    #[test]
    fn test_to_proto_drops_empty_roles() {
        let mut policy = viewer_policy();
        policy.add("roles/owner", "user:owner@example.com");
        assert!(policy.remove("roles/owner", "user:owner@example.com"));
        assert!(!policy.remove("roles/owner", "user:owner@example.com"));

        let proto = policy.to_proto();
        assert_eq!(proto.bindings.len(), 1);
        assert_eq!(proto.bindings[0].role, "roles/viewer");
        assert_eq!(proto.etag, vec![0x08, 0x01]);
    }

    #[test]
    fn test_json_etag_is_base64() {
        let policy = viewer_policy();
        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(json["etag"], "CAE=");
        assert_eq!(json["roles"]["roles/viewer"][1], "serviceAccount:1234567890@developer.gserviceaccount.com");

        let back: Policy = serde_json::from_value(json).unwrap();
        assert_eq!(back, policy);
    }
}
