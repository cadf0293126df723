use std::sync::atomic::{AtomicI32, Ordering};

use anyhow::{anyhow, Context, Result};

use crate::ber::{Oid, Value};
use crate::snmp::message::{parse_message, SnmpMessage};
use crate::snmp::pdu::{ErrorStatus, Pdu, PduType, VarBind};

pub mod network;

const VERSION_V2C: i32 = 1;

/// The entry point for SNMP operations against remote agents.
pub struct Manager {
    request_id: AtomicI32,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl Manager {
    pub fn new() -> Self {
        Self {
            request_id: AtomicI32::new(1),
        }
    }

    fn next_request_id(&self) -> i32 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Sends one request PDU and returns the checked response PDU.
    async fn round_trip(
        &self,
        target: &str,
        community: &str,
        pdu_type: PduType,
        oid: Oid,
    ) -> Result<Pdu> {
        let request_id = self.next_request_id();
        let message = SnmpMessage {
            version: VERSION_V2C,
            community: community.as_bytes().to_vec(),
            pdu: Pdu {
                pdu_type,
                request_id,
                error_status: ErrorStatus::NoError,
                error_index: 0,
                varbinds: vec![VarBind {
                    oid,
                    value: Value::Null, // requests carry no value
                }],
            },
        };
        let packet_bytes = message.to_bytes();

        let response_bytes = network::send_and_receive(target, &packet_bytes).await?;

        let response = parse_message(&response_bytes)
            .map_err(|e| anyhow!("Failed to parse response: {e}"))?;

        let pdu = response.pdu;
        if pdu.pdu_type != PduType::GetResponse {
            return Err(anyhow!("Expected a GetResponse, got {:?}", pdu.pdu_type));
        }
        if pdu.request_id != request_id {
            return Err(anyhow!(
                "Response id {} does not match request id {request_id}",
                pdu.request_id
            ));
        }

        Ok(pdu)
    }

    /// Performs a single, asynchronous SNMP GET operation.
    pub async fn get(&self, target: &str, community: &str, oid_str: &str) -> Result<VarBind> {
        let oid: Oid = oid_str
            .parse()
            .with_context(|| format!("Invalid OID: '{oid_str}'"))?;

        let pdu = self
            .round_trip(target, community, PduType::GetRequest, oid)
            .await?;

        if pdu.error_status != ErrorStatus::NoError {
            return Err(anyhow!(
                "SNMP error: {:?} (index: {})",
                pdu.error_status,
                pdu.error_index
            ));
        }

        pdu.varbinds
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No VarBinds in response"))
    }

    /// A single GET-NEXT: the agent answers with the lexicographic successor
    /// of `oid`.
    pub async fn get_next(&self, target: &str, community: &str, oid: Oid) -> Result<VarBind> {
        let pdu = self
            .round_trip(target, community, PduType::GetNextRequest, oid)
            .await?;

        if pdu.error_status != ErrorStatus::NoError {
            return Err(anyhow!(
                "SNMP error: {:?} (index: {})",
                pdu.error_status,
                pdu.error_index
            ));
        }

        pdu.varbinds
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No VarBinds in GetNext response"))
    }

    /// Repeated GET-NEXT from `root_oid_str` until the agent leaves the
    /// subtree or signals the end of its view.
    pub async fn walk(
        &self,
        target: &str,
        community: &str,
        root_oid_str: &str,
    ) -> Result<Vec<VarBind>> {
        let root_oid: Oid = root_oid_str
            .parse()
            .with_context(|| format!("Invalid OID: '{root_oid_str}'"))?;

        let mut results = Vec::new();
        let mut current_oid = root_oid.clone();

        loop {
            let pdu = self
                .round_trip(target, community, PduType::GetNextRequest, current_oid)
                .await?;

            if pdu.error_status != ErrorStatus::NoError {
                // a v1 agent ends the walk with NoSuchName
                if pdu.error_status == ErrorStatus::NoSuchName {
                    break;
                }
                return Err(anyhow!(
                    "SNMP error: {:?} (index: {})",
                    pdu.error_status,
                    pdu.error_index
                ));
            }

            let varbind = pdu
                .varbinds
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("No VarBinds in GetNext response"))?;

            match varbind.value {
                Value::NoSuchObject | Value::EndOfMibView => break,
                _ => {}
            }

            if !varbind.oid.is_under(&root_oid) {
                break;
            }

            current_oid = varbind.oid.clone();
            results.push(varbind);
        }
        Ok(results)
    }
}
