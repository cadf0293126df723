use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const SNMP_PORT: u16 = 161;

// One datagram each way per exchange; 4096 bytes bounds what we will accept.
const MAX_DATAGRAM: usize = 4096;

fn target_address(target: &str) -> String {
    if target.contains(':') {
        target.to_string()
    } else {
        format!("{target}:{SNMP_PORT}")
    }
}

pub async fn send_and_receive(target: &str, packet: &[u8]) -> Result<Vec<u8>> {
    let socket = UdpSocket::bind("0.0.0.0:0")
        .await
        .context("Failed to bind local socket")?;

    let address = target_address(target);

    socket
        .connect(&address)
        .await
        .with_context(|| format!("Failed to connect to {address}"))?;

    socket.send(packet).await.context("Failed to send packet")?;
    tracing::debug!(target: "snmpwire::net", "sent {} bytes to {address}", packet.len());

    let mut response_buf = vec![0; MAX_DATAGRAM];
    let result = timeout(DEFAULT_TIMEOUT, socket.recv(&mut response_buf)).await;

    match result {
        Ok(Ok(len)) => {
            response_buf.truncate(len);
            tracing::debug!(target: "snmpwire::net", "received {len} bytes from {address}");
            Ok(response_buf)
        }
        Ok(Err(e)) => Err(anyhow!(e).context("Failed to receive data")),
        Err(_) => Err(anyhow!(
            "Timeout: no response from {} after {}s",
            address,
            DEFAULT_TIMEOUT.as_secs()
        )),
    }
}
