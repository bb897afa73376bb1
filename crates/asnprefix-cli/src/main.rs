//! asnprefix - resolve the prefixes announced by ASNs
//!
//! Queries BGPView, RIPEstat and the bgp.tools table and writes one
//! `<ASN>.txt` file per ASN.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    asnprefix_cli::run().await
}
