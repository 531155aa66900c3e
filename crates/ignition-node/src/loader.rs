//! Launch-input loading.
//!
//! The bootstrap core treats the roster, snapshot, and contract artifacts
//! as already-parsed immutable inputs; this module is the outer shell that
//! reads them from disk. Roster and snapshot files are plain JSON arrays
//! in launch-file order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignition_boot::BootConfig;
use ignition_types::{Roster, Snapshot};
use serde::Deserialize;

/// Node-level configuration: the boot parameters plus input file paths.
#[derive(Debug, Deserialize)]
pub struct NodeConfig {
    /// Bootstrap parameters handed to the core
    pub boot: BootConfig,

    /// Path to the launch roster (JSON array of operators)
    pub roster_path: PathBuf,

    /// Path to the balance snapshot (JSON array of holders)
    pub snapshot_path: PathBuf,

    /// Path to the compiled system contract code
    pub code_path: PathBuf,

    /// Path to the system contract ABI
    pub abi_path: PathBuf,

    /// This operator's own private key, imported into the run-scoped
    /// signer so delegates can sign endorsements
    #[serde(default)]
    pub private_key: Option<String>,
}

/// Load the node configuration and the contract artifacts it points at.
pub fn load_node_config(path: &Path) -> Result<NodeConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading node config {}", path.display()))?;
    let mut config: NodeConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing node config {}", path.display()))?;

    config.boot.contract.code = fs::read(&config.code_path)
        .with_context(|| format!("reading contract code {}", config.code_path.display()))?;
    config.boot.contract.abi = fs::read(&config.abi_path)
        .with_context(|| format!("reading contract abi {}", config.abi_path.display()))?;
    Ok(config)
}

/// Load the launch roster.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading roster {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing roster {}", path.display()))
}

/// Load the balance snapshot.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let code = write_file(dir.path(), "sys.wasm", "\0code");
        let abi = write_file(dir.path(), "sys.abi", "{}");
        let roster = write_file(
            dir.path(),
            "roster.json",
            r#"[{"account":"alice","public_key":"pk-a","url":"p2p://a"}]"#,
        );
        let snapshot = write_file(
            dir.path(),
            "snapshot.json",
            r#"[{"external_address":"0xABCDEF123456","public_key":"hk-1",
                "balance":{"units":1000000,"symbol":{"precision":4,"code":"IGN"}}}]"#,
        );
        let config_path = write_file(
            dir.path(),
            "node.json",
            &format!(
                r#"{{
                    "boot": {{
                        "account": "alice",
                        "no_shuffle": true,
                        "p2p_address": "10.0.0.1:9876"
                    }},
                    "roster_path": {roster:?},
                    "snapshot_path": {snapshot:?},
                    "code_path": {code:?},
                    "abi_path": {abi:?}
                }}"#
            ),
        );

        let config = load_node_config(&config_path).unwrap();
        assert_eq!(config.boot.account.as_str(), "alice");
        assert_eq!(config.boot.contract.code, b"\0code");
        assert!(config.private_key.is_none());

        let roster = load_roster(&config.roster_path).unwrap();
        assert_eq!(roster.len(), 1);
        let snapshot = load_snapshot(&config.snapshot_path).unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_missing_artifact_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_file(
            dir.path(),
            "node.json",
            r#"{
                "boot": {"account": "a", "no_shuffle": true, "p2p_address": "x"},
                "roster_path": "r.json",
                "snapshot_path": "s.json",
                "code_path": "/nonexistent/sys.wasm",
                "abi_path": "/nonexistent/sys.abi"
            }"#,
        );
        let err = load_node_config(&config_path).unwrap_err();
        assert!(err.to_string().contains("contract code"));
    }
}
