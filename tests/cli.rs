//! Runs the compiled binary for flows that need no network access.

use std::path::Path;
use std::process::{Command, Output};

mod common;
use common::{TEST_ADDRESS, TEST_PRIVATE_KEY};

/// The binary with `--state-file` set and no inherited `FLASH_*` or
/// `RUST_LOG` settings.
fn flash_tx_command(state_file: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_flash-tx"));
    cmd.arg("--state-file")
        .arg(state_file)
        .env_remove("FLASH_CONFIG")
        .env_remove("FLASH_NETWORK")
        .env_remove("FLASH_STATE_FILE")
        .env_remove("FLASH_PRIVATE_KEY")
        .env_remove("SEPOLIA_RPC_URL")
        .env_remove("MAINNET_RPC_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn flash_tx(state_file: &Path, args: &[&str]) -> Output {
    flash_tx_command(state_file).args(args).output().unwrap()
}

#[test]
fn test_add_wallet_prints_address_not_key() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("wallet_state.json");

    let out = flash_tx(
        &state,
        &["add-wallet", "--name", "test_wallet", "--key", TEST_PRIVATE_KEY],
    );

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stdout.contains("Wallet 'test_wallet' added successfully"));
    assert!(stdout.contains(TEST_ADDRESS));
    assert!(!stdout.contains(TEST_PRIVATE_KEY));
    assert!(!stderr.contains(TEST_PRIVATE_KEY));
    assert!(state.exists());
}

#[test]
fn test_key_can_come_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("wallet_state.json");

    let out = flash_tx_command(&state)
        .args(["add-wallet", "--name", "env_wallet"])
        .env("FLASH_PRIVATE_KEY", format!("0x{TEST_PRIVATE_KEY}"))
        .output()
        .unwrap();

    assert!(out.status.success());
    assert!(String::from_utf8(out.stdout).unwrap().contains(TEST_ADDRESS));
}

#[test]
fn test_duplicate_name_exits_with_runtime_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("wallet_state.json");
    let args = ["add-wallet", "--name", "w", "--key", TEST_PRIVATE_KEY];

    assert!(flash_tx(&state, &args).status.success());
    let before = std::fs::read(&state).unwrap();

    let out = flash_tx(&state, &args);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert_eq!(stderr.matches("already exists").count(), 1, "{stderr}");
    assert!(stderr.contains("Error: Wallet 'w' already exists"));
    assert_eq!(std::fs::read(&state).unwrap(), before);
}

#[test]
fn test_malformed_key_is_rejected_without_echo() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("wallet_state.json");
    let bad_key = "zz0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    let out = flash_tx(&state, &["add-wallet", "--name", "w", "--key", bad_key]);

    assert_eq!(out.status.code(), Some(1));
    assert!(!String::from_utf8(out.stderr).unwrap().contains(bad_key));
    assert!(!state.exists());
}

#[test]
fn test_unknown_wallet_exits_before_any_rpc() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("wallet_state.json");

    let out = flash_tx(&state, &["--mock", "balance", "--wallet", "missing"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8(out.stderr).unwrap().contains("missing"));
}

#[test]
fn test_missing_config_file_exits_with_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("wallet_state.json");
    let config = dir.path().join("nope.toml");

    let out = flash_tx(
        &state,
        &["--config", config.to_str().unwrap(), "balance", "--wallet", "w"],
    );

    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_misplaced_config_key_exits_with_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("wallet_state.json");
    let config = dir.path().join("flash.toml");
    std::fs::write(&config, "network = \"mainnet\"\n[chain]\nrpc_timeout_secs = 10\n").unwrap();

    let out = flash_tx(
        &state,
        &["--config", config.to_str().unwrap(), "balance", "--wallet", "w"],
    );

    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8(out.stderr).unwrap().contains("network"));
}
