//! End-to-end CLI integration tests
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;

const FIXTURE: &str = "tests/fixtures/get_rent_list.json";

fn rentfuse() -> Command {
    let mut cmd = Command::cargo_bin("rentfuse").unwrap();
    cmd.env_remove("RENTFUSE_CONFIG")
        .env_remove("RENTFUSE_SCRIPT_HASH")
        .env_remove("RENTFUSE_NETWORK_MAGIC")
        .env_remove("RENTFUSE_RPC_ADDRESS");
    cmd
}

#[test]
fn decode_list_from_file() {
    let output = rentfuse()
        .args(["--quiet", "decode", "--list", "--input", FIXTURE])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let rents = json.as_array().unwrap();
    assert_eq!(rents.len(), 2);

    assert_eq!(rents[0]["tokenId"], "1");
    assert_eq!(rents[0]["owner"], "NL1JGjDe22U44R57ZXVSeRa4T7Jo1HDLF4");
    assert_eq!(rents[0]["tenant"], Value::Null);
    assert_eq!(rents[0]["nftScriptHash"], "NV4pELR8Lk4NRZU3NUezPQyvvFFiuaK18y");
    assert_eq!(rents[0]["nftTokenId"], "nft-1");
    assert_eq!(rents[0]["price"], "100000000");

    assert_eq!(rents[1]["tokenId"], "2");
    assert_eq!(rents[1]["tenant"], "NQVQK4Q1epq93kTbNCWeqk2XBqKchH6DJP");
    assert_eq!(rents[1]["nftTokenId"], "7");
    assert_eq!(rents[1]["state"], 1);
    assert_eq!(rents[1]["rentedOn"], 1_650_000_100_000u64);
}

#[test]
fn decode_single_from_stdin_on_a_list_is_null() {
    let fixture = std::fs::read_to_string(FIXTURE).unwrap();
    rentfuse()
        .args(["--quiet", "decode"])
        .write_stdin(fixture)
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn decode_rejects_garbage() {
    rentfuse()
        .args(["--quiet", "decode"])
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON error"));
}

#[test]
fn address_converts_both_ways() {
    rentfuse()
        .args(["address", "0x14131211100f0e0d0c0b0a090807060504030201"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NL1JGjDe22U44R57ZXVSeRa4T7Jo1HDLF4"));

    rentfuse()
        .args(["address", "NL1JGjDe22U44R57ZXVSeRa4T7Jo1HDLF4"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0x14131211100f0e0d0c0b0a090807060504030201",
        ));
}

#[test]
fn config_file_and_env_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rpc_address = \"http://localhost:50012\"").unwrap();

    rentfuse()
        .arg("--config")
        .arg(file.path())
        .arg("config")
        .env("RENTFUSE_NETWORK_MAGIC", "1234")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:50012"))
        .stdout(predicate::str::contains("network_magic = 1234"));
}

#[test]
fn help_lists_subcommands() {
    rentfuse()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("address"));
}
