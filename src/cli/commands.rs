use crate::cli::{AddressArgs, DecodeArgs};
use crate::collab::InvokeResult;
use crate::config::ContractConfig;
use crate::decode::RentDecoder;
use crate::hash::ScriptHash;
use crate::stack::StackItem;
use crate::{Error, Result};
use serde_json::Value as JsonValue;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Effective configuration: file (or defaults) with environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<ContractConfig> {
    let config = match path {
        Some(path) => ContractConfig::load(path)?,
        None => ContractConfig::default(),
    };
    config.apply_env()
}

/// Decode rentals from a file or stdin and print them as JSON.
pub fn decode(args: DecodeArgs, config: &ContractConfig) -> Result<()> {
    let text = match &args.input {
        Some(path) => {
            info!("Reading stack dump from {}", path.display());
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    println!("{}", decode_text(&text, &args, config)?);
    Ok(())
}

/// Print both forms of a script hash.
pub fn address(args: AddressArgs, config: &ContractConfig) -> Result<()> {
    let hash = ScriptHash::parse(&args.value, config.address_version)?;
    println!("script hash: {}", hash);
    println!("address:     {}", hash.to_address(config.address_version));
    Ok(())
}

pub fn show_config(config: &ContractConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Decode a JSON dump into pretty-printed rental JSON.
///
/// Accepts a JSON-RPC envelope, a bare `invokefunction` result, or a single
/// stack item.
pub fn decode_text(text: &str, args: &DecodeArgs, config: &ContractConfig) -> Result<String> {
    let item = extract_slot(serde_json::from_str(text)?, args.slot)?;
    debug!("Decoding {} stack item", item.type_name());

    let decoder = RentDecoder::new(config.address_version);
    let output = if args.list {
        serde_json::to_string_pretty(&decoder.decode_list(&item))?
    } else {
        serde_json::to_string_pretty(&decoder.decode(&item))?
    };
    Ok(output)
}

fn extract_slot(mut value: JsonValue, slot: usize) -> Result<StackItem> {
    if value.get("result").is_some() {
        value = value["result"].take();
    }

    if value.get("stack").is_some() {
        let result: InvokeResult = serde_json::from_value(value)?;
        return Ok(result.slot(slot).clone());
    }

    if value.get("type").is_some() {
        if slot != 0 {
            return Err(Error::InvalidArgument(format!(
                "input is a single stack item, slot {} does not exist",
                slot
            )));
        }
        return Ok(serde_json::from_value(value)?);
    }

    Err(Error::InvalidArgument(
        "expected an invokefunction result or a stack item".to_string(),
    ))
}
