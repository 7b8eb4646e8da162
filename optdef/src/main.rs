//
// DHCP-RS - Option Definition
//   Copyright (C) 2024-2025, Toshiaki Takada
//

use std::path::Path;
use std::process::exit;

use log::{info, LevelFilter};

use common::*;
use optdef::config::Config;

fn run(path: &Path) -> Result<(), DhcpError> {
    let config = Config::from_file(path)?;

    let mut builder = env_logger::Builder::from_default_env();
    if config.is_debug_enabled() {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    info!("Loaded configuration {}", path.display());

    let storage = config.option_defs()?;
    for (space, defs) in storage.iter() {
        println!("option space {}", space);
        for def in defs.iter() {
            println!("  {}", def);
        }
    }

    for option in config.options(&storage)? {
        let mut buf = Vec::new();
        option.pack(&mut buf)?;
        println!("option {} {} {}", option.universe(), option.code(), hex::encode(&buf));
    }

    Ok(())
}

fn main() {
    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("Usage: optdef <config.json>");
            exit(2);
        }
    };

    if let Err(e) = run(Path::new(&path)) {
        eprintln!("{}: {}", MessageReport::from(&e), e);
        exit(1);
    }
}
