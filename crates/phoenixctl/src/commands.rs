//! Command implementations

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ctre_phoenix::PhoenixConfig;
use serde::Serialize;

use crate::error::CliError;
use crate::output;

/// Where to look for the staged library
#[derive(Args, Debug)]
pub struct LibraryArgs {
    /// JSON configuration file; flags below override its fields
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the staged library
    #[arg(long, value_name = "DIR", env = "PHOENIX_LIB_DIR")]
    pub lib_dir: Option<PathBuf>,

    /// Library base name, without platform prefix or extension
    #[arg(long, value_name = "NAME", env = "PHOENIX_LIB_NAME")]
    pub lib_name: Option<String>,
}

impl LibraryArgs {
    /// Resolve the loader configuration.
    pub fn resolve(&self) -> Result<PhoenixConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                PhoenixConfig::from_json_file(path).map_err(CliError::InvalidConfiguration)?
            }
            None => PhoenixConfig::default(),
        };
        if let Some(dir) = &self.lib_dir {
            config = config.with_library_dir(dir);
        }
        if let Some(name) = &self.lib_name {
            config = config.with_library_name(name);
        }
        config.validate().map_err(CliError::InvalidConfiguration)?;
        Ok(config)
    }
}

/// Result of comparing a library against the declared symbols
#[derive(Debug, Serialize)]
pub struct AbiReport {
    pub path: PathBuf,
    pub declared: usize,
    pub missing: Vec<&'static str>,
}

pub fn symbols(json: bool) -> Result<()> {
    output::print_symbols(ctre_phoenix::declared_symbols(), json);
    Ok(())
}

pub fn check_abi(args: &LibraryArgs, json: bool) -> Result<()> {
    let config = args.resolve()?;
    let path = config.library_path();
    tracing::info!(path = %path.display(), "Checking library exports");

    let missing = ctre_phoenix::missing_symbols(&path).map_err(CliError::LibraryUnavailable)?;
    let report = AbiReport {
        path,
        declared: ctre_phoenix::declared_symbols().len(),
        missing,
    };
    output::print_abi_report(&report, json);

    if report.missing.is_empty() {
        Ok(())
    } else {
        Err(CliError::MissingSymbols {
            count: report.missing.len(),
            declared: report.declared,
        }
        .into())
    }
}
