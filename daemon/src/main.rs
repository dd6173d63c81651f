//! ourchain daemon: run contract invocations against a local ledger.

use anyhow::Context;
use clap::Parser;
use ourchain_contract::{Contract, ContractConfig, ContractError, Operation};
use ourchain_nullables::NullLedger;
use ourchain_utils::LogFormat;
use ourchain_verification::ProofGate;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ourchain-daemon", about = "Run ourchain contract invocations locally")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "OURCHAIN_CONFIG")]
    config: Option<PathBuf>,

    /// JSON snapshot holding ledger state between invocations.
    #[arg(long, default_value = "./ourchain_state.json", env = "OURCHAIN_STATE")]
    state: PathBuf,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "OURCHAIN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "OURCHAIN_LOG_FORMAT")]
    log_format: Option<String>,

    /// Proof verifier endpoint.
    #[arg(long, env = "OURCHAIN_VERIFIER_URL")]
    verifier_url: Option<String>,

    /// Gate `create-vote` on the voter's identity proof.
    #[arg(long, env = "OURCHAIN_REQUIRE_VOTER_PROOF")]
    require_voter_proof: bool,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run one contract invocation.
    Invoke {
        /// Operation name, e.g. "create-entry" or "queryVotesByPoll".
        operation: String,
        /// Positional arguments passed to the operation.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Ask the proof verifier whether an identity holds the required proof.
    VerifyProof {
        /// 22-byte DID.
        did: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ContractConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ContractConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(url) = cli.verifier_url {
        config.verifier.url = url;
    }
    config.require_voter_proof |= cli.require_voter_proof;

    let log_format: LogFormat = config.log_format.parse()?;
    ourchain_utils::init_tracing(&config.log_level, log_format);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let gate = ProofGate::new(config.verifier.clone());

    match cli.command {
        Command::Invoke { operation, args } => {
            let ledger = NullLedger::load(&cli.state)
                .with_context(|| format!("failed to load state {}", cli.state.display()))?;
            let contract = Contract::new(&config);
            let response = contract
                .invoke_gated(&ledger, &gate, &operation, &args)
                .await;
            if !response.is_ok() {
                eprintln!("{}", response.message);
                return Ok(ExitCode::FAILURE);
            }
            let wrote = operation
                .parse::<Operation>()
                .is_ok_and(|op| op.is_write());
            if wrote {
                ledger
                    .save(&cli.state)
                    .with_context(|| format!("failed to save state {}", cli.state.display()))?;
                tracing::debug!(
                    operation = %operation,
                    records = ledger.len(),
                    "state saved to {}",
                    cli.state.display()
                );
            }
            if !response.payload.is_empty() {
                println!("{}", String::from_utf8_lossy(&response.payload));
            }
        }
        Command::VerifyProof { did } => match gate.verify_identity_proof(&did).await {
            Ok(true) => println!("granted"),
            Ok(false) => {
                eprintln!("refused");
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => {
                let e = ContractError::from(e);
                eprintln!("{}: {e}", e.kind());
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
