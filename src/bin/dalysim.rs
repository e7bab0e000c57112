//! dalysim command-line front end.
//!
//! Loads the calibration once, builds a selection from flags or a JSON request
//! body, runs the engine, and prints the result as JSON on stdout. Logs go to
//! stderr.
//!
//! ## Quick start
//!
//! ```bash
//! # Status quo against the default calibration path
//! dalysim
//!
//! # Clean air plus acute treatment, pretty-printed
//! dalysim --clean-air --acute-treatment --pretty
//!
//! # Request body on stdin, as a transport layer would forward it
//! echo '{"diagnostics": true, "charts": {}}' | dalysim --request -
//!
//! # All 32 scenarios against a custom calibration
//! DALYSIM_CALIBRATION_PATH=/mnt/constants.json dalysim --sweep
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use dalysim::{Config, Intervention, InterventionSelection, SimulationEngine, SimulationRequest};

/// Estimate DALYs averted by combining health interventions.
#[derive(Debug, Parser)]
#[command(name = "dalysim", version, about)]
struct Cli {
    /// Calibration document [env: DALYSIM_CALIBRATION_PATH]
    #[arg(long, value_name = "PATH")]
    calibration: Option<PathBuf>,

    /// Log filter directive [env: DALYSIM_LOG_LEVEL]
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Enable clean air.
    #[arg(long)]
    clean_air: bool,

    /// Enable diagnostics.
    #[arg(long)]
    diagnostics: bool,

    /// Enable nose sprays.
    #[arg(long)]
    nose_sprays: bool,

    /// Enable acute treatment.
    #[arg(long)]
    acute_treatment: bool,

    /// Enable long COVID treatment.
    #[arg(long)]
    lc_treatment: bool,

    /// Enable every intervention.
    #[arg(long)]
    all: bool,

    /// Read a JSON request body from FILE, or stdin for `-`.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["all", "sweep"])]
    request: Option<PathBuf>,

    /// Simulate all 32 intervention combinations.
    #[arg(long, conflicts_with = "all")]
    sweep: bool,

    /// Refuse to run on an unavailable or out-of-range calibration.
    #[arg(long)]
    strict: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn flag_selection(&self) -> InterventionSelection {
        if self.all {
            return InterventionSelection::all();
        }
        let flags = [
            (Intervention::CleanAir, self.clean_air),
            (Intervention::Diagnostics, self.diagnostics),
            (Intervention::NoseSprays, self.nose_sprays),
            (Intervention::AcuteTreatment, self.acute_treatment),
            (Intervention::LcTreatment, self.lc_treatment),
        ];
        flags
            .into_iter()
            .filter_map(|(lever, on)| on.then_some(lever))
            .collect()
    }

    fn has_lever_flags(&self) -> bool {
        self.all || !self.flag_selection().is_empty()
    }
}

fn read_request(path: &Path) -> anyhow::Result<SimulationRequest> {
    let body = if path.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("failed to read request body from stdin")?;
        body
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request body from {}", path.display()))?
    };
    SimulationRequest::from_json(&body).context("malformed simulation request")
}

fn print_json(value: &impl serde::Serialize, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(path) = &cli.calibration {
        config.calibration_path.clone_from(path);
    }
    if let Some(level) = &cli.log_level {
        config.log_level.clone_from(level);
    }

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();

    let store = config.calibration_store();
    let calibration = if cli.strict {
        store
            .load_validated()
            .context("calibration rejected in strict mode")?
    } else {
        let calibration = store.load();
        if let Err(e) = calibration.validate() {
            warn!(error = %e, "continuing with out-of-range calibration");
        }
        calibration
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        source = %calibration.source,
        baseline_dalys = calibration.baseline_dalys,
        "calibration ready"
    );

    let engine = SimulationEngine::new(calibration);

    if cli.sweep {
        return print_json(&engine.sweep(), cli.pretty);
    }

    let selection = match &cli.request {
        Some(path) => {
            if cli.has_lever_flags() {
                warn!("intervention flags are ignored when --request is given");
            }
            let request = read_request(path)?;
            if request.charts.is_some() {
                info!("chart payload stripped from request");
            }
            request.into_selection()
        }
        None => cli.flag_selection(),
    };

    let result = engine.simulate(&selection);
    info!(
        selection = %selection,
        interventions = ?selection.labels(),
        simulated_dalys = result.simulated_dalys,
        dalys_averted = result.dalys_averted,
        reduction_percentage = result.reduction_percentage,
        "simulation finished"
    );

    print_json(&result.to_json(), cli.pretty)
}
