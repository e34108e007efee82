use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use eyre::Result;
use fuel_estimator::{estimate, Config, VehicleRecord};

#[derive(Parser, Debug)]
#[clap(name = "fuel-estimator", about, version)]
struct Args {
    /// Increase output logging verbosity.
    #[clap(short, long)]
    verbose: bool,

    /// Configuration file (JSON or YAML). Ignored if it does not exist.
    #[clap(short, long, default_value = "fuel-estimator.yml")]
    config: PathBuf,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the estimator form over HTTP.
    Serve {
        /// Model artifact to load.
        #[clap(long)]
        model: Option<PathBuf>,

        /// Address to listen on.
        #[clap(long)]
        bind: Option<String>,
    },
    /// Estimate the fuel efficiency of a single vehicle.
    Predict {
        /// Model artifact to load.
        #[clap(long)]
        model: Option<PathBuf>,

        #[clap(flatten)]
        vehicle: VehicleArgs,
    },
}

#[derive(clap::Args, Debug)]
struct VehicleArgs {
    #[clap(long, default_value_t = 4)]
    cylinders: i64,

    /// Engine displacement, in liters.
    #[clap(long, default_value_t = 2.0)]
    displacement: f64,

    /// Annual fuel cost, in USD.
    #[clap(long, default_value_t = 2000)]
    fuel_cost: i64,

    #[clap(long, default_value_t = 2020)]
    model_year: i64,

    #[clap(long, default_value = "Regular Gasoline")]
    fuel_type: String,

    #[clap(long, default_value = "Automatic")]
    transmission: String,

    #[clap(long, default_value = "Compact Cars")]
    vehicle_class: String,

    #[clap(long, default_value = "FWD")]
    drive: String,
}

impl From<VehicleArgs> for VehicleRecord {
    fn from(args: VehicleArgs) -> Self {
        VehicleRecord {
            cylinders: args.cylinders,
            displacement: args.displacement,
            fuel_type: args.fuel_type,
            transmission: args.transmission,
            vehicle_class: args.vehicle_class,
            drive: args.drive,
            fuel_cost: args.fuel_cost,
            model_year: args.model_year,
        }
    }
}

fn main() {
    let args = Args::parse();
    simple_logger::init_with_level(if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    })
    .unwrap();

    let code = match execute(args) {
        Ok(code) => code,
        Err(e) => {
            log::error!("Failed: {:?}", e);
            1
        }
    };
    process::exit(code);
}

fn execute(args: Args) -> Result<i32> {
    let config = Config::load_or_default(&args.config)?;
    match args.command {
        Command::Serve { model, bind } => {
            let mut config = config;
            if let Some(model) = model {
                config = config.with_model_path(model);
            }
            if let Some(bind) = bind {
                config = config.with_bind(bind);
            }
            fuel_estimator::run(config)?;
            Ok(0)
        }
        Command::Predict { model, vehicle } => {
            let model_path = model.unwrap_or(config.model_path);
            let result = estimate(&model_path, vehicle.into());
            if result.is_success() {
                println!("{}", result);
            } else {
                eprintln!("{}", result);
            }
            Ok(result.exit_code())
        }
    }
}
