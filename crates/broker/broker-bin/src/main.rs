//! Input-method broker replay binary.
//!
//! Reads connection-tagged calls as JSON lines and feeds them through a
//! [`ConnectionBroker`], logging every notification the broker emits.

mod observer;
mod replay;

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use imbroker::{BrokerConfig, ConnectionBroker, InMemoryExtensionManager};
use tracing::info;

use crate::observer::{TracingListener, TracingTarget};
use crate::replay::ReplayError;

/// Broker command line arguments.
#[derive(Parser, Debug)]
#[command(name = "imbroker")]
#[command(about = "Input-method connection broker replay tool")]
struct Args {
	/// Broker configuration file (TOML)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Script of JSON-lines requests; stdin if omitted
	#[arg(short, long, value_name = "PATH")]
	script: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::TRACE
		} else {
			tracing::Level::INFO
		})
		.with_writer(io::stderr)
		.finish();

	tracing::subscriber::set_global_default(subscriber)?;

	let config = match &args.config {
		Some(path) => BrokerConfig::load(path).map_err(ReplayError::from)?,
		None => BrokerConfig::default(),
	};
	info!(?config, "starting imbroker");

	let manager = Rc::new(InMemoryExtensionManager::new());
	let mut broker = ConnectionBroker::new_with_config(manager.clone(), &config);
	broker.add_listener(Rc::new(TracingListener));
	let target = Rc::new(RefCell::new(TracingTarget::default()));
	broker.add_target(&target);

	let dispatched = match &args.script {
		Some(path) => {
			let file = File::open(path).map_err(|source| ReplayError::Open {
				path: path.clone(),
				source,
			})?;
			replay::replay(&mut broker, BufReader::new(file))?
		}
		None => replay::replay(&mut broker, io::stdin().lock())?,
	};

	info!(
		dispatched,
		active = %broker.active_connection(),
		extensions = manager.ids().len(),
		notifications = target.borrow().notifications(),
		"replay finished"
	);

	Ok(())
}
