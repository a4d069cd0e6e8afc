//! This module contains the main entrypoint to the stockcast cli.

use clap::Clap;
use colored::Colorize;
use std::path::PathBuf;
use stockcast_common::Direction;
use stockcast_deps::{env_logger, tokio, url::Url};
use stockcast_util::{
	err,
	error::Result,
	serve::{serve, serve_dir},
};

mod publish;
mod show;

const DEFAULT_LOG_FILTER: &str = "stockcast_cli=info,stockcast_common=info,stockcast_util=info";

#[derive(Clap)]
#[clap(
	about = "Publish and display the daily market prediction.",
	setting = clap::AppSettings::DisableHelpSubcommand,
)]
enum Options {
	#[clap(name = "publish")]
	Publish(PublishOptions),
	#[clap(name = "show")]
	Show(ShowOptions),
	#[clap(name = "serve")]
	Serve(ServeOptions),
}

#[derive(Clap, Debug)]
#[clap(about = "write a prediction record")]
#[clap(long_about = "write the prediction record the page renders")]
struct PublishOptions {
	#[clap(short, long, about = "the predicted direction, up or down")]
	direction: Direction,
	#[clap(long, about = "the date the prediction is for, defaults to today in utc")]
	date: Option<String>,
	#[clap(
		short,
		long,
		about = "the path to write the record to",
		default_value = "docs/prediction.json"
	)]
	output: PathBuf,
}

#[derive(Clap, Debug)]
#[clap(about = "render a prediction record")]
#[clap(long_about = "render a prediction record the way the page does and print it")]
struct ShowOptions {
	#[clap(short, long, about = "the path to the record", conflicts_with = "url")]
	file: Option<PathBuf>,
	#[clap(short, long, about = "the url of the record")]
	url: Option<Url>,
	#[clap(long, about = "label overrides, in the format of the page's data-labels attribute")]
	labels: Option<String>,
}

#[derive(Clap, Debug)]
#[clap(about = "serve the prediction page")]
#[clap(long_about = "serve the prediction page, its client and the prediction record from a directory")]
struct ServeOptions {
	#[clap(long, env = "HOST", default_value = "0.0.0.0")]
	host: std::net::IpAddr,
	#[clap(long, env = "PORT", default_value = "8080")]
	port: u16,
	#[clap(long, about = "the directory to serve", default_value = "docs")]
	dir: PathBuf,
}

fn main() {
	let env = env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER);
	env_logger::Builder::from_env(env)
		.format_level(false)
		.format_module_path(false)
		.format_timestamp(None)
		.init();
	let options = Options::parse();
	let result = match options {
		Options::Publish(options) => cli_publish(options),
		Options::Show(options) => cli_show(options),
		Options::Serve(options) => cli_serve(options),
	};
	if let Err(error) = result {
		eprintln!("{}: {}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_publish(options: PublishOptions) -> Result<()> {
	let record = publish::publish(options.direction, options.date, &options.output)?;
	eprintln!(
		"Prediction for {} was written to {}.",
		record.date_text(),
		options.output.display()
	);
	Ok(())
}

fn cli_show(options: ShowOptions) -> Result<()> {
	let source = match (options.url, options.file) {
		(Some(url), _) => show::Source::Url(url),
		(None, Some(path)) => show::Source::File(path),
		(None, None) => show::Source::File(PathBuf::from(show::DEFAULT_PREDICTION_FILE)),
	};
	let rendered = show::show(source, options.labels.as_deref())?;
	if rendered.is_none() {
		return Err(err!("the prediction could not be loaded"));
	}
	Ok(())
}

fn cli_serve(options: ServeOptions) -> Result<()> {
	if !options.dir.is_dir() {
		return Err(err!("{} is not a directory", options.dir.display()));
	}
	let mut runtime = tokio::runtime::Runtime::new()?;
	runtime.block_on(serve(options.host, options.port, options.dir, serve_dir))?;
	Ok(())
}
