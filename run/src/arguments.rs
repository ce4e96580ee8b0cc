use anyhow::Context;
use clap::{App, Arg, ArgMatches};
use log::warn;
use serde::{Deserialize, Serialize};

const VERSION_NUMBER: &str = "V1.0";

fn build_app() -> App<'static, 'static> {
    App::new("Coordinated Daily Activity Pattern Simulation")
        .version("1.0")
        .author("Sam Ralph <sr1474@york.ac.uk")
        .about("Chooses the joint daily activity pattern of every household in a synthetic population")
        .usage("run <mode> --directory=<data_directory>
            \n    The directory containing households.csv and persons.csv should be specified (directory)\
            \n    There are two modes available to choose from:\
            \n        simulate                  ->      Chooses a pattern for every household\
            \n        resume                    ->      Restores the households in cdap_checkpoint.csv, and simulates the rest")
        .arg(
            Arg::with_name("mode")
                .help("Specifies the mode of the simulator")
                .takes_value(true)
                .required(true))
        .arg(
            Arg::with_name("data_directory")
                .short("d")
                .long("directory")
                .help("The directory that the population files are located")
                .require_equals(true)
                .takes_value(true))
        .arg(
            Arg::with_name("output_directory")
                .long("output_name")
                .help("Specifies the name of the output directory to store results")
                .takes_value(true)
                .require_equals(true))
        .arg(
            Arg::with_name("config")
                .long("config")
                .help("The JSON model configuration, defaults to cdap_config.json in the data directory")
                .takes_value(true)
                .require_equals(true))
        .arg(Arg::with_name("number-of-threads")
            .require_equals(true)
            .long("number-of-threads")
            .takes_value(true)
            .help("Specifies the number of separate threads to use for processing"))
        .arg(Arg::with_name("base-seed")
            .require_equals(true)
            .long("base-seed")
            .takes_value(true)
            .help("Overrides the base seed of the household random streams"))
}

#[derive(Debug)]
pub struct Arguments {
    pub mode: SimMode,
    pub data_directory: String,
    pub output_directory: String,
    pub config_file: Option<String>,
    pub number_of_threads: Option<usize>,
    pub base_seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimMode {
    Simulate,
    Resume,
}

impl Arguments {
    pub fn load_from_arguments() -> anyhow::Result<Arguments> {
        Arguments::from_matches(&build_app().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> anyhow::Result<Arguments> {
        let mut arguments = Arguments::default();
        let mode = matches.value_of("mode").context("Mode for the simulator must be provided!")?;
        arguments.mode = serde_plain::from_str(mode)
            .context(format!("Unknown mode '{}' received! Use --help for a list of valid modes", mode))?;

        if let Some(directory) = matches.value_of("data_directory") {
            arguments.data_directory = directory.to_string();
        }
        if let Some(directory) = matches.value_of("output_directory") {
            arguments.output_directory = directory.to_string();
        }
        if let Some(config_file) = matches.value_of("config") {
            arguments.config_file = Some(config_file.to_string());
        }

        if let Some(number_of_threads) = matches.value_of("number-of-threads") {
            match number_of_threads.parse::<usize>() {
                Ok(number_of_threads) => arguments.number_of_threads = Some(number_of_threads),
                Err(e) => {
                    warn!("Failed to parse number of threads with value: '{}' and error {}. Using default value.", number_of_threads, e)
                }
            }
        }
        if let Some(base_seed) = matches.value_of("base-seed") {
            arguments.base_seed = Some(
                base_seed
                    .parse::<u64>()
                    .context(format!("Base seed '{}' is not a positive integer", base_seed))?,
            );
        }
        Ok(arguments)
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Arguments {
            mode: SimMode::Simulate,
            data_directory: "data/".to_string(),
            output_directory: "cdap_output/".to_string() + VERSION_NUMBER,
            config_file: None,
            number_of_threads: None,
            base_seed: None,
        }
    }
}
