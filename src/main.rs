use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use snmpwire::{
    ber::Value,
    manager::Manager,
    snmp::pdu::VarBind,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Fetch a single OID from one or more agents
    Get {
        #[clap(short, long, required = true)]
        community: String,
        #[clap(short, long, required = true)]
        oid: String,
        #[clap(required = true, num_args = 1..)]
        targets: Vec<String>,
    },
    /// Walk a subtree on one or more agents
    Walk {
        #[clap(short, long, required = true)]
        community: String,
        #[clap(short, long, required = true)]
        oid: String,
        #[clap(required = true, num_args = 1..)]
        targets: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let manager = Manager::new();

    match cli.command {
        Command::Get {
            targets,
            community,
            oid,
        } => {
            let spinner = in_flight_spinner(format!("querying {} target(s)", targets.len()))?;

            let futures = targets.iter().map(|target| manager.get(target, &community, &oid));
            let results = join_all(futures).await;

            spinner.finish_and_clear();

            for (target, result) in targets.iter().zip(results) {
                println!("\n--- Result for {target} ---");
                match result {
                    Ok(varbind) => print_varbind(&varbind),
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
        Command::Walk {
            targets,
            community,
            oid,
        } => {
            let spinner = in_flight_spinner(format!("walking {} target(s)", targets.len()))?;

            let futures = targets.iter().map(|target| manager.walk(target, &community, &oid));
            let results = join_all(futures).await;

            spinner.finish_and_clear();

            for (target, result) in targets.iter().zip(results) {
                println!("\n--- Result for {target} ---");
                match result {
                    Ok(varbinds) => {
                        println!("Found {} results", varbinds.len());
                        for varbind in varbinds {
                            print_varbind(&varbind);
                        }
                    }
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
    }
    Ok(())
}

fn in_flight_spinner(message: String) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

fn print_varbind(varbind: &VarBind) {
    print!("OID: {} | Value: ", varbind.oid);

    match &varbind.value {
        Value::OctetString(val) => println!("{}", String::from_utf8_lossy(val)),
        Value::IA5String(text) => println!("{text}"),
        Value::Integer(val) => println!("{val}"),
        Value::Counter32(val) => println!("{val}"),
        Value::Gauge32(val) => println!("{val}"),
        Value::TimeTicks(val) => println!("{val}"),
        Value::Counter64(val) => println!("{val}"),
        Value::IpAddress(octets) => {
            println!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
        }
        Value::Oid(oid) => println!("{oid}"),
        other => println!("{other:?}"),
    }
}
