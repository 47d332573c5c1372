//! Interactive custom-command session example
//!
//! Reads command lines from stdin and runs them against one device.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example session -- --host 192.168.1.1 --user admin --password secret \
//!     --device-type cisco_ios --catalog netcli/examples/commands.json
//! ```
//!
//! Then type custom commands such as `show-int[port:Gi0/1] | up`, raw
//! commands such as `r- show clock`, or `exit` to quit.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use netcli::{CommandCatalog, SessionBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let catalog = CommandCatalog::from_json_file(&args.catalog)?;
    catalog.validate()?;
    let catalog = Arc::new(catalog);

    let mut builder = SessionBuilder::new(&args.host)
        .port(args.port)
        .username(&args.user)
        .device_type(&args.device_type)
        .timeout(Duration::from_secs(args.timeout));

    if let Some(password) = &args.password {
        builder = builder.password(password);
    } else if let Some(key_path) = &args.key {
        builder = builder.private_key(key_path);
    }

    let mut session = builder.spawn(catalog.clone())?;

    println!("Connecting to {}:{}...", args.host, args.port);
    let connected = session.connected().await;
    if !connected.ok {
        eprintln!("{}", connected.payload);
        std::process::exit(1);
    }

    let available: Vec<_> = catalog.commands_for(&args.device_type).collect();
    println!("Connected! Custom commands: {}\n", available.join(", "));

    let stdin = io::stdin();
    loop {
        print!("{}> ", session.target());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }

        match session.request(line).await {
            Some(response) if response.ok => println!("{}", response),
            Some(response) => eprintln!("{}", response),
            None => return Ok(()),
        }
    }

    session.close().await?;
    Ok(())
}

/// Simple argument parsing.
struct Args {
    host: String,
    port: u16,
    user: String,
    password: Option<String>,
    key: Option<PathBuf>,
    device_type: String,
    catalog: PathBuf,
    timeout: u64,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();

        let mut parsed = Self {
            host: "localhost".to_string(),
            port: 22,
            user: env::var("USER").unwrap_or_else(|_| "admin".to_string()),
            password: None,
            key: None,
            device_type: "cisco_ios".to_string(),
            catalog: PathBuf::from("commands.json"),
            timeout: 30,
        };

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--host" | "-h" => parsed.host = value.unwrap_or(parsed.host),
                "--port" | "-p" => {
                    parsed.port = value.and_then(|v| v.parse().ok()).unwrap_or(22)
                }
                "--user" | "-u" => parsed.user = value.unwrap_or(parsed.user),
                "--password" | "-P" => parsed.password = value,
                "--key" | "-k" => parsed.key = value.map(PathBuf::from),
                "--device-type" | "-d" => parsed.device_type = value.unwrap_or(parsed.device_type),
                "--catalog" | "-c" => {
                    parsed.catalog = value.map(PathBuf::from).unwrap_or(parsed.catalog)
                }
                "--timeout" | "-t" => {
                    parsed.timeout = value.and_then(|v| v.parse().ok()).unwrap_or(30)
                }
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        parsed
    }

    fn print_help() {
        println!(
            r#"netcli session example

Runs custom commands from a catalog against one device.

USAGE:
    cargo run --example session -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>          Target host [default: localhost]
    -p, --port <PORT>          SSH port [default: 22]
    -u, --user <USER>          Username [default: $USER]
    -P, --password <PASS>      Password (key authentication when omitted)
    -k, --key <PATH>           Path to SSH private key
    -d, --device-type <TYPE>   Device type [default: cisco_ios]
    -c, --catalog <PATH>       Custom command catalog [default: commands.json]
    -t, --timeout <SECS>       Connection and command timeout [default: 30]
    --help                     Print this help message
"#
        );
    }
}
