// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: configuration file path
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH")
        .help("Configuration file path")
}

fn build_cli() -> Command {
    Command::new("hashsweep")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Hashsweep Contributors")
        .about("Convert captured wireless handshakes into crackable hashcat input")
        .subcommand_required(false)
        .arg(config_arg())
        .subcommand(
            Command::new("sweep")
                .about("Sweep the handshake directory, converting anything new")
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(clap::ArgAction::SetTrue)
                        .help("Sweep even if the configured interval has not elapsed"),
                )
                .arg(
                    Arg::new("handshake_dir")
                        .long("handshake-dir")
                        .value_name("DIR")
                        .help("Handshake directory to sweep (overrides config)"),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Run the conversion gate on a single capture file")
                .arg(Arg::new("capture").required(true).help("Capture file path")),
        )
        .subcommand(
            Command::new("daemon")
                .about("Run the periodic sweep loop in the foreground"),
        )
        .subcommand(
            Command::new("status")
                .about("Show sweep staleness and registry summary"),
        )
        .subcommand(
            Command::new("locations")
                .about("List incomplete captures with resolved coordinates"),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(Arg::new("shell").required(true).help("Target shell")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("hashsweep.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
        return;
    }

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
