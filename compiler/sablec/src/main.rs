//! Entry point for the `sable` binary.

use sablec::cli;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    sablec::init_tracing();

    if args.len() < 2 {
        cli::print_usage();
        std::process::exit(1);
    }

    let code = match args[1].as_str() {
        "run" => {
            let mut trace = false;
            let mut file = None;
            for arg in args.iter().skip(2) {
                if arg == "--trace" {
                    trace = true;
                } else if !arg.starts_with('-') && file.is_none() {
                    file = Some(arg.as_str());
                }
            }
            let Some(path) = file else {
                eprintln!("Usage: sable run <file.sb> [--trace]");
                std::process::exit(1);
            };
            cli::run_file(path, trace)
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: sable check <file.sb>");
                std::process::exit(1);
            }
            cli::check_file(&args[2])
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: sable parse <file.sb>");
                std::process::exit(1);
            }
            cli::parse_file(&args[2])
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: sable lex <file.sb>");
                std::process::exit(1);
            }
            cli::lex_file(&args[2])
        }
        "version" => {
            println!("sable {}", env!("CARGO_PKG_VERSION"));
            0
        }
        "help" | "-h" | "--help" => {
            cli::print_usage();
            0
        }
        path if path.ends_with(".sb") => cli::run_file(path, false),
        unknown => {
            eprintln!("Unknown command: {unknown}");
            eprintln!();
            cli::print_usage();
            1
        }
    };

    std::process::exit(code);
}
