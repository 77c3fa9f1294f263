//! Simple command that prints one or '-n count' locality UUID strings, or describes the UUID given
//! with '-i uuid'

use std::{env, io, io::Write, process::ExitCode};

use locality_uuid::Uuid;

#[derive(Debug, Default)]
struct Options {
    count: Option<usize>,
    sequential: bool,
    inspect: Option<Uuid>,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-s] [-n count] | -i uuid",
                    program.as_deref().unwrap_or("locality-uuid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    if let Some(uuid) = opts.inspect {
        describe(&mut buf, &uuid)?;
        return Ok(ExitCode::SUCCESS);
    }

    if opts.sequential {
        locality_uuid::use_sequential_ids();
    }
    for _ in 0..opts.count.unwrap_or(1) {
        writeln!(buf, "{}", locality_uuid::generate())?;
    }

    Ok(ExitCode::SUCCESS)
}

fn describe(w: &mut impl Write, uuid: &Uuid) -> io::Result<()> {
    writeln!(w, "uuid:      {}", uuid)?;
    writeln!(w, "version:   {}", uuid.version())?;
    writeln!(w, "pid:       {}", uuid.process_id())?;
    match uuid.timestamp() {
        Some(ts) => writeln!(w, "ticks:     {}", ts.ticks())?,
        None => writeln!(w, "ticks:     unknown")?,
    }
    match uuid.mac_fragment() {
        Some(mac) => {
            let hex: Vec<_> = mac.iter().map(|b| format!("{:02x}", b)).collect();
            writeln!(w, "mac:       {}", hex.join(":"))
        }
        None => writeln!(w, "mac:       unknown"),
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" => opts.sequential = true,
            "-n" => {
                if opts.count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                opts.count.replace(c);
            }
            "-i" => {
                let Some(i_arg) = args.next() else {
                    return Err("argument to option 'i' missing".to_owned());
                };
                let uuid = i_arg.parse().map_err(|err| format!("{}", err))?;
                opts.inspect.replace(uuid);
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    if opts.inspect.is_some() && (opts.sequential || opts.count.is_some()) {
        return Err("option 'i' cannot be combined with 's' or 'n'".to_owned());
    }
    Ok(opts)
}
