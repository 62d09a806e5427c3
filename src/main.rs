use anyhow::Result;
use is_terminal::IsTerminal;
use relzet::calculate::calculate;
use std::io;

fn main() -> Result<()> {
    let args = relzet::args::parsed();

    let stdout = io::stdout();
    if stdout.is_terminal() {
        calculate(args.op, &args.files, &args.keys, args.format, stdout.lock())?;
    } else {
        calculate(args.op, &args.files, &args.keys, args.format, io::BufWriter::new(stdout.lock()))?;
    };
    Ok(())
}
