use anyhow::{Context, Result};
use std::env;
use std::io;

use edif2ucf::{extract, rename, sexpr, ucf};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        // usage has never been an error for this tool
        println!(
            "Usage: {} <edif_filename> <fpga_designator>; output to stdout",
            args[0]
        );
        return Ok(());
    }
    let filename = &args[1];
    let designator = &args[2];

    let text =
        std::fs::read_to_string(filename).with_context(|| format!("reading `{}`", filename))?;

    eprintln!("parsing {}...", filename);
    let doc = sexpr::parse_document(&text)?;

    eprintln!("processing rename elements...");
    let doc = rename::resolve_renames(doc);

    eprintln!("extracting net names...");
    let mut nets = extract::extract_nets(&doc);
    for (net, pin) in extract::incomplete_pins(&nets) {
        eprintln!(
            "warning: pin {} on net {} has no instance reference",
            pin, net
        );
    }

    nets.sort_by(|a, b| a.name.cmp(&b.name));

    let table = ucf::IoStandardTable::default_map();
    let stdout = io::stdout();
    ucf::write_ucf(&mut stdout.lock(), &nets, designator, &table)?;

    Ok(())
}
