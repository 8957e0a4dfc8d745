//! UCF constraint output: filters the extracted net/pin list by a target
//! designator and assigns IO standards from an ordered pattern table.

use crate::atom::Atom;
use crate::extract::NetPins;
use fxhash::FxHashSet;
use regex::Regex;
use std::io::{self, Write};

/// Ordered (pattern, standard) pairs. Patterns are matched against net
/// names in order and the first hit wins, so the last entry should be a
/// catch-all like `.*` when a default standard is wanted.
pub struct IoStandardTable {
    entries: Vec<(Regex, String)>,
}

impl IoStandardTable {
    pub fn new(pairs: &[(&str, &str)]) -> Result<Self, regex::Error> {
        let entries = pairs
            .iter()
            .map(|&(pattern, std)| Ok((Regex::new(pattern)?, std.to_string())))
            .collect::<Result<_, regex::Error>>()?;
        Ok(IoStandardTable { entries })
    }

    /// The stock mapping: differential DDR strobes and clocks, the `F_`
    /// memory bank, TMDS pairs, and an LVCMOS33 catch-all.
    pub fn default_map() -> Self {
        IoStandardTable::new(&[
            ("^F_.*DQS_[NP]$", "DIFF_SSTL18_II"),
            ("F_.*CLK_[NP]$", "DIFF_SSTL18_II"),
            ("^F_", "SSTL18_II"),
            ("_[NP]$", "TMDS_33"),
            (".*", "LVCMOS33"),
        ])
        .expect("stock table patterns are valid")
    }

    pub fn lookup(&self, net: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(re, _)| re.is_match(net))
            .map(|(_, std)| std.as_str())
    }
}

/// Write `LOC` and `IOSTANDARD` lines for every net with a pin on the
/// given designator. The first matching pin of a net is the
/// authoritative location; further matches come out as comment lines so
/// double-connected nets are visible without producing conflicting
/// constraints.
pub fn write_ucf<W: Write>(
    out: &mut W,
    nets: &[NetPins],
    designator: &str,
    table: &IoStandardTable,
) -> io::Result<()> {
    let mut seen: FxHashSet<Atom> = FxHashSet::default();

    for net in nets {
        for pin in &net.pins {
            if pin.instance.as_ref().map(|i| i.as_ref()) != Some(designator) {
                continue;
            }
            if seen.insert(net.name.clone()) {
                writeln!(out, "NET \"{}\" LOC = {};", net.name, pin.pin)?;
                if let Some(std) = table.lookup(net.name.as_ref()) {
                    writeln!(out, "NET \"{}\" IOSTANDARD = {};", net.name, std)?;
                }
            } else {
                writeln!(out, "# NET \"{}\" LOC = {}; (extra match)", net.name, pin.pin)?;
            }
        }
    }

    Ok(())
}
