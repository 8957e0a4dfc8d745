//! Harvests `(Net ...)` / `(PortRef ...)` / `(InstanceRef ...)` triples
//! into a flat per-net pin list.
//!
//! The scan visits every leaf atom in document order and keys purely on
//! lexical order, not on which form a keyword sits in. That matches the
//! EDIF netlists this tool is fed, where the `contents` section lists
//! nets with their port/instance references in sequence; keywords found
//! outside a net context attach to the most recently opened net.

use crate::atom::Atom;
use crate::sexpr::{Expr, ExprKind};

/// One pin attachment within a net.
#[derive(Debug, Clone, PartialEq)]
pub struct PinRef {
    pub pin: Atom,
    /// Missing when a `PortRef` was never followed by an `InstanceRef`.
    pub instance: Option<Atom>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetPins {
    pub name: Atom,
    pub pins: Vec<PinRef>,
}

/// Which keyword is waiting for its argument. Arming is one-shot: the
/// next leaf atom answers it and the scan returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    AwaitingNetName,
    AwaitingPinName,
    AwaitingInstanceName,
}

struct Extractor {
    nets: Vec<NetPins>,
    state: State,
}

impl Extractor {
    fn new() -> Self {
        Extractor {
            nets: Vec::new(),
            state: State::Idle,
        }
    }

    fn visit(&mut self, e: &Expr) {
        match &e.kind {
            ExprKind::List(children) => {
                for c in children {
                    self.visit(c);
                }
            }
            _ => self.step(e),
        }
    }

    fn step(&mut self, leaf: &Expr) {
        let text = match leaf.text() {
            Some(t) => t,
            // opaque byte blobs neither arm nor answer
            None => return,
        };

        match self.state {
            State::Idle => {
                let sym = Atom::from(&*text);
                self.state = if sym == atom!("Net") || sym == atom!("rename") {
                    // residual rename forms double as a net-name source
                    State::AwaitingNetName
                } else if sym == atom!("PortRef") {
                    State::AwaitingPinName
                } else if sym == atom!("InstanceRef") {
                    State::AwaitingInstanceName
                } else {
                    State::Idle
                };
            }
            State::AwaitingNetName => {
                self.nets.push(NetPins {
                    name: Atom::from(&*text),
                    pins: Vec::new(),
                });
                self.state = State::Idle;
            }
            State::AwaitingPinName => {
                // `&` marks a positional/unnamed reference
                let pin = Atom::from(text.trim_start_matches('&'));
                if let Some(net) = self.nets.last_mut() {
                    net.pins.push(PinRef {
                        pin,
                        instance: None,
                    });
                }
                self.state = State::Idle;
            }
            State::AwaitingInstanceName => {
                if let Some(pin) = self.nets.last_mut().and_then(|n| n.pins.last_mut()) {
                    if pin.instance.is_none() {
                        pin.instance = Some(Atom::from(&*text));
                    }
                }
                self.state = State::Idle;
            }
        }
    }
}

/// Scan the renamed tree into a per-net pin list, in first-seen order.
///
/// A `PortRef` seen before any net is dropped; an `InstanceRef` with no
/// pending pin is dropped. Neither aborts the scan.
pub fn extract_nets(tree: &Expr) -> Vec<NetPins> {
    let mut ex = Extractor::new();
    ex.visit(tree);
    ex.nets
}

/// Pins that were never paired with an instance. These are reported and
/// carried through; the emitter can never match them to a designator.
pub fn incomplete_pins<'a>(nets: &'a [NetPins]) -> impl Iterator<Item = (&'a Atom, &'a Atom)> {
    nets.iter().flat_map(|n| {
        n.pins
            .iter()
            .filter(|p| p.instance.is_none())
            .map(move |p| (&n.name, &p.pin))
    })
}
