//! Collapses `(rename <original> <alias>)` forms to their alias atom so
//! downstream passes see one unambiguous name per net.

use crate::sexpr::{Expr, ExprKind};

/// Rewrite the document, replacing every leaf-only `rename` form by its
/// alias. The root itself is never collapsed; it has no parent to
/// substitute into.
pub fn resolve_renames(doc: Expr) -> Expr {
    match doc.kind {
        ExprKind::List(children) => Expr {
            kind: ExprKind::List(children.into_iter().map(resolve).collect()),
            pos: doc.pos,
        },
        _ => doc,
    }
}

fn resolve(e: Expr) -> Expr {
    let (children, pos) = match e.kind {
        ExprKind::List(children) => (children, e.pos),
        _ => return e,
    };

    // children first: a nested rename may collapse to an atom, making the
    // enclosing form leaf-only and eligible itself
    let mut children: Vec<Expr> = children.into_iter().map(resolve).collect();

    if is_rename_form(&children) {
        return children.swap_remove(2);
    }

    Expr {
        kind: ExprKind::List(children),
        pos,
    }
}

// (rename <original> <alias>) with no nested forms. Truncated rename
// forms are left alone rather than rejected.
fn is_rename_form(children: &[Expr]) -> bool {
    if children.len() < 3 {
        return false;
    }
    if children.iter().any(|c| c.list().is_some()) {
        return false;
    }
    match &children[0].kind {
        ExprKind::Symbol(s) => *s == atom!("rename"),
        _ => false,
    }
}
