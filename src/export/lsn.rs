//! LSN/HSN 线性弧表输出。
use std::io::{self, Write};

use crate::export::name_table::{TableStyle, write_place_table, write_transition_table};
use crate::net::core::NetModel;
use crate::translate::label::DecodedLabel;

/// Writes `net` in LSN form. `labels` turn the output into HSN when non-empty.
pub fn write_lsn<W: Write>(out: &mut W, net: &NetModel, labels: &[DecodedLabel]) -> io::Result<()> {
    let marking = net.initial_marking();

    writeln!(out, "; LSN obtained from NDR")?;
    writeln!(out, "; m n narcs nnmu, nst")?;
    writeln!(
        out,
        "{} {} {} {} {}",
        net.places_len(),
        net.transitions_len(),
        net.arcs_len(),
        marking.marked().count(),
        labels.len()
    )?;

    writeln!(out, "; p->t: p t w")?;
    for arc in &net.input_arcs {
        writeln!(out, "{} {} {}", arc.place, arc.transition, arc.weight)?;
    }

    writeln!(out, "; t->p: -p t w")?;
    for arc in &net.output_arcs {
        writeln!(out, "{} {} {}", -arc.place.ordinal(), arc.transition, arc.weight)?;
    }

    writeln!(out, "; t->t: -t1 -t2 0")?;
    for arc in &net.priority_arcs {
        writeln!(
            out,
            "{} {} 0",
            -arc.dominant.ordinal(),
            -arc.dominated.ordinal()
        )?;
    }

    writeln!(out, "; mu(p):")?;
    for (place, tokens) in marking.marked() {
        writeln!(out, "{} {}", place, tokens)?;
    }

    for label in labels {
        write_substitution(out, label)?;
    }

    writeln!(out, "; Table of places\n; no name")?;
    write_place_table(out, net, TableStyle::Lsn)?;
    writeln!(out, "; Table of transitions\n; no name")?;
    write_transition_table(out, net, TableStyle::Lsn)?;
    writeln!(out, "; end of LSN")
}

fn write_substitution<W: Write>(out: &mut W, label: &DecodedLabel) -> io::Result<()> {
    writeln!(out, "; HSN substitution transition: t nmp subnet")?;
    write!(out, "{} {} ", label.transition, label.mappings.len())?;
    out.write_all(&label.subnet)?;
    writeln!(out)?;
    writeln!(out, "; HSN place mapping: hp lp")?;
    for mapping in &label.mappings {
        let (hp, lp) = mapping.encode();
        writeln!(out, "{} {}", hp, lp)?;
    }
    Ok(())
}
