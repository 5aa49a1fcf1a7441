//! 名字表：库所、迁移的序号与名字对照。LSN 与独立的 `.nmp`/`.nmt` 文件从 1 编号，矩阵格式从 0 编号。
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, TranslateError};
use crate::net::core::NetModel;

/// Line layout of a name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// `; <ordinal> <name>`
    Lsn,
    /// `// <index>\t<name>`
    Matrix,
}

impl TableStyle {
    /// Names are copied byte for byte.
    fn write_entry<W: Write>(self, out: &mut W, ordinal: i64, name: &[u8]) -> io::Result<()> {
        match self {
            TableStyle::Lsn => write!(out, "; {} ", ordinal)?,
            TableStyle::Matrix => write!(out, "// {}\t", ordinal - 1)?,
        }
        out.write_all(name)?;
        writeln!(out)
    }
}

pub fn write_place_table<W: Write>(out: &mut W, net: &NetModel, style: TableStyle) -> io::Result<()> {
    for place in net.places.indices() {
        style.write_entry(out, place.ordinal(), net.place_name(place))?;
    }
    Ok(())
}

pub fn write_transition_table<W: Write>(
    out: &mut W,
    net: &NetModel,
    style: TableStyle,
) -> io::Result<()> {
    for transition in net.transitions.indices() {
        style.write_entry(out, transition.ordinal(), net.transition_name(transition))?;
    }
    Ok(())
}

/// Writes `<base>.nmp` and `<base>.nmt` next to the main output file.
pub fn write_side_tables(net: &NetModel, base: &Path) -> Result<()> {
    let places = side_path(base, "nmp");
    let mut out = create(&places)?;
    write_place_table(&mut out, net, TableStyle::Lsn)?;
    out.flush()?;

    let transitions = side_path(base, "nmt");
    let mut out = create(&transitions)?;
    write_transition_table(&mut out, net, TableStyle::Lsn)?;
    out.flush()?;

    debug!("name tables written to {:?} and {:?}", places, transitions);
    Ok(())
}

/// `net.lsn` becomes `net.lsn.nmp`: the suffix is appended, not substituted.
fn side_path(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| TranslateError::Open {
            path: path.display().to_string(),
            source,
        })
}
