//! # 翻译流水线
//!
//! 读取 NDR → 解码替换标签 →（仅矩阵格式）优先关系闭包 → 写出。
//!
//! 所有可能失败的翻译步骤都在写出第一个字节之前完成，因此解析或解码失败时不会留下残缺输出；
//! 写出阶段只可能产生 I/O 错误。
//!
//! ```rust
//! use ndrtosn::translate::{OutputFormat, translate_str};
//!
//! let out = translate_str("p 0 0 p1 1 n\nt 0 0 t1 0 w n n\ne p1 t1 0 n\n", OutputFormat::Lsn).unwrap();
//! assert!(out.contains("; p->t: p t w\n1 1 -1\n"));
//! ```

pub mod label;
pub mod priority;

use std::fmt;
use std::io::Write;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::export::{write_lsn, write_matrix};
use crate::ndr::parse_ndr_str;
use crate::net::core::NetModel;
use self::label::{DecodedLabel, decode_labels};
use self::priority::PriorityMatrix;

/// Rendering selected with `-l` / `-c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Lsn,
    Matrix,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Lsn => write!(f, "lsn"),
            OutputFormat::Matrix => write!(f, "matrix"),
        }
    }
}

/// Writer-specific data computed ahead of output.
#[derive(Debug)]
pub enum Rendering {
    Lsn,
    /// Carries the closed priority relation.
    Matrix(PriorityMatrix),
}

impl Rendering {
    pub fn format(&self) -> OutputFormat {
        match self {
            Rendering::Lsn => OutputFormat::Lsn,
            Rendering::Matrix(_) => OutputFormat::Matrix,
        }
    }
}

/// A parsed net with everything the writers need already computed.
#[derive(Debug)]
pub struct Translation {
    pub net: NetModel,
    pub labels: Vec<DecodedLabel>,
    pub rendering: Rendering,
}

impl Translation {
    /// Runs the fallible passes over `net`.
    ///
    /// Labels are decoded for both formats so an invalid label fails before any output.
    pub fn new(net: NetModel, format: OutputFormat) -> Result<Self> {
        let labels = decode_labels(&net)?;
        debug!("decoded {} substitution labels", labels.len());

        let rendering = match format {
            OutputFormat::Lsn => Rendering::Lsn,
            OutputFormat::Matrix => {
                let mut matrix =
                    PriorityMatrix::from_arcs(net.transitions_len(), &net.priority_arcs);
                matrix.close();
                debug!("priority closure over {} transitions", matrix.size());
                Rendering::Matrix(matrix)
            }
        };

        Ok(Self {
            net,
            labels,
            rendering,
        })
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.rendering {
            Rendering::Lsn => write_lsn(out, &self.net, &self.labels)?,
            Rendering::Matrix(priority) => write_matrix(out, &self.net, priority)?,
        }
        out.flush()?;
        Ok(())
    }

    pub fn render_to_string(&self) -> Result<String> {
        let mut out = Vec::new();
        self.render(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Parses and renders an in-memory NDR document.
pub fn translate_str(text: &str, format: OutputFormat) -> Result<String> {
    Translation::new(parse_ndr_str(text)?, format)?.render_to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateError;
    use crate::ndr::parse_ndr;

    const TWO_PLACES: &str = "\
h demo
p 10 20 p1 3 n
p 30 20 p2 0 n
t 20 20 t1 c 0 w n n
e p1 t1 2 n
e t1 p2 1 n
";

    #[test]
    fn end_to_end_lsn() {
        let out = translate_str(TWO_PLACES, OutputFormat::Lsn).unwrap();
        assert_eq!(
            out,
            "; LSN obtained from NDR\n\
             ; m n narcs nnmu, nst\n\
             2 1 2 1 0\n\
             ; p->t: p t w\n\
             1 1 2\n\
             ; t->p: -p t w\n\
             -2 1 1\n\
             ; t->t: -t1 -t2 0\n\
             ; mu(p):\n\
             1 3\n\
             ; Table of places\n\
             ; no name\n\
             ; 1 p1\n\
             ; 2 p2\n\
             ; Table of transitions\n\
             ; no name\n\
             ; 1 t1\n\
             ; end of LSN\n"
        );
    }

    #[test]
    fn end_to_end_matrix() {
        let out = translate_str(TWO_PLACES, OutputFormat::Matrix).unwrap();
        assert!(out.starts_with("// SN obtained from NDR\n#define m 2\n#define n 1\n"));
        assert!(out.contains("static int b[2][1]=\n{\n{2},\n{0}\n};\n"));
        assert!(out.contains("static int d[2][1]=\n{\n{0},\n{1}\n};\n"));
        assert!(out.contains("static int r[1][1]=\n{\n{0}\n};\n"));
        assert!(out.contains("static int mu[2]={3,0};\n"));
        assert!(out.ends_with("// 0\tt1\n// end of SN\n"));
    }

    #[test]
    fn arc_weights_in_lsn() {
        let out = translate_str(
            "p 0 0 a 0 n\n\
             p 0 0 b 0 n\n\
             t 0 0 t 0 w n n\n\
             e a t 0 n\n\
             e b t 5 n\n\
             e t a 0 n\n",
            OutputFormat::Lsn,
        )
        .unwrap();
        assert!(out.contains("; p->t: p t w\n1 1 -1\n2 1 5\n; t->p: -p t w\n-1 1 0\n"));
    }

    #[test]
    fn quoted_names_survive() {
        let out = translate_str("p 0 0 {a\\}b} 1 n\n", OutputFormat::Lsn).unwrap();
        assert!(out.contains("; 1 {a\\}b}\n"));
    }

    #[test]
    fn substitution_block() {
        let out = translate_str(
            "p 0 0 P1 0 n\n\
             p 0 0 P2 0 n\n\
             t 0 0 t1 c 0 w n {*HSN(sub1 i P1 3 o P2 1)}\n",
            OutputFormat::Lsn,
        )
        .unwrap();
        assert!(out.contains("2 1 0 0 1\n"));
        assert!(out.contains(
            "; mu(p):\n\
             ; HSN substitution transition: t nmp subnet\n\
             1 2 sub1\n\
             ; HSN place mapping: hp lp\n\
             1 3\n\
             2 -1\n\
             ; Table of places\n"
        ));
    }

    #[test]
    fn matrix_ignores_substitutions_but_checks_them() {
        let ok = translate_str(
            "p 0 0 P1 0 n\nt 0 0 t1 c 0 w n {*HSN(sub i P1 1)}\n",
            OutputFormat::Matrix,
        )
        .unwrap();
        assert!(!ok.contains("HSN"));

        let err = translate_str(
            "p 0 0 P1 0 n\nt 0 0 t1 c 0 w n {*HSN(sub q P1 1)}\n",
            OutputFormat::Matrix,
        )
        .unwrap_err();
        assert!(matches!(err, TranslateError::InvalidLabelPlaceType { .. }));
    }

    #[test]
    fn priority_closure_in_matrix() {
        let out = translate_str(
            "t 0 0 a 0 w n n\n\
             t 0 0 b 0 w n n\n\
             t 0 0 c 0 w n n\n\
             e a b 0 n\n\
             e b c 0 n\n",
            OutputFormat::Matrix,
        )
        .unwrap();
        assert!(out.contains("static int r[3][3]=\n{\n{0,1,1},\n{0,0,1},\n{0,0,0}\n};\n"));
    }

    #[test]
    fn duplicate_name_renders_nothing() {
        let result = translate_str("p 0 0 x 0 n\nt 0 0 x 0 w n n\n", OutputFormat::Lsn);
        let err = result.unwrap_err();
        assert!(matches!(err.root(), TranslateError::DuplicateName { name } if name == "x"));
        assert_eq!(err.exit_code(), 2);
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn raw_names_render_byte_for_byte() {
        let input: &[u8] = b"p 0 0 \xe0 1 n\np 0 0 \xe1 2 n\nt 0 0 t c 0 w n {*HSN(s\xe9 i \xe1 1)}\n";
        let translation = Translation::new(parse_ndr(input).unwrap(), OutputFormat::Lsn).unwrap();
        let mut out = Vec::new();
        translation.render(&mut out).unwrap();

        assert!(contains(&out, b"\n; 1 \xe0\n; 2 \xe1\n"));
        assert!(contains(&out, b"\n1 1 s\xe9\n; HSN place mapping: hp lp\n2 1\n"));
        assert!(contains(&out, b"; mu(p):\n1 1\n2 2\n"));
    }

    #[test]
    fn rendering_follows_format() {
        let net = || parse_ndr_str(TWO_PLACES).unwrap();
        let lsn = Translation::new(net(), OutputFormat::Lsn).unwrap();
        assert!(matches!(lsn.rendering, Rendering::Lsn));
        let matrix = Translation::new(net(), OutputFormat::Matrix).unwrap();
        assert!(matches!(&matrix.rendering, Rendering::Matrix(r) if r.size() == 1));
        assert_eq!(matrix.rendering.format(), OutputFormat::Matrix);
    }

    #[test]
    fn format_names() {
        assert_eq!(OutputFormat::default(), OutputFormat::Lsn);
        assert_eq!(OutputFormat::Matrix.to_string(), "matrix");
    }
}
