//! 矩阵格式：以 C 数组字面量输出输入弧矩阵 `b`、输出弧矩阵 `d`、优先关系闭包 `r` 与初始标识 `mu`。
use std::io::{self, Write};

use itertools::Itertools;

use crate::export::name_table::{TableStyle, write_place_table, write_transition_table};
use crate::net::core::NetModel;
use crate::translate::priority::PriorityMatrix;

/// Writes `net` as a C header. `priority` must already be closed.
pub fn write_matrix<W: Write>(out: &mut W, net: &NetModel, priority: &PriorityMatrix) -> io::Result<()> {
    let (m, n) = (net.places_len(), net.transitions_len());

    writeln!(out, "// SN obtained from NDR")?;
    writeln!(out, "#define m {}\n#define n {}", m, n)?;

    writeln!(out, "// incoming arcs of transitions\nstatic int b[{}][{}]=", m, n)?;
    write_c_matrix(out, net.input_matrix().rows().iter().map(|row| row.iter().copied()))?;

    writeln!(out, "// outgoing arcs of transitions\nstatic int d[{}][{}]=", m, n)?;
    write_c_matrix(out, net.output_matrix().rows().iter().map(|row| row.iter().copied()))?;

    writeln!(
        out,
        "// priority arcs connecting transitions, transitive closure\nstatic int r[{}][{}]=",
        n, n
    )?;
    write_c_matrix(
        out,
        priority
            .rows()
            .iter()
            .map(|row| row.iter().map(|&bit| i64::from(bit))),
    )?;

    writeln!(
        out,
        "// initial marking\nstatic int mu[{}]={{{}}};",
        m,
        net.places.iter().map(|place| place.tokens).join(",")
    )?;

    writeln!(out, "// Table of places\n// no\tname")?;
    write_place_table(out, net, TableStyle::Matrix)?;
    writeln!(out, "// Table of transitions\n// no\tname")?;
    write_transition_table(out, net, TableStyle::Matrix)?;
    writeln!(out, "// end of SN")
}

/// `{\n{a,b},\n{c,d}\n};\n`
fn write_c_matrix<W, R, C>(out: &mut W, rows: R) -> io::Result<()>
where
    W: Write,
    R: Iterator<Item = C>,
    C: Iterator<Item = i64>,
{
    let rows: Vec<String> = rows
        .map(|mut row| format!("{{{}}}", row.join(",")))
        .collect();
    writeln!(out, "{{")?;
    if !rows.is_empty() {
        writeln!(out, "{}", rows.join(",\n"))?;
    }
    writeln!(out, "}};")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(net: &NetModel) -> String {
        let mut priority = PriorityMatrix::from_arcs(net.transitions_len(), &net.priority_arcs);
        priority.close();
        let mut out = Vec::new();
        write_matrix(&mut out, net, &priority).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn small_net() {
        let mut net = NetModel::empty();
        let p1 = net.add_place("p1", 3).unwrap();
        let p2 = net.add_place("p2", 0).unwrap();
        let t1 = net.add_transition("t1").unwrap();
        let t2 = net.add_transition("t2").unwrap();
        net.add_input_arc(p1, t1, 2).unwrap();
        net.add_input_arc(p2, t2, 0).unwrap();
        net.add_output_arc(t1, p2, 1).unwrap();
        net.add_priority_arc(t2, t1).unwrap();

        assert_eq!(
            render(&net),
            "// SN obtained from NDR\n\
             #define m 2\n\
             #define n 2\n\
             // incoming arcs of transitions\n\
             static int b[2][2]=\n\
             {\n\
             {2,0},\n\
             {0,-1}\n\
             };\n\
             // outgoing arcs of transitions\n\
             static int d[2][2]=\n\
             {\n\
             {0,0},\n\
             {1,0}\n\
             };\n\
             // priority arcs connecting transitions, transitive closure\n\
             static int r[2][2]=\n\
             {\n\
             {0,0},\n\
             {1,0}\n\
             };\n\
             // initial marking\n\
             static int mu[2]={3,0};\n\
             // Table of places\n\
             // no\tname\n\
             // 0\tp1\n\
             // 1\tp2\n\
             // Table of transitions\n\
             // no\tname\n\
             // 0\tt1\n\
             // 1\tt2\n\
             // end of SN\n"
        );
    }

    #[test]
    fn last_parallel_arc_wins() {
        let mut net = NetModel::empty();
        let p = net.add_place("p", 0).unwrap();
        let t = net.add_transition("t").unwrap();
        net.add_output_arc(t, p, 4).unwrap();
        net.add_output_arc(t, p, 7).unwrap();
        assert!(render(&net).contains("static int d[1][1]=\n{\n{7}\n};\n"));
    }

    #[test]
    fn empty_dimensions() {
        let mut net = NetModel::empty();
        net.add_place("lonely", 1).unwrap();
        let text = render(&net);
        assert!(text.contains("static int b[1][0]=\n{\n{}\n};\n"));
        assert!(text.contains("static int r[0][0]=\n{\n};\n"));
        assert!(text.contains("static int mu[1]={1};\n"));

        let text = render(&NetModel::empty());
        assert!(text.contains("static int mu[0]={};\n"));
    }

    #[test]
    fn negative_marking_is_written_as_read() {
        let mut net = NetModel::empty();
        net.add_place("p", -2).unwrap();
        assert!(render(&net).contains("static int mu[1]={-2};\n"));
    }
}
