//! NDR 读取器：逐行按首字符分派，构建网模型。
//!
//! 弧的种类只由端点名落在哪张表里决定，判定顺序固定：
//! 先看端点 1 是否为库所（输入弧），再看是否为迁移；对迁移端点，端点 2 先查库所（输出弧），
//! 后查迁移（优先弧）。
use std::io::BufRead;

use log::{debug, trace, warn};

use crate::error::{Result, TranslateError};
use crate::ndr::scanner::{Cursor, atoi, trailing_weight};
use crate::net::core::NetModel;
use crate::net::names::display_name;

/// Opening of a substitution label token: `{*HSN(payload)}`.
pub const HSN_PREFIX: &[u8] = b"{*HSN(";

/// Incremental NDR reader that owns the model being built.
#[derive(Debug, Default)]
pub struct NdrParser {
    net: NetModel,
    line_no: usize,
}

impl NdrParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one input line (with or without its line terminator).
    pub fn parse_line(&mut self, line: &[u8]) -> Result<()> {
        self.line_no += 1;
        self.directive(line)
            .map_err(|err| err.at_line(self.line_no))
    }

    pub fn finish(self) -> NetModel {
        self.net.log_summary();
        self.net
    }

    fn directive(&mut self, line: &[u8]) -> Result<()> {
        let mut cursor = Cursor::new(line);
        cursor.skip_space();
        match cursor.bump() {
            None | Some(b'#') => Ok(()),
            Some(b'p') => self.place(cursor),
            Some(b't') => self.transition(cursor),
            Some(b'e') => self.arc(cursor, line),
            Some(b'h') => self.net_name(cursor),
            Some(tag) => {
                trace!(
                    "line {}: ignoring directive '{}'",
                    self.line_no,
                    tag.escape_ascii()
                );
                Ok(())
            }
        }
    }

    /// `p x y name marking`
    fn place(&mut self, mut cursor: Cursor<'_>) -> Result<()> {
        skip_fields(&mut cursor, 2);
        let name = cursor.name()?;
        let place = self.net.add_place(name, 0)?;

        cursor.skip_space();
        let tokens = atoi(cursor.rest());
        if tokens < 0 {
            warn!(
                "line {}: place {} has negative marking {}",
                self.line_no,
                display_name(name),
                tokens
            );
        }
        self.net.set_tokens(place, tokens);
        Ok(())
    }

    /// `t x y name anchor eft lft anchor [label]`
    fn transition(&mut self, mut cursor: Cursor<'_>) -> Result<()> {
        skip_fields(&mut cursor, 2);
        let name = cursor.name()?;
        let transition = self.net.add_transition(name)?;

        skip_fields(&mut cursor, 4);
        cursor.skip_space();
        let label = cursor.name()?;
        if let Some(body) = label.strip_prefix(HSN_PREFIX) {
            // drop the closing ")}"
            let payload = &body[..body.len().saturating_sub(2)];
            trace!(
                "transition {} carries label {:?}",
                display_name(name),
                display_name(payload)
            );
            self.net.attach_label(transition, payload)?;
        }
        Ok(())
    }

    /// `e from [num] [num] to ... weight anchor`
    fn arc(&mut self, mut cursor: Cursor<'_>, line: &[u8]) -> Result<()> {
        cursor.skip_space();
        let from = cursor.name()?;
        cursor.skip_space();
        cursor.skip_numeric_field();
        cursor.skip_space();
        cursor.skip_numeric_field();
        cursor.skip_space();
        let to = cursor.name()?;
        let weight = trailing_weight(line);

        let unresolved = || TranslateError::UnresolvedArcEndpoint {
            from: display_name(from).into_owned(),
            to: display_name(to).into_owned(),
        };

        if let Some(place) = self.net.find_place(from) {
            let transition = self.net.find_transition(to).ok_or_else(unresolved)?;
            trace!(
                "p->t {} -> {} ({})",
                display_name(from),
                display_name(to),
                weight
            );
            return self.net.add_input_arc(place, transition, weight);
        }

        let transition = self.net.find_transition(from).ok_or_else(unresolved)?;
        if let Some(place) = self.net.find_place(to) {
            trace!(
                "t->p {} -> {} ({})",
                display_name(from),
                display_name(to),
                weight
            );
            self.net.add_output_arc(transition, place, weight)
        } else if let Some(dominated) = self.net.find_transition(to) {
            trace!("t->t {} -> {}", display_name(from), display_name(to));
            self.net.add_priority_arc(transition, dominated)
        } else {
            Err(unresolved())
        }
    }

    /// `h name`
    fn net_name(&mut self, mut cursor: Cursor<'_>) -> Result<()> {
        cursor.skip_space();
        let name = display_name(cursor.name()?).into_owned();
        debug!("net name {}", name);
        self.net.name = Some(name);
        Ok(())
    }
}

fn skip_fields(cursor: &mut Cursor<'_>, count: usize) {
    for _ in 0..count {
        cursor.skip_space();
        cursor.skip_field();
    }
    cursor.skip_space();
}

/// Reads a whole NDR document.
pub fn parse_ndr<R: BufRead>(mut reader: R) -> Result<NetModel> {
    let mut parser = NdrParser::new();
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        parser.parse_line(&raw)?;
    }
    Ok(parser.finish())
}

pub fn parse_ndr_str(text: &str) -> Result<NetModel> {
    parse_ndr(text.as_bytes())
}
