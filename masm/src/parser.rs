use std::collections::HashMap;
use std::fmt;

use byteorder::ByteOrder;
use matches::debug_assert_matches;

use crate::error::SourceError;
use crate::int_util;
use crate::lexer::{Lexer, Token, TokenKind};
use mcpu::constants;
use mcpu::isa::{self, ArgumentType, Directive, InstructionInfo, Register};
use mcpu::Endian;

/// Region of the source file currently being parsed. Until a section
/// directive is seen nothing else is legal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Section {
    None,
    Data,
    Text,
}

/// An immediate operand. Label references stay symbolic until the
/// resolution pass replaces them with their address; the encoder only ever
/// sees the narrowed form.
#[derive(Clone, Debug, PartialEq)]
pub enum Immediate {
    Int(i32),
    Float(f64),
    Symbol(String),
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Immediate::Int(value) => write!(f, "{}", value),
            Immediate::Float(value) => write!(f, "{}", value),
            Immediate::Symbol(name) => write!(f, "{}", name),
        }
    }
}

/// One parsed instruction argument. The variant is validated against the
/// slot's declared [`ArgumentType`] while parsing; a bare register in an
/// `ImmWReg` slot stands for a zero displacement.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    Register(Register),
    Immediate(Immediate),
    ImmediateWithRegister(Immediate, Register),
}

impl Argument {
    /// The register of a `Reg`/`Freg` slot. Calling this on another variant
    /// is a bug in the encoder schema.
    pub fn register(&self) -> Register {
        match self {
            Argument::Register(register) => *register,
            _ => unreachable!("argument is not a register"),
        }
    }

    /// The immediate of an `Imm` slot.
    pub fn immediate(&self) -> &Immediate {
        match self {
            Argument::Immediate(immediate) => immediate,
            _ => unreachable!("argument is not an immediate"),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Argument::Register(register) => {
                write!(f, "{}", register.to_string().to_lowercase())
            }
            Argument::Immediate(immediate) => write!(f, "{}", immediate),
            Argument::ImmediateWithRegister(immediate, register) => write!(
                f,
                "{}({})",
                immediate,
                register.to_string().to_lowercase()
            ),
        }
    }
}

/// A parsed instruction: its table entry, its arguments and the address it
/// will occupy, which the encoder needs for pc-relative displacements.
#[derive(Clone, Debug, PartialEq)]
pub struct InstructionData {
    pub info: &'static InstructionInfo,
    pub args: Vec<Argument>,
    pub pc_address: u32,
    /// Source line, zero-based; used by dumps and late diagnostics.
    pub line: usize,
}

impl fmt::Display for InstructionData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.info.name)?;
        for (index, arg) in self.args.iter().enumerate() {
            if index == 0 {
                write!(f, " {}", arg)?;
            } else {
                write!(f, ", {}", arg)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub name: String,
    pub address: u64,
}

/// The read-only data image under construction: a fixed 32 KiB byte array
/// plus the high-water mark that decides how much of it the artifacts carry.
pub struct DataImage {
    bytes: Vec<u8>,
    limit: usize,
}

impl DataImage {
    pub fn new() -> DataImage {
        DataImage {
            bytes: vec![0; constants::MEMORY_SIZE],
            limit: 0,
        }
    }

    /// Writes raw bytes at an absolute address. Overruns of the fixed image
    /// are reported here, not by the directive dispatch.
    pub fn write(&mut self, address: u64, data: &[u8]) -> Result<(), ()> {
        let end = (address as usize).checked_add(data.len()).ok_or(())?;
        if address as usize > self.bytes.len() || end > self.bytes.len() {
            return Err(());
        }
        self.bytes[address as usize..end].copy_from_slice(data);
        if end > self.limit {
            self.limit = end;
        }
        Ok(())
    }

    /// Extends the high-water mark without touching the bytes, for `.space`.
    pub fn reserve(&mut self, address: u64) -> Result<(), ()> {
        if address as usize > self.bytes.len() {
            return Err(());
        }
        if address as usize > self.limit {
            self.limit = address as usize;
        }
        Ok(())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// The populated prefix of the image, as emitted into `.bin` and `.dat`.
    pub fn written(&self) -> &[u8] {
        &self.bytes[..self.limit]
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for DataImage {
    fn default() -> DataImage {
        DataImage::new()
    }
}

/// Rounds `value + offset` up to a multiple of `align`. A result smaller
/// than the alignment clamps up to the alignment itself; the quirk is
/// observable in emitted data layouts and deliberately kept.
pub fn align_address(value: u64, offset: u64, align: u64) -> u64 {
    let new_value = value + offset;
    if new_value < align {
        return align;
    }
    match new_value % align {
        0 => new_value,
        displacement => new_value + (align - displacement),
    }
}

const DEFAULT_ALIGNMENT: u64 = constants::DWORD_BYTES as u64;

/// Section-aware two-pass consumer of the token stream. All errors are
/// recoverable: the parser reports them and resynchronizes on the next
/// plausible token, so one run surfaces as many problems as possible.
pub struct Parser<'i> {
    lexer: &'i Lexer<'i>,
    pos: usize,
    section: Section,
    current_address: u64,
    current_pc: u32,
    labels: HashMap<&'i str, u64>,
    instructions: Vec<InstructionData>,
    data: DataImage,
    errors: Vec<SourceError>,
}

impl<'i> Parser<'i> {
    pub fn new(lexer: &'i Lexer<'i>) -> Parser<'i> {
        Parser {
            lexer,
            pos: 0,
            section: Section::None,
            current_address: 0,
            current_pc: 0,
            labels: HashMap::new(),
            instructions: Vec::new(),
            data: DataImage::new(),
            errors: Vec::new(),
        }
    }

    pub fn instructions(&self) -> &[InstructionData] {
        &self.instructions[..]
    }

    pub fn labels(&self) -> &HashMap<&'i str, u64> {
        &self.labels
    }

    pub fn data(&self) -> &DataImage {
        &self.data
    }

    pub fn errors(&self) -> &[SourceError] {
        &self.errors[..]
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes the parser, handing out its products. Labels are sorted by
    /// address for stable dumps.
    pub fn into_parts(self) -> (Vec<InstructionData>, Vec<Label>, DataImage, Vec<SourceError>) {
        let mut labels: Vec<Label> = self
            .labels
            .into_iter()
            .map(|(name, address)| Label {
                name: name.to_owned(),
                address,
            })
            .collect();
        labels.sort_by(|a, b| a.address.cmp(&b.address).then_with(|| a.name.cmp(&b.name)));
        (self.instructions, labels, self.data, self.errors)
    }

    fn peek(&self) -> Option<Token<'i>> {
        self.lexer.tokens().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<Token<'i>> {
        self.lexer.tokens().get(self.pos + offset).copied()
    }

    fn error_at(&mut self, token: &Token, message: String) {
        let line_text = self
            .lexer
            .lines()
            .get(token.line)
            .copied()
            .unwrap_or("");
        self.errors.push(SourceError::parse(
            message,
            self.lexer.file(),
            token.line,
            token.column,
            line_text,
        ));
    }

    fn error_eof(&mut self) {
        let (line, column) = self
            .lexer
            .tokens()
            .last()
            .map_or((0, 0), |token| (token.line, token.column));
        let line_text = self.lexer.lines().get(line).copied().unwrap_or("");
        self.errors.push(SourceError::parse(
            "unexpected end of token stream was reached".to_owned(),
            self.lexer.file(),
            line,
            column,
            line_text,
        ));
    }

    /// Consumes the next token if it has the wanted kind; reports and leaves
    /// the cursor in place otherwise.
    fn expect(&mut self, kind: TokenKind) -> Option<Token<'i>> {
        match self.peek() {
            None => {
                self.error_eof();
                None
            }
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Some(token)
            }
            Some(token) => {
                self.error_at(
                    &token,
                    format!(
                        "Expected token of kind {:?} but got {:?}",
                        kind, token.kind
                    ),
                );
                None
            }
        }
    }

    pub fn parse(&mut self) {
        while self.pos < self.lexer.tokens().len() {
            let before = self.pos;
            let token = self.peek().unwrap();

            match self.section {
                Section::None => self.parse_section_start(),
                Section::Data => match token.kind {
                    TokenKind::Dot => self.parse_data_directive(),
                    TokenKind::Label => self.parse_label(),
                    _ => {
                        self.error_at(&token, format!("Unhandled token: {}", token));
                        self.pos += 1;
                    }
                },
                Section::Text => match token.kind {
                    TokenKind::Identifier => self.parse_instruction(),
                    TokenKind::Label => self.parse_label(),
                    TokenKind::Dot => self.parse_text_directive(),
                    _ => {
                        self.error_at(&token, format!("Unhandled token: {}", token));
                        self.pos += 1;
                    }
                },
            }

            // Whatever went wrong above, never stall on the same token.
            if self.pos == before {
                self.pos += 1;
            }
        }

        self.resolve_labels();
    }

    fn parse_section_start(&mut self) {
        if self.expect(TokenKind::Dot).is_none() {
            self.pos += 1;
            return;
        }
        let directive = match self.expect(TokenKind::Directive) {
            Some(token) => token,
            None => return,
        };
        self.parse_section_change(&directive);
    }

    fn parse_section_change(&mut self, token: &Token<'i>) {
        match isa::directive_by_name(token.text) {
            Some(Directive::DATA) => self.section = Section::Data,
            Some(Directive::TEXT) | Some(Directive::CODE) => self.section = Section::Text,
            _ => self.error_at(token, "Expected .data, .text or .code".to_owned()),
        }
    }

    fn parse_label(&mut self) {
        let token = self.peek().unwrap();
        debug_assert_matches!(token.kind, TokenKind::Label);
        self.pos += 1;
        if self.expect(TokenKind::Colon).is_none() {
            return;
        }

        let address = match self.section {
            Section::Text => u64::from(self.current_pc),
            _ => self.current_address,
        };
        if self.labels.contains_key(token.text) {
            self.error_at(
                &token,
                format!("duplicate label definition \"{}\"", token.text),
            );
        } else {
            self.labels.insert(token.text, address);
        }
    }

    /// Consumes an `Integer` directive operand as a non-negative value.
    fn parse_directive_operand(&mut self) -> Option<u64> {
        let token = self.expect(TokenKind::Integer)?;
        match int_util::parse_int(token.text) {
            Ok(value) if value >= 0 => Some(value as u64),
            Ok(_) => {
                self.error_at(&token, "directive operand must be non-negative".to_owned());
                None
            }
            Err(err) => {
                self.error_at(&token, format!("invalid integer literal: {}", err));
                None
            }
        }
    }

    fn parse_data_directive(&mut self) {
        self.pos += 1; // the dot
        let token = match self.expect(TokenKind::Directive) {
            Some(token) => token,
            None => return,
        };
        let directive = match isa::directive_by_name(token.text) {
            Some(directive) => directive,
            None => {
                // The lexer only classifies known names as directives.
                self.error_at(&token, format!("unknown directive \"{}\"", token.text));
                return;
            }
        };

        match directive {
            Directive::DATA | Directive::TEXT | Directive::CODE => {
                self.parse_section_change(&token)
            }

            Directive::ORG => {
                if let Some(value) = self.parse_directive_operand() {
                    if value as usize > constants::MEMORY_SIZE {
                        self.error_at(&token, "origin outside the data image".to_owned());
                    } else {
                        self.current_address = value;
                    }
                }
            }

            Directive::ALIGN => {
                if let Some(align) = self.parse_directive_operand() {
                    if align == 0 {
                        self.error_at(&token, "alignment must not be zero".to_owned());
                    } else {
                        self.current_address = align_address(self.current_address, 0, align);
                    }
                }
            }

            Directive::SPACE => {
                if let Some(amount) = self.parse_directive_operand() {
                    if amount as usize > constants::MEMORY_SIZE {
                        self.error_at(&token, "data image overflow".to_owned());
                        return;
                    }
                    let new_address =
                        align_address(self.current_address, amount, DEFAULT_ALIGNMENT);
                    if self.data.reserve(new_address).is_err() {
                        self.error_at(&token, "data image overflow".to_owned());
                    } else {
                        self.current_address = new_address;
                    }
                }
            }

            Directive::ASCII => self.parse_string_directive(&token, false),
            Directive::ASCIIZ => self.parse_string_directive(&token, true),

            Directive::BYTE => self.parse_literal_list(1),
            Directive::WORD16 => self.parse_literal_list(2),
            Directive::WORD32 => self.parse_literal_list(4),
            Directive::WORD => self.parse_literal_list(8),
            Directive::DOUBLE => self.parse_literal_list(8),
        }
    }

    fn parse_string_directive(&mut self, directive: &Token<'i>, terminate: bool) {
        let token = match self.expect(TokenKind::String) {
            Some(token) => token,
            None => return,
        };

        let mut bytes = Vec::from(token.text.as_bytes());
        if terminate {
            bytes.push(0);
        }
        if self.data.write(self.current_address, &bytes[..]).is_err() {
            self.error_at(directive, "data image overflow".to_owned());
            return;
        }
        self.current_address = align_address(
            self.current_address,
            bytes.len() as u64,
            DEFAULT_ALIGNMENT,
        );
    }

    /// Comma-separated integer or real literals, each `width` bytes wide.
    /// Integers are masked to the field width; reals contribute the low
    /// `width` bytes of their IEEE-754 representation.
    fn parse_literal_list(&mut self, width: usize) {
        loop {
            let token = match self.peek() {
                Some(token) => token,
                None => break,
            };

            let mut buffer = [0u8; 8];
            match token.kind {
                TokenKind::Integer => match int_util::parse_int(token.text) {
                    Ok(value) => Endian::write_u64(&mut buffer, value as u64),
                    Err(err) => {
                        self.error_at(&token, format!("invalid integer literal: {}", err));
                        self.pos += 1;
                        break;
                    }
                },
                TokenKind::Real => match int_util::parse_real(token.text) {
                    Ok(value) => Endian::write_u64(&mut buffer, value.to_bits()),
                    Err(err) => {
                        self.error_at(&token, format!("invalid real literal: {}", err));
                        self.pos += 1;
                        break;
                    }
                },
                _ => break,
            }
            self.pos += 1;

            if self.data.write(self.current_address, &buffer[..width]).is_err() {
                self.error_at(&token, "data image overflow".to_owned());
                break;
            }
            self.current_address += width as u64;

            match self.peek() {
                Some(token) if token.kind == TokenKind::Comma => {
                    self.pos += 1;
                    // A comma promises another literal.
                    match self.peek() {
                        Some(next)
                            if next.kind == TokenKind::Integer
                                || next.kind == TokenKind::Real => {}
                        Some(next) => {
                            self.error_at(&next, "expected literal after comma".to_owned());
                            break;
                        }
                        None => {
                            self.error_eof();
                            break;
                        }
                    }
                }
                _ => break,
            }
        }

        self.current_address = align_address(self.current_address, 0, DEFAULT_ALIGNMENT);
    }

    fn parse_text_directive(&mut self) {
        self.pos += 1; // the dot
        let token = match self.expect(TokenKind::Directive) {
            Some(token) => token,
            None => return,
        };

        match isa::directive_by_name(token.text) {
            Some(Directive::DATA) | Some(Directive::TEXT) | Some(Directive::CODE) => {
                self.parse_section_change(&token)
            }
            Some(Directive::ORG) => {
                if let Some(value) = self.parse_directive_operand() {
                    if value as usize >= constants::CODE_SIZE {
                        self.error_at(&token, "origin outside the code image".to_owned());
                    } else {
                        self.current_pc = value as u32;
                    }
                }
            }
            _ => self.error_at(
                &token,
                format!(
                    "directive .{} is not allowed in the text section",
                    token.text
                ),
            ),
        }
    }

    fn parse_instruction(&mut self) {
        let first = self.peek().unwrap();
        debug_assert_matches!(first.kind, TokenKind::Identifier);
        self.pos += 1;

        // Mnemonics may carry up to two dot suffixes (add.d, cvt.d.l).
        let mut name = first.text.to_lowercase();
        for _ in 0..2 {
            match (self.peek(), self.peek_at(1)) {
                (Some(dot), Some(suffix))
                    if dot.kind == TokenKind::Dot && suffix.kind == TokenKind::Identifier =>
                {
                    self.pos += 2;
                    name.push('.');
                    name.push_str(&suffix.text.to_lowercase());
                }
                _ => break,
            }
        }

        let info = match isa::instruction_by_name(&name) {
            Some(info) => info,
            None => {
                self.error_at(&first, format!("unknown instruction \"{}\"", name));
                return;
            }
        };

        let mut args = Vec::with_capacity(info.arg_count);
        for index in 0..info.arg_count {
            if index != 0 && self.expect(TokenKind::Comma).is_none() {
                return;
            }
            let arg = match info.arg_types[index] {
                ArgumentType::Reg => self.parse_register_argument(false),
                ArgumentType::Freg => self.parse_register_argument(true),
                ArgumentType::Imm => self.parse_immediate_argument(),
                ArgumentType::ImmWReg => self.parse_displacement_argument(),
            };
            match arg {
                Some(arg) => args.push(arg),
                None => return,
            }
        }

        if self.current_pc as usize >= constants::CODE_SIZE {
            self.error_at(&first, "code image overflow".to_owned());
            return;
        }

        self.instructions.push(InstructionData {
            info,
            args,
            pc_address: self.current_pc,
            line: first.line,
        });
        self.current_pc += constants::WORD_BYTES;
    }

    fn parse_register_argument(&mut self, float_bank: bool) -> Option<Argument> {
        let token = self.expect(TokenKind::Identifier)?;
        match isa::register_by_name(token.text) {
            Some(register) => {
                if register.is_float() != float_bank {
                    let wanted = if float_bank { "floating point" } else { "integer" };
                    self.error_at(
                        &token,
                        format!("expected {} register, got {}", wanted, token.text),
                    );
                }
                Some(Argument::Register(register))
            }
            None => {
                self.error_at(&token, format!("unknown register \"{}\"", token.text));
                None
            }
        }
    }

    fn parse_immediate(&mut self) -> Option<Immediate> {
        let token = match self.peek() {
            Some(token) => token,
            None => {
                self.error_eof();
                return None;
            }
        };

        match token.kind {
            TokenKind::Integer => {
                self.pos += 1;
                match int_util::parse_int(token.text) {
                    Ok(value)
                        if value >= i64::from(i32::min_value())
                            && value <= i64::from(i32::max_value()) =>
                    {
                        Some(Immediate::Int(value as i32))
                    }
                    Ok(_) => {
                        self.error_at(&token, "integer immediate out of range".to_owned());
                        None
                    }
                    Err(err) => {
                        self.error_at(&token, format!("invalid integer literal: {}", err));
                        None
                    }
                }
            }
            TokenKind::Real => {
                self.pos += 1;
                match int_util::parse_real(token.text) {
                    Ok(value) => Some(Immediate::Float(value)),
                    Err(err) => {
                        self.error_at(&token, format!("invalid real literal: {}", err));
                        None
                    }
                }
            }
            TokenKind::Identifier => {
                self.pos += 1;
                Some(Immediate::Symbol(token.text.to_owned()))
            }
            _ => {
                self.error_at(
                    &token,
                    format!("expected immediate value, got {:?}", token.kind),
                );
                None
            }
        }
    }

    /// An immediate that must end up in an integer field: an integer
    /// literal or a label reference. No mnemonic encodes a real-valued
    /// immediate, so reals are reported here instead of surviving to the
    /// encoder.
    fn parse_integer_immediate(&mut self, what: &str) -> Option<Immediate> {
        let token = match self.peek() {
            Some(token) => token,
            None => {
                self.error_eof();
                return None;
            }
        };

        let immediate = self.parse_immediate()?;
        if let Immediate::Float(_) = immediate {
            self.error_at(
                &token,
                format!("{} must be an integer or a label", what),
            );
            return None;
        }
        Some(immediate)
    }

    fn parse_immediate_argument(&mut self) -> Option<Argument> {
        self.parse_integer_immediate("immediate")
            .map(Argument::Immediate)
    }

    /// `offset(base)` addressing, or a bare integer register standing for a
    /// zero displacement.
    fn parse_displacement_argument(&mut self) -> Option<Argument> {
        if let Some(token) = self.peek() {
            if token.kind == TokenKind::Identifier {
                if let Some(register) = isa::register_by_name(token.text) {
                    self.pos += 1;
                    if register.is_float() {
                        self.error_at(
                            &token,
                            "base register must be an integer register".to_owned(),
                        );
                    }
                    return Some(Argument::Register(register));
                }
            }
        }

        let displacement = self.parse_integer_immediate("displacement")?;

        self.expect(TokenKind::OpenParens)?;
        let base_token = self.expect(TokenKind::Identifier)?;
        let base = match isa::register_by_name(base_token.text) {
            Some(register) => register,
            None => {
                self.error_at(
                    &base_token,
                    format!("unknown register \"{}\"", base_token.text),
                );
                return None;
            }
        };
        if base.is_float() {
            self.error_at(
                &base_token,
                "base register must be an integer register".to_owned(),
            );
        }
        self.expect(TokenKind::CloseParens)?;

        Some(Argument::ImmediateWithRegister(displacement, base))
    }

    /// Second pass: replaces every symbolic immediate with the address of
    /// its label. Runs over the finished instruction list so forward
    /// references need no back-patching; running it twice is a no-op.
    fn resolve_labels(&mut self) {
        let labels = &self.labels;
        let lexer = self.lexer;
        let mut errors = Vec::new();

        for data in self.instructions.iter_mut() {
            let line = data.line;
            for arg in data.args.iter_mut() {
                let immediate = match arg {
                    Argument::Immediate(immediate) => immediate,
                    Argument::ImmediateWithRegister(immediate, _) => immediate,
                    Argument::Register(_) => continue,
                };
                if let Immediate::Symbol(name) = immediate {
                    match labels.get(name.as_str()) {
                        Some(&address) => *immediate = Immediate::Int(address as i32),
                        None => {
                            let line_text = lexer.lines().get(line).copied().unwrap_or("");
                            errors.push(SourceError::parse(
                                format!("label \"{}\" was not found", name),
                                lexer.file(),
                                line,
                                0,
                                line_text,
                            ));
                        }
                    }
                }
            }
        }

        self.errors.extend(errors);
    }
}
