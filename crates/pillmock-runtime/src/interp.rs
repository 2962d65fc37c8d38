//! The boundary between a script interpreter and the mock library.
//!
//! A real interpreter parses the layout-automation language and resolves
//! bare identifiers through [`Session::call`]. [`CallListInterpreter`] is
//! a minimal stand-in that only understands call forms, with no variables
//! or control flow:
//!
//! ```text
//! ; comment
//! rodCreateRect("diff" 1.0 2.0 ?cvId ddGetObj("mytech" "test_cell"))
//! pcGenCell_rect_cell(?width 1.5 ?length 2.5)
//! ```

use std::fs;
use std::io;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use pillmock_core::MockError;
use thiserror::Error;

use crate::session::Session;
use crate::value::{Args, Value};

/// Errors surfaced at the interpreter boundary.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Cannot read script {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Call to {name} on line {line} failed")]
    Procedure {
        name: String,
        line: usize,
        #[source]
        source: MockError,
    },
}

/// Something that can run a script file against a session.
pub trait Interpreter {
    /// Parse and evaluate the script at `path`, returning the value of its
    /// last expression.
    fn load(&mut self, path: &Path, session: &mut Session) -> Result<Value, ScriptError>;
}

// ── Lexer ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen,
    RParen,
    Ident(String),
    Keyword(String),
    Str(String),
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone)]
struct Lexed {
    token: Token,
    line: usize,
}

fn syntax(line: usize, message: impl Into<String>) -> ScriptError {
    ScriptError::Syntax {
        line,
        message: message.into(),
    }
}

fn read_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '_' {
            ident.push(c);
            chars.next();
        } else {
            break;
        }
    }
    ident
}

fn read_string(chars: &mut Peekable<Chars<'_>>, line: &mut usize) -> Result<String, ScriptError> {
    let start = *line;
    let mut text = String::new();
    loop {
        match chars.next() {
            None => return Err(syntax(start, "unterminated string")),
            Some('"') => return Ok(text),
            Some('\\') => match chars.next() {
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some(c) => text.push(c),
                None => return Err(syntax(start, "unterminated string")),
            },
            Some(c) => {
                if c == '\n' {
                    *line += 1;
                }
                text.push(c);
            }
        }
    }
}

fn read_number(chars: &mut Peekable<Chars<'_>>, line: usize) -> Result<Token, ScriptError> {
    let mut text = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+') {
            text.push(c);
            chars.next();
        } else {
            break;
        }
    }
    let is_float = text.contains(['.', 'e', 'E']);
    let token = if is_float {
        text.parse().map(Token::Float).ok()
    } else {
        text.parse().map(Token::Int).ok()
    };
    token.ok_or_else(|| syntax(line, format!("invalid number '{text}'")))
}

fn tokenize(source: &str) -> Result<Vec<Lexed>, ScriptError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1;

    while let Some(&c) = chars.peek() {
        let start = line;
        let token = match c {
            '\n' => {
                line += 1;
                chars.next();
                continue;
            }
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            ';' => {
                while chars.peek().is_some_and(|&c| c != '\n') {
                    chars.next();
                }
                continue;
            }
            '(' => {
                chars.next();
                Token::LParen
            }
            ')' => {
                chars.next();
                Token::RParen
            }
            '"' => {
                chars.next();
                Token::Str(read_string(&mut chars, &mut line)?)
            }
            '?' => {
                chars.next();
                let name = read_ident(&mut chars);
                if name.is_empty() {
                    return Err(syntax(line, "expected keyword name after '?'"));
                }
                Token::Keyword(name)
            }
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => read_number(&mut chars, line)?,
            c if c.is_alphabetic() || c == '_' => Token::Ident(read_ident(&mut chars)),
            other => return Err(syntax(line, format!("unexpected character '{other}'"))),
        };
        tokens.push(Lexed { token, line: start });
    }
    Ok(tokens)
}

// ── Parser ───────────────────────────────────────────────────────────

#[derive(Debug)]
enum Expr {
    Literal(Value),
    Call {
        name: String,
        line: usize,
        args: Vec<Arg>,
    },
}

#[derive(Debug)]
enum Arg {
    Positional(Expr),
    Keyword(String, Expr),
}

struct Parser {
    tokens: Vec<Lexed>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|l| &l.token)
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map_or(1, |l| l.line)
    }

    fn program(&mut self) -> Result<Vec<Expr>, ScriptError> {
        let mut exprs = Vec::new();
        while self.pos < self.tokens.len() {
            exprs.push(self.expr()?);
        }
        Ok(exprs)
    }

    fn expr(&mut self) -> Result<Expr, ScriptError> {
        let Some(Lexed { token, line }) = self.tokens.get(self.pos).cloned() else {
            return Err(syntax(self.last_line(), "unexpected end of script"));
        };
        self.pos += 1;
        match token {
            Token::Str(s) => Ok(Expr::Literal(Value::Str(s))),
            Token::Int(v) => Ok(Expr::Literal(Value::Int(v))),
            Token::Float(v) => Ok(Expr::Literal(Value::Float(v))),
            Token::Ident(name) if self.peek() == Some(&Token::LParen) => {
                self.pos += 1;
                let args = self.call_args(&name, line)?;
                Ok(Expr::Call { name, line, args })
            }
            Token::Ident(name) => match name.as_str() {
                "nil" => Ok(Expr::Literal(Value::Nil)),
                "t" => Ok(Expr::Literal(Value::True)),
                _ => Err(syntax(line, format!("unbound variable '{name}'"))),
            },
            Token::Keyword(k) => Err(syntax(line, format!("keyword '?{k}' outside a call"))),
            Token::LParen => Err(syntax(line, "unexpected '('")),
            Token::RParen => Err(syntax(line, "unexpected ')'")),
        }
    }

    fn call_args(&mut self, name: &str, line: usize) -> Result<Vec<Arg>, ScriptError> {
        let mut args = Vec::new();
        loop {
            match self.peek() {
                None => return Err(syntax(line, format!("unclosed call to {name}"))),
                Some(Token::RParen) => {
                    self.pos += 1;
                    return Ok(args);
                }
                Some(Token::Keyword(k)) => {
                    let k = k.clone();
                    self.pos += 1;
                    args.push(Arg::Keyword(k, self.expr()?));
                }
                Some(_) => args.push(Arg::Positional(self.expr()?)),
            }
        }
    }
}

fn parse(source: &str) -> Result<Vec<Expr>, ScriptError> {
    let tokens = tokenize(source)?;
    Parser { tokens, pos: 0 }.program()
}

// ── Evaluation ───────────────────────────────────────────────────────

fn eval(expr: &Expr, session: &mut Session) -> Result<Value, ScriptError> {
    match expr {
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Call { name, line, args } => {
            let mut call_args = Args::new();
            for arg in args {
                match arg {
                    Arg::Positional(e) => call_args.positional.push(eval(e, session)?),
                    Arg::Keyword(k, e) => {
                        let value = eval(e, session)?;
                        call_args.keywords.insert(k.clone(), value);
                    }
                }
            }
            session
                .call(name, &call_args)
                .map_err(|source| ScriptError::Procedure {
                    name: name.clone(),
                    line: *line,
                    source,
                })
        }
    }
}

/// Evaluates a flat list of procedure calls. The whole script is parsed
/// before the first call runs, so a syntax error leaves the session
/// untouched.
#[derive(Debug, Default)]
pub struct CallListInterpreter;

impl CallListInterpreter {
    pub fn new() -> Self {
        Self
    }

    pub fn eval_str(&mut self, source: &str, session: &mut Session) -> Result<Value, ScriptError> {
        let program = parse(source)?;
        let mut result = Value::Nil;
        for expr in &program {
            result = eval(expr, session)?;
        }
        Ok(result)
    }
}

impl Interpreter for CallListInterpreter {
    fn load(&mut self, path: &Path, session: &mut Session) -> Result<Value, ScriptError> {
        log::info!("Loading script {}", path.display());
        let source = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.eval_str(&source, session)
    }
}
