//
// DHCP-RS - Common
//   Copyright (C) 2024-2025, Toshiaki Takada
//

pub mod encode;
pub mod option;

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DhcpError {
    #[error("Invalid Value {0}")]
    InvalidValue(String),
    #[error("Malformed option definition {0}")]
    MalformedDefinition(String),
    #[error("Duplicate option definition {0}")]
    DuplicateDefinition(String),
    #[error("Size mismatch {0}")]
    SizeMismatch(String),
    #[error("Universe mismatch, expected {expected} but got {actual}")]
    UniverseMismatch {
        expected: Universe,
        actual: Universe,
    },
    #[error("Insuffcient buffer size {0}")]
    InsufficientBufferSize(String),
    #[error("Encode error {0}")]
    EncodeError(String),
    #[error("Decode error {0}")]
    DecodeError(String),
    #[error("Config error {0}")]
    ConfigError(String),
    #[error("Config syntax error at line {line}: {reason}")]
    ConfigSyntax {
        line: usize,
        reason: String,
    },
    #[error("I/O error")]
    IoError(#[from] std::io::Error),
}

impl DhcpError {
    /// Message identifier used by the diagnostics facility.
    pub fn message_id(&self) -> &'static str {
        match self {
            DhcpError::InvalidValue(_) => "DHCP_INVALID_OPTION_VALUE",
            DhcpError::MalformedDefinition(_) => "DHCP_MALFORMED_OPTION_DEFINITION",
            DhcpError::DuplicateDefinition(_) => "DHCP_DUPLICATE_OPTION_DEFINITION",
            DhcpError::SizeMismatch(_) => "DHCP_OPTION_SIZE_MISMATCH",
            DhcpError::UniverseMismatch { .. } => "DHCP_OPTION_UNIVERSE_MISMATCH",
            DhcpError::InsufficientBufferSize(_) => "DHCP_INSUFFICIENT_BUFFER",
            DhcpError::EncodeError(_) => "DHCP_ENCODE_ERROR",
            DhcpError::DecodeError(_) => "DHCP_DECODE_ERROR",
            DhcpError::ConfigError(_) => "DHCP_CONFIG_ERROR",
            DhcpError::ConfigSyntax { .. } => "DHCP_CONFIG_SYNTAX_ERROR",
            DhcpError::IoError(_) => "DHCP_IO_ERROR",
        }
    }

    /// Ordered message arguments, not including the line number.
    pub fn arguments(&self) -> Vec<String> {
        match self {
            DhcpError::InvalidValue(s) |
            DhcpError::MalformedDefinition(s) |
            DhcpError::DuplicateDefinition(s) |
            DhcpError::SizeMismatch(s) |
            DhcpError::InsufficientBufferSize(s) |
            DhcpError::EncodeError(s) |
            DhcpError::DecodeError(s) |
            DhcpError::ConfigError(s) => vec![s.clone()],
            DhcpError::UniverseMismatch { expected, actual } => {
                vec![expected.to_string(), actual.to_string()]
            }
            DhcpError::ConfigSyntax { reason, .. } => vec![reason.clone()],
            DhcpError::IoError(e) => vec![e.to_string()],
        }
    }

    /// Line number in the configuration source, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            DhcpError::ConfigSyntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Structured diagnostic: message id, arguments and source line.
///
/// A positive line number is carried as the first argument, followed by
/// the arguments of the error itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReport {
    /// Message identification.
    pub id: &'static str,

    /// Message arguments.
    pub args: Vec<String>,

    /// Line on which the error occurred.
    pub lineno: Option<usize>,
}

impl MessageReport {
    pub fn new(id: &'static str, args: Vec<String>, lineno: Option<usize>) -> MessageReport {
        let lineno = lineno.filter(|l| *l > 0);
        let mut all = Vec::new();
        if let Some(l) = lineno {
            all.push(l.to_string());
        }
        all.extend(args);

        MessageReport {
            id,
            args: all,
            lineno,
        }
    }
}

impl From<&DhcpError> for MessageReport {
    fn from(e: &DhcpError) -> MessageReport {
        MessageReport::new(e.message_id(), e.arguments(), e.line())
    }
}

impl fmt::Display for MessageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Protocol universe an option belongs to.
#[derive(PartialEq, Eq, Copy, Clone, Hash)]
pub enum Universe {
    V4,
    V6,
}

impl fmt::Debug for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Universe::V4 => write!(f, "V4"),
            Universe::V6 => write!(f, "V6"),
        }
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
