//! Parses the line-oriented command language of spec §6.2 into
//! structured [`Command`]s. Out of scope for the core per spec §1, kept
//! here as the driver's external collaborator.

use thiserror::Error;

use crate::errors::OrderError;
use crate::order::{Order, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Accept(Order),
    Cancel(u32),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command line")]
    EmptyLine,
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("bad side {0:?}, expected B or S")]
    BadSide(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("field {field} is not a valid integer: {value:?}")]
    BadInteger { field: &'static str, value: String },
    #[error(transparent)]
    Order(#[from] OrderError),
}

fn field<'a>(
    fields: &mut std::str::SplitWhitespace<'a>,
    name: &'static str,
) -> Result<&'a str, ParseError> {
    fields.next().ok_or(ParseError::MissingField(name))
}

fn parse_u32(name: &'static str, value: &str) -> Result<u32, ParseError> {
    value.parse().map_err(|_| ParseError::BadInteger {
        field: name,
        value: value.to_string(),
    })
}

fn parse_side(value: &str) -> Result<Side, ParseError> {
    Side::from_char(value.chars().next().unwrap_or('\0'))
        .filter(|_| value.len() == 1)
        .ok_or_else(|| ParseError::BadSide(value.to_string()))
}

/// Parses one line of input. Blank lines and `#` comments parse to
/// `Ok(None)` per spec §6.2.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let code = field(&mut fields, "command code")?;

    let command = match code {
        "C" => {
            let id = parse_u32("order_id", field(&mut fields, "order_id")?)?;
            Command::Cancel(id)
        }
        "L" | "I" => {
            let side = parse_side(field(&mut fields, "side")?)?;
            let id = parse_u32("order_id", field(&mut fields, "order_id")?)?;
            let price = parse_u32("price", field(&mut fields, "price")?)?;
            let quantity = parse_u32("quantity", field(&mut fields, "quantity")?)?;
            let peak = if code == "I" {
                parse_u32("peak", field(&mut fields, "peak")?)?
            } else {
                0
            };
            Command::Accept(Order::new(side, id, price, quantity, peak)?)
        }
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_comment_lines_are_none() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# a comment").unwrap(), None);
    }

    #[test]
    fn parses_limit_order() {
        let cmd = parse_line("L B 1 100 10").unwrap().unwrap();
        assert_eq!(cmd, Command::Accept(Order::new(Side::Buy, 1, 100, 10, 0).unwrap()));
    }

    #[test]
    fn parses_iceberg_order() {
        let cmd = parse_line("I S 1 100 100 10").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Accept(Order::new(Side::Sell, 1, 100, 100, 10).unwrap())
        );
    }

    #[test]
    fn parses_cancel() {
        assert_eq!(parse_line("C 42").unwrap().unwrap(), Command::Cancel(42));
    }

    #[test]
    fn rejects_unknown_code() {
        assert!(matches!(
            parse_line("X 1 2 3"),
            Err(ParseError::UnknownCommand(_))
        ));
    }

    #[test]
    fn rejects_malformed_integer() {
        assert!(matches!(
            parse_line("L B 1 oops 10"),
            Err(ParseError::BadInteger { field: "price", .. })
        ));
    }
}
