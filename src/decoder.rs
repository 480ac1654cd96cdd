/// Fixed-offset message decoder
///
/// Reads the type discriminator at payload offset 8 and extracts the Add Order
/// and Execute Order fields by position. Nothing is delimiter-scanned and no
/// allocation happens during decode.

use crate::framer::frame;
use crate::protocol::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("record too short: need {need} bytes, have {have}")]
    BufferTooSmall { need: usize, have: usize },

    #[error("non-numeric {field} field at offset {offset}")]
    InvalidNumeric { field: &'static str, offset: usize },

    #[error("non-ASCII {field} field at offset {offset}")]
    InvalidField { field: &'static str, offset: usize },
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// A decoded message. Types other than Add/Execute keep only their type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    AddOrder(AddOrder),
    ExecuteOrder(ExecuteOrder),
    Other(u8),
}

impl Message {
    /// Recognized message type, None for pass-through messages
    pub fn message_type(&self) -> Option<MessageType> {
        match self {
            Message::AddOrder(_) => Some(MessageType::AddOrder),
            Message::ExecuteOrder(_) => Some(MessageType::ExecuteOrder),
            Message::Other(_) => None,
        }
    }

    /// Raw discriminator byte as it appeared on the wire
    pub fn type_byte(&self) -> u8 {
        match self {
            Message::AddOrder(_) => MessageType::AddOrder as u8,
            Message::ExecuteOrder(_) => MessageType::ExecuteOrder as u8,
            Message::Other(b) => *b,
        }
    }

    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            Message::AddOrder(m) => Some(m.order_id),
            Message::ExecuteOrder(m) => Some(m.order_id),
            Message::Other(_) => None,
        }
    }
}

/// Parse a zero-padded unsigned decimal field
fn parse_numeric(field: &[u8], name: &'static str, offset: usize) -> DecodeResult<u32> {
    if field.is_empty() {
        return Err(DecodeError::InvalidNumeric { field: name, offset });
    }
    field.iter().try_fold(0u32, |acc, &b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + (b - b'0') as u32)
        } else {
            Err(DecodeError::InvalidNumeric { field: name, offset })
        }
    })
}

fn require_len(payload: &[u8], need: usize) -> DecodeResult<()> {
    if payload.len() < need {
        return Err(DecodeError::BufferTooSmall {
            need,
            have: payload.len(),
        });
    }
    Ok(())
}

fn read_order_id(payload: &[u8]) -> DecodeResult<OrderId> {
    let field = &payload[ORDER_ID_OFFSET..ORDER_ID_OFFSET + ORDER_ID_LEN];
    OrderId::from_bytes(field).ok_or(DecodeError::InvalidField {
        field: "order_id",
        offset: ORDER_ID_OFFSET,
    })
}

pub struct Decoder;

impl Decoder {
    /// Decode a framed payload (session marker already removed)
    pub fn decode(payload: &[u8]) -> DecodeResult<Message> {
        require_len(payload, MIN_HEADER_LEN)?;

        let type_byte = payload[TYPE_OFFSET];
        let msg_type = match MessageType::from_u8(type_byte) {
            Some(t) => t,
            None => return Ok(Message::Other(type_byte)),
        };

        match msg_type {
            MessageType::AddOrder => {
                require_len(payload, MIN_ADD_ORDER_LEN)?;
                let order_id = read_order_id(payload)?;
                let shares = parse_numeric(
                    &payload[ADD_SHARES_OFFSET..ADD_SHARES_OFFSET + SHARES_LEN],
                    "shares",
                    ADD_SHARES_OFFSET,
                )?;
                let symbol = Symbol::from_padded(
                    &payload[ADD_SYMBOL_OFFSET..ADD_SYMBOL_OFFSET + SYMBOL_LEN],
                )
                .ok_or(DecodeError::InvalidField {
                    field: "symbol",
                    offset: ADD_SYMBOL_OFFSET,
                })?;

                Ok(Message::AddOrder(AddOrder {
                    order_id,
                    shares,
                    symbol,
                }))
            }
            MessageType::ExecuteOrder => {
                require_len(payload, MIN_EXECUTE_ORDER_LEN)?;
                let order_id = read_order_id(payload)?;
                let executed_shares = parse_numeric(
                    &payload[EXEC_SHARES_OFFSET..EXEC_SHARES_OFFSET + SHARES_LEN],
                    "executed_shares",
                    EXEC_SHARES_OFFSET,
                )?;

                Ok(Message::ExecuteOrder(ExecuteOrder {
                    order_id,
                    executed_shares,
                }))
            }
        }
    }

    /// Frame then decode a raw record
    pub fn decode_record(record: &[u8]) -> DecodeResult<Message> {
        Self::decode(frame(record))
    }

    /// Decode a sequence of raw records in order
    /// Calls callback for each message; stops on error or if callback returns false
    pub fn decode_stream<I, R, F>(records: I, mut callback: F) -> DecodeResult<usize>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
        F: FnMut(&Message) -> bool,
    {
        let mut count = 0;

        for record in records {
            let msg = Self::decode_record(record.as_ref())?;
            count += 1;
            if !callback(&msg) {
                break;
            }
        }

        Ok(count)
    }
}
