/// Fixed-layout PITCH text message format
///
/// Every record is a line of ASCII. Some transports prefix the line with a
/// single session marker byte `S`, which is not part of the message.
///
/// Common prefix: 9 bytes
///   - timestamp: 8 chars (not decoded)
///   - msg_type: 1 char
///
/// Add Order ('A'):
///   [timestamp(8)][type(1)][order_id(12)][side(1)][shares(6)][symbol(6)]...
///
/// Execute Order ('E'):
///   [timestamp(8)][type(1)][order_id(12)][executed_shares(6)]...

use std::fmt;

pub const SESSION_MARKER: u8 = b'S';

pub const TYPE_OFFSET: usize = 8;
pub const ORDER_ID_OFFSET: usize = 9;
pub const ORDER_ID_LEN: usize = 12;

pub const ADD_SHARES_OFFSET: usize = 22;
pub const SHARES_LEN: usize = 6;
pub const ADD_SYMBOL_OFFSET: usize = 28;
pub const SYMBOL_LEN: usize = 6;

pub const EXEC_SHARES_OFFSET: usize = 21;

/// Minimum payload length for each decoded layout
pub const MIN_HEADER_LEN: usize = TYPE_OFFSET + 1;
pub const MIN_ADD_ORDER_LEN: usize = ADD_SYMBOL_OFFSET + SYMBOL_LEN;
pub const MIN_EXECUTE_ORDER_LEN: usize = EXEC_SHARES_OFFSET + SHARES_LEN;

// Compile-time checks that the field layouts do not overlap
const _: () = {
    assert!(ORDER_ID_OFFSET + ORDER_ID_LEN <= ADD_SHARES_OFFSET);
    assert!(ADD_SHARES_OFFSET + SHARES_LEN == ADD_SYMBOL_OFFSET);
    assert!(ORDER_ID_OFFSET + ORDER_ID_LEN == EXEC_SHARES_OFFSET);
    assert!(MIN_ADD_ORDER_LEN == 34);
    assert!(MIN_EXECUTE_ORDER_LEN == 27);
};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    AddOrder = b'A',
    ExecuteOrder = b'E',
}

impl MessageType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            b'A' => Some(MessageType::AddOrder),
            b'E' => Some(MessageType::ExecuteOrder),
            _ => None,
        }
    }
}

/// 12-character order identifier, kept as raw ASCII bytes
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId([u8; ORDER_ID_LEN]);

impl OrderId {
    /// Build from a field slice. Returns None unless it is exactly 12 ASCII bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if !bytes.is_ascii() {
            return None;
        }
        let raw: [u8; ORDER_ID_LEN] = bytes.try_into().ok()?;
        Some(OrderId(raw))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // ASCII checked on construction
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderId({:?})", self.as_str())
    }
}

/// Stock symbol with all padding spaces removed (at most 6 chars)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    len: u8,
    bytes: [u8; SYMBOL_LEN],
}

impl Symbol {
    /// Build from a padded field. Every space is dropped, not only trailing ones.
    pub fn from_padded(field: &[u8]) -> Option<Self> {
        if field.len() > SYMBOL_LEN || !field.is_ascii() {
            return None;
        }
        let mut bytes = [0u8; SYMBOL_LEN];
        let mut len = 0;
        for &b in field.iter().filter(|&&b| b != b' ') {
            bytes[len] = b;
            len += 1;
        }
        Some(Symbol { len: len as u8, bytes })
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// Lexical order of the visible text, not of the fixed-width storage
impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

/// Announces a new order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOrder {
    pub order_id: OrderId,
    pub shares: u32,
    pub symbol: Symbol,
}

/// Reports shares filled against a previously added order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOrder {
    pub order_id: OrderId,
    pub executed_shares: u32,
}
