// SCRIPT CONSTRUCTION
// Just enough of the script language to build coinbase inputs and
// genesis outputs byte-for-byte.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod opcodes {
    pub const OP_0: u8 = 0x00;
    pub const OP_PUSHDATA1: u8 = 0x4c;
    pub const OP_PUSHDATA2: u8 = 0x4d;
    pub const OP_PUSHDATA4: u8 = 0x4e;
    pub const OP_1NEGATE: u8 = 0x4f;
    pub const OP_1: u8 = 0x51;
    pub const OP_RETURN: u8 = 0x6a;
    pub const OP_CHECKSIG: u8 = 0xac;
}

use opcodes::*;

/// A serialized script.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Script(#[serde(with = "hex::serde")] Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Script(Vec::new())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a raw opcode.
    pub fn push_opcode(mut self, opcode: u8) -> Self {
        self.0.push(opcode);
        self
    }

    /// Append a data push with the minimal length prefix.
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        match data.len() {
            len @ 0..=0x4b => self.0.push(len as u8),
            len @ 0x4c..=0xff => {
                self.0.push(OP_PUSHDATA1);
                self.0.push(len as u8);
            }
            len @ 0x100..=0xffff => {
                self.0.push(OP_PUSHDATA2);
                self.0.extend_from_slice(&(len as u16).to_le_bytes());
            }
            len => {
                self.0.push(OP_PUSHDATA4);
                self.0.extend_from_slice(&(len as u32).to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Append an integer the way the reference node's `push_int64` does:
    /// small values become opcodes, everything else a number push.
    pub fn push_int(self, value: i64) -> Self {
        match value {
            0 => self.push_opcode(OP_0),
            -1 => self.push_opcode(OP_1NEGATE),
            1..=16 => self.push_opcode(OP_1 + (value as u8 - 1)),
            _ => self.push_slice(&script_num(value)),
        }
    }

    /// Append an explicit script-number push. Unlike [`Script::push_int`]
    /// this never collapses small values into opcodes.
    pub fn push_num(self, value: i64) -> Self {
        self.push_slice(&script_num(value))
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", hex::encode(&self.0))
    }
}

/// Minimal little-endian sign-magnitude encoding of a script number.
pub fn script_num(value: i64) -> Vec<u8> {
    if value == 0 {
        return Vec::new();
    }
    let negative = value < 0;
    let mut abs = value.unsigned_abs();
    let mut result = Vec::with_capacity(9);
    while abs > 0 {
        result.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    if let Some(last) = result.last_mut() {
        if *last & 0x80 != 0 {
            result.push(if negative { 0x80 } else { 0 });
        } else if negative {
            *last |= 0x80;
        }
    }
    result
}
