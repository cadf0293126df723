use std::fmt;
use std::str::FromStr;

use crate::ber::{BerError, BerResult};

/// An object identifier: at least two arcs, arc 0 in {0, 1, 2}, arc 1 below
/// 40 under arcs 0 and 1. Construction goes through [`Oid::new`] so every
/// value in the program satisfies those rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: Vec<u32>,
}

impl Oid {
    pub fn new(arcs: Vec<u32>) -> BerResult<Self> {
        if arcs.len() < 2 {
            return Err(BerError::MalformedOid);
        }
        match arcs[0] {
            0 | 1 if arcs[1] <= 39 => {}
            // 40 * 2 + arc1 must still pack into the single leading octet.
            2 if arcs[1] <= 175 => {}
            _ => return Err(BerError::MalformedOid),
        }
        Ok(Self { arcs })
    }

    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// True when `self` sits at or below `root` in the MIB tree.
    pub fn is_under(&self, root: &Oid) -> bool {
        self.arcs.starts_with(&root.arcs)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{arc}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Oid {
    type Err = BerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s
            .split('.')
            .filter(|part| !part.is_empty()) // allow a leading dot, ".1.3.6"
            .map(|part| part.parse::<u32>().map_err(|_| BerError::MalformedOid))
            .collect::<Result<Vec<u32>, _>>()?;
        Oid::new(arcs)
    }
}

/// First two arcs: packed into one byte as 40 * arc0 + arc1.
/// All other arcs: split into 7-bit digits, most significant first, with the
/// high bit set on every digit except the last.
pub fn decode_oid(input: &[u8]) -> BerResult<Oid> {
    if input.is_empty() {
        return Err(BerError::BadLength);
    }

    let mut arcs = Vec::with_capacity(input.len() + 1);

    // --- 1. first byte unpacks to two arcs. Values of 80 and above all
    // belong to the joint-iso arc, so arc 0 never exceeds 2.
    let b1 = input[0];
    if b1 >= 80 {
        arcs.push(2);
        arcs.push(u32::from(b1 - 80));
    } else {
        arcs.push(u32::from(b1 / 40));
        arcs.push(u32::from(b1 % 40));
    }

    // --- 2. rest of the bytes
    let mut current = &input[1..];
    while !current.is_empty() {
        let (arc, rest) = decode_oid_arc(current)?;
        arcs.push(arc);
        current = rest;
    }

    // Arcs straight off the wire already satisfy the constructor rules.
    Ok(Oid { arcs })
}

fn decode_oid_arc(input: &[u8]) -> BerResult<(u32, &[u8])> {
    let mut arc: u32 = 0;

    for (i, &byte) in input.iter().enumerate() {
        if arc > u32::MAX >> 7 {
            return Err(BerError::MalformedOid);
        }

        arc = (arc << 7) | u32::from(byte & 0x7F);

        if byte & 0x80 == 0 {
            // continuation bit clear, this arc is complete
            return Ok((arc, &input[i + 1..]));
        }
    }
    // ran out of bytes mid-continuation
    Err(BerError::MalformedOid)
}
