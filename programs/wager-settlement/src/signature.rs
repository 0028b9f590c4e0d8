//! Signature checks behind a single seam.
//!
//! On-chain, the ed25519 precompile verifies the oracle's signature in an
//! earlier instruction of the same transaction; the program then only has to
//! confirm that the precompile covered exactly the expected key, signature and
//! message. Off-chain builds verify directly with `ed25519-dalek`.

use anchor_lang::prelude::*;
use solana_program::{
    ed25519_program,
    sysvar::instructions::{load_current_index_checked, load_instruction_at_checked},
};

use crate::error::ErrorCode;

pub const SIGNATURE_LEN: usize = 64;
pub const PUBKEY_LEN: usize = 32;

const OFFSETS_START: usize = 2;
const OFFSETS_LEN: usize = 14;
// Instruction index the precompile uses for "data lives in this instruction".
const THIS_INSTRUCTION: u16 = u16::MAX;

pub trait SignatureVerifier {
    fn verify(&self, message: &[u8], signature: &[u8; SIGNATURE_LEN], pubkey: &Pubkey) -> bool;
}

/// One (key, signature, message) triple the ed25519 precompile has verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrecompiledSignature {
    pub pubkey: Pubkey,
    pub signature: [u8; SIGNATURE_LEN],
    pub message: Vec<u8>,
}

/// All triples verified by ed25519 precompile instructions preceding the
/// current instruction.
#[derive(Clone, Debug, Default)]
pub struct PrecompiledSignatures(pub Vec<PrecompiledSignature>);

impl SignatureVerifier for PrecompiledSignatures {
    fn verify(&self, message: &[u8], signature: &[u8; SIGNATURE_LEN], pubkey: &Pubkey) -> bool {
        self.0.iter().any(|entry| {
            entry.pubkey == *pubkey
                && entry.signature == *signature
                && entry.message.as_slice() == message
        })
    }
}

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn slice_at(data: &[u8], offset: u16, len: usize) -> Option<&[u8]> {
    let start = offset as usize;
    data.get(start..start.checked_add(len)?)
}

/// Parses the data of an ed25519 precompile instruction.
///
/// Only entries whose key, signature and message all live inside the
/// instruction itself are returned; entries that point into other
/// instructions are skipped.
pub fn parse_ed25519_instruction(data: &[u8]) -> Result<Vec<PrecompiledSignature>> {
    let count = *data
        .first()
        .ok_or_else(|| error!(ErrorCode::InvalidEd25519Instruction))? as usize;

    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let base = OFFSETS_START + i * OFFSETS_LEN;
        let field = |n: usize| {
            read_u16(data, base + n * 2).ok_or_else(|| error!(ErrorCode::InvalidEd25519Instruction))
        };
        let signature_offset = field(0)?;
        let signature_ix = field(1)?;
        let pubkey_offset = field(2)?;
        let pubkey_ix = field(3)?;
        let message_offset = field(4)?;
        let message_len = field(5)?;
        let message_ix = field(6)?;

        if signature_ix != THIS_INSTRUCTION
            || pubkey_ix != THIS_INSTRUCTION
            || message_ix != THIS_INSTRUCTION
        {
            continue;
        }

        let malformed = || error!(ErrorCode::InvalidEd25519Instruction);
        let signature = slice_at(data, signature_offset, SIGNATURE_LEN).ok_or_else(malformed)?;
        let pubkey = slice_at(data, pubkey_offset, PUBKEY_LEN).ok_or_else(malformed)?;
        let message = slice_at(data, message_offset, message_len as usize).ok_or_else(malformed)?;

        let mut sig = [0u8; SIGNATURE_LEN];
        sig.copy_from_slice(signature);
        let mut key = [0u8; PUBKEY_LEN];
        key.copy_from_slice(pubkey);

        entries.push(PrecompiledSignature {
            pubkey: Pubkey::new_from_array(key),
            signature: sig,
            message: message.to_vec(),
        });
    }
    Ok(entries)
}

/// Collects every signature verified by ed25519 precompile instructions that
/// precede the current instruction in this transaction. A transaction without
/// any yields an empty set, which verifies nothing.
pub fn load_precompiled_signatures(sysvar_instructions: &AccountInfo) -> Result<PrecompiledSignatures> {
    let current = load_current_index_checked(sysvar_instructions)?;
    let mut found = Vec::new();
    for index in 0..current {
        let ix = load_instruction_at_checked(index as usize, sysvar_instructions)?;
        if ix.program_id != ed25519_program::ID {
            continue;
        }
        found.extend(parse_ed25519_instruction(&ix.data)?);
    }
    Ok(PrecompiledSignatures(found))
}

/// Direct ed25519 verification for off-chain callers such as the oracle
/// backend or a simulator.
#[cfg(not(target_os = "solana"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct DalekVerifier;

#[cfg(not(target_os = "solana"))]
impl SignatureVerifier for DalekVerifier {
    fn verify(&self, message: &[u8], signature: &[u8; SIGNATURE_LEN], pubkey: &Pubkey) -> bool {
        let Ok(key) = ed25519_dalek::PublicKey::from_bytes(pubkey.as_ref()) else {
            return false;
        };
        let Ok(sig) = ed25519_dalek::Signature::try_from(&signature[..]) else {
            return false;
        };
        key.verify_strict(message, &sig).is_ok()
    }
}
