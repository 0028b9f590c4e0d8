//! Canonical byte layouts signed by the oracle.
//!
//! Fields are fixed-width and written in a fixed order with no padding and no
//! length prefixes, so the engine can rebuild the exact bytes from its own
//! records and compare signatures instead of parsing anything the client sends.

use anchor_lang::prelude::*;

use crate::constants::{DICE_DOMAIN_TAG, WITHDRAW_DOMAIN_TAG};
use crate::signature::{SignatureVerifier, SIGNATURE_LEN};

struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn pubkey(&mut self) -> Pubkey {
        Pubkey::new_from_array(self.take::<32>())
    }

    fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    fn u64(&mut self) -> u64 {
        u64::from_le_bytes(self.take::<8>())
    }

    fn i64(&mut self) -> i64 {
        i64::from_le_bytes(self.take::<8>())
    }
}

/// The fields of a bet attestation, in signing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BetAttestation {
    pub program_id: Pubkey,
    pub vault: Pubkey,
    pub player: Pubkey,
    pub entry_amount: u64,
    pub side_or_type: u8,
    pub target: u8,
    pub outcome: u8,
    pub payout: u64,
    pub nonce: u64,
    pub expiry: i64,
}

impl BetAttestation {
    pub const LEN: usize = DICE_DOMAIN_TAG.len() + 32 * 3 + 8 + 1 + 1 + 1 + 8 + 8 + 8;

    pub fn encode(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        let mut w = Writer::new(&mut out);
        w.put(DICE_DOMAIN_TAG);
        w.put(self.program_id.as_ref());
        w.put(self.vault.as_ref());
        w.put(self.player.as_ref());
        w.put(&self.entry_amount.to_le_bytes());
        w.put(&[self.side_or_type]);
        w.put(&[self.target]);
        w.put(&[self.outcome]);
        w.put(&self.payout.to_le_bytes());
        w.put(&self.nonce.to_le_bytes());
        w.put(&self.expiry.to_le_bytes());
        out
    }

    /// Returns `None` unless `bytes` is exactly one bet attestation.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::LEN {
            return None;
        }
        let mut r = Reader::new(bytes);
        if r.take::<7>() != *DICE_DOMAIN_TAG {
            return None;
        }
        Some(Self {
            program_id: r.pubkey(),
            vault: r.pubkey(),
            player: r.pubkey(),
            entry_amount: r.u64(),
            side_or_type: r.u8(),
            target: r.u8(),
            outcome: r.u8(),
            payout: r.u64(),
            nonce: r.u64(),
            expiry: r.i64(),
        })
    }

    pub fn verify<V: SignatureVerifier>(
        &self,
        signature: &[u8; SIGNATURE_LEN],
        pubkey: &Pubkey,
        verifier: &V,
    ) -> bool {
        verifier.verify(&self.encode(), signature, pubkey)
    }
}

/// The fields of a withdrawal approval, in signing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalApproval {
    pub program_id: Pubkey,
    pub player: Pubkey,
    pub amount: u64,
    pub attestation_nonce: u64,
}

impl WithdrawalApproval {
    pub const LEN: usize = WITHDRAW_DOMAIN_TAG.len() + 32 * 2 + 8 + 8;

    pub fn encode(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        let mut w = Writer::new(&mut out);
        w.put(WITHDRAW_DOMAIN_TAG);
        w.put(self.program_id.as_ref());
        w.put(self.player.as_ref());
        w.put(&self.amount.to_le_bytes());
        w.put(&self.attestation_nonce.to_le_bytes());
        out
    }

    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::LEN {
            return None;
        }
        let mut r = Reader::new(bytes);
        if r.take::<11>() != *WITHDRAW_DOMAIN_TAG {
            return None;
        }
        Some(Self {
            program_id: r.pubkey(),
            player: r.pubkey(),
            amount: r.u64(),
            attestation_nonce: r.u64(),
        })
    }

    pub fn verify<V: SignatureVerifier>(
        &self,
        signature: &[u8; SIGNATURE_LEN],
        pubkey: &Pubkey,
        verifier: &V,
    ) -> bool {
        verifier.verify(&self.encode(), signature, pubkey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::DalekVerifier;
    use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer};

    fn oracle() -> (Keypair, Pubkey) {
        let secret = SecretKey::from_bytes(&[42; 32]).unwrap();
        let public = PublicKey::from(&secret);
        let key = Pubkey::new_from_array(public.to_bytes());
        (Keypair { secret, public }, key)
    }

    fn sample() -> BetAttestation {
        BetAttestation {
            program_id: Pubkey::new_from_array([1; 32]),
            vault: Pubkey::new_from_array([2; 32]),
            player: Pubkey::new_from_array([3; 32]),
            entry_amount: 1_000_000,
            side_or_type: 0,
            target: 55,
            outcome: 17,
            payout: 18_333,
            nonce: 7,
            expiry: 1_700_000_300,
        }
    }

    #[test]
    fn bet_layout_is_fixed() {
        assert_eq!(BetAttestation::LEN, 138);
        let bytes = sample().encode();

        assert_eq!(&bytes[..7], b"DICE_V1");
        assert_eq!(&bytes[7..39], &[1; 32]);
        assert_eq!(&bytes[39..71], &[2; 32]);
        assert_eq!(&bytes[71..103], &[3; 32]);
        assert_eq!(&bytes[103..111], &1_000_000u64.to_le_bytes());
        assert_eq!(bytes[111], 0);
        assert_eq!(bytes[112], 55);
        assert_eq!(bytes[113], 17);
        assert_eq!(&bytes[114..122], &18_333u64.to_le_bytes());
        assert_eq!(&bytes[122..130], &7u64.to_le_bytes());
        assert_eq!(&bytes[130..138], &1_700_000_300i64.to_le_bytes());
    }

    #[test]
    fn negative_expiry_is_twos_complement() {
        let mut fields = sample();
        fields.expiry = -1;
        assert_eq!(&fields.encode()[130..], &[0xff; 8]);
    }

    #[test]
    fn decode_inverts_encode_and_rejects_foreign_bytes() {
        let fields = sample();
        assert_eq!(BetAttestation::decode(&fields.encode()), Some(fields));

        let mut bytes = fields.encode();
        bytes[0] = b'X';
        assert_eq!(BetAttestation::decode(&bytes), None);
        assert_eq!(BetAttestation::decode(&bytes[..137]), None);
    }

    #[test]
    fn withdrawal_layout_is_fixed_and_domain_separated() {
        let approval = WithdrawalApproval {
            program_id: Pubkey::new_from_array([1; 32]),
            player: Pubkey::new_from_array([3; 32]),
            amount: 500,
            attestation_nonce: 2,
        };
        let bytes = approval.encode();
        assert_eq!(WithdrawalApproval::LEN, 91);
        assert_eq!(&bytes[..11], b"WITHDRAW_V1");
        assert_eq!(&bytes[75..83], &500u64.to_le_bytes());
        assert_eq!(&bytes[83..91], &2u64.to_le_bytes());
        assert_eq!(WithdrawalApproval::decode(&bytes), Some(approval));
        assert_eq!(BetAttestation::decode(&bytes), None);
    }

    #[test]
    fn verify_binds_every_field() {
        let (kp, key) = oracle();
        let fields = sample();
        let signature = kp.sign(&fields.encode()).to_bytes();
        assert!(fields.verify(&signature, &key, &DalekVerifier));

        let tampered = [
            BetAttestation { entry_amount: fields.entry_amount + 1, ..fields },
            BetAttestation { side_or_type: 1, ..fields },
            BetAttestation { target: 56, ..fields },
            BetAttestation { outcome: 18, ..fields },
            BetAttestation { payout: fields.payout + 1, ..fields },
            BetAttestation { nonce: 8, ..fields },
            BetAttestation { expiry: fields.expiry + 1, ..fields },
            BetAttestation { player: Pubkey::new_from_array([4; 32]), ..fields },
            BetAttestation { vault: Pubkey::new_from_array([5; 32]), ..fields },
            BetAttestation { program_id: Pubkey::new_from_array([6; 32]), ..fields },
        ];
        for t in tampered {
            assert!(!t.verify(&signature, &key, &DalekVerifier), "{:?}", t);
        }
    }
}
