//! Transaction frame encoding and sign-byte computation.

use prost::Message;

use crate::msg::{Any, ProtocolMessage, Transaction};
use crate::TxError;

/// Pack a protocol message into an [`Any`] envelope.
///
/// The message is validated before packing so malformed payloads never
/// reach the wire.
pub fn wrap_message<M: ProtocolMessage>(msg: &M) -> Result<Any, TxError> {
    msg.validate()?;
    Ok(Any {
        type_url: M::type_url(),
        value: msg.encode_to_vec(),
    })
}

/// Encode a complete transaction frame to canonical bytes.
pub fn encode_transaction(tx: &Transaction) -> Vec<u8> {
    tx.encode_to_vec()
}

/// Compute the bytes a signature commits to.
///
/// This is the frame encoded with the signature field absent entirely.
/// Because the field is an optional submessage, `None` produces no bytes
/// for it at all, so attaching a signature afterward never changes what
/// was signed.
pub fn sign_bytes(tx: &Transaction) -> Vec<u8> {
    let unsigned = Transaction {
        signature: None,
        ..tx.clone()
    };
    unsigned.encode_to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::{MessageSend, Signature};

    fn sample_tx() -> Transaction {
        let msg = MessageSend {
            from_address: vec![0x01; 20],
            to_address: vec![0x02; 20],
            amount: 100,
        };
        Transaction {
            message_type: MessageSend::TYPE.to_string(),
            msg: Some(wrap_message(&msg).unwrap()),
            signature: None,
            created_height: 42,
            time: 1_700_000_000_000_000,
            fee: 10_000,
            memo: String::new(),
            network_id: 1,
            chain_id: 1,
        }
    }

    #[test]
    fn test_sign_bytes_exclude_signature() {
        let unsigned = sample_tx();
        let mut signed = unsigned.clone();
        signed.signature = Some(Signature {
            public_key: vec![0xAA; 32],
            signature: vec![0xBB; 64],
        });

        assert_eq!(sign_bytes(&unsigned), sign_bytes(&signed));
        assert_eq!(sign_bytes(&unsigned), encode_transaction(&unsigned));
        assert!(encode_transaction(&signed).len() > encode_transaction(&unsigned).len());
    }

    #[test]
    fn test_wrap_message_sets_type_url() {
        let msg = MessageSend {
            from_address: vec![0x01; 20],
            to_address: vec![0x02; 20],
            amount: 1,
        };
        let any = wrap_message(&msg).unwrap();
        assert_eq!(any.type_url, "/types.MessageSend");

        let back = MessageSend::decode(any.value.as_slice()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_wrap_message_rejects_invalid() {
        let err = wrap_message(&MessageSend::default()).unwrap_err();
        assert!(matches!(err, TxError::MissingField("from_address")));
    }

    #[test]
    fn test_empty_memo_is_free() {
        let no_memo = sample_tx();
        let mut with_memo = sample_tx();
        with_memo.memo = "m".to_string();
        // One char of memo costs exactly tag + length + payload.
        assert_eq!(
            encode_transaction(&with_memo).len(),
            encode_transaction(&no_memo).len() + 3
        );
    }
}
