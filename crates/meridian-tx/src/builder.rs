//! Transaction building: validate, compute sign bytes, sign, attach.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use meridian_crypto::{derive_public_key, sign, CurveType};

use crate::msg::{Any, Signature, Transaction, MESSAGE_TYPES};
use crate::tx::sign_bytes;
use crate::TxError;

/// Maximum memo length in characters.
pub const MAX_MEMO_LEN: usize = 200;

/// The inputs needed to assemble a transaction frame.
#[derive(Debug, Clone)]
pub struct TxParams {
    /// Short message type identifier, e.g. `"send"`.
    pub message_type: String,
    /// The already-wrapped payload.
    pub msg: Any,
    /// Transaction fee; must be positive.
    pub fee: u64,
    /// Free-form memo, at most [`MAX_MEMO_LEN`] characters.
    pub memo: String,
    /// Network identifier; must be positive.
    pub network_id: u64,
    /// Chain identifier; must be positive.
    pub chain_id: u64,
    /// Block height the transaction is anchored to; must be positive.
    pub created_height: u64,
    /// Creation time in microseconds since the Unix epoch.
    pub time: u64,
}

/// A signed transaction in the JSON shape the RPC layer submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedEnvelope {
    /// Short message type identifier.
    #[serde(rename = "type")]
    pub message_type: String,
    /// The wrapped payload.
    pub msg: EnvelopePayload,
    /// The attached signature.
    pub signature: EnvelopeSignature,
    /// Creation time in microseconds since the Unix epoch.
    pub time: u64,
    /// Anchoring block height.
    pub created_height: u64,
    /// Transaction fee.
    pub fee: u64,
    /// Memo text.
    pub memo: String,
    #[serde(rename = "networkID")]
    /// Network identifier.
    pub network_id: u64,
    #[serde(rename = "chainID")]
    /// Chain identifier.
    pub chain_id: u64,
}

/// The `Any` payload as hex-encoded JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopePayload {
    /// Fully-qualified type URL.
    pub type_url: String,
    /// Hex-encoded canonical payload bytes.
    pub value: String,
}

/// The signature as hex-encoded JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeSignature {
    /// Hex-encoded public key.
    pub public_key: String,
    /// Hex-encoded signature bytes.
    pub signature: String,
}

/// Current wall-clock time in microseconds since the Unix epoch.
///
/// A clock reading earlier than the epoch saturates to zero rather than
/// panicking; callers stamping transactions should treat a zero as a
/// misconfigured clock.
pub fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

fn validate_params(params: &TxParams) -> Result<(), TxError> {
    if params.message_type.is_empty() {
        return Err(TxError::MissingField("message_type"));
    }
    if !MESSAGE_TYPES.contains(&params.message_type.as_str()) {
        return Err(TxError::UnsupportedMessageType(params.message_type.clone()));
    }
    if params.msg.type_url.is_empty() {
        return Err(TxError::MissingField("msg"));
    }
    if params.fee == 0 {
        return Err(TxError::InvalidParameter {
            field: "fee",
            reason: "must be positive".to_string(),
        });
    }
    if params.created_height == 0 {
        return Err(TxError::InvalidParameter {
            field: "created_height",
            reason: "must be positive".to_string(),
        });
    }
    if params.network_id == 0 {
        return Err(TxError::InvalidParameter {
            field: "network_id",
            reason: "must be positive".to_string(),
        });
    }
    if params.chain_id == 0 {
        return Err(TxError::InvalidParameter {
            field: "chain_id",
            reason: "must be positive".to_string(),
        });
    }
    if params.memo.chars().count() > MAX_MEMO_LEN {
        return Err(TxError::InvalidParameter {
            field: "memo",
            reason: format!("exceeds {} characters", MAX_MEMO_LEN),
        });
    }
    Ok(())
}

/// Assemble, sign, and package a transaction.
///
/// The signature commits to the frame without its signature field; the
/// signature and derived public key are then attached and the whole thing
/// is returned in submit-ready form.
pub fn build_signed_transaction(
    params: TxParams,
    private_key: &[u8],
    curve: CurveType,
) -> Result<SignedEnvelope, TxError> {
    validate_params(&params)?;

    let mut tx = Transaction {
        message_type: params.message_type,
        msg: Some(params.msg),
        signature: None,
        created_height: params.created_height,
        time: params.time,
        fee: params.fee,
        memo: params.memo,
        network_id: params.network_id,
        chain_id: params.chain_id,
    };

    let payload = sign_bytes(&tx);
    let signature = sign(&payload, private_key, curve)?;
    let public_key = derive_public_key(private_key, curve)?;
    tx.signature = Some(Signature {
        public_key: public_key.clone(),
        signature: signature.clone(),
    });

    let msg = tx.msg.take().ok_or(TxError::MissingField("msg"))?;
    Ok(SignedEnvelope {
        message_type: tx.message_type,
        msg: EnvelopePayload {
            type_url: msg.type_url,
            value: hex::encode(msg.value),
        },
        signature: EnvelopeSignature {
            public_key: hex::encode(public_key),
            signature: hex::encode(signature),
        },
        time: tx.time,
        created_height: tx.created_height,
        fee: tx.fee,
        memo: tx.memo,
        network_id: tx.network_id,
        chain_id: tx.chain_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::{MessageSend, ProtocolMessage};
    use crate::tx::wrap_message;
    use meridian_crypto::{derive_address, verify};

    fn send_params() -> TxParams {
        let msg = MessageSend {
            from_address: vec![0x01; 20],
            to_address: vec![0x02; 20],
            amount: 100,
        };
        TxParams {
            message_type: MessageSend::TYPE.to_string(),
            msg: wrap_message(&msg).unwrap(),
            fee: 10_000,
            memo: String::new(),
            network_id: 1,
            chain_id: 1,
            created_height: 42,
            time: 1_700_000_000_000_000,
        }
    }

    #[test]
    fn test_signed_envelope_verifies() {
        let private_key = [0x01u8; 32];
        let envelope =
            build_signed_transaction(send_params(), &private_key, CurveType::Ed25519).unwrap();

        // Reconstruct the frame and check the signature against its
        // sign bytes.
        let tx = Transaction {
            message_type: envelope.message_type.clone(),
            msg: Some(Any {
                type_url: envelope.msg.type_url.clone(),
                value: hex::decode(&envelope.msg.value).unwrap(),
            }),
            signature: None,
            created_height: envelope.created_height,
            time: envelope.time,
            fee: envelope.fee,
            memo: envelope.memo.clone(),
            network_id: envelope.network_id,
            chain_id: envelope.chain_id,
        };
        let payload = sign_bytes(&tx);
        let public_key = hex::decode(&envelope.signature.public_key).unwrap();
        let signature = hex::decode(&envelope.signature.signature).unwrap();
        assert!(verify(&payload, &signature, &public_key, CurveType::Ed25519).unwrap());
    }

    #[test]
    fn test_envelope_json_shape() {
        let private_key = [0x01u8; 32];
        let envelope =
            build_signed_transaction(send_params(), &private_key, CurveType::Ed25519).unwrap();
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["type"], "send");
        assert_eq!(json["msg"]["typeUrl"], "/types.MessageSend");
        assert_eq!(json["networkID"], 1);
        assert_eq!(json["chainID"], 1);
        assert_eq!(json["createdHeight"], 42);
        assert!(json["msg"]["value"].as_str().unwrap().len() > 0);
        assert_eq!(json["signature"]["publicKey"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_rejects_unknown_message_type() {
        let mut params = send_params();
        params.message_type = "teleport".to_string();
        let err = build_signed_transaction(params, &[0x01; 32], CurveType::Ed25519).unwrap_err();
        assert!(matches!(err, TxError::UnsupportedMessageType(t) if t == "teleport"));
    }

    #[test]
    fn test_rejects_zero_fee_and_height() {
        let mut params = send_params();
        params.fee = 0;
        let err = build_signed_transaction(params, &[0x01; 32], CurveType::Ed25519).unwrap_err();
        assert!(matches!(err, TxError::InvalidParameter { field: "fee", .. }));

        let mut params = send_params();
        params.created_height = 0;
        let err = build_signed_transaction(params, &[0x01; 32], CurveType::Ed25519).unwrap_err();
        assert!(matches!(
            err,
            TxError::InvalidParameter {
                field: "created_height",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_oversized_memo() {
        let mut params = send_params();
        params.memo = "x".repeat(MAX_MEMO_LEN + 1);
        let err = build_signed_transaction(params, &[0x01; 32], CurveType::Ed25519).unwrap_err();
        assert!(matches!(err, TxError::InvalidParameter { field: "memo", .. }));

        let mut params = send_params();
        params.memo = "x".repeat(MAX_MEMO_LEN);
        assert!(build_signed_transaction(params, &[0x01; 32], CurveType::Ed25519).is_ok());
    }

    #[test]
    fn test_now_micros_is_past_epoch() {
        // 2020-01-01 in microseconds; a sane clock is well past it, and
        // the saturating zero case can only appear on a pre-epoch clock.
        let t = now_micros();
        assert!(t > 1_577_836_800_000_000);
        assert!(now_micros() >= t);
    }

    #[test]
    fn test_envelope_address_matches_signer() {
        let private_key = [0x01u8; 32];
        let envelope =
            build_signed_transaction(send_params(), &private_key, CurveType::Ed25519).unwrap();
        let public_key = hex::decode(&envelope.signature.public_key).unwrap();
        let addr = derive_address(&public_key, CurveType::Ed25519).unwrap();
        assert_eq!(addr.to_string(), "34750f98bd59fcfc946da45aaabe933be154a4b5");
    }
}
