//! Protocol message definitions, proto package `types`.
//!
//! Each message is a hand-written prost struct whose tags define the
//! canonical wire layout the remote ledger verifies against. proto3
//! encoding rules apply: a field holding its zero value (0, false, empty
//! string/bytes/list) is omitted from the output entirely. Tag numbers are
//! part of the protocol; changing them breaks every signature.

use prost::Message;

use crate::TxError;

/// A validated protocol message that can be packed into an [`Any`].
pub trait ProtocolMessage: Message + prost::Name + Default {
    /// The short type identifier carried in the transaction frame
    /// (for example `"send"` or `"editStake"`).
    const TYPE: &'static str;

    /// Check the message's required fields, naming the first missing one.
    fn validate(&self) -> Result<(), TxError>;
}

/// The short type identifiers of every supported message, in one place so
/// frame validation can reject unknown types by name.
pub const MESSAGE_TYPES: [&str; 12] = [
    MessageSend::TYPE,
    MessageStake::TYPE,
    MessageEditStake::TYPE,
    MessageUnstake::TYPE,
    MessagePause::TYPE,
    MessageUnpause::TYPE,
    MessageChangeParameter::TYPE,
    MessageDaoTransfer::TYPE,
    MessageSubsidy::TYPE,
    MessageCreateOrder::TYPE,
    MessageEditOrder::TYPE,
    MessageDeleteOrder::TYPE,
];

/// Implement `prost::Name` for a message in the `types` package.
macro_rules! impl_name {
    ($t:ty, $name:literal) => {
        impl prost::Name for $t {
            const NAME: &'static str = $name;
            const PACKAGE: &'static str = "types";

            fn full_name() -> String {
                concat!("types.", $name).to_string()
            }

            fn type_url() -> String {
                concat!("/types.", $name).to_string()
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Envelope types
// ---------------------------------------------------------------------------

/// A payload envelope: the fully-qualified type name of a message plus its
/// canonical encoding.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Any {
    /// Fully-qualified type URL, e.g. `/types.MessageSend`.
    #[prost(string, tag = "1")]
    pub type_url: String,
    /// The canonical proto3 encoding of the payload.
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}
impl_name!(Any, "Any");

/// A signature bound to the public key that produced it.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Signature {
    /// The signer's public key bytes.
    #[prost(bytes = "vec", tag = "1")]
    pub public_key: Vec<u8>,
    /// The signature bytes (64 or 96 depending on curve).
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
}
impl_name!(Signature, "Signature");

/// The outer transaction frame the ledger signs and verifies.
///
/// Sign bytes are this frame encoded with `signature` set to `None`, which
/// omits the field entirely (not a zero-length submessage). A populated
/// signature is attached afterward and must never feed back into a second
/// sign-byte computation.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    /// Short message type identifier, e.g. `"send"`.
    #[prost(string, tag = "1")]
    pub message_type: String,
    /// The wrapped message payload.
    #[prost(message, optional, tag = "2")]
    pub msg: Option<Any>,
    /// The signature; absent while computing sign bytes.
    #[prost(message, optional, tag = "3")]
    pub signature: Option<Signature>,
    /// Block height the transaction was created at.
    #[prost(uint64, tag = "4")]
    pub created_height: u64,
    /// Wall-clock creation time in microseconds since the Unix epoch.
    #[prost(uint64, tag = "5")]
    pub time: u64,
    /// Transaction fee.
    #[prost(uint64, tag = "6")]
    pub fee: u64,
    /// Free-form memo, at most 200 characters.
    #[prost(string, tag = "7")]
    pub memo: String,
    /// Network identifier.
    #[prost(uint64, tag = "8")]
    pub network_id: u64,
    /// Chain identifier.
    #[prost(uint64, tag = "9")]
    pub chain_id: u64,
}
impl_name!(Transaction, "Transaction");

// ---------------------------------------------------------------------------
// Value wrappers for parameter changes
// ---------------------------------------------------------------------------

/// An `Any`-packable string value.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StringWrapper {
    /// The wrapped value.
    #[prost(string, tag = "1")]
    pub value: String,
}
impl_name!(StringWrapper, "StringWrapper");

/// An `Any`-packable unsigned integer value.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UInt64Wrapper {
    /// The wrapped value.
    #[prost(uint64, tag = "1")]
    pub value: u64,
}
impl_name!(UInt64Wrapper, "UInt64Wrapper");

// ---------------------------------------------------------------------------
// Message shapes
// ---------------------------------------------------------------------------

/// Transfer tokens between accounts.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageSend {
    /// Sender address (20 bytes).
    #[prost(bytes = "vec", tag = "1")]
    pub from_address: Vec<u8>,
    /// Recipient address (20 bytes).
    #[prost(bytes = "vec", tag = "2")]
    pub to_address: Vec<u8>,
    /// Amount to transfer.
    #[prost(uint64, tag = "3")]
    pub amount: u64,
}
impl_name!(MessageSend, "MessageSend");

impl ProtocolMessage for MessageSend {
    const TYPE: &'static str = "send";

    fn validate(&self) -> Result<(), TxError> {
        if self.from_address.is_empty() {
            return Err(TxError::MissingField("from_address"));
        }
        if self.to_address.is_empty() {
            return Err(TxError::MissingField("to_address"));
        }
        if self.amount == 0 {
            return Err(TxError::MissingField("amount"));
        }
        Ok(())
    }
}

/// Stake a validator (or delegate to one).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageStake {
    /// The validator's public key.
    #[prost(bytes = "vec", tag = "1")]
    pub public_key: Vec<u8>,
    /// Amount to stake.
    #[prost(uint64, tag = "2")]
    pub amount: u64,
    /// Committee chain ids the stake is restricted to.
    #[prost(uint64, repeated, tag = "3")]
    pub committees: Vec<u64>,
    /// The validator's network address; empty when delegating.
    #[prost(string, tag = "4")]
    pub net_address: String,
    /// Address rewards are paid to.
    #[prost(bytes = "vec", tag = "5")]
    pub output_address: Vec<u8>,
    /// Delegate without running validator infrastructure.
    #[prost(bool, tag = "6")]
    pub delegate: bool,
    /// Automatically re-stake earned rewards.
    #[prost(bool, tag = "7")]
    pub compound: bool,
}
impl_name!(MessageStake, "MessageStake");

impl ProtocolMessage for MessageStake {
    const TYPE: &'static str = "stake";

    fn validate(&self) -> Result<(), TxError> {
        if self.public_key.is_empty() {
            return Err(TxError::MissingField("public_key"));
        }
        if self.amount == 0 {
            return Err(TxError::MissingField("amount"));
        }
        if self.output_address.is_empty() {
            return Err(TxError::MissingField("output_address"));
        }
        // A non-delegate validator must be reachable.
        if !self.delegate && self.net_address.is_empty() {
            return Err(TxError::MissingField("net_address"));
        }
        Ok(())
    }
}

/// Edit the parameters of an existing stake.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageEditStake {
    /// The validator's operator address.
    #[prost(bytes = "vec", tag = "1")]
    pub address: Vec<u8>,
    /// New stake amount (may only grow).
    #[prost(uint64, tag = "2")]
    pub amount: u64,
    /// Updated committee chain ids.
    #[prost(uint64, repeated, tag = "3")]
    pub committees: Vec<u64>,
    /// Updated network address.
    #[prost(string, tag = "4")]
    pub net_address: String,
    /// Updated reward output address.
    #[prost(bytes = "vec", tag = "5")]
    pub output_address: Vec<u8>,
    /// Updated compounding flag.
    #[prost(bool, tag = "6")]
    pub compound: bool,
}
impl_name!(MessageEditStake, "MessageEditStake");

impl ProtocolMessage for MessageEditStake {
    const TYPE: &'static str = "editStake";

    fn validate(&self) -> Result<(), TxError> {
        if self.address.is_empty() {
            return Err(TxError::MissingField("address"));
        }
        if self.amount == 0 {
            return Err(TxError::MissingField("amount"));
        }
        Ok(())
    }
}

/// Begin unbonding a stake.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageUnstake {
    /// The validator's operator address.
    #[prost(bytes = "vec", tag = "1")]
    pub address: Vec<u8>,
}
impl_name!(MessageUnstake, "MessageUnstake");

impl ProtocolMessage for MessageUnstake {
    const TYPE: &'static str = "unstake";

    fn validate(&self) -> Result<(), TxError> {
        if self.address.is_empty() {
            return Err(TxError::MissingField("address"));
        }
        Ok(())
    }
}

/// Pause a validator.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessagePause {
    /// The validator's operator address.
    #[prost(bytes = "vec", tag = "1")]
    pub address: Vec<u8>,
}
impl_name!(MessagePause, "MessagePause");

impl ProtocolMessage for MessagePause {
    const TYPE: &'static str = "pause";

    fn validate(&self) -> Result<(), TxError> {
        if self.address.is_empty() {
            return Err(TxError::MissingField("address"));
        }
        Ok(())
    }
}

/// Unpause a previously paused validator.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageUnpause {
    /// The validator's operator address.
    #[prost(bytes = "vec", tag = "1")]
    pub address: Vec<u8>,
}
impl_name!(MessageUnpause, "MessageUnpause");

impl ProtocolMessage for MessageUnpause {
    const TYPE: &'static str = "unpause";

    fn validate(&self) -> Result<(), TxError> {
        if self.address.is_empty() {
            return Err(TxError::MissingField("address"));
        }
        Ok(())
    }
}

/// Propose a governance parameter change.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageChangeParameter {
    /// The parameter namespace, e.g. `"cons"` or `"fee"`.
    #[prost(string, tag = "1")]
    pub parameter_space: String,
    /// The parameter key within the namespace.
    #[prost(string, tag = "2")]
    pub parameter_key: String,
    /// The new value, packed as a [`StringWrapper`] or [`UInt64Wrapper`].
    #[prost(message, optional, tag = "3")]
    pub parameter_value: Option<Any>,
    /// First height the change is voted on.
    #[prost(uint64, tag = "4")]
    pub start_height: u64,
    /// Last height the change is voted on.
    #[prost(uint64, tag = "5")]
    pub end_height: u64,
    /// The proposer address.
    #[prost(bytes = "vec", tag = "6")]
    pub signer: Vec<u8>,
}
impl_name!(MessageChangeParameter, "MessageChangeParameter");

impl MessageChangeParameter {
    /// Pack a string parameter value.
    pub fn string_value(value: impl Into<String>) -> Any {
        let wrapper = StringWrapper { value: value.into() };
        Any {
            type_url: <StringWrapper as prost::Name>::type_url(),
            value: wrapper.encode_to_vec(),
        }
    }

    /// Pack an unsigned integer parameter value.
    pub fn uint64_value(value: u64) -> Any {
        let wrapper = UInt64Wrapper { value };
        Any {
            type_url: <UInt64Wrapper as prost::Name>::type_url(),
            value: wrapper.encode_to_vec(),
        }
    }
}

impl ProtocolMessage for MessageChangeParameter {
    const TYPE: &'static str = "changeParameter";

    fn validate(&self) -> Result<(), TxError> {
        if self.parameter_space.is_empty() {
            return Err(TxError::MissingField("parameter_space"));
        }
        if self.parameter_key.is_empty() {
            return Err(TxError::MissingField("parameter_key"));
        }
        if self.parameter_value.is_none() {
            return Err(TxError::MissingField("parameter_value"));
        }
        if self.signer.is_empty() {
            return Err(TxError::MissingField("signer"));
        }
        if self.end_height < self.start_height {
            return Err(TxError::InvalidParameter {
                field: "end_height",
                reason: "must not precede start_height".to_string(),
            });
        }
        Ok(())
    }
}

/// Transfer funds out of the treasury pool.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageDaoTransfer {
    /// Recipient address.
    #[prost(bytes = "vec", tag = "1")]
    pub address: Vec<u8>,
    /// Amount to transfer.
    #[prost(uint64, tag = "2")]
    pub amount: u64,
    /// First height the transfer is voted on.
    #[prost(uint64, tag = "3")]
    pub start_height: u64,
    /// Last height the transfer is voted on.
    #[prost(uint64, tag = "4")]
    pub end_height: u64,
}
impl_name!(MessageDaoTransfer, "MessageDAOTransfer");

impl ProtocolMessage for MessageDaoTransfer {
    const TYPE: &'static str = "daoTransfer";

    fn validate(&self) -> Result<(), TxError> {
        if self.address.is_empty() {
            return Err(TxError::MissingField("address"));
        }
        if self.amount == 0 {
            return Err(TxError::MissingField("amount"));
        }
        Ok(())
    }
}

/// Subsidize a committee's reward pool.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageSubsidy {
    /// The funding address.
    #[prost(bytes = "vec", tag = "1")]
    pub address: Vec<u8>,
    /// The committee chain id receiving the subsidy.
    #[prost(uint64, tag = "2")]
    pub chain_id: u64,
    /// Amount contributed.
    #[prost(uint64, tag = "3")]
    pub amount: u64,
    /// Optional opcode forwarded to the committee.
    #[prost(string, tag = "4")]
    pub opcode: String,
}
impl_name!(MessageSubsidy, "MessageSubsidy");

impl ProtocolMessage for MessageSubsidy {
    const TYPE: &'static str = "subsidy";

    fn validate(&self) -> Result<(), TxError> {
        if self.address.is_empty() {
            return Err(TxError::MissingField("address"));
        }
        if self.chain_id == 0 {
            return Err(TxError::MissingField("chain_id"));
        }
        if self.amount == 0 {
            return Err(TxError::MissingField("amount"));
        }
        Ok(())
    }
}

/// Create a cross-chain exchange order.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageCreateOrder {
    /// The counter-asset chain id.
    #[prost(uint64, tag = "1")]
    pub chain_id: u64,
    /// Amount of the native asset offered.
    #[prost(uint64, tag = "2")]
    pub amount_for_sale: u64,
    /// Amount of the counter asset requested.
    #[prost(uint64, tag = "3")]
    pub requested_amount: u64,
    /// Address receiving the counter asset.
    #[prost(bytes = "vec", tag = "4")]
    pub seller_receive_address: Vec<u8>,
    /// Address escrowing the native asset.
    #[prost(bytes = "vec", tag = "5")]
    pub sellers_send_address: Vec<u8>,
}
impl_name!(MessageCreateOrder, "MessageCreateOrder");

impl ProtocolMessage for MessageCreateOrder {
    const TYPE: &'static str = "createOrder";

    fn validate(&self) -> Result<(), TxError> {
        if self.chain_id == 0 {
            return Err(TxError::MissingField("chain_id"));
        }
        if self.amount_for_sale == 0 {
            return Err(TxError::MissingField("amount_for_sale"));
        }
        if self.requested_amount == 0 {
            return Err(TxError::MissingField("requested_amount"));
        }
        if self.seller_receive_address.is_empty() {
            return Err(TxError::MissingField("seller_receive_address"));
        }
        if self.sellers_send_address.is_empty() {
            return Err(TxError::MissingField("sellers_send_address"));
        }
        Ok(())
    }
}

/// Edit an open exchange order.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageEditOrder {
    /// The order being edited.
    #[prost(bytes = "vec", tag = "1")]
    pub order_id: Vec<u8>,
    /// The counter-asset chain id.
    #[prost(uint64, tag = "2")]
    pub chain_id: u64,
    /// Updated native amount offered.
    #[prost(uint64, tag = "3")]
    pub amount_for_sale: u64,
    /// Updated counter amount requested.
    #[prost(uint64, tag = "4")]
    pub requested_amount: u64,
    /// Updated counter-asset receive address.
    #[prost(bytes = "vec", tag = "5")]
    pub seller_receive_address: Vec<u8>,
}
impl_name!(MessageEditOrder, "MessageEditOrder");

impl ProtocolMessage for MessageEditOrder {
    const TYPE: &'static str = "editOrder";

    fn validate(&self) -> Result<(), TxError> {
        if self.order_id.is_empty() {
            return Err(TxError::MissingField("order_id"));
        }
        if self.chain_id == 0 {
            return Err(TxError::MissingField("chain_id"));
        }
        if self.amount_for_sale == 0 {
            return Err(TxError::MissingField("amount_for_sale"));
        }
        if self.requested_amount == 0 {
            return Err(TxError::MissingField("requested_amount"));
        }
        Ok(())
    }
}

/// Delete an open exchange order.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageDeleteOrder {
    /// The order being deleted.
    #[prost(bytes = "vec", tag = "1")]
    pub order_id: Vec<u8>,
    /// The counter-asset chain id.
    #[prost(uint64, tag = "2")]
    pub chain_id: u64,
}
impl_name!(MessageDeleteOrder, "MessageDeleteOrder");

impl ProtocolMessage for MessageDeleteOrder {
    const TYPE: &'static str = "deleteOrder";

    fn validate(&self) -> Result<(), TxError> {
        if self.order_id.is_empty() {
            return Err(TxError::MissingField("order_id"));
        }
        if self.chain_id == 0 {
            return Err(TxError::MissingField("chain_id"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Name;

    #[test]
    fn test_type_urls_are_fully_qualified() {
        assert_eq!(MessageSend::type_url(), "/types.MessageSend");
        assert_eq!(MessageDaoTransfer::type_url(), "/types.MessageDAOTransfer");
        assert_eq!(Transaction::type_url(), "/types.Transaction");
    }

    #[test]
    fn test_known_wire_encoding_of_send() {
        // Hand-computed proto3 bytes: field 1 (bytes, tag 0x0a) 3 bytes,
        // field 2 (bytes, tag 0x12) 3 bytes, field 3 (varint, tag 0x18) 100.
        let msg = MessageSend {
            from_address: vec![0xAA, 0xBB, 0xCC],
            to_address: vec![0x01, 0x02, 0x03],
            amount: 100,
        };
        assert_eq!(hex::encode(msg.encode_to_vec()), "0a03aabbcc12030102031864");
    }

    #[test]
    fn test_zero_fields_are_omitted() {
        let empty = MessageSend::default();
        assert!(empty.encode_to_vec().is_empty());

        let amount_only = MessageSend {
            amount: 1,
            ..Default::default()
        };
        // Just the varint field: tag 0x18, value 0x01.
        assert_eq!(amount_only.encode_to_vec(), vec![0x18, 0x01]);
    }

    #[test]
    fn test_stake_omission_property() {
        // Zero-valued delegate/compound/net_address must make the
        // encoding strictly shorter, proving omission is active.
        let base = MessageStake {
            public_key: vec![0x11; 32],
            amount: 5_000,
            committees: vec![1, 2],
            net_address: String::new(),
            output_address: vec![0x22; 20],
            delegate: false,
            compound: false,
        };
        let full = MessageStake {
            net_address: "x".to_string(),
            delegate: true,
            compound: true,
            ..base.clone()
        };
        assert!(base.encode_to_vec().len() < full.encode_to_vec().len());
    }

    #[test]
    fn test_validation_names_missing_field() {
        let err = MessageSend {
            from_address: vec![1],
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, TxError::MissingField("to_address")));

        let err = MessageStake {
            public_key: vec![1],
            amount: 1,
            output_address: vec![2],
            delegate: false,
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, TxError::MissingField("net_address")));

        // Delegates need no net address.
        assert!(MessageStake {
            public_key: vec![1],
            amount: 1,
            output_address: vec![2],
            delegate: true,
            ..Default::default()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_parameter_value_wrappers() {
        let any = MessageChangeParameter::uint64_value(42);
        assert_eq!(any.type_url, "/types.UInt64Wrapper");
        let back = UInt64Wrapper::decode(any.value.as_slice()).unwrap();
        assert_eq!(back.value, 42);

        let any = MessageChangeParameter::string_value("minFee");
        assert_eq!(any.type_url, "/types.StringWrapper");
        let back = StringWrapper::decode(any.value.as_slice()).unwrap();
        assert_eq!(back.value, "minFee");
    }

    #[test]
    fn test_message_types_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for t in MESSAGE_TYPES {
            assert!(seen.insert(t), "duplicate message type {}", t);
        }
    }
}
